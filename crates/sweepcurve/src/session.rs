//! The interaction side of a sweep: clipboard access and user feedback.

use std::fmt;

use crate::{error::Error, structure::Structure};

/// A message for the user driving the tool.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    /// An anchor was accepted; `count` anchors are now held.
    AnchorAdded {
        /// Anchors held after the addition.
        count: usize,
    },
    /// A stamping run finished and the tool was reset.
    RunComplete {
        /// Number of stamps written.
        stamps: usize,
    },
    /// An activation failed. Tool state is as described by the error.
    Error(Error),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnchorAdded { count } => write!(
                f,
                "Anchor {count} added. Add another, or activate the same point again to sweep."
            ),
            Self::RunComplete { stamps } => write!(f, "Sweep complete: {stamps} stamps placed."),
            Self::Error(e) => write!(f, "Sweep failed: {e}"),
        }
    }
}

/// What the tool needs from the user's session.
pub trait Session {
    /// The structure currently on the clipboard, if any.
    fn active_structure(&self) -> Option<&Structure>;

    /// Deliver a message to the user. Must not block.
    fn notify(&mut self, notice: Notice);
}

/// A session held entirely in memory; notices are queued for inspection.
#[derive(Clone, Debug, Default)]
pub struct MemorySession {
    /// Clipboard contents.
    structure: Option<Structure>,
    /// Delivered notices, oldest first.
    notices: Vec<Notice>,
}

impl MemorySession {
    /// A session with `structure` on its clipboard.
    pub fn with_structure(structure: Structure) -> Self {
        Self {
            structure: Some(structure),
            notices: Vec::new(),
        }
    }

    /// A session with an empty clipboard.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace the clipboard contents.
    pub fn set_structure(&mut self, structure: Option<Structure>) {
        self.structure = structure;
    }

    /// Notices delivered so far.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// The most recent notice.
    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl Session for MemorySession {
    fn active_structure(&self) -> Option<&Structure> {
        self.structure.as_ref()
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
