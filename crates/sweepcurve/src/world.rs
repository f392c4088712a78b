//! The world-write boundary: where stamps end up.

use std::mem;

use log::trace;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{orientation::Orientation, point::BlockPos, structure::Structure};

/// A paste the world refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("pasting '{structure}' at {position} failed: {reason}")]
pub struct WriteError {
    /// Name of the structure being pasted.
    pub structure: String,
    /// Target block of the failed stamp.
    pub position: BlockPos,
    /// Why the world refused.
    pub reason: String,
}

/// Writes stamps into a world.
///
/// Pastes are synchronous: when `paste` returns, the stamp is in place and the
/// next one may overlap it.
pub trait World {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Whether this world only previews edits.
    ///
    /// Preview worlds receive activations while the user hovers; a tool with
    /// no anchors ignores them.
    fn is_preview(&self) -> bool {
        false
    }

    /// Paste `structure` at `position`, rotated by `orientation`.
    fn paste(
        &mut self,
        structure: &Structure,
        position: BlockPos,
        orientation: Orientation,
    ) -> Result<(), WriteError>;
}

/// A world that accepts every paste and keeps nothing.
///
/// Stands in when no real world is attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullWorld;

impl World for NullWorld {
    fn name(&self) -> &str {
        "null"
    }

    fn paste(
        &mut self,
        structure: &Structure,
        position: BlockPos,
        _orientation: Orientation,
    ) -> Result<(), WriteError> {
        trace!("null world: dropped '{}' at {position}", structure.name);
        Ok(())
    }
}

/// One stamp as written to a [`RecordingWorld`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Name of the pasted structure.
    pub structure: String,
    /// Target block.
    pub position: BlockPos,
    /// Rotation about Y.
    pub orientation: Orientation,
}

/// An in-memory world that records every paste in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingWorld {
    /// Placements so far, oldest first.
    placements: Vec<Placement>,
    /// Preview mode flag.
    preview: bool,
    /// Maximum number of pastes accepted before refusing.
    limit: Option<usize>,
}

impl RecordingWorld {
    /// An empty, editable world with no paste limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty world in preview mode.
    pub fn preview() -> Self {
        Self {
            preview: true,
            ..Self::default()
        }
    }

    /// Refuse pastes once `limit` placements have been recorded.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Recorded placements, oldest first.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Take the recorded placements, leaving the world empty.
    pub fn take_placements(&mut self) -> Vec<Placement> {
        mem::take(&mut self.placements)
    }
}

impl World for RecordingWorld {
    fn name(&self) -> &str {
        if self.preview { "preview" } else { "memory" }
    }

    fn is_preview(&self) -> bool {
        self.preview
    }

    fn paste(
        &mut self,
        structure: &Structure,
        position: BlockPos,
        orientation: Orientation,
    ) -> Result<(), WriteError> {
        if let Some(limit) = self.limit
            && self.placements.len() >= limit
        {
            return Err(WriteError {
                structure: structure.name.clone(),
                position,
                reason: format!("change limit of {limit} stamps reached"),
            });
        }
        self.placements.push(Placement {
            structure: structure.name.clone(),
            position,
            orientation,
        });
        Ok(())
    }
}
