//! Error types shared across the crate.

use std::result::Result as StdResult;

use thiserror::Error;

use crate::world::WriteError;

/// Errors raised while fitting, planning or stamping a sweep.
///
/// Every variant is recoverable: the tool reports it to the session and the
/// user retries with different input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A stamping run was triggered with fewer than two anchors.
    #[error("a sweep needs at least 2 anchors, have {count}")]
    InsufficientAnchors {
        /// Number of anchors available when the run was triggered.
        count: usize,
    },
    /// No structure is loaded in the session.
    #[error("no structure is loaded; copy one to the clipboard first")]
    MissingStructure,
    /// The curve or structure is too small to space stamps along.
    #[error("degenerate curve: {0}")]
    DegenerateCurve(String),
    /// The stamp policy cannot be planned.
    #[error("invalid stamp policy: {0}")]
    InvalidPolicy(String),
    /// The world refused a paste; the remaining stamps were skipped.
    #[error(transparent)]
    WriteFailure(#[from] WriteError),
}

/// Convenience result type used throughout the crate.
pub type Result<T> = StdResult<T, Error>;
