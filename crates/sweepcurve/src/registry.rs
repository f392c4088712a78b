//! Central registry of orientation policies.
//!
//! Keeps the list of selectable policies, their display names and
//! constructors in one place so the CLI and library stay in sync.

use crate::{
    error::{Error, Result},
    orientation::{FootprintAligned, OrientationPolicy, TangentFollowing},
};

/// Metadata for a registered orientation policy.
pub struct OrientationEntry {
    /// Lookup key used on the command line.
    pub key: &'static str,
    /// Human-readable name.
    pub display: &'static str,
    /// One-line behaviour summary.
    pub description: &'static str,
    /// Constructor for the policy.
    constructor: fn() -> Box<dyn OrientationPolicy>,
}

/// Constructor for [`FootprintAligned`].
fn footprint() -> Box<dyn OrientationPolicy> {
    Box::new(FootprintAligned)
}

/// Constructor for [`TangentFollowing`].
fn tangent() -> Box<dyn OrientationPolicy> {
    Box::new(TangentFollowing)
}

/// All registered orientation policies, default first.
pub const REGISTRY: &[OrientationEntry] = &[
    OrientationEntry {
        key: "footprint",
        display: "Footprint aligned",
        description: "one rotation per run; quarter turn when the structure is longer along X than Z",
        constructor: footprint,
    },
    OrientationEntry {
        key: "tangent",
        display: "Tangent following",
        description: "footprint rotation plus the curve's change of heading since its start",
        constructor: tangent,
    },
];

/// Keys of all registered orientation policies.
pub const ORIENTATION_NAMES: &[&str] = &["footprint", "tangent"];

/// Look up a registry entry by key.
pub fn find(name: &str) -> Option<&'static OrientationEntry> {
    REGISTRY.iter().find(|entry| entry.key == name)
}

/// Construct the orientation policy registered under `name`.
pub fn construct(name: &str) -> Result<Box<dyn OrientationPolicy>> {
    find(name)
        .map(|entry| (entry.constructor)())
        .ok_or_else(|| {
            Error::InvalidPolicy(format!(
                "unknown orientation '{name}'; valid options: {}",
                ORIENTATION_NAMES.join(", ")
            ))
        })
}
