//! Curve-driven stamping of structures in voxel worlds.
//!
//! A [`SweepTool`] collects anchor blocks, fits a smooth curve through them
//! and pastes the session's structure at points planned along the curve.
//!
//! # Pipeline
//!
//! - [`curve`]: Kochanek–Bartels fitting, tangents and arc length
//! - [`planner`]: turns a [`StampPolicy`] into curve parameters
//! - [`tool`]: the activation state machine that drives a run
//!
//! Writing to a world and talking to the user happen through the [`World`]
//! and [`Session`] traits.

/// Ordered anchor positions.
pub mod anchors;
/// Curve fitting and evaluation.
pub mod curve;
/// Error types used across the crate.
pub mod error;
/// Numeric approximations shared by the planner.
#[doc(hidden)]
pub mod ops;
/// Stamp rotation and the policies that choose it.
pub mod orientation;
/// Stamp placement planning.
pub mod planner;
/// Block positions and conversions to curve space.
pub mod point;
/// How many stamps a run places.
pub mod policy;
/// Central registry of orientation policies.
pub mod registry;
/// The user-facing side of a sweep.
pub mod session;
/// Structures and their extents.
pub mod structure;
/// The sweep tool state machine.
pub mod tool;
/// Write access to a world.
pub mod world;

pub use crate::{
    curve::FittedCurve,
    error::{Error, Result},
    orientation::{Orientation, OrientationPolicy},
    policy::StampPolicy,
    session::{Notice, Session},
    structure::{Extent, Structure},
    tool::{Activation, SharedTool, SweepTool},
    world::{NullWorld, World},
};

/// Build a sweep tool whose orientation policy is looked up by name.
///
/// Returns an error if the policy is invalid or the name is unknown.
pub fn tool_from_names(policy: StampPolicy, orientation: &str) -> Result<SweepTool> {
    SweepTool::with_orientation(policy, registry::construct(orientation)?)
}
