//! Curve model: nodes and the interpolating spline fitted through them.

/// Kochanek–Bartels spline evaluation and arc length.
mod kochanek_bartels;
/// Curve nodes and their shape parameters.
mod node;

pub use kochanek_bartels::{ARC_LENGTH_SUBSAMPLES, FittedCurve};
pub use node::CurveNode;
