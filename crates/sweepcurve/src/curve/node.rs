use glam::DVec3;

use crate::point::{BlockPos, to_curve_space};

/// A control point of a Kochanek–Bartels spline.
///
/// The shape parameters all default to zero, which turns the spline into a
/// uniform Catmull-Rom curve. Sweeps never change them; they are kept on the
/// node so the evaluation code stays the general formulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveNode {
    /// Position the curve passes through.
    pub position: DVec3,
    /// Tension: positive values tighten the curve around the node.
    pub tension: f64,
    /// Bias: shifts the tangent towards the previous (positive) or next node.
    pub bias: f64,
    /// Continuity: negative values produce sharper corners.
    pub continuity: f64,
}

impl CurveNode {
    /// Node at `position` with zero tension, bias and continuity.
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            tension: 0.0,
            bias: 0.0,
            continuity: 0.0,
        }
    }

    /// Node at the corner of block `pos`.
    pub fn at_block(pos: BlockPos) -> Self {
        Self::new(to_curve_space(pos))
    }
}
