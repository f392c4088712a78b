/*
Kochanek–Bartels spline, as described in "Interpolating Splines with Local
Tension, Continuity, and Bias Control" by D. Kochanek and R. Bartels.

Every node i owns one cubic segment running from node i to node i+1. The
node before the first and the node after the last are clamped to the end
nodes, so the curve starts and ends exactly on the first and last anchor.
The last node owns a degenerate segment so that t = 1 evaluates without a
special case.
*/

use glam::DVec3;

use super::node::CurveNode;
use crate::{
    anchors::AnchorSequence,
    error::{Error, Result},
};

/// Midpoint samples per segment used by [`FittedCurve::arc_length`].
pub const ARC_LENGTH_SUBSAMPLES: u32 = 16;

/// Cubic coefficients of one segment in Horner form: `((a·r + b)·r + c)·r + d`.
#[derive(Clone, Copy, Debug)]
struct Segment {
    /// Cubic coefficient.
    a: DVec3,
    /// Quadratic coefficient.
    b: DVec3,
    /// Linear coefficient (the outgoing tangent of the segment's node).
    c: DVec3,
    /// Constant term (the segment's node).
    d: DVec3,
}

impl Segment {
    /// Position at local parameter `r ∈ [0, 1]`.
    fn position(&self, r: f64) -> DVec3 {
        ((self.a * r + self.b) * r + self.c) * r + self.d
    }

    /// Derivative with respect to the local parameter `r`.
    fn derivative(&self, r: f64) -> DVec3 {
        (self.a * (3.0 * r) + self.b * 2.0) * r + self.c
    }

    /// Midpoint-rule length of the segment between local parameters `lo` and `hi`.
    fn length(&self, lo: f64, hi: f64, subsamples: u32) -> f64 {
        let span = hi - lo;
        if span <= 0.0 || subsamples == 0 {
            return 0.0;
        }
        let n = f64::from(subsamples);
        let total: f64 = (0..subsamples)
            .map(|j| {
                let r = lo + span * ((f64::from(j) + 0.5) / n);
                self.derivative(r).length()
            })
            .sum();
        total * span / n
    }
}

/// An immutable spline fitted through two or more nodes.
///
/// Nodes are spread evenly over the normalized parameter range: node `i` of
/// `n` sits at `t = i / (n - 1)`.
#[derive(Clone, Debug)]
pub struct FittedCurve {
    /// Nodes in the order they were given.
    nodes: Vec<CurveNode>,
    /// One segment per node; the last one is degenerate.
    segments: Vec<Segment>,
    /// Number of real segments (`nodes.len() - 1`); maps `t` to segment space.
    scaling: f64,
}

impl FittedCurve {
    /// Fit a curve through `nodes`.
    ///
    /// Fails with [`Error::InsufficientAnchors`] for fewer than two nodes.
    pub fn fit(nodes: Vec<CurveNode>) -> Result<Self> {
        if nodes.len() < 2 {
            return Err(Error::InsufficientAnchors { count: nodes.len() });
        }
        let segments = (0..nodes.len())
            .map(|i| segment_coefficients(&nodes, i))
            .collect();
        let scaling = (nodes.len() - 1) as f64;
        Ok(Self {
            nodes,
            segments,
            scaling,
        })
    }

    /// Fit a zero-shape curve through the anchors of a sweep.
    pub fn from_anchors(anchors: &AnchorSequence) -> Result<Self> {
        Self::fit(anchors.iter().copied().map(CurveNode::at_block).collect())
    }

    /// The nodes the curve was fitted through.
    pub fn nodes(&self) -> &[CurveNode] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Parameter at which the curve passes through node `index`.
    pub fn anchor_parameter(&self, index: usize) -> f64 {
        index as f64 / self.scaling
    }

    /// Split `t` into a segment index and the local parameter within it.
    ///
    /// `t` is clamped to `[0, 1]`.
    fn locate(&self, t: f64) -> (usize, f64) {
        let x = t.clamp(0.0, 1.0) * self.scaling;
        let index = (x.floor() as usize).min(self.segments.len() - 1);
        (index, x - index as f64)
    }

    /// Point on the curve at `t ∈ [0, 1]`.
    pub fn position(&self, t: f64) -> DVec3 {
        let (index, r) = self.locate(t);
        self.segments[index].position(r)
    }

    /// First derivative of the curve with respect to `t ∈ [0, 1]`.
    pub fn tangent(&self, t: f64) -> DVec3 {
        let (index, r) = self.locate(t);
        self.segments[index].derivative(r) * self.scaling
    }

    /// Approximate distance travelled along the curve between `t0` and `t1`.
    ///
    /// Symmetric in its arguments. Uses [`ARC_LENGTH_SUBSAMPLES`] midpoint
    /// samples per segment.
    pub fn arc_length(&self, t0: f64, t1: f64) -> f64 {
        self.arc_length_sampled(t0, t1, ARC_LENGTH_SUBSAMPLES)
    }

    /// [`arc_length`](Self::arc_length) with an explicit sample count per segment.
    ///
    /// Higher counts converge on the true length.
    pub fn arc_length_sampled(&self, t0: f64, t1: f64, subsamples: u32) -> f64 {
        let (lo, hi) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
        let (first, r_first) = self.locate(lo);
        let (last, r_last) = self.locate(hi);

        (first..=last)
            .map(|index| {
                let from = if index == first { r_first } else { 0.0 };
                let to = if index == last { r_last } else { 1.0 };
                self.segments[index].length(from, to, subsamples)
            })
            .sum()
    }
}

/// Node position at `index`, clamped to the ends of the node list.
fn clamped(nodes: &[CurveNode], index: isize) -> DVec3 {
    let last = nodes.len() as isize - 1;
    nodes[index.clamp(0, last) as usize].position
}

/// Compute the cubic coefficients of the segment starting at node `i`.
fn segment_coefficients(nodes: &[CurveNode], i: usize) -> Segment {
    let node_a = nodes[i];
    let node_b = nodes[(i + 1).min(nodes.len() - 1)];

    // Tangent weights: incoming/outgoing at node i, incoming/outgoing at node i+1.
    let ta = (1.0 - node_a.tension) * (1.0 + node_a.bias) * (1.0 + node_a.continuity) / 2.0;
    let tb = (1.0 - node_a.tension) * (1.0 - node_a.bias) * (1.0 - node_a.continuity) / 2.0;
    let tc = (1.0 - node_b.tension) * (1.0 + node_b.bias) * (1.0 - node_b.continuity) / 2.0;
    let td = (1.0 - node_b.tension) * (1.0 - node_b.bias) * (1.0 + node_b.continuity) / 2.0;

    let i = i as isize;
    let p0 = clamped(nodes, i - 1);
    let p1 = clamped(nodes, i);
    let p2 = clamped(nodes, i + 1);
    let p3 = clamped(nodes, i + 2);
    let combine = |f0: f64, f1: f64, f2: f64, f3: f64| p0 * f0 + p1 * f1 + p2 * f2 + p3 * f3;

    Segment {
        a: combine(-ta, ta - tb - tc + 2.0, tb + tc - td - 2.0, td),
        b: combine(
            2.0 * ta,
            -2.0 * ta + 2.0 * tb + tc - 3.0,
            -2.0 * tb - tc + td + 3.0,
            -td,
        ),
        c: combine(-ta, ta - tb, tb, 0.0),
        d: p1,
    }
}
