//! Turn a fitted curve and a stamp policy into the parameters to stamp at.

use glam::DVec3;
use log::debug;

use crate::{
    curve::FittedCurve,
    error::{Error, Result},
    ops,
    policy::StampPolicy,
};

/// Extra parameter travel credited per sampling step under auto spacing,
/// in units of the step.
///
/// Empirically tuned: it keeps stamps from thinning out on gently curving
/// stretches where the tangent barely changes. It has no physical
/// derivation, and changing it changes stamp density.
pub const SPACING_BIAS: f64 = 2.0;

/// Curves shorter than this are treated as a single point.
const MIN_SPLINE_LENGTH: f64 = 1e-9;

/// Upper bound on auto-spacing iterations for one plan.
const MAX_SAMPLING_STEPS: f64 = 1e8;

/// Plan the curve parameters at which stamps are placed.
///
/// `structure_width` is the footprint width of the structure in blocks; it is
/// only read by [`StampPolicy::AutoSpacing`]. The returned parameters lie in
/// `[0, 1]` and are strictly increasing.
pub fn plan(curve: &FittedCurve, policy: StampPolicy, structure_width: f64) -> Result<Vec<f64>> {
    match policy.validate()? {
        StampPolicy::Single => Ok(vec![0.0]),
        StampPolicy::FixedCount(n) => Ok(fixed_count(n)),
        StampPolicy::AutoSpacing => auto_spacing(curve, structure_width),
    }
}

/// `n` parameters evenly spaced over `[0, 1]`, both ends included.
fn fixed_count(n: u32) -> Vec<f64> {
    let last = f64::from(n - 1);
    (0..n).map(|i| f64::from(i) / last).collect()
}

/// Single-pass approximate equal spacing along the curve.
///
/// Walks the parameter range in steps of `1 / (length · width)` and
/// accumulates a distance estimate from the change in tangent plus
/// [`SPACING_BIAS`]. Each time the accumulator passes the parameter length of
/// one block a stamp is emitted and one block's worth is carried off, so the
/// remainder rolls into the next stamp instead of being dropped.
fn auto_spacing(curve: &FittedCurve, structure_width: f64) -> Result<Vec<f64>> {
    if !structure_width.is_finite() || structure_width <= 0.0 {
        return Err(Error::DegenerateCurve(format!(
            "structure width must be positive, got {structure_width}"
        )));
    }

    let spline_length = curve.arc_length(0.0, 1.0);
    if !spline_length.is_finite() || spline_length < MIN_SPLINE_LENGTH {
        return Err(Error::DegenerateCurve(format!(
            "curve length {spline_length} is too short to space stamps along; move the anchors apart"
        )));
    }

    let block_distance = 1.0 / spline_length;
    let step = block_distance / structure_width;
    if !step.is_finite() || step <= 0.0 || 1.0 / step > MAX_SAMPLING_STEPS {
        return Err(Error::DegenerateCurve(format!(
            "sampling step {step} is out of range for length {spline_length} and width {structure_width}"
        )));
    }

    let mut samples = Vec::new();
    let mut accumulation = 0.0;
    let mut last = DVec3::ZERO;
    // Positions are derived from the step index so rounding does not drift.
    for pos in (0u64..).map(|i| i as f64 * step).take_while(|pos| *pos <= 1.0) {
        let gradient = curve.tangent(pos);
        let dist = ops::distance_approx(last, gradient);
        last = gradient;

        accumulation += dist * step + step * SPACING_BIAS;
        if accumulation > block_distance {
            accumulation -= block_distance;
            samples.push(pos);
        }
    }

    debug!(
        "auto spacing: length {spline_length:.3}, width {structure_width}, step {step:.6}, {} stamps",
        samples.len()
    );
    Ok(samples)
}
