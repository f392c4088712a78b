//! Stamp orientation and the policies that choose it along a curve.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::{curve::FittedCurve, structure::Extent};

/// Horizontal tangents shorter than this have no usable heading.
const MIN_HEADING_LENGTH: f64 = 1e-9;

/// Rotation of a stamp about the vertical (Y) axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    /// Yaw in degrees, normalized to `[0, 360)`.
    yaw: f64,
}

impl Orientation {
    /// No rotation.
    pub const IDENTITY: Self = Self { yaw: 0.0 };

    /// Orientation rotated `degrees` about Y.
    pub fn from_degrees(degrees: f64) -> Self {
        Self {
            yaw: degrees.rem_euclid(360.0),
        }
    }

    /// Default orientation for a structure of the given extent.
    ///
    /// Structures longer along X than along Z are turned a quarter so that
    /// their long side runs across the sweep rather than along it.
    pub fn for_footprint(extent: Extent) -> Self {
        if extent.width > extent.depth {
            Self::from_degrees(90.0)
        } else {
            Self::IDENTITY
        }
    }

    /// Yaw in degrees, in `[0, 360)`.
    pub fn yaw_degrees(&self) -> f64 {
        self.yaw
    }

    /// This orientation turned a further `degrees` about Y.
    pub fn turned(self, degrees: f64) -> Self {
        Self::from_degrees(self.yaw + degrees)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.yaw)
    }
}

/// Decides how each stamp of a run is rotated.
///
/// The orchestrator computes a `base` orientation once per run from the
/// structure's footprint and asks the policy for every planned parameter.
pub trait OrientationPolicy: Send + Sync {
    /// Registry key of the policy.
    fn name(&self) -> &'static str;

    /// Orientation of the stamp placed at curve parameter `t`.
    fn orient(&self, base: Orientation, curve: &FittedCurve, t: f64) -> Orientation;
}

/// Keeps every stamp at the footprint-derived base orientation.
///
/// One rotation for the whole run, so neighbouring stamps never twist
/// against each other.
#[derive(Clone, Copy, Debug, Default)]
pub struct FootprintAligned;

impl OrientationPolicy for FootprintAligned {
    fn name(&self) -> &'static str {
        "footprint"
    }

    fn orient(&self, base: Orientation, _curve: &FittedCurve, _t: f64) -> Orientation {
        base
    }
}

/// Turns each stamp by how far the curve's heading has swung since its start.
///
/// The heading is measured in the XZ plane; vertical stretches of the curve
/// keep the base orientation.
#[derive(Clone, Copy, Debug, Default)]
pub struct TangentFollowing;

/// Heading of `dir` in the XZ plane, in degrees, in the same sense as a
/// positive rotation about Y.
fn heading(dir: DVec3) -> Option<f64> {
    let flat = DVec3::new(dir.x, 0.0, dir.z);
    (flat.length() >= MIN_HEADING_LENGTH).then(|| (-dir.z).atan2(dir.x).to_degrees())
}

impl OrientationPolicy for TangentFollowing {
    fn name(&self) -> &'static str {
        "tangent"
    }

    fn orient(&self, base: Orientation, curve: &FittedCurve, t: f64) -> Orientation {
        match (heading(curve.tangent(0.0)), heading(curve.tangent(t))) {
            (Some(start), Some(here)) => base.turned(here - start),
            _ => base,
        }
    }
}
