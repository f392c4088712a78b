//! Command handlers for the `sweep` CLI.
//!
//! Each sweep runs against an in-memory world so the stamps it would place can
//! be printed or written out as a JSON report.

use anyhow::Result;
use log::info;
use serde::Serialize;
use sweepcurve::{
    Activation, FittedCurve, StampPolicy, Structure,
    anchors::AnchorSequence,
    planner,
    point::{self, BlockPos},
    session::MemorySession,
    tool_from_names,
    world::{Placement, RecordingWorld},
};

/// Parameters supplied by the CLI for the `run` subcommand.
pub struct RunOptions<'a> {
    /// Stamp-count policy.
    pub policy: StampPolicy,
    /// Structure on the clipboard.
    pub structure: Structure,
    /// Registry key of the orientation policy.
    pub orientation: &'a str,
    /// Refuse pastes past this many stamps.
    pub max_stamps: Option<usize>,
    /// Activation positions, in click order.
    pub anchors: &'a [BlockPos],
}

/// Outcome of a sweep run.
#[derive(Debug, Serialize)]
pub struct Report {
    /// The stamped structure.
    pub structure: Structure,
    /// Policy the run used.
    pub policy: StampPolicy,
    /// Orientation policy key.
    pub orientation: String,
    /// Anchors the curve was fitted through.
    pub anchors: Vec<BlockPos>,
    /// Every paste, in order.
    pub stamps: Vec<Placement>,
}

/// Drive a tool the way a user would: click every anchor, then click the last
/// one again to confirm.
///
/// Session notices are logged at info level whether or not the run succeeds.
pub fn run(options: RunOptions<'_>) -> Result<Report> {
    let RunOptions {
        policy,
        structure,
        orientation,
        max_stamps,
        anchors,
    } = options;

    let mut tool = tool_from_names(policy, orientation)?;
    let mut world = match max_stamps {
        Some(limit) => RecordingWorld::new().with_limit(limit),
        None => RecordingWorld::new(),
    };
    let mut session = MemorySession::with_structure(structure.clone());

    let outcome = anchors
        .iter()
        .chain(anchors.last())
        .try_fold(Activation::Ignored, |_, &anchor| {
            tool.activate(anchor, &mut world, &mut session)
        });
    for notice in session.notices() {
        info!("{notice}");
    }
    outcome?;

    Ok(Report {
        structure,
        policy,
        orientation: tool.orientation_policy().name().to_string(),
        anchors: anchors.to_vec(),
        stamps: world.take_placements(),
    })
}

/// One planned stamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannedStamp {
    /// Curve parameter.
    pub t: f64,
    /// Block the stamp lands on.
    pub position: BlockPos,
}

/// Result of planning without stamping.
pub struct PlanSummary {
    /// Estimated length of the fitted curve in blocks.
    pub length: f64,
    /// Planned stamps, in curve order.
    pub stamps: Vec<PlannedStamp>,
}

/// Fit a curve through `anchors` and plan stamps for a structure of width
/// `width` without writing anything.
pub fn plan(policy: StampPolicy, width: u32, anchors: &[BlockPos]) -> Result<PlanSummary> {
    let anchors: AnchorSequence = anchors.iter().copied().collect();
    let curve = FittedCurve::from_anchors(&anchors)?;
    let stamps = planner::plan(&curve, policy, f64::from(width))?
        .into_iter()
        .map(|t| PlannedStamp {
            t,
            position: point::to_block(curve.position(t)),
        })
        .collect();

    Ok(PlanSummary {
        length: curve.arc_length(0.0, 1.0),
        stamps,
    })
}
