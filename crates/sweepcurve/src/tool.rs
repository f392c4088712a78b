//! The sweep tool: collects anchors and stamps structures along them.

use std::{
    mem, slice,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use log::{debug, trace, warn};

use crate::{
    anchors::AnchorSequence,
    curve::FittedCurve,
    error::{Error, Result},
    orientation::{FootprintAligned, Orientation, OrientationPolicy},
    planner,
    point::{self, BlockPos},
    policy::StampPolicy,
    session::{Notice, Session},
    world::World,
};

/// Where the tool is in its collect → confirm → stamp cycle.
///
/// The last-seen activation position is always the most recent anchor, so a
/// second activation on it is a confirmation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ToolState {
    /// No anchors.
    #[default]
    Idle,
    /// One anchor; a confirmation now is an error.
    Collecting(BlockPos),
    /// Two or more anchors; a confirmation stamps.
    ReadyToFire(AnchorSequence),
}

impl ToolState {
    /// Anchors held in this state, oldest first.
    pub fn anchors(&self) -> &[BlockPos] {
        match self {
            Self::Idle => &[],
            Self::Collecting(anchor) => slice::from_ref(anchor),
            Self::ReadyToFire(anchors) => anchors,
        }
    }

    /// The position of the last accepted activation.
    pub fn last_seen(&self) -> Option<BlockPos> {
        self.anchors().last().copied()
    }

    /// The state after accepting a new anchor at `pos`.
    fn with_anchor(self, pos: BlockPos) -> Self {
        match self {
            Self::Idle => Self::Collecting(pos),
            Self::Collecting(first) => Self::ReadyToFire([first, pos].into_iter().collect()),
            Self::ReadyToFire(mut anchors) => {
                anchors.push(pos);
                Self::ReadyToFire(anchors)
            }
        }
    }
}

/// What an activation did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// A preview activation with nothing to preview.
    Ignored,
    /// A new anchor was accepted.
    AnchorAdded {
        /// Anchors held after the addition.
        count: usize,
    },
    /// A run completed and the tool was reset.
    Stamped {
        /// Number of stamps written.
        stamps: usize,
    },
}

/// Curve sweep tool.
///
/// Each activation at a new position adds an anchor. Activating the last
/// anchor again fits a curve through all anchors and pastes the session's
/// structure along it according to the tool's [`StampPolicy`].
pub struct SweepTool {
    /// Stamp-count policy, fixed at construction.
    policy: StampPolicy,
    /// Per-stamp rotation policy.
    orientation: Box<dyn OrientationPolicy>,
    /// Collected anchors.
    state: ToolState,
}

impl SweepTool {
    /// A tool with the footprint-aligned orientation policy.
    pub fn new(policy: StampPolicy) -> Result<Self> {
        Self::with_orientation(policy, Box::new(FootprintAligned))
    }

    /// A tool with an explicit orientation policy.
    ///
    /// Fails with [`Error::InvalidPolicy`] if `policy` cannot be planned.
    pub fn with_orientation(
        policy: StampPolicy,
        orientation: Box<dyn OrientationPolicy>,
    ) -> Result<Self> {
        Ok(Self {
            policy: policy.validate()?,
            orientation,
            state: ToolState::Idle,
        })
    }

    /// The tool's stamp policy.
    pub fn policy(&self) -> StampPolicy {
        self.policy
    }

    /// The tool's orientation policy.
    pub fn orientation_policy(&self) -> &dyn OrientationPolicy {
        self.orientation.as_ref()
    }

    /// Current state.
    pub fn state(&self) -> &ToolState {
        &self.state
    }

    /// Anchors collected so far, oldest first.
    pub fn anchors(&self) -> &[BlockPos] {
        self.state.anchors()
    }

    /// Forget all anchors and the last-seen position.
    ///
    /// Always succeeds; returns `true` for hosts that track resettable tools.
    pub fn reset(&mut self) -> bool {
        self.state = ToolState::Idle;
        true
    }

    /// Handle a user activation at `position`.
    ///
    /// Every error is also delivered to `session` as [`Notice::Error`]. On
    /// error the anchors are kept so the user can fix the cause and confirm
    /// again.
    pub fn activate<W, S>(
        &mut self,
        position: BlockPos,
        world: &mut W,
        session: &mut S,
    ) -> Result<Activation>
    where
        W: World + ?Sized,
        S: Session + ?Sized,
    {
        if world.is_preview() && self.state == ToolState::Idle {
            return Ok(Activation::Ignored);
        }

        if self.state.last_seen() != Some(position) {
            self.state = mem::take(&mut self.state).with_anchor(position);
            let count = self.anchors().len();
            debug!("anchor {count} at {position}");
            session.notify(Notice::AnchorAdded { count });
            return Ok(Activation::AnchorAdded { count });
        }

        match self.fire(world, &*session) {
            Ok(stamps) => {
                self.reset();
                session.notify(Notice::RunComplete { stamps });
                Ok(Activation::Stamped { stamps })
            }
            Err(e) => {
                warn!("sweep at {position} failed: {e}");
                session.notify(Notice::Error(e.clone()));
                Err(e)
            }
        }
    }

    /// Fit, plan and paste. Leaves tool state untouched.
    fn fire<W, S>(&self, world: &mut W, session: &S) -> Result<usize>
    where
        W: World + ?Sized,
        S: Session + ?Sized,
    {
        let ToolState::ReadyToFire(anchors) = &self.state else {
            return Err(Error::InsufficientAnchors {
                count: self.anchors().len(),
            });
        };
        let structure = session.active_structure().ok_or(Error::MissingStructure)?;

        let curve = FittedCurve::from_anchors(anchors)?;
        let extent = structure.extent;
        let params = planner::plan(&curve, self.policy, f64::from(extent.footprint()))?;
        let base = Orientation::for_footprint(extent);
        debug!(
            "sweeping '{}' ({extent}) into {}: {} anchors, policy {}, {} stamps, base {base}",
            structure.name,
            world.name(),
            anchors.len(),
            self.policy,
            params.len()
        );

        for &t in &params {
            let position = point::to_block(curve.position(t));
            let orientation = self.orientation.orient(base, &curve, t);
            trace!("stamp t={t:.4} at {position} rotated {orientation}");
            world.paste(structure, position, orientation)?;
        }
        Ok(params.len())
    }
}

/// A sweep tool shared between threads of one host.
///
/// Each activation holds the tool's own lock for its whole run, so runs of the
/// same tool never interleave. Different tools never share a lock.
#[derive(Clone)]
pub struct SharedTool(Arc<Mutex<SweepTool>>);

impl SharedTool {
    /// Wrap `tool` for shared use.
    pub fn new(tool: SweepTool) -> Self {
        Self(Arc::new(Mutex::new(tool)))
    }

    /// [`SweepTool::activate`] under the tool's lock.
    pub fn activate<W, S>(
        &self,
        position: BlockPos,
        world: &mut W,
        session: &mut S,
    ) -> Result<Activation>
    where
        W: World + ?Sized,
        S: Session + ?Sized,
    {
        self.lock().activate(position, world, session)
    }

    /// [`SweepTool::reset`] under the tool's lock.
    pub fn reset(&self) -> bool {
        self.lock().reset()
    }

    /// Run `f` with read access to the tool.
    pub fn with<R>(&self, f: impl FnOnce(&SweepTool) -> R) -> R {
        f(&self.lock())
    }

    /// Lock the tool. A panic in another holder leaves the state usable, so
    /// poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, SweepTool> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
