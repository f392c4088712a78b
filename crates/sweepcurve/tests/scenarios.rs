//! End-to-end sweeps: anchors in, stamps out.
#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::IVec3;
    use sweepcurve::{
        Activation, Error, Extent, FittedCurve, Notice, NullWorld, Orientation, StampPolicy,
        Structure, SweepTool, World, anchors::AnchorSequence, error, session::MemorySession,
        tool_from_names, world::RecordingWorld,
    };

    /// A session holding a structure named "stamp".
    fn session(extent: Extent) -> MemorySession {
        MemorySession::with_structure(Structure::new("stamp", extent))
    }

    /// Activate every anchor once, then the last one again to confirm.
    fn sweep<W: World>(
        tool: &mut SweepTool,
        anchors: &[[i32; 3]],
        world: &mut W,
        session: &mut MemorySession,
    ) -> error::Result<Activation> {
        let mut last = Activation::Ignored;
        for anchor in anchors.iter().chain(anchors.last()) {
            last = tool.activate(IVec3::from_array(*anchor), world, session)?;
        }
        Ok(last)
    }

    macro_rules! sweep_scenarios {
        ($(($name:ident, $anchors:expr, $policy:expr, $extent:expr, $yaw:expr, $expected:expr)),* $(,)?) => {
            $(
                paste::paste! {
                    #[test]
                    fn [<$name _places_stamps>]() -> error::Result<()> {
                        let mut tool = SweepTool::new($policy)?;
                        let mut world = RecordingWorld::new();
                        let mut session = session($extent);
                        let expected: &[[i32; 3]] = &$expected;

                        let outcome = sweep(&mut tool, &$anchors, &mut world, &mut session)?;
                        assert_eq!(outcome, Activation::Stamped { stamps: expected.len() });

                        let positions: Vec<[i32; 3]> = world
                            .placements()
                            .iter()
                            .map(|p| p.position.to_array())
                            .collect();
                        assert_eq!(positions, expected);
                        for placement in world.placements() {
                            assert_eq!(placement.orientation, Orientation::from_degrees($yaw));
                            assert_eq!(placement.structure, "stamp");
                        }
                        assert!(tool.anchors().is_empty());
                        Ok(())
                    }

                    #[test]
                    fn [<$name _null_world>]() -> error::Result<()> {
                        let mut tool = SweepTool::new($policy)?;
                        let mut session = session($extent);
                        let expected: &[[i32; 3]] = &$expected;

                        let outcome = sweep(&mut tool, &$anchors, &mut NullWorld, &mut session)?;
                        assert_eq!(outcome, Activation::Stamped { stamps: expected.len() });
                        assert_eq!(
                            session.last_notice(),
                            Some(&Notice::RunComplete { stamps: expected.len() })
                        );
                        Ok(())
                    }
                }
            )*
        };
    }

    sweep_scenarios! {
        (three_on_x, [[0, 0, 0], [10, 0, 0], [20, 0, 0]], StampPolicy::FixedCount(3),
            Extent::new(1, 1, 1), 0.0, [[0, 0, 0], [10, 0, 0], [20, 0, 0]]),
        (single_on_x, [[0, 0, 0], [10, 0, 0], [20, 0, 0]], StampPolicy::Single,
            Extent::new(1, 1, 1), 0.0, [[0, 0, 0]]),
        (single_at_start, [[5, 1, 5], [9, 1, -3]], StampPolicy::Single,
            Extent::new(2, 2, 2), 0.0, [[5, 1, 5]]),
        (fixed_two_hits_ends, [[0, 0, 0], [3, 4, 0], [8, 0, 2]], StampPolicy::FixedCount(2),
            Extent::new(1, 3, 4), 0.0, [[0, 0, 0], [8, 0, 2]]),
        (fixed_five_on_two_anchors, [[0, 0, 0], [8, 0, 0]], StampPolicy::FixedCount(5),
            Extent::new(6, 2, 1), 90.0, [[0, 0, 0], [2, 0, 0], [4, 0, 0], [6, 0, 0], [8, 0, 0]]),
        (wide_structure_turns, [[0, 0, 0], [0, 0, 12]], StampPolicy::Single,
            Extent::new(5, 1, 3), 90.0, [[0, 0, 0]]),
    }

    #[test]
    fn confirm_with_one_anchor_is_insufficient() {
        let mut tool = SweepTool::new(StampPolicy::FixedCount(3)).expect("valid policy");
        let mut world = RecordingWorld::new();
        let mut session = session(Extent::new(1, 1, 1));
        let at = IVec3::new(4, 4, 4);

        assert_eq!(
            tool.activate(at, &mut world, &mut session),
            Ok(Activation::AnchorAdded { count: 1 })
        );
        let err = tool.activate(at, &mut world, &mut session);
        assert_eq!(err, Err(Error::InsufficientAnchors { count: 1 }));
        assert_eq!(tool.anchors(), &[at]);
        assert!(world.placements().is_empty());
        assert_eq!(
            session.last_notice(),
            Some(&Notice::Error(Error::InsufficientAnchors { count: 1 }))
        );
    }

    #[test]
    fn missing_structure_writes_nothing() {
        let mut tool = SweepTool::new(StampPolicy::AutoSpacing).expect("valid policy");
        let mut world = RecordingWorld::new();
        let mut session = MemorySession::empty();

        let outcome = sweep(&mut tool, &[[0, 0, 0], [10, 0, 0]], &mut world, &mut session);
        assert_eq!(outcome, Err(Error::MissingStructure));
        assert!(world.placements().is_empty());
        assert_eq!(tool.anchors().len(), 2);

        // Loading a structure and confirming again completes the run.
        session.set_structure(Some(Structure::new("post", Extent::new(1, 4, 1))));
        let outcome = tool.activate(IVec3::new(10, 0, 0), &mut world, &mut session);
        assert!(matches!(outcome, Ok(Activation::Stamped { .. })));
        assert!(!world.placements().is_empty());
    }

    #[test]
    fn second_confirm_after_run_is_insufficient() -> error::Result<()> {
        let mut tool = SweepTool::new(StampPolicy::FixedCount(2))?;
        let mut world = RecordingWorld::new();
        let mut session = session(Extent::new(1, 1, 1));
        sweep(&mut tool, &[[0, 0, 0], [6, 0, 0]], &mut world, &mut session)?;

        // State was cleared: the first click starts a new sweep...
        let end = IVec3::new(6, 0, 0);
        assert_eq!(
            tool.activate(end, &mut world, &mut session)?,
            Activation::AnchorAdded { count: 1 }
        );
        // ...and confirming it right away has nothing to sweep along.
        assert_eq!(
            tool.activate(end, &mut world, &mut session),
            Err(Error::InsufficientAnchors { count: 1 })
        );
        assert_eq!(world.placements().len(), 2);
        Ok(())
    }

    #[test]
    fn auto_spacing_walks_a_line() -> error::Result<()> {
        let mut tool = SweepTool::new(StampPolicy::AutoSpacing)?;
        let mut world = RecordingWorld::new();
        let mut session = session(Extent::new(1, 1, 1));
        sweep(&mut tool, &[[0, 0, 0], [10, 0, 0], [20, 0, 0]], &mut world, &mut session)?;

        let xs: Vec<i32> = world.placements().iter().map(|p| p.position.x).collect();
        assert!((19..=23).contains(&xs.len()), "{} stamps", xs.len());
        assert_eq!(xs[0], 0);
        assert!(xs.windows(2).all(|pair| pair[1] >= pair[0]));
        assert!(xs.iter().all(|x| (0..=20).contains(x)));
        assert!(world.placements().iter().all(|p| p.position.y == 0 && p.position.z == 0));
        Ok(())
    }

    #[test]
    fn flat_structure_cannot_be_auto_spaced() {
        let mut tool = SweepTool::new(StampPolicy::AutoSpacing).expect("valid policy");
        let mut world = RecordingWorld::new();
        let mut session = session(Extent::new(0, 3, 0));

        let outcome = sweep(&mut tool, &[[0, 0, 0], [10, 0, 0]], &mut world, &mut session);
        assert!(matches!(outcome, Err(Error::DegenerateCurve(_))));
        assert!(world.placements().is_empty());
        assert_eq!(tool.anchors().len(), 2);
    }

    #[test]
    fn tangent_orientation_follows_turn() -> error::Result<()> {
        let mut tool = tool_from_names(StampPolicy::FixedCount(2), "tangent")?;
        let mut world = RecordingWorld::new();
        let mut session = session(Extent::new(1, 1, 1));
        sweep(&mut tool, &[[0, 0, 0], [10, 0, 0], [10, 0, -10]], &mut world, &mut session)?;

        let yaws: Vec<f64> = world
            .placements()
            .iter()
            .map(|p| p.orientation.yaw_degrees())
            .collect();
        assert_eq!(yaws.len(), 2);
        assert_relative_eq!(yaws[0], 0.0, epsilon = 1e-9);
        assert_relative_eq!(yaws[1], 90.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn unknown_orientation_is_invalid() {
        assert!(matches!(
            tool_from_names(StampPolicy::Single, "spiral"),
            Err(Error::InvalidPolicy(_))
        ));
    }

    #[test]
    fn preview_world_ignores_idle_tool() -> error::Result<()> {
        let mut tool = SweepTool::new(StampPolicy::FixedCount(2))?;
        let mut preview = RecordingWorld::preview();
        let mut session = session(Extent::new(1, 1, 1));

        assert_eq!(
            tool.activate(IVec3::ZERO, &mut preview, &mut session)?,
            Activation::Ignored
        );
        // Once a real activation has placed an anchor, previews behave normally.
        tool.activate(IVec3::ZERO, &mut RecordingWorld::new(), &mut session)?;
        assert_eq!(
            tool.activate(IVec3::new(0, 5, 0), &mut preview, &mut session)?,
            Activation::AnchorAdded { count: 2 }
        );
        Ok(())
    }

    #[test]
    fn arc_length_grows_with_anchors() -> error::Result<()> {
        let points = [[0, 0, 0], [7, 0, 2], [12, 3, 9], [4, 1, 15], [-3, 0, 10]];
        let mut anchors = AnchorSequence::new();
        let mut previous = 0.0;
        for point in points {
            assert!(anchors.push(IVec3::from_array(point)));
            if anchors.len() < 2 {
                continue;
            }
            let length = FittedCurve::from_anchors(&anchors)?.arc_length(0.0, 1.0);
            assert!(length > previous, "{length} <= {previous}");
            previous = length;
        }
        Ok(())
    }
}
