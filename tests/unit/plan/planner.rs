use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

fn two_pose_catalog() -> ReferenceCatalog {
    ReferenceCatalog::new(
        vec![vec![0.0, 1.0], vec![1.0, 0.0]],
        vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]],
        vec![vec![0.0, 0.0], vec![10.0, 0.0]],
    )
    .unwrap()
}

/// `n` poses with centroids spread along a line, `spacing` apart.
fn line_catalog(n: usize, spacing: f64) -> ReferenceCatalog {
    let strokes = (0..n).map(|i| vec![i as f64]).collect();
    let poses = (0..n).map(|i| vec![i as f64, -(i as f64)]).collect();
    let centroids = (0..n).map(|i| vec![i as f64 * spacing, 1.0]).collect();
    ReferenceCatalog::new(strokes, poses, centroids).unwrap()
}

fn settings(additional_frames: u32, step: u32, tail_bounds: TailBounds) -> PlannerSettings {
    PlannerSettings {
        frames_per_transition: 50,
        additional_frames,
        additional_frames_step: step,
        tail_bounds,
    }
}

#[test]
fn density_stays_in_bounds() {
    for d in [0.0, 0.5, 9.99, 10.0, 29.9, 30.0, 55.0, 119.0, 120.0, 1e9, f64::INFINITY] {
        let k = density_for_distance(d);
        assert!((MIN_DENSITY..=MAX_DENSITY).contains(&k), "{d} -> {k}");
    }
    assert_eq!(density_for_distance(10.0), 3);
    assert_eq!(density_for_distance(45.0), 4);
    assert_eq!(density_for_distance(500.0), 12);
}

#[test]
fn frames_per_segment_stays_in_bounds() {
    for k in MIN_DENSITY..=MAX_DENSITY {
        for budget in [1, 20, 50, 100, 1000] {
            let f = frames_per_segment(budget, k);
            assert!(
                (MIN_FRAMES_PER_SEGMENT..=MAX_FRAMES_PER_SEGMENT).contains(&f),
                "{budget}/{k} -> {f}"
            );
        }
    }
    assert_eq!(frames_per_segment(50, 3), 8);
    assert_eq!(frames_per_segment(50, 10), 5);
    assert_eq!(frames_per_segment(50, 12), 4);
}

#[test]
fn first_stroke_emits_only_the_settle_tail() {
    let catalog = two_pose_catalog();
    let planner = PathPlanner::new(settings(2, 1, TailBounds::Reject)).unwrap();
    let mut session = StrokeSession::new();
    let mut rng = StdRng::seed_from_u64(1);

    let path = planner.plan(&catalog, &mut session, 0, &mut rng).unwrap();

    assert!(path.transition.is_none());
    assert_eq!(path.tail, vec![0, 1]);
    assert_eq!(
        path.poses,
        vec![catalog.pose_vectors()[0].clone(), catalog.pose_vectors()[1].clone()]
    );
    assert_eq!(path.anchor, 1);
    assert_eq!(session.history(), &[1]);
}

#[test]
fn short_transition_uses_minimum_density_and_pins_ends() {
    let catalog = two_pose_catalog();
    let planner = PathPlanner::new(settings(1, 1, TailBounds::Reject)).unwrap();
    let mut session = StrokeSession::new();
    session.record(0);
    let mut rng = StdRng::seed_from_u64(7);

    let path = planner.plan(&catalog, &mut session, 1, &mut rng).unwrap();
    let t = path.transition.as_ref().unwrap();

    assert_eq!(t.distance, 10.0);
    assert_eq!(t.density, 3);
    assert_eq!(t.keyframes.len(), 3);
    assert_eq!(t.keyframes[0], 0);
    assert_eq!(t.keyframes[2], 1);
    assert_eq!(t.frames_per_segment, 8);
    // Two segments of eight frames, then a one-frame tail.
    assert_eq!(path.poses.len(), 2 * 8 + 1);
    assert_eq!(path.poses[0], catalog.pose_vectors()[0]);
    assert_eq!(path.poses.last().unwrap(), &catalog.pose_vectors()[1]);
    assert_eq!(session.history(), &[0, 1]);
}

#[test]
fn keyframe_ends_are_pinned_for_any_seed() {
    let catalog = line_catalog(40, 4.0);
    let planner = PathPlanner::new(settings(1, 1, TailBounds::Clamp)).unwrap();
    for seed in 0..32 {
        let mut rng = StdRng::seed_from_u64(seed);
        for (prev, cur) in [(0, 39), (39, 0), (5, 6), (12, 12), (30, 2)] {
            let t = planner.transition(&catalog, prev, cur, &mut rng).unwrap();
            assert_eq!(t.keyframes.first(), Some(&prev));
            assert_eq!(t.keyframes.last(), Some(&cur));
            assert_eq!(t.keyframes.len(), t.density);
            assert!(t.keyframes.iter().all(|&k| k < catalog.len()));
        }
    }
}

#[test]
fn long_transition_gets_more_keyframes() {
    let catalog = line_catalog(40, 4.0);
    let planner = PathPlanner::new(settings(1, 1, TailBounds::Clamp)).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let t = planner.transition(&catalog, 0, 39, &mut rng).unwrap();
    assert_eq!(t.density, 12);
    assert_eq!(t.frames_per_segment, 4);
}

#[test]
fn same_seed_same_plan() {
    let catalog = line_catalog(40, 4.0);
    let planner = PathPlanner::new(settings(3, 2, TailBounds::Clamp)).unwrap();

    let run = |seed| {
        let mut session = StrokeSession::new();
        session.record(3);
        let mut rng = StdRng::seed_from_u64(seed);
        planner.plan(&catalog, &mut session, 33, &mut rng).unwrap()
    };

    assert_eq!(run(11), run(11));
}

#[test]
fn tail_bounds_policies() {
    let catalog = line_catalog(5, 1.0);

    let clamp = PathPlanner::new(settings(4, 2, TailBounds::Clamp)).unwrap();
    assert_eq!(clamp.settle_tail(&catalog, 1).unwrap(), vec![1, 3, 4, 4]);

    let wrap = PathPlanner::new(settings(4, 2, TailBounds::Wrap)).unwrap();
    assert_eq!(wrap.settle_tail(&catalog, 1).unwrap(), vec![1, 3, 0, 2]);

    let reject = PathPlanner::new(settings(4, 2, TailBounds::Reject)).unwrap();
    let err = reject.settle_tail(&catalog, 1).unwrap_err();
    assert!(matches!(err, StrokeposeError::Catalog(_)));
    let msg = reject.settle_tail(&catalog, 0).unwrap_err().to_string();
    assert!(msg.contains("index 6"), "{msg}");
}

#[test]
fn rejected_plan_leaves_session_untouched() {
    let catalog = line_catalog(5, 1.0);
    let planner = PathPlanner::new(settings(4, 2, TailBounds::Reject)).unwrap();
    let mut session = StrokeSession::new();
    session.record(0);
    let mut rng = StdRng::seed_from_u64(0);

    assert!(planner.plan(&catalog, &mut session, 3, &mut rng).is_err());
    assert!(planner.plan(&catalog, &mut session, 99, &mut rng).is_err());
    assert_eq!(session.history(), &[0]);
}

#[test]
fn segments_include_both_keyframe_ends() {
    let catalog = line_catalog(3, 1.0);
    let out = interpolate_segments(&catalog, &[0, 2, 1], 4).unwrap();
    assert_eq!(out.len(), 8);
    assert_eq!(out[0], vec![0.0, 0.0]);
    assert_eq!(out[3], vec![2.0, -2.0]);
    assert_eq!(out[4], vec![2.0, -2.0]);
    assert_eq!(out[7], vec![1.0, -1.0]);
    assert!((out[1][0] - 2.0 / 3.0).abs() < 1e-12);
    assert!(interpolate_segments(&catalog, &[0, 1], 1).is_err());
}

#[test]
fn zero_tail_settings_are_rejected() {
    assert!(PathPlanner::new(settings(0, 1, TailBounds::Clamp)).is_err());
    assert!(PathPlanner::new(settings(1, 0, TailBounds::Clamp)).is_err());
}
