//! Edge case tests for geometry, filters, and the repetition tracker

use exercise_tracking::filters::create_filter;
use exercise_tracking::geometry::{angle_at, velocity, TimedPosition};
use exercise_tracking::repetition::RepetitionTracker;
use nalgebra::Point2;

#[test]
fn test_collinear_points_measure_straight_angle() {
    let a = Point2::new(-3.0, -3.0);
    let b = Point2::new(0.0, 0.0);
    let c = Point2::new(5.0, 5.0);

    let angle = angle_at(a, b, c).unwrap();
    assert!((angle - 180.0).abs() < 1e-3);
}

#[test]
fn test_perpendicular_rays_measure_right_angle() {
    let a = Point2::new(0.0, 1.0);
    let b = Point2::new(0.0, 0.0);
    let c = Point2::new(1.0, 0.0);

    let angle = angle_at(a, b, c).unwrap();
    assert!((angle - 90.0).abs() < 1e-3);
}

#[test]
fn test_angle_symmetry_and_range() {
    let triples = [
        ((1.0, 0.0), (0.0, 0.0), (0.7, 0.7)),
        ((-5.0, 2.0), (3.0, 3.0), (8.0, -1.0)),
        ((100.0, 250.0), (180.0, 300.0), (120.0, 420.0)),
        ((0.1, 0.0), (0.0, 0.0), (-0.1, 0.001)),
    ];

    for ((ax, ay), (bx, by), (cx, cy)) in triples {
        let a = Point2::new(ax, ay);
        let b = Point2::new(bx, by);
        let c = Point2::new(cx, cy);

        let forward = angle_at(a, b, c).unwrap();
        let backward = angle_at(c, b, a).unwrap();

        assert!((forward - backward).abs() < 1e-3);
        assert!((0.0..=180.0).contains(&forward));
    }
}

#[test]
fn test_angle_translation_invariance() {
    let a = Point2::new(2.0, 5.0);
    let b = Point2::new(-1.0, 0.5);
    let c = Point2::new(4.0, -2.0);

    let base = angle_at(a, b, c).unwrap();
    for (dx, dy) in [(1000.0, -500.0), (0.001, 0.001), (-321.5, 77.7)] {
        let shift = nalgebra::Vector2::new(dx, dy);
        let shifted = angle_at(a + shift, b + shift, c + shift).unwrap();
        assert!((base - shifted).abs() < 1e-2);
    }
}

#[test]
fn test_degenerate_geometry_is_an_error_not_nan() {
    let p = Point2::new(7.0, 7.0);
    let q = Point2::new(8.0, 9.0);

    assert!(angle_at(p, p, q).is_err());
    assert!(angle_at(q, p, p).is_err());
    assert!(angle_at(p, p, p).is_err());
}

#[test]
fn test_nearly_parallel_rays_stay_in_domain() {
    // cos would overshoot 1.0 without clamping
    let a = Point2::new(1e6, 1.0);
    let b = Point2::new(0.0, 0.0);
    let c = Point2::new(2e6, 2.0);

    let angle = angle_at(a, b, c).unwrap();
    assert!(angle.is_finite());
    assert!((0.0..=180.0).contains(&angle));
}

#[test]
fn test_velocity_edge_cases() {
    let at = |x: f32, y: f32, t: u64| TimedPosition {
        position: Point2::new(x, y),
        timestamp_ms: t,
    };

    assert_eq!(velocity(&[]), 0.0);
    assert_eq!(velocity(&[at(1.0, 1.0, 100)]), 0.0);
    // Duplicate timestamps
    assert_eq!(velocity(&[at(0.0, 0.0, 100), at(9.0, 0.0, 100)]), 0.0);
    // Out-of-order timestamps clamp to zero elapsed
    assert_eq!(velocity(&[at(0.0, 0.0, 500), at(9.0, 0.0, 100)]), 0.0);
    // Only the two most recent samples matter
    let v = velocity(&[at(0.0, 0.0, 0), at(50.0, 0.0, 1000), at(60.0, 0.0, 2000)]);
    assert!((v - 10.0).abs() < 1e-3);
}

#[test]
fn test_filters_converge_on_constant_input() {
    for spec in ["moving_average:5", "median:5", "exponential:0.3"] {
        let mut filter = create_filter(spec).unwrap();

        let mut last = 0.0;
        for _ in 0..100 {
            last = filter.apply(42.0);
        }
        assert!((last - 42.0).abs() < 1e-6, "{spec} did not converge");
    }
}

#[test]
fn test_filter_reset_forgets_history() {
    for spec in ["moving_average:5", "median:5", "exponential:0.3"] {
        let mut filter = create_filter(spec).unwrap();
        for _ in 0..10 {
            filter.apply(100.0);
        }

        filter.reset();

        // First sample after reset passes through unchanged
        assert_eq!(filter.apply(10.0), 10.0, "{spec} kept history across reset");
    }
}

#[test]
fn test_median_filter_rejects_single_frame_spike() {
    let mut filter = create_filter("median:5").unwrap();
    for _ in 0..5 {
        filter.apply(40.0);
    }
    let out = filter.apply(170.0);
    assert!((out - 40.0).abs() < 1e-6);
}

#[test]
fn test_threshold_boundary_values_do_not_transition() {
    let mut tracker = RepetitionTracker::new(60.0, 30.0, 5, 1).unwrap();

    // Exactly at the up threshold: strictly-above is required
    assert_eq!(tracker.update(60.0, true), None);
    assert!(!tracker.in_repetition());

    tracker.update(61.0, true);
    assert!(tracker.in_repetition());

    // Exactly at the down threshold: strictly-below is required
    assert_eq!(tracker.update(30.0, true), None);
    assert!(tracker.in_repetition());

    assert!(tracker.update(29.9, true).is_some());
    assert_eq!(tracker.completed_count(), 1);
}

#[test]
fn test_count_monotone_across_noisy_signal() {
    let mut tracker = RepetitionTracker::new(60.0, 30.0, 100, 1).unwrap();

    let mut previous = 0;
    // Deterministic noisy sweep across both thresholds
    for i in 0..1000u32 {
        let angle = 45.0 + 40.0 * ((i as f32) * 0.37).sin();
        let form_ok = i % 7 != 0;
        tracker.update(angle, form_ok);

        let count = tracker.completed_count();
        assert!(count >= previous, "count regressed at frame {i}");
        assert!(count - previous <= 1, "count jumped by more than 1 at frame {i}");
        previous = count;
    }
}
