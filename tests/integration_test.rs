//! End-to-end tests driving a tracking session frame by frame

mod test_helpers;

use exercise_tracking::analyzer::ExerciseType;
use exercise_tracking::config::{AngleThresholds, TrackingConfig};
use exercise_tracking::keypoints::KeypointName;
use exercise_tracking::session::{ExercisePlan, TrackingSession};
use test_helpers::{flexion_pose, pose_without};

fn scenario_config() -> TrackingConfig {
    let mut config = TrackingConfig::default();
    config.thresholds.shoulder_flexion = AngleThresholds { up: 60.0, down: 30.0 };
    config
}

fn scenario_plan(sets: u32, reps_per_set: u32) -> ExercisePlan {
    ExercisePlan {
        exercise_type: ExerciseType::ShoulderFlexion,
        sets,
        reps_per_set,
        duration_seconds: None,
    }
}

fn session(sets: u32, reps_per_set: u32) -> TrackingSession {
    TrackingSession::new(scenario_plan(sets, reps_per_set), scenario_config()).unwrap()
}

#[test]
fn test_one_rep_per_full_cycle() {
    let mut session = session(3, 12);
    let mut now = 0u64;

    // Alternating raise/lower cycles; each full cycle is exactly one rep
    let mut process = |session: &mut TrackingSession, angle: f32| {
        now += 100;
        session.process_frame(&flexion_pose(angle), now)
    };

    let out = process(&mut session, 10.0);
    assert_eq!(out.repetition_count, 0);

    for cycle in 1..=3u32 {
        process(&mut session, 70.0);
        let out = process(&mut session, 20.0);
        assert_eq!(out.repetition_count, cycle);
    }
}

#[test]
fn test_set_boundary_continues_toward_next_set() {
    let mut session = session(3, 12);
    let mut now = 0u64;

    for rep in 1..=12u32 {
        now += 100;
        session.process_frame(&flexion_pose(70.0), now);
        now += 100;
        let out = session.process_frame(&flexion_pose(20.0), now);
        assert_eq!(out.repetition_count, rep);
    }

    let out = session.process_frame(&flexion_pose(20.0), now + 100);
    assert!(
        out.feedback_messages.iter().any(|m| m.contains("Set 1 complete")),
        "messages: {:?}",
        out.feedback_messages
    );
    assert!(
        !out.feedback_messages.iter().any(|m| m.contains("All sets")),
        "finishing one set must not end the exercise"
    );
    // 12 of 36 reps
    assert!((out.exercise_progress - 100.0 / 3.0).abs() < 0.1);

    // The next cycle counts toward set 2
    now += 100;
    session.process_frame(&flexion_pose(70.0), now);
    now += 100;
    let out = session.process_frame(&flexion_pose(20.0), now);
    assert_eq!(out.repetition_count, 13);
}

#[test]
fn test_milestone_message_every_fifth_rep() {
    let mut session = session(3, 12);
    let mut now = 0u64;

    for _ in 0..5 {
        now += 100;
        session.process_frame(&flexion_pose(70.0), now);
        now += 100;
        session.process_frame(&flexion_pose(20.0), now);
    }

    let out = session.process_frame(&flexion_pose(20.0), now + 100);
    assert!(
        out.feedback_messages.iter().any(|m| m.contains("Great job")),
        "messages: {:?}",
        out.feedback_messages
    );
}

#[test]
fn test_all_sets_complete_message() {
    let mut session = session(2, 2);
    let mut now = 0u64;

    for _ in 0..4 {
        now += 100;
        session.process_frame(&flexion_pose(70.0), now);
        now += 100;
        session.process_frame(&flexion_pose(20.0), now);
    }

    let out = session.process_frame(&flexion_pose(20.0), now + 100);
    assert!(out.feedback_messages.iter().any(|m| m.contains("All sets complete")));
    assert_eq!(out.exercise_progress, 100.0);
}

#[test]
fn test_missing_keypoints_never_advance_count() {
    let mut session = session(3, 12);

    // Enter a repetition
    session.process_frame(&flexion_pose(70.0), 100);
    let before = session.process_frame(&flexion_pose(70.0), 200).repetition_count;

    // Wrist drops out mid-repetition: no transition may happen
    let blind = pose_without(&flexion_pose(20.0), KeypointName::RightWrist);
    let out = session.process_frame(&blind, 300);
    assert_eq!(out.repetition_count, before);
    assert!(out.posture_feedback.iter().any(|m| m.contains("detect")));

    // Once the wrist is back, the lowered arm completes the rep
    let out = session.process_frame(&flexion_pose(20.0), 400);
    assert_eq!(out.repetition_count, before + 1);
}

#[test]
fn test_message_window_is_bounded() {
    let mut session = session(3, 12);
    let mut now = 0u64;

    for _ in 0..9 {
        now += 100;
        session.process_frame(&flexion_pose(70.0), now);
        now += 100;
        session.process_frame(&flexion_pose(20.0), now);
    }

    let out = session.process_frame(&flexion_pose(20.0), now + 100);
    assert!(out.feedback_messages.len() <= 5);
    // Most recent last: the 9th rep message is at the tail
    assert!(out.feedback_messages.last().unwrap().contains('9'));
}

#[test]
fn test_stop_is_immediately_effective() {
    let mut session = session(3, 12);
    session.process_frame(&flexion_pose(70.0), 100);
    session.stop();

    let out = session.process_frame(&flexion_pose(20.0), 200);
    assert!(out.stopped);
    assert_eq!(out.repetition_count, 0, "no rep may complete after stop");
    assert_eq!(session.summary().completed_reps, 0);
}

#[test]
fn test_reset_round_trip() {
    let mut session = session(3, 12);
    session.process_frame(&flexion_pose(70.0), 100);
    session.process_frame(&flexion_pose(20.0), 200);
    assert_eq!(session.summary().completed_reps, 1);

    session.reset();

    let out = session.process_frame(&flexion_pose(10.0), 300);
    assert_eq!(out.repetition_count, 0);
    assert_eq!(out.exercise_progress, 0.0);
    assert!(out.posture_feedback.is_empty());

    let summary = session.summary();
    assert_eq!(summary.completed_reps, 0);
    assert_eq!(summary.frames_analyzed, 1);
    assert!(summary.issue_counts.is_empty());
    assert!(session.feedback_log().items().is_empty());
}

#[test]
fn test_frame_gap_reads_as_pause() {
    let mut session = session(3, 12);

    session.process_frame(&flexion_pose(70.0), 100);
    session.process_frame(&flexion_pose(70.0), 200);

    // Long gap: the machine holds, nothing auto-completes
    let out = session.process_frame(&flexion_pose(70.0), 10_000);
    assert_eq!(out.repetition_count, 0);
    // Velocity history was cleared across the pause
    assert_eq!(out.movement_velocity, 0.0);
}

#[test]
fn test_duplicate_and_out_of_order_frames_tolerated() {
    let mut session = session(3, 12);

    session.process_frame(&flexion_pose(70.0), 100);
    // Same frame delivered twice
    let out = session.process_frame(&flexion_pose(70.0), 100);
    assert_eq!(out.repetition_count, 0);
    assert_eq!(out.movement_velocity, 0.0);

    // A frame from the past must not panic or fabricate velocity
    let out = session.process_frame(&flexion_pose(70.0), 50);
    assert_eq!(out.movement_velocity, 0.0);

    let out = session.process_frame(&flexion_pose(20.0), 300);
    assert_eq!(out.repetition_count, 1);
}

#[test]
fn test_summary_aggregates_issues() {
    let mut session = session(3, 12);

    let blind = pose_without(&flexion_pose(20.0), KeypointName::RightWrist);
    session.process_frame(&blind, 100);
    session.process_frame(&blind, 200);
    session.process_frame(&flexion_pose(50.0), 300);

    let summary = session.summary();
    assert_eq!(summary.frames_analyzed, 1);
    assert!((summary.average_angle - 50.0).abs() < 1.0);
    assert_eq!(summary.issue_counts.values().sum::<u64>(), 2);
}
