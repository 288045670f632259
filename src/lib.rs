//! Real-time exercise tracking from 2D body keypoints.
//!
//! This library is the analysis core of a physiotherapy coaching tool. An
//! external pose-detection model delivers one set of named, confidence-scored
//! keypoints per camera frame; this crate turns that stream into:
//! - joint angle measurements and per-exercise form verdicts,
//! - discrete repetition counts and progress through a prescribed plan,
//! - rate-limited, human-consumable feedback messages,
//! - recommendation and recovery-estimate heuristics over session history.
//!
//! The per-frame pipeline is synchronous and single-threaded: the host's
//! frame scheduler calls [`session::TrackingSession::process_frame`] once per
//! tick, and every stage (confidence filtering, angle computation, form
//! rules, repetition state machine, feedback throttling) runs inside that
//! call. Camera acquisition, model inference, persistence, and UI all live
//! outside this crate.
//!
//! # Examples
//!
//! ## Tracking a session
//!
//! ```
//! use exercise_tracking::analyzer::ExerciseType;
//! use exercise_tracking::config::TrackingConfig;
//! use exercise_tracking::keypoints::{Keypoint, KeypointName, Pose};
//! use exercise_tracking::session::{ExercisePlan, TrackingSession};
//!
//! # fn main() -> exercise_tracking::Result<()> {
//! let plan = ExercisePlan {
//!     exercise_type: ExerciseType::Pendulum,
//!     sets: 2,
//!     reps_per_set: 10,
//!     duration_seconds: None,
//! };
//! let mut session = TrackingSession::new(plan, TrackingConfig::default())?;
//!
//! // One frame from the pose detector: arm hanging straight down
//! let pose = Pose::new(vec![
//!     Keypoint::new(KeypointName::RightHip, 200.0, 350.0, 0.9),
//!     Keypoint::new(KeypointName::RightShoulder, 200.0, 200.0, 0.9),
//!     Keypoint::new(KeypointName::RightElbow, 200.0, 260.0, 0.9),
//!     Keypoint::new(KeypointName::RightWrist, 200.0, 320.0, 0.9),
//! ]);
//!
//! let output = session.process_frame(&pose, 0);
//! assert_eq!(output.repetition_count, 0);
//! assert!(output.posture_feedback.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Recommending exercises
//!
//! ```
//! use exercise_tracking::analyzer::ExerciseType;
//! use exercise_tracking::recommend::{recommend_exercises, ExerciseInfo, PatientProfile};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let catalog = vec![ExerciseInfo {
//!     name: "Wall slides".to_string(),
//!     exercise_type: ExerciseType::ShoulderFlexion,
//!     target_area: "shoulder".to_string(),
//!     difficulty: 2,
//! }];
//! let profile = PatientProfile {
//!     target_area: "shoulder".to_string(),
//!     preferred_difficulty: 2,
//! };
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let ranked = recommend_exercises(&catalog, &profile, &mut rng, 3);
//! assert_eq!(ranked[0].exercise.name, "Wall slides");
//! ```

/// Body keypoint vocabulary, poses, and confidence filtering
pub mod keypoints;

/// Joint angle and movement geometry
pub mod geometry;

/// Smoothing filters for the measured angle signal
pub mod filters;

/// Per-exercise form analysis rules
pub mod analyzer;

/// Repetition counting state machine
pub mod repetition;

/// Feedback throttling and history
pub mod feedback;

/// Tracking session and per-frame entry point
pub mod session;

/// Recommendation and recovery-progress heuristics
pub mod recommend;

/// Configuration management
pub mod config;

/// Constants used throughout the library
pub mod constants;

/// Error types and result handling
pub mod error;

pub use error::{Error, Result};
