//! Exercise tracking session: the per-frame entry point.
//!
//! The host delivers one [`Pose`] per frame tick together with its
//! timestamp; everything here runs synchronously inside that call. The
//! session wires the pipeline together: confidence filtering, form
//! analysis, angle smoothing, repetition tracking, and throttled feedback.
//! The host's scheduling loop must serialize calls; the session itself
//! holds no locks and spawns nothing.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

use crate::analyzer::{self, ExerciseType, FormResult};
use crate::config::TrackingConfig;
use crate::constants::MESSAGE_WINDOW;
use crate::feedback::{FeedbackKind, FeedbackLog, FeedbackThrottler};
use crate::filters::{create_filter, AngleFilter};
use crate::geometry::{velocity, TimedPosition};
use crate::keypoints::{KeypointName, Pose};
use crate::repetition::{RepEvent, RepetitionTracker};
use crate::{Error, Result};

/// Read-only exercise prescription for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExercisePlan {
    /// Which exercise to track
    pub exercise_type: ExerciseType,
    /// Number of sets
    pub sets: u32,
    /// Repetitions per set
    pub reps_per_set: u32,
    /// Optional time box for the whole session
    pub duration_seconds: Option<u32>,
}

/// Everything the UI needs after one processed frame
#[derive(Debug, Clone, Default)]
pub struct FrameOutput {
    /// Completed repetitions so far
    pub repetition_count: u32,
    /// Progress through the whole plan, percent in [0, 100]
    pub exercise_progress: f32,
    /// Recent messages, most recent last, bounded window
    pub feedback_messages: Vec<String>,
    /// Current form corrections; empty whenever form is correct
    pub posture_feedback: Vec<String>,
    /// Speed of the tracked wrist, pixels per second
    pub movement_velocity: f32,
    /// True once [`TrackingSession::stop`] was called
    pub stopped: bool,
}

/// Per-session aggregation handed to the progress/analytics collaborator.
/// The session computes it on demand and persists nothing.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    /// Exercise that was tracked
    pub exercise_type: ExerciseType,
    /// Final repetition count
    pub completed_reps: u32,
    /// Mean primary angle over all measured frames
    pub average_angle: f32,
    /// Last measured primary angle
    pub latest_angle: f32,
    /// Number of frames that produced a usable measurement
    pub frames_analyzed: u64,
    /// How often each correction was raised
    pub issue_counts: HashMap<String, u64>,
}

/// One continuous camera-on tracking period for one exercise
#[derive(Debug)]
pub struct TrackingSession {
    plan: ExercisePlan,
    config: TrackingConfig,
    tracker: RepetitionTracker,
    throttler: FeedbackThrottler,
    feedback_log: FeedbackLog,
    angle_filter: Box<dyn AngleFilter>,

    messages: VecDeque<String>,
    posture_feedback: Vec<String>,
    wrist_track: Vec<TimedPosition>,
    last_frame_ms: Option<u64>,
    stopped: bool,

    angle_sum: f64,
    frames_analyzed: u64,
    latest_angle: f32,
    issue_counts: HashMap<String, u64>,
}

impl TrackingSession {
    /// Create a session for a validated plan and configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] or [`Error::ConfigError`] when the
    /// plan or tunables are malformed. All validation happens here; the
    /// per-frame path never re-checks configuration.
    pub fn new(plan: ExercisePlan, config: TrackingConfig) -> Result<Self> {
        if plan.sets == 0 || plan.reps_per_set == 0 {
            return Err(Error::InvalidConfig(
                "exercise plan needs at least 1 set and 1 repetition per set".to_string(),
            ));
        }
        config.validate()?;

        let thresholds = config.thresholds.thresholds_for(plan.exercise_type);
        let tracker = RepetitionTracker::new(thresholds.up, thresholds.down, plan.reps_per_set, plan.sets)?;
        let throttler = FeedbackThrottler::new(
            config.feedback.correction_cooldown_ms,
            config.feedback.positive_cooldown_ms,
        );
        let angle_filter = create_filter(&config.filter.angle_filter)?;

        info!(
            "tracking session started: {} ({} sets x {} reps)",
            plan.exercise_type, plan.sets, plan.reps_per_set
        );

        Ok(Self {
            plan,
            config,
            tracker,
            throttler,
            feedback_log: FeedbackLog::new(),
            angle_filter,
            messages: VecDeque::with_capacity(MESSAGE_WINDOW),
            posture_feedback: Vec::new(),
            wrist_track: Vec::new(),
            last_frame_ms: None,
            stopped: false,
            angle_sum: 0.0,
            frames_analyzed: 0,
            latest_angle: 0.0,
            issue_counts: HashMap::new(),
        })
    }

    /// Process one frame of keypoints.
    ///
    /// Synchronous and non-blocking; a stopped session no-ops and returns
    /// the last outputs unchanged. A frame that cannot be measured leaves
    /// the repetition state untouched.
    pub fn process_frame(&mut self, pose: &Pose, timestamp_ms: u64) -> FrameOutput {
        if self.stopped {
            return self.output();
        }

        if let Some(last) = self.last_frame_ms {
            let gap = timestamp_ms.saturating_sub(last);
            if gap > self.config.session.stale_timeout_ms {
                debug!("frame gap of {gap} ms, treating as pause");
                self.wrist_track.clear();
                self.angle_filter.reset();
            }
            self.last_frame_ms = Some(last.max(timestamp_ms));
        } else {
            self.last_frame_ms = Some(timestamp_ms);
        }

        let exercise = self.plan.exercise_type;
        let confidence = self.config.detection.confidence_for(exercise);
        let result = analyzer::analyze(pose, exercise, confidence);

        for issue in &result.issues {
            *self.issue_counts.entry(issue.clone()).or_insert(0) += 1;
        }

        if result.is_detection_failure() {
            self.surface_corrections(&result, timestamp_ms, FeedbackKind::Warning, "Adjust your position");
            return self.output();
        }

        self.latest_angle = result.angle;
        self.angle_sum += f64::from(result.angle);
        self.frames_analyzed += 1;

        self.tracker.record_pose(pose.clone());
        self.track_wrist(pose, confidence, timestamp_ms);

        let smoothed = self.angle_filter.apply(f64::from(result.angle)) as f32;

        let correction_emitted = if result.is_correct_form {
            // Clearing is immediate and never throttled
            self.posture_feedback.clear();
            false
        } else {
            self.surface_corrections(&result, timestamp_ms, FeedbackKind::Error, "Check your form")
        };

        if let Some(event) = self.tracker.update(smoothed, result.is_correct_form) {
            self.handle_event(event, timestamp_ms, correction_emitted);
        }

        self.output()
    }

    /// Stop the session. Takes effect immediately: frames arriving after
    /// this call mutate nothing.
    pub fn stop(&mut self) {
        if !self.stopped {
            info!(
                "tracking session stopped at {} completed reps",
                self.tracker.completed_count()
            );
        }
        self.stopped = true;
    }

    /// True once the session was stopped
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Fully reinitialize for a fresh run of the same plan. Partial resets
    /// are a correctness hazard; everything observable returns to its
    /// initial value.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.throttler.reset();
        self.feedback_log.clear();
        self.angle_filter.reset();
        self.messages.clear();
        self.posture_feedback.clear();
        self.wrist_track.clear();
        self.last_frame_ms = None;
        self.stopped = false;
        self.angle_sum = 0.0;
        self.frames_analyzed = 0;
        self.latest_angle = 0.0;
        self.issue_counts.clear();
        info!("tracking session reset");
    }

    /// Aggregated results for the analytics collaborator
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        let average_angle = if self.frames_analyzed == 0 {
            0.0
        } else {
            (self.angle_sum / self.frames_analyzed as f64) as f32
        };

        SessionSummary {
            exercise_type: self.plan.exercise_type,
            completed_reps: self.tracker.completed_count(),
            average_angle,
            latest_angle: self.latest_angle,
            frames_analyzed: self.frames_analyzed,
            issue_counts: self.issue_counts.clone(),
        }
    }

    /// The plan this session is tracking
    #[must_use]
    pub fn plan(&self) -> &ExercisePlan {
        &self.plan
    }

    /// Structured feedback log, newest first
    #[must_use]
    pub fn feedback_log(&self) -> &FeedbackLog {
        &self.feedback_log
    }

    /// Surface correction messages through the throttled negative channel.
    /// Returns true when a new correction actually went out this frame.
    fn surface_corrections(
        &mut self,
        result: &FormResult,
        timestamp_ms: u64,
        kind: FeedbackKind,
        title: &str,
    ) -> bool {
        if !self.throttler.correction_due(timestamp_ms) {
            // Whatever is currently displayed stays; only new messages are gated
            return false;
        }

        self.throttler.mark_correction(timestamp_ms);
        self.posture_feedback = result.issues.clone();
        self.feedback_log
            .push(kind, title, &result.issues.join(" "), timestamp_ms);
        true
    }

    fn handle_event(&mut self, event: RepEvent, timestamp_ms: u64, correction_emitted: bool) {
        match event {
            RepEvent::RepStarted => {
                // Corrections win the frame; praise also respects its own cooldown
                if !correction_emitted && self.throttler.positive_due(timestamp_ms) {
                    self.throttler.mark_positive(timestamp_ms);
                    self.push_message("Good form! Keep going.");
                    self.feedback_log
                        .push(FeedbackKind::Success, "Good form", "Keep going.", timestamp_ms);
                }
            }
            RepEvent::RepCompleted { count } => {
                self.push_message(&format!("Repetition {count} completed."));
            }
            RepEvent::Milestone { count } => {
                self.push_message(&format!("Great job! {count} repetitions completed. Keep it up!"));
                self.feedback_log.push(
                    FeedbackKind::Success,
                    "Milestone",
                    &format!("{count} repetitions completed."),
                    timestamp_ms,
                );
            }
            RepEvent::SetComplete { set } => {
                self.push_message(&format!("Set {set} complete. Take a short rest."));
                self.feedback_log.push(
                    FeedbackKind::Success,
                    "Set complete",
                    &format!("Set {set} of {} done.", self.plan.sets),
                    timestamp_ms,
                );
            }
            RepEvent::AllSetsComplete => {
                self.push_message("All sets complete. Fantastic work today!");
                self.feedback_log.push(
                    FeedbackKind::Success,
                    "Exercise complete",
                    "All sets finished.",
                    timestamp_ms,
                );
                info!("exercise plan completed: {}", self.plan.exercise_type);
            }
        }
    }

    fn push_message(&mut self, message: &str) {
        if self.messages.len() >= MESSAGE_WINDOW {
            self.messages.pop_front();
        }
        self.messages.push_back(message.to_string());
    }

    fn track_wrist(&mut self, pose: &Pose, confidence_threshold: f32, timestamp_ms: u64) {
        let Some(wrist) = pose
            .get(KeypointName::RightWrist)
            .filter(|kp| kp.confidence >= confidence_threshold)
        else {
            return;
        };

        if self.wrist_track.len() >= self.config.session.pose_history_len {
            self.wrist_track.remove(0);
        }
        self.wrist_track.push(TimedPosition {
            position: wrist.position,
            timestamp_ms,
        });
    }

    fn output(&self) -> FrameOutput {
        FrameOutput {
            repetition_count: self.tracker.completed_count(),
            exercise_progress: self.tracker.progress(),
            feedback_messages: self.messages.iter().cloned().collect(),
            posture_feedback: self.posture_feedback.clone(),
            movement_velocity: velocity(&self.wrist_track),
            stopped: self.stopped,
        }
    }
}
