//! Repetition counting state machine.
//!
//! Converts the continuous per-frame angle signal into discrete repetition
//! events. The machine has two states: resting and in-repetition. It enters
//! a repetition when the angle crosses the up threshold with correct form,
//! and completes one when the angle falls back below the down threshold.
//! Values between the thresholds hold the current state, so jitter around
//! either threshold cannot double-count.

use log::debug;
use std::collections::VecDeque;

use crate::constants::{MILESTONE_INTERVAL, POSE_HISTORY_LEN, PROGRESS_MAX};
use crate::keypoints::Pose;
use crate::{Error, Result};

/// Discrete event produced by a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepEvent {
    /// The angle crossed the up threshold with correct form
    RepStarted,
    /// A repetition completed (angle returned below the down threshold)
    RepCompleted { count: u32 },
    /// Every Nth repetition completed
    Milestone { count: u32 },
    /// A full set of repetitions completed
    SetComplete { set: u32 },
    /// The final repetition of the final set completed
    AllSetsComplete,
}

/// Threshold edge-crossing repetition tracker for one exercise session
#[derive(Debug)]
pub struct RepetitionTracker {
    in_repetition: bool,
    current_angle: f32,
    up_threshold: f32,
    down_threshold: f32,
    completed_count: u32,
    reps_per_set: u32,
    sets: u32,
    pose_history: VecDeque<Pose>,
}

impl RepetitionTracker {
    /// Create a tracker for one exercise session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for non-positive thresholds, an up
    /// threshold at or below the down threshold, or zero reps/sets. These
    /// are rejected here so a malformed plan never reaches the per-frame
    /// path.
    pub fn new(up_threshold: f32, down_threshold: f32, reps_per_set: u32, sets: u32) -> Result<Self> {
        if down_threshold <= 0.0 || up_threshold <= 0.0 {
            return Err(Error::InvalidConfig(
                "repetition thresholds must be positive".to_string(),
            ));
        }
        if up_threshold <= down_threshold {
            return Err(Error::InvalidConfig(format!(
                "up threshold ({up_threshold}) must exceed down threshold ({down_threshold})"
            )));
        }
        if reps_per_set == 0 || sets == 0 {
            return Err(Error::InvalidConfig(
                "reps per set and sets must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            in_repetition: false,
            current_angle: 0.0,
            up_threshold,
            down_threshold,
            completed_count: 0,
            reps_per_set,
            sets,
            pose_history: VecDeque::with_capacity(POSE_HISTORY_LEN),
        })
    }

    /// Feed one analyzed frame's angle into the state machine.
    ///
    /// Incorrect form never starts a repetition; a repetition already in
    /// flight completes on the down crossing regardless of form, since the
    /// movement itself happened.
    pub fn update(&mut self, angle: f32, is_correct_form: bool) -> Option<RepEvent> {
        self.current_angle = angle;

        if !self.in_repetition {
            if angle > self.up_threshold && is_correct_form {
                self.in_repetition = true;
                debug!("repetition started at {angle:.1} degrees");
                return Some(RepEvent::RepStarted);
            }
            return None;
        }

        if angle < self.down_threshold {
            self.in_repetition = false;
            self.completed_count += 1;
            let count = self.completed_count;
            debug!("repetition {count} completed");
            return Some(self.completion_event(count));
        }

        None
    }

    fn completion_event(&self, count: u32) -> RepEvent {
        if count == self.reps_per_set * self.sets {
            RepEvent::AllSetsComplete
        } else if count % self.reps_per_set == 0 {
            RepEvent::SetComplete {
                set: count / self.reps_per_set,
            }
        } else if count % MILESTONE_INTERVAL == 0 {
            RepEvent::Milestone { count }
        } else {
            RepEvent::RepCompleted { count }
        }
    }

    /// Record the frame's pose, evicting the oldest past the history cap
    pub fn record_pose(&mut self, pose: Pose) {
        if self.pose_history.len() >= POSE_HISTORY_LEN {
            self.pose_history.pop_front();
        }
        self.pose_history.push_back(pose);
    }

    /// Progress through the whole plan as a percentage in [0, 100]
    #[must_use]
    pub fn progress(&self) -> f32 {
        let target = (self.reps_per_set * self.sets) as f32;
        (self.completed_count as f32 / target * 100.0).min(PROGRESS_MAX)
    }

    /// Completed repetitions so far, monotone within a session
    #[must_use]
    pub fn completed_count(&self) -> u32 {
        self.completed_count
    }

    /// True while the angle is above the up threshold and has not yet
    /// returned below the down threshold
    #[must_use]
    pub fn in_repetition(&self) -> bool {
        self.in_repetition
    }

    /// Most recent angle fed to the tracker
    #[must_use]
    pub fn current_angle(&self) -> f32 {
        self.current_angle
    }

    /// Retained poses, oldest first
    #[must_use]
    pub fn pose_history(&self) -> &VecDeque<Pose> {
        &self.pose_history
    }

    /// Return to the exact initial state
    pub fn reset(&mut self) {
        self.in_repetition = false;
        self.current_angle = 0.0;
        self.completed_count = 0;
        self.pose_history.clear();
    }
}
