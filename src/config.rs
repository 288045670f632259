//! Configuration management for exercise tracking sessions

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analyzer::ExerciseType;
use crate::constants::{
    DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_CORRECTION_COOLDOWN_MS, DEFAULT_POSITIVE_COOLDOWN_MS,
    DEFAULT_STALE_TIMEOUT_MS, PENDULUM_CONFIDENCE_THRESHOLD, POSE_HISTORY_LEN,
};
use crate::filters::create_filter;
use crate::{Error, Result};

/// Tracking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Keypoint detection configuration
    pub detection: DetectionConfig,

    /// Per-exercise repetition thresholds
    pub thresholds: ThresholdConfig,

    /// Feedback throttling configuration
    pub feedback: FeedbackConfig,

    /// Angle smoothing configuration
    pub filter: FilterConfig,

    /// Session timing configuration
    pub session: SessionConfig,
}

/// Keypoint confidence thresholds, tunable per exercise type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Confidence threshold for shoulder flexion (0.0-1.0)
    pub shoulder_flexion_confidence: f32,

    /// Confidence threshold for external rotation (0.0-1.0)
    pub external_rotation_confidence: f32,

    /// Confidence threshold for scapular retraction (0.0-1.0)
    pub scapular_retraction_confidence: f32,

    /// Confidence threshold for pendulum (0.0-1.0)
    pub pendulum_confidence: f32,
}

impl DetectionConfig {
    /// Confidence threshold for an exercise type
    #[must_use]
    pub fn confidence_for(&self, exercise: ExerciseType) -> f32 {
        match exercise {
            ExerciseType::ShoulderFlexion => self.shoulder_flexion_confidence,
            ExerciseType::ShoulderExternalRotation => self.external_rotation_confidence,
            ExerciseType::ScapularRetraction => self.scapular_retraction_confidence,
            ExerciseType::Pendulum => self.pendulum_confidence,
        }
    }
}

/// Up/down angle thresholds for one exercise, in degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AngleThresholds {
    /// Crossing above this angle starts a repetition
    pub up: f32,

    /// Falling below this angle completes a repetition
    pub down: f32,
}

/// Repetition thresholds per exercise type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Shoulder flexion thresholds
    pub shoulder_flexion: AngleThresholds,

    /// External rotation thresholds
    pub external_rotation: AngleThresholds,

    /// Scapular retraction thresholds
    pub scapular_retraction: AngleThresholds,

    /// Pendulum thresholds
    pub pendulum: AngleThresholds,
}

impl ThresholdConfig {
    /// Thresholds for an exercise type
    #[must_use]
    pub fn thresholds_for(&self, exercise: ExerciseType) -> AngleThresholds {
        match exercise {
            ExerciseType::ShoulderFlexion => self.shoulder_flexion,
            ExerciseType::ShoulderExternalRotation => self.external_rotation,
            ExerciseType::ScapularRetraction => self.scapular_retraction,
            ExerciseType::Pendulum => self.pendulum,
        }
    }
}

/// Feedback throttling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Cooldown between correction messages in milliseconds
    pub correction_cooldown_ms: u64,

    /// Cooldown between positive-reinforcement messages in milliseconds
    pub positive_cooldown_ms: u64,
}

/// Angle smoothing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Angle filter spec, e.g. "none", "moving_average:5", "exponential:0.4"
    pub angle_filter: String,
}

/// Session timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Frame gap above which the session is treated as paused, milliseconds
    pub stale_timeout_ms: u64,

    /// Number of poses retained for velocity calculation
    pub pose_history_len: usize,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            detection: DetectionConfig::default(),
            thresholds: ThresholdConfig::default(),
            feedback: FeedbackConfig::default(),
            filter: FilterConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            shoulder_flexion_confidence: DEFAULT_CONFIDENCE_THRESHOLD,
            external_rotation_confidence: DEFAULT_CONFIDENCE_THRESHOLD,
            scapular_retraction_confidence: DEFAULT_CONFIDENCE_THRESHOLD,
            pendulum_confidence: PENDULUM_CONFIDENCE_THRESHOLD,
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            shoulder_flexion: AngleThresholds { up: 100.0, down: 40.0 },
            external_rotation: AngleThresholds { up: 45.0, down: 15.0 },
            scapular_retraction: AngleThresholds { up: 70.0, down: 45.0 },
            pendulum: AngleThresholds { up: 30.0, down: 10.0 },
        }
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            correction_cooldown_ms: DEFAULT_CORRECTION_COOLDOWN_MS,
            positive_cooldown_ms: DEFAULT_POSITIVE_COOLDOWN_MS,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            angle_filter: "none".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stale_timeout_ms: DEFAULT_STALE_TIMEOUT_MS,
            pose_history_len: POSE_HISTORY_LEN,
        }
    }
}

impl TrackingConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for exercise in ExerciseType::ALL {
            let confidence = self.detection.confidence_for(exercise);
            if !(0.0..=1.0).contains(&confidence) {
                return Err(Error::ConfigError(format!(
                    "Confidence threshold for {exercise} must be between 0.0 and 1.0"
                )));
            }

            let thresholds = self.thresholds.thresholds_for(exercise);
            if thresholds.down <= 0.0 || thresholds.up <= 0.0 {
                return Err(Error::ConfigError(format!(
                    "Angle thresholds for {exercise} must be positive"
                )));
            }
            if thresholds.up <= thresholds.down {
                return Err(Error::ConfigError(format!(
                    "Up threshold for {exercise} must exceed the down threshold"
                )));
            }
        }

        if self.feedback.correction_cooldown_ms == 0 || self.feedback.positive_cooldown_ms == 0 {
            return Err(Error::ConfigError(
                "Feedback cooldowns must be greater than 0".to_string(),
            ));
        }

        if self.session.pose_history_len == 0 {
            return Err(Error::ConfigError(
                "Pose history length must be greater than 0".to_string(),
            ));
        }

        // Surface an unparseable filter spec here rather than at session start
        create_filter(&self.filter.angle_filter)?;

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Exercise Tracking Configuration

# Keypoint confidence thresholds per exercise
detection:
  shoulder_flexion_confidence: 0.5
  external_rotation_confidence: 0.5
  scapular_retraction_confidence: 0.5
  pendulum_confidence: 0.3

# Repetition thresholds (degrees)
thresholds:
  shoulder_flexion:
    up: 100.0
    down: 40.0
  external_rotation:
    up: 45.0
    down: 15.0
  scapular_retraction:
    up: 70.0
    down: 45.0
  pendulum:
    up: 30.0
    down: 10.0

# Feedback throttling
feedback:
  correction_cooldown_ms: 2000
  positive_cooldown_ms: 4000

# Angle smoothing ("none", "moving_average:5", "median:5", "exponential:0.4")
filter:
  angle_filter: "none"

# Session timing
session:
  stale_timeout_ms: 1500
  pose_history_len: 10
"#;
