//! Exercise form analysis.
//!
//! One rule set per supported exercise type maps joint angles and landmark
//! distances to pass/fail checks with actionable correction messages. Every
//! check is evaluated independently so the patient sees all corrections at
//! once, not just the first failing one.
//!
//! Rules track the right-side landmarks; the camera mirror makes that the
//! patient's working arm in the original clinic setup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::CANNOT_DETECT_MESSAGE;
use crate::geometry::angle_at;
use crate::keypoints::{KeypointName, Pose, VisiblePoints};
use crate::{Error, Result};

/// Supported exercise types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    /// Raise a straight arm forward and up
    ShoulderFlexion,
    /// Rotate the forearm outward with the elbow pinned at the side
    ShoulderExternalRotation,
    /// Draw the shoulder blades together, arms relaxed
    ScapularRetraction,
    /// Lean forward and swing a relaxed arm in small circles
    Pendulum,
}

impl ExerciseType {
    /// All supported exercise types
    pub const ALL: [Self; 4] = [
        Self::ShoulderFlexion,
        Self::ShoulderExternalRotation,
        Self::ScapularRetraction,
        Self::Pendulum,
    ];

    /// Stable name used in configuration and storage records
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShoulderFlexion => "shoulder_flexion",
            Self::ShoulderExternalRotation => "shoulder_external_rotation",
            Self::ScapularRetraction => "scapular_retraction",
            Self::Pendulum => "pendulum",
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "shoulder_flexion" => Ok(Self::ShoulderFlexion),
            "shoulder_external_rotation" => Ok(Self::ShoulderExternalRotation),
            "scapular_retraction" => Ok(Self::ScapularRetraction),
            "pendulum" => Ok(Self::Pendulum),
            other => Err(Error::UnknownExerciseType(other.to_string())),
        }
    }
}

/// The primary measured joint angle of an exercise: the point triple is
/// proximal, vertex, distal, so the angle is the flexion/extension angle at
/// the vertex joint.
#[derive(Debug, Clone, Copy)]
pub struct JointAngleSpec {
    /// Human-readable joint name
    pub name: &'static str,
    /// Proximal, vertex, distal landmarks
    pub points: [KeypointName; 3],
    /// Range seen in healthy execution, in degrees
    pub normal_range: (f32, f32),
}

/// Primary angle specification for an exercise type
#[must_use]
pub fn angle_spec(exercise: ExerciseType) -> JointAngleSpec {
    match exercise {
        ExerciseType::ShoulderFlexion => JointAngleSpec {
            name: "shoulder_flexion",
            points: [
                KeypointName::RightHip,
                KeypointName::RightShoulder,
                KeypointName::RightWrist,
            ],
            normal_range: (0.0, 180.0),
        },
        ExerciseType::ShoulderExternalRotation => JointAngleSpec {
            name: "elbow_rotation",
            points: [
                KeypointName::RightWrist,
                KeypointName::RightElbow,
                KeypointName::RightHip,
            ],
            normal_range: (0.0, 120.0),
        },
        ExerciseType::ScapularRetraction => JointAngleSpec {
            name: "shoulder_retraction",
            points: [
                KeypointName::RightElbow,
                KeypointName::RightShoulder,
                KeypointName::LeftShoulder,
            ],
            normal_range: (40.0, 150.0),
        },
        ExerciseType::Pendulum => JointAngleSpec {
            name: "pendulum_swing",
            points: [
                KeypointName::RightHip,
                KeypointName::RightShoulder,
                KeypointName::RightWrist,
            ],
            normal_range: (0.0, 60.0),
        },
    }
}

/// Outcome of analyzing one frame, never mutated after creation
#[derive(Debug, Clone)]
pub struct FormResult {
    /// True when every check for the exercise passed
    pub is_correct_form: bool,
    /// Primary measured joint angle in degrees, 0 when undetectable
    pub angle: f32,
    /// One correction message per failed check
    pub issues: Vec<String>,
}

impl FormResult {
    /// Terminal result for a frame where the required landmarks could not be
    /// measured
    #[must_use]
    pub fn cannot_detect() -> Self {
        Self {
            is_correct_form: false,
            angle: 0.0,
            issues: vec![CANNOT_DETECT_MESSAGE.to_string()],
        }
    }

    /// True when this frame produced no usable measurement at all
    #[must_use]
    pub fn is_detection_failure(&self) -> bool {
        !self.is_correct_form && self.issues.iter().any(|i| i == CANNOT_DETECT_MESSAGE)
    }
}

/// Analyze one frame of an exercise.
///
/// Missing required landmarks or degenerate geometry produce the terminal
/// "cannot detect" result for the frame; they never escape as errors, so a
/// bad frame can never crash the per-frame pipeline.
#[must_use]
pub fn analyze(pose: &Pose, exercise: ExerciseType, confidence_threshold: f32) -> FormResult {
    let points = pose.visible_points(confidence_threshold);

    let outcome = match exercise {
        ExerciseType::ShoulderFlexion => analyze_shoulder_flexion(&points),
        ExerciseType::ShoulderExternalRotation => analyze_external_rotation(&points),
        ExerciseType::ScapularRetraction => analyze_scapular_retraction(&points),
        ExerciseType::Pendulum => analyze_pendulum(&points),
    };

    outcome.unwrap_or_else(|_| FormResult::cannot_detect())
}

/// Max shoulder height difference before the lift reads as a shrug, px
const SHOULDER_LEVEL_TOLERANCE_PX: f32 = 30.0;

/// Elbow angle above which the arm counts as straight, degrees
const STRAIGHT_ARM_MIN_DEG: f32 = 160.0;

/// Accepted elbow bend for external rotation, degrees
const ROTATION_ELBOW_RANGE_DEG: (f32, f32) = (70.0, 110.0);

/// Max horizontal elbow drift from the hip during external rotation, px
const ELBOW_AT_SIDE_TOLERANCE_PX: f32 = 40.0;

/// Shoulder level tolerance while squeezing the blades, px
const RETRACTION_LEVEL_TOLERANCE_PX: f32 = 25.0;

/// Arm angle above which a pendulum arm counts as hanging loose, degrees
const LOOSE_ARM_MIN_DEG: f32 = 150.0;

/// Max horizontal shoulder-over-hip drift during pendulum, px
const TRUNK_STILL_TOLERANCE_PX: f32 = 50.0;

fn analyze_shoulder_flexion(points: &VisiblePoints) -> Result<FormResult> {
    let hip = points.require(KeypointName::RightHip)?;
    let shoulder = points.require(KeypointName::RightShoulder)?;
    let elbow = points.require(KeypointName::RightElbow)?;
    let wrist = points.require(KeypointName::RightWrist)?;
    let left_shoulder = points.require(KeypointName::LeftShoulder)?;

    let flexion = angle_at(hip, shoulder, wrist)?;
    let elbow_angle = angle_at(shoulder, elbow, wrist)?;

    let mut issues = Vec::new();
    if elbow_angle < STRAIGHT_ARM_MIN_DEG {
        issues.push("Keep your arm straight while raising it.".to_string());
    }
    if (left_shoulder.y - shoulder.y).abs() > SHOULDER_LEVEL_TOLERANCE_PX {
        issues.push("Keep your shoulders level. Avoid shrugging as you lift.".to_string());
    }

    Ok(FormResult {
        is_correct_form: issues.is_empty(),
        angle: flexion,
        issues,
    })
}

fn analyze_external_rotation(points: &VisiblePoints) -> Result<FormResult> {
    let shoulder = points.require(KeypointName::RightShoulder)?;
    let elbow = points.require(KeypointName::RightElbow)?;
    let wrist = points.require(KeypointName::RightWrist)?;
    let hip = points.require(KeypointName::RightHip)?;

    let rotation = angle_at(wrist, elbow, hip)?;
    let elbow_angle = angle_at(shoulder, elbow, wrist)?;

    let mut issues = Vec::new();
    let (bend_min, bend_max) = ROTATION_ELBOW_RANGE_DEG;
    if elbow_angle < bend_min || elbow_angle > bend_max {
        issues.push("Keep your elbow bent at roughly 90 degrees.".to_string());
    }
    if (elbow.x - hip.x).abs() > ELBOW_AT_SIDE_TOLERANCE_PX {
        issues.push("Keep your elbow tucked against your side.".to_string());
    }

    Ok(FormResult {
        is_correct_form: issues.is_empty(),
        angle: rotation,
        issues,
    })
}

fn analyze_scapular_retraction(points: &VisiblePoints) -> Result<FormResult> {
    let right_shoulder = points.require(KeypointName::RightShoulder)?;
    let left_shoulder = points.require(KeypointName::LeftShoulder)?;
    let right_elbow = points.require(KeypointName::RightElbow)?;
    let right_wrist = points.require(KeypointName::RightWrist)?;

    let retraction = angle_at(right_elbow, right_shoulder, left_shoulder)?;

    let mut issues = Vec::new();
    if (left_shoulder.y - right_shoulder.y).abs() > RETRACTION_LEVEL_TOLERANCE_PX {
        issues.push("Keep your shoulders level while squeezing.".to_string());
    }
    // Image y grows downward: a wrist above the shoulder means a raised arm
    if right_wrist.y < right_shoulder.y {
        issues.push("Relax your arms down by your sides.".to_string());
    }

    Ok(FormResult {
        is_correct_form: issues.is_empty(),
        angle: retraction,
        issues,
    })
}

fn analyze_pendulum(points: &VisiblePoints) -> Result<FormResult> {
    let hip = points.require(KeypointName::RightHip)?;
    let shoulder = points.require(KeypointName::RightShoulder)?;
    let elbow = points.require(KeypointName::RightElbow)?;
    let wrist = points.require(KeypointName::RightWrist)?;

    let swing = angle_at(hip, shoulder, wrist)?;
    let elbow_angle = angle_at(shoulder, elbow, wrist)?;

    let mut issues = Vec::new();
    if elbow_angle < LOOSE_ARM_MIN_DEG {
        issues.push("Let your arm hang loose and straight.".to_string());
    }
    if (shoulder.x - hip.x).abs() > TRUNK_STILL_TOLERANCE_PX {
        issues.push("Hinge at the hips and keep your back still.".to_string());
    }

    Ok(FormResult {
        is_correct_form: issues.is_empty(),
        angle: swing,
        issues,
    })
}
