//! Body keypoint vocabulary and per-frame pose data.
//!
//! Keypoints arrive from an external pose-detection model, one [`Pose`] per
//! frame, in image coordinates (origin top-left, y grows downward). A
//! keypoint below the confidence threshold is treated as absent: the
//! [`Pose::visible_points`] lookup is the only path into the angle and
//! distance calculations, so low-confidence landmarks can never feed a
//! measurement.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{Error, Result};

/// Named body landmarks (COCO 17-point vocabulary)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeypointName {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl KeypointName {
    /// All landmark names, in COCO index order
    pub const ALL: [Self; 17] = [
        Self::Nose,
        Self::LeftEye,
        Self::RightEye,
        Self::LeftEar,
        Self::RightEar,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
    ];

    /// Get landmark name as used by pose-detection models
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "left_eye",
            Self::RightEye => "right_eye",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }
}

/// One detected body landmark in image coordinates
#[derive(Debug, Clone)]
pub struct Keypoint {
    /// Landmark name
    pub name: KeypointName,
    /// Position in pixels
    pub position: Point2<f32>,
    /// Detection confidence in [0, 1]
    pub confidence: f32,
}

impl Keypoint {
    /// Create a new keypoint
    #[must_use]
    pub fn new(name: KeypointName, x: f32, y: f32, confidence: f32) -> Self {
        Self {
            name,
            position: Point2::new(x, y),
            confidence,
        }
    }
}

/// All keypoints detected for one body in one frame
#[derive(Debug, Clone, Default)]
pub struct Pose {
    keypoints: Vec<Keypoint>,
}

impl Pose {
    /// Create a pose from detected keypoints. Insertion order is irrelevant;
    /// if a landmark appears twice the first occurrence wins.
    #[must_use]
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self { keypoints }
    }

    /// Look up a keypoint by name, regardless of confidence
    #[must_use]
    pub fn get(&self, name: KeypointName) -> Option<&Keypoint> {
        self.keypoints.iter().find(|kp| kp.name == name)
    }

    /// All keypoints in this pose
    #[must_use]
    pub fn keypoints(&self) -> &[Keypoint] {
        &self.keypoints
    }

    /// Positions of the keypoints meeting the confidence threshold.
    ///
    /// Everything downstream of the detector goes through this lookup, so a
    /// low-confidence landmark reads as absent rather than as a coordinate.
    #[must_use]
    pub fn visible_points(&self, confidence_threshold: f32) -> VisiblePoints {
        let mut points = HashMap::new();
        for kp in self.keypoints.iter().filter(|kp| kp.confidence >= confidence_threshold) {
            // First occurrence wins, matching `get`
            points.entry(kp.name).or_insert(kp.position);
        }
        VisiblePoints { points }
    }
}

/// Lookup from landmark name to position for confidently-detected keypoints
#[derive(Debug, Clone)]
pub struct VisiblePoints {
    points: HashMap<KeypointName, Point2<f32>>,
}

impl VisiblePoints {
    /// Position of a visible landmark, if present
    #[must_use]
    pub fn get(&self, name: KeypointName) -> Option<Point2<f32>> {
        self.points.get(&name).copied()
    }

    /// Position of a required landmark
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingKeypoints`] when the landmark is absent or was
    /// below the confidence threshold.
    pub fn require(&self, name: KeypointName) -> Result<Point2<f32>> {
        self.get(name)
            .ok_or_else(|| Error::MissingKeypoints(name.as_str().to_string()))
    }

    /// Number of visible landmarks
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no landmark met the threshold
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
