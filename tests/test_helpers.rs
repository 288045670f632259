//! Helper functions and utilities for tests
#![allow(dead_code)] // not every test file uses every helper

use exercise_tracking::keypoints::{Keypoint, KeypointName, Pose};

/// A confident keypoint at the given position
pub fn kp(name: KeypointName, x: f32, y: f32) -> Keypoint {
    Keypoint::new(name, x, y, 0.9)
}

/// A straight right arm raised to `angle` degrees of shoulder flexion,
/// shoulders level, every landmark confident. Drives the shoulder flexion
/// rules to a correct-form verdict at the requested angle.
pub fn flexion_pose(angle: f32) -> Pose {
    let shoulder = (200.0, 200.0);
    let rad = angle.to_radians();
    // The hip hangs straight below the shoulder; the arm leaves the shoulder
    // rotated `angle` away from that downward ray
    let wrist = (shoulder.0 + 120.0 * rad.sin(), shoulder.1 + 120.0 * rad.cos());
    let elbow = (shoulder.0 + 60.0 * rad.sin(), shoulder.1 + 60.0 * rad.cos());

    Pose::new(vec![
        kp(KeypointName::RightHip, shoulder.0, shoulder.1 + 150.0),
        kp(KeypointName::RightShoulder, shoulder.0, shoulder.1),
        kp(KeypointName::LeftShoulder, shoulder.0 - 80.0, shoulder.1),
        kp(KeypointName::RightElbow, elbow.0, elbow.1),
        kp(KeypointName::RightWrist, wrist.0, wrist.1),
    ])
}

/// The same pose with one landmark removed
pub fn pose_without(pose: &Pose, name: KeypointName) -> Pose {
    Pose::new(
        pose.keypoints()
            .iter()
            .filter(|kp| kp.name != name)
            .cloned()
            .collect(),
    )
}

/// The same pose with one landmark displaced by (dx, dy)
pub fn pose_with_offset(pose: &Pose, name: KeypointName, dx: f32, dy: f32) -> Pose {
    Pose::new(
        pose.keypoints()
            .iter()
            .cloned()
            .map(|mut kp| {
                if kp.name == name {
                    kp.position.x += dx;
                    kp.position.y += dy;
                }
                kp
            })
            .collect(),
    )
}
