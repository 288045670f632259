//! Constants used throughout the library

/// Default keypoint confidence threshold for the shoulder exercises
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Relaxed confidence threshold for pendulum tracking, where the wrist
/// landmark hangs low in the frame and detects weaker
pub const PENDULUM_CONFIDENCE_THRESHOLD: f32 = 0.3;

/// Cooldown between correction messages
pub const DEFAULT_CORRECTION_COOLDOWN_MS: u64 = 2000;

/// Cooldown between positive-reinforcement messages
pub const DEFAULT_POSITIVE_COOLDOWN_MS: u64 = 4000;

/// Frame gap above which the session is treated as paused
pub const DEFAULT_STALE_TIMEOUT_MS: u64 = 1500;

/// Maximum number of poses retained for velocity calculation
pub const POSE_HISTORY_LEN: usize = 10;

/// Rolling window of structured feedback items
pub const FEEDBACK_WINDOW: usize = 3;

/// Rolling window of user-facing messages
pub const MESSAGE_WINDOW: usize = 5;

/// Every Nth completed repetition gets an enhanced message
pub const MILESTONE_INTERVAL: u32 = 5;

/// Minimum vector magnitude accepted by the angle computation
pub const GEOMETRY_EPSILON: f32 = 1e-6;

/// Issue string surfaced when required landmarks cannot be measured
pub const CANNOT_DETECT_MESSAGE: &str =
    "Cannot detect the required body points. Adjust your position so the camera sees your upper body.";

/// Upper bound for exercise progress percentage
pub const PROGRESS_MAX: f32 = 100.0;
