/// Seconds to wait for a hand controller before falling back to gaze navigation
pub const GAZE_FALLBACK_DELAY_SECS: f32 = 2.0;

/// Head rotation (radians) tolerated while dwelling on one direction
pub const GAZE_TOLERANCE_RADIANS: f32 = 0.12;

/// Dwell time before the gaze reticle starts filling
pub const GAZE_ACTIVATION_SECS: f32 = 0.5;

/// Dwell time after which the viewer starts walking
pub const GAZE_MOVE_SECS: f32 = 2.0;
