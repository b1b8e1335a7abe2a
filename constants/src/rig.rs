use bevy::math::Vec3;

/// Where the dolly is placed when a session starts
pub const RIG_SPAWN: Vec3 = Vec3::new(0.0, 0.0, 10.0);

/// Camera height above the dolly's floor contact point
pub const EYE_HEIGHT: f32 = 1.6;

/// Mouse-look sensitivity for the desktop head pose (radians per pixel)
pub const MOUSE_YAW_SENSITIVITY: f32 = 0.0035;
pub const MOUSE_PITCH_SENSITIVITY: f32 = 0.0030;

/// Pitch limit for the desktop head pose
pub const MAX_PITCH: f32 = 1.55;
