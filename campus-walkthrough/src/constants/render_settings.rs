/// Brightness of the white ambient fill standing in for a hemisphere light
pub const AMBIENT_BRIGHTNESS: f32 = 400.0;

/// Directional light illuminance and placement (aimed at the origin)
pub const SUN_ILLUMINANCE: f32 = 4_000.0;
pub const SUN_POSITION: [f32; 3] = [10.0, 20.0, 10.0];

/// Image based lighting strength once the environment maps are ready
pub const ENVIRONMENT_INTENSITY: f32 = 900.0;

/// Clear colour behind the campus before the sky box loads
pub const CLEAR_COLOUR: [f32; 3] = [0.05, 0.05, 0.08];

/// Interval between fps notifications to the host page (seconds)
pub const FPS_NOTIFY_INTERVAL: f32 = 0.5;
