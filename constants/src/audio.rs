/// Looping background track volume (linear)
pub const AMBIENT_VOLUME: f32 = 0.3;

/// One-shot footstep cue volume (linear)
pub const FOOTSTEP_VOLUME: f32 = 0.5;
