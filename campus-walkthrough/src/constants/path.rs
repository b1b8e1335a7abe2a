/// Campus model, loaded as its first glTF scene
pub const CAMPUS_SCENE_PATH: &str = "college.glb";

/// Infoboard anchor feed
pub const ANCHOR_FEED_PATH: &str = "college.json";

pub const AMBIENT_AUDIO_PATH: &str = "audio/ambient.mp3";
pub const FOOTSTEP_AUDIO_PATH: &str = "audio/footstep.mp3";

/// Prefiltered environment cubemaps for image based lighting
pub const ENVIRONMENT_DIFFUSE_PATH: &str = "environment/diffuse_rgb9e5_zstd.ktx2";
pub const ENVIRONMENT_SPECULAR_PATH: &str = "environment/specular_rgb9e5_zstd.ktx2";
