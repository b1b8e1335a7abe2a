/// Asset paths relative to the asset root
pub mod path;

/// Lighting and presentation settings for the engine
pub mod render_settings;
