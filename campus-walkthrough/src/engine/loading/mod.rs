//! Asset loading and the one-off scene classification pass.
//!
//! Loads the campus scene and anchor feed, spawns the scene, then walks it
//! once to build the collision proxy, restyle surfaces and resolve anchors
//! before the app enters `Running`.

/// Load start, load state polling and the loading state transitions.
pub mod asset_loader;

/// Loading progress tracking resource for state transitions.
///
/// Also reported to the host page as per-item states.
pub mod progress;

/// Mesh classification, collision proxy extraction and anchor resolution.
pub mod scene_classification;
