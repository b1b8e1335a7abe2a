/// Handles for the campus scene, anchor feed and audio, plus the load-time manifest.
pub mod assets;
/// Proximity infoboard: which anchor's board shows, and the panel itself.
pub mod board;
pub mod core;
/// Controllers, gaze fallback and head pose folded into one per-frame snapshot.
pub mod input;
pub mod loading;
/// Dolly rig movement against the collision proxy.
pub mod navigation;
pub mod scene;
pub mod systems;
