//! Campus data: the anchor registry feed, asset handles and the typed
//! classification of the loaded scene.

/// Ordered registry of infoboard anchors loaded from `college.json`.
pub mod anchor_registry;

/// Handles for every file the walkthrough loads.
pub mod campus_assets;

/// Surface classification of scene meshes and the resolved anchor index.
pub mod campus_manifest;
