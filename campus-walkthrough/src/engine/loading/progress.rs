use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub anchors_loaded: bool,
    pub scene_loaded: bool,
    /// The scene failed to load; the app runs without it.
    pub scene_failed: bool,
    pub scene_spawned: bool,
    pub scene_classified: bool,
    pub loading_states: Vec<(String, i32)>,
}

impl LoadingProgress {
    pub fn ready_to_classify(&self) -> bool {
        self.anchors_loaded && self.scene_spawned
    }

    /// Loading is over without a scene to classify.
    pub fn ready_without_scene(&self) -> bool {
        self.anchors_loaded && self.scene_failed
    }
}
