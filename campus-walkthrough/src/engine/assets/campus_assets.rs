use bevy::prelude::*;

use crate::constants::path::{
    AMBIENT_AUDIO_PATH, ANCHOR_FEED_PATH, CAMPUS_SCENE_PATH, ENVIRONMENT_DIFFUSE_PATH,
    ENVIRONMENT_SPECULAR_PATH, FOOTSTEP_AUDIO_PATH,
};
use crate::engine::assets::anchor_registry::AnchorRegistry;

/// Handles for every file the walkthrough loads, plus the spawned scene root.
#[derive(Resource, Default)]
pub struct CampusAssets {
    pub scene: Handle<Scene>,
    pub anchors: Handle<AnchorRegistry>,
    pub ambient_audio: Handle<AudioSource>,
    pub footstep_audio: Handle<AudioSource>,
    pub environment_diffuse: Handle<Image>,
    pub environment_specular: Handle<Image>,
    pub scene_root: Option<Entity>,
}

impl CampusAssets {
    pub fn load(asset_server: &AssetServer) -> Self {
        Self {
            scene: asset_server.load(GltfAssetLabel::Scene(0).from_asset(CAMPUS_SCENE_PATH)),
            anchors: asset_server.load(ANCHOR_FEED_PATH),
            ambient_audio: asset_server.load(AMBIENT_AUDIO_PATH),
            footstep_audio: asset_server.load(FOOTSTEP_AUDIO_PATH),
            environment_diffuse: asset_server.load(ENVIRONMENT_DIFFUSE_PATH),
            environment_specular: asset_server.load(ENVIRONMENT_SPECULAR_PATH),
            scene_root: None,
        }
    }
}
