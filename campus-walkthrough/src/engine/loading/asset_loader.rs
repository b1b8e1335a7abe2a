use bevy::asset::{LoadState, UntypedAssetId};
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;

use crate::constants::path::{ANCHOR_FEED_PATH, CAMPUS_SCENE_PATH};
use crate::engine::assets::anchor_registry::AnchorRegistry;
use crate::engine::assets::campus_assets::CampusAssets;
use crate::engine::loading::progress::LoadingProgress;

// Start the loading process
pub fn start_loading(mut campus: ResMut<CampusAssets>, asset_server: Res<AssetServer>) {
    info!("Loading campus from {} and {}", CAMPUS_SCENE_PATH, ANCHOR_FEED_PATH);
    *campus = CampusAssets::load(&asset_server);
}

// Poll the scene and anchor feed; spawn the scene once it is in memory
pub fn check_asset_loading(
    mut commands: Commands,
    mut loading_progress: ResMut<LoadingProgress>,
    mut campus: ResMut<CampusAssets>,
    asset_server: Res<AssetServer>,
    registries: Res<Assets<AnchorRegistry>>,
) {
    if !loading_progress.anchors_loaded {
        match asset_server.get_load_state(&campus.anchors) {
            Some(LoadState::Loaded) => {
                let registry = registries.get(&campus.anchors).cloned().unwrap_or_default();
                info!("✓ Anchor feed loaded ({} anchors)", registry.len());
                commands.insert_resource(registry);
                loading_progress.anchors_loaded = true;
            }
            Some(LoadState::Failed(err)) => {
                error!("Anchor feed unavailable, infoboards disabled: {}", err);
                commands.insert_resource(AnchorRegistry::default());
                loading_progress.anchors_loaded = true;
            }
            _ => {}
        }
    }

    if !loading_progress.scene_loaded && !loading_progress.scene_failed {
        match asset_server.get_load_state(&campus.scene) {
            Some(LoadState::Loaded) => {
                let root = commands
                    .spawn((Name::new("Campus"), SceneRoot(campus.scene.clone())))
                    .observe(mark_scene_spawned)
                    .id();
                campus.scene_root = Some(root);
                loading_progress.scene_loaded = true;
                info!("✓ Campus scene loaded");
            }
            Some(LoadState::Failed(err)) => {
                error!("Campus scene unavailable: {}", err);
                loading_progress.scene_failed = true;
            }
            _ => {}
        }
    }

    let states = vec![
        (
            String::from("Campus scene"),
            i32::from(loading_progress.scene_loaded),
        ),
        (
            String::from("Anchor feed"),
            i32::from(loading_progress.anchors_loaded),
        ),
        (
            String::from("Scene spawned"),
            i32::from(loading_progress.scene_spawned),
        ),
    ];
    if loading_progress.loading_states != states {
        loading_progress.loading_states = states;
    }
}

fn mark_scene_spawned(
    _trigger: Trigger<SceneInstanceReady>,
    mut loading_progress: ResMut<LoadingProgress>,
) {
    loading_progress.scene_spawned = true;
}

/// Log optional assets (audio, environment) that failed; their features stay absent.
pub fn report_optional_asset_failures(
    campus: Res<CampusAssets>,
    asset_server: Res<AssetServer>,
    mut reported: Local<Vec<UntypedAssetId>>,
) {
    let optional = [
        ("ambient audio", campus.ambient_audio.id().untyped()),
        ("footstep audio", campus.footstep_audio.id().untyped()),
    ];

    for (label, id) in optional {
        if reported.contains(&id) {
            continue;
        }
        if let Some(LoadState::Failed(err)) = asset_server.get_load_state(id) {
            error!("Failed to load {}: {}", label, err);
            reported.push(id);
        }
    }
}
