use bevy::prelude::*;

use crate::engine::assets::campus_manifest::CampusManifest;
use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    SceneSpawned,
    Running,
}

#[derive(Component)]
pub struct FpsText;

// Transition to SceneSpawned once the feed is in and the scene instance exists
pub fn transition_to_scene_spawned(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.ready_to_classify() {
        info!("→ Transitioning to SceneSpawned state");
        next_state.set(AppState::SceneSpawned);
    }
}

// Skip classification when the scene could not be loaded
pub fn transition_without_scene(
    mut commands: Commands,
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.ready_without_scene() {
        warn!("→ Running without campus scene: navigation and infoboards disabled");
        commands.insert_resource(CampusManifest::default());
        next_state.set(AppState::Running);
    }
}

/// Push per-item loading states to the host page whenever they change.
pub fn update_loading_frontend(
    loading_progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut last_sent: Local<Vec<(String, i32)>>,
) {
    if *last_sent == loading_progress.loading_states {
        return;
    }

    let items: Vec<serde_json::Value> = loading_progress
        .loading_states
        .iter()
        .map(|(item, loaded)| serde_json::json!({ "item": item, "loaded": *loaded == 1 }))
        .collect();
    rpc_interface.send_notification("loading_progress", serde_json::json!({ "items": items }));

    last_sent.clone_from(&loading_progress.loading_states);
}

/// Tell the host page loading is over.
pub fn announce_running(mut rpc_interface: ResMut<WebRpcInterface>) {
    info!("→ All systems ready, walkthrough running");
    rpc_interface.send_notification("loading_progress", serde_json::json!({ "complete": true }));
}
