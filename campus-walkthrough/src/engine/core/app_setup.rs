use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::constants::render_settings::CLEAR_COLOUR;
// Assets and loading
use crate::engine::assets::anchor_registry::AnchorRegistry;
use crate::engine::assets::campus_assets::CampusAssets;
use crate::engine::assets::campus_manifest::AnchorIndex;
use crate::engine::loading::asset_loader::{
    check_asset_loading, report_optional_asset_failures, start_loading,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::scene_classification::classify_campus_scene;
// Frame controller
use crate::engine::board::panel::{apply_board_command, spawn_info_board};
use crate::engine::board::tracker::{BoardCommand, BoardSettings, track_boards};
use crate::engine::input::controllers::{
    ControllerEvent, XrControllers, apply_controller_events, desktop_select_input,
};
use crate::engine::input::gaze::{
    GazeController, GazeFallback, GazeSettings, tick_gaze_fallback, update_gaze,
};
use crate::engine::input::head_pose::{DesktopLook, HeadPoseEvent, apply_head_pose, desktop_look};
use crate::engine::input::snapshot::{InputSnapshot, sample_input};
use crate::engine::navigation::dolly::NavigationSettings;
use crate::engine::navigation::rig::{move_dolly, spawn_rig};
// Scene and runtime systems
use crate::engine::core::app_state::{
    AppState, FpsText, announce_running, transition_to_scene_spawned, transition_without_scene,
    update_loading_frontend,
};
use crate::engine::core::session::WalkthroughSession;
use crate::engine::core::window_config::create_window_config;
use crate::engine::scene::environment::attach_environment_map;
use crate::engine::scene::lighting::{
    ToggleLightEvent, light_toggle_input, spawn_lighting, toggle_light,
};
use crate::engine::systems::audio::{FootstepRequested, play_footsteps, start_ambient_on_gesture};
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::systems::presentation::{
    XrPresentation, XrSessionEvent, apply_session_events, is_presenting, reconcile_presentation,
    simulate_session_toggle,
};
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::input::controllers::connect_desktop_controller;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

pub fn create_app() -> App {
    let mut app = App::new();

    let [r, g, b] = CLEAR_COLOUR;
    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers the anchor feed as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<AnchorRegistry>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .insert_resource(ClearColor(Color::srgb(r, g, b)));

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<CampusAssets>()
        .init_resource::<AnchorRegistry>()
        .init_resource::<AnchorIndex>()
        .init_resource::<WalkthroughSession>()
        .init_resource::<InputSnapshot>()
        .init_resource::<XrControllers>()
        .init_resource::<XrPresentation>()
        .init_resource::<GazeController>()
        .init_resource::<GazeFallback>()
        .init_resource::<DesktopLook>()
        .init_resource::<NavigationSettings>()
        .init_resource::<BoardSettings>()
        .init_resource::<GazeSettings>()
        .add_event::<ControllerEvent>()
        .add_event::<HeadPoseEvent>()
        .add_event::<XrSessionEvent>()
        .add_event::<BoardCommand>()
        .add_event::<FootstepRequested>()
        .add_event::<ToggleLightEvent>();

    app.add_systems(
        Startup,
        (setup, spawn_rig, spawn_lighting, spawn_info_board, start_loading).chain(),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, connect_desktop_controller);
    }

    // State-based system scheduling
    app.add_systems(
        Update,
        (
            check_asset_loading,
            transition_to_scene_spawned,
            transition_without_scene,
            update_loading_frontend,
        )
            .chain()
            .run_if(in_state(AppState::Loading)),
    )
    .add_systems(
        Update,
        classify_campus_scene.run_if(in_state(AppState::SceneSpawned)),
    )
    .add_systems(OnEnter(AppState::Running), announce_running);

    // Input ingestion runs in every state so nothing reported during loading is lost.
    let input_systems = (
        desktop_select_input,
        apply_controller_events,
        simulate_session_toggle,
        apply_session_events,
        desktop_look,
        apply_head_pose,
        light_toggle_input,
        toggle_light,
    )
        .chain();

    // The frame controller: navigation then proximity, only while presenting.
    let frame_systems = (
        sample_input,
        update_gaze,
        move_dolly,
        track_boards,
        apply_board_command,
    )
        .chain()
        .run_if(is_presenting);

    let runtime_systems = (
        tick_gaze_fallback,
        start_ambient_on_gesture,
        play_footsteps,
        attach_environment_map,
        report_optional_asset_failures,
        fps_notification_system,
    );

    app.add_systems(Update, input_systems);
    app.add_systems(
        Update,
        (reconcile_presentation, frame_systems, runtime_systems)
            .chain()
            .after(toggle_light)
            .run_if(in_state(AppState::Running)),
    );

    // Add fps_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }

    #[cfg(target_arch = "wasm32")]
    {
        let _ = &mut commands;
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
            parent.spawn((
                Text::new("V: enter/leave walkthrough   Click/Space: walk   Right-drag: look   L: light"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
