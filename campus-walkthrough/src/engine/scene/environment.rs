use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::constants::render_settings::ENVIRONMENT_INTENSITY;
use crate::engine::assets::campus_assets::CampusAssets;
use crate::engine::navigation::rig::ViewerCamera;

/// Attach image based lighting to the viewer once both cubemaps have loaded.
/// A failed cubemap leaves the camera without it.
pub fn attach_environment_map(
    mut commands: Commands,
    campus: Res<CampusAssets>,
    asset_server: Res<AssetServer>,
    cameras: Query<Entity, With<ViewerCamera>>,
    mut settled: Local<bool>,
) {
    if *settled {
        return;
    }

    let diffuse = asset_server.get_load_state(&campus.environment_diffuse);
    let specular = asset_server.get_load_state(&campus.environment_specular);

    match (diffuse, specular) {
        (Some(LoadState::Loaded), Some(LoadState::Loaded)) => {
            for camera in &cameras {
                commands.entity(camera).insert(EnvironmentMapLight {
                    diffuse_map: campus.environment_diffuse.clone(),
                    specular_map: campus.environment_specular.clone(),
                    intensity: ENVIRONMENT_INTENSITY,
                    ..default()
                });
            }
            info!("✓ Environment map attached");
            *settled = true;
        }
        (Some(LoadState::Failed(err)), _) | (_, Some(LoadState::Failed(err))) => {
            error!("Environment map unavailable: {}", err);
            *settled = true;
        }
        _ => {}
    }
}
