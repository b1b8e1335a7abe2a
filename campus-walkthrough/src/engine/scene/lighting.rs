use bevy::prelude::*;

use crate::constants::render_settings::{AMBIENT_BRIGHTNESS, SUN_ILLUMINANCE, SUN_POSITION};
use crate::rpc::web_rpc::WebRpcInterface;

/// The directional light the `L` key switches.
#[derive(Component)]
pub struct SunLight;

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ToggleLightEvent;

pub fn spawn_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });

    commands.spawn((
        Name::new("SunLight"),
        SunLight,
        DirectionalLight {
            illuminance: SUN_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(SUN_POSITION)).looking_at(Vec3::ZERO, Vec3::Y),
        Visibility::Visible,
    ));
}

pub fn toggled(visibility: Visibility) -> Visibility {
    match visibility {
        Visibility::Hidden => Visibility::Visible,
        _ => Visibility::Hidden,
    }
}

pub fn light_toggle_input(
    #[cfg(not(target_arch = "wasm32"))] keyboard: Res<ButtonInput<KeyCode>>,
    #[cfg(not(target_arch = "wasm32"))] mut toggles: EventWriter<ToggleLightEvent>,
) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if keyboard.just_pressed(KeyCode::KeyL) {
            toggles.write(ToggleLightEvent);
        }
    }
}

pub fn toggle_light(
    mut toggles: EventReader<ToggleLightEvent>,
    mut lights: Query<&mut Visibility, With<SunLight>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for _ in toggles.read() {
        for mut visibility in &mut lights {
            *visibility = toggled(*visibility);
            let on = *visibility != Visibility::Hidden;

            info!("Light is now {}", if on { "ON" } else { "OFF" });
            rpc_interface.send_notification("light_toggled", serde_json::json!({ "on": on }));
        }
    }
}
