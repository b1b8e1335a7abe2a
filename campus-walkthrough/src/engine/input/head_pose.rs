#[cfg(not(target_arch = "wasm32"))]
use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use constants::rig::{EYE_HEIGHT, MAX_PITCH, MOUSE_PITCH_SENSITIVITY, MOUSE_YAW_SENSITIVITY};

use crate::engine::navigation::rig::ViewerCamera;

/// Camera pose relative to the dolly as reported by the XR runtime.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HeadPoseEvent {
    pub orientation: Quat,
    pub position: Option<Vec3>,
}

/// Yaw and pitch of the desktop mouse look.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct DesktopLook {
    pub yaw: f32,
    pub pitch: f32,
}

impl DesktopLook {
    pub fn apply_drag(&mut self, delta: Vec2) {
        self.yaw += -delta.x * MOUSE_YAW_SENSITIVITY;
        self.pitch += -delta.y * MOUSE_PITCH_SENSITIVITY;
        self.pitch = self.pitch.clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}

/// Latest bridge pose wins; earlier ones in the same frame are dropped.
pub fn apply_head_pose(
    mut events: EventReader<HeadPoseEvent>,
    mut camera_query: Query<&mut Transform, With<ViewerCamera>>,
) {
    let Some(pose) = events.read().last().copied() else {
        return;
    };
    let Ok(mut camera) = camera_query.single_mut() else {
        return;
    };

    camera.rotation = pose.orientation.normalize();
    if let Some(position) = pose.position {
        camera.translation = position;
    }
}

/// Right-drag look for native builds.
pub fn desktop_look(
    mut look: ResMut<DesktopLook>,
    mut camera_query: Query<&mut Transform, With<ViewerCamera>>,
    #[cfg(not(target_arch = "wasm32"))] mouse_button: Res<ButtonInput<MouseButton>>,
    #[cfg(not(target_arch = "wasm32"))] mut mouse_motion: EventReader<MouseMotion>,
) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
        if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
            look.apply_drag(mouse_delta);
        }
    }

    if !look.is_changed() {
        return;
    }
    if let Ok(mut camera) = camera_query.single_mut() {
        camera.rotation = look.rotation();
        camera.translation = Vec3::new(0.0, EYE_HEIGHT, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped() {
        let mut look = DesktopLook::default();
        look.apply_drag(Vec2::new(0.0, -1.0e6));
        assert_eq!(look.pitch, MAX_PITCH);
        look.apply_drag(Vec2::new(0.0, 1.0e6));
        assert_eq!(look.pitch, -MAX_PITCH);
    }

    #[test]
    fn dragging_right_turns_right() {
        let mut look = DesktopLook::default();
        look.apply_drag(Vec2::new(100.0, 0.0));

        let forward = look.rotation() * Vec3::NEG_Z;
        assert!(forward.x > 0.0);
    }

    #[test]
    fn bridge_pose_replaces_camera_pose() {
        let mut app = App::new();
        app.add_event::<HeadPoseEvent>()
            .add_systems(Update, apply_head_pose);
        let camera = app
            .world_mut()
            .spawn((ViewerCamera, Transform::from_xyz(0.0, 1.6, 0.0)))
            .id();

        let orientation = Quat::from_rotation_y(0.5);
        app.world_mut().send_event(HeadPoseEvent {
            orientation,
            position: Some(Vec3::new(0.1, 1.7, -0.2)),
        });
        app.update();

        let transform = app.world().get::<Transform>(camera).unwrap();
        assert!(transform.rotation.angle_between(orientation) < 1e-5);
        assert_eq!(transform.translation, Vec3::new(0.1, 1.7, -0.2));
    }
}
