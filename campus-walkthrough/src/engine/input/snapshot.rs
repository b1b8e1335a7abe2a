use bevy::prelude::*;

use crate::engine::input::controllers::XrControllers;
use crate::engine::navigation::rig::{Dolly, ViewerCamera};

/// Everything the frame controller reads from the viewer, sampled once per frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct InputSnapshot {
    pub activate: bool,
    pub gaze_move: bool,
    pub head_orientation: Quat,
    pub head_position: Vec3,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            activate: false,
            gaze_move: false,
            head_orientation: Quat::IDENTITY,
            head_position: Vec3::ZERO,
        }
    }
}

impl InputSnapshot {
    pub fn wants_to_move(&self) -> bool {
        self.activate || self.gaze_move
    }
}

/// World orientation and position of a camera riding on the rig.
pub fn head_world_pose(rig: &Transform, camera_local: &Transform) -> (Quat, Vec3) {
    (
        (rig.rotation * camera_local.rotation).normalize(),
        rig.transform_point(camera_local.translation),
    )
}

pub fn sample_input(
    controllers: Res<XrControllers>,
    rig_query: Query<&Transform, With<Dolly>>,
    camera_query: Query<&Transform, (With<ViewerCamera>, Without<Dolly>)>,
    mut input: ResMut<InputSnapshot>,
) {
    input.activate = controllers.activate();

    if let (Ok(rig), Ok(camera)) = (rig_query.single(), camera_query.single()) {
        let (orientation, position) = head_world_pose(rig, camera);
        input.head_orientation = orientation;
        input.head_position = position;
    }
}
