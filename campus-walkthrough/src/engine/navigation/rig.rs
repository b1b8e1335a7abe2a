use bevy::prelude::*;
use constants::rig::{EYE_HEIGHT, RIG_SPAWN};

use crate::engine::core::session::WalkthroughSession;
use crate::engine::input::snapshot::InputSnapshot;
use crate::engine::navigation::dolly::{NavigationSettings, advance};
use crate::engine::navigation::spatial_query::CollisionProxy;
use crate::engine::systems::audio::FootstepRequested;

/// The movable parent of the viewer camera.
#[derive(Component)]
pub struct Dolly;

/// The head-tracked camera riding on the dolly.
#[derive(Component)]
pub struct ViewerCamera;

pub fn spawn_rig(mut commands: Commands) {
    commands
        .spawn((
            Name::new("Dolly"),
            Dolly,
            Transform::from_translation(RIG_SPAWN),
            Visibility::default(),
        ))
        .with_children(|rig| {
            rig.spawn((
                Name::new("ViewerCamera"),
                ViewerCamera,
                Camera3d::default(),
                IsDefaultUiCamera,
                Projection::Perspective(PerspectiveProjection {
                    fov: 60f32.to_radians(),
                    near: 0.01,
                    far: 500.0,
                    ..default()
                }),
                Transform::from_xyz(0.0, EYE_HEIGHT, 0.0),
            ));
        });
}

/// Rig transform a fresh session starts from.
pub fn spawn_transform() -> Transform {
    Transform::from_translation(RIG_SPAWN)
}

pub fn move_dolly(
    time: Res<Time>,
    input: Res<InputSnapshot>,
    settings: Res<NavigationSettings>,
    proxy: Option<Res<CollisionProxy>>,
    mut session: ResMut<WalkthroughSession>,
    mut rig_query: Query<&mut Transform, With<Dolly>>,
    mut footsteps: EventWriter<FootstepRequested>,
) {
    if !input.wants_to_move() {
        return;
    }

    let Ok(mut rig) = rig_query.single_mut() else {
        return;
    };

    if proxy.is_none() && !session.proxy_warning_logged {
        warn!("No collision proxy loaded; navigation is disabled");
        session.proxy_warning_logged = true;
    }

    let step = advance(
        &settings,
        time.delta_secs(),
        *rig,
        input.head_orientation,
        proxy.as_deref(),
    );

    if step.advanced {
        footsteps.write(FootstepRequested);
    }
    if step.side_corrections.iter().any(|c| *c > 0.0) {
        debug!("Wall push-back {:?}", step.side_corrections);
    }

    rig.set_if_neq(step.transform);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::navigation::spatial_query::tests::{floor, quad};
    use std::time::Duration;

    fn walking_app(proxy: Option<CollisionProxy>) -> (App, Entity) {
        let mut app = App::new();
        app.init_resource::<Time>()
            .init_resource::<NavigationSettings>()
            .init_resource::<WalkthroughSession>()
            .insert_resource(InputSnapshot {
                activate: true,
                ..default()
            })
            .add_event::<FootstepRequested>()
            .add_systems(Update, move_dolly);
        if let Some(proxy) = proxy {
            app.insert_resource(proxy);
        }
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(100));
        let rig = app.world_mut().spawn((Dolly, Transform::IDENTITY)).id();
        (app, rig)
    }

    fn footsteps(app: &App) -> usize {
        app.world().resource::<Events<FootstepRequested>>().len()
    }

    #[test]
    fn no_proxy_keeps_rig_still_and_warns_once_per_session() {
        let (mut app, rig) = walking_app(None);

        app.update();
        assert_eq!(app.world().get::<Transform>(rig), Some(&Transform::IDENTITY));
        assert_eq!(footsteps(&app), 0);
        assert!(app.world().resource::<WalkthroughSession>().proxy_warning_logged);

        app.world_mut().resource_mut::<WalkthroughSession>().restart();
        assert!(!app.world().resource::<WalkthroughSession>().proxy_warning_logged);

        app.update();
        assert!(app.world().resource::<WalkthroughSession>().proxy_warning_logged);
    }

    #[test]
    fn open_floor_step_requests_a_footstep() {
        let proxy = CollisionProxy::from_triangles(floor(0.0, 50.0).to_vec());
        let (mut app, rig) = walking_app(Some(proxy));

        app.update();

        let z = app.world().get::<Transform>(rig).map(|t| t.translation.z);
        assert!(z.is_some_and(|z| (z - -0.2).abs() < 1e-5));
        assert_eq!(footsteps(&app), 1);
        assert!(!app.world().resource::<WalkthroughSession>().proxy_warning_logged);
    }

    #[test]
    fn blocked_step_stays_silent() {
        let mut triangles = floor(0.0, 50.0).to_vec();
        triangles.extend(quad(
            Vec3::new(-20.0, 0.0, -1.0),
            Vec3::new(20.0, 0.0, -1.0),
            Vec3::new(20.0, 4.0, -1.0),
            Vec3::new(-20.0, 4.0, -1.0),
        ));
        let (mut app, rig) = walking_app(Some(CollisionProxy::from_triangles(triangles)));

        app.update();

        let moved = app.world().get::<Transform>(rig).map(|t| t.translation.length());
        assert!(moved.is_some_and(|d| d < 1e-5));
        assert_eq!(footsteps(&app), 0);
    }

    #[test]
    fn idle_input_does_not_move() {
        let proxy = CollisionProxy::from_triangles(floor(0.0, 50.0).to_vec());
        let (mut app, rig) = walking_app(Some(proxy));
        app.insert_resource(InputSnapshot::default());

        app.update();

        assert_eq!(app.world().get::<Transform>(rig), Some(&Transform::IDENTITY));
        assert_eq!(footsteps(&app), 0);
    }
}
