use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use serde::Deserialize;

use crate::engine::board::tracker::BoardCommand;
use crate::engine::core::session::WalkthroughSession;
use crate::engine::input::controllers::XrControllers;
use crate::engine::input::gaze::GazeController;
use crate::engine::navigation::rig::{Dolly, ViewerCamera, spawn_transform};

/// Whether an immersive session is currently presenting.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct XrPresentation {
    pub presenting: bool,
}

/// Session start or end reported by the XR bridge (or simulated with `V`).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct XrSessionEvent {
    pub presenting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationChange {
    Entered,
    Exited,
}

pub fn presentation_change(was_presenting: bool, presenting: bool) -> Option<PresentationChange> {
    match (was_presenting, presenting) {
        (false, true) => Some(PresentationChange::Entered),
        (true, false) => Some(PresentationChange::Exited),
        _ => None,
    }
}

/// Run condition for the per-frame core systems.
pub fn is_presenting(presentation: Res<XrPresentation>) -> bool {
    presentation.presenting
}

pub fn apply_session_events(
    mut events: EventReader<XrSessionEvent>,
    mut presentation: ResMut<XrPresentation>,
) {
    if let Some(event) = events.read().last() {
        presentation.set_if_neq(XrPresentation {
            presenting: event.presenting,
        });
    }
}

/// Native stand-in for entering and leaving an immersive session.
pub fn simulate_session_toggle(
    presentation: Res<XrPresentation>,
    #[cfg(not(target_arch = "wasm32"))] keyboard: Res<ButtonInput<KeyCode>>,
    #[cfg(not(target_arch = "wasm32"))] mut events: EventWriter<XrSessionEvent>,
) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if keyboard.just_pressed(KeyCode::KeyV) {
            events.write(XrSessionEvent {
                presenting: !presentation.presenting,
            });
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        let _ = presentation;
    }
}

/// React to presentation changes: fix the camera aspect and, on entry,
/// put the rig and board back to their starting state.
pub fn reconcile_presentation(
    presentation: Res<XrPresentation>,
    mut session: ResMut<WalkthroughSession>,
    mut gaze: ResMut<GazeController>,
    mut controllers: ResMut<XrControllers>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut projections: Query<&mut Projection, With<ViewerCamera>>,
    mut rig_query: Query<&mut Transform, With<Dolly>>,
    mut board_commands: EventWriter<BoardCommand>,
) {
    let Some(change) = presentation_change(session.was_presenting, presentation.presenting) else {
        return;
    };
    session.was_presenting = presentation.presenting;

    if let Ok(window) = windows.single() {
        let (width, height) = (window.width(), window.height());
        if width > 0.0 && height > 0.0 {
            for mut projection in &mut projections {
                if let Projection::Perspective(perspective) = projection.as_mut() {
                    perspective.aspect_ratio = width / height;
                }
            }
        }
    }

    match change {
        PresentationChange::Entered => {
            info!("→ Presentation started, resetting rig and board");
            if let Ok(mut rig) = rig_query.single_mut() {
                *rig = spawn_transform();
            }
            session.restart();
            gaze.reset();
            board_commands.write(BoardCommand::Hide);
        }
        PresentationChange::Exited => {
            info!("→ Presentation ended");
            controllers.release_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::rig::RIG_SPAWN;

    #[test]
    fn change_is_detected_on_edges_only() {
        assert_eq!(presentation_change(false, true), Some(PresentationChange::Entered));
        assert_eq!(presentation_change(true, false), Some(PresentationChange::Exited));
        assert_eq!(presentation_change(true, true), None);
        assert_eq!(presentation_change(false, false), None);
    }

    #[test]
    fn entering_presentation_resets_rig() {
        let mut app = App::new();
        app.init_resource::<XrPresentation>()
            .init_resource::<WalkthroughSession>()
            .init_resource::<GazeController>()
            .init_resource::<XrControllers>()
            .add_event::<BoardCommand>()
            .add_systems(Update, reconcile_presentation);
        let rig = app
            .world_mut()
            .spawn((Dolly, Transform::from_xyz(-7.0, 3.0, -20.0)))
            .id();

        app.world_mut().resource_mut::<XrPresentation>().presenting = true;
        app.update();

        assert_eq!(
            app.world().get::<Transform>(rig).map(|t| t.translation),
            Some(RIG_SPAWN)
        );
        assert!(app.world().resource::<WalkthroughSession>().was_presenting);
        assert_eq!(
            app.world().resource::<WalkthroughSession>().board.currently_shown(),
            None
        );
    }

    #[test]
    fn leaving_presentation_keeps_rig() {
        let mut app = App::new();
        app.insert_resource(XrPresentation { presenting: true })
            .insert_resource(WalkthroughSession {
                was_presenting: true,
                ..default()
            })
            .init_resource::<GazeController>()
            .init_resource::<XrControllers>()
            .add_event::<BoardCommand>()
            .add_systems(Update, reconcile_presentation);
        let moved = Transform::from_xyz(4.0, 0.0, 1.0);
        let rig = app.world_mut().spawn((Dolly, moved)).id();

        app.world_mut().resource_mut::<XrPresentation>().presenting = false;
        app.update();

        assert_eq!(app.world().get::<Transform>(rig), Some(&moved));
        assert!(!app.world().resource::<WalkthroughSession>().was_presenting);
    }
}
