use bevy::audio::Volume;
use bevy::prelude::*;
use constants::audio::{AMBIENT_VOLUME, FOOTSTEP_VOLUME};

use crate::engine::assets::campus_assets::CampusAssets;
use crate::engine::input::controllers::{ControllerEvent, ControllerEventKind};

/// The rig advanced this frame.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct FootstepRequested;

#[derive(Component)]
pub struct AmbientTrack;

/// Present while a footstep cue is playing; despawned with it.
#[derive(Component)]
pub struct FootstepCue;

/// Browsers only allow audio after a user gesture, so the loop waits for one.
pub fn start_ambient_on_gesture(
    mut commands: Commands,
    campus: Res<CampusAssets>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut controller_events: EventReader<ControllerEvent>,
    mut started: Local<bool>,
) {
    if *started {
        controller_events.clear();
        return;
    }

    let select = controller_events
        .read()
        .any(|event| event.kind == ControllerEventKind::SelectStart);
    if !(select || mouse_button.just_pressed(MouseButton::Left)) {
        return;
    }

    commands.spawn((
        Name::new("AmbientAudio"),
        AmbientTrack,
        AudioPlayer::new(campus.ambient_audio.clone()),
        PlaybackSettings::LOOP.with_volume(Volume::Linear(AMBIENT_VOLUME)),
    ));
    info!("Ambient audio started");
    *started = true;
}

/// One cue at a time; requests while it plays are dropped.
pub fn play_footsteps(
    mut commands: Commands,
    mut requests: EventReader<FootstepRequested>,
    campus: Res<CampusAssets>,
    playing: Query<(), With<FootstepCue>>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();

    if !playing.is_empty() {
        return;
    }

    commands.spawn((
        FootstepCue,
        AudioPlayer::new(campus.footstep_audio.clone()),
        PlaybackSettings::DESPAWN.with_volume(Volume::Linear(FOOTSTEP_VOLUME)),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn footstep_app() -> App {
        let mut app = App::new();
        app.init_resource::<CampusAssets>()
            .add_event::<FootstepRequested>()
            .add_systems(Update, play_footsteps);
        app
    }

    fn cue_count(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<(), With<FootstepCue>>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn footstep_is_not_restarted_while_playing() {
        let mut app = footstep_app();

        app.world_mut().send_event(FootstepRequested);
        app.world_mut().send_event(FootstepRequested);
        app.update();
        assert_eq!(cue_count(&mut app), 1);

        app.world_mut().send_event(FootstepRequested);
        app.update();
        assert_eq!(cue_count(&mut app), 1);
    }

    #[test]
    fn no_request_no_cue() {
        let mut app = footstep_app();
        app.update();
        assert_eq!(cue_count(&mut app), 0);
    }
}
