use bevy::prelude::*;
use constants::gaze::{
    GAZE_ACTIVATION_SECS, GAZE_FALLBACK_DELAY_SECS, GAZE_MOVE_SECS, GAZE_TOLERANCE_RADIANS,
};

use crate::engine::input::controllers::XrControllers;
use crate::engine::input::snapshot::InputSnapshot;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GazeSettings {
    pub tolerance: f32,
    pub activation_secs: f32,
    pub move_secs: f32,
    pub fallback_delay_secs: f32,
}

impl Default for GazeSettings {
    fn default() -> Self {
        Self {
            tolerance: GAZE_TOLERANCE_RADIANS,
            activation_secs: GAZE_ACTIVATION_SECS,
            move_secs: GAZE_MOVE_SECS,
            fallback_delay_secs: GAZE_FALLBACK_DELAY_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GazeMode {
    #[default]
    Hidden,
    Gazing,
    Move,
}

/// Dwell state machine over the head orientation.
///
/// Holding the head still within the tolerance cone advances
/// `Hidden → Gazing → Move`; turning away resets the dwell.
#[derive(Resource, Debug, Default)]
pub struct GazeController {
    enabled: bool,
    mode: GazeMode,
    anchor: Option<Quat>,
    dwell: f32,
}

impl GazeController {
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn mode(&self) -> GazeMode {
        self.mode
    }

    /// Forget the dwell anchor; the next update starts over from `Hidden`.
    pub fn reset(&mut self) {
        self.mode = GazeMode::Hidden;
        self.anchor = None;
        self.dwell = 0.0;
    }

    pub fn update(&mut self, settings: &GazeSettings, dt: f32, head: Quat) -> GazeMode {
        if !self.enabled {
            self.reset();
            return self.mode;
        }

        let head = head.normalize();
        match self.anchor {
            Some(anchor) if anchor.angle_between(head) <= settings.tolerance => {
                self.dwell += dt.max(0.0);
            }
            _ => {
                self.anchor = Some(head);
                self.dwell = 0.0;
            }
        }

        self.mode = if self.dwell >= settings.move_secs {
            GazeMode::Move
        } else if self.dwell >= settings.activation_secs {
            GazeMode::Gazing
        } else {
            GazeMode::Hidden
        };
        self.mode
    }
}

/// Enables gaze navigation when no controller shows up in time.
#[derive(Resource, Debug)]
pub struct GazeFallback {
    timer: Timer,
    resolved: bool,
}

impl GazeFallback {
    pub fn new(delay_secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(delay_secs, TimerMode::Once),
            resolved: false,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }
}

impl Default for GazeFallback {
    fn default() -> Self {
        Self::new(GAZE_FALLBACK_DELAY_SECS)
    }
}

pub fn tick_gaze_fallback(
    time: Res<Time>,
    controllers: Res<XrControllers>,
    mut fallback: ResMut<GazeFallback>,
    mut gaze: ResMut<GazeController>,
) {
    if fallback.is_resolved() {
        return;
    }

    if controllers.any_connected() {
        fallback.resolved = true;
        debug!("Controller connected, gaze fallback cancelled");
        return;
    }

    fallback.timer.tick(time.delta());
    if fallback.timer.finished() {
        fallback.resolved = true;
        gaze.enable();
        info!("No controller connected, gaze navigation enabled");
    }
}

pub fn update_gaze(
    time: Res<Time>,
    settings: Res<GazeSettings>,
    mut gaze: ResMut<GazeController>,
    mut input: ResMut<InputSnapshot>,
) {
    let previous = gaze.mode();
    let mode = gaze.update(&settings, time.delta_secs(), input.head_orientation);
    if mode != previous {
        debug!("Gaze mode {:?} -> {:?}", previous, mode);
    }
    input.gaze_move = mode == GazeMode::Move;
}
