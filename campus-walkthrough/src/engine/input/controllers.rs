use bevy::prelude::*;
use serde::Deserialize;

/// Number of tracked hand controllers.
pub const CONTROLLER_SLOTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerEventKind {
    SelectStart,
    SelectEnd,
    Connected,
    Disconnected,
}

/// Select or connection change reported for one controller slot.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ControllerEvent {
    pub index: usize,
    #[serde(rename = "event")]
    pub kind: ControllerEventKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerSlot {
    pub connected: bool,
    pub select_pressed: bool,
}

#[derive(Resource, Debug, Default)]
pub struct XrControllers {
    slots: [ControllerSlot; CONTROLLER_SLOTS],
}

impl XrControllers {
    /// Apply one event. Returns false when the slot index is out of range.
    pub fn apply(&mut self, event: ControllerEvent) -> bool {
        let Some(slot) = self.slots.get_mut(event.index) else {
            return false;
        };

        match event.kind {
            ControllerEventKind::SelectStart => slot.select_pressed = true,
            ControllerEventKind::SelectEnd => slot.select_pressed = false,
            ControllerEventKind::Connected => slot.connected = true,
            ControllerEventKind::Disconnected => *slot = ControllerSlot::default(),
        }
        true
    }

    /// Any controller is holding select.
    pub fn activate(&self) -> bool {
        self.slots.iter().any(|slot| slot.select_pressed)
    }

    pub fn any_connected(&self) -> bool {
        self.slots.iter().any(|slot| slot.connected)
    }

    pub fn release_all(&mut self) {
        for slot in &mut self.slots {
            slot.select_pressed = false;
        }
    }
}

pub fn apply_controller_events(
    mut events: EventReader<ControllerEvent>,
    mut controllers: ResMut<XrControllers>,
) {
    for event in events.read() {
        if !controllers.apply(*event) {
            warn!("Ignoring event for unknown controller {}", event.index);
            continue;
        }
        if matches!(
            event.kind,
            ControllerEventKind::Connected | ControllerEventKind::Disconnected
        ) {
            info!("Controller {} {:?}", event.index, event.kind);
        }
    }
}

/// The desktop pointer stands in for controller 0 on native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn connect_desktop_controller(mut events: EventWriter<ControllerEvent>) {
    events.write(ControllerEvent {
        index: 0,
        kind: ControllerEventKind::Connected,
    });
}

/// Left mouse button or Space act as the select trigger of controller 0.
pub fn desktop_select_input(
    #[cfg(not(target_arch = "wasm32"))] mouse_button: Res<ButtonInput<MouseButton>>,
    #[cfg(not(target_arch = "wasm32"))] keyboard: Res<ButtonInput<KeyCode>>,
    #[cfg(not(target_arch = "wasm32"))] mut events: EventWriter<ControllerEvent>,
) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let pressed = mouse_button.just_pressed(MouseButton::Left)
            || keyboard.just_pressed(KeyCode::Space);
        let held = mouse_button.pressed(MouseButton::Left) || keyboard.pressed(KeyCode::Space);

        if pressed {
            events.write(ControllerEvent {
                index: 0,
                kind: ControllerEventKind::SelectStart,
            });
        } else if !held
            && (mouse_button.just_released(MouseButton::Left)
                || keyboard.just_released(KeyCode::Space))
        {
            events.write(ControllerEvent {
                index: 0,
                kind: ControllerEventKind::SelectEnd,
            });
        }
    }
}
