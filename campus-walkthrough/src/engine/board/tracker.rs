use bevy::prelude::*;
use constants::board::{BOARD_VERTICAL_OFFSET, PROXIMITY_THRESHOLD};

use crate::engine::assets::anchor_registry::{AnchorInfo, AnchorRegistry};
use crate::engine::assets::campus_manifest::AnchorIndex;
use crate::engine::core::session::WalkthroughSession;
use crate::engine::navigation::rig::Dolly;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct BoardSettings {
    pub proximity_threshold: f32,
    pub vertical_offset: f32,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            proximity_threshold: PROXIMITY_THRESHOLD,
            vertical_offset: BOARD_VERTICAL_OFFSET,
        }
    }
}

/// Which anchor's board is on screen, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    currently_shown: Option<String>,
}

impl BoardState {
    pub fn currently_shown(&self) -> Option<&str> {
        self.currently_shown.as_deref()
    }
}

/// What the single infoboard panel should do this frame.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum BoardCommand {
    Keep,
    Show {
        anchor: String,
        display_name: String,
        info: String,
        anchor_position: Vec3,
    },
    Hide,
}

/// A registry anchor that exists in the live scene.
#[derive(Debug, Clone, Copy)]
pub struct PlacedAnchor<'a> {
    pub key: &'a str,
    pub info: &'a AnchorInfo,
    pub position: Vec3,
}

/// Decide the board for this frame. `anchors` must be in registry order.
///
/// The shown anchor is kept while it stays in range even if an earlier one
/// also is; otherwise the first anchor in range takes over.
pub fn update(
    settings: &BoardSettings,
    rig_position: Vec3,
    anchors: &[PlacedAnchor],
    state: &mut BoardState,
) -> BoardCommand {
    let in_range =
        |anchor: &PlacedAnchor| rig_position.distance(anchor.position) < settings.proximity_threshold;

    if let Some(shown) = state.currently_shown.as_deref() {
        if anchors.iter().any(|anchor| anchor.key == shown && in_range(anchor)) {
            return BoardCommand::Keep;
        }
    }

    match anchors.iter().find(|anchor| in_range(anchor)) {
        Some(anchor) => {
            state.currently_shown = Some(anchor.key.to_string());
            BoardCommand::Show {
                anchor: anchor.key.to_string(),
                display_name: anchor.info.name.clone(),
                info: anchor.info.info.clone(),
                anchor_position: anchor.position,
            }
        }
        None => {
            state.currently_shown = None;
            BoardCommand::Hide
        }
    }
}

pub fn track_boards(
    settings: Res<BoardSettings>,
    registry: Res<AnchorRegistry>,
    index: Res<AnchorIndex>,
    rig_query: Query<&Transform, With<Dolly>>,
    anchor_transforms: Query<&GlobalTransform>,
    mut session: ResMut<WalkthroughSession>,
    mut board_commands: EventWriter<BoardCommand>,
) {
    let Ok(rig) = rig_query.single() else {
        return;
    };

    let placed: Vec<PlacedAnchor> = registry
        .iter()
        .filter_map(|(key, info)| {
            let entity = index.get(key)?;
            let transform = anchor_transforms.get(entity).ok()?;
            Some(PlacedAnchor {
                key,
                info,
                position: transform.translation(),
            })
        })
        .collect();

    let command = update(&settings, rig.translation, &placed, &mut session.board);
    board_commands.write(command);
}
