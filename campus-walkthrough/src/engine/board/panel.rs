use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::camera::RenderTarget;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages};
use constants::board::{
    BOARD_HEADER_COLOUR, BOARD_HEADER_FONT_COLOUR, BOARD_INFO_BACKGROUND, BOARD_INFO_FONT_COLOUR,
    BOARD_INFO_FONT_SIZE, BOARD_NAME_FONT_SIZE, BOARD_NAME_HEIGHT, BOARD_PANEL_SIZE,
    BOARD_TEXTURE_SIZE,
};

use crate::engine::board::tracker::{BoardCommand, BoardSettings};
use crate::engine::input::snapshot::head_world_pose;
use crate::engine::navigation::rig::{Dolly, ViewerCamera};
use crate::engine::scene::materials::hex_colour;
use crate::rpc::web_rpc::WebRpcInterface;

/// The world-space quad showing the board texture.
#[derive(Component)]
pub struct InfoBoardPanel;

#[derive(Component)]
pub struct BoardNameText;

#[derive(Component)]
pub struct BoardInfoText;

/// Panel pose for an anchor: lifted above it, front face (+Z) towards the viewer.
pub fn board_placement(anchor_position: Vec3, vertical_offset: f32, head_position: Vec3) -> Transform {
    let position = anchor_position + Vec3::Y * vertical_offset;
    Transform::from_translation(position).looking_to(position - head_position, Vec3::Y)
}

fn board_render_target(images: &mut Assets<Image>) -> Handle<Image> {
    let (width, height) = BOARD_TEXTURE_SIZE;
    let size = Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };

    let mut image = Image::new_fill(
        size,
        TextureDimension::D2,
        &[0, 0, 0, 0],
        TextureFormat::Bgra8UnormSrgb,
        RenderAssetUsages::default(),
    );
    image.texture_descriptor.usage =
        TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST | TextureUsages::RENDER_ATTACHMENT;

    images.add(image)
}

/// UI tree rendered into a texture, mapped onto a hidden quad.
pub fn spawn_info_board(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let texture = board_render_target(&mut images);

    let ui_camera = commands
        .spawn((
            Name::new("InfoBoardCamera"),
            Camera2d,
            Camera {
                target: RenderTarget::Image(texture.clone().into()),
                order: -1,
                clear_color: ClearColorConfig::Custom(hex_colour(BOARD_INFO_BACKGROUND)),
                ..default()
            },
        ))
        .id();

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            UiTargetCamera(ui_camera),
        ))
        .with_children(|board| {
            board
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(BOARD_NAME_HEIGHT),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(hex_colour(BOARD_HEADER_COLOUR)),
                ))
                .with_children(|header| {
                    header.spawn((
                        Text::new(""),
                        TextFont {
                            font_size: BOARD_NAME_FONT_SIZE,
                            ..default()
                        },
                        TextColor(hex_colour(BOARD_HEADER_FONT_COLOUR)),
                        BoardNameText,
                    ));
                });

            board
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        flex_grow: 1.0,
                        padding: UiRect::all(Val::Px(12.0)),
                        ..default()
                    },
                    BackgroundColor(hex_colour(BOARD_INFO_BACKGROUND)),
                ))
                .with_children(|body| {
                    body.spawn((
                        Text::new(""),
                        TextFont {
                            font_size: BOARD_INFO_FONT_SIZE,
                            ..default()
                        },
                        TextColor(hex_colour(BOARD_INFO_FONT_COLOUR)),
                        BoardInfoText,
                    ));
                });
        });

    let (width, height) = BOARD_PANEL_SIZE;
    commands.spawn((
        Name::new("InfoBoard"),
        InfoBoardPanel,
        Mesh3d(meshes.add(Rectangle::new(width, height))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(texture),
            unlit: true,
            alpha_mode: AlphaMode::Blend,
            cull_mode: None,
            ..default()
        })),
        Transform::default(),
        Visibility::Hidden,
    ));
}

pub fn apply_board_command(
    mut board_commands: EventReader<BoardCommand>,
    settings: Res<BoardSettings>,
    rig_query: Query<&Transform, (With<Dolly>, Without<InfoBoardPanel>)>,
    camera_query: Query<&Transform, (With<ViewerCamera>, Without<InfoBoardPanel>)>,
    mut panel_query: Query<(&mut Transform, &mut Visibility), With<InfoBoardPanel>>,
    mut name_text: Query<&mut Text, (With<BoardNameText>, Without<BoardInfoText>)>,
    mut info_text: Query<&mut Text, (With<BoardInfoText>, Without<BoardNameText>)>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Ok((mut transform, mut visibility)) = panel_query.single_mut() else {
        board_commands.clear();
        return;
    };

    // Head pose after this frame's dolly step.
    let head_position = match (rig_query.single(), camera_query.single()) {
        (Ok(rig), Ok(camera)) => Some(head_world_pose(rig, camera).1),
        _ => None,
    };

    for command in board_commands.read() {
        match command {
            BoardCommand::Keep => {}
            BoardCommand::Show {
                anchor,
                display_name,
                info,
                anchor_position,
            } => {
                if let Ok(mut text) = name_text.single_mut() {
                    text.0.clone_from(display_name);
                }
                if let Ok(mut text) = info_text.single_mut() {
                    text.0.clone_from(info);
                }
                *transform = match head_position {
                    Some(head) => board_placement(*anchor_position, settings.vertical_offset, head),
                    None => Transform::from_translation(
                        *anchor_position + Vec3::Y * settings.vertical_offset,
                    ),
                };
                visibility.set_if_neq(Visibility::Visible);

                info!("Showing infoboard '{}'", anchor);
                rpc_interface.send_notification(
                    "board_changed",
                    serde_json::json!({
                        "shown": anchor,
                        "name": display_name,
                        "info": info,
                    }),
                );
            }
            BoardCommand::Hide => {
                if visibility.set_if_neq(Visibility::Hidden) {
                    debug!("Infoboard hidden");
                    rpc_interface
                        .send_notification("board_changed", serde_json::json!({ "shown": null }));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_sits_above_anchor() {
        let transform = board_placement(Vec3::new(4.0, 0.5, -2.0), 1.3, Vec3::new(4.0, 1.6, 3.0));
        assert!((transform.translation - Vec3::new(4.0, 1.8, -2.0)).length() < 1e-5);
    }

    #[test]
    fn panel_front_faces_viewer() {
        let anchor = Vec3::new(-3.0, 0.0, 2.0);
        let head = Vec3::new(1.0, 1.6, -1.0);
        let transform = board_placement(anchor, 1.3, head);

        let front = transform.rotation * Vec3::Z;
        let to_head = (head - transform.translation).normalize();
        assert!(front.dot(to_head) > 0.999);
    }

    #[test]
    fn shown_board_faces_the_moved_rig() {
        let mut app = App::new();
        app.init_resource::<BoardSettings>()
            .init_resource::<WebRpcInterface>()
            .add_event::<BoardCommand>()
            .add_systems(Update, apply_board_command);

        let rig_position = Vec3::new(0.0, 0.0, -2.0);
        app.world_mut()
            .spawn((Dolly, Transform::from_translation(rig_position)));
        app.world_mut()
            .spawn((ViewerCamera, Transform::from_xyz(0.0, 1.6, 0.0)));
        let panel = app
            .world_mut()
            .spawn((InfoBoardPanel, Transform::default(), Visibility::Hidden))
            .id();

        app.world_mut().send_event(BoardCommand::Show {
            anchor: "Lobby".to_string(),
            display_name: "Lobby".to_string(),
            info: "Welcome".to_string(),
            anchor_position: Vec3::new(2.0, 0.0, -2.0),
        });
        app.update();

        let world = app.world();
        assert_eq!(world.get::<Visibility>(panel), Some(&Visibility::Visible));
        let transform = world.get::<Transform>(panel).copied().unwrap_or_default();
        let head = rig_position + Vec3::Y * 1.6;
        let to_head = (head - transform.translation).normalize();
        assert!((transform.rotation * Vec3::Z).dot(to_head) > 0.999);
    }

    #[test]
    fn panel_stays_upright() {
        let transform = board_placement(Vec3::ZERO, 1.3, Vec3::new(0.0, 1.3, 5.0));
        let up = transform.rotation * Vec3::Y;
        assert!((up - Vec3::Y).length() < 1e-5);
    }
}
