use bevy::prelude::*;
use constants::surface::{
    FLOOR_COLOUR, GLASS_COLOUR, GLASS_METALLIC, GLASS_OPACITY, GLASS_ROUGHNESS, STAIR_COLOUR,
    WALL_COLOUR, rgb_channels,
};

use crate::engine::assets::campus_manifest::SurfaceClass;

pub fn hex_colour(hex: u32) -> Color {
    let (r, g, b) = rgb_channels(hex);
    Color::srgb_u8(r, g, b)
}

fn flat_colour(hex: u32) -> StandardMaterial {
    StandardMaterial {
        base_color: hex_colour(hex),
        ..default()
    }
}

/// Replacement material for a classified mesh, `None` when the mesh keeps its own.
///
/// Sky boxes become unlit and keep only the base colour texture of `original`.
pub fn surface_material(
    class: SurfaceClass,
    original: Option<&StandardMaterial>,
) -> Option<StandardMaterial> {
    match class {
        SurfaceClass::Wall => Some(flat_colour(WALL_COLOUR)),
        SurfaceClass::Floor => Some(flat_colour(FLOOR_COLOUR)),
        SurfaceClass::Stair => Some(flat_colour(STAIR_COLOUR)),
        SurfaceClass::Glass => Some(StandardMaterial {
            base_color: hex_colour(GLASS_COLOUR).with_alpha(GLASS_OPACITY),
            alpha_mode: AlphaMode::Blend,
            perceptual_roughness: GLASS_ROUGHNESS,
            metallic: GLASS_METALLIC,
            ..default()
        }),
        SurfaceClass::SkyBox => Some(StandardMaterial {
            base_color_texture: original.and_then(|material| material.base_color_texture.clone()),
            unlit: true,
            ..default()
        }),
        SurfaceClass::CollisionProxy | SurfaceClass::Untouched => None,
    }
}
