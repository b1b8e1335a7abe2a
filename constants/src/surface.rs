/// Name substrings used to classify campus meshes at load time
pub const WALL_MARKER: &str = "Wall";
pub const FLOOR_MARKER: &str = "Floor";
pub const STAIR_MARKER: &str = "Stair";
pub const GLASS_MARKER: &str = "Glass";
pub const SKYBOX_MARKER: &str = "SkyBox";

/// Replacement surface colours (0xRRGGBB)
pub const WALL_COLOUR: u32 = 0xadd8e6;
pub const FLOOR_COLOUR: u32 = 0xdddddd;
pub const STAIR_COLOUR: u32 = 0xcd853f;
pub const GLASS_COLOUR: u32 = 0x222222;

/// Glass material parameters
pub const GLASS_OPACITY: f32 = 0.25;
pub const GLASS_ROUGHNESS: f32 = 0.1;
pub const GLASS_METALLIC: f32 = 0.1;

/// Split a 0xRRGGBB constant into its byte channels.
pub const fn rgb_channels(hex: u32) -> (u8, u8, u8) {
    (
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
    )
}
