/// Anchors closer than this to the rig show their infoboard
pub const PROXIMITY_THRESHOLD: f32 = 3.0;

/// Vertical offset of the panel centre above its anchor
pub const BOARD_VERTICAL_OFFSET: f32 = 1.3;

/// World size of the panel quad (width, height)
pub const BOARD_PANEL_SIZE: (f32, f32) = (1.0, 0.5);

/// Pixel size of the texture the panel UI is rendered into
pub const BOARD_TEXTURE_SIZE: (u32, u32) = (512, 256);

/// Header row: font size and height in texture pixels
pub const BOARD_NAME_FONT_SIZE: f32 = 50.0;
pub const BOARD_NAME_HEIGHT: f32 = 70.0;

/// Body text font size in texture pixels
pub const BOARD_INFO_FONT_SIZE: f32 = 24.0;

/// Panel colours (0xRRGGBB)
pub const BOARD_HEADER_COLOUR: u32 = 0x000000;
pub const BOARD_HEADER_FONT_COLOUR: u32 = 0xffffff;
pub const BOARD_INFO_BACKGROUND: u32 = 0xcccccc;
pub const BOARD_INFO_FONT_COLOUR: u32 = 0x000000;

/// Anchors synthesised at load time as the midpoint of two scene nodes
pub struct DerivedAnchor {
    pub name: &'static str,
    pub between: [&'static str; 2],
}

pub const DERIVED_ANCHORS: &[DerivedAnchor] = &[DerivedAnchor {
    name: "LobbyShop",
    between: ["LobbyShop_Door__1_", "LobbyShop_Door__2_"],
}];
