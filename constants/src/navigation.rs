/// Minimum distance kept between the viewer and any proxy surface
pub const WALL_CLEARANCE: f32 = 1.3;

/// Forward walking speed while the activate signal is held
pub const WALK_SPEED: f32 = 2.0;

/// Height of the wall-collision rays above the rig's floor contact point
pub const RAY_HEIGHT: f32 = 1.0;

/// Height above the rig's floor contact point the downward floor-follow ray starts from
pub const FLOOR_RAY_LIFT: f32 = 1.5;

/// Side penetrations below this depth are treated as touching, not penetrating
pub const CONTACT_TOLERANCE: f32 = 1.0e-4;

/// Substring marking the mesh node used as the navigation collision surface
pub const COLLISION_PROXY_MARKER: &str = "PROXY";
