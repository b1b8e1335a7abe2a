use bevy::prelude::*;
use constants::navigation::{
    CONTACT_TOLERANCE, FLOOR_RAY_LIFT, RAY_HEIGHT, WALK_SPEED, WALL_CLEARANCE,
};

use crate::engine::navigation::spatial_query::SpatialQuery;

/// Tuning for the dolly controller.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct NavigationSettings {
    pub wall_clearance: f32,
    pub walk_speed: f32,
    pub ray_height: f32,
    pub floor_ray_lift: f32,
    pub contact_tolerance: f32,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            wall_clearance: WALL_CLEARANCE,
            walk_speed: WALK_SPEED,
            ray_height: RAY_HEIGHT,
            floor_ray_lift: FLOOR_RAY_LIFT,
            contact_tolerance: CONTACT_TOLERANCE,
        }
    }
}

/// Outcome of one navigation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DollyStep {
    pub transform: Transform,
    /// The rig moved forward this step (footstep cue).
    pub advanced: bool,
    /// A wall inside the clearance was straight ahead.
    pub blocked: bool,
    /// Push-back distance from the left and right walls.
    pub side_corrections: [f32; 2],
    /// Height the rig was snapped to, if the floor ray hit.
    pub floor_height: Option<f32>,
}

impl DollyStep {
    fn unchanged(transform: Transform) -> Self {
        Self {
            transform,
            advanced: false,
            blocked: false,
            side_corrections: [0.0; 2],
            floor_height: None,
        }
    }
}

/// Advance the rig one frame against the collision proxy.
///
/// The head orientation stands in for the rig orientation while the rays are
/// cast, so the viewer walks where they look. The rig's own rotation is
/// returned untouched. Without a proxy the rig does not move.
pub fn advance<Q: SpatialQuery + ?Sized>(
    settings: &NavigationSettings,
    dt: f32,
    rig: Transform,
    head_orientation: Quat,
    proxy: Option<&Q>,
) -> DollyStep {
    let Some(proxy) = proxy else {
        return DollyStep::unchanged(rig);
    };

    let dt = dt.max(0.0);
    let saved_rotation = rig.rotation;
    let mut rig = rig;
    rig.rotation = head_orientation.normalize();

    let lift = Vec3::Y * settings.ray_height;
    let mut origin = rig.translation + lift;

    let forward = rig.forward();
    let ahead = proxy.cast_ray(Ray3d::new(origin, forward));
    let blocked = ahead.is_some_and(|hit| hit.distance < settings.wall_clearance);

    let mut advanced = false;
    if !blocked {
        let mut step = dt * settings.walk_speed;
        if let Some(hit) = ahead {
            // Never step past the clearance line of the wall ahead.
            step = step.min(hit.distance - settings.wall_clearance);
        }
        if step > 0.0 {
            rig.translation += *forward * step;
            origin = rig.translation + lift;
            advanced = true;
        }
    }

    // Both sides are cast from the same origin, left first.
    let mut side_corrections = [0.0; 2];
    for (slot, side) in [rig.left(), rig.right()].into_iter().enumerate() {
        let Some(hit) = proxy.cast_ray(Ray3d::new(origin, side)) else {
            continue;
        };
        let penetration = settings.wall_clearance - hit.distance;
        if penetration > settings.contact_tolerance {
            rig.translation -= *side * penetration;
            side_corrections[slot] = penetration;
        }
    }

    let floor_origin = rig.translation + Vec3::Y * settings.floor_ray_lift;
    let floor_height = proxy
        .cast_ray(Ray3d::new(floor_origin, Dir3::NEG_Y))
        .map(|hit| hit.point.y);
    if let Some(height) = floor_height {
        rig.translation.y = height;
    }

    rig.rotation = saved_rotation;

    DollyStep {
        transform: rig,
        advanced,
        blocked,
        side_corrections,
        floor_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::navigation::spatial_query::CollisionProxy;
    use crate::engine::navigation::spatial_query::tests::{floor, quad};

    const EPS: f32 = 1e-5;

    /// Corridor along -Z: floor at y=0, walls at x=±half_width, end wall at z=-end.
    fn corridor(half_width: f32, end: f32) -> CollisionProxy {
        let w = half_width;
        let h = 3.0;
        let mut triangles = Vec::new();
        triangles.extend(quad(
            Vec3::new(-w, 0.0, 20.0),
            Vec3::new(w, 0.0, 20.0),
            Vec3::new(w, 0.0, -end),
            Vec3::new(-w, 0.0, -end),
        ));
        triangles.extend(quad(
            Vec3::new(-w, 0.0, 20.0),
            Vec3::new(-w, h, 20.0),
            Vec3::new(-w, h, -end),
            Vec3::new(-w, 0.0, -end),
        ));
        triangles.extend(quad(
            Vec3::new(w, 0.0, 20.0),
            Vec3::new(w, h, 20.0),
            Vec3::new(w, h, -end),
            Vec3::new(w, 0.0, -end),
        ));
        triangles.extend(quad(
            Vec3::new(-w, 0.0, -end),
            Vec3::new(w, 0.0, -end),
            Vec3::new(w, h, -end),
            Vec3::new(-w, h, -end),
        ));
        CollisionProxy::from_triangles(triangles)
    }

    /// Wall across the path at z = -distance, wide enough that no side ray reaches anything.
    fn wall_ahead(distance: f32) -> CollisionProxy {
        let mut triangles = floor(0.0, 50.0).to_vec();
        triangles.extend(quad(
            Vec3::new(-20.0, 0.0, -distance),
            Vec3::new(20.0, 0.0, -distance),
            Vec3::new(20.0, 4.0, -distance),
            Vec3::new(-20.0, 4.0, -distance),
        ));
        CollisionProxy::from_triangles(triangles)
    }

    #[test]
    fn corridor_step_moves_forward_without_side_correction() {
        let settings = NavigationSettings::default();
        let proxy = corridor(1.3, 5.0);

        let step = advance(&settings, 0.1, Transform::IDENTITY, Quat::IDENTITY, Some(&proxy));

        assert!(step.advanced);
        assert!(!step.blocked);
        assert!((step.transform.translation.z - -0.2).abs() < EPS);
        assert_eq!(step.transform.translation.x, 0.0);
        assert_eq!(step.side_corrections, [0.0, 0.0]);
    }

    #[test]
    fn missing_proxy_leaves_rig_unchanged() {
        let settings = NavigationSettings::default();
        let rig = Transform::from_xyz(1.0, 0.0, 10.0);

        let step = advance::<CollisionProxy>(&settings, 0.5, rig, Quat::IDENTITY, None);

        assert_eq!(step.transform, rig);
        assert!(!step.advanced);
    }

    #[test]
    fn wall_inside_clearance_blocks_forward_motion() {
        let settings = NavigationSettings::default();
        let proxy = wall_ahead(1.0);

        let step = advance(&settings, 0.1, Transform::IDENTITY, Quat::IDENTITY, Some(&proxy));

        assert!(step.blocked);
        assert!(!step.advanced);
        assert!(step.transform.translation.z.abs() < EPS);
    }

    #[test]
    fn approach_never_ends_inside_wall_clearance() {
        let settings = NavigationSettings::default();
        let wall_z = -2.0;
        let proxy = wall_ahead(-wall_z);
        let mut rig = Transform::IDENTITY;

        for _ in 0..40 {
            rig = advance(&settings, 0.1, rig, Quat::IDENTITY, Some(&proxy)).transform;
            let distance = rig.translation.z - wall_z;
            assert!(distance >= settings.wall_clearance - EPS, "distance {distance}");
        }
        assert!((rig.translation.z - wall_z - settings.wall_clearance).abs() < EPS);
    }

    #[test]
    fn flat_floor_is_followed_at_its_height() {
        let settings = NavigationSettings::default();
        let height = 0.75;
        let proxy = CollisionProxy::from_triangles(floor(height, 100.0).to_vec());
        let mut rig = Transform::from_xyz(0.1, height, 0.3);

        for _ in 0..25 {
            let step = advance(&settings, 0.05, rig, Quat::IDENTITY, Some(&proxy));
            rig = step.transform;
            assert!((rig.translation.y - height).abs() < EPS);
        }
        assert!(rig.translation.z < 0.3);
    }

    #[test]
    fn rig_climbs_onto_a_step() {
        let settings = NavigationSettings::default();
        let mut triangles = floor(0.0, 50.0).to_vec();
        triangles.extend(quad(
            Vec3::new(-5.0, 0.2, -0.1),
            Vec3::new(5.0, 0.2, -0.1),
            Vec3::new(5.0, 0.2, -5.0),
            Vec3::new(-5.0, 0.2, -5.0),
        ));
        let proxy = CollisionProxy::from_triangles(triangles);

        let step = advance(&settings, 0.1, Transform::IDENTITY, Quat::IDENTITY, Some(&proxy));

        assert_eq!(step.floor_height.map(|h| (h - 0.2).abs() < EPS), Some(true));
        assert!((step.transform.translation.y - 0.2).abs() < EPS);
    }

    #[test]
    fn walking_under_an_overhang_stays_on_the_floor() {
        let settings = NavigationSettings::default();
        let mut triangles = floor(0.0, 50.0).to_vec();
        // Underside of a stair flight, above head height but below the floor ray lift.
        triangles.extend(quad(
            Vec3::new(-5.0, 2.0, -0.1),
            Vec3::new(5.0, 2.0, -0.1),
            Vec3::new(5.0, 2.0, -5.0),
            Vec3::new(-5.0, 2.0, -5.0),
        ));
        let proxy = CollisionProxy::from_triangles(triangles);

        let step = advance(&settings, 0.1, Transform::IDENTITY, Quat::IDENTITY, Some(&proxy));

        assert!(step.advanced);
        assert!((step.transform.translation.z - -0.2).abs() < EPS);
        assert_eq!(step.floor_height.map(|h| h.abs() < EPS), Some(true));
        assert!(step.transform.translation.y.abs() < EPS);
    }

    #[test]
    fn narrow_corridor_corrects_both_sides_symmetrically() {
        let settings = NavigationSettings::default();
        let proxy = corridor(1.0, 40.0);

        let step = advance(&settings, 0.0, Transform::IDENTITY, Quat::IDENTITY, Some(&proxy));

        assert!((step.side_corrections[0] - 0.3).abs() < EPS);
        assert!((step.side_corrections[1] - 0.3).abs() < EPS);
        assert!(step.transform.translation.x.abs() < EPS);
    }

    #[test]
    fn off_centre_rig_is_pushed_away_from_near_wall() {
        let settings = NavigationSettings::default();
        let proxy = corridor(2.0, 40.0);
        let rig = Transform::from_xyz(1.2, 0.0, 0.0);

        let step = advance(&settings, 0.0, rig, Quat::IDENTITY, Some(&proxy));

        // Right wall 0.8 away: pushed left until exactly at the clearance.
        assert_eq!(step.side_corrections[0], 0.0);
        assert!((step.side_corrections[1] - 0.5).abs() < EPS);
        assert!((step.transform.translation.x - 0.7).abs() < EPS);
    }

    #[test]
    fn head_orientation_steers_but_rig_rotation_is_restored() {
        let settings = NavigationSettings::default();
        let proxy = CollisionProxy::from_triangles(floor(0.0, 100.0).to_vec());
        let rig = Transform::from_xyz(0.0, 0.0, 0.0);
        let look_left = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);

        let step = advance(&settings, 0.5, rig, look_left, Some(&proxy));

        // Facing -X after a quarter turn to the left.
        assert!((step.transform.translation.x - -1.0).abs() < EPS);
        assert!(step.transform.translation.z.abs() < EPS);
        assert_eq!(step.transform.rotation, Quat::IDENTITY);
    }

    #[test]
    fn negative_dt_is_treated_as_zero() {
        let settings = NavigationSettings::default();
        let proxy = CollisionProxy::from_triangles(floor(0.0, 100.0).to_vec());
        let rig = Transform::from_xyz(0.2, 0.0, 0.4);

        let step = advance(&settings, -1.0, rig, Quat::IDENTITY, Some(&proxy));

        assert!(!step.advanced);
        assert!((step.transform.translation - rig.translation).length() < EPS);
    }
}
