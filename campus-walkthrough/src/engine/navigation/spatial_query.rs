use bevy::prelude::*;
use bevy::render::mesh::{PrimitiveTopology, VertexAttributeValues};

use crate::error::WalkthroughError;

/// Padding applied to the proxy bounds so flat proxies still have volume.
const BOUNDS_PADDING: f32 = 1.0e-3;

/// Nearest intersection of a ray with the navigation surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub point: Vec3,
}

/// Ray queries against static navigation geometry.
///
/// A miss (`None`) means the direction imposes no constraint.
pub trait SpatialQuery {
    fn cast_ray(&self, ray: Ray3d) -> Option<RayHit>;
}

/// World-space triangle soup of the collision proxy mesh.
///
/// Built once after the campus scene is classified and never mutated
/// afterwards. Triangles are tested double-sided.
#[derive(Resource, Debug, Clone, Default)]
pub struct CollisionProxy {
    triangles: Vec<[Vec3; 3]>,
    min: Vec3,
    max: Vec3,
}

impl CollisionProxy {
    pub fn from_triangles(triangles: Vec<[Vec3; 3]>) -> Self {
        let (min, max) = triangles.iter().flatten().fold(
            (Vec3::INFINITY, Vec3::NEG_INFINITY),
            |(min, max), vertex| (min.min(*vertex), max.max(*vertex)),
        );
        Self {
            triangles,
            min: min - Vec3::splat(BOUNDS_PADDING),
            max: max + Vec3::splat(BOUNDS_PADDING),
        }
    }

    /// Extract world-space triangles from a loaded mesh asset.
    pub fn from_mesh(
        name: &str,
        mesh: &Mesh,
        transform: &GlobalTransform,
    ) -> Result<Self, WalkthroughError> {
        if mesh.primitive_topology() != PrimitiveTopology::TriangleList {
            return Err(WalkthroughError::ProxyNotTriangles(name.to_string()));
        }

        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            return Err(WalkthroughError::ProxyWithoutPositions(name.to_string()));
        };

        let world: Vec<Vec3> = positions
            .iter()
            .map(|position| transform.transform_point(Vec3::from_array(*position)))
            .collect();

        let triangles = match mesh.indices() {
            Some(indices) => {
                let indices: Vec<usize> = indices.iter().collect();
                indices
                    .chunks_exact(3)
                    .filter_map(|tri| {
                        Some([*world.get(tri[0])?, *world.get(tri[1])?, *world.get(tri[2])?])
                    })
                    .collect()
            }
            None => world
                .chunks_exact(3)
                .map(|tri| [tri[0], tri[1], tri[2]])
                .collect(),
        };

        Ok(Self::from_triangles(triangles))
    }

    /// Fold another proxy primitive into this one.
    pub fn merge(self, other: CollisionProxy) -> Self {
        let mut triangles = self.triangles;
        triangles.extend(other.triangles);
        Self::from_triangles(triangles)
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

impl SpatialQuery for CollisionProxy {
    fn cast_ray(&self, ray: Ray3d) -> Option<RayHit> {
        let direction = *ray.direction;

        // Broad phase against the whole proxy before touching triangles.
        ray_aabb_hit_t(ray.origin, direction, self.min, self.max)?;

        let distance = self
            .triangles
            .iter()
            .filter_map(|triangle| ray_triangle_hit_t(ray.origin, direction, triangle))
            .min_by(|a, b| a.total_cmp(b))?;

        Some(RayHit {
            distance,
            point: ray.get_point(distance),
        })
    }
}

// Slab-method ray–AABB intersection, returns Some(t) or None
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = Vec3::new(
        if ray_direction.x != 0.0 { 1.0 / ray_direction.x } else { f32::INFINITY },
        if ray_direction.y != 0.0 { 1.0 / ray_direction.y } else { f32::INFINITY },
        if ray_direction.z != 0.0 { 1.0 / ray_direction.z } else { f32::INFINITY },
    );

    let (mut tmin, mut tmax) = ((min.x - ray_origin.x) * inv.x, (max.x - ray_origin.x) * inv.x);
    if tmin > tmax { std::mem::swap(&mut tmin, &mut tmax); }

    let (mut tymin, mut tymax) = ((min.y - ray_origin.y) * inv.y, (max.y - ray_origin.y) * inv.y);
    if tymin > tymax { std::mem::swap(&mut tymin, &mut tymax); }

    if (tmin > tymax) || (tymin > tmax) { return None; }
    if tymin > tmin { tmin = tymin; }
    if tymax < tmax { tmax = tymax; }

    let (mut tzmin, mut tzmax) = ((min.z - ray_origin.z) * inv.z, (max.z - ray_origin.z) * inv.z);
    if tzmin > tzmax { std::mem::swap(&mut tzmin, &mut tzmax); }

    if (tmin > tzmax) || (tzmin > tmax) { return None; }
    if tzmin > tmin { tmin = tzmin; }
    if tzmax < tmax { tmax = tzmax; }

    if tmax < 0.0 { return None; }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

// Möller–Trumbore, double sided. Shared edges may report twice; callers take the minimum.
pub fn ray_triangle_hit_t(origin: Vec3, direction: Vec3, triangle: &[Vec3; 3]) -> Option<f32> {
    const PARALLEL_EPSILON: f32 = 1.0e-9;
    const EDGE_SLACK: f32 = 1.0e-6;
    const MIN_DISTANCE: f32 = 1.0e-6;

    let [a, b, c] = *triangle;
    let edge1 = b - a;
    let edge2 = c - a;

    let p = direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let s = origin - a;
    let u = s.dot(p) * inv_det;
    if u < -EDGE_SLACK || u > 1.0 + EDGE_SLACK {
        return None;
    }

    let q = s.cross(edge1);
    let v = direction.dot(q) * inv_det;
    if v < -EDGE_SLACK || u + v > 1.0 + EDGE_SLACK {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t > MIN_DISTANCE).then_some(t)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Two triangles covering the quad a-b-c-d (diagonal a-c).
    pub(crate) fn quad(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> [[Vec3; 3]; 2] {
        [[a, b, c], [a, c, d]]
    }

    pub(crate) fn floor(y: f32, half_extent: f32) -> [[Vec3; 3]; 2] {
        let e = half_extent;
        quad(
            Vec3::new(-e, y, -e),
            Vec3::new(e, y, -e),
            Vec3::new(e, y, e),
            Vec3::new(-e, y, e),
        )
    }

    fn ray(origin: Vec3, direction: Vec3) -> Ray3d {
        Ray3d::new(origin, Dir3::new(direction).unwrap())
    }

    #[test]
    fn hits_floor_below() {
        let proxy = CollisionProxy::from_triangles(floor(0.0, 10.0).to_vec());
        let hit = proxy
            .cast_ray(ray(Vec3::new(0.3, 2.5, -0.7), Vec3::NEG_Y))
            .expect("floor hit");

        assert!((hit.distance - 2.5).abs() < 1e-5);
        assert!(hit.point.y.abs() < 1e-5);
    }

    #[test]
    fn parallel_ray_misses_floor() {
        let proxy = CollisionProxy::from_triangles(floor(0.0, 10.0).to_vec());
        assert!(proxy.cast_ray(ray(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z)).is_none());
    }

    #[test]
    fn ray_pointing_away_misses() {
        let proxy = CollisionProxy::from_triangles(floor(0.0, 10.0).to_vec());
        assert!(proxy.cast_ray(ray(Vec3::new(0.0, 1.0, 0.0), Vec3::Y)).is_none());
    }

    #[test]
    fn nearest_of_stacked_surfaces_wins() {
        let mut triangles = floor(0.0, 10.0).to_vec();
        triangles.extend(floor(1.0, 10.0));
        let proxy = CollisionProxy::from_triangles(triangles);

        let hit = proxy
            .cast_ray(ray(Vec3::new(0.2, 3.0, 0.4), Vec3::NEG_Y))
            .expect("upper floor hit");
        assert!((hit.point.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn empty_proxy_never_hits() {
        let proxy = CollisionProxy::default();
        assert!(proxy.is_empty());
        assert!(proxy.cast_ray(ray(Vec3::ZERO, Vec3::NEG_Y)).is_none());
    }

    #[test]
    fn merged_proxy_keeps_all_triangles() {
        let lower = CollisionProxy::from_triangles(floor(0.0, 5.0).to_vec());
        let upper = CollisionProxy::from_triangles(floor(4.0, 5.0).to_vec());
        let merged = lower.merge(upper);

        assert_eq!(merged.triangle_count(), 4);
        let hit = merged
            .cast_ray(ray(Vec3::new(0.1, 2.0, 0.3), Vec3::Y))
            .expect("ceiling hit");
        assert!((hit.distance - 2.0).abs() < 1e-5);
    }

    #[test]
    fn slab_test_reports_exit_when_inside() {
        let t = ray_aabb_hit_t(Vec3::ZERO, Vec3::X, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(t, Some(1.0));
    }

    #[test]
    fn mesh_extraction_applies_world_transform() {
        use bevy::asset::RenderAssetUsages;
        use bevy::render::mesh::Indices;

        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
        mesh.insert_attribute(
            Mesh::ATTRIBUTE_POSITION,
            vec![[-1.0, 0.0, -1.0], [1.0, 0.0, -1.0], [1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]],
        );
        mesh.insert_indices(Indices::U32(vec![0, 1, 2, 0, 2, 3]));

        let transform = GlobalTransform::from(Transform::from_xyz(0.0, 2.0, 0.0));
        let proxy = CollisionProxy::from_mesh("Floor_PROXY", &mesh, &transform).unwrap();

        assert_eq!(proxy.triangle_count(), 2);
        let hit = proxy
            .cast_ray(ray(Vec3::new(0.2, 5.0, 0.1), Vec3::NEG_Y))
            .expect("raised floor hit");
        assert!((hit.point.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn non_triangle_mesh_is_rejected() {
        use bevy::asset::RenderAssetUsages;

        let mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default());
        let result = CollisionProxy::from_mesh("Lines_PROXY", &mesh, &GlobalTransform::IDENTITY);
        assert!(matches!(result, Err(WalkthroughError::ProxyNotTriangles(_))));
    }
}
