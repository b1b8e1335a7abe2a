use std::collections::HashMap;

use bevy::prelude::*;
use constants::navigation::COLLISION_PROXY_MARKER;
use constants::surface::{FLOOR_MARKER, GLASS_MARKER, SKYBOX_MARKER, STAIR_MARKER, WALL_MARKER};

/// How a campus mesh is treated after loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceClass {
    CollisionProxy,
    Wall,
    Floor,
    Stair,
    Glass,
    SkyBox,
    Untouched,
}

/// Classify one mesh from its node/primitive names and its material name.
///
/// Wall, floor and stair markers are checked in that order against both the
/// names and the material; the last match wins. Glass and sky box only look
/// at the material and only apply when none of those matched.
pub fn classify_surface(names: &[&str], material_name: &str) -> SurfaceClass {
    if names.iter().any(|name| name.contains(COLLISION_PROXY_MARKER)) {
        return SurfaceClass::CollisionProxy;
    }

    let marked = |marker: &str| {
        names.iter().any(|name| name.contains(marker)) || material_name.contains(marker)
    };

    let recoloured = [
        (WALL_MARKER, SurfaceClass::Wall),
        (FLOOR_MARKER, SurfaceClass::Floor),
        (STAIR_MARKER, SurfaceClass::Stair),
    ]
    .into_iter()
    .filter(|(marker, _)| marked(marker))
    .map(|(_, class)| class)
    .last();

    if let Some(class) = recoloured {
        class
    } else if material_name.contains(GLASS_MARKER) {
        SurfaceClass::Glass
    } else if material_name.contains(SKYBOX_MARKER) {
        SurfaceClass::SkyBox
    } else {
        SurfaceClass::Untouched
    }
}

/// Typed result of the load-time classification pass.
#[derive(Resource, Debug, Default, Clone)]
pub struct CampusManifest {
    pub collision_proxy: Option<Entity>,
    pub wall_meshes: Vec<Entity>,
    pub floor_meshes: Vec<Entity>,
    pub stair_meshes: Vec<Entity>,
    pub glass_meshes: Vec<Entity>,
    pub skybox_meshes: Vec<Entity>,
}

impl CampusManifest {
    /// Record a classified mesh. Returns false for a second collision proxy,
    /// which is not recorded.
    pub fn record(&mut self, class: SurfaceClass, entity: Entity) -> bool {
        match class {
            SurfaceClass::CollisionProxy => {
                if self.collision_proxy.is_some() {
                    return false;
                }
                self.collision_proxy = Some(entity);
            }
            SurfaceClass::Wall => self.wall_meshes.push(entity),
            SurfaceClass::Floor => self.floor_meshes.push(entity),
            SurfaceClass::Stair => self.stair_meshes.push(entity),
            SurfaceClass::Glass => self.glass_meshes.push(entity),
            SurfaceClass::SkyBox => self.skybox_meshes.push(entity),
            SurfaceClass::Untouched => {}
        }
        true
    }

    pub fn restyled_count(&self) -> usize {
        self.wall_meshes.len()
            + self.floor_meshes.len()
            + self.stair_meshes.len()
            + self.glass_meshes.len()
            + self.skybox_meshes.len()
    }
}

/// Anchor name → scene entity, resolved once after classification.
#[derive(Resource, Debug, Default, Clone)]
pub struct AnchorIndex {
    entities: HashMap<String, Entity>,
}

impl AnchorIndex {
    pub fn insert(&mut self, name: impl Into<String>, entity: Entity) {
        self.entities.insert(name.into(), entity);
    }

    pub fn get(&self, name: &str) -> Option<Entity> {
        self.entities.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_name_wins_over_everything() {
        assert_eq!(
            classify_surface(&["Wall_PROXY.0", "Wall_PROXY"], "Glass"),
            SurfaceClass::CollisionProxy
        );
    }

    #[test]
    fn wall_floor_stair_match_names_or_material() {
        assert_eq!(classify_surface(&["EastWall"], "Plaster"), SurfaceClass::Wall);
        assert_eq!(classify_surface(&["Mesh.004"], "FloorTiles"), SurfaceClass::Floor);
        assert_eq!(classify_surface(&["Stairs_Main"], ""), SurfaceClass::Stair);
    }

    #[test]
    fn later_marker_wins() {
        assert_eq!(classify_surface(&["Floor_Wall"], ""), SurfaceClass::Floor);
        assert_eq!(classify_surface(&["Wall"], "StairRail"), SurfaceClass::Stair);
    }

    #[test]
    fn glass_and_skybox_read_material_only() {
        assert_eq!(classify_surface(&["Window"], "Glass_Clear"), SurfaceClass::Glass);
        assert_eq!(classify_surface(&["Glass"], "Frame"), SurfaceClass::Untouched);
        assert_eq!(classify_surface(&["Dome"], "SkyBox"), SurfaceClass::SkyBox);
        // A recoloured mesh loses its material, so glass no longer applies.
        assert_eq!(classify_surface(&["WallPanel"], "Glass"), SurfaceClass::Wall);
    }

    #[test]
    fn first_proxy_is_kept() {
        let mut manifest = CampusManifest::default();
        let first = Entity::from_raw(1);
        let second = Entity::from_raw(2);

        assert!(manifest.record(SurfaceClass::CollisionProxy, first));
        assert!(!manifest.record(SurfaceClass::CollisionProxy, second));
        assert_eq!(manifest.collision_proxy, Some(first));
    }
}
