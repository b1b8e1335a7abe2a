use std::collections::HashMap;

use bevy::gltf::GltfMaterialName;
use bevy::prelude::*;
use constants::board::{DERIVED_ANCHORS, DerivedAnchor};

use crate::engine::assets::anchor_registry::AnchorRegistry;
use crate::engine::assets::campus_assets::CampusAssets;
use crate::engine::assets::campus_manifest::{
    AnchorIndex, CampusManifest, SurfaceClass, classify_surface,
};
use crate::engine::core::app_state::AppState;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::navigation::spatial_query::CollisionProxy;
use crate::engine::scene::materials::surface_material;
use crate::error::WalkthroughError;

fn derived_anchor_position(
    derived: &DerivedAnchor,
    by_name: &HashMap<&str, Entity>,
    transforms: &Query<&GlobalTransform>,
) -> Result<Vec3, WalkthroughError> {
    let [first, second] = derived.between.map(|node| {
        by_name
            .get(node)
            .and_then(|entity| transforms.get(*entity).ok())
            .map(GlobalTransform::translation)
            .ok_or_else(|| WalkthroughError::DerivedAnchorSourceMissing {
                anchor: derived.name.to_string(),
                node: node.to_string(),
            })
    });
    Ok((first? + second?) * 0.5)
}

/// Walk the spawned campus once: build the collision proxy, restyle
/// surfaces, then resolve registry and derived anchors to entities.
pub fn classify_campus_scene(
    mut commands: Commands,
    campus: Res<CampusAssets>,
    registry: Res<AnchorRegistry>,
    children: Query<&Children>,
    names: Query<&Name>,
    parents: Query<&ChildOf>,
    mesh_entities: Query<(
        &Mesh3d,
        Option<&MeshMaterial3d<StandardMaterial>>,
        Option<&GltfMaterialName>,
    )>,
    transforms: Query<&GlobalTransform>,
    meshes: Res<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.scene_classified {
        return;
    }
    loading_progress.scene_classified = true;

    let Some(root) = campus.scene_root else {
        warn!("No campus scene root to classify");
        commands.insert_resource(CampusManifest::default());
        next_state.set(AppState::Running);
        return;
    };

    let mut manifest = CampusManifest::default();
    let mut proxy: Option<CollisionProxy> = None;
    let mut proxy_node: Option<Entity> = None;
    let mut by_name: HashMap<&str, Entity> = HashMap::new();

    // Depth-first, so a name shared by several nodes resolves to the first in document order.
    for entity in children.iter_descendants_depth_first(root) {
        let own_name = names.get(entity).map(Name::as_str).unwrap_or_default();
        if !own_name.is_empty() {
            by_name.entry(own_name).or_insert(entity);
        }

        let Ok((mesh, material, material_name)) = mesh_entities.get(entity) else {
            continue;
        };

        let node = parents.get(entity).ok().map(ChildOf::parent);
        let node_name = node
            .and_then(|node| names.get(node).ok())
            .map(Name::as_str)
            .unwrap_or_default();
        let material_name = material_name
            .map(|name| name.0.as_str())
            .unwrap_or_default();

        let class = classify_surface(&[own_name, node_name], material_name);

        if class == SurfaceClass::CollisionProxy {
            // Primitives of the first proxy node are merged; other proxy nodes are ignored.
            if manifest.collision_proxy.is_some() && (proxy_node.is_none() || proxy_node != node) {
                warn!("Ignoring extra collision proxy '{}'", own_name);
                continue;
            }
            if manifest.record(class, entity) {
                proxy_node = node;
            }
            commands.entity(entity).insert(Visibility::Hidden);

            let transform = transforms.get(entity).copied().unwrap_or_default();
            let part = meshes
                .get(&mesh.0)
                .ok_or_else(|| WalkthroughError::ProxyMeshMissing(own_name.to_string()))
                .and_then(|mesh| CollisionProxy::from_mesh(own_name, mesh, &transform));
            match part {
                Ok(part) => {
                    proxy = Some(match proxy.take() {
                        Some(existing) => existing.merge(part),
                        None => part,
                    });
                }
                Err(err) => error!("{}", err),
            }
            continue;
        }

        manifest.record(class, entity);
        let original = material
            .and_then(|material| materials.get(&material.0))
            .cloned();
        if let Some(replacement) = surface_material(class, original.as_ref()) {
            commands
                .entity(entity)
                .insert(MeshMaterial3d(materials.add(replacement)));
        }
    }

    let mut index = AnchorIndex::default();
    for derived in DERIVED_ANCHORS {
        match derived_anchor_position(derived, &by_name, &transforms) {
            Ok(position) => {
                let anchor = commands
                    .spawn((Name::new(derived.name), Transform::from_translation(position)))
                    .id();
                index.insert(derived.name, anchor);
            }
            Err(err) => warn!("{}", err),
        }
    }

    for key in registry.keys() {
        if index.get(key).is_some() {
            continue;
        }
        match by_name.get(key) {
            Some(entity) => index.insert(key, *entity),
            None => debug!("Anchor '{}' not found in campus scene", key),
        }
    }

    match proxy {
        Some(proxy) if !proxy.is_empty() => {
            info!("✓ Collision proxy ready ({} triangles)", proxy.triangle_count());
            commands.insert_resource(proxy);
        }
        _ => warn!("Campus scene has no usable collision proxy"),
    }

    info!(
        "✓ Campus classified: {} restyled meshes, {} of {} anchors placed",
        manifest.restyled_count(),
        index.len(),
        registry.len()
    );
    commands.insert_resource(manifest);
    commands.insert_resource(index);

    info!("→ Transitioning to Running state");
    next_state.set(AppState::Running);
}
