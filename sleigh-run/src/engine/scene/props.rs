use crate::engine::scene::scatter::PropPlacement;
use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy_rapier3d::prelude::*;
use constants::scatter::{
    RAMP_COLOUR, RAMP_HEIGHT, RAMP_LENGTH, RAMP_WIDTH, TREE_COLOUR, TREE_HEIGHT, TREE_RADIUS,
    TREE_SEGMENTS,
};

/// Tree or ramp spawned by the scatter pass.
#[derive(Component, Debug, Clone, Copy)]
pub struct ScatteredProp;

/// Corners of a wedge rising along +X, centred on the origin in X/Z, base at y = 0.
pub fn wedge_corners(width: f32, length: f32, height: f32) -> [Vec3; 6] {
    let (hl, hw) = (length * 0.5, width * 0.5);
    [
        Vec3::new(-hl, 0.0, -hw),
        Vec3::new(hl, 0.0, -hw),
        Vec3::new(hl, height, -hw),
        Vec3::new(-hl, 0.0, hw),
        Vec3::new(hl, 0.0, hw),
        Vec3::new(hl, height, hw),
    ]
}

/// Flat-shaded triangular prism used for ramps.
pub fn wedge_mesh(width: f32, length: f32, height: f32) -> Mesh {
    let [a, b, c, d, e, f] = wedge_corners(width, length, height);

    #[rustfmt::skip]
    let triangles: [[Vec3; 3]; 8] = [
        // sides
        [a, c, b],
        [d, e, f],
        // base
        [a, b, e], [a, e, d],
        // back wall
        [b, c, f], [b, f, e],
        // slope
        [a, d, f], [a, f, c],
    ];

    let positions: Vec<[f32; 3]> = triangles
        .iter()
        .flatten()
        .map(|v| v.to_array())
        .collect();

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.compute_flat_normals();
    mesh
}

pub fn spawn_props(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    props: &[PropPlacement],
) {
    let tree_mesh = meshes.add(
        Cone::new(TREE_RADIUS, TREE_HEIGHT)
            .mesh()
            .resolution(TREE_SEGMENTS)
            .build(),
    );
    let ramp_mesh = meshes.add(wedge_mesh(RAMP_WIDTH, RAMP_LENGTH, RAMP_HEIGHT));
    let tree_material = materials.add(StandardMaterial::from(TREE_COLOUR));
    let ramp_material = materials.add(StandardMaterial::from(RAMP_COLOUR));

    let ramp_collider =
        Collider::convex_hull(&wedge_corners(RAMP_WIDTH, RAMP_LENGTH, RAMP_HEIGHT));
    if ramp_collider.is_none() {
        warn!("Ramp hull could not be built; ramps will have no collider");
    }

    for prop in props {
        match *prop {
            PropPlacement::Tree { position, scale } => {
                // Cone mesh is centred on its midpoint; lift it so the base meets the ground.
                let lift = Vec3::Y * TREE_HEIGHT * 0.5 * scale.y;
                commands.spawn((
                    ScatteredProp,
                    Mesh3d(tree_mesh.clone()),
                    MeshMaterial3d(tree_material.clone()),
                    Transform::from_translation(position + lift).with_scale(scale),
                    RigidBody::Fixed,
                    Collider::cone(TREE_HEIGHT * 0.5, TREE_RADIUS),
                ));
            }
            PropPlacement::Ramp { position, yaw } => {
                let mut ramp = commands.spawn((
                    ScatteredProp,
                    Mesh3d(ramp_mesh.clone()),
                    MeshMaterial3d(ramp_material.clone()),
                    Transform::from_translation(position).with_rotation(Quat::from_rotation_y(yaw)),
                    RigidBody::Fixed,
                ));
                if let Some(collider) = &ramp_collider {
                    ramp.insert(collider.clone());
                }
            }
        }
    }

    debug!("Spawned {} scattered props", props.len());
}
