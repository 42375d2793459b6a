use crate::engine::assets::bounds::SceneBounds;
use crate::engine::scene::rng::SceneRng;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use constants::gifts::{
    GIFT_HEIGHT, GIFT_REGION_FACTOR, GIFT_SIZE, GIFT_SPIN_SPEED, GIFT_TILT,
    GIFT_TRIGGER_HALF_EXTENT,
};
use std::f32::consts::TAU;

const RIBBON_THICKNESS: f32 = 0.06;

#[derive(Debug, Clone, PartialEq)]
pub struct Gift {
    pub index: usize,
    pub color: Color,
    pub position: Vec3,
    pub rotation: Quat,
}

impl Gift {
    #[cfg(test)]
    pub fn for_test(index: usize) -> Self {
        Self {
            index,
            color: Color::WHITE,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Links a spawned trigger back to its entry in the registry.
#[derive(Component, Debug, Clone, Copy)]
pub struct GiftMarker {
    pub index: usize,
}

/// Generate `count` gifts inside the scene box scaled about the origin.
pub fn generate_gifts(bounds: &SceneBounds, count: usize, rng: &mut SceneRng) -> Vec<Gift> {
    let region = bounds.scaled(GIFT_REGION_FACTOR);

    (0..count)
        .map(|index| {
            let x = rng.range(region.min_x, region.max_x);
            let z = rng.range(region.min_z, region.max_z);
            let color = Color::srgb(rng.unit(), rng.unit(), rng.unit());
            let yaw = rng.range(0.0, TAU);

            Gift {
                index,
                color,
                position: Vec3::new(x, GIFT_HEIGHT, z),
                rotation: Quat::from_rotation_y(yaw) * Quat::from_rotation_z(GIFT_TILT),
            }
        })
        .collect()
}

pub fn spawn_gifts(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    gifts: &[Gift],
) {
    let box_mesh = meshes.add(Cuboid::from_length(GIFT_SIZE));
    let ribbon_a = meshes.add(Cuboid::new(
        GIFT_SIZE + 0.01,
        GIFT_SIZE + 0.01,
        RIBBON_THICKNESS,
    ));
    let ribbon_b = meshes.add(Cuboid::new(
        RIBBON_THICKNESS,
        GIFT_SIZE + 0.01,
        GIFT_SIZE + 0.01,
    ));
    let ribbon_material = materials.add(StandardMaterial::from(Color::WHITE));

    for gift in gifts {
        commands
            .spawn((
                Name::new(format!("gift {}", gift.index)),
                GiftMarker { index: gift.index },
                Mesh3d(box_mesh.clone()),
                MeshMaterial3d(materials.add(StandardMaterial::from(gift.color))),
                Transform::from_translation(gift.position).with_rotation(gift.rotation),
                Collider::cuboid(
                    GIFT_TRIGGER_HALF_EXTENT,
                    GIFT_TRIGGER_HALF_EXTENT,
                    GIFT_TRIGGER_HALF_EXTENT,
                ),
                Sensor,
                ActiveEvents::COLLISION_EVENTS,
            ))
            .with_children(|parent| {
                parent.spawn((
                    Mesh3d(ribbon_a.clone()),
                    MeshMaterial3d(ribbon_material.clone()),
                ));
                parent.spawn((
                    Mesh3d(ribbon_b.clone()),
                    MeshMaterial3d(ribbon_material.clone()),
                ));
            });
    }
}

/// Turn every uncollected gift about the world vertical.
pub fn spin_gifts(time: Res<Time>, mut gifts: Query<&mut Transform, With<GiftMarker>>) {
    let angle = GIFT_SPIN_SPEED * time.delta_secs();
    for mut transform in &mut gifts {
        transform.rotate_y(angle);
    }
}
