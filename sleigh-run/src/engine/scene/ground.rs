use crate::engine::assets::city_textures::CityMaterials;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use constants::render_settings::{
    AMBIENT_BRIGHTNESS, GROUND_FRICTION, GROUND_RESTITUTION, GROUND_SIZE, SUN_ILLUMINANCE,
};

const GROUND_THICKNESS: f32 = 0.1;

#[derive(Component)]
pub struct Ground;

/// Snow plane the city sits on, with a thin box collider under its surface.
pub fn spawn_ground(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    city_materials: Res<CityMaterials>,
) {
    let half = GROUND_SIZE * 0.5;

    commands
        .spawn((
            Ground,
            Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
            MeshMaterial3d(city_materials.snow.clone()),
            Transform::IDENTITY,
            RigidBody::Fixed,
        ))
        .with_children(|ground| {
            ground.spawn((
                Collider::cuboid(half, GROUND_THICKNESS * 0.5, half),
                Friction::coefficient(GROUND_FRICTION),
                Restitution::coefficient(GROUND_RESTITUTION),
                Transform::from_xyz(0.0, -GROUND_THICKNESS * 0.5, 0.0),
            ));
        });
}

pub fn spawn_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            illuminance: SUN_ILLUMINANCE,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}
