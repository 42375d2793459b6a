use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::render::mesh::VertexAttributeValues;
use bevy_rapier3d::prelude::*;
use constants::render_settings::{SHADOW_HEIGHT, SHADOW_OPACITY, SHADOW_SCALE};
use constants::vehicle::{
    ANGULAR_DAMPING, COLLISION_HULL_PATH, DENSITY, MODEL_PATH, MODEL_SCALE, RESTITUTION,
    SPAWN_POSITION,
};

/// Rigid body root of the sleigh.
#[derive(Component)]
pub struct Vehicle;

/// The collider that picks up gifts.
#[derive(Component)]
pub struct VehicleCollider;

/// Collision hull mesh still loading. The collider carries a box until it arrives.
#[derive(Component)]
pub struct PendingHull(Handle<Mesh>);

#[derive(Component)]
pub struct VehicleShadow;

/// Looping sled animation, attached to the model's player once the scene spawns.
#[derive(Resource)]
pub struct SledAnimation {
    graph: Handle<AnimationGraph>,
    node: AnimationNodeIndex,
}

const PLACEHOLDER_HALF_EXTENTS: Vec3 = Vec3::new(0.3, 0.2, 0.5);

pub fn spawn_vehicle(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
) {
    let model = asset_server.load(GltfAssetLabel::Scene(0).from_asset(MODEL_PATH));
    let hull = asset_server.load(
        GltfAssetLabel::Primitive {
            mesh: 0,
            primitive: 0,
        }
        .from_asset(COLLISION_HULL_PATH),
    );

    let (graph, node) = AnimationGraph::from_clip(
        asset_server.load(GltfAssetLabel::Animation(0).from_asset(MODEL_PATH)),
    );
    commands.insert_resource(SledAnimation {
        graph: graphs.add(graph),
        node,
    });

    commands
        .spawn((
            Name::new("Sleigh"),
            Vehicle,
            Transform::from_translation(SPAWN_POSITION),
            Visibility::default(),
            RigidBody::Dynamic,
            Velocity::zero(),
            ExternalImpulse::default(),
            ExternalForce::default(),
            ReadMassProperties::default(),
            Damping {
                linear_damping: 0.0,
                angular_damping: ANGULAR_DAMPING,
            },
        ))
        .with_children(|vehicle| {
            vehicle.spawn((
                SceneRoot(model),
                Transform::from_scale(Vec3::splat(MODEL_SCALE)),
            ));
            vehicle.spawn((
                VehicleCollider,
                PendingHull(hull),
                Collider::cuboid(
                    PLACEHOLDER_HALF_EXTENTS.x,
                    PLACEHOLDER_HALF_EXTENTS.y,
                    PLACEHOLDER_HALF_EXTENTS.z,
                ),
                ColliderMassProperties::Density(DENSITY),
                Restitution::coefficient(RESTITUTION),
                ActiveEvents::COLLISION_EVENTS,
                Transform::IDENTITY,
            ));
        });

    commands.spawn((
        Name::new("Sleigh shadow"),
        VehicleShadow,
        Mesh3d(meshes.add(Circle::new(0.5))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::BLACK.with_alpha(SHADOW_OPACITY),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })),
        Transform::from_xyz(SPAWN_POSITION.x, SHADOW_HEIGHT, SPAWN_POSITION.z)
            .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2))
            .with_scale(Vec3::splat(SHADOW_SCALE)),
    ));
}

/// Hull points scaled to the sleigh's model scale.
pub fn hull_points(mesh: &Mesh, scale: f32) -> Option<Vec<Vec3>> {
    match mesh.attribute(Mesh::ATTRIBUTE_POSITION)? {
        VertexAttributeValues::Float32x3(positions) if !positions.is_empty() => Some(
            positions
                .iter()
                .map(|p| Vec3::from_array(*p) * scale)
                .collect(),
        ),
        _ => None,
    }
}

/// Swap the placeholder box for the convex hull once its mesh loads.
pub fn attach_vehicle_hull(
    mut commands: Commands,
    pending: Query<(Entity, &PendingHull)>,
    meshes: Res<Assets<Mesh>>,
    asset_server: Res<AssetServer>,
) {
    for (entity, PendingHull(handle)) in &pending {
        if let Some(mesh) = meshes.get(handle) {
            match hull_points(mesh, MODEL_SCALE).and_then(|points| Collider::convex_hull(&points)) {
                Some(collider) => {
                    info!("✓ Sleigh collision hull ready");
                    commands.entity(entity).insert(collider);
                }
                None => warn!("Sleigh hull has no usable points, keeping box collider"),
            }
            commands.entity(entity).remove::<PendingHull>();
        } else if let LoadState::Failed(error) = asset_server.load_state(handle.id()) {
            warn!("Sleigh hull unavailable ({}), keeping box collider", error);
            commands.entity(entity).remove::<PendingHull>();
        }
    }
}

/// Keep the shadow disc under the sleigh, flat on the ground.
pub fn follow_shadow(
    vehicles: Query<&Transform, (With<Vehicle>, Without<VehicleShadow>)>,
    mut shadows: Query<&mut Transform, With<VehicleShadow>>,
) {
    let Ok(vehicle) = vehicles.single() else {
        return;
    };

    for mut shadow in &mut shadows {
        shadow.translation = Vec3::new(vehicle.translation.x, SHADOW_HEIGHT, vehicle.translation.z);
    }
}

pub fn start_sled_animation(
    mut commands: Commands,
    animation: Option<Res<SledAnimation>>,
    mut players: Query<(Entity, &mut AnimationPlayer), Added<AnimationPlayer>>,
) {
    let Some(animation) = animation else {
        return;
    };

    for (entity, mut player) in &mut players {
        player.play(animation.node).repeat();
        commands
            .entity(entity)
            .insert(AnimationGraphHandle(animation.graph.clone()));
    }
}
