use crate::engine::camera::orbit::OrbitCamera;
use crate::engine::input::Action;
use crate::engine::vehicle::spawn::Vehicle;
use bevy::prelude::*;
use constants::camera::INITIAL_POSITION;

#[derive(Component)]
pub struct GameCamera;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CameraMode {
    #[default]
    Chase,
    Orbit,
}

impl CameraMode {
    pub fn label(self) -> &'static str {
        match self {
            CameraMode::Chase => "chase",
            CameraMode::Orbit => "orbit",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Chase => CameraMode::Orbit,
            CameraMode::Orbit => CameraMode::Chase,
        }
    }
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("Game camera"),
        GameCamera,
        Camera3d::default(),
        Transform::from_translation(INITIAL_POSITION).looking_at(Vec3::ZERO, Vec3::NEG_Z),
    ));
}

/// Switch modes on the orbit toggle. Orbit starts from the current camera pose.
pub fn toggle_camera_mode(
    actions: Res<ButtonInput<Action>>,
    mut mode: ResMut<CameraMode>,
    mut orbit: ResMut<OrbitCamera>,
    cameras: Query<&Transform, With<GameCamera>>,
    vehicles: Query<&Transform, With<Vehicle>>,
) {
    if !actions.just_pressed(Action::ToggleOrbit) {
        return;
    }

    *mode = mode.toggled();
    if *mode == CameraMode::Orbit {
        if let Ok(camera) = cameras.single() {
            let focus = vehicles
                .single()
                .map_or(Vec3::ZERO, |vehicle| vehicle.translation);
            *orbit = OrbitCamera::from_pose(camera.translation, focus);
        }
    }

    info!("Camera mode: {}", mode.label());
}
