use crate::engine::assets::game_settings::GameSettings;
use crate::engine::camera::camera_mode::{CameraMode, GameCamera};
use crate::engine::vehicle::spawn::Vehicle;
use bevy::prelude::*;

/// Point behind and above the sleigh, offset in its local frame.
pub fn chase_target(translation: Vec3, rotation: Quat, offset: Vec3) -> Vec3 {
    translation + rotation * offset
}

/// Move `current` a fixed fraction of the way to `target`.
pub fn smooth_follow(current: Vec3, target: Vec3, factor: f32) -> Vec3 {
    current.lerp(target, factor.clamp(0.0, 1.0))
}

pub fn chase_camera(
    mode: Res<CameraMode>,
    settings: Res<GameSettings>,
    vehicles: Query<&Transform, (With<Vehicle>, Without<GameCamera>)>,
    mut cameras: Query<&mut Transform, With<GameCamera>>,
) {
    if *mode != CameraMode::Chase {
        return;
    }
    let (Ok(vehicle), Ok(mut camera)) = (vehicles.single(), cameras.single_mut()) else {
        return;
    };

    let target = chase_target(
        vehicle.translation,
        vehicle.rotation,
        Vec3::from_array(settings.camera.chase_offset),
    );
    camera.translation = smooth_follow(camera.translation, target, settings.camera.smoothing);
    camera.look_at(vehicle.translation, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::camera::CHASE_OFFSET;

    #[test]
    fn target_sits_behind_the_heading() {
        let turned = Quat::from_rotation_y(std::f32::consts::PI);
        let target = chase_target(Vec3::new(10.0, 0.0, 0.0), turned, CHASE_OFFSET);
        assert!((target - Vec3::new(10.0, 2.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn follow_closes_a_fixed_fraction() {
        let next = smooth_follow(Vec3::ZERO, Vec3::new(0.0, 0.0, 100.0), 0.075);
        assert!((next.z - 7.5).abs() < 1e-4);

        let mut position = Vec3::ZERO;
        for _ in 0..200 {
            position = smooth_follow(position, Vec3::splat(10.0), 0.075);
        }
        assert!((position - Vec3::splat(10.0)).length() < 1e-3);
    }

    #[test]
    fn chase_camera_idles_in_orbit_mode() {
        let mut app = App::new();
        app.insert_resource(CameraMode::Orbit)
            .init_resource::<GameSettings>()
            .add_systems(Update, chase_camera);
        app.world_mut()
            .spawn((Vehicle, Transform::from_xyz(50.0, 0.0, 0.0)));
        let camera = app
            .world_mut()
            .spawn((GameCamera, Transform::IDENTITY))
            .id();

        app.update();
        assert_eq!(
            app.world().get::<Transform>(camera).unwrap().translation,
            Vec3::ZERO
        );

        app.insert_resource(CameraMode::Chase);
        app.update();
        let moved = app.world().get::<Transform>(camera).unwrap().translation;
        assert!(moved.x > 0.0);
    }
}
