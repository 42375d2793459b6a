use crate::engine::assets::game_settings::GameSettings;
use crate::engine::camera::camera_mode::{CameraMode, GameCamera};
use crate::engine::camera::chase::smooth_follow;
use crate::engine::vehicle::spawn::Vehicle;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::camera::{
    ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, ORBIT_PITCH_LIMIT, ORBIT_PITCH_SENSITIVITY,
    ORBIT_YAW_SENSITIVITY, ORBIT_ZOOM_STEP,
};

/// Spherical camera placement around a focus point. Pitch is elevation above the horizon.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.6,
            distance: 10.0,
        }
    }
}

impl OrbitCamera {
    /// Orbit that reproduces the camera's current position around `focus`.
    pub fn from_pose(camera: Vec3, focus: Vec3) -> Self {
        let offset = camera - focus;
        let length = offset.length();
        if length < f32::EPSILON {
            return Self {
                focus,
                ..default()
            };
        }

        Self {
            focus,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / length)
                .clamp(-1.0, 1.0)
                .asin()
                .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT),
            distance: length.clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE),
        }
    }

    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.focus
            + Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance
    }

    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw -= delta.x * ORBIT_YAW_SENSITIVITY;
        self.pitch = (self.pitch + delta.y * ORBIT_PITCH_SENSITIVITY)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    /// Positive scroll moves closer.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance * (1.0 - scroll * ORBIT_ZOOM_STEP))
            .clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }
}

pub fn orbit_camera(
    mode: Res<CameraMode>,
    settings: Res<GameSettings>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    vehicles: Query<&Transform, (With<Vehicle>, Without<GameCamera>)>,
    mut cameras: Query<&mut Transform, With<GameCamera>>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let scroll: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        })
        .sum();

    if *mode != CameraMode::Orbit {
        return;
    }
    let Ok(mut camera) = cameras.single_mut() else {
        return;
    };

    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        orbit.rotate(mouse_delta);
    }
    if scroll.abs() > f32::EPSILON {
        orbit.zoom(scroll);
    }
    if let Ok(vehicle) = vehicles.single() {
        orbit.focus = smooth_follow(orbit.focus, vehicle.translation, settings.camera.smoothing);
    }

    camera.translation = orbit.position();
    camera.look_at(orbit.focus, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_round_trips() {
        let focus = Vec3::new(3.0, 1.0, -2.0);
        let camera = Vec3::new(-4.0, 9.0, 6.0);
        let orbit = OrbitCamera::from_pose(camera, focus);
        assert!((orbit.position() - camera).length() < 1e-4);
    }

    #[test]
    fn pitch_and_distance_are_clamped() {
        let mut orbit = OrbitCamera::default();
        orbit.rotate(Vec2::new(0.0, 1.0e6));
        assert_eq!(orbit.pitch, ORBIT_PITCH_LIMIT);

        orbit.zoom(1.0e3);
        assert_eq!(orbit.distance, ORBIT_MIN_DISTANCE);
        orbit.zoom(-1.0e6);
        assert_eq!(orbit.distance, ORBIT_MAX_DISTANCE);
    }

    #[test]
    fn top_down_pose_starts_inside_pitch_limit() {
        let orbit = OrbitCamera::from_pose(Vec3::new(0.0, 30.0, 0.0), Vec3::ZERO);
        assert_eq!(orbit.pitch, ORBIT_PITCH_LIMIT);
        assert!((orbit.distance - 30.0).abs() < 1e-4);

        // The first drag moves away from the pole instead of sticking to it.
        let mut dragged = orbit;
        dragged.rotate(Vec2::new(0.0, -10.0));
        assert!(dragged.pitch < orbit.pitch);
    }

    #[test]
    fn coincident_pose_falls_back_to_default_offset() {
        let orbit = OrbitCamera::from_pose(Vec3::ONE, Vec3::ONE);
        assert_eq!(orbit.focus, Vec3::ONE);
        assert_eq!(orbit.distance, OrbitCamera::default().distance);
    }
}
