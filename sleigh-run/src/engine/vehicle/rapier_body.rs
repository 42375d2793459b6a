use crate::engine::assets::game_settings::GameSettings;
use crate::engine::input::Action;
use crate::engine::vehicle::controller::{DriveInput, VehicleBody, drive_tick};
use crate::engine::vehicle::spawn::Vehicle;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Borrowed view of the vehicle's rapier components.
pub struct RapierVehicleBody<'a> {
    pub transform: &'a mut Transform,
    pub velocity: &'a mut Velocity,
    pub impulse: &'a mut ExternalImpulse,
    pub force: &'a mut ExternalForce,
    pub local_center_of_mass: Vec3,
}

impl VehicleBody for RapierVehicleBody<'_> {
    fn translation(&self) -> Vec3 {
        self.transform.translation
    }

    fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.impulse.impulse += impulse;
    }

    fn apply_impulse_at_point(&mut self, impulse: Vec3, point: Vec3) {
        let center_of_mass =
            self.transform.translation + self.transform.rotation * self.local_center_of_mass;
        let at_point = ExternalImpulse::at_point(impulse, point, center_of_mass);
        self.impulse.impulse += at_point.impulse;
        self.impulse.torque_impulse += at_point.torque_impulse;
    }

    fn apply_torque_impulse(&mut self, torque: Vec3) {
        self.impulse.torque_impulse += torque;
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.velocity.linvel = velocity;
    }

    fn set_angular_velocity(&mut self, velocity: Vec3) {
        self.velocity.angvel = velocity;
    }

    fn set_pose(&mut self, translation: Vec3, rotation: Quat) {
        self.transform.translation = translation;
        self.transform.rotation = rotation;
    }

    fn reset_forces(&mut self) {
        *self.impulse = ExternalImpulse::default();
        *self.force = ExternalForce::default();
    }
}

/// Feed this frame's actions into the vehicle. Does nothing until the vehicle exists.
pub fn drive_vehicle(
    actions: Res<ButtonInput<Action>>,
    settings: Res<GameSettings>,
    mut vehicles: Query<
        (
            &mut Transform,
            &mut Velocity,
            &mut ExternalImpulse,
            &mut ExternalForce,
            Option<&ReadMassProperties>,
        ),
        With<Vehicle>,
    >,
) {
    let Ok((mut transform, mut velocity, mut impulse, mut force, mass)) = vehicles.single_mut()
    else {
        return;
    };

    let mut body = RapierVehicleBody {
        transform: &mut *transform,
        velocity: &mut *velocity,
        impulse: &mut *impulse,
        force: &mut *force,
        local_center_of_mass: mass.map_or(Vec3::ZERO, |m| m.get().local_center_of_mass),
    };

    let report = drive_tick(&mut body, &DriveInput::from_actions(&actions), &settings.drive);

    if report.jumped {
        debug!("Jump");
    }
    if report.reset {
        info!("Vehicle reset to origin");
    }
}
