use crate::engine::input::Action;
use bevy::prelude::*;
use constants::vehicle::{
    BOOST_MULTIPLIER, DRIVE_DOWNFORCE, DRIVE_IMPULSE, DRIVE_POINT_OFFSET, JUMP_IMPULSE,
    STEER_IMPULSE, STEER_TORQUE_SCALE,
};
use serde::{Deserialize, Serialize};

/// What the controller needs from a rigid body.
pub trait VehicleBody {
    fn translation(&self) -> Vec3;
    fn rotation(&self) -> Quat;
    fn apply_impulse(&mut self, impulse: Vec3);
    fn apply_impulse_at_point(&mut self, impulse: Vec3, point: Vec3);
    fn apply_torque_impulse(&mut self, torque: Vec3);
    fn set_linear_velocity(&mut self, velocity: Vec3);
    fn set_angular_velocity(&mut self, velocity: Vec3);
    fn set_pose(&mut self, translation: Vec3, rotation: Quat);
    /// Drop any force, torque or impulse accumulated for the next step.
    fn reset_forces(&mut self);
}

/// Impulse tuning, overridable from `settings.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveTuning {
    pub drive_impulse: f32,
    pub boost_multiplier: f32,
    pub downforce: f32,
    pub drive_point_height: f32,
    pub steer_impulse: f32,
    pub steer_torque_scale: f32,
    pub jump_impulse: f32,
}

impl Default for DriveTuning {
    fn default() -> Self {
        Self {
            drive_impulse: DRIVE_IMPULSE,
            boost_multiplier: BOOST_MULTIPLIER,
            downforce: DRIVE_DOWNFORCE,
            drive_point_height: DRIVE_POINT_OFFSET.y,
            steer_impulse: STEER_IMPULSE,
            steer_torque_scale: STEER_TORQUE_SCALE,
            jump_impulse: JUMP_IMPULSE.y,
        }
    }
}

/// Held directions plus the edge-triggered jump and reset for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub boost: bool,
    pub jump: bool,
    pub reset: bool,
}

impl DriveInput {
    pub fn from_actions(actions: &ButtonInput<Action>) -> Self {
        Self {
            forward: actions.pressed(Action::Forward),
            back: actions.pressed(Action::Back),
            left: actions.pressed(Action::Left),
            right: actions.pressed(Action::Right),
            boost: actions.pressed(Action::Boost),
            jump: actions.just_pressed(Action::Jump),
            reset: actions.just_pressed(Action::Reset),
        }
    }
}

/// What a tick applied, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    pub drive: Vec3,
    pub torque: Vec3,
    pub jumped: bool,
    pub reset: bool,
}

/// Local-frame drive impulse: constant downforce plus forward minus back.
pub fn drive_impulse(input: &DriveInput, tuning: &DriveTuning) -> Vec3 {
    let forward = if input.forward {
        let boost = if input.boost { tuning.boost_multiplier } else { 1.0 };
        tuning.drive_impulse * boost
    } else {
        0.0
    };
    let back = if input.back { tuning.drive_impulse } else { 0.0 };

    Vec3::new(0.0, tuning.downforce, forward - back)
}

pub fn steer_torque(input: &DriveInput, tuning: &DriveTuning) -> Vec3 {
    let left = if input.left { tuning.steer_impulse } else { 0.0 };
    let right = if input.right { tuning.steer_impulse } else { 0.0 };

    Vec3::new(0.0, (left - right) * tuning.steer_torque_scale, 0.0)
}

/// Apply one tick of control. Reset runs last so the body ends the tick at rest at the origin.
pub fn drive_tick(
    body: &mut impl VehicleBody,
    input: &DriveInput,
    tuning: &DriveTuning,
) -> TickReport {
    let rotation = body.rotation();
    let drive = rotation * drive_impulse(input, tuning);
    let point = body.translation() + Vec3::Y * tuning.drive_point_height;
    body.apply_impulse_at_point(drive, point);

    let torque = steer_torque(input, tuning);
    body.apply_torque_impulse(torque);

    if input.jump {
        body.apply_impulse(Vec3::Y * tuning.jump_impulse);
    }

    if input.reset {
        body.set_linear_velocity(Vec3::ZERO);
        body.set_angular_velocity(Vec3::ZERO);
        body.set_pose(Vec3::ZERO, Quat::IDENTITY);
        body.reset_forces();
    }

    TickReport {
        drive,
        torque,
        jumped: input.jump,
        reset: input.reset,
    }
}
