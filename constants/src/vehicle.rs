use bevy::math::Vec3;

/// Forward/back impulse per tick.
pub const DRIVE_IMPULSE: f32 = 0.1;

/// Multiplier on forward impulse while boost is held. Reverse is never boosted.
pub const BOOST_MULTIPLIER: f32 = 3.0;

/// Constant downward component of the drive impulse (local Y).
pub const DRIVE_DOWNFORCE: f32 = -0.01;

/// Drive impulse is applied this far above the body origin.
pub const DRIVE_POINT_OFFSET: Vec3 = Vec3::new(0.0, 0.11, 0.0);

/// Per-side steering input magnitude.
pub const STEER_IMPULSE: f32 = 0.01;

/// Scale from steering input to yaw torque impulse.
pub const STEER_TORQUE_SCALE: f32 = 0.75;

pub const JUMP_IMPULSE: Vec3 = Vec3::new(0.0, 1.1, 0.0);

pub const SPAWN_POSITION: Vec3 = Vec3::new(0.0, 3.0, 0.0);

pub const MODEL_SCALE: f32 = 0.2;
pub const DENSITY: f32 = 2.0;
pub const RESTITUTION: f32 = 0.2;
pub const ANGULAR_DAMPING: f32 = 0.9;

pub const MODEL_PATH: &str = "sled.glb";
pub const COLLISION_HULL_PATH: &str = "carCollision.glb";
