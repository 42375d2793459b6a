use bevy::math::Vec3;

/// Chase camera offset in the vehicle's local frame (behind and above).
pub const CHASE_OFFSET: Vec3 = Vec3::new(0.0, 2.0, -5.0);

/// Fraction of the remaining distance covered per tick when following.
pub const FOLLOW_SMOOTHING: f32 = 0.075;

pub const INITIAL_POSITION: Vec3 = Vec3::new(0.0, 30.0, 0.0);

pub const ORBIT_YAW_SENSITIVITY: f32 = 0.005;
pub const ORBIT_PITCH_SENSITIVITY: f32 = 0.004;
pub const ORBIT_PITCH_LIMIT: f32 = 1.55;
pub const ORBIT_MIN_DISTANCE: f32 = 1.0;
pub const ORBIT_MAX_DISTANCE: f32 = 500.0;
pub const ORBIT_ZOOM_STEP: f32 = 0.1;
