use bevy::color::Color;

/// Background colour behind the scene.
pub const CLEAR_COLOUR: Color = Color::srgb(0.871, 0.961, 1.0);

/// Side length of the snow ground plane.
pub const GROUND_SIZE: f32 = 1000.0;
pub const GROUND_FRICTION: f32 = 0.5;
pub const GROUND_RESTITUTION: f32 = 0.5;

pub const AMBIENT_BRIGHTNESS: f32 = 400.0;
pub const SUN_ILLUMINANCE: f32 = 8000.0;

pub const SHADOW_HEIGHT: f32 = 0.01;
pub const SHADOW_SCALE: f32 = 1.3;
pub const SHADOW_OPACITY: f32 = 0.3;
