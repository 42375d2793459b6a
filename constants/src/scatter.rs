use bevy::color::Color;

/// Number of downward probes per scene.
pub const SCATTER_TRIALS: usize = 250;

/// Probability that an open column receives a ramp instead of a tree.
pub const RAMP_CHANCE: f32 = 0.1;

/// Probes start this far above the top of the scene bounds.
pub const PROBE_START_ABOVE_TOP: f32 = 1.0;

/// Extra reach below the scene's height span.
pub const PROBE_MARGIN: f32 = 100.0;

/// Maximum extra scale per axis added to trees.
pub const TREE_SCALE_JITTER: f32 = 0.8;

pub const TREE_RADIUS: f32 = 0.8;
pub const TREE_HEIGHT: f32 = 3.2;
pub const TREE_SEGMENTS: u32 = 5;

pub const RAMP_WIDTH: f32 = 2.0;
pub const RAMP_LENGTH: f32 = 2.0;
pub const RAMP_HEIGHT: f32 = 0.8;

pub const TREE_COLOUR: Color = Color::srgb(0.2, 0.667, 0.2);
pub const RAMP_COLOUR: Color = Color::srgb(1.0, 0.0, 0.0);
