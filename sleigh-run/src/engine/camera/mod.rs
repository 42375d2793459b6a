//! Follow cameras for the sleigh.
//!
//! Exactly one of the chase and orbit cameras drives the single `Camera3d` at a time,
//! selected by the `CameraMode` resource and switched with the orbit toggle.

/// Chase camera that trails the sleigh in its local frame.
pub mod chase;

/// Mode resource, camera spawn and the toggle system.
pub mod camera_mode;

/// Mouse-driven orbit around the sleigh.
pub mod orbit;

use constants::camera::{CHASE_OFFSET, FOLLOW_SMOOTHING};
use serde::{Deserialize, Serialize};

/// Follow tuning, overridable from `settings.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Offset from the sleigh in its local frame.
    pub chase_offset: [f32; 3],
    /// Fraction of the remaining distance covered per tick.
    pub smoothing: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            chase_offset: CHASE_OFFSET.to_array(),
            smoothing: FOLLOW_SMOOTHING,
        }
    }
}
