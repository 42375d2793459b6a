//! Tuning values shared across the sleigh-run workspace.

pub mod camera;
pub mod class;
pub mod coordinate_system;
pub mod gifts;
pub mod render_settings;
pub mod scatter;
pub mod texture;
pub mod vehicle;
