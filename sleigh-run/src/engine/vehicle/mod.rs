//! The player's sleigh: impulse-based controls, the rapier body adapter and spawning.

/// Per-tick drive, steer, jump and reset logic, independent of the physics engine.
pub mod controller;

/// `VehicleBody` over rapier's ECS components.
pub mod rapier_body;

/// Sleigh entity, hull collider, blob shadow and sled animation.
pub mod spawn;
