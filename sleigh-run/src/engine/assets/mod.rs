//! Asset types for the city scene.
//!
//! Holds scene bounds, runtime settings and the shared city materials.

/// Axis-aligned world bounds of the composed city.
pub mod bounds;

/// Shared textured materials for classified meshes and the ground.
pub mod city_textures;

/// JSON settings asset with compiled defaults for every field.
pub mod game_settings;
