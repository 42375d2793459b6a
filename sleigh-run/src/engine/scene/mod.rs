//! City scene construction.
//!
//! Classifies imported geometry by height, dresses open ground with props
//! found by downward probes, and mounts everything in the physics world.

/// Spawning of classified city meshes with their materials and colliders.
pub mod city;

/// Height-based classification and material assignment for imported meshes.
pub mod classifier;

/// Orchestrates import, classification, scatter and gift generation.
pub mod composer;

/// Snow ground plane and scene lighting.
pub mod ground;

/// Downward ray probes against world-space triangles.
pub mod probe;

/// Tree and ramp meshes and their static colliders.
pub mod props;

/// Seeded random source for reproducible dressing.
pub mod rng;

/// Rejection-sampled placement of props on open ground.
pub mod scatter;
