//! Loading pipeline for the city scene.
//!
//! Runs settings, geometry fetch and glTF import in order, reporting progress
//! to the host page and failing visibly when any step breaks.

/// Geometry retrieval from the host page over RPC or from a local file.
///
/// Polls the pending request or IO task and hands the GLB bytes to the composer.
pub mod geometry_fetch;

/// Loading progress tracking resource for state transitions.
pub mod progress;

/// GLB parsing into flat, transform-annotated triangle meshes.
pub mod scene_import;

/// Runtime settings loading with fallback to compiled defaults.
///
/// Seeds the scene RNG and starts the geometry fetch once settings are known.
pub mod settings_loader;
