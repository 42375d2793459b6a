//! Runtime shell systems around the game.
//!
//! FPS reporting, the debug and fullscreen toggles, and background music.

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to frontend via RPC and updates the native overlay.
pub mod fps_tracking;

/// Background music started when the splash is first dismissed.
pub mod music;

/// Physics debug rendering and fullscreen toggles.
pub mod toggles;
