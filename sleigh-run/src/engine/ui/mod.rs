//! Screen overlays: splash and help, load failure, and the native FPS counter.

pub mod failure;
pub mod fps_text;
pub mod splash;
