pub mod assets;
pub mod camera;
pub mod core;
pub mod gifts;
pub mod input;
pub mod loading;
pub mod scene;
pub mod systems;
pub mod ui;
pub mod vehicle;
