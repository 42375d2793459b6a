use bevy::color::Color;

/// Meshes taller than this (world units) are high-rise buildings.
pub const HIGH_RISE_MIN_HEIGHT: f32 = 5.0;

/// Meshes taller than this, up to the high-rise limit, are low structures.
pub const LOW_STRUCTURE_MIN_HEIGHT: f32 = 0.5;

/// Road meshes below this height use the darker surface.
pub const DARK_ROAD_MAX_HEIGHT: f32 = 0.2;

/// Name fragment marking instanced decoration meshes.
pub const INSTANCE_NAME_MARKER: &str = "instance";

/// Extras key carried by instanced decoration meshes.
pub const INSTANCE_FEATURE_MAP_KEY: &str = "instanceIxToFeatureMap";

pub const LOW_STRUCTURE_COLOUR: Color = Color::srgb(0.059, 0.059, 0.059);
pub const DARK_ROAD_COLOUR: Color = Color::srgb(0.333, 0.333, 0.333);
pub const LIGHT_ROAD_COLOUR: Color = Color::srgb(0.667, 0.667, 0.667);

pub struct ClassInfo {
    pub id: u8,
    pub name: &'static str,
}

pub const CLASS_MAP: &[ClassInfo] = &[
    ClassInfo {
        id: 0,
        name: "road",
    },
    ClassInfo {
        id: 1,
        name: "low structure",
    },
    ClassInfo {
        id: 2,
        name: "high-rise",
    },
    ClassInfo {
        id: 3,
        name: "instanced decoration",
    },
];

pub fn get_class_name(id: u8) -> String {
    CLASS_MAP
        .iter()
        .find(|c| c.id == id)
        .map_or("unknown", |c| c.name)
        .to_string()
}
