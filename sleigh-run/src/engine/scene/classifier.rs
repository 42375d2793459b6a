use crate::engine::loading::scene_import::ImportedMesh;
use crate::engine::scene::rng::SceneRng;
use bevy::prelude::*;
use constants::class::{
    DARK_ROAD_MAX_HEIGHT, HIGH_RISE_MIN_HEIGHT, LOW_STRUCTURE_MIN_HEIGHT, get_class_name,
};
use constants::coordinate_system::{SCENE_SCALE, to_world};
use constants::texture::HIGHRISE_TEXTURE_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshClass {
    /// Walkable surface rendered without a collider.
    Road { dark: bool },
    LowStructure,
    HighRise,
    InstancedDecoration,
}

impl MeshClass {
    pub fn class_id(self) -> u8 {
        match self {
            MeshClass::Road { .. } => 0,
            MeshClass::LowStructure => 1,
            MeshClass::HighRise => 2,
            MeshClass::InstancedDecoration => 3,
        }
    }

    pub fn name(self) -> String {
        get_class_name(self.class_id())
    }

    /// Everything except roads is a static obstacle.
    pub fn is_solid(self) -> bool {
        !matches!(self, MeshClass::Road { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialChoice {
    /// Index into the high-rise facade palette.
    HighRise(usize),
    LowStructure,
    DarkRoad,
    LightRoad,
    /// Keep the colour authored in the glTF.
    Original,
}

/// Classify by world height. Thresholds are strict: exactly 5.0 is a low structure,
/// exactly 0.5 is road.
pub fn classify_height(height: f32) -> MeshClass {
    if height > HIGH_RISE_MIN_HEIGHT {
        MeshClass::HighRise
    } else if height > LOW_STRUCTURE_MIN_HEIGHT {
        MeshClass::LowStructure
    } else {
        MeshClass::Road {
            dark: height < DARK_ROAD_MAX_HEIGHT,
        }
    }
}

/// Pick the material for a class. Only high-rises draw from the RNG.
pub fn choose_material(class: MeshClass, rng: &mut SceneRng) -> MaterialChoice {
    match class {
        MeshClass::HighRise => MaterialChoice::HighRise(rng.index(HIGHRISE_TEXTURE_COUNT)),
        MeshClass::LowStructure => MaterialChoice::LowStructure,
        MeshClass::Road { dark: true } => MaterialChoice::DarkRoad,
        MeshClass::Road { dark: false } => MaterialChoice::LightRoad,
        MeshClass::InstancedDecoration => MaterialChoice::Original,
    }
}

/// Imported mesh after classification, with vertices baked into world space.
#[derive(Debug, Clone)]
pub struct ClassifiedMesh {
    pub name: String,
    pub class: MeshClass,
    pub material: MaterialChoice,
    pub height: f32,
    pub world_positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub uvs: Option<Vec<[f32; 2]>>,
    pub base_color: [f32; 4],
}

pub fn classify_mesh(mesh: ImportedMesh, rng: &mut SceneRng) -> ClassifiedMesh {
    // Geometry is authored Z-up; local Z becomes world Y after import.
    let height = mesh.local_z_extent() * SCENE_SCALE;

    let class = if mesh.instanced {
        MeshClass::InstancedDecoration
    } else {
        classify_height(height)
    };
    let material = choose_material(class, rng);

    let world_positions = mesh
        .positions
        .iter()
        .map(|p| to_world(mesh.node_transform.transform_point3(*p)))
        .collect();

    ClassifiedMesh {
        name: mesh.name,
        class,
        material,
        height,
        world_positions,
        indices: mesh.indices,
        uvs: mesh.uvs,
        base_color: mesh.base_color,
    }
}
