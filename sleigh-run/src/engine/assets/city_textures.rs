use crate::engine::scene::classifier::MaterialChoice;
use bevy::image::{ImageAddressMode, ImageLoaderSettings, ImageSampler, ImageSamplerDescriptor};
use bevy::math::Affine2;
use bevy::prelude::*;
use constants::class::{DARK_ROAD_COLOUR, LIGHT_ROAD_COLOUR, LOW_STRUCTURE_COLOUR};
use constants::texture::{
    HIGHRISE_TEXTURE_COUNT, ROAD_TEXTURE_PATH, ROAD_TEXTURE_REPEAT, SNOW_TEXTURE_PATH,
    SNOW_TEXTURE_REPEAT, highrise_texture_path,
};

/// Shared materials for classified city meshes and the snow ground.
#[derive(Resource, Clone)]
pub struct CityMaterials {
    pub highrise: Vec<Handle<StandardMaterial>>,
    pub low_structure: Handle<StandardMaterial>,
    pub dark_road: Handle<StandardMaterial>,
    pub light_road: Handle<StandardMaterial>,
    pub snow: Handle<StandardMaterial>,
}

impl CityMaterials {
    /// Material for a classified mesh. `None` means the mesh keeps its own colour.
    pub fn for_choice(&self, choice: MaterialChoice) -> Option<Handle<StandardMaterial>> {
        match choice {
            MaterialChoice::HighRise(index) => self.highrise.get(index).cloned(),
            MaterialChoice::LowStructure => Some(self.low_structure.clone()),
            MaterialChoice::DarkRoad => Some(self.dark_road.clone()),
            MaterialChoice::LightRoad => Some(self.light_road.clone()),
            MaterialChoice::Original => None,
        }
    }
}

/// Load a texture with a wrapping sampler so tiled UVs repeat instead of clamping.
pub fn load_repeating_texture(asset_server: &AssetServer, path: &str) -> Handle<Image> {
    asset_server.load_with_settings(path.to_string(), |settings: &mut ImageLoaderSettings| {
        settings.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
            address_mode_u: ImageAddressMode::Repeat,
            address_mode_v: ImageAddressMode::Repeat,
            ..default()
        });
    })
}

fn textured(texture: Handle<Image>, colour: Color, repeat: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: colour,
        base_color_texture: Some(texture),
        uv_transform: Affine2::from_scale(Vec2::splat(repeat)),
        perceptual_roughness: 0.9,
        ..default()
    }
}

pub fn load_city_materials(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let highrise = (0..HIGHRISE_TEXTURE_COUNT)
        .map(|index| {
            let texture = load_repeating_texture(&asset_server, &highrise_texture_path(index));
            materials.add(textured(texture, Color::WHITE, 1.0))
        })
        .collect();

    let road = load_repeating_texture(&asset_server, ROAD_TEXTURE_PATH);
    let snow = load_repeating_texture(&asset_server, SNOW_TEXTURE_PATH);

    commands.insert_resource(CityMaterials {
        highrise,
        low_structure: materials.add(textured(
            road.clone(),
            LOW_STRUCTURE_COLOUR,
            ROAD_TEXTURE_REPEAT,
        )),
        dark_road: materials.add(textured(road.clone(), DARK_ROAD_COLOUR, ROAD_TEXTURE_REPEAT)),
        light_road: materials.add(textured(road, LIGHT_ROAD_COLOUR, ROAD_TEXTURE_REPEAT)),
        snow: materials.add(textured(snow, Color::WHITE, SNOW_TEXTURE_REPEAT)),
    });
}
