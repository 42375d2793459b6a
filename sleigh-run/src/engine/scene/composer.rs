use crate::engine::assets::bounds::SceneBounds;
use crate::engine::assets::city_textures::CityMaterials;
use crate::engine::assets::game_settings::GameSettings;
use crate::engine::core::app_state::{AppState, fail_loading};
use crate::engine::gifts::registry::GiftRegistry;
use crate::engine::gifts::spawner::{Gift, generate_gifts, spawn_gifts};
use crate::engine::loading::geometry_fetch::CityGeometry;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::scene_import::{SceneLoadError, parse_glb};
use crate::engine::scene::city::spawn_city_meshes;
use crate::engine::scene::classifier::{ClassifiedMesh, classify_mesh};
use crate::engine::scene::probe::TriangleSoupProbe;
use crate::engine::scene::props::spawn_props;
use crate::engine::scene::rng::SceneRng;
use crate::engine::scene::scatter::{PropPlacement, scatter_props};
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;

/// Everything the city needs before anything is spawned.
#[derive(Debug, Clone)]
pub struct CityLayout {
    pub meshes: Vec<ClassifiedMesh>,
    pub bounds: SceneBounds,
    pub props: Vec<PropPlacement>,
    pub gifts: Vec<Gift>,
}

impl CityLayout {
    /// Mesh count per class name, for logging.
    pub fn class_counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::default();
        for mesh in &self.meshes {
            *counts.entry(mesh.class.name()).or_insert(0) += 1;
        }
        counts
    }
}

/// Parse, classify, scatter and generate gifts, in that order, from one RNG stream.
pub fn compose_city(
    bytes: &[u8],
    settings: &GameSettings,
    rng: &mut SceneRng,
) -> Result<CityLayout, SceneLoadError> {
    let meshes: Vec<ClassifiedMesh> = parse_glb(bytes)?
        .into_iter()
        .map(|mesh| classify_mesh(mesh, rng))
        .collect();

    let bounds = SceneBounds::from_points(meshes.iter().flat_map(|m| m.world_positions.iter()))
        .ok_or(SceneLoadError::Empty)?;

    let probe = TriangleSoupProbe::from_meshes(&meshes);
    let props = scatter_props(
        &bounds,
        &probe,
        rng,
        settings.scatter_trials,
        settings.ramp_chance,
    );
    let gifts = generate_gifts(&bounds, settings.gift_count, rng);

    Ok(CityLayout {
        meshes,
        bounds,
        props,
        gifts,
    })
}

pub fn compose_city_system(
    mut commands: Commands,
    geometry: Res<CityGeometry>,
    settings: Res<GameSettings>,
    mut rng: ResMut<SceneRng>,
    city_materials: Res<CityMaterials>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut registry: ResMut<GiftRegistry>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    commands.remove_resource::<CityGeometry>();

    let layout = match compose_city(&geometry.0, &settings, &mut rng) {
        Ok(layout) => layout,
        Err(error) => {
            fail_loading(&error, &mut commands, &mut rpc_interface, &mut next_state);
            return;
        }
    };

    info!(
        "City composed: {} meshes {:?}, {} props, {} gifts",
        layout.meshes.len(),
        layout.class_counts(),
        layout.props.len(),
        layout.gifts.len()
    );

    spawn_city_meshes(
        &mut commands,
        &mut meshes,
        &mut materials,
        &city_materials,
        &layout.meshes,
    );
    spawn_props(&mut commands, &mut meshes, &mut materials, &layout.props);
    spawn_gifts(&mut commands, &mut meshes, &mut materials, &layout.gifts);

    registry.reset(layout.gifts);
    commands.insert_resource(layout.bounds);
    loading_progress.scene_composed = true;
}
