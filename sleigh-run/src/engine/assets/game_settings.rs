use crate::constants::path;
use crate::engine::camera::CameraTuning;
use crate::engine::vehicle::controller::DriveTuning;
use bevy::prelude::*;
use constants::gifts::GIFT_COUNT;
use constants::scatter::{RAMP_CHANCE, SCATTER_TRIALS};
use serde::{Deserialize, Serialize};

/// Where the city GLB comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeometrySource {
    /// Ask the host page, which answers with the GLB bytes.
    Rpc { method: String },
    /// Read a GLB from disk. Relative paths resolve inside the asset folder.
    File { path: String },
}

impl Default for GeometrySource {
    fn default() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            GeometrySource::Rpc {
                method: path::DEFAULT_GEOMETRY_METHOD.to_string(),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            GeometrySource::File {
                path: path::DEFAULT_CITY_FILE.to_string(),
            }
        }
    }
}

/// Runtime settings loaded from `settings.json`. Every field is optional.
#[derive(Asset, Resource, TypePath, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Fixed seed for city dressing; a fresh one is drawn per session when absent.
    pub seed: Option<u64>,
    pub geometry_source: GeometrySource,
    pub gift_count: usize,
    pub scatter_trials: usize,
    pub ramp_chance: f32,
    pub drive: DriveTuning,
    pub camera: CameraTuning,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            seed: None,
            geometry_source: GeometrySource::default(),
            gift_count: GIFT_COUNT,
            scatter_trials: SCATTER_TRIALS,
            ramp_chance: RAMP_CHANCE,
            drive: DriveTuning::default(),
            camera: CameraTuning::default(),
        }
    }
}
