use crate::constants::path::ASSET_FOLDER;
use crate::engine::assets::game_settings::{GameSettings, GeometrySource};
use crate::engine::core::app_state::{AppState, fail_loading};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::scene_import::SceneLoadError;
use crate::rpc::web_rpc::{RpcError, RpcPayload, RpcResponseReceived, WebRpcInterface};
use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task, block_on, futures_lite::future};
use std::path::{Path, PathBuf};

#[cfg(not(target_arch = "wasm32"))]
use bevy::asset::io::file::FileAssetReader;

/// Raw GLB bytes waiting to be composed into the city.
#[derive(Resource)]
pub struct CityGeometry(pub Vec<u8>);

/// Geometry request in flight. Resolves exactly once; there is no timeout or retry.
#[derive(Resource)]
pub enum GeometryFetch {
    AwaitingRpc {
        id: u64,
    },
    ReadingFile {
        path: String,
        task: Task<Result<Vec<u8>, SceneLoadError>>,
    },
}

pub fn start_geometry_fetch(
    mut commands: Commands,
    settings: Res<GameSettings>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if !loading_progress.settings_applied || loading_progress.geometry_requested {
        return;
    }

    let fetch = match &settings.geometry_source {
        GeometrySource::Rpc { method } => {
            let id = rpc_interface.send_request(method, serde_json::json!({}));
            info!("Requesting city geometry via RPC '{}' (id {})", method, id);
            GeometryFetch::AwaitingRpc { id }
        }
        GeometrySource::File { path } => {
            let resolved = city_file_path(path);
            info!("Reading city geometry from: {}", resolved.display());
            let path = resolved.display().to_string();
            let task = IoTaskPool::get().spawn(async move { read_geometry_file(&resolved) });
            GeometryFetch::ReadingFile { path, task }
        }
    };

    commands.insert_resource(fetch);
    loading_progress.geometry_requested = true;
    rpc_interface.send_notification(
        "loading_progress",
        serde_json::json!({
            "stage": loading_progress.stage()
        }),
    );
}

/// File sources live in the same folder the asset server loads `settings.json`
/// from. Absolute paths are kept as they are.
fn city_file_path(path: &str) -> PathBuf {
    #[cfg(not(target_arch = "wasm32"))]
    let root = FileAssetReader::new(ASSET_FOLDER).root_path().clone();
    #[cfg(target_arch = "wasm32")]
    let root = PathBuf::from(ASSET_FOLDER);

    root.join(path)
}

fn read_geometry_file(path: &Path) -> Result<Vec<u8>, SceneLoadError> {
    std::fs::read(path).map_err(|source| SceneLoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub fn poll_geometry_fetch(
    mut commands: Commands,
    fetch: Option<ResMut<GeometryFetch>>,
    mut responses: EventReader<RpcResponseReceived>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(mut fetch) = fetch else {
        return;
    };

    let outcome = match &mut *fetch {
        GeometryFetch::AwaitingRpc { id } => responses
            .read()
            .find(|response| response.id == *id)
            .map(|response| payload_bytes(&response.outcome)),
        GeometryFetch::ReadingFile { path, task } => {
            let polled = block_on(future::poll_once(task));
            if polled.is_some() {
                debug!("Finished reading {}", path);
            }
            polled
        }
    };

    let Some(outcome) = outcome else {
        return;
    };
    commands.remove_resource::<GeometryFetch>();

    match outcome.and_then(non_empty) {
        Ok(bytes) => {
            info!("✓ City geometry received ({} bytes)", bytes.len());
            commands.insert_resource(CityGeometry(bytes));
            loading_progress.geometry_received = true;
            rpc_interface.send_notification(
                "loading_progress",
                serde_json::json!({
                    "stage": loading_progress.stage()
                }),
            );
        }
        Err(error) => fail_loading(&error, &mut commands, &mut rpc_interface, &mut next_state),
    }
}

fn non_empty(bytes: Vec<u8>) -> Result<Vec<u8>, SceneLoadError> {
    if bytes.is_empty() {
        Err(SceneLoadError::Empty)
    } else {
        Ok(bytes)
    }
}

/// GLB bytes from an RPC result: binary, a JSON byte array, or an object with a `data` byte array.
fn payload_bytes(outcome: &Result<RpcPayload, RpcError>) -> Result<Vec<u8>, SceneLoadError> {
    match outcome {
        Ok(RpcPayload::Binary(bytes)) => Ok(bytes.clone()),
        Ok(RpcPayload::Json(value)) => {
            let array = value
                .as_array()
                .or_else(|| value.get("data").and_then(|data| data.as_array()))
                .ok_or_else(|| {
                    SceneLoadError::Request("geometry result is not a byte array".to_string())
                })?;

            array
                .iter()
                .map(|byte| {
                    byte.as_u64()
                        .and_then(|b| u8::try_from(b).ok())
                        .ok_or_else(|| {
                            SceneLoadError::Request(format!("invalid byte in geometry: {}", byte))
                        })
                })
                .collect()
        }
        Err(error) => Err(SceneLoadError::Request(error.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::path::{DEFAULT_CITY_FILE, SETTINGS_PATH};
    use crate::engine::core::app_state::LoadFailure;
    use bevy::state::app::StatesPlugin;
    use bevy::tasks::TaskPoolBuilder;

    fn fetch_app() -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<AppState>()
            .init_resource::<LoadingProgress>()
            .init_resource::<WebRpcInterface>()
            .add_event::<RpcResponseReceived>()
            .add_systems(Update, poll_geometry_fetch);
        app
    }

    #[test]
    fn binary_and_json_payloads_decode() {
        assert_eq!(
            payload_bytes(&Ok(RpcPayload::Binary(vec![7, 8]))).unwrap(),
            vec![7, 8]
        );
        assert_eq!(
            payload_bytes(&Ok(RpcPayload::Json(serde_json::json!([1, 2, 255])))).unwrap(),
            vec![1, 2, 255]
        );
        assert_eq!(
            payload_bytes(&Ok(RpcPayload::Json(
                serde_json::json!({ "type": "Buffer", "data": [3, 4] })
            )))
            .unwrap(),
            vec![3, 4]
        );
    }

    #[test]
    fn bad_payloads_are_request_errors() {
        let out_of_range = payload_bytes(&Ok(RpcPayload::Json(serde_json::json!([1, 300]))));
        assert!(matches!(out_of_range, Err(SceneLoadError::Request(_))));

        let not_bytes = payload_bytes(&Ok(RpcPayload::Json(serde_json::json!("glb"))));
        assert!(matches!(not_bytes, Err(SceneLoadError::Request(_))));

        let rpc_error = payload_bytes(&Err(RpcError::internal_error("no city")));
        assert!(matches!(rpc_error, Err(SceneLoadError::Request(m)) if m.contains("no city")));
    }

    #[test]
    fn matching_rpc_response_delivers_geometry() {
        let mut app = fetch_app();
        app.insert_resource(GeometryFetch::AwaitingRpc { id: 4 });

        app.world_mut().send_event(RpcResponseReceived {
            id: 3,
            method: "getGltf".to_string(),
            outcome: Ok(RpcPayload::Binary(vec![9])),
        });
        app.update();
        assert!(app.world().get_resource::<CityGeometry>().is_none());

        app.world_mut().send_event(RpcResponseReceived {
            id: 4,
            method: "getGltf".to_string(),
            outcome: Ok(RpcPayload::Binary(vec![1, 2, 3])),
        });
        app.update();

        let geometry = app.world().resource::<CityGeometry>();
        assert_eq!(geometry.0, vec![1, 2, 3]);
        assert!(app.world().resource::<LoadingProgress>().geometry_received);
        assert!(app.world().get_resource::<GeometryFetch>().is_none());
    }

    #[test]
    fn rpc_error_fails_loading() {
        let mut app = fetch_app();
        app.insert_resource(GeometryFetch::AwaitingRpc { id: 1 });
        app.world_mut().send_event(RpcResponseReceived {
            id: 1,
            method: "getGltf".to_string(),
            outcome: Err(RpcError::internal_error("host has no city")),
        });
        app.update();
        app.update();

        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::LoadFailed
        );
        let failure = app.world().resource::<LoadFailure>();
        assert!(failure.message.contains("host has no city"));
    }

    #[test]
    fn file_sources_share_the_settings_folder() {
        let city = city_file_path(DEFAULT_CITY_FILE);
        assert!(city.ends_with(Path::new(ASSET_FOLDER).join(DEFAULT_CITY_FILE)));
        assert!(city.with_file_name(SETTINGS_PATH).is_file());

        let absolute = std::env::temp_dir().join("town.glb");
        assert_eq!(city_file_path(&absolute.display().to_string()), absolute);
    }

    #[test]
    fn missing_file_fails_loading() {
        IoTaskPool::get_or_init(|| TaskPoolBuilder::new().num_threads(1).build());

        let mut app = fetch_app();
        let path = "definitely/not/here/city.glb".to_string();
        let task_path = city_file_path(&path);
        let task = IoTaskPool::get().spawn(async move { read_geometry_file(&task_path) });
        app.insert_resource(GeometryFetch::ReadingFile { path, task });

        for _ in 0..200 {
            app.update();
            if app.world().get_resource::<LoadFailure>().is_some() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }

        assert!(matches!(
            app.world().resource::<LoadFailure>().message.as_str(),
            m if m.contains("definitely/not/here/city.glb")
        ));
    }
}
