use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::scene_import::SceneLoadError;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
    LoadFailed,
}

impl AppState {
    pub fn label(self) -> &'static str {
        match self {
            AppState::Loading => "loading",
            AppState::Running => "running",
            AppState::LoadFailed => "load_failed",
        }
    }
}

/// Why loading stopped. Present only in [`AppState::LoadFailed`].
#[derive(Resource, Debug, Clone)]
pub struct LoadFailure {
    pub message: String,
}

/// Surface a loading failure: log it, tell the host page and park the app in `LoadFailed`.
pub fn fail_loading(
    error: &SceneLoadError,
    commands: &mut Commands,
    rpc_interface: &mut WebRpcInterface,
    next_state: &mut NextState<AppState>,
) {
    error!("City scene failed to load: {}", error);
    rpc_interface.send_notification(
        "scene_load_failed",
        serde_json::json!({
            "message": error.to_string()
        }),
    );
    commands.insert_resource(LoadFailure {
        message: error.to_string(),
    });
    next_state.set(AppState::LoadFailed);
}

// Final transition to running state
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.scene_composed {
        info!("→ City composed, transitioning to Running state");
        rpc_interface.send_notification("scene_ready", serde_json::json!({}));
        next_state.set(AppState::Running);
    }
}
