use crate::constants::path::SETTINGS_PATH;
use crate::engine::assets::game_settings::GameSettings;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::rng::{SceneRng, session_seed};
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::asset::LoadState;
use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct SettingsLoader {
    handle: Option<Handle<GameSettings>>,
}

// Start the loading process
pub fn start_loading(mut settings_loader: ResMut<SettingsLoader>, asset_server: Res<AssetServer>) {
    info!("Loading settings from: {}", SETTINGS_PATH);
    settings_loader.handle = Some(asset_server.load(SETTINGS_PATH));
}

/// Apply settings once they load. A missing or malformed file falls back to defaults.
pub fn apply_settings_system(
    mut commands: Commands,
    settings_loader: Res<SettingsLoader>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    asset_server: Res<AssetServer>,
    settings_assets: Res<Assets<GameSettings>>,
) {
    if loading_progress.settings_applied {
        return;
    }

    let Some(ref handle) = settings_loader.handle else {
        return;
    };

    let settings = if let Some(settings) = settings_assets.get(handle) {
        info!("✓ Settings loaded");
        settings.clone()
    } else if let LoadState::Failed(error) = asset_server.load_state(handle.id()) {
        warn!("Settings unavailable ({}), using defaults", error);
        GameSettings::default()
    } else {
        return;
    };

    let rng = seeded_rng(&settings);
    info!("Scene seed: {}", rng.seed());

    commands.insert_resource(rng);
    commands.insert_resource(settings);
    loading_progress.settings_applied = true;
    rpc_interface.send_notification(
        "loading_progress",
        serde_json::json!({
            "stage": loading_progress.stage()
        }),
    );
}

/// Seed from settings when pinned, otherwise a fresh seed for this session.
pub fn seeded_rng(settings: &GameSettings) -> SceneRng {
    SceneRng::from_seed(settings.seed.unwrap_or_else(session_seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_seed_is_used() {
        let settings = GameSettings {
            seed: Some(31337),
            ..default()
        };
        assert_eq!(seeded_rng(&settings).seed(), 31337);
    }

    #[test]
    fn settings_apply_once_loaded() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<GameSettings>()
            .init_resource::<LoadingProgress>()
            .init_resource::<WebRpcInterface>()
            .add_systems(Update, apply_settings_system);

        let handle = app
            .world_mut()
            .resource_mut::<Assets<GameSettings>>()
            .add(GameSettings {
                seed: Some(8),
                gift_count: 3,
                ..default()
            });
        app.insert_resource(SettingsLoader {
            handle: Some(handle),
        });

        app.update();

        assert!(app.world().resource::<LoadingProgress>().settings_applied);
        assert_eq!(app.world().resource::<GameSettings>().gift_count, 3);
        assert_eq!(app.world().resource::<SceneRng>().seed(), 8);
    }
}
