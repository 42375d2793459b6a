use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use bevy_rapier3d::prelude::*;
use constants::render_settings::CLEAR_COLOUR;

use crate::constants::path::ASSET_FOLDER;
use crate::engine::assets::city_textures::load_city_materials;
use crate::engine::assets::game_settings::GameSettings;
use crate::engine::camera::camera_mode::{CameraMode, spawn_camera, toggle_camera_mode};
use crate::engine::camera::chase::chase_camera;
use crate::engine::camera::orbit::{OrbitCamera, orbit_camera};
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::gifts::chime::load_gift_chime;
use crate::engine::gifts::collection::collect_gifts;
use crate::engine::gifts::registry::GiftRegistry;
use crate::engine::gifts::spawner::spin_gifts;
use crate::engine::input::ActionInputPlugin;
use crate::engine::loading::geometry_fetch::{
    CityGeometry, poll_geometry_fetch, start_geometry_fetch,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::settings_loader::{SettingsLoader, apply_settings_system, start_loading};
use crate::engine::scene::composer::compose_city_system;
use crate::engine::scene::ground::{spawn_ground, spawn_lighting};
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::systems::music::start_background_music;
use crate::engine::systems::toggles::{toggle_fullscreen, toggle_physics_debug};
use crate::engine::ui::failure::show_load_failure;
use crate::engine::ui::splash::{
    SplashDismissed, SplashState, handle_splash_input, show_ready_prompt, spawn_splash,
};
use crate::engine::vehicle::rapier_body::drive_vehicle;
use crate::engine::vehicle::spawn::{
    attach_vehicle_hull, follow_shadow, spawn_vehicle, start_sled_animation,
};
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::ui::fps_text::spawn_fps_text;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .insert_resource(ClearColor(CLEAR_COLOUR))
        .init_state::<AppState>()
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins(RapierDebugRenderPlugin {
            enabled: false,
            ..default()
        })
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers GameSettings as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<GameSettings>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(ActionInputPlugin);

    // Initialise resources early
    app.init_resource::<GameSettings>()
        .init_resource::<LoadingProgress>()
        .init_resource::<SettingsLoader>()
        .init_resource::<GiftRegistry>()
        .init_resource::<CameraMode>()
        .init_resource::<OrbitCamera>()
        .init_resource::<SplashState>()
        .add_event::<SplashDismissed>();

    app.add_systems(
        Startup,
        (
            (load_city_materials, spawn_ground).chain(),
            spawn_lighting,
            spawn_camera,
            spawn_vehicle,
            load_gift_chime,
            spawn_splash,
            start_loading,
        ),
    );

    // Loading phase: settings, then geometry, then the composed city.
    app.add_systems(
        Update,
        (
            apply_settings_system,
            start_geometry_fetch,
            poll_geometry_fetch,
            compose_city_system.run_if(resource_exists::<CityGeometry>),
            transition_to_running,
        )
            .chain()
            .run_if(in_state(AppState::Loading)),
    )
    .add_systems(OnEnter(AppState::Running), show_ready_prompt)
    .add_systems(OnEnter(AppState::LoadFailed), show_load_failure);

    // Gameplay only runs once the city exists.
    app.add_systems(
        Update,
        (drive_vehicle, collect_gifts, spin_gifts).run_if(in_state(AppState::Running)),
    );

    // Shell systems run in every state.
    app.add_systems(
        Update,
        (
            toggle_camera_mode,
            (chase_camera, orbit_camera).after(toggle_camera_mode),
            attach_vehicle_hull,
            follow_shadow,
            start_sled_animation,
            handle_splash_input,
            start_background_music.after(handle_splash_input),
            toggle_physics_debug,
            toggle_fullscreen,
            fps_notification_system,
        ),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, spawn_fps_text)
            .add_systems(Update, fps_text_update_system);
    }

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        file_path: ASSET_FOLDER.to_string(),
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
