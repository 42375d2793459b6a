use crate::engine::input::Action;
use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, WindowMode};
use bevy_rapier3d::render::DebugRenderContext;

/// Flip rapier's collider wireframes.
pub fn toggle_physics_debug(
    actions: Res<ButtonInput<Action>>,
    debug_render: Option<ResMut<DebugRenderContext>>,
) {
    if !actions.just_pressed(Action::ToggleDebug) {
        return;
    }
    let Some(mut debug_render) = debug_render else {
        return;
    };

    debug_render.enabled = !debug_render.enabled;
    info!("Physics debug rendering: {}", debug_render.enabled);
}

pub fn toggled_window_mode(mode: WindowMode) -> WindowMode {
    match mode {
        WindowMode::Windowed => WindowMode::BorderlessFullscreen(MonitorSelection::Current),
        _ => WindowMode::Windowed,
    }
}

pub fn toggle_fullscreen(
    actions: Res<ButtonInput<Action>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !actions.just_pressed(Action::ToggleFullscreen) {
        return;
    }
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    window.mode = toggled_window_mode(window.mode);
    info!("Window mode: {:?}", window.mode);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fullscreen_round_trips() {
        let full = toggled_window_mode(WindowMode::Windowed);
        assert_eq!(
            full,
            WindowMode::BorderlessFullscreen(MonitorSelection::Current)
        );
        assert_eq!(toggled_window_mode(full), WindowMode::Windowed);
    }

    #[test]
    fn debug_toggle_flips_rapier_rendering() {
        let mut app = App::new();
        app.init_resource::<ButtonInput<Action>>()
            .insert_resource(DebugRenderContext {
                enabled: false,
                ..default()
            })
            .add_systems(Update, toggle_physics_debug);

        app.world_mut()
            .resource_mut::<ButtonInput<Action>>()
            .press(Action::ToggleDebug);
        app.update();
        assert!(app.world().resource::<DebugRenderContext>().enabled);

        app.world_mut()
            .resource_mut::<ButtonInput<Action>>()
            .clear();
        app.update();
        assert!(app.world().resource::<DebugRenderContext>().enabled);
    }
}
