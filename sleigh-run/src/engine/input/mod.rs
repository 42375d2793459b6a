//! Keyboard input mapped to named game actions.

/// Action names and the key binding table.
pub mod actions;

/// Per-frame held and edge-triggered action state.
pub mod action_state;

use bevy::input::InputSystem;
use bevy::prelude::*;

pub use actions::{Action, KeyBindings};

pub struct ActionInputPlugin;

impl Plugin for ActionInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ButtonInput<Action>>()
            .init_resource::<KeyBindings>()
            .add_systems(
                PreUpdate,
                action_state::update_action_state.after(InputSystem),
            );
    }
}
