use crate::engine::input::actions::{Action, KeyBindings};
use bevy::prelude::*;

/// Fold key state into action state. An action is held while any of its keys is,
/// and `just_pressed` fires only on the transition from no key held.
pub fn update_action_state(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut actions: ResMut<ButtonInput<Action>>,
) {
    actions.clear();

    for action in Action::ALL {
        let held = bindings
            .keys_for(action)
            .iter()
            .any(|key| keys.pressed(*key));

        match (held, actions.pressed(action)) {
            (true, false) => actions.press(action),
            (false, true) => actions.release(action),
            _ => {}
        }
    }
}
