use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Back,
    Left,
    Right,
    Jump,
    Reset,
    Boost,
    ToggleOrbit,
    ToggleDebug,
    ToggleHelp,
    ToggleFullscreen,
    Confirm,
}

impl Action {
    pub const ALL: [Action; 12] = [
        Action::Forward,
        Action::Back,
        Action::Left,
        Action::Right,
        Action::Jump,
        Action::Reset,
        Action::Boost,
        Action::ToggleOrbit,
        Action::ToggleDebug,
        Action::ToggleHelp,
        Action::ToggleFullscreen,
        Action::Confirm,
    ];
}

/// Keys bound to each action. Several keys may drive the same action.
#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(Action, Vec<KeyCode>)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use KeyCode::*;

        Self {
            bindings: vec![
                (Action::Forward, vec![ArrowUp, KeyW]),
                (Action::Back, vec![ArrowDown, KeyS]),
                (Action::Left, vec![ArrowLeft, KeyA]),
                (Action::Right, vec![ArrowRight, KeyD]),
                (Action::Jump, vec![Space]),
                (Action::Reset, vec![KeyR]),
                (Action::Boost, vec![ShiftLeft, ShiftRight]),
                (Action::ToggleOrbit, vec![KeyO]),
                (Action::ToggleDebug, vec![KeyP]),
                (Action::ToggleHelp, vec![KeyH]),
                (Action::ToggleFullscreen, vec![KeyF]),
                (Action::Confirm, vec![Enter, NumpadEnter]),
            ],
        }
    }
}

impl KeyBindings {
    pub fn keys_for(&self, action: Action) -> &[KeyCode] {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == action)
            .map_or(&[], |(_, keys)| keys.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_has_a_key() {
        let bindings = KeyBindings::default();
        for action in Action::ALL {
            assert!(!bindings.keys_for(action).is_empty(), "{action:?} unbound");
        }
    }

    #[test]
    fn arrows_and_wasd_share_actions() {
        let bindings = KeyBindings::default();
        assert!(bindings.keys_for(Action::Forward).contains(&KeyCode::KeyW));
        assert!(bindings.keys_for(Action::Forward).contains(&KeyCode::ArrowUp));
        assert!(bindings.keys_for(Action::Confirm).contains(&KeyCode::NumpadEnter));
    }
}
