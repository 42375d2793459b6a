use crate::engine::core::app_state::AppState;
use crate::engine::input::Action;
use bevy::prelude::*;

/// Sent the first time the player dismisses the splash.
#[derive(Event, Debug, Clone, Copy)]
pub struct SplashDismissed;

/// Root of the splash/help overlay.
#[derive(Component)]
pub struct SplashOverlay;

/// The line that reads "loading…" until the city is ready.
#[derive(Component)]
pub struct SplashPrompt;

#[derive(Resource, Debug, Default)]
pub struct SplashState {
    /// Set once the player has confirmed; help toggling only works afterwards.
    pub dismissed: bool,
}

pub const LOADING_PROMPT: &str = "loading…";
pub const READY_PROMPT: &str = "press Enter to continue";

const CONTROLS: &str = "\
arrows / WASD  drive
shift          boost
space          jump
R              reset
O              orbit camera
P              physics debug
F              fullscreen
H              help";

pub fn spawn_splash(mut commands: Commands) {
    commands
        .spawn((
            SplashOverlay,
            Visibility::default(),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::BLACK.with_alpha(0.6)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Sleigh Run"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                Text::new("Collect every gift in the city."),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                Text::new(CONTROLS),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.85)),
            ));
            parent.spawn((
                SplashPrompt,
                Text::new(LOADING_PROMPT),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.85, 0.3)),
            ));
        });
}

/// Runs on entering `Running`.
pub fn show_ready_prompt(mut prompts: Query<&mut Text, With<SplashPrompt>>) {
    for mut text in &mut prompts {
        text.0 = READY_PROMPT.to_string();
    }
}

/// Confirm hides the splash once the city is running; help toggles it back
/// after that first dismissal.
pub fn handle_splash_input(
    actions: Res<ButtonInput<Action>>,
    state: Res<State<AppState>>,
    mut splash: ResMut<SplashState>,
    mut overlays: Query<&mut Visibility, With<SplashOverlay>>,
    mut dismissed: EventWriter<SplashDismissed>,
) {
    let Ok(mut visibility) = overlays.single_mut() else {
        return;
    };

    let ready = *state.get() == AppState::Running;
    if ready && actions.just_pressed(Action::Confirm) && *visibility != Visibility::Hidden {
        *visibility = Visibility::Hidden;
        if !splash.dismissed {
            splash.dismissed = true;
            dismissed.write(SplashDismissed);
        }
    } else if actions.just_pressed(Action::ToggleHelp) && splash.dismissed {
        *visibility = match *visibility {
            Visibility::Hidden => Visibility::Inherited,
            _ => Visibility::Hidden,
        };
    }
}
