use crate::engine::core::app_state::LoadFailure;
use bevy::prelude::*;

#[derive(Component)]
pub struct FailureOverlay;

/// Runs on entering `LoadFailed`.
pub fn show_load_failure(mut commands: Commands, failure: Option<Res<LoadFailure>>) {
    let detail = failure.map_or_else(
        || "unknown error".to_string(),
        |failure| failure.message.clone(),
    );

    commands
        .spawn((
            FailureOverlay,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(12.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.15, 0.02, 0.02)),
            GlobalZIndex(10),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("The city could not be loaded"),
                TextFont {
                    font_size: 32.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                Text::new(detail),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.6, 0.6)),
            ));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_shows_failure_message() {
        let mut app = App::new();
        app.insert_resource(LoadFailure {
            message: "GLB contained no triangle meshes".to_string(),
        })
        .add_systems(Update, show_load_failure);
        app.update();

        let mut texts = app.world_mut().query::<&Text>();
        let lines: Vec<String> = texts.iter(app.world()).map(|t| t.0.clone()).collect();
        assert!(lines.iter().any(|l| l.contains("no triangle meshes")));

        let mut overlays = app.world_mut().query::<&FailureOverlay>();
        assert_eq!(overlays.iter(app.world()).count(), 1);
    }
}
