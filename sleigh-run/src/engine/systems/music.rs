use crate::engine::ui::splash::SplashDismissed;
use bevy::prelude::*;
use constants::gifts::MUSIC_PATH;

#[derive(Component)]
pub struct BackgroundMusic;

/// Browsers only allow audio after a user gesture, so music waits for the splash.
pub fn start_background_music(
    mut commands: Commands,
    mut dismissed: EventReader<SplashDismissed>,
    asset_server: Res<AssetServer>,
    playing: Query<(), With<BackgroundMusic>>,
) {
    if dismissed.read().count() == 0 || !playing.is_empty() {
        return;
    }

    info!("Starting background music");
    commands.spawn((
        BackgroundMusic,
        AudioPlayer::new(asset_server.load(MUSIC_PATH)),
        PlaybackSettings::LOOP,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn music_starts_once() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<AudioSource>()
            .add_event::<SplashDismissed>()
            .add_systems(Update, start_background_music);

        app.update();
        let mut music = app.world_mut().query::<&BackgroundMusic>();
        assert_eq!(music.iter(app.world()).count(), 0);

        app.world_mut().send_event(SplashDismissed);
        app.update();
        app.world_mut().send_event(SplashDismissed);
        app.update();

        assert_eq!(music.iter(app.world()).count(), 1);
    }
}
