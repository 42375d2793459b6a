use bevy::prelude::*;
use constants::gifts::PICKUP_SOUND_PATH;

/// Pickup sound owned by the gift system. Only one instance plays at a time.
#[derive(Resource, Debug)]
pub struct GiftChime {
    sound: Handle<AudioSource>,
    playing: Option<Entity>,
}

impl GiftChime {
    pub fn new(sound: Handle<AudioSource>) -> Self {
        Self {
            sound,
            playing: None,
        }
    }

    /// Play the chime from the start, cutting off any instance still ringing.
    pub fn restart(&mut self, commands: &mut Commands) {
        if let Some(previous) = self.playing.take() {
            commands.entity(previous).try_despawn();
        }

        let player = commands
            .spawn((
                AudioPlayer::new(self.sound.clone()),
                PlaybackSettings::DESPAWN,
            ))
            .id();
        self.playing = Some(player);
    }
}

pub fn load_gift_chime(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(GiftChime::new(asset_server.load(PICKUP_SOUND_PATH)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restart_keeps_a_single_player() {
        let mut app = App::new();
        app.insert_resource(GiftChime::new(Handle::default()));
        app.add_systems(Update, |mut commands: Commands, mut chime: ResMut<GiftChime>| {
            chime.restart(&mut commands);
        });

        app.update();
        app.update();
        app.update();

        let world = app.world_mut();
        let players = world.query::<&AudioPlayer>().iter(world).count();
        assert_eq!(players, 1);
    }
}
