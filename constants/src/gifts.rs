pub const GIFT_COUNT: usize = 200;

/// Gifts are spawned inside the scene box scaled by this factor about the origin.
pub const GIFT_REGION_FACTOR: f32 = 0.5;

pub const GIFT_HEIGHT: f32 = 0.4;
pub const GIFT_SIZE: f32 = 0.4;
pub const GIFT_TRIGGER_HALF_EXTENT: f32 = 0.5;
pub const GIFT_TILT: f32 = 0.5;
pub const GIFT_SPIN_SPEED: f32 = 1.0;

pub const PICKUP_SOUND_PATH: &str = "bell.mp3";
pub const MUSIC_PATH: &str = "music.mp3";
