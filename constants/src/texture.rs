/// Number of high-rise facade textures (`highrise/highrise1.jpeg` ..).
pub const HIGHRISE_TEXTURE_COUNT: usize = 11;

pub const HIGHRISE_TEXTURE_STEM: &str = "highrise/highrise";
pub const HIGHRISE_TEXTURE_EXTENSION: &str = "jpeg";

pub const ROAD_TEXTURE_PATH: &str = "road.jpg";
pub const ROAD_TEXTURE_REPEAT: f32 = 1.0;

pub const SNOW_TEXTURE_PATH: &str = "snow.jpg";
pub const SNOW_TEXTURE_REPEAT: f32 = 100.0;

/// Scale for planar UVs generated on meshes that ship without texture coordinates.
pub const PLANAR_UV_SCALE: f32 = 0.1;

/// Asset path of the `index`-th high-rise texture, counting from zero.
pub fn highrise_texture_path(index: usize) -> String {
    format!(
        "{}{}.{}",
        HIGHRISE_TEXTURE_STEM,
        index + 1,
        HIGHRISE_TEXTURE_EXTENSION
    )
}
