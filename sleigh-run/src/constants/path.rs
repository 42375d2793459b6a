/// Folder the default asset source reads from.
pub const ASSET_FOLDER: &str = "assets";

/// Runtime settings overriding the compiled defaults.
pub const SETTINGS_PATH: &str = "settings.json";

/// City geometry used by native builds when no source is configured.
/// Relative to [`ASSET_FOLDER`], like every other asset.
pub const DEFAULT_CITY_FILE: &str = "city.glb";

/// Host RPC method returning the city GLB on wasm builds.
pub const DEFAULT_GEOMETRY_METHOD: &str = "getGltf";
