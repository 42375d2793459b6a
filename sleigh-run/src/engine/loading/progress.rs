use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub settings_applied: bool,
    pub geometry_requested: bool,
    pub geometry_received: bool,
    pub scene_composed: bool,
}

impl LoadingProgress {
    /// Name of the stage currently in flight, reported to the host page.
    pub fn stage(&self) -> &'static str {
        if self.scene_composed {
            "composed"
        } else if self.geometry_received {
            "composing"
        } else if self.geometry_requested {
            "fetching_geometry"
        } else if self.settings_applied {
            "settings_applied"
        } else {
            "loading_settings"
        }
    }
}
