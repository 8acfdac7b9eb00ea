use std::path::Path;

use bevy::prelude::*;
use kinematics::LocomotionConfig;

pub const SETTINGS_PATH: &str = "assets/locomotion.ron";

/// Locomotion tuning shared by every actor in this process
#[derive(Clone, Debug, Default, Deref, Resource)]
pub struct Settings(pub LocomotionConfig);

impl Settings {
    /// Read tuning from `path`, keeping the defaults if it is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match LocomotionConfig::load(path) {
            Ok(config) => {
                info!("loaded locomotion settings from {}", path.display());
                Settings(config)
            }
            Err(err) => {
                warn!("using default locomotion settings, {}: {err}", path.display());
                Settings::default()
            }
        }
    }
}
