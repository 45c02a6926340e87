//! Game settings and preferences
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::persistence;

/// Player preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when the window loses focus
    pub mute_on_blur: bool,
    /// Show FPS counter in the HUD
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            music_volume: 0.9,
            sfx_volume: 1.0,
            mute_on_blur: true,
            show_fps: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "gapwing_settings";

    /// Load settings, falling back to defaults when absent or unreadable
    pub fn load() -> Self {
        match persistence::load_json(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings
    pub fn save(&self) {
        persistence::save_json(Self::STORAGE_KEY, self);
    }

    /// Effective music volume after the master level
    pub fn effective_music_volume(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }

    /// Effective effects volume after the master level
    pub fn effective_sfx_volume(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_audible() {
        let s = Settings::default();
        assert!(s.effective_music_volume() > 0.0);
        assert!(s.effective_sfx_volume() > 0.0);
    }

    #[test]
    fn test_effective_volume_clamps() {
        let s = Settings {
            master_volume: 2.0,
            sfx_volume: 2.0,
            ..Default::default()
        };
        assert_eq!(s.effective_sfx_volume(), 1.0);
    }

    #[test]
    fn test_roundtrip_serde() {
        let s = Settings::default();
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.mute_on_blur, s.mute_on_blur);
        assert_eq!(back.master_volume, s.master_volume);
    }
}
