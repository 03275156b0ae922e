//! Game settings and preferences
//!
//! Read from an optional JSON file at startup. Every field has a default, so a
//! missing or partial file still yields a playable configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Default settings file, looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "cone-chaos.json";

/// Why a settings file could not be used
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === Loop ===
    /// Frames per second the front end paces at
    pub target_fps: u32,
    /// Fixed RNG seed (random per launch when absent)
    pub seed: Option<u64>,

    // === HUD ===
    /// Show remaining time on active effects
    pub show_effect_timers: bool,

    /// Gameplay balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 0.1,
            music_volume: 0.15,
            muted: false,

            target_fps: crate::consts::TICK_RATE,
            seed: None,

            show_effect_timers: true,

            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure.
    ///
    /// A missing default file is expected and logged at info; anything else
    /// is a warning.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let explicit = path.is_some();
        let path = path.unwrap_or(Path::new(DEFAULT_SETTINGS_FILE));
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(SettingsError::Io(e)) if !explicit && e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("{} ({}); using defaults", e, path.display());
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Effective cue volume (0 when muted)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective music volume (0 when muted)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Frame rate clamped to something the loop can pace
    pub fn frame_rate(&self) -> u32 {
        self.target_fps.clamp(10, 240)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_override() {
        let settings =
            Settings::from_json(r#"{ "seed": 42, "muted": true, "tuning": { "coin_value": 50 } }"#)
                .unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.tuning.coin_value, 50);
        assert_eq!(settings.tuning.initial_difficulty, 5);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("cone-chaos-does-not-exist.json");
        assert!(matches!(Settings::load_from(&path), Err(SettingsError::Io(_))));
        assert_eq!(Settings::load_or_default(Some(&path)), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("cone-chaos-{}.json", std::process::id()));
        let settings = Settings {
            seed: Some(7),
            target_fps: 30,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_frame_rate_clamped() {
        let settings = Settings {
            target_fps: 0,
            ..Default::default()
        };
        assert_eq!(settings.frame_rate(), 10);
    }
}
