//! Cone Chaos - a side-scrolling dodge-the-cones arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, spawning, effects, scoring)
//! - `renderer`: Scene building and terminal rasterisation
//! - `platform`: Terminal input and frame pacing
//! - `audio`: Cue and music routing with fail-soft backends
//! - `tuning`: Data-driven game balance
//! - `settings`: Preferences loaded from a JSON file

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{Settings, SettingsError};
pub use tuning::{ScoreRule, Tuning};

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate (one tick per frame)
    pub const TICK_RATE: u32 = 60;
    /// Duration of one tick in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;

    /// Playfield dimensions in world units
    pub const SCREEN_WIDTH: f32 = 1000.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
}

/// Convert a duration in seconds to whole ticks (0 for non-positive input)
#[inline]
pub fn seconds_to_ticks(secs: f32) -> u64 {
    if secs <= 0.0 {
        0
    } else {
        (secs * consts::TICK_RATE as f32).round() as u64
    }
}

/// Convert ticks back to seconds, for display
#[inline]
pub fn ticks_to_seconds(ticks: u64) -> f32 {
    ticks as f32 / consts::TICK_RATE as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_to_ticks() {
        assert_eq!(seconds_to_ticks(2.0), 120);
        assert_eq!(seconds_to_ticks(0.0), 0);
        assert_eq!(seconds_to_ticks(-1.0), 0);
        assert!((ticks_to_seconds(90) - 1.5).abs() < f32::EPSILON);
    }
}
