//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-balanced from the
//! settings file without touching simulation code. All fields default, so a
//! partial JSON object only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE;
use crate::sim::EffectKind;

/// How the score accrues while playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "rule")]
pub enum ScoreRule {
    /// +1 every simulated frame
    PerTick,
    /// +1 every `millis` of simulated playing time
    Interval { millis: u32 },
}

impl Default for ScoreRule {
    fn default() -> Self {
        ScoreRule::Interval { millis: 200 }
    }
}

impl ScoreRule {
    /// Frames between score increments (at least 1)
    pub fn ticks_per_point(&self) -> u32 {
        match *self {
            ScoreRule::PerTick => 1,
            ScoreRule::Interval { millis } => {
                let ticks = (millis as f32 * TICK_RATE as f32 / 1000.0).round() as u32;
                ticks.max(1)
            }
        }
    }
}

/// Width/height pair for an entity box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub w: f32,
    pub h: f32,
}

impl Size {
    pub const fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }
}

/// Effect durations in seconds. Zero or negative disables the effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectDurations {
    pub shield: f32,
    pub slow: f32,
    pub magnet: f32,
    pub invisible: f32,
}

impl Default for EffectDurations {
    fn default() -> Self {
        Self {
            shield: 5.0,
            slow: 5.0,
            magnet: 6.0,
            invisible: 4.0,
        }
    }
}

impl EffectDurations {
    pub fn seconds(&self, kind: EffectKind) -> f32 {
        match kind {
            EffectKind::Shield => self.shield,
            EffectKind::Slow => self.slow,
            EffectKind::Magnet => self.magnet,
            EffectKind::Invisible => self.invisible,
        }
    }
}

/// Gameplay balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_start: (f32, f32),
    pub player_size: Size,
    /// Units per frame on each held axis
    pub player_speed: f32,

    // === Pursuer ===
    pub pursuer_x: f32,
    pub pursuer_base_y: f32,
    pub pursuer_size: Size,
    pub pursuer_amplitude: f32,
    /// Radians per frame
    pub pursuer_angular_rate: f32,
    /// Draw-only shake, in units
    pub pursuer_jitter: f32,
    /// Frames the jitter holds each sign
    pub pursuer_jitter_half_period: u64,
    /// Inclusive frame range between growl cues
    pub pursuer_growl_frames: (u32, u32),

    // === Obstacles ===
    pub obstacle_size: Size,
    /// Spawn x offset past the right edge, inclusive
    pub obstacle_spawn_offset: (f32, f32),
    /// Speed multiplier while `slow` is active
    pub slow_factor: f32,

    // === Coins ===
    pub coin_size: Size,
    pub coin_speed: f32,
    pub coin_spawn_range: u32,
    pub coin_spawn_offset: (f32, f32),
    pub coin_value: u64,

    // === Power-ups ===
    pub power_up_size: Size,
    pub power_up_speed: f32,
    pub power_up_spawn_range: u32,
    pub power_up_spawn_offset: (f32, f32),
    /// Kinds rolled on spawn
    pub power_up_kinds: Vec<EffectKind>,
    pub effect_durations: EffectDurations,
    pub notification_secs: f32,

    // === Magnet ===
    pub magnet_radius: f32,
    pub magnet_speed: f32,

    // === Spawn test ===
    /// A draw below this spawns
    pub spawn_threshold: u32,

    // === Difficulty ratchet ===
    pub initial_difficulty: u32,
    pub difficulty_step: u32,
    pub initial_spawn_rate: u32,
    pub spawn_rate_step: u32,
    pub spawn_rate_floor: u32,
    pub milestone_interval: u64,

    pub score_rule: ScoreRule,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_start: (150.0, 300.0),
            player_size: Size::new(100.0, 60.0),
            player_speed: 5.0,

            pursuer_x: 10.0,
            pursuer_base_y: 300.0,
            pursuer_size: Size::new(80.0, 60.0),
            pursuer_amplitude: 150.0,
            pursuer_angular_rate: 0.02,
            pursuer_jitter: 3.0,
            pursuer_jitter_half_period: 5,
            pursuer_growl_frames: (300, 500),

            obstacle_size: Size::new(50.0, 60.0),
            obstacle_spawn_offset: (0.0, 200.0),
            slow_factor: 0.5,

            coin_size: Size::new(30.0, 30.0),
            coin_speed: 4.0,
            coin_spawn_range: 500,
            coin_spawn_offset: (0.0, 300.0),
            coin_value: 10,

            power_up_size: Size::new(40.0, 40.0),
            power_up_speed: 3.0,
            power_up_spawn_range: 800,
            power_up_spawn_offset: (0.0, 300.0),
            power_up_kinds: vec![EffectKind::Shield, EffectKind::Slow, EffectKind::Magnet],
            effect_durations: EffectDurations::default(),
            notification_secs: 2.0,

            magnet_radius: 150.0,
            magnet_speed: 6.0,

            spawn_threshold: 2,

            initial_difficulty: 5,
            difficulty_step: 1,
            initial_spawn_rate: 100,
            spawn_rate_step: 5,
            spawn_rate_floor: 30,
            milestone_interval: 200,

            score_rule: ScoreRule::default(),
        }
    }
}

impl Tuning {
    /// Duration of an effect in frames (0 when disabled)
    pub fn effect_ticks(&self, kind: EffectKind) -> u64 {
        crate::seconds_to_ticks(self.effect_durations.seconds(kind))
    }

    pub fn notification_ticks(&self) -> u64 {
        crate::seconds_to_ticks(self.notification_secs)
    }
}
