//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame)
//! - Seeded RNG only
//! - Stable iteration order (spawn order, by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod effects;
pub mod kinematics;
pub mod rect;
pub mod scoring;
pub mod spawn;
pub mod state;
pub mod tick;

#[cfg(test)]
mod properties;

pub use collision::{CollisionReport, Resolution, detect, pursuer_reaches, resolve};
pub use effects::{ActiveEffects, EffectKind, Notification, activate_power_up, expire_effects};
pub use kinematics::{Held, advance, jitter_for_frame, oscillation_y};
pub use rect::Rect;
pub use scoring::{accrue, award};
pub use spawn::{prune, roll, spawn};
pub use state::{
    CAR_ROSTER, Entity, EntityKind, GameEvent, GamePhase, GameSession, MusicTrack, PauseOption,
    Pursuer, RunState, SoundCue, World,
};
pub use tick::{TickInput, tick};
