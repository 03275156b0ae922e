//! Timed status effects picked up from power-ups
//!
//! Expiry is polled: each playing frame starts by dropping every effect whose
//! expiry tick has been reached, so the rest of the frame can treat presence
//! in the set as "active".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::state::World;
use crate::tuning::Tuning;

/// A named temporary gameplay modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Obstacle collisions are ignored
    Shield,
    /// Obstacles move at reduced speed
    Slow,
    /// Nearby coins and power-ups are pulled toward the player
    Magnet,
    /// Pursuer contact is ignored
    Invisible,
}

impl EffectKind {
    pub const ALL: [EffectKind; 4] = [
        EffectKind::Shield,
        EffectKind::Slow,
        EffectKind::Magnet,
        EffectKind::Invisible,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::Shield => "Shield",
            EffectKind::Slow => "Slow",
            EffectKind::Magnet => "Magnet",
            EffectKind::Invisible => "Invisible",
        }
    }
}

/// Effect kind -> absolute expiry tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    expiries: BTreeMap<EffectKind, u64>,
}

impl ActiveEffects {
    /// Remove every effect whose expiry is at or before `now`.
    /// Returns the kinds that were dropped.
    pub fn expire(&mut self, now: u64) -> Vec<EffectKind> {
        let expired: Vec<EffectKind> = self
            .expiries
            .iter()
            .filter(|&(_, &at)| at <= now)
            .map(|(&kind, _)| kind)
            .collect();
        for kind in &expired {
            self.expiries.remove(kind);
        }
        expired
    }

    /// Set (or reset) an effect to expire `duration` ticks after `now`.
    /// A zero duration leaves the set untouched and returns false.
    pub fn activate(&mut self, kind: EffectKind, now: u64, duration: u64) -> bool {
        if duration == 0 {
            return false;
        }
        self.expiries.insert(kind, now + duration);
        true
    }

    #[inline]
    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.expiries.contains_key(&kind)
    }

    pub fn expiry(&self, kind: EffectKind) -> Option<u64> {
        self.expiries.get(&kind).copied()
    }

    /// Ticks left before `kind` expires
    pub fn remaining(&self, kind: EffectKind, now: u64) -> Option<u64> {
        self.expiry(kind).map(|at| at.saturating_sub(now))
    }

    /// Active effects in stable kind order
    pub fn iter(&self) -> impl Iterator<Item = (EffectKind, u64)> + '_ {
        self.expiries.iter().map(|(&kind, &at)| (kind, at))
    }

    pub fn len(&self) -> usize {
        self.expiries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expiries.is_empty()
    }

    pub fn clear(&mut self) {
        self.expiries.clear();
    }
}

/// A transient on-screen message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub text: String,
    pub expires_at: u64,
}

impl Notification {
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.expires_at
    }
}

/// Drop expired effects and a stale notification. Runs first in every playing frame.
pub fn expire_effects(world: &mut World) {
    let now = world.time_ticks;
    for kind in world.effects.expire(now) {
        log::debug!("{} wore off at tick {}", kind.as_str(), now);
    }
    if world.notification.as_ref().is_some_and(|n| n.is_expired(now)) {
        world.notification = None;
    }
}

/// Apply a picked-up power-up
pub fn activate_power_up(world: &mut World, kind: EffectKind, tuning: &Tuning) {
    let now = world.time_ticks;
    if world.effects.activate(kind, now, tuning.effect_ticks(kind)) {
        log::debug!(
            "{} active until tick {}",
            kind.as_str(),
            world.effects.expiry(kind).unwrap_or(now)
        );
    }
    world.notification = Some(Notification {
        text: format!("{} activated!", kind.as_str()),
        expires_at: now + tuning.notification_ticks(),
    });
}
