//! Per-frame entity movement
//!
//! One call advances every entity by exactly one tick. The player is clamped to
//! the screen; everything else drifts left and may leave it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::effects::EffectKind;
use super::state::{Entity, EntityKind, World, roll_growl_countdown};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::tuning::Tuning;

/// Directions currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Held {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Move the player one step per held axis, keeping it fully on screen
pub fn move_player(player: &mut Entity, held: &Held) {
    let mut delta = Vec2::ZERO;
    if held.up {
        delta.y -= player.speed;
    }
    if held.down {
        delta.y += player.speed;
    }
    if held.left {
        delta.x -= player.speed;
    }
    if held.right {
        delta.x += player.speed;
    }
    player.bounds.translate(delta);
    player.bounds.clamp_inside(SCREEN_WIDTH, SCREEN_HEIGHT);
}

/// `base_y + amplitude * sin(frame * angular_rate)`
#[inline]
pub fn oscillation_y(base_y: f32, amplitude: f32, angular_rate: f32, frame: f32) -> f32 {
    base_y + amplitude * (frame * angular_rate).sin()
}

/// Draw-time shake: `-amplitude` for the first half of each period, `+amplitude` after
#[inline]
pub fn jitter_for_frame(frame: u64, amplitude: f32, half_period: u64) -> f32 {
    let half = half_period.max(1);
    if frame % (half * 2) < half {
        -amplitude
    } else {
        amplitude
    }
}

/// Step the pursuer's oscillation, jitter and growl timer.
/// Returns true when the growl cue is due this frame.
pub fn advance_pursuer(pursuer: &mut Entity, tuning: &Tuning, rng: &mut impl Rng) -> bool {
    let EntityKind::Pursuer(state) = &mut pursuer.kind else {
        return false;
    };

    state.frame += 1;
    pursuer.bounds.pos.y = oscillation_y(
        state.base_y,
        tuning.pursuer_amplitude,
        tuning.pursuer_angular_rate,
        state.frame as f32,
    );
    state.jitter = jitter_for_frame(
        state.frame,
        tuning.pursuer_jitter,
        tuning.pursuer_jitter_half_period,
    );

    state.growl_countdown = state.growl_countdown.saturating_sub(1);
    if state.growl_countdown == 0 {
        state.growl_countdown = roll_growl_countdown(tuning, rng);
        true
    } else {
        false
    }
}

/// Drift left at the entity's own speed times `scale`
#[inline]
pub fn drift_left(entity: &mut Entity, scale: f32) {
    entity.bounds.pos.x -= entity.speed * scale;
}

/// Steer `entity` toward `target` if its centre is within `radius`.
/// Returns true if it was pulled (and so must not drift this frame).
pub fn magnet_pull(entity: &mut Entity, target: Vec2, radius: f32, speed: f32) -> bool {
    let offset = target - entity.bounds.center();
    if offset.length() >= radius {
        return false;
    }
    let angle = offset.y.atan2(offset.x);
    entity
        .bounds
        .translate(Vec2::new(angle.cos(), angle.sin()) * speed);
    true
}

/// Advance every entity in the world by one tick.
/// Returns true when the pursuer's growl cue is due.
pub fn advance(world: &mut World, held: &Held, tuning: &Tuning, rng: &mut impl Rng) -> bool {
    move_player(&mut world.player, held);
    let growl = advance_pursuer(&mut world.pursuer, tuning, rng);

    let obstacle_scale = if world.effects.is_active(EffectKind::Slow) {
        tuning.slow_factor
    } else {
        1.0
    };
    for obstacle in &mut world.obstacles {
        drift_left(obstacle, obstacle_scale);
    }

    let magnet = world.effects.is_active(EffectKind::Magnet);
    let target = world.player.bounds.center();
    for item in world.coins.iter_mut().chain(world.power_ups.iter_mut()) {
        let pulled = magnet && magnet_pull(item, target, tuning.magnet_radius, tuning.magnet_speed);
        if !pulled {
            drift_left(item, 1.0);
        }
    }

    growl
}
