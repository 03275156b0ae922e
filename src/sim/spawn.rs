//! Probabilistic spawning and off-screen pruning
//!
//! Each frame rolls once per transient kind, in a fixed order (obstacle, coin,
//! power-up), so a given seed always produces the same stream of entities.

use rand::Rng;

use super::effects::EffectKind;
use super::state::{Entity, World};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::tuning::{Size, Tuning};

/// Spawn threshold test: a uniform draw from `[0, range)` below `threshold`
#[inline]
pub fn roll(rng: &mut impl Rng, range: u32, threshold: u32) -> bool {
    range > 0 && rng.random_range(0..range) < threshold
}

/// Off-screen spawn point: x past the right edge, y anywhere the box fits
fn spawn_point(rng: &mut impl Rng, offset: (f32, f32), size: Size) -> (f32, f32) {
    let (lo, hi) = offset;
    let dx = if hi > lo { rng.random_range(lo..=hi) } else { lo };
    let max_y = (SCREEN_HEIGHT - size.h).max(0.0);
    (SCREEN_WIDTH + dx, rng.random_range(0.0..=max_y))
}

fn pick_kind(rng: &mut impl Rng, kinds: &[EffectKind]) -> Option<EffectKind> {
    if kinds.is_empty() {
        None
    } else {
        Some(kinds[rng.random_range(0..kinds.len())])
    }
}

/// Roll for each transient kind and push whatever spawns
pub fn spawn(world: &mut World, tuning: &Tuning, rng: &mut impl Rng) {
    if roll(rng, world.run.spawn_rate, tuning.spawn_threshold) {
        let (x, y) = spawn_point(rng, tuning.obstacle_spawn_offset, tuning.obstacle_size);
        let id = world.next_entity_id();
        let speed = world.run.difficulty as f32;
        world.obstacles.push(Entity::obstacle(id, x, y, speed, tuning));
        log::debug!("Obstacle {} at ({:.0}, {:.0}) speed {}", id, x, y, speed);
    }

    if roll(rng, tuning.coin_spawn_range, tuning.spawn_threshold) {
        let (x, y) = spawn_point(rng, tuning.coin_spawn_offset, tuning.coin_size);
        let id = world.next_entity_id();
        world.coins.push(Entity::coin(id, x, y, tuning));
        log::debug!("Coin {} at ({:.0}, {:.0})", id, x, y);
    }

    if roll(rng, tuning.power_up_spawn_range, tuning.spawn_threshold) {
        if let Some(kind) = pick_kind(rng, &tuning.power_up_kinds) {
            let (x, y) = spawn_point(rng, tuning.power_up_spawn_offset, tuning.power_up_size);
            let id = world.next_entity_id();
            world.power_ups.push(Entity::power_up(id, kind, x, y, tuning));
            log::debug!("{} power-up {} at ({:.0}, {:.0})", kind.as_str(), id, x, y);
        }
    }
}

/// Drop every transient whose right edge has passed the pursuer's right edge
pub fn prune(world: &mut World) {
    let boundary = world.pursuer.bounds.right();
    world.obstacles.retain(|e| e.bounds.right() > boundary);
    world.coins.retain(|e| e.bounds.right() > boundary);
    world.power_ups.retain(|e| e.bounds.right() > boundary);
}
