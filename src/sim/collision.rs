//! Collision detection and response
//!
//! Detection is a pure pass over the world producing a [`CollisionReport`];
//! resolution then applies every hit from that report in the same frame, so a
//! coin pickup and a fatal crash can both land on one tick.

use super::effects::{EffectKind, activate_power_up};
use super::rect::Rect;
use super::scoring::award;
use super::state::World;
use crate::tuning::Tuning;

/// Everything the player touched this frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Player reached the pursuer's trailing edge
    pub pursuer_contact: bool,
    /// IDs of overlapping obstacles
    pub obstacles: Vec<u32>,
    /// IDs of overlapping coins
    pub coins: Vec<u32>,
    /// IDs and kinds of overlapping power-ups
    pub power_ups: Vec<(u32, EffectKind)>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        !self.pursuer_contact
            && self.obstacles.is_empty()
            && self.coins.is_empty()
            && self.power_ups.is_empty()
    }
}

/// Outcome of resolving a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    /// The run is over
    pub fatal: bool,
    /// Coins and power-ups collected
    pub pickups: u32,
}

/// The pursuer catches the player once the player's left edge reaches its right edge
#[inline]
pub fn pursuer_reaches(player: &Rect, pursuer: &Rect) -> bool {
    player.left() <= pursuer.right()
}

/// Test the player against every other live entity
pub fn detect(world: &World) -> CollisionReport {
    let player = &world.player.bounds;
    CollisionReport {
        pursuer_contact: pursuer_reaches(player, &world.pursuer.bounds),
        obstacles: world
            .obstacles
            .iter()
            .filter(|o| player.overlaps(&o.bounds))
            .map(|o| o.id)
            .collect(),
        coins: world
            .coins
            .iter()
            .filter(|c| player.overlaps(&c.bounds))
            .map(|c| c.id)
            .collect(),
        power_ups: world
            .power_ups
            .iter()
            .filter(|p| player.overlaps(&p.bounds))
            .filter_map(|p| p.effect().map(|kind| (p.id, kind)))
            .collect(),
    }
}

/// Apply a report: collect pickups, then decide whether the run ends.
///
/// Pickups are applied before the fatal check, so a shield collected this frame
/// already protects against an obstacle hit in the same frame.
pub fn resolve(world: &mut World, report: &CollisionReport, tuning: &Tuning) -> Resolution {
    let mut resolution = Resolution::default();

    if !report.coins.is_empty() {
        world.coins.retain(|c| !report.coins.contains(&c.id));
        for _ in &report.coins {
            award(&mut world.run, tuning.coin_value, tuning);
            resolution.pickups += 1;
        }
        log::debug!("Collected {} coin(s), score {}", report.coins.len(), world.run.score);
    }

    if !report.power_ups.is_empty() {
        world
            .power_ups
            .retain(|p| !report.power_ups.iter().any(|&(id, _)| id == p.id));
        for &(_, kind) in &report.power_ups {
            activate_power_up(world, kind, tuning);
            resolution.pickups += 1;
        }
    }

    if report.pursuer_contact && !world.effects.is_active(EffectKind::Invisible) {
        log::info!("Caught by the pursuer at score {}", world.run.score);
        resolution.fatal = true;
    }

    if !report.obstacles.is_empty() && !world.effects.is_active(EffectKind::Shield) {
        log::info!("Hit an obstacle at score {}", world.run.score);
        resolution.fatal = true;
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Entity;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn world() -> (World, Tuning) {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        (World::new(&tuning, &mut rng), tuning)
    }

    /// An obstacle sitting on top of the player (player box is 150..250 x 300..360)
    fn obstacle_on_player(world: &mut World, tuning: &Tuning) -> u32 {
        let id = world.next_entity_id();
        world.obstacles.push(Entity::obstacle(id, 180.0, 310.0, 5.0, tuning));
        id
    }

    #[test]
    fn test_pursuer_trailing_edge() {
        let pursuer = Rect::new(10.0, 300.0, 80.0, 60.0);
        assert!(!pursuer_reaches(&Rect::new(91.0, 0.0, 100.0, 60.0), &pursuer));
        assert!(pursuer_reaches(&Rect::new(90.0, 0.0, 100.0, 60.0), &pursuer));
        // Vertical position is irrelevant
        assert!(pursuer_reaches(&Rect::new(50.0, 540.0, 100.0, 60.0), &pursuer));
    }

    #[test]
    fn test_obstacle_hit_is_fatal() {
        let (mut world, tuning) = world();
        let id = obstacle_on_player(&mut world, &tuning);
        let report = detect(&world);
        assert_eq!(report.obstacles, vec![id]);
        assert!(resolve(&mut world, &report, &tuning).fatal);
    }

    #[test]
    fn test_shield_negates_obstacles_but_not_pursuer() {
        let (mut world, tuning) = world();
        obstacle_on_player(&mut world, &tuning);
        world.effects.activate(EffectKind::Shield, 0, 100);
        let report = detect(&world);
        assert!(!resolve(&mut world, &report, &tuning).fatal);

        world.player.bounds.pos.x = 60.0;
        let report = detect(&world);
        assert!(report.pursuer_contact);
        assert!(resolve(&mut world, &report, &tuning).fatal);
    }

    #[test]
    fn test_invisible_bypasses_pursuer() {
        let (mut world, tuning) = world();
        world.player.bounds.pos.x = 60.0;
        world.effects.activate(EffectKind::Invisible, 0, 100);
        let report = detect(&world);
        assert!(report.pursuer_contact);
        assert!(!resolve(&mut world, &report, &tuning).fatal);
    }

    #[test]
    fn test_coin_pickup_removes_only_that_coin() {
        let (mut world, tuning) = world();
        let hit = world.next_entity_id();
        world.coins.push(Entity::coin(hit, 200.0, 320.0, &tuning));
        let miss = world.next_entity_id();
        world.coins.push(Entity::coin(miss, 600.0, 100.0, &tuning));
        world.run.score = 37;

        let report = detect(&world);
        let resolution = resolve(&mut world, &report, &tuning);
        assert_eq!(resolution.pickups, 1);
        assert!(!resolution.fatal);
        assert_eq!(world.run.score, 47);
        assert_eq!(world.coins.len(), 1);
        assert_eq!(world.coins[0].id, miss);
        assert_eq!(world.coins[0].bounds.left(), 600.0);
    }

    #[test]
    fn test_power_up_pickup_activates_effect() {
        let (mut world, tuning) = world();
        world.time_ticks = 30;
        let id = world.next_entity_id();
        world
            .power_ups
            .push(Entity::power_up(id, EffectKind::Magnet, 210.0, 310.0, &tuning));

        let report = detect(&world);
        resolve(&mut world, &report, &tuning);
        assert!(world.power_ups.is_empty());
        assert_eq!(
            world.effects.expiry(EffectKind::Magnet),
            Some(30 + tuning.effect_ticks(EffectKind::Magnet))
        );
        assert!(world.notification.is_some());
    }

    #[test]
    fn test_pickup_and_crash_same_frame() {
        let (mut world, tuning) = world();
        obstacle_on_player(&mut world, &tuning);
        let id = world.next_entity_id();
        world.coins.push(Entity::coin(id, 160.0, 320.0, &tuning));

        let report = detect(&world);
        let resolution = resolve(&mut world, &report, &tuning);
        assert!(resolution.fatal);
        assert_eq!(resolution.pickups, 1);
        assert_eq!(world.run.score, 10);
        assert!(world.coins.is_empty());
    }

    #[test]
    fn test_shield_picked_up_same_frame_protects() {
        let (mut world, tuning) = world();
        obstacle_on_player(&mut world, &tuning);
        let id = world.next_entity_id();
        world
            .power_ups
            .push(Entity::power_up(id, EffectKind::Shield, 200.0, 320.0, &tuning));

        let report = detect(&world);
        assert!(!resolve(&mut world, &report, &tuning).fatal);
    }
}
