//! Property tests for the simulation invariants

use proptest::prelude::*;

use super::*;
use crate::tuning::Tuning;

fn held_strategy() -> impl Strategy<Value = Held> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(up, down, left, right)| Held {
            up,
            down,
            left,
            right,
        },
    )
}

fn playing_session(seed: u64) -> GameSession {
    let mut session = GameSession::new(seed, Tuning::default());
    session.reset_run();
    session.phase = GamePhase::Playing;
    session
}

fn kind_strategy() -> impl Strategy<Value = EffectKind> {
    prop::sample::select(EffectKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn obstacle_overlap_without_shield_ends_run(
        seed in any::<u64>(),
        px in 100.0f32..900.0,
        py in 0.0f32..540.0,
        dx in -45.0f32..95.0,
        dy in -55.0f32..55.0,
    ) {
        let mut session = playing_session(seed);
        session.world.player.bounds.pos = glam::Vec2::new(px, py);
        let id = session.world.next_entity_id();
        let obstacle = Entity::obstacle(id, px + dx, py + dy, 0.0, &session.tuning);
        prop_assume!(session.world.player.bounds.overlaps(&obstacle.bounds));
        session.world.obstacles.push(obstacle);

        tick(&mut session, &TickInput::default());
        prop_assert_eq!(session.phase, GamePhase::GameOver);
    }

    #[test]
    fn shield_absorbs_every_obstacle_overlap(
        seed in any::<u64>(),
        px in 100.0f32..900.0,
        py in 0.0f32..540.0,
        dx in -45.0f32..95.0,
        dy in -55.0f32..55.0,
    ) {
        let mut session = playing_session(seed);
        session.world.player.bounds.pos = glam::Vec2::new(px, py);
        session.world.effects.activate(EffectKind::Shield, 0, 10_000);
        let id = session.world.next_entity_id();
        session
            .world
            .obstacles
            .push(Entity::obstacle(id, px + dx, py + dy, 0.0, &session.tuning));

        for _ in 0..5 {
            tick(&mut session, &TickInput::default());
            prop_assert_eq!(session.phase, GamePhase::Playing);
        }
    }

    #[test]
    fn expired_effects_stay_gone(
        ops in prop::collection::vec((kind_strategy(), 0u64..50, 0u64..40), 1..30),
    ) {
        let mut effects = ActiveEffects::default();
        let mut now = 0u64;
        for (kind, step, duration) in ops {
            now += step;
            effects.expire(now);
            for (k, expiry) in effects.iter() {
                prop_assert!(
                    expiry > now,
                    "{:?} still present at {} with expiry {}",
                    k,
                    now,
                    expiry
                );
            }
            if effects.activate(kind, now, duration) {
                prop_assert_eq!(effects.expiry(kind), Some(now + duration));
            }
            prop_assert!(effects.len() <= EffectKind::ALL.len());
        }
    }

    #[test]
    fn repickup_resets_without_duplicating(
        kind in kind_strategy(),
        first in 0u64..1000,
        gap in 0u64..1000,
        duration in 1u64..600,
    ) {
        let mut effects = ActiveEffects::default();
        effects.activate(kind, first, duration);
        effects.activate(kind, first + gap, duration);
        prop_assert_eq!(effects.len(), 1);
        prop_assert_eq!(effects.expiry(kind), Some(first + gap + duration));
    }

    #[test]
    fn score_never_decreases_while_playing(
        seed in any::<u64>(),
        inputs in prop::collection::vec(held_strategy(), 1..300),
    ) {
        let mut session = playing_session(seed);
        let mut last = session.world.run.clone();
        for held in inputs {
            tick(&mut session, &TickInput { held, ..Default::default() });
            let run = &session.world.run;
            prop_assert!(run.score >= last.score);
            prop_assert!(run.difficulty >= last.difficulty);
            prop_assert!(run.spawn_rate <= last.spawn_rate);
            prop_assert!(run.spawn_rate >= session.tuning.spawn_rate_floor);
            prop_assert!(session.world.player.bounds.is_inside(
                crate::consts::SCREEN_WIDTH,
                crate::consts::SCREEN_HEIGHT,
            ));
            last = run.clone();
            if session.phase != GamePhase::Playing {
                break;
            }
        }
    }

    #[test]
    fn difficulty_ratchet_tracks_milestones(
        awards in prop::collection::vec(1u64..120, 1..200),
    ) {
        let tuning = Tuning::default();
        let mut run = RunState::new(&tuning);
        for points in awards {
            let before = run.clone();
            award(&mut run, points, &tuning);
            prop_assert!(run.difficulty >= before.difficulty);
            prop_assert!(run.spawn_rate <= before.spawn_rate);
            let milestones = (run.score / 200).min(14) as u32;
            prop_assert_eq!(run.difficulty, 5 + milestones);
            prop_assert_eq!(run.spawn_rate, 100 - 5 * milestones);
        }
    }
}
