//! Score accrual and the difficulty ratchet

use super::state::RunState;
use crate::tuning::Tuning;

/// Add points, then escalate for every milestone reached or crossed.
/// Returns the number of difficulty steps taken.
pub fn award(run: &mut RunState, points: u64, tuning: &Tuning) -> u32 {
    run.score += points;
    let interval = tuning.milestone_interval.max(1);
    let mut steps = 0;
    while run.score >= run.next_milestone {
        if run.spawn_rate > tuning.spawn_rate_floor {
            run.difficulty += tuning.difficulty_step;
            run.spawn_rate = run
                .spawn_rate
                .saturating_sub(tuning.spawn_rate_step)
                .max(tuning.spawn_rate_floor);
            steps += 1;
            log::info!(
                "Difficulty {} (spawn rate {}) at score {}",
                run.difficulty,
                run.spawn_rate,
                run.next_milestone
            );
        }
        run.next_milestone += interval;
    }
    steps
}

/// Count one playing frame toward the time-based score
pub fn accrue(run: &mut RunState, tuning: &Tuning) {
    run.score_ticks += 1;
    if run.score_ticks >= tuning.score_rule.ticks_per_point() {
        run.score_ticks = 0;
        award(run, 1, tuning);
    }
}
