//! Fixed timestep simulation tick
//!
//! One call per frame. The phase decides which input is meaningful; only
//! `Playing` runs the simulation. Keys with no meaning in the current phase are
//! ignored.

use serde::{Deserialize, Serialize};

use super::collision::{detect, resolve};
use super::effects::expire_effects;
use super::kinematics::{Held, advance};
use super::scoring::accrue;
use super::spawn::{prune, spawn};
use super::state::{
    CAR_ROSTER, GameEvent, GamePhase, GameSession, MusicTrack, PauseOption, SoundCue,
};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Directions held this frame (steering)
    pub held: Held,
    /// Pause toggle
    pub pause: bool,
    /// Confirm / select (Enter, Space)
    pub confirm: bool,
    /// Menu navigation
    pub menu_up: bool,
    pub menu_down: bool,
    pub menu_left: bool,
    pub menu_right: bool,
    /// Start a fresh run from GameOver or Paused
    pub restart: bool,
    /// Leave the game from any phase
    pub quit: bool,
}

/// Advance the session by one frame
pub fn tick(session: &mut GameSession, input: &TickInput) {
    if input.quit {
        log::info!("Quit requested from {:?}", session.phase);
        session.emit(GameEvent::Quit);
        return;
    }

    match session.phase {
        GamePhase::Menu => tick_menu(session, input),
        GamePhase::CarSelect => tick_car_select(session, input),
        GamePhase::Playing => tick_playing(session, input),
        GamePhase::Paused => tick_paused(session, input),
        GamePhase::GameOver => tick_game_over(session, input),
    }
}

fn tick_menu(session: &mut GameSession, input: &TickInput) {
    if input.confirm {
        session.emit(GameEvent::Cue(SoundCue::Select));
        session.set_phase(GamePhase::CarSelect);
    }
}

fn tick_car_select(session: &mut GameSession, input: &TickInput) {
    let n = CAR_ROSTER.len();
    if input.menu_left {
        session.selected_car = (session.selected_car + n - 1) % n;
        session.emit(GameEvent::Cue(SoundCue::Select));
    }
    if input.menu_right {
        session.selected_car = (session.selected_car + 1) % n;
        session.emit(GameEvent::Cue(SoundCue::Select));
    }
    if input.confirm {
        start_run(session);
    }
}

fn tick_playing(session: &mut GameSession, input: &TickInput) {
    if input.pause {
        session.pause_cursor = 0;
        session.emit(GameEvent::Cue(SoundCue::PauseDing));
        session.emit(GameEvent::Track(MusicTrack::Pause));
        session.set_phase(GamePhase::Paused);
        return;
    }
    simulate(session, &input.held);
}

fn tick_paused(session: &mut GameSession, input: &TickInput) {
    if input.pause {
        resume(session);
        return;
    }
    if input.restart {
        start_run(session);
        return;
    }

    let n = PauseOption::ALL.len();
    if input.menu_up {
        session.pause_cursor = (session.pause_cursor + n - 1) % n;
        session.emit(GameEvent::Cue(SoundCue::Select));
    }
    if input.menu_down {
        session.pause_cursor = (session.pause_cursor + 1) % n;
        session.emit(GameEvent::Cue(SoundCue::Select));
    }
    if input.confirm {
        match session.pause_option() {
            PauseOption::Resume => resume(session),
            PauseOption::Restart => start_run(session),
            PauseOption::MainMenu => {
                session.emit(GameEvent::Track(MusicTrack::Menu));
                session.set_phase(GamePhase::Menu);
            }
            PauseOption::Quit => {
                log::info!("Quit from pause menu");
                session.emit(GameEvent::Quit);
            }
        }
    }
}

fn tick_game_over(session: &mut GameSession, input: &TickInput) {
    if input.restart {
        start_run(session);
    }
}

/// Fresh run straight into `Playing`
fn start_run(session: &mut GameSession) {
    session.reset_run();
    session.emit(GameEvent::Track(MusicTrack::Game));
    session.set_phase(GamePhase::Playing);
}

/// Back to `Playing` without touching the run
fn resume(session: &mut GameSession) {
    session.emit(GameEvent::Track(MusicTrack::Game));
    session.set_phase(GamePhase::Playing);
}

/// One simulated frame: expire, move, collide, spawn, score
fn simulate(session: &mut GameSession, held: &Held) {
    let GameSession {
        world,
        tuning,
        rng,
        events,
        ..
    } = session;

    world.time_ticks += 1;
    expire_effects(world);

    if advance(world, held, tuning, rng) {
        events.push(GameEvent::Cue(SoundCue::PursuerGrowl));
    }

    let report = detect(world);
    let resolution = resolve(world, &report, tuning);
    if resolution.pickups > 0 {
        events.push(GameEvent::Cue(SoundCue::Pickup));
    }
    if resolution.fatal {
        events.push(GameEvent::Cue(SoundCue::Crash));
        events.push(GameEvent::Track(MusicTrack::GameOver));
        session.set_phase(GamePhase::GameOver);
        return;
    }

    prune(world);
    spawn(world, tuning, rng);
    accrue(&mut world.run, tuning);
}
