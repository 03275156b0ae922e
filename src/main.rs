//! Cone Chaos - terminal entry point
//!
//! Usage: `cone-chaos [--config FILE] [--seed N] [--headless FRAMES]`

use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size,
    supports_keyboard_enhancement,
};

use cone_chaos::Settings;
use cone_chaos::audio::{AudioManager, TerminalBell};
use cone_chaos::platform::{FrameClock, InputState, poll_terminal};
use cone_chaos::renderer::{Renderer, TerminalRenderer, build_scene};
use cone_chaos::sim::{GameEvent, GamePhase, GameSession, TickInput, tick};

const LOG_FILE: &str = "cone-chaos.log";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    seed: Option<u64>,
    /// Run this many frames without a terminal, then exit
    headless: Option<u64>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().ok_or_else(|| format!("{} needs a value", name));
        match arg.as_str() {
            "--config" => parsed.config = Some(PathBuf::from(value("--config")?)),
            "--seed" => {
                let v = value("--seed")?;
                parsed.seed = Some(v.parse().map_err(|_| format!("bad seed: {}", v))?);
            }
            "--headless" => {
                let v = value("--headless")?;
                let frames = v.parse().map_err(|_| format!("bad frame count: {}", v))?;
                parsed.headless = Some(frames);
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(parsed)
}

fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);
    // Stdout belongs to the game screen
    match File::create(LOG_FILE) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    let _ = builder.try_init();
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Restores the terminal however the loop exits
struct TerminalGuard {
    /// Key release events were switched on and must be switched off again
    reports_release: bool,
}

impl TerminalGuard {
    fn enter(out: &mut impl Write) -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Hide)?;

        let reports_release = supports_keyboard_enhancement().unwrap_or(false);
        if reports_release {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        log::info!("Key release events: {}", reports_release);
        Ok(TerminalGuard { reports_release })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        if self.reports_release {
            if let Err(e) = execute!(out, PopKeyboardEnhancementFlags) {
                log::error!("Failed to restore keyboard flags: {}", e);
            }
        }
        if let Err(e) = execute!(out, Show, LeaveAlternateScreen) {
            log::error!("Failed to restore screen: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            log::error!("Failed to disable raw mode: {}", e);
        }
    }
}

fn run_terminal(mut session: GameSession, settings: &Settings) -> io::Result<()> {
    let mut stdout = io::stdout();
    let guard = TerminalGuard::enter(&mut stdout)?;

    let (cols, rows) = size()?;
    let mut renderer = TerminalRenderer::new(io::stdout(), cols, rows);
    let mut audio = AudioManager::new(Some(Box::new(TerminalBell::new(io::stdout()))), settings);
    let mut input = InputState::for_terminal(guard.reports_release);
    let mut clock = FrameClock::new(settings.frame_rate());

    loop {
        let frame = clock.frames();
        let polled = poll_terminal(&mut input, frame)?;
        if let Some((w, h)) = polled.resized {
            renderer.resize(w, h);
        }

        tick(&mut session, &polled.input);
        for event in session.drain_events() {
            if event == GameEvent::Quit {
                log::info!("Final score {}", session.world.run.score);
                return Ok(());
            }
            audio.handle(&event);
        }

        renderer.present(&build_scene(&session, settings.show_effect_timers))?;
        clock.wait();
    }
}

/// Scripted run with no terminal: leave the menus, then coast until the run
/// ends or the frame budget is spent.
fn run_headless(mut session: GameSession, frames: u64) {
    let confirm = TickInput {
        confirm: true,
        ..Default::default()
    };
    let mut played = 0;
    for frame in 0..frames {
        let input = if frame < 2 {
            confirm.clone()
        } else {
            TickInput::default()
        };
        tick(&mut session, &input);
        for event in session.drain_events() {
            log::debug!("frame {}: {:?}", frame, event);
        }
        if session.phase == GamePhase::Playing {
            played += 1;
        }
        if session.phase == GamePhase::GameOver {
            break;
        }
    }

    let run = &session.world.run;
    log::info!(
        "Headless run done: phase {:?}, {} frames played, score {}, difficulty {}",
        session.phase,
        played,
        run.score,
        run.difficulty
    );
    println!(
        "seed={} phase={:?} frames={} score={} difficulty={} spawn_rate={}",
        session.seed, session.phase, played, run.score, run.difficulty, run.spawn_rate
    );
}

fn main() {
    init_logging();
    log::info!("Cone Chaos starting...");

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("usage: cone-chaos [--config FILE] [--seed N] [--headless FRAMES]");
            std::process::exit(2);
        }
    };

    let settings = Settings::load_or_default(args.config.as_deref());
    let seed = args.seed.or(settings.seed).unwrap_or_else(time_seed);
    log::info!("Seed {}", seed);
    let session = GameSession::new(seed, settings.tuning.clone());

    if let Some(frames) = args.headless {
        run_headless(session, frames);
        return;
    }

    if let Err(e) = run_terminal(session, &settings) {
        log::error!("Terminal error: {}", e);
        eprintln!("cone-chaos: {}", e);
        std::process::exit(1);
    }
}
