//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameSession`]; there is no ambient state.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::{ActiveEffects, EffectKind, Notification};
use super::rect::Rect;
use crate::tuning::{Size, Tuning};

/// Selectable cars, in carousel order
pub const CAR_ROSTER: [&str; 5] = [
    "McQueen",
    "Sally",
    "Doc Hudson",
    "Tow Mater",
    "Blue Lightning McQueen",
];

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen
    #[default]
    Menu,
    /// Choosing a car before a run
    CarSelect,
    /// Active gameplay
    Playing,
    /// Run frozen behind the pause menu
    Paused,
    /// Run ended, waiting for restart
    GameOver,
}

/// Pause menu entries, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseOption {
    Resume,
    Restart,
    MainMenu,
    Quit,
}

impl PauseOption {
    pub const ALL: [PauseOption; 4] = [
        PauseOption::Resume,
        PauseOption::Restart,
        PauseOption::MainMenu,
        PauseOption::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PauseOption::Resume => "Resume",
            PauseOption::Restart => "Restart",
            PauseOption::MainMenu => "Main Menu",
            PauseOption::Quit => "Quit",
        }
    }
}

/// Short sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Crash,
    Pickup,
    PauseDing,
    Select,
    PursuerGrowl,
}

/// Background music per phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicTrack {
    Menu,
    Game,
    Pause,
    GameOver,
}

/// Side effects requested by the simulation, drained by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Cue(SoundCue),
    Track(MusicTrack),
    /// Leave the game immediately
    Quit,
}

/// Pursuer-only state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pursuer {
    /// Centre line of the oscillation
    pub base_y: f32,
    /// Frames simulated since this pursuer was created
    pub frame: u64,
    /// Draw-time vertical shake; never applied to the bounding box
    pub jitter: f32,
    /// Frames until the next growl cue
    pub growl_countdown: u32,
}

/// Entity variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Obstacle,
    Pursuer(Pursuer),
    Coin,
    PowerUp(EffectKind),
}

/// A rectangular game object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub bounds: Rect,
    /// Leftward drift in units per frame (movement speed for the player)
    pub speed: f32,
}

impl Entity {
    fn boxed(id: u32, kind: EntityKind, x: f32, y: f32, size: Size, speed: f32) -> Self {
        Self {
            id,
            kind,
            bounds: Rect::new(x, y, size.w, size.h),
            speed,
        }
    }

    pub fn player(tuning: &Tuning) -> Self {
        let (x, y) = tuning.player_start;
        Self::boxed(0, EntityKind::Player, x, y, tuning.player_size, tuning.player_speed)
    }

    pub fn pursuer(tuning: &Tuning, growl_countdown: u32) -> Self {
        let state = Pursuer {
            base_y: tuning.pursuer_base_y,
            frame: 0,
            jitter: 0.0,
            growl_countdown,
        };
        Self::boxed(
            0,
            EntityKind::Pursuer(state),
            tuning.pursuer_x,
            tuning.pursuer_base_y,
            tuning.pursuer_size,
            0.0,
        )
    }

    pub fn obstacle(id: u32, x: f32, y: f32, speed: f32, tuning: &Tuning) -> Self {
        Self::boxed(id, EntityKind::Obstacle, x, y, tuning.obstacle_size, speed)
    }

    pub fn coin(id: u32, x: f32, y: f32, tuning: &Tuning) -> Self {
        Self::boxed(id, EntityKind::Coin, x, y, tuning.coin_size, tuning.coin_speed)
    }

    pub fn power_up(id: u32, kind: EffectKind, x: f32, y: f32, tuning: &Tuning) -> Self {
        Self::boxed(
            id,
            EntityKind::PowerUp(kind),
            x,
            y,
            tuning.power_up_size,
            tuning.power_up_speed,
        )
    }

    pub fn pursuer_state(&self) -> Option<&Pursuer> {
        match &self.kind {
            EntityKind::Pursuer(p) => Some(p),
            _ => None,
        }
    }

    pub fn effect(&self) -> Option<EffectKind> {
        match self.kind {
            EntityKind::PowerUp(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Score and difficulty ratchet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub score: u64,
    /// Obstacle speed for new spawns
    pub difficulty: u32,
    /// Obstacle spawn odds denominator
    pub spawn_rate: u32,
    /// Next score at which the ratchet is checked
    pub next_milestone: u64,
    /// Frames accumulated toward the next time-based point
    pub score_ticks: u32,
}

impl RunState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            difficulty: tuning.initial_difficulty,
            spawn_rate: tuning.initial_spawn_rate,
            next_milestone: tuning.milestone_interval.max(1),
            score_ticks: 0,
        }
    }
}

/// Per-run simulation state, rebuilt on every new game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Simulated playing frames in this run
    pub time_ticks: u64,
    pub player: Entity,
    pub pursuer: Entity,
    /// Live obstacles (spawn order)
    pub obstacles: Vec<Entity>,
    pub coins: Vec<Entity>,
    pub power_ups: Vec<Entity>,
    pub effects: ActiveEffects,
    pub run: RunState,
    pub notification: Option<Notification>,
    next_id: u32,
}

impl World {
    pub fn new(tuning: &Tuning, rng: &mut impl Rng) -> Self {
        Self {
            time_ticks: 0,
            player: Entity::player(tuning),
            pursuer: Entity::pursuer(tuning, roll_growl_countdown(tuning, rng)),
            obstacles: Vec::new(),
            coins: Vec::new(),
            power_ups: Vec::new(),
            effects: ActiveEffects::default(),
            run: RunState::new(tuning),
            notification: None,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Number of live transient entities
    pub fn transient_count(&self) -> usize {
        self.obstacles.len() + self.coins.len() + self.power_ups.len()
    }
}

/// Draw a fresh growl countdown from the configured range
pub fn roll_growl_countdown(tuning: &Tuning, rng: &mut impl Rng) -> u32 {
    let (lo, hi) = tuning.pursuer_growl_frames;
    if lo >= hi {
        lo.max(1)
    } else {
        rng.random_range(lo..=hi)
    }
}

/// Complete game session (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Seed the session RNG started from
    pub seed: u64,
    pub phase: GamePhase,
    /// Index into [`CAR_ROSTER`]
    pub selected_car: usize,
    /// Highlighted pause menu entry
    pub pause_cursor: usize,
    pub world: World,
    pub tuning: Tuning,
    /// Pending side effects for the front end
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameSession {
    /// Create a session sitting on the title screen
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let world = World::new(&tuning, &mut rng);
        Self {
            seed,
            phase: GamePhase::Menu,
            selected_car: 0,
            pause_cursor: 0,
            world,
            tuning,
            events: vec![GameEvent::Track(MusicTrack::Menu)],
            rng,
        }
    }

    /// Throw away the current run and build a fresh one
    pub fn reset_run(&mut self) {
        self.world = World::new(&self.tuning, &mut self.rng);
        self.pause_cursor = 0;
        log::info!("New run with {}", self.car_name());
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn car_name(&self) -> &'static str {
        CAR_ROSTER[self.selected_car % CAR_ROSTER.len()]
    }

    pub fn pause_option(&self) -> PauseOption {
        PauseOption::ALL[self.pause_cursor % PauseOption::ALL.len()]
    }
}
