//! Game state and core simulation types
//!
//! Everything a run mutates lives here. The state is deterministic: all
//! randomness flows through the seeded RNG owned by [`GameState`], so two
//! runs with the same seed, tuning, and input stream are identical.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::catalog::BirdArchetype;
use super::gun::GunResolver;
use super::score::ScoreState;
use super::spawn::{BirdSpawner, SpawnTimer};
use crate::tuning::Tuning;

/// Stable identifier for a spawned entity
pub type EntityId = u32;

/// Selected game mode, fixed for the duration of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Lives-based: escaped birds cost lives, run ends at zero
    Classic,
    /// Timed 60s run
    Arcade,
    /// Timed 90s run, no aircraft, no fail condition
    Zen,
}

impl GameMode {
    /// Time limit for timed modes; `None` for classic
    pub fn time_limit(&self, tuning: &Tuning) -> Option<f32> {
        match self {
            GameMode::Classic => None,
            GameMode::Arcade => Some(tuning.modes.arcade_time),
            GameMode::Zen => Some(tuning.modes.zen_time),
        }
    }
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Terminal: ticks are no-ops until the state is rebuilt
    GameOver,
}

/// The kind of buff a power-up grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffKind {
    /// Shortens the shot cooldown for both hands
    RapidFire,
}

/// A flying bird
#[derive(Debug, Clone, Serialize)]
pub struct Bird {
    pub id: EntityId,
    pub archetype: BirdArchetype,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Collision radius (archetype radius at spawn)
    pub radius: f32,
    pub alive: bool,
    pub time_alive: f32,
    /// Wing flap phase accumulator
    pub wing_phase: f32,
    /// Flap frequency
    pub wing_speed: f32,
    /// Phase offset for the sine-wave flight path
    pub wobble_phase: f32,
    /// Vertical wobble strength
    pub wobble_amplitude: f32,
}

impl Bird {
    /// Cosmetic wing flap angle; never a collision input
    pub fn flap_angle(&self) -> f32 {
        (self.wing_phase * std::f32::consts::TAU).sin() * 0.6
    }

    /// Cosmetic body roll synced to the flap
    pub fn roll(&self) -> f32 {
        (self.wing_phase * std::f32::consts::TAU).sin() * 0.05
    }
}

/// A civilian aircraft crossing the play area. Shooting one ends the run.
#[derive(Debug, Clone, Serialize)]
pub struct Aircraft {
    pub id: EntityId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub alive: bool,
    pub time_alive: f32,
    /// Propeller spin accumulator (cosmetic)
    pub prop_angle: f32,
}

impl Aircraft {
    /// Cosmetic body roll wobble
    pub fn roll(&self) -> f32 {
        (self.time_alive * 1.5).sin() * 0.03
    }
}

/// A shootable power-up capsule
#[derive(Debug, Clone, Serialize)]
pub struct PowerUp {
    pub id: EntityId,
    pub kind: BuffKind,
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub alive: bool,
    pub time_alive: f32,
}

impl PowerUp {
    /// Rendered position with the cosmetic bob applied. The hitbox tracks
    /// `position`, which stays on the deterministic path.
    pub fn render_position(&self) -> Vec3 {
        self.position + Vec3::new(0.0, (self.time_alive * 3.0).sin() * 0.3, 0.0)
    }

    /// Cosmetic pulsing scale
    pub fn pulse_scale(&self) -> f32 {
        1.0 + (self.time_alive * 4.0).sin() * 0.1
    }
}

/// Scheduled run termination (e.g. the grace delay after an aircraft
/// strike, so feedback effects can play before the game-over screen)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingEnd {
    pub reason: String,
    pub remaining: f32,
}

/// Final statistics reported when a run ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub score: u64,
    pub total_hits: u32,
    /// Percentage, 0 when no shots were fired
    pub accuracy: u32,
    pub max_combo: u32,
    pub birds_escaped: u32,
}

/// Tagged feedback record for the presentation layer (audio cues, particle
/// effects, floating score text, screen shake). The core does not know how
/// these are rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A hand fired a shot this tick
    Fired { hand: usize, position: Vec3 },
    /// A bird was hit; colors let the feather burst match the bird
    BirdHit {
        position: Vec3,
        earned: u64,
        combo: u32,
        body_color: u32,
        wing_color: u32,
    },
    /// A bird crossed the far edge unshot
    BirdEscaped {
        position: Vec3,
        lives_left: Option<u32>,
    },
    /// An aircraft entered the play area
    AircraftWarning { position: Vec3 },
    /// An aircraft was shot down; the run ends after a grace delay
    AircraftDown { position: Vec3 },
    /// A power-up was shot and collected
    PowerUpCollected { position: Vec3, kind: BuffKind },
    BuffStarted { kind: BuffKind, duration: f32 },
    BuffEnded { kind: BuffKind },
    /// Terminal event; `reason` is set only for the aircraft-strike ending
    RunEnded {
        reason: Option<String>,
        stats: RunStats,
    },
}

/// HUD-facing scalars, rebuilt every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u64,
    /// Percentage, 0 when no shots were fired
    pub accuracy: u32,
    /// Present only once the combo reaches the display threshold
    pub combo: Option<u32>,
    /// Classic mode only
    pub lives: Option<u32>,
    /// Timed modes only (seconds, floored at 0)
    pub time_remaining: Option<f32>,
    /// Seconds of rapid-fire left, when active
    pub buff_remaining: Option<f32>,
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub mode: GameMode,
    pub phase: GamePhase,
    /// Elapsed play time (seconds)
    pub game_time: f32,
    /// Normalized difficulty, recomputed each tick from `game_time`
    pub difficulty: f32,
    /// Remaining lives (classic mode only; untouched otherwise)
    pub lives: u32,
    /// Seconds of rapid-fire buff left; 0 when inactive
    pub rapid_fire_remaining: f32,
    /// Scheduled termination, if any
    pub pending_end: Option<PendingEnd>,
    pub score: ScoreState,
    pub gun: GunResolver,
    pub birds: Vec<Bird>,
    pub aircraft: Vec<Aircraft>,
    pub powerups: Vec<PowerUp>,
    pub bird_spawner: BirdSpawner,
    pub aircraft_spawner: SpawnTimer,
    pub powerup_spawner: SpawnTimer,
    next_id: EntityId,
}

impl GameState {
    /// Start a run with default tuning
    pub fn new(mode: GameMode, seed: u64) -> Self {
        Self::with_tuning(mode, seed, Tuning::default())
    }

    /// Start a run with explicit tuning
    pub fn with_tuning(mode: GameMode, seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let aircraft_spawner = SpawnTimer::with_interval_in(
            &mut rng,
            tuning.aircraft.min_spawn_interval,
            tuning.aircraft.max_spawn_interval,
        );
        let powerup_spawner = SpawnTimer::with_interval_in(
            &mut rng,
            tuning.powerups.min_spawn_interval,
            tuning.powerups.max_spawn_interval,
        );

        Self {
            seed,
            rng,
            tuning,
            mode,
            phase: GamePhase::Playing,
            game_time: 0.0,
            difficulty: 0.0,
            lives: tuning.modes.classic_lives,
            rapid_fire_remaining: 0.0,
            pending_end: None,
            score: ScoreState::default(),
            gun: GunResolver::default(),
            birds: Vec::new(),
            aircraft: Vec::new(),
            powerups: Vec::new(),
            bird_spawner: BirdSpawner::default(),
            aircraft_spawner,
            powerup_spawner,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Final statistics for the game-over screen
    pub fn stats(&self) -> RunStats {
        RunStats {
            score: self.score.score,
            total_hits: self.score.total_hits,
            accuracy: self.score.accuracy(),
            max_combo: self.score.max_combo,
            birds_escaped: self.score.birds_escaped,
        }
    }

    /// HUD-facing scalars for the current tick
    pub fn hud(&self) -> HudSnapshot {
        let combo = (self.score.combo >= self.tuning.combo.min_hits).then_some(self.score.combo);
        let lives = (self.mode == GameMode::Classic).then_some(self.lives);
        let time_remaining = self
            .mode
            .time_limit(&self.tuning)
            .map(|limit| (limit - self.game_time).max(0.0));
        let buff_remaining =
            (self.rapid_fire_remaining > 0.0).then_some(self.rapid_fire_remaining);

        HudSnapshot {
            score: self.score.score,
            accuracy: self.score.accuracy(),
            combo,
            lives,
            time_remaining,
            buff_remaining,
        }
    }
}
