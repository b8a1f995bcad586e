//! Skyshot - gameplay simulation core for a motion-controlled bird shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (aim resolution, populations, scoring)
//! - `tuning`: Data-driven game balance
//!
//! The surrounding application (webcam capture, hand-landmark inference,
//! 3D rendering, audio, HUD) is a collaborator: it feeds [`sim::HandSample`]s
//! into [`sim::tick`] once per frame and renders the events and HUD snapshot
//! that come back out.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Maximum elapsed time consumed by a single tick (seconds).
    /// Long frame stalls are clamped so entities cannot tunnel past their
    /// despawn boundary and spawn timers cannot fire many batches at once.
    pub const MAX_TICK_DT: f32 = 0.05;

    /// Play area dimensions (world units)
    pub const SCENE_WIDTH: f32 = 20.0;
    pub const SCENE_HEIGHT: f32 = 14.0;

    /// Seconds between shots per hand
    pub const SHOOT_COOLDOWN: f32 = 0.3;
    /// Cooldown while the rapid-fire buff is active
    pub const RAPID_FIRE_COOLDOWN: f32 = 0.1;

    /// Birds
    pub const BIRD_SPAWN_Y_MIN: f32 = -3.0;
    pub const BIRD_SPAWN_Y_MAX: f32 = 5.0;
    /// Spawn this far beyond the screen edge
    pub const BIRD_SPAWN_X_MARGIN: f32 = 2.0;
    pub const BIRD_BASE_SPEED: f32 = 3.0;
    pub const BIRD_MIN_SPAWN_INTERVAL: f32 = 0.8;
    pub const BIRD_MAX_SPAWN_INTERVAL: f32 = 2.5;
    /// Despawn this far beyond the screen edge
    pub const BIRD_DESPAWN_X_MARGIN: f32 = 3.0;
    /// Extra collision tolerance when aiming at birds
    pub const BIRD_HIT_RADIUS_BONUS: f32 = 0.3;

    /// Aircraft
    pub const AIRCRAFT_RADIUS: f32 = 1.0;
    pub const AIRCRAFT_SPEED: f32 = 2.5;
    pub const AIRCRAFT_SPAWN_INTERVAL_MIN: f32 = 15.0;
    pub const AIRCRAFT_SPAWN_INTERVAL_MAX: f32 = 30.0;
    pub const AIRCRAFT_Y_MIN: f32 = -1.0;
    pub const AIRCRAFT_Y_MAX: f32 = 4.0;
    pub const AIRCRAFT_SPAWN_X_MARGIN: f32 = 4.0;
    pub const AIRCRAFT_DESPAWN_X_MARGIN: f32 = 5.0;
    /// Grace delay between an aircraft strike and the game-over screen,
    /// so the explosion feedback has time to play
    pub const AIRCRAFT_END_DELAY: f32 = 0.8;

    /// Power-ups
    pub const POWERUP_RADIUS: f32 = 0.45;
    pub const POWERUP_SPEED: f32 = 1.8;
    pub const POWERUP_SPAWN_INTERVAL_MIN: f32 = 12.0;
    pub const POWERUP_SPAWN_INTERVAL_MAX: f32 = 25.0;
    /// Seconds the rapid-fire buff lasts
    pub const POWERUP_DURATION: f32 = 7.0;
    pub const POWERUP_Y_MIN: f32 = -2.0;
    pub const POWERUP_Y_MAX: f32 = 4.0;
    pub const POWERUP_SPAWN_X_MARGIN: f32 = 2.0;
    pub const POWERUP_DESPAWN_X_MARGIN: f32 = 3.0;
    /// Slightly generous hit tolerance on power-ups
    pub const POWERUP_HIT_RADIUS_BONUS: f32 = 0.2;

    /// Seconds of play time to reach max difficulty
    pub const DIFFICULTY_RAMP_TIME: f32 = 120.0;
    /// Largest number of birds spawned in one wave
    pub const MAX_WAVE_SIZE: u32 = 4;
    /// Archetypes stay eligible up to rarity <= difficulty + this margin
    pub const RARITY_PREVIEW_MARGIN: f32 = 0.3;

    /// Scoring
    pub const COMBO_WINDOW: f32 = 1.2;
    pub const COMBO_MIN_HITS: u32 = 3;
    pub const COMBO_BONUS_PER_HIT: u64 = 5;

    /// Modes
    pub const CLASSIC_LIVES: u32 = 5;
    pub const ARCADE_TIME: f32 = 60.0;
    pub const ZEN_TIME: f32 = 90.0;
}
