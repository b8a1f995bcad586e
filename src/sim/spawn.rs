//! Spawn scheduling for the three entity populations
//!
//! Each population owns a countdown timer. When it expires the timer resets,
//! the next interval is redrawn from a band (narrowed by difficulty where
//! the population scales), and one spawn batch occurs. Birds spawn in waves
//! that grow with difficulty; aircraft and power-ups always spawn singly.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::catalog::{BIRD_CATALOG, BirdArchetype};
use super::state::{Aircraft, Bird, BuffKind, GameEvent, GameState, PowerUp};
use crate::tuning::Tuning;

/// Countdown scheduler for singly-spawning populations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub timer: f32,
    pub next_at: f32,
}

impl SpawnTimer {
    /// Start with a first interval drawn from the raw band
    pub fn with_interval_in(rng: &mut Pcg32, min: f32, max: f32) -> Self {
        Self {
            timer: 0.0,
            next_at: rng.random_range(min..max),
        }
    }

    /// Accumulate elapsed time; on expiry, reset and redraw the interval
    /// from the given band. Returns true when a spawn is due.
    pub fn advance(&mut self, dt: f32, rng: &mut Pcg32, min: f32, max: f32) -> bool {
        self.timer += dt;
        if self.timer >= self.next_at {
            self.timer = 0.0;
            self.next_at = rng.random_range(min..max);
            true
        } else {
            false
        }
    }
}

/// Bird wave scheduler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirdSpawner {
    pub timer: f32,
    pub next_at: f32,
}

impl Default for BirdSpawner {
    fn default() -> Self {
        // First wave comes quickly so the run never opens on empty sky
        Self {
            timer: 0.0,
            next_at: 1.5,
        }
    }
}

/// Wave size for a given difficulty: grows linearly, capped at the max
pub fn wave_size(difficulty: f32, max_wave_size: u32) -> u32 {
    (1 + (difficulty * max_wave_size as f32) as u32).min(max_wave_size)
}

/// Advance the bird scheduler and spawn a wave when due
pub fn update_bird_spawning(state: &mut GameState, dt: f32) {
    state.bird_spawner.timer += dt;
    if state.bird_spawner.timer < state.bird_spawner.next_at {
        return;
    }
    state.bird_spawner.timer = 0.0;

    let tuning = state.tuning;
    let difficulty = state.difficulty;

    // Interval shrinks toward the min as difficulty rises
    let interval = tuning.birds.max_spawn_interval
        - (tuning.birds.max_spawn_interval - tuning.birds.min_spawn_interval) * difficulty;
    state.bird_spawner.next_at = interval + state.rng.random_range(0.0..interval * 0.5);

    let wave = wave_size(difficulty, tuning.birds.max_wave_size);
    log::debug!("spawning wave of {wave} birds (difficulty {difficulty:.2})");
    for _ in 0..wave {
        spawn_bird(state, difficulty, &tuning);
    }
}

fn spawn_bird(state: &mut GameState, difficulty: f32, tuning: &Tuning) {
    let archetype = pick_archetype(
        &mut state.rng,
        difficulty,
        tuning.birds.rarity_preview_margin,
    );

    let from_left = state.rng.random_bool(0.5);
    let spawn_x = tuning.half_width() + tuning.birds.spawn_x_margin;
    let x = if from_left { -spawn_x } else { spawn_x };
    let y = state
        .rng
        .random_range(tuning.birds.spawn_y_min..tuning.birds.spawn_y_max);

    let speed = tuning.birds.base_speed * archetype.speed * (0.8 + difficulty * 0.5);
    let vx = if from_left { speed } else { -speed };
    let vy = state.rng.random_range(-0.25..0.25);

    let wing_speed = state.rng.random_range(4.0..7.0);
    let wobble_phase = state.rng.random_range(0.0..std::f32::consts::TAU);
    let wobble_amplitude = state.rng.random_range(0.3..1.0);

    let id = state.next_entity_id();
    state.birds.push(Bird {
        id,
        archetype,
        position: Vec3::new(x, y, 0.0),
        velocity: Vec3::new(vx, vy, 0.0),
        radius: archetype.radius,
        alive: true,
        time_alive: 0.0,
        wing_phase: 0.0,
        wing_speed,
        wobble_phase,
        wobble_amplitude,
    });
}

/// Weighted archetype pick. Rarer archetypes unlock as difficulty climbs
/// (with a fixed preview margin) and commoner ones carry more weight.
pub fn pick_archetype(rng: &mut Pcg32, difficulty: f32, preview_margin: f32) -> BirdArchetype {
    let eligible: Vec<&BirdArchetype> = BIRD_CATALOG
        .iter()
        .filter(|a| a.rarity <= difficulty + preview_margin)
        .collect();
    // Defensive fallback; unreachable while the catalog keeps a rarity-0 entry
    if eligible.is_empty() {
        return BIRD_CATALOG[0];
    }

    let total: f32 = eligible.iter().map(|a| 1.0 - a.rarity * 0.5).sum();
    let mut remainder = rng.random_range(0.0..total);
    for a in &eligible {
        remainder -= 1.0 - a.rarity * 0.5;
        if remainder <= 0.0 {
            return **a;
        }
    }
    // Floating-point drift can exhaust the loop; the last eligible entry
    // is the intended tiebreak
    *eligible[eligible.len() - 1]
}

/// Advance the aircraft scheduler. The band tightens with difficulty, so
/// aircraft cross more often late in a run.
pub fn update_aircraft_spawning(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let tuning = state.tuning;
    let scale = 1.0 - state.difficulty * 0.3;
    let min = tuning.aircraft.min_spawn_interval * scale;
    let max = tuning.aircraft.max_spawn_interval * scale;

    if state
        .aircraft_spawner
        .advance(dt, &mut state.rng, min, max)
    {
        spawn_aircraft(state, events);
    }
}

fn spawn_aircraft(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let tuning = state.tuning;
    let from_left = state.rng.random_bool(0.5);
    let spawn_x = tuning.half_width() + tuning.aircraft.spawn_x_margin;
    let x = if from_left { -spawn_x } else { spawn_x };
    let y = state
        .rng
        .random_range(tuning.aircraft.spawn_y_min..tuning.aircraft.spawn_y_max);
    let vx = if from_left {
        tuning.aircraft.speed
    } else {
        -tuning.aircraft.speed
    };

    let position = Vec3::new(x, y, 0.0);
    let id = state.next_entity_id();
    state.aircraft.push(Aircraft {
        id,
        position,
        velocity: Vec3::new(vx, 0.0, 0.0),
        radius: tuning.aircraft.radius,
        alive: true,
        time_alive: 0.0,
        prop_angle: 0.0,
    });

    log::debug!("aircraft {id} entering from {}", if from_left { "left" } else { "right" });
    events.push(GameEvent::AircraftWarning { position });
}

/// Advance the power-up scheduler (raw band, not difficulty scaled)
pub fn update_powerup_spawning(state: &mut GameState, dt: f32) {
    let tuning = state.tuning;
    if state.powerup_spawner.advance(
        dt,
        &mut state.rng,
        tuning.powerups.min_spawn_interval,
        tuning.powerups.max_spawn_interval,
    ) {
        spawn_powerup(state);
    }
}

fn spawn_powerup(state: &mut GameState) {
    let tuning = state.tuning;
    let from_left = state.rng.random_bool(0.5);
    let spawn_x = tuning.half_width() + tuning.powerups.spawn_x_margin;
    let x = if from_left { -spawn_x } else { spawn_x };
    let y = state
        .rng
        .random_range(tuning.powerups.spawn_y_min..tuning.powerups.spawn_y_max);
    let vx = if from_left {
        tuning.powerups.speed
    } else {
        -tuning.powerups.speed
    };

    let id = state.next_entity_id();
    state.powerups.push(PowerUp {
        id,
        kind: BuffKind::RapidFire,
        position: Vec3::new(x, y, 0.0),
        velocity: Vec3::new(vx, 0.0, 0.0),
        radius: tuning.powerups.radius,
        alive: true,
        time_alive: 0.0,
    });
    log::debug!("power-up {id} spawned");
}
