//! Data-driven game balance
//!
//! Every scalar the simulation balances around lives here, with defaults
//! mirroring [`crate::consts`]. A tuning file (JSON) can override any subset
//! of fields, which keeps balance iteration out of recompiles.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Aim resolver timing
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GunTuning {
    /// Seconds between shots per hand
    pub shoot_cooldown: f32,
    /// Cooldown while the rapid-fire buff is active
    pub rapid_fire_cooldown: f32,
}

impl Default for GunTuning {
    fn default() -> Self {
        Self {
            shoot_cooldown: SHOOT_COOLDOWN,
            rapid_fire_cooldown: RAPID_FIRE_COOLDOWN,
        }
    }
}

/// Bird population balance
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BirdTuning {
    pub base_speed: f32,
    /// Spawn interval band at difficulty 0; narrows toward `min` as
    /// difficulty rises
    pub min_spawn_interval: f32,
    pub max_spawn_interval: f32,
    pub spawn_y_min: f32,
    pub spawn_y_max: f32,
    pub spawn_x_margin: f32,
    pub despawn_x_margin: f32,
    pub hit_radius_bonus: f32,
    pub max_wave_size: u32,
    /// Archetypes with rarity <= difficulty + margin are eligible
    pub rarity_preview_margin: f32,
}

impl Default for BirdTuning {
    fn default() -> Self {
        Self {
            base_speed: BIRD_BASE_SPEED,
            min_spawn_interval: BIRD_MIN_SPAWN_INTERVAL,
            max_spawn_interval: BIRD_MAX_SPAWN_INTERVAL,
            spawn_y_min: BIRD_SPAWN_Y_MIN,
            spawn_y_max: BIRD_SPAWN_Y_MAX,
            spawn_x_margin: BIRD_SPAWN_X_MARGIN,
            despawn_x_margin: BIRD_DESPAWN_X_MARGIN,
            hit_radius_bonus: BIRD_HIT_RADIUS_BONUS,
            max_wave_size: MAX_WAVE_SIZE,
            rarity_preview_margin: RARITY_PREVIEW_MARGIN,
        }
    }
}

/// Aircraft balance
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct AircraftTuning {
    pub radius: f32,
    pub speed: f32,
    pub min_spawn_interval: f32,
    pub max_spawn_interval: f32,
    pub spawn_y_min: f32,
    pub spawn_y_max: f32,
    pub spawn_x_margin: f32,
    pub despawn_x_margin: f32,
    /// Grace delay before the run ends after an aircraft strike
    pub end_delay: f32,
}

impl Default for AircraftTuning {
    fn default() -> Self {
        Self {
            radius: AIRCRAFT_RADIUS,
            speed: AIRCRAFT_SPEED,
            min_spawn_interval: AIRCRAFT_SPAWN_INTERVAL_MIN,
            max_spawn_interval: AIRCRAFT_SPAWN_INTERVAL_MAX,
            spawn_y_min: AIRCRAFT_Y_MIN,
            spawn_y_max: AIRCRAFT_Y_MAX,
            spawn_x_margin: AIRCRAFT_SPAWN_X_MARGIN,
            despawn_x_margin: AIRCRAFT_DESPAWN_X_MARGIN,
            end_delay: AIRCRAFT_END_DELAY,
        }
    }
}

/// Power-up balance
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpTuning {
    pub radius: f32,
    pub speed: f32,
    pub min_spawn_interval: f32,
    pub max_spawn_interval: f32,
    /// Seconds the rapid-fire buff lasts
    pub duration: f32,
    pub spawn_y_min: f32,
    pub spawn_y_max: f32,
    pub spawn_x_margin: f32,
    pub despawn_x_margin: f32,
    pub hit_radius_bonus: f32,
}

impl Default for PowerUpTuning {
    fn default() -> Self {
        Self {
            radius: POWERUP_RADIUS,
            speed: POWERUP_SPEED,
            min_spawn_interval: POWERUP_SPAWN_INTERVAL_MIN,
            max_spawn_interval: POWERUP_SPAWN_INTERVAL_MAX,
            duration: POWERUP_DURATION,
            spawn_y_min: POWERUP_Y_MIN,
            spawn_y_max: POWERUP_Y_MAX,
            spawn_x_margin: POWERUP_SPAWN_X_MARGIN,
            despawn_x_margin: POWERUP_DESPAWN_X_MARGIN,
            hit_radius_bonus: POWERUP_HIT_RADIUS_BONUS,
        }
    }
}

/// Combo scoring balance
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboTuning {
    /// Seconds between hits that keep a combo alive
    pub window: f32,
    /// Combo count at which the bonus kicks in (and the HUD shows it)
    pub min_hits: u32,
    /// Bonus points per combo step once past `min_hits`
    pub bonus_per_hit: u64,
}

impl Default for ComboTuning {
    fn default() -> Self {
        Self {
            window: COMBO_WINDOW,
            min_hits: COMBO_MIN_HITS,
            bonus_per_hit: COMBO_BONUS_PER_HIT,
        }
    }
}

/// Per-mode rules
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeTuning {
    pub classic_lives: u32,
    pub arcade_time: f32,
    pub zen_time: f32,
}

impl Default for ModeTuning {
    fn default() -> Self {
        Self {
            classic_lives: CLASSIC_LIVES,
            arcade_time: ARCADE_TIME,
            zen_time: ZEN_TIME,
        }
    }
}

/// Complete balance table for one run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub scene: SceneTuning,
    pub gun: GunTuning,
    pub birds: BirdTuning,
    pub aircraft: AircraftTuning,
    pub powerups: PowerUpTuning,
    pub combo: ComboTuning,
    pub modes: ModeTuning,
    /// Seconds of play time to reach max difficulty
    pub difficulty_ramp_time: f32,
}

/// Play-area dimensions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneTuning {
    pub width: f32,
    pub height: f32,
}

impl Default for SceneTuning {
    fn default() -> Self {
        Self {
            width: SCENE_WIDTH,
            height: SCENE_HEIGHT,
        }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            scene: SceneTuning::default(),
            gun: GunTuning::default(),
            birds: BirdTuning::default(),
            aircraft: AircraftTuning::default(),
            powerups: PowerUpTuning::default(),
            combo: ComboTuning::default(),
            modes: ModeTuning::default(),
            difficulty_ramp_time: DIFFICULTY_RAMP_TIME,
        }
    }
}

impl Tuning {
    /// Parse a tuning override file; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Half the horizontal play area, the reference edge for
    /// spawn/despawn margins
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.scene.width / 2.0
    }
}
