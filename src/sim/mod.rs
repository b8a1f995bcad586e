//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Tick-driven only, with an internally clamped delta
//! - Seeded RNG only, owned by the state
//! - No rendering, audio, or platform dependencies
//!
//! Per tick: hand samples -> target index -> aim resolution -> shot
//! dispatch/scoring -> population spawn/advance/cull -> difficulty ramp.

pub mod catalog;
pub mod gun;
pub mod score;
pub mod spawn;
pub mod state;
pub mod targets;
pub mod tick;

pub use catalog::{BIRD_CATALOG, BirdArchetype};
pub use gun::{CrosshairState, GunReport, GunResolver, HandSample};
pub use score::ScoreState;
pub use state::{
    Aircraft, Bird, BuffKind, EntityId, GameEvent, GameMode, GamePhase, GameState, HudSnapshot,
    PendingEnd, PowerUp, RunStats,
};
pub use targets::{Target, TargetKind, build_targets};
pub use tick::{TickInput, TickOutput, tick};
