//! Per-tick Target Index
//!
//! The set of everything a crosshair can currently land on, rebuilt from
//! the live populations every tick. Pure transform: no entity is mutated
//! and nothing here persists across ticks.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{Aircraft, Bird, EntityId, PowerUp};
use crate::tuning::Tuning;

/// What kind of entity a target refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    Bird,
    Aircraft,
    PowerUp,
}

/// A shootable/dangerous entity as seen by the aim resolver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub kind: TargetKind,
    pub id: EntityId,
    pub position: Vec3,
    pub radius: f32,
}

/// Collect every live entity into a target list. Birds and power-ups get a
/// tolerance bonus on their radius; aircraft use their raw radius, since
/// hitting one is punished.
pub fn build_targets(
    birds: &[Bird],
    aircraft: &[Aircraft],
    powerups: &[PowerUp],
    tuning: &Tuning,
) -> Vec<Target> {
    let mut targets =
        Vec::with_capacity(birds.len() + aircraft.len() + powerups.len());

    for b in birds.iter().filter(|b| b.alive) {
        targets.push(Target {
            kind: TargetKind::Bird,
            id: b.id,
            position: b.position,
            radius: b.radius + tuning.birds.hit_radius_bonus,
        });
    }

    for a in aircraft.iter().filter(|a| a.alive) {
        targets.push(Target {
            kind: TargetKind::Aircraft,
            id: a.id,
            position: a.position,
            radius: a.radius,
        });
    }

    for p in powerups.iter().filter(|p| p.alive) {
        targets.push(Target {
            kind: TargetKind::PowerUp,
            id: p.id,
            position: p.position,
            radius: p.radius + tuning.powerups.hit_radius_bonus,
        });
    }

    targets
}
