//! Aim resolver
//!
//! Turns per-tick hand samples into crosshair state and fire intents. Each
//! hand slot owns an independent cooldown; the rapid-fire mode is a single
//! resolver-level switch covering both hands, flipped only by the power-up
//! handler in the scoring engine.
//!
//! A hand fires only while its crosshair is inside a target's radius. Shots
//! are never spent on empty space, which keeps the accuracy stat meaningful.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::targets::{Target, TargetKind};
use crate::tuning::GunTuning;

/// One tracked hand for one tick, produced by the hand-tracking
/// collaborator. Read-only for the core.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HandSample {
    /// Stable slot index: 0 = left, 1 = right
    pub slot: usize,
    /// Aim point in world space
    pub aim_position: Vec3,
    /// Thumb and index close together
    pub is_pinching: bool,
    /// Detection confidence from the landmark model
    pub confidence: f32,
}

/// Crosshair display state for one hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrosshairState {
    /// Aiming at empty sky
    Idle,
    /// Over a bird or power-up
    OnTarget,
    /// Over an aircraft; visually distinct warning, since hitting one is
    /// punished
    OnAircraft,
}

/// Per-hand output of aim resolution for one tick
#[derive(Debug, Clone, Copy)]
pub struct GunReport {
    pub hand: usize,
    pub aim_position: Vec3,
    /// True on the tick the shot happens
    pub just_fired: bool,
    /// What the crosshair is currently over
    pub on_target: Option<Target>,
    pub crosshair: CrosshairState,
    pub cooldown_remaining: f32,
}

/// Cooldown state for both hand slots
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GunResolver {
    cooldowns: [f32; 2],
    /// Active cooldown mode, global across both hands
    pub rapid_fire: bool,
}

impl GunResolver {
    /// Remaining cooldown for a hand slot
    pub fn cooldown(&self, slot: usize) -> f32 {
        self.cooldowns[slot.min(1)]
    }

    /// Resolve one tick of hand input against the target index.
    /// Both slot cooldowns decay every tick, detected or not.
    pub fn resolve(
        &mut self,
        hands: &[HandSample],
        dt: f32,
        targets: &[Target],
        tuning: &GunTuning,
    ) -> Vec<GunReport> {
        let cooldown_time = if self.rapid_fire {
            tuning.rapid_fire_cooldown
        } else {
            tuning.shoot_cooldown
        };

        for cd in &mut self.cooldowns {
            *cd = (*cd - dt).max(0.0);
        }

        let mut reports = Vec::with_capacity(hands.len());

        for hand in hands {
            let slot = hand.slot.min(1);

            // Nearest in-range target wins; ties break by input order
            let mut on_target: Option<Target> = None;
            let mut best_dist = f32::INFINITY;
            for t in targets {
                let dist = hand.aim_position.distance(t.position);
                if dist < t.radius && dist < best_dist {
                    on_target = Some(*t);
                    best_dist = dist;
                }
            }

            let just_fired = on_target.is_some() && self.cooldowns[slot] <= 0.0;
            if just_fired {
                self.cooldowns[slot] = cooldown_time;
            }

            let crosshair = match on_target {
                Some(t) if t.kind == TargetKind::Aircraft => CrosshairState::OnAircraft,
                Some(_) => CrosshairState::OnTarget,
                None => CrosshairState::Idle,
            };

            reports.push(GunReport {
                hand: slot,
                aim_position: hand.aim_position,
                just_fired,
                on_target,
                crosshair,
                cooldown_remaining: self.cooldowns[slot],
            });
        }

        reports
    }
}
