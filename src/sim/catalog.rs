//! Bird archetype catalog
//!
//! Static stat templates shared by every spawned bird of a kind. Colors are
//! passed through to hit events so the presentation layer can tint feathers
//! and particles; they never affect gameplay.

use serde::Serialize;

/// A bird's static stat template
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BirdArchetype {
    pub name: &'static str,
    /// 0xRRGGBB
    pub body_color: u32,
    pub wing_color: u32,
    pub belly_color: u32,
    pub beak_color: u32,
    /// Collision radius
    pub radius: f32,
    /// Body elongation (cosmetic)
    pub body_scale: f32,
    /// Base speed multiplier
    pub speed: f32,
    pub points: u64,
    /// Wing size (cosmetic)
    pub wing_span: f32,
    /// 0-1, higher = rarer; gates spawning against the difficulty ramp
    pub rarity: f32,
}

/// All archetypes, ordered common-first. The catalog must keep a rarity-0
/// entry so rarity filtering can never come up empty.
pub const BIRD_CATALOG: &[BirdArchetype] = &[
    BirdArchetype {
        name: "Sparrow",
        body_color: 0x8B6914,
        wing_color: 0x6B4F12,
        belly_color: 0xD2B48C,
        beak_color: 0xFF8C00,
        radius: 0.4,
        body_scale: 0.8,
        speed: 1.4,
        points: 30,
        wing_span: 0.6,
        rarity: 0.0,
    },
    BirdArchetype {
        name: "Robin",
        body_color: 0x5C4033,
        wing_color: 0x4A3728,
        belly_color: 0xFF6347,
        beak_color: 0xFFD700,
        radius: 0.45,
        body_scale: 0.85,
        speed: 1.2,
        points: 20,
        wing_span: 0.65,
        rarity: 0.1,
    },
    BirdArchetype {
        name: "Blue Jay",
        body_color: 0x4169E1,
        wing_color: 0x1E90FF,
        belly_color: 0xE0E0E0,
        beak_color: 0x333333,
        radius: 0.5,
        body_scale: 0.9,
        speed: 1.1,
        points: 25,
        wing_span: 0.75,
        rarity: 0.2,
    },
    BirdArchetype {
        name: "Crow",
        body_color: 0x1A1A2E,
        wing_color: 0x16213E,
        belly_color: 0x2A2A3E,
        beak_color: 0x333333,
        radius: 0.55,
        body_scale: 1.0,
        speed: 1.0,
        points: 15,
        wing_span: 0.9,
        rarity: 0.15,
    },
    BirdArchetype {
        name: "Parrot",
        body_color: 0x00CC44,
        wing_color: 0xFF4444,
        belly_color: 0xFFDD00,
        beak_color: 0xFF6600,
        radius: 0.5,
        body_scale: 0.95,
        speed: 0.9,
        points: 35,
        wing_span: 0.8,
        rarity: 0.35,
    },
    BirdArchetype {
        name: "Eagle",
        body_color: 0x3E2723,
        wing_color: 0x4E342E,
        belly_color: 0xFFFFFF,
        beak_color: 0xFFD700,
        radius: 0.75,
        body_scale: 1.3,
        speed: 0.7,
        points: 40,
        wing_span: 1.4,
        rarity: 0.5,
    },
    BirdArchetype {
        name: "Golden Phoenix",
        body_color: 0xFFD700,
        wing_color: 0xFF8C00,
        belly_color: 0xFFF8DC,
        beak_color: 0xFF4500,
        radius: 0.6,
        body_scale: 1.1,
        speed: 1.6,
        points: 100,
        wing_span: 1.1,
        rarity: 0.85,
    },
];
