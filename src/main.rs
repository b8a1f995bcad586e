//! Skyshot headless demo
//!
//! Runs a classic-mode round with a scripted hand standing in for the
//! tracking collaborator: the hand snaps to the nearest live bird each
//! frame, so the simulation exercises aiming, firing, combos, and spawning
//! without any camera or renderer. Events are printed as they occur.
//!
//! Usage: `RUST_LOG=debug cargo run [seed]`

use glam::Vec3;

use skyshot::sim::{GameEvent, GameMode, GamePhase, GameState, HandSample, TickInput, tick};

const FRAME_DT: f32 = 1.0 / 60.0;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);
    log::info!("Skyshot demo starting (seed {seed})");

    let mut state = GameState::new(GameMode::Classic, seed);
    let mut frame: u64 = 0;

    while state.phase == GamePhase::Playing && frame < 60 * 120 {
        frame += 1;

        // Scripted aim: track the nearest live bird, if any
        let hands = state
            .birds
            .iter()
            .filter(|b| b.alive)
            .min_by(|a, b| a.position.length().total_cmp(&b.position.length()))
            .map(|b| {
                vec![HandSample {
                    slot: 0,
                    aim_position: b.position,
                    is_pinching: false,
                    confidence: 1.0,
                }]
            })
            .unwrap_or_default();

        let out = tick(&mut state, &TickInput { hands }, FRAME_DT);

        for event in &out.events {
            print_event(event, state.game_time);
        }
    }

    let stats = state.stats();
    println!(
        "\nfinal: score {} | hits {} | accuracy {}% | max combo {} | escaped {}",
        stats.score, stats.total_hits, stats.accuracy, stats.max_combo, stats.birds_escaped
    );
}

fn print_event(event: &GameEvent, t: f32) {
    match event {
        GameEvent::Fired { hand, position } => {
            println!("[{t:7.2}] hand {hand} fired at {}", fmt_pos(*position));
        }
        GameEvent::BirdHit { earned, combo, .. } => {
            println!("[{t:7.2}] bird hit: +{earned} (combo x{combo})");
        }
        GameEvent::BirdEscaped { lives_left, .. } => match lives_left {
            Some(l) => println!("[{t:7.2}] bird escaped, {l} lives left"),
            None => println!("[{t:7.2}] bird escaped"),
        },
        GameEvent::AircraftWarning { position } => {
            println!("[{t:7.2}] !! aircraft incoming at {}", fmt_pos(*position));
        }
        GameEvent::AircraftDown { .. } => {
            println!("[{t:7.2}] aircraft shot down!");
        }
        GameEvent::PowerUpCollected { .. } => {
            println!("[{t:7.2}] power-up collected");
        }
        GameEvent::BuffStarted { duration, .. } => {
            println!("[{t:7.2}] rapid fire for {duration}s");
        }
        GameEvent::BuffEnded { .. } => {
            println!("[{t:7.2}] rapid fire over");
        }
        GameEvent::RunEnded { reason, stats } => {
            match reason {
                Some(r) => println!("[{t:7.2}] RUN OVER: {r}"),
                None => println!("[{t:7.2}] RUN OVER"),
            }
            println!("          score {} accuracy {}%", stats.score, stats.accuracy);
        }
    }
}

fn fmt_pos(p: Vec3) -> String {
    format!("({:.1}, {:.1})", p.x, p.y)
}
