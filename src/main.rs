//! Orbit Dodge headless driver
//!
//! Runs a session with simulated frame timestamps and prints a JSON summary.
//! Useful for balancing configs and soak-testing the simulation.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use orbit_dodge::sim::{GameEvent, GameInput, GamePhase, GameSession, tick};
use orbit_dodge::{GameConfig, Viewport};

#[derive(Parser, Debug)]
#[command(version, about = "Run an Orbit Dodge session without a renderer")]
struct Args {
    /// JSON game config (missing fields use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the turret RNG
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// Maximum frames to simulate
    #[arg(short, long, default_value_t = 3600)]
    frames: u32,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    #[arg(long, default_value_t = 800.0)]
    width: f32,

    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// Reverse direction every N frames
    #[arg(long)]
    flip_every: Option<u32>,

    /// Reverse when a bullet is about to cross the ship's path
    #[arg(long)]
    dodge: bool,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    seed: u64,
    frames: u32,
    phase: Option<GamePhase>,
    score: u64,
    level: u32,
    coins_collected: u64,
    bullets_fired: u64,
    reversals: u32,
}

/// Bullets this far inside the orbit (px) are considered incoming
const DODGE_LOOKAHEAD: f32 = 60.0;
/// Angular window ahead of the ship that triggers a dodge (rad)
const DODGE_WINDOW: f32 = 0.35;
/// Frames to wait between autopilot reversals
const DODGE_COOLDOWN: u32 = 12;

/// True if a bullet is about to cross the orbit just ahead of the ship
fn threat_ahead(session: &GameSession) -> bool {
    let Some(ship) = session.ship.as_ref() else {
        return false;
    };
    let center = session.center();
    let orbit = session.config.orbit_radius;
    session.bullets.iter().any(|bullet| {
        let r = bullet.pos.distance(center);
        if r < orbit - DODGE_LOOKAHEAD || r > orbit {
            return false;
        }
        let offset = orbit_dodge::wrap_angle(bullet.angle - ship.angle);
        // Signed offset in (-π, π]
        let offset = if offset > std::f32::consts::PI {
            offset - std::f32::consts::TAU
        } else {
            offset
        };
        offset * ship.direction.sign() > 0.0 && offset.abs() < DODGE_WINDOW
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    let viewport = Viewport::new(args.width, args.height)
        .with_context(|| format!("invalid viewport {}x{}", args.width, args.height))?;
    if args.fps <= 0.0 || !args.fps.is_finite() {
        anyhow::bail!("fps must be positive, got {}", args.fps);
    }

    log::info!("Orbit Dodge (headless) starting, seed {}", args.seed);
    let mut session = GameSession::new(config, viewport, args.seed).context("creating session")?;
    session.apply(GameInput::Start);

    let frame_ms = 1000.0 / args.fps;
    let mut summary = Summary {
        seed: args.seed,
        ..Default::default()
    };
    let mut cooldown = 0u32;

    for frame in 0..args.frames {
        if session.phase != GamePhase::Playing {
            break;
        }

        let flip = args.flip_every.is_some_and(|n| n > 0 && frame > 0 && frame % n == 0);
        let dodge = args.dodge && cooldown == 0 && threat_ahead(&session);
        if flip || dodge {
            session.apply(GameInput::Reverse);
            summary.reversals += 1;
            if dodge {
                cooldown = DODGE_COOLDOWN;
            }
        }
        cooldown = cooldown.saturating_sub(1);

        for event in tick(&mut session, frame as f64 * frame_ms) {
            match event {
                GameEvent::CoinCollected { .. } => summary.coins_collected += 1,
                GameEvent::BulletFired { .. } => summary.bullets_fired += 1,
                GameEvent::LevelComplete { level } => {
                    log::info!("Frame {frame}: reached level {level}");
                }
                GameEvent::GameOver { score, level } => {
                    log::info!("Frame {frame}: ship destroyed (score {score}, level {level})");
                }
            }
        }
        summary.frames = frame + 1;
    }

    summary.phase = Some(session.phase);
    summary.score = session.score;
    summary.level = session.level;

    let json = serde_json::to_string_pretty(&summary).context("serializing summary")?;
    println!("{json}");
    Ok(())
}
