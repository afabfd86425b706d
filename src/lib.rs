//! Orbit Dodge - an orbiting coin-collector arcade game
//!
//! Core modules:
//! - `sim`: Simulation (ship motion, coins, bullets, game phase)
//! - `config`: Data-driven game balance and viewport geometry

pub mod config;
pub mod sim;

pub use config::{ConfigError, GameConfig, Viewport};

use glam::Vec2;
use std::f32::consts::TAU;

/// Fixed tuning constants that are not exposed in [`GameConfig`]
pub mod consts {
    /// Spawn interval never drops below this (ms)
    pub const MIN_SPAWN_INTERVAL_MS: f64 = 100.0;
    /// Spawn interval shrinks by this much per level (ms)
    pub const SPAWN_INTERVAL_REDUCTION_MS: f64 = 100.0;
    /// Bullets survive this far past the inscribed circle of the viewport
    pub const BULLET_PRUNE_MARGIN: f32 = 50.0;
    /// Length of the tail drawn behind a bullet
    pub const BULLET_TAIL_LENGTH: f32 = 15.0;
    /// How many steps of motion the ship trail lags behind
    pub const SHIP_TRAIL_STEPS: f32 = 2.0;
}

/// Wrap an angle into [0, 2π).
///
/// Angular steps are small, so a single add/subtract is enough. The final clamp
/// catches `f32` rounding that would otherwise land exactly on 2π. Non-finite
/// input maps to 0.
#[inline]
pub fn wrap_angle(mut angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    if angle < 0.0 {
        angle += TAU;
    } else if angle >= TAU {
        angle -= TAU;
    }
    if !(0.0..TAU).contains(&angle) {
        angle = angle.rem_euclid(TAU);
        if angle >= TAU {
            angle = 0.0;
        }
    }
    angle
}

/// Shortest unsigned distance between two angles, in [0, π]
#[inline]
pub fn angular_distance(a: f32, b: f32) -> f32 {
    let diff = (a - b).abs() % TAU;
    diff.min(TAU - diff)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
