//! Game balance and viewport geometry
//!
//! `GameConfig` is fixed for the lifetime of a session. The `Viewport` (and the
//! center derived from it) may change on resize without touching anything else.

use std::f32::consts::TAU;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::BULLET_PRUNE_MARGIN;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Numeric game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Radius of the orbit path the ship and coins share
    pub orbit_radius: f32,
    /// Coins per level
    pub coin_count: usize,
    /// Coin pickup radius
    pub coin_size: f32,
    pub ship_radius: f32,
    pub bullet_radius: f32,
    /// Ship angular speed (radians per step)
    pub ship_speed: f32,
    /// Bullet speed (pixels per step)
    pub bullet_speed: f32,
    /// Spawn interval at level 1 (ms)
    pub bullet_spawn_interval_ms: f64,
    /// Radius of the turret island at the center (render only)
    pub island_radius: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            orbit_radius: 200.0,
            coin_count: 30,
            coin_size: 8.0,
            ship_radius: 12.0,
            bullet_radius: 8.0,
            ship_speed: 0.04,
            bullet_speed: 3.0,
            bullet_spawn_interval_ms: 1000.0,
            island_radius: 50.0,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    /// Reject values that would break the simulation invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be finite and >= 0, got {value}"),
                ));
            }
            Ok(())
        }

        if !self.orbit_radius.is_finite() || self.orbit_radius <= 0.0 {
            return Err(ConfigError::invalid(
                "orbit_radius",
                format!("must be finite and > 0, got {}", self.orbit_radius),
            ));
        }
        non_negative("coin_size", self.coin_size)?;
        non_negative("ship_radius", self.ship_radius)?;
        non_negative("bullet_radius", self.bullet_radius)?;
        non_negative("bullet_speed", self.bullet_speed)?;
        non_negative("island_radius", self.island_radius)?;

        // A single wrap per step keeps the angle in range only for sub-turn speeds
        non_negative("ship_speed", self.ship_speed)?;
        if self.ship_speed >= TAU {
            return Err(ConfigError::invalid(
                "ship_speed",
                format!("must be below one full turn per step, got {}", self.ship_speed),
            ));
        }

        if !self.bullet_spawn_interval_ms.is_finite() || self.bullet_spawn_interval_ms < 0.0 {
            return Err(ConfigError::invalid(
                "bullet_spawn_interval_ms",
                format!("must be finite and >= 0, got {}", self.bullet_spawn_interval_ms),
            ));
        }
        if self.island_radius >= self.orbit_radius {
            return Err(ConfigError::invalid(
                "island_radius",
                "must be smaller than orbit_radius",
            ));
        }
        Ok(())
    }

    /// Distance at which the ship picks up a coin
    #[inline]
    pub fn pickup_distance(&self) -> f32 {
        self.ship_radius + self.coin_size
    }

    /// Distance at which a bullet destroys the ship
    #[inline]
    pub fn fatal_distance(&self) -> f32 {
        self.ship_radius + self.bullet_radius
    }
}

/// Drawable area; the orbit is centered in it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Viewport {
    /// Returns `None` for zero, negative or non-finite dimensions
    pub fn new(width: f32, height: f32) -> Option<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        (valid(width) && valid(height)).then_some(Self { width, height })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Bullets farther than this from the center are pruned
    #[inline]
    pub fn prune_radius(&self) -> f32 {
        self.width.min(self.height) / 2.0 + BULLET_PRUNE_MARGIN
    }

    /// Strictly inside the rectangle (edges count as outside)
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > 0.0 && p.x < self.width && p.y > 0.0 && p.y < self.height
    }
}
