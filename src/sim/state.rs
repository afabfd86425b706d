//! Game session and phase transitions
//!
//! All mutable game state is owned by one [`GameSession`]. Phase changes go
//! through guarded methods that ignore inputs which make no sense in the
//! current phase.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::entities::{Bullet, Coin, Ship};
use super::path::{generate_coins, nearest_coin_angle};
use crate::config::{ConfigError, GameConfig, Viewport};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Coins laid out, no ship yet, waiting for the start input
    Waiting,
    /// Active gameplay
    Playing,
    /// Ship destroyed; only a restart leaves this phase
    GameOver,
}

/// Something that happened during a step, for UI and audio collaborators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    CoinCollected { index: usize, score: u64 },
    /// All coins collected; `level` is the level just entered
    LevelComplete { level: u32 },
    BulletFired { angle: f32 },
    GameOver { score: u64, level: u32 },
}

/// Inputs forwarded by the platform layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameInput {
    Start,
    Reverse,
    Restart,
    Resize { width: f32, height: f32 },
}

/// Complete single-player session state
#[derive(Debug, Clone, Serialize)]
pub struct GameSession {
    pub config: GameConfig,
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub score: u64,
    /// Starts at 1
    pub level: u32,
    /// Present only while playing
    pub ship: Option<Ship>,
    /// Current ring, in angle order
    pub coins: Vec<Coin>,
    pub bullets: Vec<Bullet>,
    /// Timestamp of the last spawn (ms); `None` fires on the next step
    pub last_spawn_ms: Option<f64>,
    /// Seed the bullet RNG was created from
    pub seed: u64,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
}

impl GameSession {
    /// Create a session in the Waiting phase with a fresh coin ring.
    ///
    /// The config is validated here, so hand-built configs get the same checks
    /// as loaded ones.
    pub fn new(config: GameConfig, viewport: Viewport, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let coins = generate_coins(config.coin_count, config.orbit_radius, viewport.center());
        Ok(Self {
            config,
            viewport,
            phase: GamePhase::Waiting,
            score: 0,
            level: 1,
            ship: None,
            coins,
            bullets: Vec::new(),
            last_spawn_ms: None,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    /// Orbit center (derived from the viewport)
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.viewport.center()
    }

    /// Current ship position, if there is a ship
    pub fn ship_position(&self) -> Option<Vec2> {
        self.ship
            .as_ref()
            .map(|s| s.position(self.center(), self.config.orbit_radius))
    }

    /// Dispatch a platform input to the matching transition
    pub fn apply(&mut self, input: GameInput) {
        match input {
            GameInput::Start => self.start(),
            GameInput::Reverse => self.reverse_direction(),
            GameInput::Restart => self.restart(),
            GameInput::Resize { width, height } => self.resize(width, height),
        }
    }

    /// Waiting -> Playing. The ship appears on the first coin.
    pub fn start(&mut self) {
        if self.phase != GamePhase::Waiting {
            log::debug!("Ignoring start in {:?}", self.phase);
            return;
        }
        let angle = self.coins.first().map_or(0.0, |c| c.angle);
        self.ship = Some(Ship::new(angle, self.config.ship_speed));
        self.phase = GamePhase::Playing;
        log::info!("Game started at level {}", self.level);
    }

    /// Flip the ship's travel direction (Playing only)
    pub fn reverse_direction(&mut self) {
        if self.phase != GamePhase::Playing {
            log::debug!("Ignoring reverse in {:?}", self.phase);
            return;
        }
        if let Some(ship) = self.ship.as_mut() {
            ship.reverse();
            log::debug!("Ship direction now {:?}", ship.direction);
        }
    }

    /// Full reset back to Waiting, valid from any phase
    pub fn restart(&mut self) {
        log::info!(
            "Restarting (was {:?}, score {}, level {})",
            self.phase,
            self.score,
            self.level
        );
        self.phase = GamePhase::Waiting;
        self.score = 0;
        self.level = 1;
        self.ship = None;
        self.bullets.clear();
        self.last_spawn_ms = None;
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.coins = generate_coins(
            self.config.coin_count,
            self.config.orbit_radius,
            self.center(),
        );
    }

    /// Recompute the center for a new viewport size.
    ///
    /// Outside GameOver a fresh, uncollected ring replaces the old one around the
    /// new center and the ship snaps to the nearest coin. Degenerate sizes are
    /// ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        let Some(viewport) = Viewport::new(width, height) else {
            log::warn!("Ignoring resize to {width}x{height}");
            return;
        };
        self.viewport = viewport;

        if self.phase == GamePhase::GameOver {
            return;
        }
        self.coins = generate_coins(
            self.config.coin_count,
            self.config.orbit_radius,
            viewport.center(),
        );
        if let Some(ship) = self.ship.as_mut() {
            if let Some(angle) = nearest_coin_angle(&self.coins, ship.angle) {
                ship.place_at(angle);
            }
        }
        log::debug!("Resized to {width}x{height}");
    }

    /// Move to the next level inside the current step: fresh ring, no
    /// bullets, spawn timer reset, ship back on the first coin.
    pub(crate) fn advance_level(&mut self) {
        self.level += 1;
        self.bullets.clear();
        self.last_spawn_ms = None;
        self.coins = generate_coins(
            self.config.coin_count,
            self.config.orbit_radius,
            self.center(),
        );
        if let (Some(ship), Some(first)) = (self.ship.as_mut(), self.coins.first()) {
            ship.place_at(first.angle);
        }
        log::info!("Level {} (score {})", self.level, self.score);
    }

    /// Playing -> GameOver
    pub(crate) fn end_game(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        log::info!("Game over: score {}, level {}", self.score, self.level);
    }
}
