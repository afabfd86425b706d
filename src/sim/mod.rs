//! Simulation module
//!
//! All gameplay logic lives here:
//! - One step per frame, driven externally
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod path;
pub mod state;
pub mod tick;

pub use collision::{bullet_in_bounds, collect_coins, first_fatal_bullet, within_reach};
pub use entities::{Bullet, Coin, Direction, Ship};
pub use path::{all_collected, generate_coins, nearest_coin_angle};
pub use state::{GameEvent, GameInput, GamePhase, GameSession};
pub use tick::{spawn_interval_ms, tick};
