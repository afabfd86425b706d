//! Coin ring on the orbit path
//!
//! Coins sit at evenly spaced angles `i * 2π / N` on a circle of the orbit
//! radius around the center. Generation is deterministic.

use std::f32::consts::TAU;

use glam::Vec2;

use super::entities::Coin;
use crate::{angular_distance, polar_to_cartesian};

/// Angle between neighbouring coins
#[inline]
pub fn angle_step(count: usize) -> f32 {
    TAU / count as f32
}

/// Build a fresh, uncollected ring of `count` coins
pub fn generate_coins(count: usize, orbit_radius: f32, center: Vec2) -> Vec<Coin> {
    if count == 0 {
        return Vec::new();
    }
    let step = angle_step(count);
    (0..count)
        .map(|i| {
            let angle = i as f32 * step;
            Coin {
                pos: center + polar_to_cartesian(orbit_radius, angle),
                angle,
                collected: false,
            }
        })
        .collect()
}

/// Angle of the coin closest to `angle` along the orbit. Ties go to the
/// earlier coin.
pub fn nearest_coin_angle(coins: &[Coin], angle: f32) -> Option<f32> {
    coins
        .iter()
        .map(|c| (c.angle, angular_distance(c.angle, angle)))
        .fold(None, |best: Option<(f32, f32)>, (a, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ => Some((a, d)),
        })
        .map(|(a, _)| a)
}

/// True once every coin is collected. An empty ring is never complete.
pub fn all_collected(coins: &[Coin]) -> bool {
    !coins.is_empty() && coins.iter().all(|c| c.collected)
}
