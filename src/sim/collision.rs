//! Circle overlap tests for pickups, bullet hits and bullet pruning
//!
//! Every entity is a circle, so all checks reduce to comparing a center
//! distance against a combined radius. Touching (distance == threshold) is a miss.

use glam::Vec2;

use super::entities::{Bullet, Coin};
use crate::config::Viewport;

/// True if two circles with combined radius `reach` overlap
#[inline]
pub fn within_reach(a: Vec2, b: Vec2, reach: f32) -> bool {
    a.distance(b) < reach
}

/// Mark every uncollected coin within reach of the ship as collected.
///
/// Returns the indices of the coins picked up this call, in ring order.
pub fn collect_coins(ship_pos: Vec2, coins: &mut [Coin], reach: f32) -> Vec<usize> {
    let mut picked = Vec::new();
    for (idx, coin) in coins.iter_mut().enumerate() {
        if coin.collected {
            continue;
        }
        if within_reach(ship_pos, coin.pos, reach) {
            coin.collected = true;
            picked.push(idx);
        }
    }
    picked
}

/// Index of the first bullet close enough to destroy the ship
pub fn first_fatal_bullet(ship_pos: Vec2, bullets: &[Bullet], reach: f32) -> Option<usize> {
    bullets
        .iter()
        .position(|b| within_reach(ship_pos, b.pos, reach))
}

/// A bullet stays alive while it is inside both the prune circle and the viewport
#[inline]
pub fn bullet_in_bounds(bullet: &Bullet, viewport: &Viewport) -> bool {
    bullet.pos.distance(viewport.center()) < viewport.prune_radius() && viewport.contains(bullet.pos)
}
