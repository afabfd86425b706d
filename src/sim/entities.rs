//! Ship, coin and bullet entities

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BULLET_TAIL_LENGTH, SHIP_TRAIL_STEPS};
use crate::{polar_to_cartesian, wrap_angle};

/// Which way the ship travels around the orbit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Increasing angle (clockwise on a y-down screen)
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// +1.0 or -1.0
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Clockwise => 1.0,
            Direction::CounterClockwise => -1.0,
        }
    }

    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// The player's ship. Its position is always derived from `angle`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    /// Angle on the orbit, always in [0, 2π)
    pub angle: f32,
    pub direction: Direction,
    /// Radians per step
    pub speed: f32,
}

impl Ship {
    pub fn new(angle: f32, speed: f32) -> Self {
        Self {
            angle: wrap_angle(angle),
            direction: Direction::default(),
            speed,
        }
    }

    /// Advance one step along the orbit
    pub fn advance(&mut self) {
        self.angle = wrap_angle(self.angle + self.direction.sign() * self.speed);
    }

    pub fn reverse(&mut self) {
        self.direction = self.direction.reversed();
    }

    /// Jump to a new angle on the orbit, keeping direction and speed
    pub fn place_at(&mut self, angle: f32) {
        self.angle = wrap_angle(angle);
    }

    /// Cartesian position on the orbit
    #[inline]
    pub fn position(&self, center: Vec2, orbit_radius: f32) -> Vec2 {
        center + polar_to_cartesian(orbit_radius, self.angle)
    }

    /// Tangent the ship is facing, in [0, 2π)
    #[inline]
    pub fn heading(&self) -> f32 {
        wrap_angle(self.angle + self.direction.sign() * FRAC_PI_2)
    }

    /// Orbit point a couple of steps behind the ship, where its trail ends
    pub fn trail_anchor(&self, center: Vec2, orbit_radius: f32) -> Vec2 {
        let behind = self.angle - self.direction.sign() * self.speed * SHIP_TRAIL_STEPS;
        center + polar_to_cartesian(orbit_radius, behind)
    }
}

/// A coin on the orbit path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub angle: f32,
    pub collected: bool,
}

/// A turret bullet flying straight out from the center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Firing angle (fixed for the bullet's lifetime)
    pub angle: f32,
    /// Pixels per step
    pub speed: f32,
}

impl Bullet {
    pub fn fire(origin: Vec2, angle: f32, speed: f32) -> Self {
        Self {
            pos: origin,
            angle,
            speed,
        }
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin()) * self.speed
    }

    /// Move one step in a straight line
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.velocity();
    }

    /// Point behind the bullet where its tail is drawn to
    pub fn tail(&self) -> Vec2 {
        self.pos - Vec2::new(self.angle.cos(), self.angle.sin()) * BULLET_TAIL_LENGTH
    }
}
