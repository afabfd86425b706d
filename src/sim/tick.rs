//! Per-frame simulation step
//!
//! One call advances the session by exactly one frame. The only timing input
//! is the caller's wall-clock timestamp, used for the bullet spawn interval.

use std::f32::consts::TAU;

use rand::Rng;

use super::collision::{bullet_in_bounds, collect_coins, first_fatal_bullet};
use super::entities::Bullet;
use super::path::all_collected;
use super::state::{GameEvent, GamePhase, GameSession};
use crate::consts::{MIN_SPAWN_INTERVAL_MS, SPAWN_INTERVAL_REDUCTION_MS};

/// Spawn interval for a level: shrinks by a fixed amount per level down to a floor
pub fn spawn_interval_ms(base_ms: f64, level: u32) -> f64 {
    let reduction = level.saturating_sub(1) as f64 * SPAWN_INTERVAL_REDUCTION_MS;
    (base_ms - reduction).max(MIN_SPAWN_INTERVAL_MS)
}

/// Advance the session by one frame.
///
/// Does nothing outside the Playing phase. Order within a step:
/// ship, coins (and level advance), bullet motion and pruning, spawn, death check.
pub fn tick(session: &mut GameSession, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if session.phase != GamePhase::Playing {
        return events;
    }

    let center = session.center();
    let orbit_radius = session.config.orbit_radius;
    let Some(ship) = session.ship.as_mut() else {
        log::warn!("Playing without a ship; skipping step");
        return events;
    };
    ship.advance();
    let ship_pos = ship.position(center, orbit_radius);

    // --- COINS ---
    let reach = session.config.pickup_distance();
    for index in collect_coins(ship_pos, &mut session.coins, reach) {
        session.score += 1;
        events.push(GameEvent::CoinCollected {
            index,
            score: session.score,
        });
    }
    if all_collected(&session.coins) {
        session.advance_level();
        events.push(GameEvent::LevelComplete {
            level: session.level,
        });
    }

    // --- BULLETS ---
    let viewport = session.viewport;
    session.bullets.retain_mut(|bullet| {
        bullet.advance();
        bullet_in_bounds(bullet, &viewport)
    });

    if let Some(angle) = spawn_bullet(session, now_ms) {
        events.push(GameEvent::BulletFired { angle });
    }

    // --- DEATH ---
    // Level advance may have moved the ship
    let Some(ship_pos) = session.ship_position() else {
        return events;
    };
    let fatal = session.config.fatal_distance();
    if first_fatal_bullet(ship_pos, &session.bullets, fatal).is_some() {
        session.end_game();
        events.push(GameEvent::GameOver {
            score: session.score,
            level: session.level,
        });
    }

    events
}

/// Fire at most one bullet from the center if the spawn interval has elapsed
fn spawn_bullet(session: &mut GameSession, now_ms: f64) -> Option<f32> {
    let interval = spawn_interval_ms(session.config.bullet_spawn_interval_ms, session.level);
    let due = match session.last_spawn_ms {
        None => true,
        Some(last) => now_ms - last > interval,
    };
    if !due {
        return None;
    }

    let angle = session.rng.random_range(0.0..TAU);
    let bullet = Bullet::fire(session.center(), angle, session.config.bullet_speed);
    session.bullets.push(bullet);
    session.last_spawn_ms = Some(now_ms);
    log::debug!("Bullet fired at {:.3} rad ({} active)", angle, session.bullets.len());
    Some(angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, Viewport};
    use glam::Vec2;
    use proptest::prelude::*;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn session(config: GameConfig, seed: u64) -> GameSession {
        GameSession::new(config, Viewport::default(), seed).expect("valid config")
    }

    fn quiet_config() -> GameConfig {
        // Bullets never leave the center
        GameConfig {
            bullet_speed: 0.0,
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_spawn_interval_shrinks_with_level() {
        assert_eq!(spawn_interval_ms(1000.0, 1), 1000.0);
        assert_eq!(spawn_interval_ms(1000.0, 2), 900.0);
        assert_eq!(spawn_interval_ms(1000.0, 5), 600.0);
        assert_eq!(spawn_interval_ms(1000.0, 10), 100.0);
        assert_eq!(spawn_interval_ms(1000.0, 25), 100.0);
    }

    #[test]
    fn test_tick_is_noop_outside_playing() {
        let mut s = session(GameConfig::default(), 1);
        assert!(tick(&mut s, 0.0).is_empty());
        assert!(s.bullets.is_empty());
        assert_eq!(s.phase, GamePhase::Waiting);
    }

    #[test]
    fn test_first_step_fires_immediately() {
        let mut s = session(quiet_config(), 1);
        s.start();
        let events = tick(&mut s, 5.0);
        assert_eq!(s.bullets.len(), 1);
        assert_eq!(s.last_spawn_ms, Some(5.0));
        assert!(events.iter().any(|e| matches!(e, GameEvent::BulletFired { .. })));
        assert_eq!(s.bullets[0].pos, s.center());
    }

    #[test]
    fn test_spawn_waits_for_interval_without_catch_up() {
        let mut s = session(quiet_config(), 1);
        s.start();
        tick(&mut s, 0.0);
        assert_eq!(s.bullets.len(), 1);

        // Not yet due at level 1 (1000 ms)
        tick(&mut s, 500.0);
        tick(&mut s, 1000.0);
        assert_eq!(s.bullets.len(), 1);

        // Long stall: still only one new bullet
        tick(&mut s, 10_000.0);
        assert_eq!(s.bullets.len(), 2);
        assert_eq!(s.last_spawn_ms, Some(10_000.0));
    }

    #[test]
    fn test_bullet_angles_in_range() {
        let mut s = session(quiet_config(), 42);
        s.start();
        for i in 0..50 {
            tick(&mut s, i as f64 * 2000.0);
        }
        assert!(!s.bullets.is_empty());
        assert!(s.bullets.iter().all(|b| (0.0..TAU).contains(&b.angle)));
    }

    #[test]
    fn test_same_seed_same_bullets() {
        let mut a = session(quiet_config(), 99999);
        let mut b = session(quiet_config(), 99999);
        a.start();
        b.start();
        for i in 0..20 {
            let now = i as f64 * 1500.0;
            assert_eq!(tick(&mut a, now), tick(&mut b, now));
        }
        let angles_a: Vec<f32> = a.bullets.iter().map(|b| b.angle).collect();
        let angles_b: Vec<f32> = b.bullets.iter().map(|b| b.angle).collect();
        assert_eq!(angles_a, angles_b);
    }

    #[test]
    fn test_restart_replays_bullet_sequence() {
        let mut s = session(quiet_config(), 77);
        s.start();
        let first_run: Vec<_> = (0..10).map(|i| tick(&mut s, i as f64 * 1500.0)).collect();

        s.restart();
        s.start();
        let second_run: Vec<_> = (0..10).map(|i| tick(&mut s, i as f64 * 1500.0)).collect();
        assert_eq!(first_run, second_run);

        let mut fresh = session(quiet_config(), 77);
        fresh.start();
        let fresh_run: Vec<_> = (0..10).map(|i| tick(&mut fresh, i as f64 * 1500.0)).collect();
        assert_eq!(first_run, fresh_run);
    }

    #[test]
    fn test_bullet_beyond_prune_radius_removed() {
        let mut s = session(quiet_config(), 1);
        s.start();
        s.last_spawn_ms = Some(0.0);
        let center = s.center();
        // Prune radius for 800x600 is 350
        s.bullets.push(Bullet::fire(center + Vec2::new(349.0, 0.0), 0.0, 3.0));
        s.bullets.push(Bullet::fire(center + Vec2::new(0.0, 100.0), 0.0, 3.0));
        tick(&mut s, 1.0);
        assert_eq!(s.bullets.len(), 1);
        assert!((s.bullets[0].pos.y - (center.y + 100.0)).abs() < 1e-4);
    }

    #[test]
    fn test_bullet_leaving_viewport_removed() {
        let mut s = session(quiet_config(), 1);
        s.start();
        s.last_spawn_ms = Some(0.0);
        // Inside the prune circle but about to cross the top edge
        s.bullets.push(Bullet::fire(
            Vec2::new(400.0, 2.0),
            -std::f32::consts::FRAC_PI_2,
            3.0,
        ));
        tick(&mut s, 1.0);
        assert!(s.bullets.is_empty());
    }

    #[test]
    fn test_four_coin_lap_advances_level() {
        let config = GameConfig {
            coin_count: 4,
            ship_speed: 0.1,
            orbit_radius: 100.0,
            bullet_speed: 0.0,
            ..GameConfig::default()
        };
        let mut s = session(config, 3);
        s.start();
        assert_eq!(s.ship.as_ref().unwrap().angle, s.coins[0].angle);

        let mut collected = 0;
        let mut level_events = Vec::new();
        for frame in 0..200 {
            let events = tick(&mut s, frame as f64 * FRAME_MS);
            for event in events {
                match event {
                    GameEvent::CoinCollected { .. } => collected += 1,
                    GameEvent::LevelComplete { level } => level_events.push(level),
                    _ => {}
                }
            }
            if s.level == 2 {
                break;
            }
        }

        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(collected, 4);
        assert_eq!(s.score, 4);
        assert_eq!(s.level, 2);
        assert_eq!(level_events, vec![2]);
        assert_eq!(s.coins.len(), 4);
        assert!(s.coins.iter().all(|c| !c.collected));
        assert_eq!(s.ship.as_ref().unwrap().angle, s.coins[0].angle);
        // Old bullets cleared, one fresh shot from the reset timer
        assert_eq!(s.bullets.len(), 1);
    }

    #[test]
    fn test_level_advance_shortens_interval() {
        let config = GameConfig {
            coin_count: 1,
            ..quiet_config()
        };
        let mut s = session(config, 3);
        s.start();
        // Ship starts on the only coin, so the first step clears the level
        let events = tick(&mut s, 0.0);
        assert!(events.contains(&GameEvent::LevelComplete { level: 2 }));
        assert_eq!(s.level, 2);
        assert_eq!(spawn_interval_ms(s.config.bullet_spawn_interval_ms, s.level), 900.0);
    }

    #[test]
    fn test_empty_ring_never_advances() {
        let config = GameConfig {
            coin_count: 0,
            ..quiet_config()
        };
        let mut s = session(config, 3);
        s.start();
        assert_eq!(s.ship.as_ref().unwrap().angle, 0.0);
        for frame in 0..100 {
            tick(&mut s, frame as f64 * FRAME_MS);
        }
        assert_eq!(s.level, 1);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_bullet_hit_ends_game_for_good() {
        let config = GameConfig {
            ship_speed: 0.0,
            bullet_spawn_interval_ms: 1e9,
            ..GameConfig::default()
        };
        let mut s = session(config, 5);
        s.start();
        s.last_spawn_ms = Some(0.0);
        // Fired straight at the parked ship on coin 0
        s.bullets.push(Bullet::fire(s.center(), 0.0, 3.0));

        let mut game_over = None;
        for frame in 1..200 {
            let events = tick(&mut s, frame as f64);
            if let Some(e) = events
                .iter()
                .find(|e| matches!(e, GameEvent::GameOver { .. }))
            {
                game_over = Some(e.clone());
                break;
            }
        }
        assert_eq!(
            game_over,
            Some(GameEvent::GameOver { score: 1, level: 1 })
        );
        assert_eq!(s.phase, GamePhase::GameOver);

        let bullet_pos = s.bullets[0].pos;
        for frame in 200..260 {
            assert!(tick(&mut s, frame as f64).is_empty());
        }
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.bullets[0].pos, bullet_pos);
        assert_eq!(s.score, 1);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut s = session(GameConfig::default(), 5);
        s.start();
        s.bullets.push(Bullet::fire(s.ship_position().unwrap(), 0.0, 0.0));
        tick(&mut s, 0.0);
        assert_eq!(s.phase, GamePhase::GameOver);

        s.restart();
        assert_eq!(s.phase, GamePhase::Waiting);
        assert_eq!(s.score, 0);
        assert_eq!(s.level, 1);
        assert!(s.bullets.is_empty());
        assert!(s.ship.is_none());
        assert!(s.coins.iter().all(|c| !c.collected));

        s.start();
        tick(&mut s, 0.0);
        assert_eq!(s.phase, GamePhase::Playing);
    }

    proptest! {
        #[test]
        fn prop_ship_angle_stays_wrapped(
            speed in 0.0f32..3.0,
            flips in proptest::collection::vec(any::<bool>(), 1..400),
        ) {
            let config = GameConfig { ship_speed: speed, ..quiet_config() };
            let mut s = session(config, 11);
            s.start();
            for (frame, flip) in flips.into_iter().enumerate() {
                if flip {
                    s.reverse_direction();
                }
                tick(&mut s, frame as f64 * FRAME_MS);
                let angle = s.ship.as_ref().unwrap().angle;
                prop_assert!((0.0..TAU).contains(&angle), "angle {} out of range", angle);
            }
        }

        #[test]
        fn prop_score_never_decreases(
            seed in any::<u64>(),
            flips in proptest::collection::vec(any::<bool>(), 1..300),
        ) {
            let mut s = session(GameConfig::default(), seed);
            s.start();
            let mut last_score = 0;
            for (frame, flip) in flips.into_iter().enumerate() {
                if flip {
                    s.reverse_direction();
                }
                let events = tick(&mut s, frame as f64 * FRAME_MS);
                let picked = events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::CoinCollected { .. }))
                    .count() as u64;
                prop_assert_eq!(s.score, last_score + picked);
                last_score = s.score;
            }
        }
    }
}
