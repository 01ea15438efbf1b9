//! Collision detection and response for axis-aligned boxes
//!
//! The pass order is fixed and part of the game rules: platforms,
//! checkpoints, projectiles, enemies, coins. A projectile death ends the pass
//! early; an enemy death does not.

use std::ops::ControlFlow;

use super::effects::Tint;
use super::progression;
use super::rect::{Bounded, Rect};
use super::state::{GameState, Player, SoundCue};

/// Fraction of the player's width, measured in from each side, that does
/// not count toward standing on a platform
const FOOT_INSET: f32 = 0.2;

/// How a player/enemy overlap resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyContact {
    /// Landed on top while falling: kill and bounce
    Stomp,
    /// Hit while dashing: kill, no bounce
    DashStrike,
    /// Anything else: the player dies
    Hurt,
}

/// Landing test: the central footprint overlaps the platform horizontally,
/// the feet are past the top but no further than `tolerance` below the
/// platform's bottom, and the player is not moving up.
pub fn lands_on(player: &Rect, vel_y: f32, platform: &Rect, tolerance: f32) -> bool {
    let foot_left = player.left() + player.size.x * FOOT_INSET;
    let foot_right = player.left() + player.size.x * (1.0 - FOOT_INSET);
    foot_left < platform.right()
        && foot_right > platform.left()
        && player.bottom() > platform.top()
        && player.bottom() < platform.bottom() + tolerance
        && vel_y >= 0.0
}

/// Classify an overlap that is already known to happen
pub fn classify_enemy_contact(player: &Player, enemy: &Rect, stomp_band: f32) -> EnemyContact {
    if player.dashing {
        EnemyContact::DashStrike
    } else if player.vel.y > 0.0 && player.bounds().bottom() < enemy.top() + stomp_band {
        EnemyContact::Stomp
    } else {
        EnemyContact::Hurt
    }
}

/// Run every collision category in order. `Break` means a projectile killed
/// the player and the rest of the frame's collision checks were skipped.
pub fn resolve_collisions(state: &mut GameState) -> ControlFlow<()> {
    resolve_platforms(state);
    resolve_checkpoints(state);
    if resolve_projectiles(state).is_break() {
        return ControlFlow::Break(());
    }
    resolve_enemies(state);
    resolve_coins(state);
    ControlFlow::Continue(())
}

/// Snap onto any platform the player is landing on
pub fn resolve_platforms(state: &mut GameState) {
    let tolerance = state.tuning.landing_tolerance;
    let hard_speed = state.tuning.hard_landing_speed;
    let mut hard_landing = false;

    let player = &mut state.player;
    player.grounded = false;
    for platform in &state.platforms {
        if !lands_on(&player.bounds(), player.vel.y, &platform.rect, tolerance) {
            continue;
        }
        if !player.grounded && player.vel.y > hard_speed {
            player.squash = 1.4;
            player.stretch = 0.6;
            hard_landing = true;
        }
        player.pos.y = platform.rect.top() - player.size.y;
        player.vel.y = 0.0;
        player.grounded = true;
        player.jump_count = 0;
    }

    if hard_landing {
        state.kick_shake(2.0);
    }
}

pub fn resolve_checkpoints(state: &mut GameState) {
    for i in 0..state.checkpoints.len() {
        let checkpoint = &state.checkpoints[i];
        if !checkpoint.active && state.player.intersects(checkpoint) {
            progression::activate_checkpoint(state, i);
        }
    }
}

/// Move shots, cull those outside the camera window, then parry or die
pub fn resolve_projectiles(state: &mut GameState) -> ControlFlow<()> {
    let (cull_min, cull_max) = state.camera.relevant_span(state.tuning.projectile_cull_margin);

    let mut pending = std::mem::take(&mut state.projectiles).into_iter();
    let mut live = Vec::with_capacity(pending.len());

    while let Some(mut shot) = pending.next() {
        shot.pos += shot.vel;
        if shot.pos.x < cull_min || shot.pos.x > cull_max {
            continue;
        }
        if !state.player.intersects(&shot) {
            live.push(shot);
            continue;
        }

        if state.player.dashing {
            state.effects.burst(shot.pos, Tint::Accent, 10);
            state.effects.text(shot.pos, "PARRY!", Tint::Accent);
            log::debug!("Parried projectile at x={:.1}", shot.pos.x);
        } else {
            // The hit shot is consumed; the rest stay unless the death clears them
            live.extend(pending);
            state.projectiles = live;
            progression::handle_death(state);
            return ControlFlow::Break(());
        }
    }

    state.projectiles = live;
    ControlFlow::Continue(())
}

/// Step each living enemy, then resolve its contact with the player
pub fn resolve_enemies(state: &mut GameState) {
    for i in 0..state.enemies.len() {
        if state.enemies[i].dead {
            continue;
        }

        let player_x = state.player.pos.x;
        if let Some(shot) = state.enemies[i].step(player_x, &state.tuning) {
            state.projectiles.push(shot);
        }

        let enemy = state.enemies[i].bounds();
        if !state.player.bounds().overlaps(&enemy) {
            continue;
        }

        match classify_enemy_contact(&state.player, &enemy, state.tuning.stomp_band) {
            EnemyContact::Hurt => progression::handle_death(state),
            contact => {
                state.enemies[i].dead = true;
                state.sound(SoundCue::Coin);
                if contact == EnemyContact::Stomp {
                    state.player.vel.y = state.tuning.stomp_bounce();
                    state.player.jump_count = 1;
                }
                let value = state.tuning.enemy_value;
                progression::award(state, value, enemy.pos, Tint::Enemy);
                state.kick_shake(8.0);
                state.effects.burst(enemy.center(), Tint::Enemy, 20);
                log::debug!("{:?} enemy {i} killed by {contact:?}", state.enemies[i].kind());
            }
        }
    }
}

pub fn resolve_coins(state: &mut GameState) {
    for i in 0..state.coins.len() {
        let coin = &state.coins[i];
        if coin.collected || !state.player.intersects(coin) {
            continue;
        }

        let rect = coin.rect;
        state.coins[i].collected = true;
        state.sound(SoundCue::Coin);
        let value = state.tuning.coin_value;
        progression::award(state, value, rect.pos, Tint::Coin);
        state.effects.burst(rect.center(), Tint::Coin, 8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ENEMY_SIZE, PLAYER_HEIGHT, PLAYER_WIDTH};
    use crate::level::LevelDescriptor;
    use crate::sim::enemy::{Enemy, EnemyType};
    use crate::sim::state::{Coin, Projectile, RunStatus};
    use glam::Vec2;

    fn player_rect(x: f32, y: f32) -> Rect {
        Rect::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Level 1 state with the player parked in open air, nothing nearby
    fn open_air_state() -> GameState {
        let mut state = GameState::new(&LevelDescriptor::builtin(1), 0);
        state.enemies.clear();
        state.coins.clear();
        state.player.pos = Vec2::new(1380.0, 100.0);
        state
    }

    #[test]
    fn test_lands_on_requires_central_footprint() {
        let platform = Rect::new(100.0, 500.0, 200.0, 40.0);
        // Feet 2px into the platform top, fully over it
        assert!(lands_on(&player_rect(150.0, 450.0), 3.0, &platform, 15.0));
        // Only the outer 20% hangs over the left edge: no landing
        assert!(!lands_on(&player_rect(100.0 - 42.0 * 0.8 - 1.0, 450.0), 3.0, &platform, 15.0));
        // Just inside the footprint
        assert!(lands_on(&player_rect(100.0 - 42.0 * 0.8 + 1.0, 450.0), 3.0, &platform, 15.0));
        // Moving up never lands
        assert!(!lands_on(&player_rect(150.0, 450.0), -1.0, &platform, 15.0));
        // Feet above the top
        assert!(!lands_on(&player_rect(150.0, 440.0), 3.0, &platform, 15.0));
        // Feet past the bottom tolerance band
        assert!(!lands_on(&player_rect(150.0, 504.0), 3.0, &platform, 15.0));
    }

    #[test]
    fn test_classify_enemy_contact() {
        let enemy = Rect::new(100.0, 462.0, ENEMY_SIZE, ENEMY_SIZE);
        let mut player = Player::new(Vec2::new(100.0, 462.0 - 52.0 + 10.0), Vec2::new(42.0, 52.0), 0);

        player.vel.y = 4.0;
        assert_eq!(classify_enemy_contact(&player, &enemy, 20.0), EnemyContact::Stomp);

        player.vel.y = -1.0;
        assert_eq!(classify_enemy_contact(&player, &enemy, 20.0), EnemyContact::Hurt);

        // Feet too deep for a stomp
        player.vel.y = 4.0;
        player.pos.y = 462.0 - 52.0 + 25.0;
        assert_eq!(classify_enemy_contact(&player, &enemy, 20.0), EnemyContact::Hurt);

        player.dashing = true;
        assert_eq!(classify_enemy_contact(&player, &enemy, 20.0), EnemyContact::DashStrike);
    }

    #[test]
    fn test_platform_snap_resets_jumps() {
        let mut state = GameState::new(&LevelDescriptor::builtin(1), 0);
        // Ground platform top is y=500
        state.player.pos = Vec2::new(200.0, 500.0 - 52.0 + 6.0);
        state.player.vel.y = 6.0;
        state.player.jump_count = 2;

        resolve_platforms(&mut state);
        assert!(state.player.grounded);
        assert_eq!(state.player.pos.y, 448.0);
        assert_eq!(state.player.vel.y, 0.0);
        assert_eq!(state.player.jump_count, 0);
        // Falling faster than 5 is a hard landing
        assert_eq!(state.player.squash, 1.4);
        assert_eq!(state.screen_shake, 2.0);
    }

    #[test]
    fn test_soft_landing_has_no_impact() {
        let mut state = GameState::new(&LevelDescriptor::builtin(1), 0);
        state.player.pos = Vec2::new(200.0, 449.0);
        state.player.vel.y = 1.0;
        resolve_platforms(&mut state);
        assert!(state.player.grounded);
        assert_eq!(state.player.squash, 1.0);
        assert_eq!(state.screen_shake, 0.0);
    }

    #[test]
    fn test_airborne_clears_grounded() {
        let mut state = open_air_state();
        state.player.grounded = true;
        resolve_platforms(&mut state);
        assert!(!state.player.grounded);
    }

    #[test]
    fn test_projectiles_outside_window_are_culled() {
        let mut state = open_air_state();
        state.camera.x = 0.0;
        state.projectiles.push(Projectile::new(Vec2::new(5000.0, 0.0), Vec2::new(-5.0, 0.0), 12.0));
        state.projectiles.push(Projectile::new(Vec2::new(500.0, 0.0), Vec2::new(-5.0, 0.0), 12.0));

        assert!(resolve_projectiles(&mut state).is_continue());
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos.x, 495.0);
    }

    #[test]
    fn test_projectile_hit_without_checkpoint_is_game_over() {
        let mut state = open_air_state();
        state.camera.x = 1000.0;
        let at = state.player.pos + Vec2::new(10.0, 10.0);
        state.projectiles.push(Projectile::new(at, Vec2::ZERO, 12.0));
        state.projectiles.push(Projectile::new(Vec2::new(1900.0, 0.0), Vec2::ZERO, 12.0));

        assert!(resolve_projectiles(&mut state).is_break());
        assert!(state.is_game_over());
        // Only the shot that hit was consumed
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_enemy_contact_kills_stomped_enemy_and_bounces() {
        let mut state = open_air_state();
        state.enemies.push(Enemy::spawn(
            EnemyType::Patrol,
            Vec2::new(1380.0, 145.0),
            Vec2::splat(ENEMY_SIZE),
            Vec2::ZERO,
            (0.0, 5000.0),
            0.0,
        ));
        state.player.vel.y = 3.0;

        resolve_enemies(&mut state);
        assert!(state.enemies[0].dead);
        assert_eq!(state.player.score, 100);
        assert!((state.player.vel.y - (-7.35)).abs() < 1e-5);
        assert_eq!(state.player.jump_count, 1);
        assert_eq!(state.status, RunStatus::Running);
    }

    #[test]
    fn test_dead_enemies_are_ignored() {
        let mut state = open_air_state();
        let mut enemy = Enemy::spawn(
            EnemyType::Patrol,
            state.player.pos,
            Vec2::splat(ENEMY_SIZE),
            Vec2::new(2.0, 0.0),
            (0.0, 5000.0),
            0.0,
        );
        enemy.dead = true;
        state.enemies.push(enemy);

        resolve_enemies(&mut state);
        assert_eq!(state.status, RunStatus::Running);
        assert_eq!(state.enemies[0].pos.x, 1380.0);
    }

    #[test]
    fn test_enemy_death_still_collects_overlapping_coin() {
        let mut state = open_air_state();
        state.player.vel.y = -3.0;
        let pos = state.player.pos;
        state.enemies.push(Enemy::spawn(
            EnemyType::Patrol,
            pos + Vec2::new(10.0, 0.0),
            Vec2::splat(ENEMY_SIZE),
            Vec2::ZERO,
            (0.0, 5000.0),
            0.0,
        ));
        state.coins.push(Coin {
            rect: Rect::new(pos.x + 5.0, pos.y, 22.0, 22.0),
            collected: false,
            float_offset: 0.0,
        });

        assert!(resolve_collisions(&mut state).is_continue());
        assert!(state.is_game_over());
        assert!(state.coins[0].collected);
        assert_eq!(state.player.score, 10);
    }

    #[test]
    fn test_coin_collected_once() {
        let mut state = open_air_state();
        let pos = state.player.pos;
        state.coins.push(Coin {
            rect: Rect::new(pos.x, pos.y, 22.0, 22.0),
            collected: false,
            float_offset: 0.0,
        });

        resolve_coins(&mut state);
        resolve_coins(&mut state);
        assert!(state.coins[0].collected);
        assert_eq!(state.player.score, 10);
        assert_eq!(state.effects.texts.len(), 1);
    }
}
