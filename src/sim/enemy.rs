//! Enemy behavior state machines
//!
//! Each enemy type is a closed variant carrying only the state it needs
//! between frames. [`Enemy::step`] is the single dispatch point.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::{Bounded, Rect};
use super::state::Projectile;
use crate::tuning::Tuning;

/// Enemy type as written in level descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyType {
    Patrol,
    Flyer,
    Turret,
}

/// Per-type behavior state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyBehavior {
    /// Walks back and forth inside its range
    Patrol,
    /// Patrols horizontally while bobbing on a sine wave; `phase` never resets
    Flyer { phase: f32 },
    /// Stationary; fires when `reload` counts down to zero
    Turret { reload: u32 },
}

/// A hostile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Horizontal oscillation bounds `(min, max)` for patrol and flyer
    pub range: (f32, f32),
    /// One-way: dead enemies are skipped by behavior and collision
    pub dead: bool,
    pub behavior: EnemyBehavior,
}

impl Bounded for Enemy {
    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

impl Enemy {
    /// Build an enemy from its spawn record. `timer` is the flyer's starting
    /// phase or the turret's frames until its first shot.
    pub fn spawn(kind: EnemyType, pos: Vec2, size: Vec2, vel: Vec2, range: (f32, f32), timer: f32) -> Self {
        let behavior = match kind {
            EnemyType::Patrol => EnemyBehavior::Patrol,
            EnemyType::Flyer => EnemyBehavior::Flyer { phase: timer },
            EnemyType::Turret => EnemyBehavior::Turret {
                reload: timer.ceil().max(0.0) as u32,
            },
        };
        Self {
            pos,
            size,
            vel,
            range,
            dead: false,
            behavior,
        }
    }

    pub fn kind(&self) -> EnemyType {
        match self.behavior {
            EnemyBehavior::Patrol => EnemyType::Patrol,
            EnemyBehavior::Flyer { .. } => EnemyType::Flyer,
            EnemyBehavior::Turret { .. } => EnemyType::Turret,
        }
    }

    /// Advance one frame. Turrets return the projectile they fire, if any.
    pub fn step(&mut self, player_x: f32, tuning: &Tuning) -> Option<Projectile> {
        if self.dead {
            return None;
        }
        match self.behavior {
            EnemyBehavior::Patrol => {
                self.patrol();
                None
            }
            EnemyBehavior::Flyer { phase } => {
                self.fly(phase, tuning);
                None
            }
            EnemyBehavior::Turret { reload } => self.guard(reload, player_x, tuning),
        }
    }

    fn patrol(&mut self) {
        self.pos.x += self.vel.x;
        self.reflect_at_range();
    }

    fn fly(&mut self, phase: f32, tuning: &Tuning) {
        self.pos.x += self.vel.x;
        self.pos.y += phase.sin() * tuning.flyer_bob_amplitude;
        self.reflect_at_range();
        self.behavior = EnemyBehavior::Flyer {
            phase: phase + tuning.flyer_phase_step,
        };
    }

    fn guard(&mut self, reload: u32, player_x: f32, tuning: &Tuning) -> Option<Projectile> {
        let reload = reload.saturating_sub(1);
        if reload > 0 {
            self.behavior = EnemyBehavior::Turret { reload };
            return None;
        }

        self.behavior = EnemyBehavior::Turret {
            reload: tuning.turret_reload,
        };
        let dir = if player_x < self.pos.x { -1.0 } else { 1.0 };
        // Spawn just outside the turret on the firing side
        let x = if dir > 0.0 {
            self.pos.x + self.size.x
        } else {
            self.pos.x - tuning.projectile_size
        };
        Some(Projectile::new(
            Vec2::new(x, self.pos.y + tuning.projectile_y_offset),
            Vec2::new(dir * tuning.projectile_speed, 0.0),
            tuning.projectile_size,
        ))
    }

    /// Reverse once the position has left the range. The overshoot is kept.
    fn reflect_at_range(&mut self) {
        let (min, max) = self.range;
        if self.pos.x < min || self.pos.x > max {
            self.vel.x = -self.vel.x;
        }
    }
}
