//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, one logical frame per `tick`
//! - Seeded RNG only (and only for cosmetics)
//! - Stable iteration order (collection order)
//! - No rendering, audio or platform dependencies

pub mod camera;
pub mod collision;
pub mod effects;
pub mod enemy;
pub mod physics;
pub mod progression;
pub mod rect;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use collision::{EnemyContact, classify_enemy_contact, lands_on};
pub use effects::{Effects, FloatingText, Particle, Tint};
pub use enemy::{Enemy, EnemyBehavior, EnemyType};
pub use rect::{Bounded, Rect};
pub use state::{
    Checkpoint, Coin, GameEvent, GameState, Platform, PlatformKind, Player, Projectile, RunStatus,
    SoundCue,
};
pub use tick::{TickInput, tick};
