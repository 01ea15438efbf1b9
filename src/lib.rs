//! Robo Dash - A side-scrolling platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (physics, collisions, progression)
//! - `level`: Static level descriptors fed into the simulation
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences that bound cosmetic effects

pub mod level;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use level::LevelDescriptor;
pub use settings::{QualityPreset, Settings};
pub use sim::{GameEvent, GameState, RunStatus, SoundCue, TickInput, tick};
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Downward acceleration per frame
    pub const GRAVITY: f32 = 0.45;
    /// Vertical velocity applied on a ground jump (negative is up)
    pub const JUMP_FORCE: f32 = -10.5;
    /// Second (air) jump strength relative to a ground jump
    pub const DOUBLE_JUMP_FACTOR: f32 = 0.9;
    /// Upward bounce after a stomp, relative to a ground jump
    pub const STOMP_BOUNCE_FACTOR: f32 = 0.7;
    pub const MOVE_SPEED: f32 = 5.5;
    /// Horizontal velocity retained per frame with no horizontal intent
    pub const MOVE_DAMPING: f32 = 0.85;

    /// Dash
    pub const DASH_SPEED: f32 = 14.0;
    pub const DASH_DURATION: u32 = 12; // frames
    pub const DASH_COOLDOWN: u32 = 40; // frames

    /// Entity sizes
    pub const PLAYER_WIDTH: f32 = 42.0;
    pub const PLAYER_HEIGHT: f32 = 52.0;
    pub const COIN_SIZE: f32 = 22.0;
    pub const ENEMY_SIZE: f32 = 38.0;
    pub const CHECKPOINT_WIDTH: f32 = 40.0;
    pub const CHECKPOINT_HEIGHT: f32 = 120.0;
    pub const PROJECTILE_SIZE: f32 = 12.0;

    /// Coin clusters are laid out horizontally, lifted above the anchor point
    pub const COIN_SPACING: f32 = 40.0;
    pub const COIN_LIFT: f32 = 40.0;

    /// Landing: feet may sink this far past the platform bottom and still land
    pub const LANDING_TOLERANCE: f32 = 15.0;
    /// Falling faster than this on landing counts as a hard landing
    pub const HARD_LANDING_SPEED: f32 = 5.0;
    /// Feet must stay above enemy top + this band for a stomp
    pub const STOMP_BAND: f32 = 20.0;

    /// Score awards
    pub const COIN_VALUE: u64 = 10;
    pub const ENEMY_VALUE: u64 = 100;

    /// Enemies
    pub const TURRET_RELOAD: u32 = 120;
    pub const PROJECTILE_SPEED: f32 = 5.0;
    pub const PROJECTILE_Y_OFFSET: f32 = 5.0;
    pub const PROJECTILE_CULL_MARGIN: f32 = 100.0;
    pub const FLYER_PHASE_STEP: f32 = 0.05;
    pub const FLYER_BOB_AMPLITUDE: f32 = 2.0;

    /// Progression
    pub const FALL_LIMIT: f32 = 1000.0;
    pub const FINISH_MARGIN: f32 = 250.0;
    pub const RESPAWN_FRAMES: u32 = 60;
    pub const FINISH_DAMPING: f32 = 0.8;

    /// Camera
    pub const CAMERA_LERP: f32 = 0.08;
    pub const CAMERA_LEAD: f32 = 1.0 / 3.0;

    /// Screen shake decays geometrically
    pub const SHAKE_DECAY: f32 = 0.9;

    /// Built-in level geometry
    pub const LEVEL_LENGTH: f32 = 5000.0;
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 300.0;
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;
}

/// Move `current` a fraction `t` of the way toward `target`
#[inline]
pub fn approach(current: f32, target: f32, t: f32) -> f32 {
    current + (target - current) * t
}
