//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so levels can be
//! retuned without touching the update step. Defaults match [`crate::consts`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay balance knobs, read by the simulation every frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player movement ===
    pub gravity: f32,
    pub jump_force: f32,
    pub double_jump_factor: f32,
    pub stomp_bounce_factor: f32,
    pub move_speed: f32,
    pub move_damping: f32,
    pub dash_speed: f32,
    pub dash_duration: u32,
    pub dash_cooldown: u32,
    pub player_width: f32,
    pub player_height: f32,

    // === Collision ===
    pub landing_tolerance: f32,
    pub hard_landing_speed: f32,
    pub stomp_band: f32,

    // === Scoring ===
    pub coin_value: u64,
    pub enemy_value: u64,

    // === Enemies ===
    pub turret_reload: u32,
    pub projectile_speed: f32,
    pub projectile_size: f32,
    pub projectile_y_offset: f32,
    pub projectile_cull_margin: f32,
    pub flyer_phase_step: f32,
    pub flyer_bob_amplitude: f32,

    // === Progression ===
    pub fall_limit: f32,
    pub finish_margin: f32,
    pub respawn_frames: u32,
    pub finish_damping: f32,

    // === Camera ===
    pub camera_lerp: f32,
    pub camera_lead: f32,
    pub shake_decay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            double_jump_factor: DOUBLE_JUMP_FACTOR,
            stomp_bounce_factor: STOMP_BOUNCE_FACTOR,
            move_speed: MOVE_SPEED,
            move_damping: MOVE_DAMPING,
            dash_speed: DASH_SPEED,
            dash_duration: DASH_DURATION,
            dash_cooldown: DASH_COOLDOWN,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,

            landing_tolerance: LANDING_TOLERANCE,
            hard_landing_speed: HARD_LANDING_SPEED,
            stomp_band: STOMP_BAND,

            coin_value: COIN_VALUE,
            enemy_value: ENEMY_VALUE,

            turret_reload: TURRET_RELOAD,
            projectile_speed: PROJECTILE_SPEED,
            projectile_size: PROJECTILE_SIZE,
            projectile_y_offset: PROJECTILE_Y_OFFSET,
            projectile_cull_margin: PROJECTILE_CULL_MARGIN,
            flyer_phase_step: FLYER_PHASE_STEP,
            flyer_bob_amplitude: FLYER_BOB_AMPLITUDE,

            fall_limit: FALL_LIMIT,
            finish_margin: FINISH_MARGIN,
            respawn_frames: RESPAWN_FRAMES,
            finish_damping: FINISH_DAMPING,

            camera_lerp: CAMERA_LERP,
            camera_lead: CAMERA_LEAD,
            shake_decay: SHAKE_DECAY,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json).context("Failed to parse tuning")?;
        log::info!(
            "Loaded tuning (gravity={}, jump={}, dash={})",
            tuning.gravity,
            tuning.jump_force,
            tuning.dash_speed
        );
        Ok(tuning)
    }

    /// Velocity of the weaker second jump
    pub fn double_jump_force(&self) -> f32 {
        self.jump_force * self.double_jump_factor
    }

    /// Upward velocity after stomping an enemy
    pub fn stomp_bounce(&self) -> f32 {
        self.jump_force * self.stomp_bounce_factor
    }
}
