//! Game state and core simulation types
//!
//! The whole state tree for one level attempt lives in [`GameState`]. A level
//! restart throws the tree away and rebuilds it from the descriptor.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::effects::Effects;
use super::enemy::Enemy;
use super::physics::ControlLatch;
use super::rect::{Bounded, Rect};
use crate::consts::*;
use crate::level::LevelDescriptor;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Where a level attempt stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Normal play
    Running,
    /// Died with a checkpoint saved; waiting out the freeze before respawning
    RespawnFreeze,
    /// Died with no checkpoint (terminal)
    GameOver,
    /// Crossed the finish line (terminal)
    Finished,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::GameOver | RunStatus::Finished)
    }
}

/// Audio trigger tags; the audio collaborator owns timbre and timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Jump,
    Coin,
    Dash,
    Hit,
    Win,
    Checkpoint,
}

/// Outbound notifications, drained by the host after each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundCue),
    /// Died with no checkpoint. Fired once per attempt.
    Loss { score: u64 },
    /// Reached the finish line. Fired once per attempt.
    LevelComplete { score: u64 },
}

/// The player-controlled robot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub grounded: bool,
    pub facing_right: bool,
    pub score: u64,
    /// Cosmetic deformation, relaxes toward 1.0
    pub squash: f32,
    pub stretch: f32,
    pub dashing: bool,
    /// Frames of dash remaining
    pub dash_timer: u32,
    /// Frames until the next dash is allowed
    pub dash_cooldown: u32,
    /// 0 = on ground, 1 = ground jump used, 2 = air jump used
    pub jump_count: u8,
}

impl Player {
    pub fn new(pos: Vec2, size: Vec2, score: u64) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            grounded: false,
            facing_right: true,
            score,
            squash: 1.0,
            stretch: 1.0,
            dashing: false,
            dash_timer: 0,
            dash_cooldown: 0,
            jump_count: 0,
        }
    }

    /// Midpoint of the bottom edge
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y)
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Platform variants. Only `Normal` has defined behavior; the others are
/// reserved and currently act as plain solid platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    #[default]
    Normal,
    Moving,
    Vanishing,
}

/// Static level geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
}

impl Bounded for Platform {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub rect: Rect,
    /// One-way: collected coins are skipped by collision and rendering
    pub collected: bool,
    /// Cosmetic hover phase offset (radians)
    pub float_offset: f32,
}

impl Bounded for Coin {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// A turret shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Informational only; removal is done by dropping from the collection
    pub active: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self {
            pos,
            vel,
            size: Vec2::splat(size),
            active: true,
        }
    }
}

impl Bounded for Projectile {
    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// A respawn point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub rect: Rect,
    /// One-way: set on first touch
    pub active: bool,
}

impl Bounded for Checkpoint {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// Complete simulation state for one level attempt
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// 1-based level number
    pub level_index: u32,
    /// Total horizontal length of the level
    pub level_length: f32,
    pub tuning: Tuning,
    pub settings: Settings,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub checkpoints: Vec<Checkpoint>,
    /// Visual effects (not gameplay-affecting)
    pub effects: Effects,
    pub camera: Camera,
    pub status: RunStatus,
    /// Frames left in the death freeze
    pub respawn_ticks: u32,
    /// Simulated frame counter (does not advance during the freeze)
    pub frame: u64,
    /// Screen shake magnitude
    pub screen_shake: f32,
    /// Cosmetic biome index derived from progress
    pub visual_phase: u32,
    /// Where the player reappears after a checkpoint-backed death
    pub respawn_anchor: Option<Vec2>,
    /// Held-button memory for edge detection
    #[serde(skip)]
    pub controls: ControlLatch,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Build a fresh attempt with default tuning and settings
    pub fn new(level: &LevelDescriptor, initial_score: u64) -> Self {
        Self::with_config(level, initial_score, Tuning::default(), Settings::default())
    }

    /// Build a fresh attempt. The descriptor is taken as-is; see
    /// [`LevelDescriptor::validate`] for authoring checks.
    pub fn with_config(level: &LevelDescriptor, initial_score: u64, tuning: Tuning, settings: Settings) -> Self {
        let mut effects = Effects::new(effects_seed(level.index), settings.max_particles());

        let player = Player::new(
            level.player_start,
            Vec2::new(tuning.player_width, tuning.player_height),
            initial_score,
        );

        let platforms = level
            .platforms
            .iter()
            .map(|p| Platform {
                rect: p.rect,
                kind: p.kind,
            })
            .collect();

        let enemies = level
            .enemies
            .iter()
            .map(|e| Enemy::spawn(e.kind, e.pos, Vec2::splat(ENEMY_SIZE), e.vel, e.range, e.timer))
            .collect();

        let mut coins = Vec::new();
        for cluster in &level.coin_clusters {
            for i in 0..cluster.count {
                coins.push(Coin {
                    rect: Rect::new(
                        cluster.pos.x + i as f32 * COIN_SPACING,
                        cluster.pos.y - COIN_LIFT,
                        COIN_SIZE,
                        COIN_SIZE,
                    ),
                    collected: false,
                    float_offset: effects.unit_random() * std::f32::consts::TAU,
                });
            }
        }

        let checkpoints = level
            .checkpoints
            .iter()
            .map(|&pos| Checkpoint {
                rect: Rect::from_pos_size(pos, Vec2::new(CHECKPOINT_WIDTH, CHECKPOINT_HEIGHT)),
                active: false,
            })
            .collect();

        log::info!(
            "Level {} loaded: {} platforms, {} enemies, {} coins, {} checkpoints",
            level.index,
            level.platforms.len(),
            level.enemies.len(),
            coins.len(),
            level.checkpoints.len()
        );

        Self {
            level_index: level.index,
            level_length: level.length,
            visual_phase: level.index.saturating_sub(1),
            tuning,
            settings,
            player,
            platforms,
            coins,
            enemies,
            projectiles: Vec::new(),
            checkpoints,
            effects,
            camera: Camera::default(),
            status: RunStatus::Running,
            respawn_ticks: 0,
            frame: 0,
            screen_shake: 0.0,
            respawn_anchor: None,
            controls: ControlLatch::default(),
            events: Vec::new(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.status == RunStatus::GameOver
    }

    pub fn is_finished(&self) -> bool {
        self.status == RunStatus::Finished
    }

    /// Horizontal position past which the level counts as complete
    pub fn finish_line(&self) -> f32 {
        self.level_length - self.tuning.finish_margin
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.camera.viewport = Vec2::new(width, height);
    }

    /// Queue an outbound event
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn sound(&mut self, cue: SoundCue) {
        self.emit(GameEvent::Sound(cue));
    }

    /// Events queued since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drain queued events (host calls this once per frame)
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Set screen shake to `magnitude` (respects settings)
    pub fn kick_shake(&mut self, magnitude: f32) {
        if self.settings.effective_screen_shake() {
            self.screen_shake = magnitude;
        }
    }

    /// Geometric shake decay
    pub fn decay_shake(&mut self) {
        self.screen_shake *= self.tuning.shake_decay;
        if self.screen_shake < 0.01 {
            self.screen_shake = 0.0;
        }
    }
}

/// Cosmetic RNG seed, fixed per level so replays match
fn effects_seed(level_index: u32) -> u64 {
    0x5EED_0000_u64 ^ u64::from(level_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_from_builtin_level() {
        let level = LevelDescriptor::builtin(1);
        let state = GameState::new(&level, 250);

        assert_eq!(state.status, RunStatus::Running);
        assert_eq!(state.player.score, 250);
        assert_eq!(state.player.pos, Vec2::new(PLAYER_START_X, PLAYER_START_Y));
        assert_eq!(state.platforms.len(), level.platforms.len());
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.checkpoints.len(), 1);
        assert_eq!(state.visual_phase, 0);
        assert!(state.respawn_anchor.is_none());
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_coin_clusters_expand_along_x() {
        let level = LevelDescriptor::builtin(1);
        let state = GameState::new(&level, 0);

        // First cluster: 3 coins anchored at (320, 320)
        let first: Vec<_> = state.coins.iter().take(3).map(|c| c.rect.pos).collect();
        assert_eq!(
            first,
            vec![Vec2::new(320.0, 280.0), Vec2::new(360.0, 280.0), Vec2::new(400.0, 280.0)]
        );
        assert_eq!(state.coins.len(), 3 + 3 + 4 + 5);
        assert!(state.coins.iter().all(|c| !c.collected));
    }

    #[test]
    fn test_same_level_same_cosmetics() {
        let level = LevelDescriptor::builtin(2);
        let a = GameState::new(&level, 0);
        let b = GameState::new(&level, 0);
        for (ca, cb) in a.coins.iter().zip(&b.coins) {
            assert_eq!(ca.float_offset, cb.float_offset);
        }
    }

    #[test]
    fn test_take_events_drains() {
        let mut state = GameState::new(&LevelDescriptor::builtin(1), 0);
        state.sound(SoundCue::Jump);
        state.emit(GameEvent::Loss { score: 5 });
        assert_eq!(state.take_events().len(), 2);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_shake_respects_settings_and_decays() {
        let level = LevelDescriptor::builtin(1);
        let calm = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let mut state = GameState::with_config(&level, 0, Tuning::default(), calm);
        state.kick_shake(15.0);
        assert_eq!(state.screen_shake, 0.0);

        let mut state = GameState::new(&level, 0);
        state.kick_shake(10.0);
        state.decay_shake();
        assert!((state.screen_shake - 9.0).abs() < 1e-5);
        for _ in 0..200 {
            state.decay_shake();
        }
        assert_eq!(state.screen_shake, 0.0);
    }
}
