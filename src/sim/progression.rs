//! Level progression: checkpoints, death and respawn, finish line, score
//!
//! This is the only writer of `respawn_anchor`, `status` and `respawn_ticks`.

use glam::Vec2;

use super::effects::Tint;
use super::state::{GameEvent, GameState, RunStatus, SoundCue};

/// Confetti cadence after the finish line (every Nth frame)
const FINISH_CONFETTI_INTERVAL: u64 = 5;

/// Recompute the cosmetic biome index from horizontal progress
pub fn update_visual_phase(state: &mut GameState) {
    let progress = (state.player.pos.x / state.level_length).max(0.0);
    state.visual_phase = state.level_index.saturating_sub(1) + (progress * 2.0).floor() as u32;
}

/// Save the checkpoint at `index` as the respawn anchor. No-op if already active.
pub fn activate_checkpoint(state: &mut GameState, index: usize) {
    let Some(checkpoint) = state.checkpoints.get_mut(index) else {
        return;
    };
    if checkpoint.active {
        return;
    }
    checkpoint.active = true;
    let rect = checkpoint.rect;

    // Feet at the checkpoint's base
    let anchor = Vec2::new(rect.left(), rect.bottom() - state.player.size.y);
    state.respawn_anchor = Some(anchor);

    let tint = Tint::Phase(state.visual_phase);
    state.sound(SoundCue::Checkpoint);
    state.effects.text(rect.pos, "SAVED", tint);
    state.effects.burst(rect.center(), tint, 15);
    log::info!("Checkpoint {} saved at ({:.0}, {:.0})", index, anchor.x, anchor.y);
}

/// Add to the score and pop a `+N` label at `at`
pub fn award(state: &mut GameState, amount: u64, at: Vec2, tint: Tint) {
    state.player.score += amount;
    state.effects.text(at, format!("+{amount}"), tint);
}

/// Kill the player. Freezes for a respawn when a checkpoint is saved,
/// otherwise ends the run and reports the score once.
///
/// Ignored once the run is over or finished, and while already frozen, so
/// overlapping hazards in one frame resolve to a single death.
pub fn handle_death(state: &mut GameState) {
    if state.status != RunStatus::Running {
        return;
    }

    state.sound(SoundCue::Hit);

    if state.respawn_anchor.is_some() {
        state.status = RunStatus::RespawnFreeze;
        state.respawn_ticks = state.tuning.respawn_frames;
        state.projectiles.clear();
        state.kick_shake(15.0);
        let center = state.player.pos + state.player.size / 2.0;
        state.effects.burst(center, Tint::Enemy, 30);
        log::info!("Player died at x={:.0}, respawning", state.player.pos.x);
    } else {
        state.status = RunStatus::GameOver;
        let score = state.player.score;
        state.emit(GameEvent::Loss { score });
        log::info!("Game over on level {} with score {}", state.level_index, score);
    }
}

/// Death by falling below the level
pub fn check_fall(state: &mut GameState) {
    if state.player.pos.y > state.tuning.fall_limit {
        handle_death(state);
    }
}

/// Count down the death freeze; on expiry put the player back at the anchor
pub fn step_respawn(state: &mut GameState) {
    state.respawn_ticks = state.respawn_ticks.saturating_sub(1);
    if state.respawn_ticks > 0 {
        return;
    }

    state.status = RunStatus::Running;
    let Some(anchor) = state.respawn_anchor else {
        return;
    };

    let player = &mut state.player;
    player.pos = anchor;
    player.vel = Vec2::ZERO;
    player.dashing = false;
    player.dash_timer = 0;
    player.jump_count = 0;

    state
        .camera
        .snap(anchor.x, state.level_length, state.tuning.camera_lead);
    log::info!("Respawned at ({:.0}, {:.0})", anchor.x, anchor.y);
}

/// Finish once the player passes the finish line. Fires at most once.
pub fn check_finish(state: &mut GameState) {
    if state.status != RunStatus::Running || state.player.pos.x <= state.finish_line() {
        return;
    }

    state.status = RunStatus::Finished;
    let score = state.player.score;
    state.sound(SoundCue::Win);
    state.emit(GameEvent::LevelComplete { score });
    log::info!("Level {} complete with score {}", state.level_index, score);
}

/// After the finish: coast to rest with confetti, no further gameplay
pub fn drift_after_finish(state: &mut GameState) {
    let player = &mut state.player;
    player.vel.x *= state.tuning.finish_damping;
    player.vel.y = 0.0;
    player.pos.x += player.vel.x;

    if state.frame % FINISH_CONFETTI_INTERVAL == 0 {
        let origin = state.player.pos;
        state.effects.scatter(origin, 40.0, Tint::Accent, 2);
    }
}
