//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically, one logical
//! frame per call.

use serde::{Deserialize, Serialize};

use super::collision;
use super::physics;
use super::progression;
use super::state::{GameState, RunStatus};

/// Input intents for a single tick (sampled once, before any mutation)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub dash: bool,
}

/// Advance the game state by one logical frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.status {
        RunStatus::GameOver => return,
        RunStatus::RespawnFreeze => {
            // Physics and collision are suspended; only the freeze clock and
            // cosmetic decay run
            progression::step_respawn(state);
            state.decay_shake();
            state.effects.update();
            return;
        }
        RunStatus::Running | RunStatus::Finished => {}
    }

    state.frame += 1;
    state.decay_shake();

    if state.status == RunStatus::Finished {
        progression::drift_after_finish(state);
        state.effects.update();
        follow_camera(state);
        return;
    }

    progression::update_visual_phase(state);
    physics::step_player(state, input);

    let flow = collision::resolve_collisions(state);

    state.effects.update();

    if flow.is_continue() {
        progression::check_fall(state);
        progression::check_finish(state);
    }

    follow_camera(state);
}

fn follow_camera(state: &mut GameState) {
    state.camera.follow(
        state.player.pos.x,
        state.level_length,
        state.tuning.camera_lerp,
        state.tuning.camera_lead,
    );
}
