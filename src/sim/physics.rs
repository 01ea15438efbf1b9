//! Player physics: input, dash, jumps, gravity and integration
//!
//! Fixed per-frame step with no delta-time scaling. Hosts must call the
//! driver exactly once per logical frame.

use glam::Vec2;

use super::effects::Tint;
use super::state::{GameState, SoundCue};
use super::tick::TickInput;
use crate::approach;

/// Squash/stretch relax toward 1.0 by this fraction per frame
const DEFORM_RELAX: f32 = 0.2;

/// Remembers which buttons were held when last sampled to detect rising edges
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlLatch {
    jump_held: bool,
    dash_held: bool,
}

impl ControlLatch {
    /// Dash went down since the previous frame. Sampled every frame.
    pub fn dash_pressed(&mut self, input: &TickInput) -> bool {
        let pressed = input.dash && !self.dash_held;
        self.dash_held = input.dash;
        pressed
    }

    /// Jump went down since it was last sampled. Only sampled while the
    /// player has control, so a jump held through a dash fires once the
    /// dash ends.
    pub fn jump_pressed(&mut self, input: &TickInput) -> bool {
        let pressed = input.jump && !self.jump_held;
        self.jump_held = input.jump;
        pressed
    }
}

/// Advance the player one frame: controls, forces, then position
pub fn step_player(state: &mut GameState, input: &TickInput) {
    let dash_pressed = state.controls.dash_pressed(input);

    if dash_pressed && !state.player.dashing && state.player.dash_cooldown == 0 {
        start_dash(state);
    }

    if state.player.dashing {
        let dir = if state.player.facing_right { 1.0 } else { -1.0 };
        state.player.vel = Vec2::new(dir * state.tuning.dash_speed, 0.0);
        state.player.dash_timer = state.player.dash_timer.saturating_sub(1);
        if state.player.dash_timer == 0 {
            state.player.dashing = false;
        }
    } else {
        steer(state, input);
        if state.controls.jump_pressed(input) {
            try_jump(state);
        }
        state.player.vel.y += state.tuning.gravity;
    }

    let player = &mut state.player;
    player.dash_cooldown = player.dash_cooldown.saturating_sub(1);

    player.pos += player.vel;

    player.squash = approach(player.squash, 1.0, DEFORM_RELAX);
    player.stretch = approach(player.stretch, 1.0, DEFORM_RELAX);
}

fn start_dash(state: &mut GameState) {
    let player = &mut state.player;
    player.dashing = true;
    player.dash_timer = state.tuning.dash_duration;
    player.dash_cooldown = state.tuning.dash_cooldown;
    player.stretch = 1.5;
    player.squash = 0.6;
    let origin = Vec2::new(player.pos.x, player.pos.y + player.size.y / 2.0);

    state.sound(SoundCue::Dash);
    state.kick_shake(5.0);
    state.effects.burst(origin, Tint::Accent, 15);
    log::debug!("Dash at x={:.1}", origin.x);
}

/// Left/right set velocity outright; no intent lets it decay
fn steer(state: &mut GameState, input: &TickInput) {
    let speed = state.tuning.move_speed;
    let player = &mut state.player;
    if input.left {
        player.vel.x = -speed;
        player.facing_right = false;
    } else if input.right {
        player.vel.x = speed;
        player.facing_right = true;
    } else {
        player.vel.x *= state.tuning.move_damping;
    }
}

/// Ground jump, or the single weaker air jump
fn try_jump(state: &mut GameState) {
    let feet = state.player.feet();
    if state.player.grounded {
        let player = &mut state.player;
        player.vel.y = state.tuning.jump_force;
        player.grounded = false;
        player.jump_count = 1;
        player.stretch = 1.3;
        player.squash = 0.7;

        state.sound(SoundCue::Jump);
        state.effects.burst(feet, Tint::Dust, 5);
    } else if state.player.jump_count < 2 {
        let player = &mut state.player;
        player.vel.y = state.tuning.double_jump_force();
        player.jump_count = 2;
        player.stretch = 1.4;
        player.squash = 0.6;

        state.sound(SoundCue::Jump);
        state.kick_shake(3.0);
        state.effects.burst(feet, Tint::Phase(state.visual_phase), 12);
    }
}
