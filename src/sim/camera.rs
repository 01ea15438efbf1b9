//! Horizontal follow camera

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::approach;
use crate::consts::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};

/// Smoothed horizontal camera clamped to the level bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Left edge of the view in level coordinates
    pub x: f32,
    pub viewport: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            viewport: Vec2::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
        }
    }
}

impl Camera {
    /// Where the camera wants to be: the player sits `lead` of the way into the view
    pub fn target(&self, player_x: f32, lead: f32) -> f32 {
        player_x - self.viewport.x * lead
    }

    /// Keep the view inside `[0, level_length - viewport width]`.
    /// Levels narrower than the viewport pin to 0.
    pub fn clamp(&self, x: f32, level_length: f32) -> f32 {
        x.min(level_length - self.viewport.x).max(0.0)
    }

    /// Move a fraction `lerp` of the way toward the target, then clamp
    pub fn follow(&mut self, player_x: f32, level_length: f32, lerp: f32, lead: f32) {
        let target = self.target(player_x, lead);
        self.x = self.clamp(approach(self.x, target, lerp), level_length);
    }

    /// Jump straight to the target (used on respawn)
    pub fn snap(&mut self, player_x: f32, level_length: f32, lead: f32) {
        self.x = self.clamp(self.target(player_x, lead), level_length);
    }

    /// Horizontal window `[left, right]` widened by `margin` on both sides
    pub fn relevant_span(&self, margin: f32) -> (f32, f32) {
        (self.x - margin, self.x + self.viewport.x + margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(width: f32) -> Camera {
        Camera {
            x: 0.0,
            viewport: Vec2::new(width, 600.0),
        }
    }

    #[test]
    fn test_follow_moves_eight_percent() {
        let mut cam = camera(900.0);
        // target = 1300 - 300 = 1000
        cam.follow(1300.0, 5000.0, 0.08, 1.0 / 3.0);
        assert!((cam.x - 80.0).abs() < 1e-3);
        cam.follow(1300.0, 5000.0, 0.08, 1.0 / 3.0);
        assert!((cam.x - (80.0 + 920.0 * 0.08)).abs() < 1e-3);
    }

    #[test]
    fn test_follow_clamps_to_level() {
        let mut cam = camera(900.0);
        cam.follow(50.0, 5000.0, 1.0, 1.0 / 3.0);
        assert_eq!(cam.x, 0.0);

        cam.follow(4990.0, 5000.0, 1.0, 1.0 / 3.0);
        assert_eq!(cam.x, 4100.0);
    }

    #[test]
    fn test_narrow_level_pins_to_zero() {
        let mut cam = camera(1280.0);
        cam.follow(900.0, 1000.0, 1.0, 1.0 / 3.0);
        assert_eq!(cam.x, 0.0);
    }

    #[test]
    fn test_snap_skips_smoothing() {
        let mut cam = camera(900.0);
        cam.snap(2500.0, 5000.0, 1.0 / 3.0);
        assert!((cam.x - 2200.0).abs() < 1e-3);
    }

    #[test]
    fn test_relevant_span() {
        let cam = Camera {
            x: 400.0,
            viewport: Vec2::new(800.0, 600.0),
        };
        assert_eq!(cam.relevant_span(100.0), (300.0, 1300.0));
    }
}
