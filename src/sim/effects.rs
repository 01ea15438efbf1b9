//! Transient particles and floating text
//!
//! Produced as side effects of gameplay events and consumed only by the
//! renderer. Nothing in the simulation reads these pools back.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Life lost per frame by particles and floating text
pub const EFFECT_FADE_PER_FRAME: f32 = 0.02;
/// Floating text drifts upward this many pixels per frame
pub const TEXT_RISE_PER_FRAME: f32 = 1.5;
/// Maximum particle speed on either axis at spawn
const PARTICLE_SPREAD: f32 = 4.0;

/// Color role for an effect, resolved to a palette by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Coin,
    Enemy,
    Accent,
    /// Translucent white landing/jump dust
    Dust,
    /// Accent color of the given visual phase
    Phase(u32),
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub tint: Tint,
    pub life: f32, // 0-1, decreases over time
    pub size: f32,
}

/// Score popups and status labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingText {
    pub pos: Vec2,
    pub text: String,
    pub tint: Tint,
    pub life: f32,
}

/// Particle and floating-text pools with independent lifetimes
#[derive(Debug, Clone, Serialize)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub texts: Vec<FloatingText>,
    #[serde(skip)]
    max_particles: usize,
    #[serde(skip)]
    rng: Pcg32,
}

impl Effects {
    pub fn new(seed: u64, max_particles: usize) -> Self {
        Self {
            particles: Vec::new(),
            texts: Vec::new(),
            max_particles,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Spawn `count` particles scattering from `pos` (dropped once the cap is reached)
    pub fn burst(&mut self, pos: Vec2, tint: Tint, count: usize) {
        let room = self.max_particles.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let vel = Vec2::new(
                self.rng.random_range(-PARTICLE_SPREAD..PARTICLE_SPREAD),
                self.rng.random_range(-PARTICLE_SPREAD..PARTICLE_SPREAD),
            );
            let size = self.rng.random_range(2.0..6.0);
            self.particles.push(Particle {
                pos,
                vel,
                tint,
                life: 1.0,
                size,
            });
        }
    }

    /// Burst centered on a random point inside a square of side `jitter` at `origin`
    pub fn scatter(&mut self, origin: Vec2, jitter: f32, tint: Tint, count: usize) {
        let offset = Vec2::new(
            self.rng.random_range(0.0..jitter),
            self.rng.random_range(0.0..jitter),
        );
        self.burst(origin + offset, tint, count);
    }

    pub fn text(&mut self, pos: Vec2, text: impl Into<String>, tint: Tint) {
        self.texts.push(FloatingText {
            pos,
            text: text.into(),
            tint,
            life: 1.0,
        });
    }

    /// Advance and expire effects by one frame
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.life -= EFFECT_FADE_PER_FRAME;
        }
        self.particles.retain(|p| p.life > 0.0);

        for text in &mut self.texts {
            text.pos.y -= TEXT_RISE_PER_FRAME;
            text.life -= EFFECT_FADE_PER_FRAME;
        }
        self.texts.retain(|t| t.life > 0.0);
    }

    /// Uniform sample in [0, 1), used for cosmetic per-entity offsets
    pub fn unit_random(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_respects_cap() {
        let mut effects = Effects::new(1, 12);
        effects.burst(Vec2::ZERO, Tint::Coin, 8);
        effects.burst(Vec2::ZERO, Tint::Coin, 8);
        assert_eq!(effects.particles.len(), 12);

        let mut disabled = Effects::new(1, 0);
        disabled.burst(Vec2::ZERO, Tint::Enemy, 30);
        assert!(disabled.particles.is_empty());
    }

    #[test]
    fn test_particles_expire_after_about_fifty_frames() {
        let mut effects = Effects::new(7, 100);
        effects.burst(Vec2::new(50.0, 50.0), Tint::Accent, 5);
        for _ in 0..48 {
            effects.update();
        }
        assert_eq!(effects.particles.len(), 5);
        for _ in 0..3 {
            effects.update();
        }
        assert!(effects.particles.is_empty());
    }

    #[test]
    fn test_text_rises_and_fades() {
        let mut effects = Effects::new(7, 100);
        effects.text(Vec2::new(10.0, 100.0), "+10", Tint::Coin);
        effects.update();
        let text = &effects.texts[0];
        assert_eq!(text.text, "+10");
        assert!((text.pos.y - 98.5).abs() < 1e-5);
        assert!((text.life - 0.98).abs() < 1e-5);
    }

    #[test]
    fn test_same_seed_same_particles() {
        let mut a = Effects::new(42, 100);
        let mut b = Effects::new(42, 100);
        a.burst(Vec2::ZERO, Tint::Dust, 10);
        b.burst(Vec2::ZERO, Tint::Dust, 10);
        for (pa, pb) in a.particles.iter().zip(&b.particles) {
            assert_eq!(pa.vel, pb.vel);
            assert_eq!(pa.size, pb.size);
        }
    }
}
