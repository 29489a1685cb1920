//! Explosion particles
//!
//! Purely decorative: particles never affect score or spawning.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Ticks left; the particle is removed the tick this reaches 0
    pub remaining_life: u32,
    pub max_life: u32,
}

impl Particle {
    /// Spawn at `pos` with a random radius and velocity
    pub fn spawn<R: Rng>(pos: Vec2, life: u32, rng: &mut R) -> Self {
        let vel = Vec2::new(
            rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
            rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
        );
        Self {
            pos,
            vel,
            radius: rng.random_range(PARTICLE_MIN_RADIUS..PARTICLE_MAX_RADIUS),
            remaining_life: life,
            max_life: life,
        }
    }

    /// Spawn `count` particles at `pos`
    pub fn burst<R: Rng>(pos: Vec2, count: usize, life: u32, rng: &mut R) -> Vec<Self> {
        (0..count).map(|_| Self::spawn(pos, life, rng)).collect()
    }

    /// Move one tick and age. Returns false once expired.
    pub fn advance(&mut self) -> bool {
        self.pos += self.vel;
        self.remaining_life = self.remaining_life.saturating_sub(1);
        self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.remaining_life > 0
    }

    /// Remaining life in `[0, 1]`, used as fade alpha
    pub fn life_fraction(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.remaining_life as f32 / self.max_life as f32
    }
}

/// Advance every particle and drop the expired ones
pub fn advance_all(particles: &mut Vec<Particle>) {
    particles.retain_mut(|p| p.advance());
}
