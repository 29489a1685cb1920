//! The falling word under guess

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::matcher::normalize;
use super::particle::{Particle, advance_all};
use super::source::ImageRef;

/// A word entity falling from the top of the surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingWord {
    pub id: u32,
    /// Normalized target text
    pub text: String,
    /// Center of the word's image; `y` grows downward
    pub pos: Vec2,
    /// Pixels per tick while falling
    pub fall_speed: f32,
    pub image: ImageRef,
    pub exploding: bool,
    /// The word's own explosion particles
    pub particles: Vec<Particle>,
}

impl FallingWord {
    pub fn new(id: u32, text: &str, start_x: f32, image: ImageRef, fall_speed: f32) -> Self {
        Self {
            id,
            text: normalize(text),
            pos: Vec2::new(start_x, 0.0),
            fall_speed,
            image,
            exploding: false,
            particles: Vec::new(),
        }
    }

    /// Fall, or age the explosion once exploding
    pub fn advance(&mut self) {
        if self.exploding {
            advance_all(&mut self.particles);
        } else {
            self.pos.y += self.fall_speed;
        }
    }

    /// True once the word has fully left the bottom of the surface
    pub fn is_off_screen(&self, boundary_y: f32, margin: f32) -> bool {
        self.pos.y > boundary_y + margin
    }

    /// Switch to exploding and spawn a burst at the current position.
    /// Calling it again does nothing.
    pub fn explode<R: Rng>(&mut self, burst: usize, life: u32, rng: &mut R) {
        if self.exploding {
            return;
        }
        self.exploding = true;
        self.particles = Particle::burst(self.pos, burst, life, rng);
    }

    /// Exploded and every particle has expired
    pub fn is_drained(&self) -> bool {
        self.exploding && self.particles.is_empty()
    }

    /// Still guessable
    pub fn is_falling(&self) -> bool {
        !self.exploding
    }

    /// Scale position after a surface resize
    pub fn rescale(&mut self, sx: f32, sy: f32) {
        self.pos *= Vec2::new(sx, sy);
        for p in &mut self.particles {
            p.pos *= Vec2::new(sx, sy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn word() -> FallingWord {
        FallingWord::new(1, "Moscow", 400.0, ImageRef::from("moscow.png"), 2.0)
    }

    #[test]
    fn test_new_normalizes_and_starts_at_top() {
        let w = word();
        assert_eq!(w.text, "MOSCOW");
        assert_eq!(w.pos, Vec2::new(400.0, 0.0));
        assert!(w.is_falling());
    }

    #[test]
    fn test_advance_falls() {
        let mut w = word();
        w.advance();
        w.advance();
        assert_eq!(w.pos.y, 4.0);
    }

    #[test]
    fn test_off_screen_uses_margin() {
        let mut w = word();
        w.pos.y = 700.0;
        assert!(!w.is_off_screen(600.0, 100.0));
        w.pos.y = 700.5;
        assert!(w.is_off_screen(600.0, 100.0));
    }

    #[test]
    fn test_explode_is_idempotent_and_stops_falling() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut w = word();
        w.pos.y = 120.0;
        w.explode(20, 30, &mut rng);
        assert!(w.exploding);
        assert_eq!(w.particles.len(), 20);

        w.particles[0].remaining_life = 5;
        w.explode(20, 30, &mut rng);
        assert_eq!(w.particles.len(), 20);
        assert_eq!(w.particles[0].remaining_life, 5);

        w.advance();
        assert_eq!(w.pos.y, 120.0);
    }

    #[test]
    fn test_drains_after_particle_life() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut w = word();
        w.explode(10, 4, &mut rng);
        for _ in 0..3 {
            w.advance();
            assert!(!w.is_drained());
        }
        w.advance();
        assert!(w.is_drained());
    }
}
