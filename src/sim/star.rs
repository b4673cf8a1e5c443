//! Background starfield

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::entity::{Drawable, Sprite, WorldBounds};

const STAR_COLOR: u32 = 0xFFFFFF;

/// A twinkling background star. Never moves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    /// Peak opacity (0.5 - 1.0)
    pub brightness: f32,
    /// Blink phase speed (radians per ms)
    pub blink_speed: f32,
}

impl Star {
    pub fn random(bounds: WorldBounds, rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * bounds.width,
                rng.random::<f32>() * bounds.height,
            ),
            size: rng.random::<f32>() * 1.5,
            brightness: 0.5 + rng.random::<f32>() * 0.5,
            blink_speed: 0.005 + rng.random::<f32>() * 0.01,
        }
    }

    /// Current opacity, oscillating 0..=brightness
    pub fn alpha(&self, now_ms: f64) -> f32 {
        let phase = (now_ms * self.blink_speed as f64).sin() as f32;
        (phase * 0.5 + 0.5) * self.brightness
    }
}

impl Drawable for Star {
    fn sprite(&self, now_ms: f64) -> Sprite {
        Sprite::Star {
            pos: self.pos,
            size: self.size,
            color: STAR_COLOR,
            alpha: self.alpha(now_ms),
        }
    }
}

/// Populate a starfield once at startup
pub fn starfield(count: usize, bounds: WorldBounds, rng: &mut impl Rng) -> Vec<Star> {
    (0..count).map(|_| Star::random(bounds, rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_starfield_in_bounds() {
        let bounds = WorldBounds::new(300.0, 200.0);
        let mut rng = Pcg32::seed_from_u64(1);
        let stars = starfield(100, bounds, &mut rng);
        assert_eq!(stars.len(), 100);
        for s in &stars {
            assert!((0.0..=300.0).contains(&s.pos.x));
            assert!((0.0..=200.0).contains(&s.pos.y));
            assert!(s.size < 1.5);
            assert!((0.005..=0.015).contains(&s.blink_speed));
        }
    }

    #[test]
    fn test_alpha_range() {
        let star = Star {
            pos: Vec2::ZERO,
            size: 1.0,
            brightness: 0.8,
            blink_speed: 0.01,
        };
        for t in 0..500 {
            let a = star.alpha(t as f64 * 7.0);
            assert!((0.0..=0.8 + 1e-6).contains(&a));
        }
    }
}
