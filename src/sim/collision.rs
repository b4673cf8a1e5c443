//! Collision detection
//!
//! Hits are binary: no normals, no response. Any overlap between the ship
//! and an asteroid ends the run. Distances are plain Euclidean; hit circles
//! do not wrap across world edges.

use glam::Vec2;

use super::asteroid::Asteroid;
use super::ship::Ship;

/// Two circles overlap when their centers are strictly closer than the sum of radii
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Ship hit circle against the asteroid's shrunken hit circle
#[inline]
pub fn ship_hits_asteroid(ship: &Ship, asteroid: &Asteroid) -> bool {
    circles_overlap(ship.pos, ship.hit_radius, asteroid.pos, asteroid.hit_radius())
}

/// Index of the first asteroid (in spawn order) touching the ship
pub fn first_hit(ship: &Ship, asteroids: &[Asteroid]) -> Option<usize> {
    asteroids.iter().position(|a| ship_hits_asteroid(ship, a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::WorldBounds;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: WorldBounds = WorldBounds {
        width: 800.0,
        height: 600.0,
    };

    fn rock_at(pos: Vec2, size: f32) -> Asteroid {
        let mut rng = Pcg32::seed_from_u64(1);
        Asteroid::new(size, Some(pos), Some(Vec2::ZERO), None, BOUNDS, &mut rng)
    }

    fn ship_at(pos: Vec2) -> Ship {
        let mut ship = Ship::new(BOUNDS);
        ship.pos = pos;
        ship
    }

    #[test]
    fn test_overlap_boundary() {
        // Exactly touching is not a hit
        assert!(!circles_overlap(Vec2::ZERO, 10.0, Vec2::new(30.0, 0.0), 20.0));
        assert!(circles_overlap(Vec2::ZERO, 10.0, Vec2::new(29.0, 0.0), 20.0));
    }

    #[test]
    fn test_overlap_symmetric() {
        let a = Vec2::new(3.0, 7.0);
        let b = Vec2::new(-4.0, 12.0);
        assert_eq!(
            circles_overlap(a, 5.0, b, 4.0),
            circles_overlap(b, 4.0, a, 5.0)
        );
    }

    #[test]
    fn test_ship_asteroid_boundary() {
        // Ship at the origin so the distance is exactly the rock's x coordinate
        let ship = ship_at(Vec2::ZERO);
        let reach = ship.hit_radius + rock_at(Vec2::ZERO, 20.0).hit_radius();

        let at_reach = rock_at(Vec2::new(reach, 0.0), 20.0);
        assert!(!ship_hits_asteroid(&ship, &at_reach));

        let inside = rock_at(Vec2::new(reach - 1.0, 0.0), 20.0);
        assert!(ship_hits_asteroid(&ship, &inside));
    }

    #[test]
    fn test_first_hit_in_spawn_order() {
        let ship = ship_at(Vec2::new(400.0, 300.0));
        let rocks = vec![
            rock_at(Vec2::new(100.0, 100.0), 30.0),
            rock_at(Vec2::new(410.0, 300.0), 30.0),
            rock_at(Vec2::new(400.0, 310.0), 30.0),
        ];
        assert_eq!(first_hit(&ship, &rocks), Some(1));
        assert_eq!(first_hit(&ship, &rocks[..1]), None);
    }
}
