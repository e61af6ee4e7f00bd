// Simple particle struct to keep track of individual position, velocity, speed and size.
// Particles are plain values; the field stores them in a flat Vec and replaces
// each one with the result of `advance` every frame.

use crate::config::AnimatorConfig;
use crate::field::Bounds;
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub speed: f64,
    pub size: f64,
}

impl Particle {
    pub fn new(pos: Vector2<f64>, vel: Vector2<f64>, speed: f64, size: f64) -> Particle {
        Particle {
            pos,
            vel,
            speed,
            size,
        }
    }

    // Position over [0, w) x [0, h), everything else from the config ranges
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bounds: Bounds, config: &AnimatorConfig) -> Particle {
        let spread = config.velocity_spread;
        let pos_x = rng.gen::<f64>() * bounds.width;
        let pos_y = rng.gen::<f64>() * bounds.height;
        let vel_x = rng.gen::<f64>() * 2.0 * spread - spread;
        let vel_y = rng.gen::<f64>() * 2.0 * spread - spread;
        let speed = sample(rng, config.base_speed_range);
        let size = sample(rng, config.size_range);
        Particle::new([pos_x, pos_y], [vel_x, vel_y], speed, size)
    }

    // One step of motion. Crossing an edge flips that velocity component
    // before moving; the position itself is never clamped.
    pub fn advance(self, bounds: Bounds, dt: f64) -> Particle {
        let mut vel = self.vel;
        if self.pos[0] > bounds.width || self.pos[0] < 0.0 {
            vel[0] = -vel[0];
        }
        if self.pos[1] > bounds.height || self.pos[1] < 0.0 {
            vel[1] = -vel[1];
        }
        let pos = vecmath::vec2_add(self.pos, vecmath::vec2_scale(vel, self.speed * dt));
        Particle { pos, vel, ..self }
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        vecmath::vec2_len(vecmath::vec2_sub(self.pos, other.pos))
    }

    pub fn clamp_to(self, bounds: Bounds) -> Particle {
        let pos = [
            self.pos[0].max(0.0).min(bounds.width),
            self.pos[1].max(0.0).min(bounds.height),
        ];
        Particle { pos, ..self }
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, [min, max]: [f64; 2]) -> f64 {
    rng.gen::<f64>() * (max - min) + min
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const BOUNDS: Bounds = Bounds {
        width: 100.0,
        height: 50.0,
    };

    #[test]
    fn moves_by_velocity_times_speed() {
        let p = Particle::new([10.0, 10.0], [0.25, -0.1], 2.0, 1.0).advance(BOUNDS, 1.0);
        assert_eq!(p.pos, [10.5, 9.8]);
        assert_eq!(p.vel, [0.25, -0.1]);
    }

    #[test]
    fn dt_scales_the_step() {
        let p = Particle::new([10.0, 10.0], [0.25, 0.0], 2.0, 1.0).advance(BOUNDS, 0.5);
        assert_eq!(p.pos, [10.25, 10.0]);
    }

    #[test]
    fn bounces_off_right_and_bottom_edges() {
        let p = Particle::new([100.5, 50.2], [0.2, 0.1], 1.0, 1.0).advance(BOUNDS, 1.0);
        assert_eq!(p.vel, [-0.2, -0.1]);
        assert!(p.pos[0] < 100.5 && p.pos[1] < 50.2);
    }

    #[test]
    fn bounces_off_left_and_top_edges() {
        let p = Particle::new([-0.1, -0.3], [-0.2, -0.1], 1.0, 1.0).advance(BOUNDS, 1.0);
        assert_eq!(p.vel, [0.2, 0.1]);
    }

    #[test]
    fn exactly_on_the_edge_is_inside() {
        let p = Particle::new([100.0, 0.0], [0.2, -0.1], 1.0, 1.0).advance(BOUNDS, 1.0);
        assert_eq!(p.vel, [0.2, -0.1]);
    }

    #[test]
    fn advance_returns_a_new_value() {
        let before = Particle::new([1.0, 1.0], [0.1, 0.1], 1.0, 1.0);
        let _ = before.advance(BOUNDS, 1.0);
        assert_eq!(before.pos, [1.0, 1.0]);
    }

    #[test]
    fn random_particles_respect_config_ranges() {
        let config = AnimatorConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::random(&mut rng, BOUNDS, &config);
            assert!(p.pos[0] >= 0.0 && p.pos[0] < BOUNDS.width);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < BOUNDS.height);
            assert!(p.vel[0].abs() <= 0.25 && p.vel[1].abs() <= 0.25);
            assert!(p.speed >= 3.0 && p.speed <= 3.2);
            assert!(p.size >= 0.5 && p.size <= 2.5);
        }
    }

    #[test]
    fn clamp_pulls_positions_onto_the_edge() {
        let p = Particle::new([140.0, -3.0], [0.1, 0.1], 1.0, 1.0).clamp_to(BOUNDS);
        assert_eq!(p.pos, [100.0, 0.0]);
    }
}
