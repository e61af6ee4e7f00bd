// The particle population and its connectivity graph.

use crate::config::{AnimatorConfig, ResizePolicy};
use crate::error::AnimatorError;
use crate::particle::Particle;
use rand::Rng;

// Size of the drawing surface in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    // Rejects zero, negative, infinite and NaN dimensions
    pub fn new(width: f64, height: f64) -> Result<Bounds, AnimatorError> {
        if width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0 {
            Ok(Bounds { width, height })
        } else {
            Err(AnimatorError::InvalidSurface { width, height })
        }
    }

    pub fn contains(&self, pos: [f64; 2]) -> bool {
        pos[0] >= 0.0 && pos[0] <= self.width && pos[1] >= 0.0 && pos[1] <= self.height
    }
}

// A line to draw between two particles.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
    pub distance: f64,
    pub opacity: f64,
}

// Opacity of a connection, or `None` when the pair is too far apart.
// Falls off linearly from `scale` at distance 0 to nothing at `max_distance`.
pub fn connection_opacity(distance: f64, max_distance: f64, scale: f64) -> Option<f64> {
    if distance < max_distance {
        Some((1.0 - distance / max_distance) * scale)
    } else {
        None
    }
}

pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Bounds,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(
        bounds: Bounds,
        config: &AnimatorConfig,
        rng: &mut R,
    ) -> Result<ParticleField, AnimatorError> {
        // Re-check in case the bounds were built by hand
        let bounds = Bounds::new(bounds.width, bounds.height)?;
        let count = config.particle_count(bounds.width);
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(Particle::random(rng, bounds, config));
        }
        Ok(ParticleField { particles, bounds })
    }

    pub fn from_particles(bounds: Bounds, particles: Vec<Particle>) -> ParticleField {
        ParticleField { particles, bounds }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn step(&mut self, dt: f64) {
        let bounds = self.bounds;
        for particle in &mut self.particles {
            *particle = particle.advance(bounds, dt);
        }
    }

    // New bounds for edge checks. The particle count never changes.
    pub fn resize(&mut self, bounds: Bounds, policy: ResizePolicy) {
        self.bounds = bounds;
        if policy == ResizePolicy::Reclamp {
            for particle in &mut self.particles {
                *particle = particle.clamp_to(bounds);
            }
        }
    }

    // Every pair `(i, j)` with `i <= j` closer than `max_distance`.
    // Self-pairs are included and come out at full `scale` opacity.
    pub fn connections(&self, max_distance: f64, scale: f64) -> Vec<Connection> {
        let mut connections = Vec::new();
        for i in 0..self.particles.len() {
            for j in i..self.particles.len() {
                let distance = self.particles[i].distance_to(&self.particles[j]);
                if let Some(opacity) = connection_opacity(distance, max_distance, scale) {
                    connections.push(Connection {
                        from: i,
                        to: j,
                        distance,
                        opacity,
                    });
                }
            }
        }
        connections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still(x: f64, y: f64) -> Particle {
        Particle::new([x, y], [0.0, 0.0], 1.0, 1.0)
    }

    #[test]
    fn zero_width_is_an_invalid_surface() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = ParticleField::new(
            Bounds {
                width: 0.0,
                height: 600.0,
            },
            &AnimatorConfig::default(),
            &mut rng,
        );
        assert!(matches!(
            result,
            Err(AnimatorError::InvalidSurface { .. })
        ));
        assert!(Bounds::new(800.0, -1.0).is_err());
        assert!(Bounds::new(f64::NAN, 10.0).is_err());
    }

    #[test]
    fn infinite_surface_is_invalid() {
        assert!(matches!(
            Bounds::new(f64::INFINITY, 600.0),
            Err(AnimatorError::InvalidSurface { .. })
        ));
        assert!(Bounds::new(800.0, f64::INFINITY).is_err());
        let mut rng = StdRng::seed_from_u64(4);
        let result = ParticleField::new(
            Bounds {
                width: f64::INFINITY,
                height: 600.0,
            },
            &AnimatorConfig::default(),
            &mut rng,
        );
        assert!(result.is_err());
    }

    #[test]
    fn field_size_follows_width() {
        let mut rng = StdRng::seed_from_u64(2);
        let config = AnimatorConfig::default();
        let wide = ParticleField::new(Bounds::new(1000.0, 800.0).unwrap(), &config, &mut rng).unwrap();
        assert_eq!(wide.len(), 50);
        let narrow = ParticleField::new(Bounds::new(100.0, 800.0).unwrap(), &config, &mut rng).unwrap();
        assert_eq!(narrow.len(), 5);
    }

    #[test]
    fn particles_stay_within_one_step_of_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = AnimatorConfig::default();
        for &(w, h) in &[(10.0, 10.0), (37.0, 12.0), (1280.0, 720.0)] {
            let bounds = Bounds::new(w, h).unwrap();
            let mut field = ParticleField::new(bounds, &config, &mut rng).unwrap();
            let slack = field
                .particles()
                .iter()
                .map(|p| p.vel[0].abs().max(p.vel[1].abs()) * p.speed)
                .fold(0.0, f64::max);
            assert!(slack <= 1.0);
            for _ in 0..5_000 {
                field.step(1.0);
                for p in field.particles() {
                    assert!(p.pos[0] >= -slack && p.pos[0] <= w + slack, "x = {}", p.pos[0]);
                    assert!(p.pos[1] >= -slack && p.pos[1] <= h + slack, "y = {}", p.pos[1]);
                }
            }
        }
    }

    #[test]
    fn connection_threshold_is_strict() {
        assert_eq!(connection_opacity(150.0, 150.0, 0.2), None);
        let opacity = connection_opacity(149.0, 150.0, 0.2).unwrap();
        assert!((opacity - (1.0 / 150.0) * 0.2).abs() < 1e-12);
        assert_eq!(connection_opacity(0.0, 150.0, 0.2), Some(0.2));
    }

    #[test]
    fn connections_include_self_pairs_and_skip_far_pairs() {
        let field = ParticleField::from_particles(
            Bounds::new(500.0, 500.0).unwrap(),
            vec![still(0.0, 0.0), still(149.0, 0.0), still(0.0, 150.0)],
        );
        let connections = field.connections(150.0, 0.2);
        let pairs: Vec<(usize, usize)> = connections.iter().map(|c| (c.from, c.to)).collect();
        assert_eq!(pairs, vec![(0, 0), (0, 1), (1, 1), (2, 2)]);
        assert_eq!(connections[0].opacity, 0.2);
        assert_eq!(connections[1].distance, 149.0);
    }

    #[test]
    fn preserve_leaves_stragglers_outside() {
        let mut field = ParticleField::from_particles(
            Bounds::new(800.0, 600.0).unwrap(),
            vec![still(700.0, 500.0)],
        );
        field.resize(Bounds::new(400.0, 300.0).unwrap(), ResizePolicy::Preserve);
        assert_eq!(field.len(), 1);
        assert_eq!(field.particles()[0].pos, [700.0, 500.0]);
        assert!(!field.bounds().contains(field.particles()[0].pos));
    }

    #[test]
    fn reclamp_pulls_stragglers_back_and_they_stay() {
        let mut field = ParticleField::from_particles(
            Bounds::new(800.0, 600.0).unwrap(),
            vec![Particle::new([700.0, 500.0], [0.25, 0.25], 3.0, 1.0)],
        );
        let small = Bounds::new(400.0, 300.0).unwrap();
        field.resize(small, ResizePolicy::Reclamp);
        assert_eq!(field.particles()[0].pos, [400.0, 300.0]);
        for _ in 0..1_000 {
            field.step(1.0);
            let p = field.particles()[0];
            assert!(p.pos[0] <= 400.0 + 0.75 && p.pos[1] <= 300.0 + 0.75);
        }
    }
}
