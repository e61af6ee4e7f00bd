// Draws one frame of the particle field onto a DrawingSurface:
// clear, particles, then the connection lines on top.

use crate::config::AnimatorConfig;
use crate::console::Timer;
use crate::field::ParticleField;
use crate::surface::DrawingSurface;

pub struct Renderer {
    pub config: AnimatorConfig,
}

impl Renderer {
    pub fn new(config: AnimatorConfig) -> Self {
        Renderer { config }
    }

    pub fn render<S: DrawingSurface + ?Sized>(&self, field: &ParticleField, surface: &mut S) {
        let _timer = Timer::new("Renderer::render");
        let bounds = field.bounds();
        surface.clear(bounds.width, bounds.height);
        self.render_particles(field, surface);
        self.render_connections(field, surface);
    }

    pub fn render_particles<S: DrawingSurface + ?Sized>(&self, field: &ParticleField, surface: &mut S) {
        for p in field.particles() {
            surface.fill_circle(p.pos, p.size, self.config.particle_color);
        }
    }

    pub fn render_connections<S: DrawingSurface + ?Sized>(&self, field: &ParticleField, surface: &mut S) {
        let _timer = Timer::new("Renderer::render_connections");
        let particles = field.particles();
        let connections = field.connections(
            self.config.max_connect_distance,
            self.config.line_opacity_scale,
        );
        for c in connections {
            surface.stroke_line(
                particles[c.from].pos,
                particles[c.to].pos,
                self.config.line_color.with_alpha(c.opacity),
                self.config.line_width,
            );
        }
    }
}
