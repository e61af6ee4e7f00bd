// The particle field animator: owns the field, steps and renders it once per
// tick and asks its `Ticker` for the next frame.
//
// Lifecycle is `Uninitialized -> Running -> Stopped`. `Stopped` is terminal
// and only reached through `Animator::teardown`.

use crate::config::AnimatorConfig;
use crate::console::{self, Timer};
use crate::error::AnimatorError;
use crate::field::{Bounds, ParticleField};
use crate::renderer::Renderer;
use crate::surface::DrawingSurface;
use crate::ticker::Ticker;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnimatorState {
    Uninitialized,
    Running,
    Stopped,
}

pub struct Animator<S: DrawingSurface, T: Ticker> {
    renderer: Renderer,
    surface: S,
    ticker: T,
    field: Option<ParticleField>,
    state: AnimatorState,
}

impl<S: DrawingSurface, T: Ticker> Animator<S, T> {
    pub fn new(config: AnimatorConfig, surface: S, ticker: T) -> Result<Self, AnimatorError> {
        config.validate()?;
        Ok(Animator {
            renderer: Renderer::new(config),
            surface,
            ticker,
            field: None,
            state: AnimatorState::Uninitialized,
        })
    }

    // Seeds the field for a `width` x `height` surface and draws the first
    // frame. A failed start leaves the animator uninitialized with no
    // particles. Starting twice, or after teardown, does nothing.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        width: f64,
        height: f64,
        rng: &mut R,
    ) -> Result<(), AnimatorError> {
        if self.state != AnimatorState::Uninitialized {
            return Ok(());
        }
        let bounds = Bounds::new(width, height)?;
        let field = ParticleField::new(bounds, &self.renderer.config, rng)?;
        self.surface.set_size(width, height);
        console::log(&format!(
            "particle field started: {} particles on {}x{}",
            field.len(),
            width,
            height
        ));
        self.field = Some(field);
        self.state = AnimatorState::Running;
        self.tick(1.0);
        Ok(())
    }

    // Advances every particle by `dt` frames, redraws and schedules the next
    // tick. Returns false (and schedules nothing) unless running.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.state != AnimatorState::Running {
            return false;
        }
        let field = match self.field.as_mut() {
            Some(field) => field,
            None => return false,
        };
        {
            let _timer = Timer::new("Animator::tick update");
            field.step(dt);
        }
        self.renderer.render(field, &mut self.surface);
        self.ticker.schedule();
        true
    }

    // Resizes the surface. Particle count is kept; positions follow the
    // configured resize policy. Non-positive sizes are ignored.
    pub fn resize(&mut self, width: f64, height: f64) {
        let bounds = match Bounds::new(width, height) {
            Ok(bounds) => bounds,
            Err(err) => {
                console::warn(&format!("ignoring resize: {}", err));
                return;
            }
        };
        if let Some(field) = self.field.as_mut() {
            self.surface.set_size(width, height);
            field.resize(bounds, self.renderer.config.resize_policy);
        }
    }

    // Stops the loop and drops the field. Safe to call any number of times.
    pub fn teardown(&mut self) {
        if self.state == AnimatorState::Stopped {
            return;
        }
        if self.state == AnimatorState::Running {
            self.ticker.cancel();
        }
        self.field = None;
        self.state = AnimatorState::Stopped;
        console::log("particle field stopped");
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimatorState::Running
    }

    pub fn particle_count(&self) -> usize {
        self.field.as_ref().map_or(0, ParticleField::len)
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.renderer.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }
}
