// Particle field background for the browser: a fixed population of drifting
// particles bouncing inside the canvas, linked by faint lines when close.
// The simulation and rendering are plain Rust behind the DrawingSurface and
// Ticker traits; `web` binds them to a 2d canvas and requestAnimationFrame.

pub mod animator;
pub mod color;
pub mod config;
pub mod console;
pub mod contact;
pub mod error;
pub mod field;
pub mod particle;
pub mod renderer;
pub mod reveal;
pub mod surface;
pub mod ticker;
#[cfg(target_arch = "wasm32")]
pub mod web;

use wasm_bindgen::prelude::*;

pub use animator::{Animator, AnimatorState};
pub use color::Color;
pub use config::{AnimatorConfig, ResizePolicy};
pub use error::AnimatorError;
pub use field::{Bounds, ParticleField};
pub use particle::Particle;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    set_panic_hook();
}

// Panics show up in the browser console instead of "unreachable executed"
fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
