// Browser glue: a 2d canvas surface, a requestAnimationFrame ticker, the
// window resize listener and an IntersectionObserver for scroll reveals.
// Everything exported to JS lives here.

use crate::animator::Animator;
use crate::color::Color;
use crate::config::AnimatorConfig;
use crate::console;
use crate::contact::{ContactField, ContactForm, ContactPhase};
use crate::error::AnimatorError;
use crate::reveal::{RevealTrigger, VisibilityEntry, DEFAULT_THRESHOLD};
use crate::surface::DrawingSurface;
use crate::ticker::Ticker;
use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;
use vecmath::Vector2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Element, HtmlCanvasElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Window,
};

pub const REVEAL_CLASS: &str = "animate-fade-in";

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, AnimatorError> {
        let context = canvas
            .get_context("2d")
            .map_err(|_| AnimatorError::SurfaceUnavailable("getContext(\"2d\") threw".to_owned()))?
            .ok_or_else(|| AnimatorError::SurfaceUnavailable("canvas has no 2d context".to_owned()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| {
                AnimatorError::SurfaceUnavailable("context is not a CanvasRenderingContext2d".to_owned())
            })?;
        Ok(CanvasSurface { canvas, context })
    }
}

impl DrawingSurface for CanvasSurface {
    fn set_size(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    #[allow(deprecated)]
    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color) {
        self.context.begin_path();
        let _ = self.context.arc(center[0], center[1], radius, 0.0, PI * 2.0);
        self.context.set_fill_style(&JsValue::from_str(&color.to_css()));
        self.context.fill();
    }

    #[allow(deprecated)]
    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, color: Color, width: f64) {
        self.context.begin_path();
        self.context.set_stroke_style(&JsValue::from_str(&color.to_css()));
        self.context.set_line_width(width);
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

// Requests frames from the window. The callback itself is installed by
// ParticleBackground once the animator it drives exists.
pub struct AnimationFrameTicker {
    window: Window,
    callback: FrameCallback,
    handle: Option<i32>,
}

impl Ticker for AnimationFrameTicker {
    fn schedule(&mut self) {
        if let Some(callback) = self.callback.borrow().as_ref() {
            match self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())
            {
                Ok(handle) => self.handle = Some(handle),
                Err(_) => console::warn("requestAnimationFrame failed, animation halted"),
            }
        }
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.window.cancel_animation_frame(handle);
        }
    }
}

fn viewport_size(window: &Window) -> (f64, f64) {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

type CanvasAnimator = Animator<CanvasSurface, AnimationFrameTicker>;

/// Animated particle background filling the viewport.
#[wasm_bindgen]
pub struct ParticleBackground {
    animator: Option<Rc<RefCell<CanvasAnimator>>>,
    frame_callback: FrameCallback,
    resize_listener: Option<Closure<dyn FnMut()>>,
    window: Option<Window>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Sizes `canvas` to the viewport and starts animating. `config` is an
    /// optional JSON object of `AnimatorConfig` keys.
    ///
    /// Throws on a bad config or a zero-sized viewport. A missing canvas or
    /// 2d context only logs a warning and yields a stopped background.
    pub fn start(
        canvas: Option<HtmlCanvasElement>,
        config: Option<String>,
    ) -> Result<ParticleBackground, JsValue> {
        let config = match config {
            Some(json) => AnimatorConfig::from_json(&json)?,
            None => AnimatorConfig::default(),
        };
        match ParticleBackground::try_start(canvas, config) {
            Ok(background) => Ok(background),
            Err(AnimatorError::SurfaceUnavailable(reason)) => {
                console::warn(&format!("particle background disabled: {}", reason));
                Ok(ParticleBackground::disabled())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Cancels the pending frame and removes the resize listener.
    /// Calling it again does nothing.
    pub fn stop(&mut self) {
        if let Some(animator) = self.animator.take() {
            animator.borrow_mut().teardown();
        }
        if let (Some(window), Some(listener)) = (self.window.as_ref(), self.resize_listener.take()) {
            let _ = window
                .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
        }
        self.frame_callback.borrow_mut().take();
    }

    pub fn is_running(&self) -> bool {
        self.animator
            .as_ref()
            .map_or(false, |animator| animator.borrow().is_running())
    }

    pub fn particle_count(&self) -> usize {
        self.animator
            .as_ref()
            .map_or(0, |animator| animator.borrow().particle_count())
    }
}

impl ParticleBackground {
    fn disabled() -> Self {
        ParticleBackground {
            animator: None,
            frame_callback: Rc::new(RefCell::new(None)),
            resize_listener: None,
            window: None,
        }
    }

    fn try_start(
        canvas: Option<HtmlCanvasElement>,
        config: AnimatorConfig,
    ) -> Result<Self, AnimatorError> {
        let window = web_sys::window()
            .ok_or_else(|| AnimatorError::SurfaceUnavailable("no global window".to_owned()))?;
        let canvas = canvas
            .ok_or_else(|| AnimatorError::SurfaceUnavailable("no canvas element".to_owned()))?;
        let surface = CanvasSurface::new(canvas)?;

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let ticker = AnimationFrameTicker {
            window: window.clone(),
            callback: frame_callback.clone(),
            handle: None,
        };
        let animator = Rc::new(RefCell::new(Animator::new(config, surface, ticker)?));

        // The closures only hold weak references so dropping the background
        // frees the animator even if a frame is still queued.
        let frame_animator = Rc::downgrade(&animator);
        *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(animator) = frame_animator.upgrade() {
                animator.borrow_mut().tick(1.0);
            }
        }) as Box<dyn FnMut()>));

        let (width, height) = viewport_size(&window);
        animator
            .borrow_mut()
            .start(width, height, &mut rand::thread_rng())?;

        let resize_animator = Rc::downgrade(&animator);
        let resize_window = window.clone();
        let resize_listener = Closure::wrap(Box::new(move || {
            if let Some(animator) = resize_animator.upgrade() {
                let (width, height) = viewport_size(&resize_window);
                animator.borrow_mut().resize(width, height);
            }
        }) as Box<dyn FnMut()>);
        if window
            .add_event_listener_with_callback("resize", resize_listener.as_ref().unchecked_ref())
            .is_err()
        {
            animator.borrow_mut().teardown();
            return Err(AnimatorError::SurfaceUnavailable(
                "could not listen for window resize".to_owned(),
            ));
        }

        Ok(ParticleBackground {
            animator: Some(animator),
            frame_callback,
            resize_listener: Some(resize_listener),
            window: Some(window),
        })
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Adds a CSS class to an element the first time it scrolls into view.
#[wasm_bindgen]
pub struct ScrollReveal {
    trigger: Rc<RefCell<RevealTrigger>>,
    observer: Option<IntersectionObserver>,
    target: Option<Element>,
    callback: Option<Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>>,
}

#[wasm_bindgen]
impl ScrollReveal {
    /// A missing `target` gives an inert reveal that never fires.
    #[wasm_bindgen(constructor)]
    pub fn new(
        target: Option<Element>,
        threshold: Option<f64>,
        class_name: Option<String>,
    ) -> Result<ScrollReveal, JsValue> {
        let trigger = Rc::new(RefCell::new(RevealTrigger::new(
            threshold.unwrap_or(DEFAULT_THRESHOLD),
        )));
        let target = match target {
            Some(target) => target,
            None => {
                return Ok(ScrollReveal {
                    trigger,
                    observer: None,
                    target: None,
                    callback: None,
                })
            }
        };

        let class_name = class_name.unwrap_or_else(|| REVEAL_CLASS.to_owned());
        let callback_trigger = trigger.clone();
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for i in 0..entries.length() {
                    let entry: IntersectionObserverEntry = entries.get(i).unchecked_into();
                    let visibility = VisibilityEntry {
                        is_intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    };
                    if callback_trigger.borrow_mut().on_visibility(visibility) {
                        let element = entry.target();
                        if element.class_list().add_1(&class_name).is_err() {
                            console::warn(&format!("could not add class {}", class_name));
                        }
                        observer.unobserve(&element);
                    }
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let mut options = IntersectionObserverInit::new();
        #[allow(deprecated)]
        options.threshold(&JsValue::from_f64(trigger.borrow().threshold()));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        observer.observe(&target);
        trigger.borrow_mut().arm(true);

        Ok(ScrollReveal {
            trigger,
            observer: Some(observer),
            target: Some(target),
            callback: Some(callback),
        })
    }

    pub fn is_revealed(&self) -> bool {
        self.trigger.borrow().is_revealed()
    }

    pub fn is_armed(&self) -> bool {
        self.observer.is_some() && !self.is_revealed()
    }

    /// Stops observing. The revealed class, if added, stays.
    pub fn teardown(&mut self) {
        if let Some(observer) = self.observer.take() {
            if let Some(target) = self.target.take() {
                observer.unobserve(&target);
            }
            observer.disconnect();
        }
        self.trigger.borrow_mut().detach();
        self.callback.take();
    }
}

impl Drop for ScrollReveal {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Contact form with simulated submission; time is `performance.now()` or
/// any other millisecond clock the caller likes.
#[wasm_bindgen(js_name = ContactForm)]
pub struct ContactFormHandle {
    form: ContactForm,
}

#[wasm_bindgen(js_class = ContactForm)]
impl ContactFormHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ContactFormHandle {
        ContactFormHandle {
            form: ContactForm::default(),
        }
    }

    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), JsValue> {
        let field = ContactField::parse(name)
            .ok_or_else(|| JsValue::from_str(&format!("unknown contact field {}", name)))?;
        self.form.set(field, value);
        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<String> {
        let fields = self.form.fields();
        match ContactField::parse(name)? {
            ContactField::Name => Some(fields.name.clone()),
            ContactField::Email => Some(fields.email.clone()),
            ContactField::Subject => Some(fields.subject.clone()),
            ContactField::Message => Some(fields.message.clone()),
        }
    }

    pub fn submit(&mut self, now_ms: f64) -> bool {
        self.form.submit(now_ms)
    }

    pub fn poll(&mut self, now_ms: f64) -> String {
        self.form.poll(now_ms);
        self.status()
    }

    pub fn status(&self) -> String {
        match self.form.phase() {
            ContactPhase::Idle => "idle",
            ContactPhase::Submitting { .. } => "submitting",
            ContactPhase::Succeeded { .. } => "success",
        }
        .to_owned()
    }
}

impl Default for ContactFormHandle {
    fn default() -> Self {
        ContactFormHandle::new()
    }
}
