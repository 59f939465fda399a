//! `requestAnimationFrame` driver for the core [`AnimationLoop`].
//!
//! One frame callback serves the whole page. It only re-requests itself while
//! the loop has work, so an idle page costs nothing; registering a new effect
//! kicks it again.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lustre_core::{AnimationLoop, EffectId, FrameEffect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

struct DriverState {
    window: Window,
    frames: RefCell<AnimationLoop>,
    /// Handle of the outstanding frame request.
    pending: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

/// Shared handle to the page's animation loop.
#[derive(Clone)]
pub struct RafDriver(Rc<DriverState>);

impl RafDriver {
    /// Creates an idle driver on `window`.
    #[must_use]
    pub fn new(window: Window) -> Self {
        let state = Rc::new(DriverState {
            window,
            frames: RefCell::new(AnimationLoop::new()),
            pending: Cell::new(None),
            callback: RefCell::new(None),
        });

        // Weak: the closure lives inside the state it drives
        let weak = Rc::downgrade(&state);
        let callback = Closure::<dyn FnMut(f64)>::new(move |now_ms: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.pending.set(None);
            let again = state.frames.borrow_mut().tick(now_ms);
            if again {
                RafDriver(state).ensure_scheduled();
            }
        });
        *state.callback.borrow_mut() = Some(callback);

        Self(state)
    }

    /// Adds an effect and makes sure a frame is coming.
    pub fn register(&self, effect: Box<dyn FrameEffect>) -> EffectId {
        let id = self.0.frames.borrow_mut().register(effect);
        self.ensure_scheduled();
        id
    }

    /// Requests a frame unless one is outstanding or there is nothing to run.
    pub fn ensure_scheduled(&self) {
        if self.0.pending.get().is_some() {
            return;
        }
        {
            let frames = self.0.frames.borrow();
            if !frames.is_running() || frames.is_idle() {
                return;
            }
        }

        let callback = self.0.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match self.0.window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(handle) => self.0.pending.set(Some(handle)),
            Err(err) => tracing::warn!("requestAnimationFrame failed: {:?}", err),
        }
    }
}
