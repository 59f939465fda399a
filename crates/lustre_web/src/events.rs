//! DOM event wiring.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, MouseEvent};

/// Attaches `handler` to `target` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        tracing::warn!("Could not listen for `{}`: {:?}", event, err);
        return;
    }
    // Listeners are never removed
    closure.forget();
}

/// Like [`listen`], but runs `handler` on the first event only.
pub fn listen_once<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnOnce() + 'static,
{
    let mut pending = Some(handler);
    listen(target, event, move |_| {
        if let Some(handler) = pending.take() {
            handler();
        }
    });
}

/// Viewport coordinates of a mouse event.
#[must_use]
pub fn client_position(event: &Event) -> Option<(f64, f64)> {
    event
        .dyn_ref::<MouseEvent>()
        .map(|mouse| (f64::from(mouse.client_x()), f64::from(mouse.client_y())))
}
