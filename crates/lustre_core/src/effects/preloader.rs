//! Preloader dismissal: fade the loading overlay out after `load`, then drop it.

use crate::config::PreloaderConfig;
use crate::host::{ElementHandle, Scheduler};

/// Class that triggers the overlay's CSS fade.
pub const HIDDEN_CLASS: &str = "hidden";

/// The loading overlay.
pub struct Preloader<E: ElementHandle> {
    element: E,
    hide_delay_ms: u32,
    remove_delay_ms: u32,
}

impl<E: ElementHandle> Preloader<E> {
    /// Returns `None` when the page has no overlay.
    pub fn new(element: Option<E>, config: &PreloaderConfig) -> Option<Self> {
        element.map(|element| Self {
            element,
            hide_delay_ms: config.hide_delay_ms,
            remove_delay_ms: config.remove_delay_ms,
        })
    }

    /// Schedules the fade and removal. Call from the page `load` event.
    pub fn on_page_load<S: Scheduler>(self, scheduler: &S) {
        let Self {
            element,
            hide_delay_ms,
            remove_delay_ms,
        } = self;
        let inner = scheduler.clone();

        scheduler.schedule(
            hide_delay_ms,
            Box::new(move || {
                element.add_class(HIDDEN_CLASS);
                inner.schedule(
                    remove_delay_ms,
                    Box::new(move || {
                        element.remove();
                        tracing::debug!("Preloader removed");
                    }),
                );
            }),
        );
    }
}
