//! Composition root.
//!
//! Builds the browser hosts once, mounts the self-initialising effects when
//! the document is parsed, and exports the on-demand utilities. Every mount is
//! independent: a failure is logged and the rest of the page carries on.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Math;
use lustre_core::config::{CursorConfig, ParticleConfig, PreloaderConfig, RevealConfig};
use lustre_core::effects::scroll_progress::BAR_CLASS;
use lustre_core::effects::smooth_scroll::ANCHOR_SELECTOR;
use lustre_core::effects::{
    create_ripple, ensure_ripple_style, show_notification, AnchorNavigator, CounterAnimation, CounterSpec,
    CustomCursor, MagneticTilt, NotificationKind, ParticleField, ParticleLayer, Preloader, RevealFallback,
    RevealObserver, ScrollProgress, ToastOptions,
};
use lustre_core::{DocumentHost, EffectsConfig, FxResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    MouseEvent,
};

use crate::dom::{host_error, CanvasSurface, DomDocument, DomElement, WindowScheduler};
use crate::driver::RafDriver;
use crate::events::{client_position, listen, listen_once};
use crate::logging;
use crate::slot::Slot;

/// Id of the particle canvas appended to the body.
pub const PARTICLE_CANVAS_ID: &str = "particle-canvas";

/// Everything the effects share for the page lifetime.
struct Runtime {
    doc: DomDocument,
    scheduler: WindowScheduler,
    driver: RafDriver,
    config: EffectsConfig,
}

impl Runtime {
    fn new(config: EffectsConfig) -> FxResult<Self> {
        let doc = DomDocument::from_window()?;
        let scheduler = WindowScheduler::new(doc.window().clone());
        let driver = RafDriver::new(doc.window().clone());
        Ok(Self {
            doc,
            scheduler,
            driver,
            config,
        })
    }

    /// Same hosts and driver, new configuration. Effects already running on
    /// the driver keep their frames.
    fn reconfigured(&self, config: EffectsConfig) -> Self {
        Self {
            doc: self.doc.clone(),
            scheduler: self.scheduler.clone(),
            driver: self.driver.clone(),
            config,
        }
    }
}

thread_local! {
    static RUNTIME: Slot<Runtime> = const { Slot::new() };
}

/// Returns the page runtime, creating a default one for utilities called
/// before [`start`].
fn runtime() -> FxResult<Rc<Runtime>> {
    RUNTIME.with(|slot| slot.get_or_try_init(|| Runtime::new(EffectsConfig::default())))
}

fn with_runtime<T>(operation: &str, f: impl FnOnce(&Runtime) -> FxResult<T>) -> Option<T> {
    match runtime().and_then(|runtime| f(&runtime)) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("{} failed: {}", operation, err);
            None
        }
    }
}

fn report(component: &str, result: FxResult<()>) {
    match result {
        Ok(()) => tracing::debug!("{} mounted", component),
        Err(err) => tracing::warn!("{} unavailable: {}", component, err),
    }
}

/// Starts the page effects with the default configuration.
#[wasm_bindgen]
pub fn start() {
    boot(EffectsConfig::default(), None);
}

/// Starts the page effects with a TOML configuration.
///
/// A configuration that fails to parse is reported and the defaults are used.
#[wasm_bindgen(js_name = startWithConfig)]
pub fn start_with_config(toml: &str) {
    match EffectsConfig::from_toml_str(toml) {
        Ok(config) => boot(config, None),
        Err(err) => boot(EffectsConfig::default(), Some(err.to_string())),
    }
}

fn boot(config: EffectsConfig, config_error: Option<String>) {
    logging::init(&config.log_level);
    if let Some(err) = config_error {
        tracing::warn!("Configuration rejected, using defaults: {}", err);
    }

    let started = RUNTIME.with(|slot| {
        slot.start(|previous| match previous {
            Some(previous) => Ok(previous.reconfigured(config)),
            None => Runtime::new(config),
        })
    });
    let runtime = match started {
        Some(Ok(runtime)) => runtime,
        Some(Err(err)) => {
            tracing::warn!("Page effects disabled: {}", err);
            return;
        }
        None => {
            tracing::warn!("Page effects already started");
            return;
        }
    };

    report("Ripple style", ensure_ripple_style(&runtime.doc).map(drop));

    if runtime.doc.document().ready_state() == "loading" {
        let ready = Rc::clone(&runtime);
        listen_once(runtime.doc.document(), "DOMContentLoaded", move || mount_all(&ready));
    } else {
        mount_all(&runtime);
    }
}

fn mount_all(runtime: &Rc<Runtime>) {
    let config = &runtime.config;
    if config.scroll_progress.enabled {
        report("Scroll progress", mount_scroll_progress(runtime));
    }
    if config.cursor.enabled {
        report("Custom cursor", mount_cursor(runtime, &config.cursor));
    }
    if config.particles.enabled {
        report("Particle field", mount_particles(runtime, &config.particles));
    }
    if config.reveal.enabled {
        report("Scroll reveal", mount_reveal(runtime, &config.reveal));
    }
    if config.smooth_scroll.enabled {
        report("Smooth scroll", mount_smooth_scroll(runtime));
    }
    if config.preloader.enabled {
        report("Preloader", mount_preloader(runtime, &config.preloader));
    }
    tracing::info!("Page effects ready");
}

fn mount_scroll_progress(runtime: &Runtime) -> FxResult<()> {
    let doc = runtime.doc.clone();
    let existing = doc.query_selector(&format!(".{BAR_CLASS}"));
    let progress = ScrollProgress::ensure_bar(&doc, existing, &runtime.config.scroll_progress)?;

    let window = doc.window().clone();
    listen(&window, "scroll", move |_| progress.on_scroll(doc.scroll_metrics()));
    Ok(())
}

fn mount_cursor(runtime: &Runtime, config: &CursorConfig) -> FxResult<()> {
    let Some(cursor) = CustomCursor::mount(&runtime.doc, config)? else {
        return Ok(());
    };
    let cursor = Rc::new(RefCell::new(cursor));

    let moved = Rc::clone(&cursor);
    listen(runtime.doc.window(), "mousemove", move |event| {
        if let Some((x, y)) = client_position(&event) {
            moved.borrow_mut().on_pointer_move(x, y);
        }
    });

    for target in runtime.doc.query_all(&config.hover_selectors) {
        let entered = Rc::clone(&cursor);
        listen(target.element(), "mouseenter", move |_| entered.borrow().on_hover_enter());
        let left = Rc::clone(&cursor);
        listen(target.element(), "mouseleave", move |_| left.borrow().on_hover_leave());
    }

    runtime.driver.register(Box::new(cursor));
    Ok(())
}

fn random_seed() -> u64 {
    Math::random().to_bits() ^ Math::random().to_bits().rotate_left(32)
}

fn mount_particles(runtime: &Runtime, config: &ParticleConfig) -> FxResult<()> {
    let canvas = CanvasSurface::mount(&runtime.doc, PARTICLE_CANVAS_ID)?;
    let mut rng = StdRng::seed_from_u64(random_seed());
    let field = ParticleField::new(config.clone(), runtime.doc.viewport(), &mut rng);
    let layer = Rc::new(RefCell::new(ParticleLayer::new(field, canvas)));

    let resized = Rc::clone(&layer);
    let doc = runtime.doc.clone();
    listen(runtime.doc.window(), "resize", move |_| {
        resized.borrow_mut().resize(doc.viewport());
    });

    runtime.driver.register(Box::new(layer));
    Ok(())
}

fn mount_reveal(runtime: &Runtime, config: &RevealConfig) -> FxResult<()> {
    let elements = runtime.doc.query_all(&config.selectors);
    if elements.is_empty() {
        return Ok(());
    }

    match observe_intersections(&elements, config) {
        Ok(()) => Ok(()),
        Err(err) => {
            tracing::debug!("IntersectionObserver unavailable ({}), polling on scroll", err);
            let fallback = RevealFallback::new(elements, config);
            let doc = runtime.doc.clone();
            fallback.on_scroll(doc.viewport());
            let window = doc.window().clone();
            listen(&window, "scroll", move |_| fallback.on_scroll(doc.viewport()));
            Ok(())
        }
    }
}

fn observe_intersections(elements: &[DomElement], config: &RevealConfig) -> FxResult<()> {
    let observer = RevealObserver::new(config);
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _: IntersectionObserver| {
            observer.on_intersection(
                entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| (DomElement::new(entry.target()), entry.is_intersecting())),
            );
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.threshold));
    options.set_root_margin(&config.root_margin());

    let intersections = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
        .map_err(|err| host_error(&err))?;
    for element in elements {
        intersections.observe(element.element());
    }
    // The observer keeps watching for the page lifetime
    callback.forget();
    Ok(())
}

fn mount_smooth_scroll(runtime: &Runtime) -> FxResult<()> {
    let navigator = Rc::new(AnchorNavigator::new(runtime.doc.clone()));

    for anchor in runtime.doc.query_all(ANCHOR_SELECTOR) {
        let navigator = Rc::clone(&navigator);
        let link = anchor.clone();
        listen(anchor.element(), "click", move |event| {
            let href = link.attribute("href").unwrap_or_default();
            if navigator.on_anchor_click(&href).prevents_default() {
                event.prevent_default();
            }
        });
    }
    Ok(())
}

fn mount_preloader(runtime: &Runtime, config: &PreloaderConfig) -> FxResult<()> {
    let Some(preloader) = Preloader::new(runtime.doc.query_selector(&config.selector), config) else {
        return Ok(());
    };

    let scheduler = runtime.scheduler.clone();
    if runtime.doc.document().ready_state() == "complete" {
        preloader.on_page_load(&scheduler);
    } else {
        listen_once(runtime.doc.window(), "load", move || preloader.on_page_load(&scheduler));
    }
    Ok(())
}

/// On-demand utilities for page scripts.
///
/// ```js
/// import init, { start, AnimationEngine } from "./lustre_web.js";
/// await init();
/// start();
/// window.AnimationEngine = AnimationEngine;
/// ```
#[wasm_bindgen]
pub struct AnimationEngine {
    _private: (),
}

#[wasm_bindgen]
impl AnimationEngine {
    /// Counts `element`'s text from `start` to `end` over `duration` ms.
    #[wasm_bindgen(js_name = animateCounter)]
    pub fn animate_counter(element: Element, start: f64, end: f64, duration: f64, suffix: Option<String>) {
        with_runtime("animateCounter", move |runtime| {
            let spec = CounterSpec::new(start, end, duration)
                .with_suffix(suffix.unwrap_or_default())
                .with_easing(runtime.config.counter.easing);
            runtime
                .driver
                .register(Box::new(CounterAnimation::new(DomElement::new(element), spec)));
            Ok(())
        });
    }

    /// Tilts `element` toward the pointer. A missing element is ignored.
    #[wasm_bindgen(js_name = initMagneticCard)]
    pub fn init_magnetic_card(element: Option<Element>) {
        let Some(element) = element else {
            return;
        };
        with_runtime("initMagneticCard", move |runtime| {
            let tilt = Rc::new(RefCell::new(MagneticTilt::new(
                DomElement::new(element.clone()),
                &runtime.config.tilt,
            )));

            // Tracks the pointer anywhere on the page, not just over the card
            let moved = Rc::clone(&tilt);
            listen(runtime.doc.document(), "mousemove", move |event| {
                if let Some((x, y)) = client_position(&event) {
                    moved.borrow().on_pointer_move(x, y);
                }
            });
            let left = Rc::clone(&tilt);
            listen(&element, "mouseleave", move |_| left.borrow().on_pointer_leave());
            listen(runtime.doc.window(), "resize", move |_| tilt.borrow_mut().on_resize());
            Ok(())
        });
    }

    /// Shows a toast. `kind` defaults to `success`, `duration` to the
    /// configured display time.
    #[wasm_bindgen(js_name = showNotification)]
    pub fn show_notification(message: &str, kind: Option<String>, duration: Option<u32>) -> Option<Element> {
        with_runtime("showNotification", |runtime| {
            let kind = kind
                .as_deref()
                .map_or_else(NotificationKind::default, NotificationKind::from);
            let mut options = ToastOptions::new(kind, &runtime.config.toast);
            if let Some(duration) = duration {
                options.duration_ms = duration;
            }
            let toast = show_notification(&runtime.doc, &runtime.scheduler, message, &options, &runtime.config.toast)?;
            Ok(toast.element().clone())
        })
    }

    /// Plays a click ripple inside the event's current target.
    #[wasm_bindgen(js_name = createRipple)]
    pub fn create_ripple(event: &MouseEvent) {
        let Some(container) = event.current_target().and_then(|target| target.dyn_into::<Element>().ok()) else {
            tracing::debug!("Ripple event has no element target");
            return;
        };
        with_runtime("createRipple", |runtime| {
            create_ripple(
                &runtime.doc,
                &runtime.scheduler,
                &DomElement::new(container),
                f64::from(event.client_x()),
                f64::from(event.client_y()),
                &runtime.config.ripple,
            )
            .map(drop)
        });
    }
}
