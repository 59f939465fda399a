//! Scroll-triggered reveal.
//!
//! Watched elements gain the visible class the first time enough of them is on
//! screen. The class is never removed, and elements stay watched.
//!
//! Browsers deliver intersection entries through `IntersectionObserver`
//! ([`RevealObserver::on_intersection`]). Hosts without one fall back to
//! [`RevealFallback`], which measures bounds on every scroll.

use crate::config::RevealConfig;
use crate::host::ElementHandle;
use crate::layout::{Rect, Viewport};

/// Fraction of `element` inside the viewport after trimming `bottom_margin`
/// pixels off its bottom edge.
///
/// A zero-area element counts as fully visible when its box lies inside the
/// trimmed viewport, matching `IntersectionObserver`.
#[must_use]
pub fn visible_fraction(element: Rect, viewport: Viewport, bottom_margin: f64) -> f64 {
    let root = Rect::new(0.0, 0.0, viewport.width, (viewport.height - bottom_margin).max(0.0));

    if element.area() <= 0.0 {
        let inside = element.x >= root.x
            && element.right() <= root.right()
            && element.y >= root.y
            && element.bottom() <= root.bottom();
        return if inside { 1.0 } else { 0.0 };
    }

    root.intersection(&element)
        .map_or(0.0, |overlap| overlap.area() / element.area())
}

/// Adds the visible class to intersecting entries.
pub struct RevealObserver {
    visible_class: String,
}

impl RevealObserver {
    /// Creates an observer callback for the configured class.
    #[must_use]
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            visible_class: config.visible_class.clone(),
        }
    }

    /// Handles one batch of `(element, is_intersecting)` entries.
    pub fn on_intersection<E, I>(&self, entries: I)
    where
        E: ElementHandle,
        I: IntoIterator<Item = (E, bool)>,
    {
        for (element, intersecting) in entries {
            if intersecting {
                element.add_class(&self.visible_class);
            }
        }
    }
}

/// Bounds-polling reveal for hosts without intersection observation.
pub struct RevealFallback<E: ElementHandle> {
    elements: Vec<E>,
    observer: RevealObserver,
    threshold: f64,
    bottom_margin: f64,
}

impl<E: ElementHandle> RevealFallback<E> {
    /// Watches `elements`.
    #[must_use]
    pub fn new(elements: Vec<E>, config: &RevealConfig) -> Self {
        Self {
            elements,
            observer: RevealObserver::new(config),
            threshold: config.threshold,
            bottom_margin: config.bottom_margin,
        }
    }

    /// Re-measures every element against the viewport.
    pub fn on_scroll(&self, viewport: Viewport) {
        let threshold = self.threshold;
        let margin = self.bottom_margin;
        self.observer.on_intersection(self.elements.iter().map(|element| {
            let fraction = visible_fraction(element.bounds(), viewport, margin);
            let intersecting = fraction > 0.0 && fraction >= threshold;
            (element.clone(), intersecting)
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockElement;

    const VIEWPORT: Viewport = Viewport::new(1000.0, 800.0);

    #[test]
    fn test_visible_fraction_respects_bottom_margin() {
        // 100px tall box straddling y = 700, the trimmed bottom edge
        let element = Rect::new(0.0, 650.0, 200.0, 100.0);
        assert!((visible_fraction(element, VIEWPORT, 100.0) - 0.5).abs() < 1e-12);
        assert!((visible_fraction(element, VIEWPORT, 0.0) - 1.0).abs() < 1e-12);

        let below = Rect::new(0.0, 720.0, 200.0, 100.0);
        assert!(visible_fraction(below, VIEWPORT, 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_observer_only_adds() {
        let observer = RevealObserver::new(&RevealConfig::default());
        let element = MockElement::new("section").with_class("reveal");

        observer.on_intersection([(element.clone(), false)]);
        assert!(!element.has_class("visible"));

        observer.on_intersection([(element.clone(), true)]);
        assert!(element.has_class("visible"));

        observer.on_intersection([(element.clone(), false)]);
        assert!(element.has_class("visible"));
    }

    #[test]
    fn test_fallback_uses_threshold() {
        let config = RevealConfig::default();
        // 5% visible: below the 10% threshold
        let barely = MockElement::new("div").with_bounds(Rect::new(0.0, 690.0, 100.0, 200.0));
        // 20% visible
        let enough = MockElement::new("div").with_bounds(Rect::new(0.0, 660.0, 100.0, 200.0));
        let fallback = RevealFallback::new(vec![barely.clone(), enough.clone()], &config);

        fallback.on_scroll(VIEWPORT);
        assert!(!barely.has_class("visible"));
        assert!(enough.has_class("visible"));

        barely.set_bounds(Rect::new(0.0, 100.0, 100.0, 200.0));
        fallback.on_scroll(VIEWPORT);
        assert!(barely.has_class("visible"));
    }
}
