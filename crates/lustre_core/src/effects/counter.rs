//! Counter animator: eases a number in an element's text from start to end.

use crate::animation::Easing;
use crate::frame::{FrameControl, FrameEffect};
use crate::host::ElementHandle;

/// What to count and how long to take.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterSpec {
    /// First displayed value.
    pub start: f64,
    /// Final displayed value, shown exactly.
    pub end: f64,
    /// Animation length in milliseconds.
    pub duration_ms: f64,
    /// Appended to every value (`"+"`, `"%"`, ...).
    pub suffix: String,
    /// Curve applied to elapsed time.
    pub easing: Easing,
}

impl CounterSpec {
    /// Creates a spec with no suffix and quartic ease-out.
    #[must_use]
    pub fn new(start: f64, end: f64, duration_ms: f64) -> Self {
        Self {
            start,
            end,
            duration_ms,
            suffix: String::new(),
            easing: Easing::QuarticOut,
        }
    }

    /// Sets the suffix.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Sets the easing curve.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Elapsed fraction at `elapsed_ms`, clamped to 1.
    #[must_use]
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms).min(1.0)
    }

    /// Text shown at `progress`. At 1 this is exactly `end` plus the suffix.
    #[must_use]
    pub fn text_at(&self, progress: f64) -> String {
        if progress >= 1.0 {
            return format!("{}{}", self.end, self.suffix);
        }
        let eased = self.easing.apply(progress);
        let current = (self.start + (self.end - self.start) * eased).floor();
        format!("{}{}", current, self.suffix)
    }
}

/// A running counter.
pub struct CounterAnimation<E: ElementHandle> {
    element: E,
    spec: CounterSpec,
    started_at: Option<f64>,
}

impl<E: ElementHandle> CounterAnimation<E> {
    /// Prepares a counter; nothing is written until the first frame.
    pub fn new(element: E, spec: CounterSpec) -> Self {
        Self {
            element,
            spec,
            started_at: None,
        }
    }
}

impl<E: ElementHandle> FrameEffect for CounterAnimation<E> {
    fn frame(&mut self, now_ms: f64) -> FrameControl {
        let started_at = *self.started_at.get_or_insert(now_ms);
        let progress = self.spec.progress(now_ms - started_at);
        self.element.set_text(&self.spec.text_at(progress));

        if progress < 1.0 {
            FrameControl::Continue
        } else {
            FrameControl::Finish
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockElement;

    #[test]
    fn test_first_frame_shows_start() {
        let element = MockElement::new("span");
        let mut counter = CounterAnimation::new(element.clone(), CounterSpec::new(10.0, 20.0, 500.0));
        assert_eq!(counter.frame(1234.0), FrameControl::Continue);
        assert_eq!(element.text(), "10");
    }

    #[test]
    fn test_ends_exactly() {
        let spec = CounterSpec::new(0.0, 99.5, 1000.0).with_suffix("%");
        assert_eq!(spec.text_at(1.0), "99.5%");
        assert_eq!(spec.text_at(0.999), "99%");
    }

    #[test]
    fn test_zero_duration_completes_at_once() {
        let element = MockElement::new("span");
        let mut counter = CounterAnimation::new(element.clone(), CounterSpec::new(0.0, 5.0, 0.0));
        assert_eq!(counter.frame(0.0), FrameControl::Finish);
        assert_eq!(element.text(), "5");
    }

    #[test]
    fn test_quartic_midpoint() {
        let spec = CounterSpec::new(0.0, 1000.0, 1000.0);
        // 1 - 0.5^4 = 0.9375
        assert_eq!(spec.text_at(spec.progress(500.0)), "937");
    }

    #[test]
    fn test_counting_down() {
        let spec = CounterSpec::new(100.0, 0.0, 1000.0);
        assert_eq!(spec.text_at(0.0), "100");
        assert_eq!(spec.text_at(1.0), "0");
    }
}
