//! Magnetic card tilt.
//!
//! Rotates an element in 3D proportionally to the pointer's offset from the
//! element's center. Bounds are measured at setup and on resize only, so the
//! center drifts if the page scrolls.

use crate::config::TiltConfig;
use crate::host::ElementHandle;
use crate::layout::{css_number, Rect};

/// Rotation in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tilt {
    /// Rotation about the X axis (pointer below center tilts back).
    pub rotate_x: f64,
    /// Rotation about the Y axis.
    pub rotate_y: f64,
}

impl Tilt {
    /// Tilt for a pointer at `(x, y)` against `bounds`.
    #[must_use]
    pub fn toward(x: f64, y: f64, bounds: Rect, damping: f64) -> Self {
        let (center_x, center_y) = bounds.center();
        Self {
            rotate_x: -(y - center_y) / damping,
            rotate_y: (x - center_x) / damping,
        }
    }

    /// CSS transform for this tilt.
    #[must_use]
    pub fn to_transform(self, perspective: f64, lift: f64) -> String {
        format!(
            "perspective({}px) rotateY({}deg) rotateX({}deg) translateZ({}px)",
            css_number(perspective),
            css_number(self.rotate_y),
            css_number(self.rotate_x),
            css_number(lift),
        )
    }
}

/// A card that leans toward the pointer.
pub struct MagneticTilt<E: ElementHandle> {
    element: E,
    bounds: Rect,
    config: TiltConfig,
}

impl<E: ElementHandle> MagneticTilt<E> {
    /// Captures the element's bounds.
    pub fn new(element: E, config: &TiltConfig) -> Self {
        let bounds = element.bounds();
        Self {
            element,
            bounds,
            config: config.clone(),
        }
    }

    /// Bounds used for the center.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Re-measures the element.
    pub fn on_resize(&mut self) {
        self.bounds = self.element.bounds();
    }

    /// Applies the tilt for a pointer anywhere on the page.
    pub fn on_pointer_move(&self, x: f64, y: f64) {
        let tilt = Tilt::toward(x, y, self.bounds, self.config.damping);
        self.element
            .set_style("transform", &tilt.to_transform(self.config.perspective, self.config.lift));
    }

    /// Returns the card to neutral.
    pub fn on_pointer_leave(&self) {
        let neutral = Tilt::default().to_transform(self.config.perspective, 0.0);
        self.element.set_style("transform", &neutral);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockElement;

    fn card() -> MockElement {
        MockElement::new("div").with_bounds(Rect::new(100.0, 100.0, 200.0, 100.0))
    }

    #[test]
    fn test_pointer_offset_over_damping() {
        let element = card();
        let tilt = MagneticTilt::new(element.clone(), &TiltConfig::default());

        // Center is (200, 150)
        tilt.on_pointer_move(250.0, 100.0);
        assert_eq!(
            element.style("transform").as_deref(),
            Some("perspective(1000px) rotateY(2deg) rotateX(2deg) translateZ(10px)")
        );
    }

    #[test]
    fn test_pointer_outside_card_still_tilts() {
        let element = card();
        let tilt = MagneticTilt::new(element.clone(), &TiltConfig::default());

        // Top-left of the page, well away from the card
        tilt.on_pointer_move(0.0, 0.0);
        assert_eq!(
            element.style("transform").as_deref(),
            Some("perspective(1000px) rotateY(-8deg) rotateX(6deg) translateZ(10px)")
        );
    }

    #[test]
    fn test_centered_pointer_has_no_negative_zero() {
        let element = card();
        let tilt = MagneticTilt::new(element.clone(), &TiltConfig::default());

        tilt.on_pointer_move(200.0, 150.0);
        assert_eq!(
            element.style("transform").as_deref(),
            Some("perspective(1000px) rotateY(0deg) rotateX(0deg) translateZ(10px)")
        );
    }

    #[test]
    fn test_leave_resets() {
        let element = card();
        let tilt = MagneticTilt::new(element.clone(), &TiltConfig::default());
        tilt.on_pointer_move(0.0, 0.0);
        tilt.on_pointer_leave();
        assert_eq!(
            element.style("transform").as_deref(),
            Some("perspective(1000px) rotateY(0deg) rotateX(0deg) translateZ(0px)")
        );
    }

    #[test]
    fn test_bounds_refresh_only_on_resize() {
        let element = card();
        let mut tilt = MagneticTilt::new(element.clone(), &TiltConfig::default());

        element.set_bounds(Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(tilt.bounds(), Rect::new(100.0, 100.0, 200.0, 100.0));

        tilt.on_resize();
        assert_eq!(tilt.bounds(), Rect::new(0.0, 0.0, 50.0, 50.0));
    }
}
