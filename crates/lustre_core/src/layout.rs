//! Geometry shared by the effects.
//!
//! All values are CSS pixels in viewport (client) coordinates.

/// Rectangle bounds, as returned by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left).
    pub x: f64,
    /// Y position (top).
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Returns the area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Returns the overlapping region, if any.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right > x && bottom > y {
            Some(Self::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }
}

/// Size of the browser viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    /// `innerWidth`.
    pub width: f64,
    /// `innerHeight`.
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport of the given size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns true if narrower than `breakpoint`, the touch/mobile heuristic.
    #[must_use]
    pub fn is_narrow(&self, breakpoint: f64) -> bool {
        self.width < breakpoint
    }
}

/// Document scroll state sampled on a scroll event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    /// `window.scrollY`.
    pub scroll_y: f64,
    /// `documentElement.scrollHeight`.
    pub scroll_height: f64,
    /// `documentElement.clientHeight`.
    pub viewport_height: f64,
}

impl ScrollMetrics {
    /// Returns the scrollable distance.
    #[must_use]
    pub fn scrollable_range(&self) -> f64 {
        self.scroll_height - self.viewport_height
    }
}

/// Formats a pixel value for a style property.
#[must_use]
pub fn px(value: f64) -> String {
    format!("{}px", css_number(value))
}

/// Formats a number for CSS, printing negative zero as `0`.
#[must_use]
pub fn css_number(value: f64) -> f64 {
    // -0.0 + 0.0 == +0.0
    value + 0.0
}
