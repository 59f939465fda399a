//! Custom cursor: a dot that tracks the pointer closely and a ring that lags.
//!
//! Both markers ease toward the last pointer position every frame, whether or
//! not the pointer moved, so they settle on their own.

use crate::animation::Follower;
use crate::config::CursorConfig;
use crate::error::FxResult;
use crate::frame::{FrameControl, FrameEffect};
use crate::host::{DocumentHost, ElementHandle};
use crate::layout::px;

/// Class of the inner marker.
pub const DOT_CLASS: &str = "custom-cursor";
/// Class of the outer marker.
pub const RING_CLASS: &str = "custom-cursor-follower";
/// Class toggled on the dot over interactive elements.
pub const HOVER_CLASS: &str = "hover";

/// The two cursor markers and the raw pointer they chase.
pub struct CustomCursor<E: ElementHandle> {
    dot: E,
    ring: E,
    pointer: (f64, f64),
    dot_pos: Follower,
    ring_pos: Follower,
}

impl<E: ElementHandle> CustomCursor<E> {
    /// Creates both markers and appends them to the body.
    ///
    /// Returns `Ok(None)` on viewports narrower than the configured minimum.
    ///
    /// # Errors
    ///
    /// Fails if the host cannot create the marker elements.
    pub fn mount<D>(doc: &D, config: &CursorConfig) -> FxResult<Option<Self>>
    where
        D: DocumentHost<Element = E>,
    {
        let viewport = doc.viewport();
        if viewport.is_narrow(config.min_viewport_width) {
            tracing::debug!("Custom cursor skipped: viewport {} wide", viewport.width);
            return Ok(None);
        }

        let dot = doc.create_element("div")?;
        dot.add_class(DOT_CLASS);
        let ring = doc.create_element("div")?;
        ring.add_class(RING_CLASS);

        let body = doc.body();
        body.append_child(&dot);
        body.append_child(&ring);

        Ok(Some(Self::new(dot, ring, config)))
    }

    /// Wraps existing marker elements.
    pub fn new(dot: E, ring: E, config: &CursorConfig) -> Self {
        Self {
            dot,
            ring,
            pointer: (0.0, 0.0),
            dot_pos: Follower::new(config.dot_rate),
            ring_pos: Follower::new(config.ring_rate),
        }
    }

    /// Records the raw pointer position.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = (x, y);
    }

    /// Pointer entered an interactive element.
    pub fn on_hover_enter(&self) {
        self.dot.add_class(HOVER_CLASS);
    }

    /// Pointer left an interactive element.
    pub fn on_hover_leave(&self) {
        self.dot.remove_class(HOVER_CLASS);
    }

    /// Current dot position.
    #[must_use]
    pub fn dot_position(&self) -> (f64, f64) {
        self.dot_pos.position()
    }

    /// Current ring position.
    #[must_use]
    pub fn ring_position(&self) -> (f64, f64) {
        self.ring_pos.position()
    }

    /// Eases both markers one step and writes their positions.
    pub fn step(&mut self) {
        let (x, y) = self.pointer;
        self.dot_pos.step(x, y);
        self.ring_pos.step(x, y);

        place(&self.dot, self.dot_pos);
        place(&self.ring, self.ring_pos);
    }
}

fn place<E: ElementHandle>(element: &E, at: Follower) {
    element.set_style("left", &px(at.x));
    element.set_style("top", &px(at.y));
}

impl<E: ElementHandle> FrameEffect for CustomCursor<E> {
    fn frame(&mut self, _now_ms: f64) -> FrameControl {
        self.step();
        FrameControl::Continue
    }
}
