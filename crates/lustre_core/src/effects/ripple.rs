//! Click ripple: an expanding, fading circle centred on the click point.

use crate::config::RippleConfig;
use crate::error::FxResult;
use crate::host::{DocumentHost, ElementHandle, Scheduler};
use crate::layout::{px, Rect};

/// Class of the ripple element.
pub const RIPPLE_CLASS: &str = "ripple";

/// Marker attribute on the injected style block.
pub const STYLE_MARKER: &str = "data-ripple";

/// Keyframes and base style for `.ripple`.
pub const RIPPLE_CSS: &str = r"
    .ripple {
        position: absolute;
        border-radius: 50%;
        background: rgba(255, 255, 255, 0.3);
        transform: scale(0);
        animation: ripple-animation 0.6s ease-out;
        pointer-events: none;
    }

    @keyframes ripple-animation {
        to {
            transform: scale(4);
            opacity: 0;
        }
    }
";

/// Size and placement of a ripple inside its container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleGeometry {
    /// Diameter: the container's larger dimension.
    pub size: f64,
    /// Left offset relative to the container.
    pub left: f64,
    /// Top offset relative to the container.
    pub top: f64,
}

impl RippleGeometry {
    /// Computes the ripple for a click at client coordinates.
    #[must_use]
    pub fn compute(container: Rect, client_x: f64, client_y: f64) -> Self {
        let size = container.width.max(container.height);
        Self {
            size,
            left: client_x - container.x - size / 2.0,
            top: client_y - container.y - size / 2.0,
        }
    }
}

/// Appends a ripple to `container` and removes it when the animation ends.
///
/// # Errors
///
/// Fails if the host cannot create the ripple element.
pub fn create_ripple<D, S>(
    doc: &D,
    scheduler: &S,
    container: &D::Element,
    client_x: f64,
    client_y: f64,
    config: &RippleConfig,
) -> FxResult<D::Element>
where
    D: DocumentHost,
    S: Scheduler,
{
    let geometry = RippleGeometry::compute(container.bounds(), client_x, client_y);
    let ripple = doc.create_element("span")?;

    let size = px(geometry.size);
    ripple.set_style("width", &size);
    ripple.set_style("height", &size);
    ripple.set_style("left", &px(geometry.left));
    ripple.set_style("top", &px(geometry.top));
    ripple.add_class(RIPPLE_CLASS);
    container.append_child(&ripple);
    tracing::trace!("Ripple {}px at ({}, {})", geometry.size, geometry.left, geometry.top);

    let expired = ripple.clone();
    scheduler.schedule(config.lifetime_ms, Box::new(move || expired.remove()));

    Ok(ripple)
}

/// Injects the ripple style block once per document.
///
/// Returns true if a block was added.
///
/// # Errors
///
/// Fails if the host cannot create the style element.
pub fn ensure_ripple_style<D: DocumentHost>(doc: &D) -> FxResult<bool> {
    if doc.query_selector(&format!("style[{STYLE_MARKER}]")).is_some() {
        return Ok(false);
    }

    let style = doc.create_element("style")?;
    style.set_text(RIPPLE_CSS);
    style.set_attribute(STYLE_MARKER, "true");
    doc.head().append_child(&style);
    tracing::debug!("Ripple style injected");
    Ok(true)
}
