//! Host environment traits.
//!
//! Effects receive everything they touch through these traits. The browser
//! implementation lives in `lustre_web`; [`crate::mock`] provides an
//! in-memory one.
//!
//! Element handles behave like DOM references: cloning a handle yields another
//! reference to the same node, never a copy of it.

use crate::error::FxResult;
use crate::layout::{Rect, Viewport};
use crate::style::Color;

/// A shared reference to one page element.
///
/// Mutations are infallible here. A host that can fail logs the failure.
pub trait ElementHandle: Clone + 'static {
    /// Sets an inline style property (`width`, `left`, `transform`, ...).
    fn set_style(&self, property: &str, value: &str);

    /// Adds a class to the element's class list.
    fn add_class(&self, class: &str);

    /// Removes a class from the element's class list.
    fn remove_class(&self, class: &str);

    /// Returns true if the class list contains `class`.
    fn has_class(&self, class: &str) -> bool;

    /// Replaces the element's text content.
    fn set_text(&self, text: &str);

    /// Sets an attribute.
    fn set_attribute(&self, name: &str, value: &str);

    /// Appends `child` as the last child of this element.
    fn append_child(&self, child: &Self);

    /// Detaches the element from the document.
    fn remove(&self);

    /// Returns the element's bounding box in viewport coordinates.
    fn bounds(&self) -> Rect;

    /// Scrolls the element's top edge to the viewport top, smoothly.
    fn scroll_into_view_smooth(&self);
}

/// The document an effect mounts into.
pub trait DocumentHost {
    /// Element handle type produced by this document.
    type Element: ElementHandle;

    /// Creates a detached element.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FxError::Host`] if the host refuses the tag.
    fn create_element(&self, tag: &str) -> FxResult<Self::Element>;

    /// Returns `<body>`.
    fn body(&self) -> Self::Element;

    /// Returns `<head>`.
    fn head(&self) -> Self::Element;

    /// Returns the first element matching a CSS selector.
    fn query_selector(&self, selectors: &str) -> Option<Self::Element>;

    /// Returns the element with the given id.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Returns the current viewport size.
    fn viewport(&self) -> Viewport;
}

impl<D: DocumentHost + ?Sized> DocumentHost for &D {
    type Element = D::Element;

    fn create_element(&self, tag: &str) -> FxResult<Self::Element> {
        (**self).create_element(tag)
    }

    fn body(&self) -> Self::Element {
        (**self).body()
    }

    fn head(&self) -> Self::Element {
        (**self).head()
    }

    fn query_selector(&self, selectors: &str) -> Option<Self::Element> {
        (**self).query_selector(selectors)
    }

    fn element_by_id(&self, id: &str) -> Option<Self::Element> {
        (**self).element_by_id(id)
    }

    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }
}

/// A fixed-delay, fire-and-forget timer source.
pub trait Scheduler: Clone + 'static {
    /// Runs `task` once after `delay_ms`. There is no cancellation.
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// A 2D drawing surface.
pub trait Canvas2d {
    /// Sets the backing size of the surface.
    fn resize(&mut self, width: f64, height: f64);

    /// Clears the rectangle from the origin to `(width, height)`.
    fn clear(&mut self, width: f64, height: f64);

    /// Draws a filled circle.
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);

    /// Strokes a straight line.
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);
}
