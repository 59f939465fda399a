//! `web-sys` implementations of the core host traits.
//!
//! DOM mutations that throw are logged at `debug` and otherwise ignored; the
//! effects layer must never break the page it decorates.

use std::f64::consts::TAU;

use lustre_core::{
    Canvas2d, Color, DocumentHost, ElementHandle, FxError, FxResult, Rect, Scheduler, ScrollMetrics, Viewport,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

/// Converts a thrown JS value into an [`FxError::Host`].
pub fn host_error(err: &JsValue) -> FxError {
    FxError::Host(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn ignore(op: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        tracing::debug!("DOM {} failed: {:?}", op, err);
    }
}

/// Shared handle to a DOM element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement(Element);

impl DomElement {
    /// Wraps an element.
    #[must_use]
    pub fn new(element: Element) -> Self {
        Self(element)
    }

    /// Returns the wrapped element.
    #[must_use]
    pub fn element(&self) -> &Element {
        &self.0
    }

    /// Reads an attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }
}

impl ElementHandle for DomElement {
    fn set_style(&self, property: &str, value: &str) {
        // SVG and other non-HTML elements carry no inline style here
        if let Some(html) = self.0.dyn_ref::<HtmlElement>() {
            ignore("set_style", html.style().set_property(property, value));
        }
    }

    fn add_class(&self, class: &str) {
        ignore("add_class", self.0.class_list().add_1(class));
    }

    fn remove_class(&self, class: &str) {
        ignore("remove_class", self.0.class_list().remove_1(class));
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn set_attribute(&self, name: &str, value: &str) {
        ignore("set_attribute", self.0.set_attribute(name, value));
    }

    fn append_child(&self, child: &Self) {
        ignore("append_child", self.0.append_child(&child.0).map(drop));
    }

    fn remove(&self) {
        self.0.remove();
    }

    fn bounds(&self) -> Rect {
        let rect = self.0.get_bounding_client_rect();
        Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
    }

    fn scroll_into_view_smooth(&self) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        self.0.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

/// The page document and its window.
#[derive(Debug, Clone)]
pub struct DomDocument {
    window: Window,
    document: Document,
    root: Element,
}

impl DomDocument {
    /// Binds to the global window.
    ///
    /// # Errors
    ///
    /// Fails outside a browser window context (e.g. in a worker).
    pub fn from_window() -> FxResult<Self> {
        let window = web_sys::window().ok_or(FxError::MissingElement("window"))?;
        let document = window.document().ok_or(FxError::MissingElement("document"))?;
        let root = document
            .document_element()
            .ok_or(FxError::MissingElement("documentElement"))?;
        Ok(Self {
            window,
            document,
            root,
        })
    }

    /// Returns the window.
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Returns the raw document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns every element matching `selectors`, in document order.
    #[must_use]
    pub fn query_all(&self, selectors: &str) -> Vec<DomElement> {
        let Ok(nodes) = self.document.query_selector_all(selectors) else {
            tracing::warn!("Invalid selector list: {}", selectors);
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(DomElement)
            .collect()
    }

    /// Samples the scroll state.
    #[must_use]
    pub fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_y: self.window.scroll_y().unwrap_or(0.0),
            scroll_height: f64::from(self.root.scroll_height()),
            viewport_height: f64::from(self.root.client_height()),
        }
    }
}

fn dimension(value: Result<JsValue, JsValue>) -> f64 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

impl DocumentHost for DomDocument {
    type Element = DomElement;

    fn create_element(&self, tag: &str) -> FxResult<DomElement> {
        self.document
            .create_element(tag)
            .map(DomElement)
            .map_err(|err| host_error(&err))
    }

    fn body(&self) -> DomElement {
        // Frameset documents have no <body>
        self.document
            .body()
            .map_or_else(|| DomElement(self.root.clone()), |body| DomElement(body.into()))
    }

    fn head(&self) -> DomElement {
        match self.document.head() {
            Some(head) => DomElement(head.into()),
            None => self.body(),
        }
    }

    fn query_selector(&self, selectors: &str) -> Option<DomElement> {
        self.document
            .query_selector(selectors)
            .ok()
            .flatten()
            .map(DomElement)
    }

    fn element_by_id(&self, id: &str) -> Option<DomElement> {
        self.document.get_element_by_id(id).map(DomElement)
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(dimension(self.window.inner_width()), dimension(self.window.inner_height()))
    }
}

/// `setTimeout`-backed scheduler.
#[derive(Debug, Clone)]
pub struct WindowScheduler {
    window: Window,
}

impl WindowScheduler {
    /// Schedules on the given window.
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for WindowScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let callback = Closure::once_into_js(move || task());
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        {
            tracing::warn!("setTimeout failed: {:?}", err);
        }
    }
}

/// A `<canvas>` and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Creates the particle canvas and appends it to the body.
    ///
    /// # Errors
    ///
    /// Fails if the element cannot be created or has no 2D context.
    pub fn mount(doc: &DomDocument, id: &str) -> FxResult<Self> {
        let element = doc.create_element("canvas")?;
        let canvas: HtmlCanvasElement = element
            .0
            .clone()
            .dyn_into()
            .map_err(|_| FxError::SurfaceUnavailable("created element is not a canvas".to_owned()))?;
        canvas.set_id(id);

        let ctx = canvas
            .get_context("2d")
            .map_err(|err| host_error(&err))?
            .ok_or_else(|| FxError::SurfaceUnavailable("2d context unsupported".to_owned()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FxError::SurfaceUnavailable("unexpected context type".to_owned()))?;

        doc.body().append_child(&element);
        Ok(Self { canvas, ctx })
    }
}

impl Canvas2d for CanvasSurface {
    fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        ignore("arc", self.ctx.arc(x, y, radius, 0.0, TAU));
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.stroke();
    }
}
