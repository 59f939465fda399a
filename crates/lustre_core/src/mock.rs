//! In-memory host for tests.
//!
//! [`MockDocument`] keeps a small element tree, [`ManualScheduler`] runs
//! timers on a virtual clock, and [`RecordingCanvas`] records every draw call.
//! Selector support covers what the effects use: `tag`, `.class`, `#id`,
//! `tag[attr]`, and comma-separated lists of those.

#![allow(missing_docs)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::error::FxResult;
use crate::host::{Canvas2d, DocumentHost, ElementHandle, Scheduler};
use crate::layout::{Rect, Viewport};
use crate::style::Color;

#[derive(Debug, Default)]
struct MockNode {
    tag: String,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    text: String,
    children: Vec<MockElement>,
    parent: Option<Weak<RefCell<MockNode>>>,
    bounds: Rect,
    scroll_requests: u32,
}

/// Shared handle to a mock element.
#[derive(Debug, Clone)]
pub struct MockElement(Rc<RefCell<MockNode>>);

impl MockElement {
    /// Creates a detached element.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(MockNode {
            tag: tag.to_ascii_lowercase(),
            ..MockNode::default()
        })))
    }

    /// Builder: adds a class.
    #[must_use]
    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Builder: sets the id attribute.
    #[must_use]
    pub fn with_id(self, id: &str) -> Self {
        self.set_attribute("id", id);
        self
    }

    /// Builder: sets the bounding box.
    #[must_use]
    pub fn with_bounds(self, bounds: Rect) -> Self {
        self.set_bounds(bounds);
        self
    }

    /// Changes the bounding box, as a layout change would.
    pub fn set_bounds(&self, bounds: Rect) {
        self.0.borrow_mut().bounds = bounds;
    }

    #[must_use]
    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    #[must_use]
    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    #[must_use]
    pub fn children(&self) -> Vec<MockElement> {
        self.0.borrow().children.clone()
    }

    /// Returns true while the element has a parent.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.parent().is_some()
    }

    /// Number of smooth-scroll requests made on this element.
    #[must_use]
    pub fn scroll_requests(&self) -> u32 {
        self.0.borrow().scroll_requests
    }

    /// Returns true if both handles point at the same node.
    #[must_use]
    pub fn same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn parent(&self) -> Option<MockElement> {
        self.0
            .borrow()
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(MockElement)
    }

    fn matches(&self, selector: &Selector) -> bool {
        let node = self.0.borrow();
        if let Some(tag) = &selector.tag {
            if &node.tag != tag {
                return false;
            }
        }
        match &selector.qualifier {
            Qualifier::None => true,
            Qualifier::Class(class) => node.classes.iter().any(|c| c == class),
            Qualifier::Id(id) => node.attributes.get("id") == Some(id),
            Qualifier::Attribute(name) => node.attributes.contains_key(name),
        }
    }

    fn find_first(&self, selectors: &[Selector]) -> Option<MockElement> {
        if selectors.iter().any(|s| self.matches(s)) {
            return Some(self.clone());
        }
        self.children()
            .iter()
            .find_map(|child| child.find_first(selectors))
    }
}

impl ElementHandle for MockElement {
    fn set_style(&self, property: &str, value: &str) {
        self.0
            .borrow_mut()
            .styles
            .insert(property.to_owned(), value.to_owned());
    }

    fn add_class(&self, class: &str) {
        let mut node = self.0.borrow_mut();
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_owned());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn set_text(&self, text: &str) {
        text.clone_into(&mut self.0.borrow_mut().text);
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_owned(), value.to_owned());
    }

    fn append_child(&self, child: &Self) {
        child.remove();
        child.0.borrow_mut().parent = Some(Rc::downgrade(&self.0));
        self.0.borrow_mut().children.push(child.clone());
    }

    fn remove(&self) {
        if let Some(parent) = self.parent() {
            parent
                .0
                .borrow_mut()
                .children
                .retain(|c| !Rc::ptr_eq(&c.0, &self.0));
        }
        self.0.borrow_mut().parent = None;
    }

    fn bounds(&self) -> Rect {
        self.0.borrow().bounds
    }

    fn scroll_into_view_smooth(&self) {
        self.0.borrow_mut().scroll_requests += 1;
    }
}

#[derive(Debug)]
enum Qualifier {
    None,
    Class(String),
    Id(String),
    Attribute(String),
}

#[derive(Debug)]
struct Selector {
    tag: Option<String>,
    qualifier: Qualifier,
}

impl Selector {
    fn parse_list(selectors: &str) -> Vec<Self> {
        selectors
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::parse)
            .collect()
    }

    fn parse(selector: &str) -> Self {
        let split = selector.find(['.', '#', '[']).unwrap_or(selector.len());
        let (tag, rest) = selector.split_at(split);
        let tag = (!tag.is_empty()).then(|| tag.to_ascii_lowercase());

        let qualifier = if let Some(class) = rest.strip_prefix('.') {
            Qualifier::Class(class.to_owned())
        } else if let Some(id) = rest.strip_prefix('#') {
            Qualifier::Id(id.to_owned())
        } else if let Some(attr) = rest.strip_prefix('[') {
            Qualifier::Attribute(attr.trim_end_matches(']').to_owned())
        } else {
            Qualifier::None
        };

        Self { tag, qualifier }
    }
}

/// In-memory document with a `<head>` and a `<body>`.
#[derive(Debug)]
pub struct MockDocument {
    head: MockElement,
    body: MockElement,
    viewport: Viewport,
    created: Cell<usize>,
}

impl MockDocument {
    /// Creates an empty document with the given viewport.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            head: MockElement::new("head"),
            body: MockElement::new("body"),
            viewport,
            created: Cell::new(0),
        }
    }

    /// Number of elements created through [`DocumentHost::create_element`].
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.created.get()
    }
}

impl DocumentHost for MockDocument {
    type Element = MockElement;

    fn create_element(&self, tag: &str) -> FxResult<MockElement> {
        self.created.set(self.created.get() + 1);
        Ok(MockElement::new(tag))
    }

    fn body(&self) -> MockElement {
        self.body.clone()
    }

    fn head(&self) -> MockElement {
        self.head.clone()
    }

    fn query_selector(&self, selectors: &str) -> Option<MockElement> {
        let selectors = Selector::parse_list(selectors);
        self.head
            .find_first(&selectors)
            .or_else(|| self.body.find_first(&selectors))
    }

    fn element_by_id(&self, id: &str) -> Option<MockElement> {
        let selector = [Selector {
            tag: None,
            qualifier: Qualifier::Id(id.to_owned()),
        }];
        self.head
            .find_first(&selector)
            .or_else(|| self.body.find_first(&selector))
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

struct PendingTask {
    due_ms: u64,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct SchedulerState {
    now_ms: u64,
    next_seq: u64,
    tasks: Vec<PendingTask>,
}

/// Timer queue driven by a virtual clock.
///
/// Tasks run in due order; ties run in scheduling order.
#[derive(Clone, Default)]
pub struct ManualScheduler(Rc<RefCell<SchedulerState>>);

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.0.borrow().now_ms
    }

    /// Tasks waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.0.borrow().tasks.len()
    }

    /// Moves the clock forward, running every task that comes due.
    ///
    /// Tasks scheduled by running tasks also run if they fall inside the window.
    pub fn advance(&self, ms: u64) {
        let target = self.0.borrow().now_ms + ms;

        loop {
            let next = {
                let mut state = self.0.borrow_mut();
                let index = state
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due_ms <= target)
                    .min_by_key(|(_, t)| (t.due_ms, t.seq))
                    .map(|(i, _)| i);
                index.map(|i| {
                    let pending = state.tasks.swap_remove(i);
                    state.now_ms = pending.due_ms;
                    pending.task
                })
            };

            // Borrow released: the task may schedule more work
            match next {
                Some(task) => task(),
                None => break,
            }
        }

        self.0.borrow_mut().now_ms = target;
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let mut state = self.0.borrow_mut();
        let due_ms = state.now_ms + u64::from(delay_ms);
        let seq = state.next_seq;
        state.next_seq += 1;
        state.tasks.push(PendingTask { due_ms, seq, task });
    }
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize { width: f64, height: f64 },
    Clear { width: f64, height: f64 },
    Circle { x: f64, y: f64, radius: f64, color: Color },
    Line { from: (f64, f64), to: (f64, f64), width: f64, color: Color },
}

/// Canvas that records instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
    pub width: f64,
    pub height: f64,
}

impl RecordingCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops recorded commands, keeping the size.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Recorded circles.
    #[must_use]
    pub fn circles(&self) -> Vec<&DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .collect()
    }

    /// Recorded lines.
    #[must_use]
    pub fn lines(&self) -> Vec<&DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .collect()
    }
}

impl Canvas2d for RecordingCanvas {
    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle { x, y, radius, color });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, width, color });
    }
}
