//! Smooth scrolling for same-page anchor links.

use crate::host::{DocumentHost, ElementHandle};

/// Selector for links the navigator handles.
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// What happened to an anchor click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Not a local fragment link; the browser's default navigation proceeds.
    Ignored,
    /// Default navigation must be suppressed.
    Prevented {
        /// Whether a target element was found and scrolled to.
        target_found: bool,
    },
}

impl ClickOutcome {
    /// Returns true if the host must call `preventDefault`.
    #[must_use]
    pub fn prevents_default(self) -> bool {
        matches!(self, Self::Prevented { .. })
    }
}

/// Returns the target id of a local fragment link, or `None` for anything
/// else, including the bare `#`.
#[must_use]
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Routes anchor clicks to smooth scrolls.
///
/// Targets are resolved at click time, so links to sections added after
/// mount still work.
pub struct AnchorNavigator<D: DocumentHost> {
    doc: D,
}

impl<D: DocumentHost> AnchorNavigator<D> {
    /// Creates a navigator over `doc`.
    pub fn new(doc: D) -> Self {
        Self { doc }
    }

    /// Handles a click on a link with the given `href` attribute.
    pub fn on_anchor_click(&self, href: &str) -> ClickOutcome {
        let Some(id) = fragment_target(href) else {
            return ClickOutcome::Ignored;
        };

        let target = self.doc.element_by_id(id);
        if let Some(target) = &target {
            target.scroll_into_view_smooth();
        } else {
            tracing::debug!("Anchor target #{} not found", id);
        }

        ClickOutcome::Prevented {
            target_found: target.is_some(),
        }
    }
}
