//! Scroll progress bar: vertical scroll position as a width percentage.

use crate::config::ScrollProgressConfig;
use crate::error::FxResult;
use crate::host::{DocumentHost, ElementHandle};
use crate::layout::{css_number, ScrollMetrics};

/// Class of the progress bar element.
pub const BAR_CLASS: &str = "scroll-progress";

/// Scrolled percentage of the scrollable range.
///
/// Not clamped for a positive range. A zero or negative range gives 0 when
/// `clamp_unscrollable` is set, and the raw (non-finite) quotient otherwise.
#[must_use]
pub fn progress_percent(metrics: ScrollMetrics, clamp_unscrollable: bool) -> f64 {
    let range = metrics.scrollable_range();
    if clamp_unscrollable && range <= 0.0 {
        return 0.0;
    }
    metrics.scroll_y * 100.0 / range
}

/// The fixed progress bar.
pub struct ScrollProgress<E: ElementHandle> {
    bar: E,
    clamp_unscrollable: bool,
}

impl<E: ElementHandle> ScrollProgress<E> {
    /// Uses the page's existing bar, or creates and appends one.
    ///
    /// # Errors
    ///
    /// Fails if a bar must be created and the host refuses.
    pub fn ensure_bar<D>(doc: &D, existing: Option<E>, config: &ScrollProgressConfig) -> FxResult<Self>
    where
        D: DocumentHost<Element = E>,
    {
        let bar = match existing {
            Some(bar) => bar,
            None => {
                let bar = doc.create_element("div")?;
                bar.add_class(BAR_CLASS);
                doc.body().append_child(&bar);
                tracing::debug!("Scroll progress bar created");
                bar
            }
        };

        Ok(Self::new(bar, config))
    }

    /// Wraps an existing bar.
    pub fn new(bar: E, config: &ScrollProgressConfig) -> Self {
        Self {
            bar,
            clamp_unscrollable: config.clamp_unscrollable,
        }
    }

    /// Returns the bar element.
    pub fn bar(&self) -> &E {
        &self.bar
    }

    /// Writes the bar width for the current scroll position.
    pub fn on_scroll(&self, metrics: ScrollMetrics) {
        let percent = progress_percent(metrics, self.clamp_unscrollable);
        self.bar.set_style("width", &format!("{}%", js_number(percent)));
    }
}

/// Number text as a browser script would print it.
fn js_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned()
    } else {
        css_number(value).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Viewport;
    use crate::mock::{MockDocument, MockElement};

    fn metrics(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_y,
            scroll_height,
            viewport_height,
        }
    }

    #[test]
    fn test_thirty_percent() {
        let percent = progress_percent(metrics(150.0, 1150.0, 650.0), true);
        assert!((percent - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_unscrollable_page() {
        assert!(progress_percent(metrics(0.0, 650.0, 650.0), true).abs() < f64::EPSILON);
        assert!(progress_percent(metrics(0.0, 650.0, 650.0), false).is_nan());
        assert!(progress_percent(metrics(10.0, 650.0, 650.0), false).is_infinite());
    }

    #[test]
    fn test_unclamped_width_uses_script_spelling() {
        let config = ScrollProgressConfig {
            clamp_unscrollable: false,
            ..ScrollProgressConfig::default()
        };
        let progress = ScrollProgress::new(MockElement::new("div"), &config);

        progress.on_scroll(metrics(10.0, 650.0, 650.0));
        assert_eq!(progress.bar().style("width").as_deref(), Some("Infinity%"));
        progress.on_scroll(metrics(0.0, 650.0, 650.0));
        assert_eq!(progress.bar().style("width").as_deref(), Some("NaN%"));
        progress.on_scroll(metrics(200.0, 1150.0, 650.0));
        assert_eq!(progress.bar().style("width").as_deref(), Some("40%"));
    }

    #[test]
    fn test_no_clamp_on_overscroll() {
        let percent = progress_percent(metrics(600.0, 1150.0, 650.0), true);
        assert!((percent - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_creates_bar_when_absent() {
        let doc = MockDocument::new(Viewport::new(1024.0, 650.0));
        let progress = ScrollProgress::ensure_bar(&doc, None, &ScrollProgressConfig::default()).unwrap();
        assert!(progress.bar().has_class(BAR_CLASS));
        assert_eq!(doc.body().children().len(), 1);

        progress.on_scroll(metrics(150.0, 1150.0, 650.0));
        assert_eq!(progress.bar().style("width").as_deref(), Some("30%"));
    }

    #[test]
    fn test_reuses_existing_bar() {
        let doc = MockDocument::new(Viewport::new(1024.0, 650.0));
        let existing = MockElement::new("div").with_class(BAR_CLASS);
        let progress =
            ScrollProgress::ensure_bar(&doc, Some(existing.clone()), &ScrollProgressConfig::default()).unwrap();
        assert!(progress.bar().same_node(&existing));
        assert_eq!(doc.created_count(), 0);
    }
}
