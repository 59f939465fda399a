//! Toast notifications.
//!
//! Timeline from creation, with the default config:
//! ```text
//! t = 0            append  div.notification.<kind>
//! t = 10ms         add     .show      (entrance transition)
//! t = duration     remove  .show      (exit transition)
//! t = duration+500 remove  element
//! ```

use std::fmt;

use crate::config::ToastConfig;
use crate::error::FxResult;
use crate::host::{DocumentHost, ElementHandle, Scheduler};

/// Class toggled for the entrance/exit transition.
pub const SHOW_CLASS: &str = "show";

/// Severity of a notification; doubles as its CSS class.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NotificationKind {
    /// Operation succeeded.
    #[default]
    Success,
    /// Operation failed.
    Error,
    /// Neutral information.
    Info,
    /// Needs attention.
    Warning,
    /// A page-defined kind, used verbatim as the class.
    Custom(String),
}

impl NotificationKind {
    /// CSS class for this kind.
    #[must_use]
    pub fn class(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Custom(class) => class,
        }
    }
}

impl From<&str> for NotificationKind {
    fn from(value: &str) -> Self {
        match value {
            "success" => Self::Success,
            "error" => Self::Error,
            "info" => Self::Info,
            "warning" => Self::Warning,
            other => Self::Custom(other.to_owned()),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class())
    }
}

/// Per-call toast options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastOptions {
    /// Severity.
    pub kind: NotificationKind,
    /// Time from creation until the exit transition starts.
    pub duration_ms: u32,
}

impl ToastOptions {
    /// Options of the given kind with the configured default duration.
    #[must_use]
    pub fn new(kind: NotificationKind, config: &ToastConfig) -> Self {
        Self {
            kind,
            duration_ms: config.default_duration_ms,
        }
    }
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self::new(NotificationKind::default(), &ToastConfig::default())
    }
}

/// Shows a toast and schedules its exit. Returns the toast element.
///
/// # Errors
///
/// Fails if the host cannot create the element.
pub fn show_notification<D, S>(
    doc: &D,
    scheduler: &S,
    message: &str,
    options: &ToastOptions,
    config: &ToastConfig,
) -> FxResult<D::Element>
where
    D: DocumentHost,
    S: Scheduler,
{
    let toast = doc.create_element("div")?;
    toast.add_class("notification");
    // An empty custom kind would be an invalid token
    if !options.kind.class().is_empty() {
        toast.add_class(options.kind.class());
    }
    toast.set_text(message);
    doc.body().append_child(&toast);
    tracing::trace!("Toast shown ({}): {}", options.kind, message);

    let entering = toast.clone();
    scheduler.schedule(
        config.enter_delay_ms,
        Box::new(move || entering.add_class(SHOW_CLASS)),
    );

    let leaving = toast.clone();
    let exit_ms = config.exit_ms;
    let inner = scheduler.clone();
    scheduler.schedule(
        options.duration_ms,
        Box::new(move || {
            leaving.remove_class(SHOW_CLASS);
            inner.schedule(exit_ms, Box::new(move || leaving.remove()));
        }),
    );

    Ok(toast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Viewport;
    use crate::mock::{ManualScheduler, MockDocument};

    #[test]
    fn test_kind_round_trips_through_class() {
        for kind in ["success", "error", "info", "warning", "promo"] {
            assert_eq!(NotificationKind::from(kind).class(), kind);
        }
        assert_eq!(NotificationKind::from("promo"), NotificationKind::Custom("promo".to_owned()));
    }

    #[test]
    fn test_default_options() {
        let options = ToastOptions::default();
        assert_eq!(options.kind, NotificationKind::Success);
        assert_eq!(options.duration_ms, 3000);
    }

    #[test]
    fn test_element_shape() {
        let doc = MockDocument::new(Viewport::new(1024.0, 768.0));
        let scheduler = ManualScheduler::new();
        let options = ToastOptions::new(NotificationKind::Warning, &ToastConfig::default());

        let toast = show_notification(&doc, &scheduler, "Saved", &options, &ToastConfig::default()).unwrap();
        assert_eq!(toast.tag(), "div");
        assert_eq!(toast.classes(), vec!["notification", "warning"]);
        assert_eq!(toast.text(), "Saved");
        assert!(toast.is_attached());
        assert!(!toast.has_class(SHOW_CLASS));
    }
}
