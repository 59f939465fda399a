//! Page effects.
//!
//! Self-initialising on page ready:
//! - `scroll_progress`, `cursor`, `particles`, `reveal`, `smooth_scroll`, `preloader`
//!
//! On-demand utilities:
//! - `counter`, `tilt`, `toast`, `ripple`

pub mod counter;
pub mod cursor;
pub mod particles;
pub mod preloader;
pub mod reveal;
pub mod ripple;
pub mod scroll_progress;
pub mod smooth_scroll;
pub mod tilt;
pub mod toast;

pub use counter::{CounterAnimation, CounterSpec};
pub use cursor::CustomCursor;
pub use particles::{Link, Particle, ParticleField, ParticleLayer};
pub use preloader::Preloader;
pub use reveal::{RevealFallback, RevealObserver};
pub use ripple::{create_ripple, ensure_ripple_style, RippleGeometry};
pub use scroll_progress::ScrollProgress;
pub use smooth_scroll::{AnchorNavigator, ClickOutcome};
pub use tilt::{MagneticTilt, Tilt};
pub use toast::{show_notification, NotificationKind, ToastOptions};
