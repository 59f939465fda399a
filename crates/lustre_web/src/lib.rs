//! # LUSTRE Web
//!
//! Browser host for [`lustre_core`]:
//!
//! ```text
//! ┌──────────────┐   DOM events    ┌──────────────┐
//! │   web-sys    │ ──────────────▶ │    effects   │
//! │ (dom, events)│ ◀────────────── │ (lustre_core)│
//! └──────────────┘  style/class    └──────┬───────┘
//!        ▲                                │ FrameEffect
//!        │ requestAnimationFrame   ┌──────▼───────┐
//!        └──────────────────────── │   RafDriver  │
//!                                  └──────────────┘
//! ```
//!
//! Everything except [`slot`] is `wasm32`-only. On native targets only the
//! runtime slot builds, so the workspace still builds and tests there.

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod driver;
#[cfg(target_arch = "wasm32")]
pub mod events;
#[cfg(target_arch = "wasm32")]
pub mod logging;
pub mod slot;

#[cfg(target_arch = "wasm32")]
pub use app::{start, start_with_config, AnimationEngine};
