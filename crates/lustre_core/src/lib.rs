//! # LUSTRE Core
//!
//! Host-independent logic for the page effects layer:
//! - Ambient particle field with proximity linking
//! - Custom cursor with exponential follow
//! - Scroll progress, scroll reveal, smooth anchor scroll, preloader
//! - On-demand utilities: counter, magnetic tilt, toast, ripple
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      EFFECT PIPELINE                      │
//! ├──────────────────────────────────────────────────────────┤
//! │  Host Events → Effect Component → Element / Canvas Writes │
//! │       ↓               ↓                    ↓              │
//! │  scroll, move,   AnimationLoop       ElementHandle,       │
//! │  click, load     + Scheduler         Canvas2d             │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here knows about the browser. The host (see `lustre_web`, or
//! [`mock`] in tests) injects element handles, a timer scheduler and a 2D
//! canvas into each component.

pub mod animation;
pub mod config;
pub mod effects;
pub mod error;
pub mod frame;
pub mod host;
pub mod layout;
pub mod mock;
pub mod style;

pub use animation::{Easing, Follower};
pub use config::EffectsConfig;
pub use error::{FxError, FxResult};
pub use frame::{AnimationLoop, EffectId, FrameControl, FrameEffect, FrameStats};
pub use host::{Canvas2d, DocumentHost, ElementHandle, Scheduler};
pub use layout::{Rect, ScrollMetrics, Viewport};
pub use style::Color;
