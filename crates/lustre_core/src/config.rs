//! Typed configuration for every effect.
//!
//! Loaded once at startup from TOML. Every section and every field has a
//! default, so an empty document is a valid configuration:
//!
//! ```toml
//! log_level = "info"
//!
//! [particles]
//! desktop_count = 80
//!
//! [cursor]
//! enabled = false
//! ```

use serde::Deserialize;

use crate::animation::Easing;
use crate::error::{FxError, FxResult};
use crate::style::Color;

/// Viewport width below which the page is treated as touch/mobile.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectsConfig {
    /// Minimum level for console logging (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
    /// Scroll progress bar.
    pub scroll_progress: ScrollProgressConfig,
    /// Custom cursor.
    pub cursor: CursorConfig,
    /// Ambient particle field.
    pub particles: ParticleConfig,
    /// Scroll-triggered reveal.
    pub reveal: RevealConfig,
    /// Smooth anchor scrolling.
    pub smooth_scroll: SmoothScrollConfig,
    /// Preloader dismissal.
    pub preloader: PreloaderConfig,
    /// Counter animator.
    pub counter: CounterConfig,
    /// Magnetic card tilt.
    pub tilt: TiltConfig,
    /// Toast notifications.
    pub toast: ToastConfig,
    /// Click ripple.
    pub ripple: RippleConfig,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            scroll_progress: ScrollProgressConfig::default(),
            cursor: CursorConfig::default(),
            particles: ParticleConfig::default(),
            reveal: RevealConfig::default(),
            smooth_scroll: SmoothScrollConfig::default(),
            preloader: PreloaderConfig::default(),
            counter: CounterConfig::default(),
            tilt: TiltConfig::default(),
            toast: ToastConfig::default(),
            ripple: RippleConfig::default(),
        }
    }
}

impl EffectsConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::ConfigParse`] for malformed TOML or unknown keys, and
    /// [`FxError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(source: &str) -> FxResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> FxResult<()> {
        const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
        if !LEVELS.contains(&self.log_level.as_str()) {
            return Err(invalid(format!("log_level `{}`", self.log_level)));
        }

        check_rate("cursor.dot_rate", self.cursor.dot_rate)?;
        check_rate("cursor.ring_rate", self.cursor.ring_rate)?;

        let p = &self.particles;
        check_range("particles.radius", p.radius_min, p.radius_max)?;
        check_range("particles.opacity", p.opacity_min, p.opacity_max)?;
        if p.max_speed < 0.0 {
            return Err(invalid("particles.max_speed must be >= 0".to_owned()));
        }
        if p.link_distance <= 0.0 {
            return Err(invalid("particles.link_distance must be > 0".to_owned()));
        }

        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(invalid("reveal.threshold must be within [0, 1]".to_owned()));
        }
        if self.tilt.damping <= 0.0 {
            return Err(invalid("tilt.damping must be > 0".to_owned()));
        }
        Ok(())
    }
}

fn invalid(message: String) -> FxError {
    FxError::InvalidConfig(message)
}

fn check_rate(field: &str, rate: f64) -> FxResult<()> {
    if rate > 0.0 && rate <= 1.0 {
        Ok(())
    } else {
        Err(invalid(format!("{field} must be within (0, 1], got {rate}")))
    }
}

fn check_range(field: &str, min: f64, max: f64) -> FxResult<()> {
    if min <= max {
        Ok(())
    } else {
        Err(invalid(format!("{field}: min {min} exceeds max {max}")))
    }
}

/// Scroll progress bar settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollProgressConfig {
    /// Mount on page ready.
    pub enabled: bool,
    /// Write 0% instead of a non-finite width when the page cannot scroll.
    pub clamp_unscrollable: bool,
}

impl Default for ScrollProgressConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            clamp_unscrollable: true,
        }
    }
}

/// Custom cursor settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CursorConfig {
    /// Mount on page ready.
    pub enabled: bool,
    /// Disabled entirely below this viewport width.
    pub min_viewport_width: f64,
    /// Fraction of the gap the dot closes per frame.
    pub dot_rate: f64,
    /// Fraction of the gap the ring closes per frame.
    pub ring_rate: f64,
    /// Elements that put the dot into its hover state.
    pub hover_selectors: String,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_viewport_width: MOBILE_BREAKPOINT,
            dot_rate: 0.2,
            ring_rate: 0.1,
            hover_selectors: "a, button, .hover-target".to_owned(),
        }
    }
}

/// Particle field settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticleConfig {
    /// Mount on page ready.
    pub enabled: bool,
    /// Pool size below `mobile_breakpoint`.
    pub mobile_count: usize,
    /// Pool size otherwise.
    pub desktop_count: usize,
    /// Viewport width separating the two counts.
    pub mobile_breakpoint: f64,
    /// Smallest radius (inclusive).
    pub radius_min: f64,
    /// Largest radius (exclusive).
    pub radius_max: f64,
    /// Per-axis speed bound; velocities fall in `[-max_speed, max_speed)`.
    pub max_speed: f64,
    /// Lowest opacity (inclusive).
    pub opacity_min: f64,
    /// Highest opacity (exclusive).
    pub opacity_max: f64,
    /// Particle and link hue as `[r, g, b]`.
    pub color: [u8; 3],
    /// Pairs closer than this (strictly) are linked.
    pub link_distance: f64,
    /// Link opacity at zero distance.
    pub link_opacity: f64,
    /// Link stroke width.
    pub link_width: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mobile_count: 30,
            desktop_count: 60,
            mobile_breakpoint: MOBILE_BREAKPOINT,
            radius_min: 0.5,
            radius_max: 2.5,
            max_speed: 0.25,
            opacity_min: 0.1,
            opacity_max: 0.6,
            color: [227, 27, 35],
            link_distance: 100.0,
            link_opacity: 0.1,
            link_width: 0.5,
        }
    }
}

impl ParticleConfig {
    /// Returns the hue as a fully opaque color.
    #[must_use]
    pub fn base_color(&self) -> Color {
        let [r, g, b] = self.color;
        Color::rgb(r, g, b)
    }

    /// Returns the pool size for a viewport width.
    #[must_use]
    pub fn count_for_width(&self, width: f64) -> usize {
        if width < self.mobile_breakpoint {
            self.mobile_count
        } else {
            self.desktop_count
        }
    }
}

/// Scroll reveal settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Mount on page ready.
    pub enabled: bool,
    /// Elements to watch.
    pub selectors: String,
    /// Class applied once an element is revealed.
    pub visible_class: String,
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    /// Pixels trimmed from the bottom of the viewport before testing.
    pub bottom_margin: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            selectors: ".animate-on-scroll, .reveal, .fade-in".to_owned(),
            visible_class: "visible".to_owned(),
            threshold: 0.1,
            bottom_margin: 100.0,
        }
    }
}

impl RevealConfig {
    /// Returns the observer root margin in CSS shorthand.
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin)
    }
}

/// Smooth anchor scroll settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmoothScrollConfig {
    /// Mount on page ready.
    pub enabled: bool,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Preloader settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreloaderConfig {
    /// Mount on page ready.
    pub enabled: bool,
    /// Selector for the overlay.
    pub selector: String,
    /// Delay after `load` before adding `hidden`.
    pub hide_delay_ms: u32,
    /// Delay after `hidden` before removing the element.
    pub remove_delay_ms: u32,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            selector: ".preloader".to_owned(),
            hide_delay_ms: 300,
            remove_delay_ms: 500,
        }
    }
}

/// Counter animator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CounterConfig {
    /// Curve applied to elapsed time.
    pub easing: Easing,
}

/// Magnetic tilt settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TiltConfig {
    /// Pixels of pointer offset per degree of rotation.
    pub damping: f64,
    /// CSS perspective distance in px.
    pub perspective: f64,
    /// Forward translation while tilted, in px.
    pub lift: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            damping: 25.0,
            perspective: 1000.0,
            lift: 10.0,
        }
    }
}

/// Toast settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToastConfig {
    /// Display time when the caller gives none.
    pub default_duration_ms: u32,
    /// Delay before adding `show`, so the initial style applies first.
    pub enter_delay_ms: u32,
    /// Exit transition length; the element is removed after it.
    pub exit_ms: u32,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 3000,
            enter_delay_ms: 10,
            exit_ms: 500,
        }
    }
}

/// Ripple settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RippleConfig {
    /// Animation length; the ripple is removed after it.
    pub lifetime_ms: u32,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self { lifetime_ms: 600 }
    }
}
