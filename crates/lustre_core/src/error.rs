//! # Effect Error Types
//!
//! Errors only surface during setup. Per-frame and per-event paths never fail:
//! the composition root logs a setup error and mounts the remaining effects.

use thiserror::Error;

/// Errors that can occur while configuring or mounting an effect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FxError {
    /// Configuration parsed but a value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text is not valid TOML for [`crate::EffectsConfig`].
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// A required page element is absent.
    #[error("missing element: {0}")]
    MissingElement(&'static str),

    /// The 2D drawing context could not be obtained.
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// The host environment threw while performing an operation.
    #[error("host error: {0}")]
    Host(String),
}

impl From<toml::de::Error> for FxError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigParse(err.message().to_owned())
    }
}

/// Result type for effect setup.
pub type FxResult<T> = Result<T, FxError>;
