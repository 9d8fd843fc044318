//! Error types for configuration and value parsing.
use thiserror::Error;

/// Recoverable errors surfaced by logpane.
///
/// Invariant violations (mutating a reserved bookmark, inverted clamp bounds)
/// panic instead; missing bookmarks are reported as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaneError {
    #[error("Invalid wrap mode: {0} (expected off, break or word)")]
    InvalidWrapMode(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidSetting { name: &'static str, value: String },
}
