//! Core domain library for logpane (document storage, bookmarks, wrapping).

/// Ordered text coordinates.
pub mod anchor;
/// Monotonic search and clamping helpers.
pub mod alg;
/// Configuration loading and defaults.
pub mod config;
/// Shared defaults used across logpane crates.
pub mod constants;
/// Bounded, versioned line store with bookmarks.
pub mod document;
/// Process-global environment helpers.
pub mod env;
/// Error types for configuration and parsing.
pub mod error;
/// Line wrapping under an explicit measurement function.
pub mod wrap;

pub use anchor::Anchor;
pub use config::Config;
pub use document::{Bookmark, Document};
pub use error::PaneError;
pub use wrap::{Fragment, WrapMode};
