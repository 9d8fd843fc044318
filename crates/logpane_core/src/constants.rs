//! Shared defaults used across logpane crates.

/// Default number of lines a document keeps before evicting the oldest.
pub const DEFAULT_CAPACITY: usize = 2_000;

/// Default text size handed to the host measurement callback.
pub const DEFAULT_TEXT_SIZE: f32 = 14.0;

/// Default padding between the content edge and the first box.
pub const DEFAULT_INNER_PADDING: f32 = 8.0;

/// Default vertical gap added below every wrapped row.
pub const DEFAULT_LINE_SPACING: f32 = 4.0;

/// Default extra pixels materialized above and below the viewport.
pub const DEFAULT_OVERSCAN: f32 = 0.0;

/// Environment variable names read by [`crate::Config::from_env`].
pub const ENV_CAPACITY: &str = "LOGPANE_CAPACITY";
/// Wrap mode override (`off`, `break`, `word`).
pub const ENV_WRAP: &str = "LOGPANE_WRAP";
/// Text size override.
pub const ENV_TEXT_SIZE: &str = "LOGPANE_TEXT_SIZE";
/// Inner padding override.
pub const ENV_PADDING: &str = "LOGPANE_PADDING";
/// Line spacing override.
pub const ENV_LINE_SPACING: &str = "LOGPANE_LINE_SPACING";
/// Overscan override.
pub const ENV_OVERSCAN: &str = "LOGPANE_OVERSCAN";
/// Enables relayout/refresh timing logs.
pub const ENV_PERF_LOG: &str = "LOGPANE_PERF_LOG";
