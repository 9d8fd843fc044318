//! Root crate facade for logpane.
//!
//! Re-exports the document/wrap core and the layout/viewport layer so hosts can
//! depend on a single crate.

pub use logpane_core::{
    alg, anchor, config, constants, document, env, error, wrap, Anchor, Bookmark, Config,
    Document, Fragment, PaneError, WrapMode,
};
pub use logpane_view::{
    geometry, layout, measure, view, viewport, Frame, FrameStats, LayoutBox, LayoutCache,
    LayoutMetrics, LogView, Measurer, MonospaceMeasure, Position, Rect, RenderItem, Size,
    TextBox, TextMeasure, TextStyle, Viewport, WrapContext,
};

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Install a compact `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter`.
///
/// # Returns
/// `false` when a global subscriber was already installed.
pub fn init_tracing(default_filter: &str) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok();
    if installed {
        debug!(default_filter, "tracing initialized");
    }
    installed
}
