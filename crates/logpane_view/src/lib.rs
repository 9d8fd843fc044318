//! Layout, virtualization and hit testing for logpane documents.
//!
//! This crate turns a [`logpane_core::Document`] into positioned text boxes,
//! materializes only the boxes that intersect the viewport, and maps pointer
//! positions to document anchors and back. Drawing is left to the host.

pub mod geometry;
pub mod layout;
pub mod measure;
pub mod view;
pub mod viewport;

pub use geometry::{Position, Rect, Size};
pub use layout::{LayoutBox, LayoutCache, LayoutMetrics, TextBox, WrapContext};
pub use measure::{Measurer, MonospaceMeasure, TextMeasure, TextStyle};
pub use view::{Frame, LogView};
pub use viewport::{FrameStats, RenderItem, Viewport};
