//! Boundary controller: host events in, frames out.
//!
//! [`LogView`] owns the layout cache and the viewport and shares the
//! [`Document`] with producer threads through an `Arc`. All pointer positions
//! are in content coordinates.

use crate::geometry::{Position, Rect, Size};
use crate::layout::{LayoutBox, LayoutCache, LayoutMetrics, WrapContext};
use crate::measure::{Measurer, TextMeasure, TextStyle};
use crate::viewport::{anchor_to_box, point_to_anchor, FrameStats, RenderItem, Viewport};
use logpane_core::alg::clamp;
use logpane_core::{Anchor, Bookmark, Config, Document, WrapMode};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Output of one refresh.
#[derive(Debug)]
pub struct Frame<'a> {
    /// Visible items, top to bottom.
    pub items: Vec<&'a RenderItem>,
    pub highlights: &'a [Rect],
    /// Minimum size the host scroller should give the content.
    pub content_size: Size,
    pub scroll_y: f32,
    pub stats: FrameStats,
}

/// A scrollable, selectable view over a shared [`Document`].
pub struct LogView<M: TextMeasure> {
    document: Arc<Document>,
    measure: M,
    layout: LayoutCache,
    viewport: Viewport,
    wrap: WrapMode,
    text_size: f32,
    text_style: TextStyle,
    metrics: LayoutMetrics,
    dragging: bool,
    perf_log: bool,
}

impl<M: TextMeasure> LogView<M> {
    /// Create a view over a fresh document sized by `config.capacity`.
    pub fn new(measure: M, config: &Config) -> Self {
        let document = Arc::new(Document::with_capacity(config.capacity));
        Self::with_document(document, measure, config)
    }

    /// Create a view over an existing document.
    pub fn with_document(document: Arc<Document>, measure: M, config: &Config) -> Self {
        Self {
            document,
            measure,
            layout: LayoutCache::new(config.perf_log),
            viewport: Viewport::new(config.overscan),
            wrap: config.wrap,
            text_size: config.text_size,
            text_style: TextStyle {
                monospace: true,
                ..TextStyle::default()
            },
            metrics: LayoutMetrics::from(config),
            dragging: false,
            perf_log: config.perf_log,
        }
    }

    /// The shared document; clone the `Arc` to feed it from other threads.
    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    pub fn append(&self, line: impl Into<String>) {
        self.document.push(line);
    }

    pub fn append_lines<I>(&self, lines: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.document.add(lines);
    }

    pub fn set_capacity(&self, capacity: usize) {
        self.document.set_capacity(capacity);
    }

    /// # Panics
    /// Panics if `key` is `Start` or `End`.
    pub fn set_bookmark(&self, key: Bookmark, anchor: Anchor) {
        self.document.set_bookmark(key, anchor);
    }

    /// # Panics
    /// Panics if `key` is `Start` or `End`.
    pub fn remove_bookmark(&self, key: &Bookmark) {
        self.document.remove_bookmark(key);
    }

    /// Set the visible window size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.set_size(Size::new(width, height));
    }

    /// Scroll so the window starts at `offset_y`, limited to the content.
    ///
    /// # Returns
    /// The applied offset.
    pub fn scroll(&mut self, offset_y: f32) -> f32 {
        self.relayout();
        let height = self.layout.content_size().height;
        self.viewport.scroll_to(offset_y, height)
    }

    pub fn scroll_y(&self) -> f32 {
        self.viewport.scroll_y()
    }

    /// Start a selection at the anchor under `position`.
    pub fn pointer_down(&mut self, position: Position) {
        let anchor = self.anchor_at(position);
        self.document.start_selection(anchor);
        self.dragging = true;
    }

    /// Extend the selection to `position`, scrolling to follow it when it
    /// leaves the window. A drag without a preceding press starts a selection.
    pub fn pointer_drag(&mut self, position: Position) {
        let anchor = self.anchor_at(position);
        if !self.dragging {
            self.document.start_selection(anchor);
            self.dragging = true;
            return;
        }
        self.document.extend_selection(anchor);
        self.scroll_point_to_visible(position);
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    pub fn wrapping(&self) -> WrapMode {
        self.wrap
    }

    pub fn set_wrapping(&mut self, mode: WrapMode) {
        self.wrap = mode;
    }

    /// Switch between word wrapping and no wrapping.
    ///
    /// # Returns
    /// The new mode.
    pub fn toggle_word_wrap(&mut self) -> WrapMode {
        self.wrap = self.wrap.toggled_word();
        self.wrap
    }

    pub fn text_size(&self) -> f32 {
        self.text_size
    }

    /// Non-finite or non-positive sizes are ignored.
    pub fn set_text_size(&mut self, size: f32) {
        if size.is_finite() && size > 0.0 {
            self.text_size = size;
        }
    }

    pub fn text_style(&self) -> TextStyle {
        self.text_style
    }

    pub fn set_text_style(&mut self, style: TextStyle) {
        self.text_style = style;
    }

    pub fn select_all(&self) {
        self.document.select_all();
    }

    pub fn select_none(&self) {
        self.document.select_none();
    }

    /// Selected text for the host clipboard; empty without a selection.
    pub fn copy_selection(&self, separator: &str) -> String {
        self.document.selection_text(separator)
    }

    /// Text between two bookmarks; `None` if either is unset.
    pub fn extract_text(&self, a: &Bookmark, b: &Bookmark, separator: &str) -> Option<String> {
        self.document.string(a, b, separator)
    }

    /// Scroll the least distance that brings `point` into the window.
    pub fn scroll_point_to_visible(&mut self, point: Position) {
        if !point.y.is_finite() {
            return;
        }
        let height = self.viewport.size().height;
        let target = clamp(self.viewport.scroll_y(), point.y - height, point.y);
        let content_height = self.layout.content_size().height;
        self.viewport.scroll_to(target, content_height);
    }

    /// Scroll the row holding bookmark `key` into view.
    ///
    /// # Returns
    /// `false` when the bookmark is unset or nothing is laid out.
    pub fn scroll_to_bookmark(&mut self, key: &Bookmark) -> bool {
        self.relayout();
        let Some(anchor) = self.document.get_bookmark(key) else {
            debug!(%key, "scroll target bookmark is not set");
            return false;
        };
        let Some(rect) = anchor_to_box(self.layout.boxes(), anchor).map(LayoutBox::rect) else {
            return false;
        };
        self.scroll_point_to_visible(Position::new(rect.position.x, rect.bottom()));
        self.scroll_point_to_visible(rect.position);
        true
    }

    /// Minimum content size for the current layout.
    pub fn content_size(&mut self) -> Size {
        self.relayout();
        self.layout.content_size()
    }

    /// Re-wrap if needed and materialize the visible window.
    pub fn refresh(&mut self) -> Frame<'_> {
        let started = Instant::now();
        let relaid = self.relayout();
        let content_size = self.layout.content_size();
        let scroll_y = self
            .viewport
            .scroll_to(self.viewport.scroll_y(), content_size.height);
        let selection = self.document.selection();
        let (text_size, text_style) = self.laid_out_text();
        let measurer = Measurer::new(&self.measure, text_size, text_style);
        let stats = self
            .viewport
            .refresh(self.layout.boxes(), selection, measurer);

        if self.perf_log {
            info!(
                target: "logpane_view::perf",
                event = "refresh",
                refresh_id = stats.refresh_id,
                relaid,
                visible = stats.visible,
                reused = stats.reused,
                allocated = stats.allocated,
                recycled = stats.recycled,
                highlights = stats.highlights,
                total_ms = started.elapsed().as_secs_f32() * 1000.0,
                "log view refresh"
            );
        }

        Frame {
            items: self.viewport.visible_items().collect(),
            highlights: self.viewport.highlights(),
            content_size,
            scroll_y,
            stats,
        }
    }

    fn wrap_context(&self) -> WrapContext {
        WrapContext::new(
            self.document.version(),
            self.viewport.size().width - self.metrics.padding * 2.0,
            self.wrap,
            self.text_size,
            self.text_style,
        )
    }

    fn relayout(&mut self) -> bool {
        let context = self.wrap_context();
        self.layout
            .relayout(&self.document, context, self.metrics, &self.measure)
    }

    fn anchor_at(&mut self, position: Position) -> Anchor {
        self.relayout();
        let (text_size, text_style) = self.laid_out_text();
        let measurer = Measurer::new(&self.measure, text_size, text_style);
        point_to_anchor(self.layout.boxes(), position, measurer)
    }

    /// Text size and style the current boxes were built with; the view
    /// settings until the first layout.
    fn laid_out_text(&self) -> (f32, TextStyle) {
        self.layout
            .context()
            .map(|context| (context.text_size(), context.style()))
            .unwrap_or((self.text_size, self.text_style))
    }
}
