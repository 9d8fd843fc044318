//! Box layout: one wrap pass over the whole document, memoized by context.

use crate::geometry::{Position, Rect, Size};
use crate::measure::{Measurer, TextMeasure, TextStyle};
use logpane_core::alg::binary_search;
use logpane_core::constants::{DEFAULT_INNER_PADDING, DEFAULT_LINE_SPACING};
use logpane_core::wrap::wrap_document;
use logpane_core::{Anchor, Config, Document, WrapMode};
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, info};

/// Everything a wrap pass depends on.
///
/// Floats are stored as bit patterns so equality is exact and `Eq` holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WrapContext {
    document_version: u64,
    width_bits: u32,
    mode: WrapMode,
    text_size_bits: u32,
    style: TextStyle,
}

impl WrapContext {
    pub fn new(
        document_version: u64,
        width: f32,
        mode: WrapMode,
        text_size: f32,
        style: TextStyle,
    ) -> Self {
        Self {
            document_version,
            width_bits: width.to_bits(),
            mode,
            text_size_bits: text_size.to_bits(),
            style,
        }
    }

    pub fn document_version(&self) -> u64 {
        self.document_version
    }

    /// Width available to text, excluding padding.
    pub fn width(&self) -> f32 {
        f32::from_bits(self.width_bits)
    }

    pub fn mode(&self) -> WrapMode {
        self.mode
    }

    pub fn text_size(&self) -> f32 {
        f32::from_bits(self.text_size_bits)
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }
}

/// Spacing applied around and between boxes.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    pub padding: f32,
    pub line_spacing: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            padding: DEFAULT_INNER_PADDING,
            line_spacing: DEFAULT_LINE_SPACING,
        }
    }
}

impl From<&Config> for LayoutMetrics {
    fn from(config: &Config) -> Self {
        Self {
            padding: config.inner_padding,
            line_spacing: config.line_spacing,
        }
    }
}

/// One wrapped row of text placed in content coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBox {
    pub position: Position,
    pub size: Size,
    pub start: Anchor,
    pub end: Anchor,
    pub text: String,
}

impl TextBox {
    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    /// Byte index into `text` for a document anchor on this row, clamped to the
    /// row and snapped down to a character boundary.
    fn local_offset(&self, anchor: Anchor) -> usize {
        if anchor <= self.start {
            return 0;
        }
        if anchor >= self.end {
            return self.text.len();
        }
        let mut offset = anchor.line_offset - self.start.line_offset;
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    /// Horizontal position of `anchor` within this row.
    pub fn x_at<M>(&self, anchor: Anchor, measurer: Measurer<'_, M>) -> f32
    where
        M: TextMeasure + ?Sized,
    {
        let offset = self.local_offset(anchor);
        self.position.x + measurer.width(&self.text[..offset])
    }

    /// Anchor of the last character boundary whose prefix fits left of `x`.
    pub fn anchor_at_x<M>(&self, x: f32, measurer: Measurer<'_, M>) -> Anchor
    where
        M: TextMeasure + ?Sized,
    {
        let boundaries: Vec<usize> = self
            .text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(self.text.len()))
            .collect();
        let (index, _) = binary_search(boundaries.len() - 1, x - self.position.x, |i| {
            measurer.width(&self.text[..boundaries[i]])
        });
        self.start.offset_by(boundaries[index])
    }
}

/// A positioned element of the layout.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutBox {
    Text(TextBox),
}

impl LayoutBox {
    pub fn rect(&self) -> Rect {
        match self {
            LayoutBox::Text(text) => text.rect(),
        }
    }

    pub fn start(&self) -> Anchor {
        match self {
            LayoutBox::Text(text) => text.start,
        }
    }

    pub fn end(&self) -> Anchor {
        match self {
            LayoutBox::Text(text) => text.end,
        }
    }

    pub fn as_text(&self) -> Option<&TextBox> {
        match self {
            LayoutBox::Text(text) => Some(text),
        }
    }
}

/// Wrap `lines` under `context` and stack the fragments top to bottom.
///
/// Every box is `floor(line height) + line_spacing` tall and as wide as its
/// measured text; the first box sits at `(padding, padding)`.
pub fn build_boxes<M: TextMeasure + ?Sized>(
    lines: &[String],
    context: &WrapContext,
    metrics: &LayoutMetrics,
    measure: &M,
) -> Vec<LayoutBox> {
    let measurer = Measurer::new(measure, context.text_size(), context.style());
    let row_height = measurer.line_height() + metrics.line_spacing;
    let fragments = wrap_document(lines, context.width(), context.mode(), |text| {
        measurer.width(text)
    });

    let mut cursor = 0.0f32;
    fragments
        .into_iter()
        .map(|fragment| {
            let end = fragment.end();
            let position = Position::new(metrics.padding, metrics.padding + cursor);
            cursor += row_height;
            LayoutBox::Text(TextBox {
                position,
                size: Size::new(measurer.width(&fragment.text), row_height),
                start: fragment.anchor,
                end,
                text: fragment.text,
            })
        })
        .collect()
}

/// Memoized box list for one document.
#[derive(Debug, Default)]
pub struct LayoutCache {
    context: Option<WrapContext>,
    metrics: Option<LayoutMetrics>,
    boxes: Vec<LayoutBox>,
    content_size: Size,
    perf_log: bool,
}

impl LayoutCache {
    pub fn new(perf_log: bool) -> Self {
        Self {
            perf_log,
            ..Self::default()
        }
    }

    /// Returns `true` when the cached boxes were built under a different key.
    pub fn needs_rebuild(&self, context: &WrapContext, metrics: &LayoutMetrics) -> bool {
        self.context.as_ref() != Some(context) || self.metrics.as_ref() != Some(metrics)
    }

    /// Bring the box list up to date with `context`.
    ///
    /// Lines are copied out under the document's read lock and wrapped without
    /// holding it. A non-positive width keeps the previous layout.
    ///
    /// # Returns
    /// `true` when the boxes were rebuilt.
    pub fn relayout<M: TextMeasure + ?Sized>(
        &mut self,
        document: &Document,
        context: WrapContext,
        metrics: LayoutMetrics,
        measure: &M,
    ) -> bool {
        if context.width() <= 0.0 || !self.needs_rebuild(&context, &metrics) {
            return false;
        }

        let started = Instant::now();
        let lines = document.read(|lines| lines.to_vec());
        let copy_ms = started.elapsed().as_secs_f32() * 1000.0;

        self.boxes = build_boxes(&lines, &context, &metrics, measure);
        self.content_size = content_extent(&self.boxes, metrics.padding);
        self.context = Some(context);
        self.metrics = Some(metrics);

        debug!(
            version = context.document_version(),
            lines = lines.len(),
            boxes = self.boxes.len(),
            "relayout"
        );
        if self.perf_log {
            info!(
                target: "logpane_view::perf",
                event = "relayout",
                lines = lines.len(),
                boxes = self.boxes.len(),
                width = context.width(),
                mode = %context.mode(),
                copy_ms,
                total_ms = started.elapsed().as_secs_f32() * 1000.0,
                "layout rebuilt"
            );
        }
        true
    }

    /// Boxes in document order; their `y` positions are non-decreasing.
    pub fn boxes(&self) -> &[LayoutBox] {
        &self.boxes
    }

    /// Minimum size that contains every box plus padding on all sides.
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn context(&self) -> Option<&WrapContext> {
        self.context.as_ref()
    }

    pub fn set_perf_log(&mut self, enabled: bool) {
        self.perf_log = enabled;
    }
}

fn content_extent(boxes: &[LayoutBox], padding: f32) -> Size {
    let width = boxes
        .iter()
        .map(|layout_box| layout_box.rect().right())
        .fold(padding, f32::max);
    let height = boxes
        .last()
        .map(|layout_box| layout_box.rect().bottom())
        .unwrap_or(padding);
    Size::new(width + padding, height + padding)
}
