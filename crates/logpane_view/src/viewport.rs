//! Virtualized window over a box list.
//!
//! Only boxes intersecting the scroll window (plus overscan) are materialized
//! as [`RenderItem`]s. Items live in an index-addressed slot arena; each
//! refresh tags the slots it uses with a new refresh id and returns the rest
//! to the free list, so steady scrolling allocates nothing.

use crate::geometry::{Position, Rect, Size};
use crate::layout::LayoutBox;
use crate::measure::{Measurer, TextMeasure};
use logpane_core::alg::clamp;
use logpane_core::anchor::{ordered, Anchor};
use std::collections::BTreeMap;
use std::ops::Range;

/// A materialized box handed to the host for drawing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderItem {
    pub text: String,
    pub position: Position,
    pub size: Size,
    pub anchor: Anchor,
}

/// Counters for one refresh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub refresh_id: u64,
    pub visible: usize,
    /// Items that kept the slot they had in the previous refresh.
    pub reused: usize,
    /// Slots newly pushed onto the arena.
    pub allocated: usize,
    /// Slots returned to the free list.
    pub recycled: usize,
    pub highlights: usize,
}

#[derive(Debug, Default)]
struct Slot {
    item: RenderItem,
    refresh_id: u64,
}

/// Scroll window, render-item arena and selection highlights.
#[derive(Debug, Default)]
pub struct Viewport {
    scroll_y: f32,
    size: Size,
    overscan: f32,
    slots: Vec<Slot>,
    free: Vec<usize>,
    /// Box index -> slot index, ordered top to bottom.
    visible: BTreeMap<usize, usize>,
    highlights: Vec<Rect>,
    refresh_id: u64,
}

impl Viewport {
    pub fn new(overscan: f32) -> Self {
        Self {
            overscan: overscan.max(0.0),
            ..Self::default()
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = Size::new(size.width.max(0.0), size.height.max(0.0));
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Scroll to `offset_y`, limited so the window stays inside
    /// `content_height`. A NaN offset keeps the current one.
    ///
    /// # Returns
    /// The applied offset.
    pub fn scroll_to(&mut self, offset_y: f32, content_height: f32) -> f32 {
        let offset_y = if offset_y.is_nan() {
            self.scroll_y
        } else {
            offset_y
        };
        let max = (content_height - self.size.height).max(0.0);
        self.scroll_y = clamp(offset_y, 0.0, max);
        self.scroll_y
    }

    /// Indexes of the boxes intersecting the window, including overscan.
    pub fn visible_range(&self, boxes: &[LayoutBox]) -> Range<usize> {
        let top = self.scroll_y - self.overscan;
        let bottom = self.scroll_y + self.size.height + self.overscan;
        let start = boxes.partition_point(|layout_box| layout_box.rect().bottom() <= top);
        let end = boxes
            .partition_point(|layout_box| layout_box.rect().position.y < bottom)
            .max(start);
        start..end
    }

    /// Materialize the visible boxes and recompute selection highlights.
    ///
    /// `selection` may be given in either order.
    pub fn refresh<M: TextMeasure + ?Sized>(
        &mut self,
        boxes: &[LayoutBox],
        selection: (Anchor, Anchor),
        measurer: Measurer<'_, M>,
    ) -> FrameStats {
        self.refresh_id += 1;
        let refresh_id = self.refresh_id;
        let range = self.visible_range(boxes);
        let mut stats = FrameStats {
            refresh_id,
            visible: range.len(),
            ..FrameStats::default()
        };

        let mut next_visible = BTreeMap::new();
        for index in range.clone() {
            let slot = match self.visible.remove(&index) {
                Some(slot) => {
                    stats.reused += 1;
                    slot
                }
                None => self.free.pop().unwrap_or_else(|| {
                    stats.allocated += 1;
                    self.slots.push(Slot::default());
                    self.slots.len() - 1
                }),
            };
            let entry = &mut self.slots[slot];
            entry.refresh_id = refresh_id;
            match &boxes[index] {
                LayoutBox::Text(text) => {
                    entry.item.text.clear();
                    entry.item.text.push_str(&text.text);
                    entry.item.position = text.position;
                    entry.item.size = text.size;
                    entry.item.anchor = text.start;
                }
            }
            next_visible.insert(index, slot);
        }

        for (_, slot) in std::mem::replace(&mut self.visible, next_visible) {
            if self.slots[slot].refresh_id != refresh_id {
                self.free.push(slot);
                stats.recycled += 1;
            }
        }

        self.highlights.clear();
        let (start, end) = ordered(selection.0, selection.1);
        if start != end {
            for layout_box in &boxes[range] {
                let LayoutBox::Text(text) = layout_box;
                if text.end < start || text.start >= end {
                    continue;
                }
                let x1 = if start > text.start {
                    text.x_at(start, measurer)
                } else {
                    text.position.x
                };
                let x2 = if end < text.end {
                    text.x_at(end, measurer)
                } else {
                    text.rect().right()
                };
                if x2 > x1 {
                    self.highlights.push(Rect::new(
                        Position::new(x1, text.position.y),
                        Size::new(x2 - x1, text.size.height),
                    ));
                }
            }
        }
        stats.highlights = self.highlights.len();
        stats
    }

    /// Items from the last refresh, top to bottom.
    pub fn visible_items(&self) -> impl Iterator<Item = &RenderItem> + '_ {
        self.visible.values().map(|&slot| &self.slots[slot].item)
    }

    /// Selection rectangles from the last refresh.
    pub fn highlights(&self) -> &[Rect] {
        &self.highlights
    }

    pub fn refresh_id(&self) -> u64 {
        self.refresh_id
    }

    /// Number of slots ever allocated in the arena.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

/// Document anchor under `point` (content coordinates).
///
/// Points above the first box map to its start, points below the last box map
/// to its end; an empty layout yields the zero anchor.
pub fn point_to_anchor<M: TextMeasure + ?Sized>(
    boxes: &[LayoutBox],
    point: Position,
    measurer: Measurer<'_, M>,
) -> Anchor {
    let (Some(first), Some(last)) = (boxes.first(), boxes.last()) else {
        return Anchor::default();
    };
    if point.y < first.rect().position.y {
        return first.start();
    }
    if point.y >= last.rect().bottom() {
        return last.end();
    }
    let index = boxes.partition_point(|layout_box| layout_box.rect().bottom() <= point.y);
    match &boxes[index] {
        LayoutBox::Text(text) => text.anchor_at_x(point.x, measurer),
    }
}

/// Last box starting at or before `anchor`.
pub fn anchor_to_box(boxes: &[LayoutBox], anchor: Anchor) -> Option<&LayoutBox> {
    let index = boxes.partition_point(|layout_box| layout_box.start() <= anchor);
    index.checked_sub(1).map(|index| &boxes[index])
}
