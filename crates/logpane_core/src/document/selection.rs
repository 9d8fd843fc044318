//! Selection helpers stored as the `SelectionStart`/`SelectionEnd` bookmarks.

use super::{Bookmark, Document};
use crate::anchor::{ordered, Anchor};

impl Document {
    /// Current selection as `(start, end)` in document order.
    ///
    /// Without a stored selection both ends are the zero anchor.
    pub fn selection(&self) -> (Anchor, Anchor) {
        let inner = self.inner.read();
        let start = inner.resolve(&Bookmark::SelectionStart);
        let end = inner.resolve(&Bookmark::SelectionEnd);
        match (start, end) {
            (Some(start), Some(end)) => ordered(start, end),
            (Some(only), None) | (None, Some(only)) => (only, only),
            (None, None) => (Anchor::default(), Anchor::default()),
        }
    }

    /// Returns `true` when the selection covers at least one byte.
    pub fn has_selection(&self) -> bool {
        let (start, end) = self.selection();
        start != end
    }

    /// Collapse the selection onto `anchor`.
    pub fn start_selection(&self, anchor: Anchor) {
        let mut inner = self.inner.write();
        inner.store(Bookmark::SelectionStart, anchor);
        inner.store(Bookmark::SelectionEnd, anchor);
    }

    /// Move the selection end to `anchor`, starting a selection there if none exists.
    pub fn extend_selection(&self, anchor: Anchor) {
        let mut inner = self.inner.write();
        if inner.resolve(&Bookmark::SelectionStart).is_none() {
            inner.store(Bookmark::SelectionStart, anchor);
        }
        inner.store(Bookmark::SelectionEnd, anchor);
    }

    /// Drop the selection bookmarks.
    pub fn select_none(&self) {
        let mut inner = self.inner.write();
        inner.forget(&Bookmark::SelectionStart);
        inner.forget(&Bookmark::SelectionEnd);
    }

    /// Select from `Start` to `End`.
    pub fn select_all(&self) {
        let mut inner = self.inner.write();
        let end = inner.end_anchor();
        inner.store(Bookmark::SelectionStart, Anchor::default());
        inner.store(Bookmark::SelectionEnd, end);
    }

    /// Selected text with line breaks replaced by `separator`; empty without a selection.
    pub fn selection_text(&self, separator: &str) -> String {
        self.string(&Bookmark::SelectionStart, &Bookmark::SelectionEnd, separator)
            .unwrap_or_default()
    }
}
