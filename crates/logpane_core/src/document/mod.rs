//! Bounded, versioned line store with bookmarks that survive eviction.
//!
//! All state sits behind one reader/writer lock. Readers borrow the lines for
//! the duration of a visitor; writers append, evict and move bookmarks as one
//! atomic step, so a reader never observes a bookmark pointing past the lines.

mod bookmark;
mod selection;

pub use bookmark::Bookmark;

use crate::anchor::{ordered, Anchor};
use crate::constants::DEFAULT_CAPACITY;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Thread-safe store of log lines.
///
/// `capacity == 0` means unbounded. The version increases on every append
/// batch and every capacity change; bookmark edits leave it untouched.
pub struct Document {
    inner: RwLock<Inner>,
}

struct Inner {
    lines: Vec<String>,
    version: u64,
    capacity: usize,
    bookmarks: HashMap<Bookmark, Anchor>,
}

impl Inner {
    fn end_anchor(&self) -> Anchor {
        match self.lines.last() {
            Some(line) => Anchor::new(self.lines.len() - 1, line.len()),
            None => Anchor::default(),
        }
    }

    fn resolve(&self, key: &Bookmark) -> Option<Anchor> {
        match key {
            Bookmark::Start => Some(Anchor::default()),
            Bookmark::End => Some(self.end_anchor()),
            other => self.bookmarks.get(other).copied(),
        }
    }

    /// Move `anchor` onto the nearest valid position at or before it.
    fn clamp(&self, anchor: Anchor) -> Anchor {
        let Some(last) = self.lines.len().checked_sub(1) else {
            return Anchor::default();
        };
        if anchor.line_index > last {
            return self.end_anchor();
        }
        let line = &self.lines[anchor.line_index];
        let mut offset = anchor.line_offset.min(line.len());
        while !line.is_char_boundary(offset) {
            offset -= 1;
        }
        Anchor::new(anchor.line_index, offset)
    }

    fn store(&mut self, key: Bookmark, anchor: Anchor) {
        assert!(
            !key.is_reserved(),
            "document: bookmark {} is computed and cannot be set",
            key
        );
        let anchor = self.clamp(anchor);
        self.bookmarks.insert(key, anchor);
    }

    fn forget(&mut self, key: &Bookmark) {
        assert!(
            !key.is_reserved(),
            "document: bookmark {} is computed and cannot be removed",
            key
        );
        self.bookmarks.remove(key);
    }

    fn enforce_capacity(&mut self) {
        if self.capacity == 0 || self.lines.len() <= self.capacity {
            return;
        }
        let evicted = self.lines.len() - self.capacity;
        self.lines.drain(..evicted);
        for anchor in self.bookmarks.values_mut() {
            *anchor = if anchor.line_index >= evicted {
                Anchor::new(anchor.line_index - evicted, anchor.line_offset)
            } else {
                Anchor::default()
            };
        }
        debug!(
            evicted,
            remaining = self.lines.len(),
            version = self.version,
            "document evicted oldest lines"
        );
    }

    fn text_between(&self, a: Anchor, b: Anchor, separator: &str) -> String {
        let (start, end) = ordered(a, b);
        if self.lines.is_empty() {
            return String::new();
        }
        let line_at = |index: usize| self.lines.get(index).map(String::as_str).unwrap_or("");
        if start.line_index == end.line_index {
            let line = line_at(start.line_index);
            return line.get(start.line_offset..end.line_offset).unwrap_or("").to_string();
        }

        let mut out = String::new();
        out.push_str(line_at(start.line_index).get(start.line_offset..).unwrap_or(""));
        for index in start.line_index + 1..end.line_index {
            out.push_str(separator);
            out.push_str(line_at(index));
        }
        out.push_str(separator);
        out.push_str(line_at(end.line_index).get(..end.line_offset).unwrap_or(""));
        out
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("Document")
            .field("lines", &inner.lines.len())
            .field("version", &inner.version)
            .field("capacity", &inner.capacity)
            .field("bookmarks", &inner.bookmarks.len())
            .finish()
    }
}

impl Document {
    /// Create an empty document holding at most [`DEFAULT_CAPACITY`] lines.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty document; `capacity == 0` disables eviction.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                lines: Vec::new(),
                version: 0,
                capacity,
                bookmarks: HashMap::new(),
            }),
        }
    }

    /// Run `visitor` against the current lines under the shared lock.
    ///
    /// The visitor must not call back into this document; the lock is not
    /// reentrant.
    pub fn read<R>(&self, visitor: impl FnOnce(&[String]) -> R) -> R {
        let inner = self.inner.read();
        visitor(&inner.lines)
    }

    /// Append `lines` as one batch, then evict down to capacity.
    ///
    /// An empty batch changes nothing, including the version.
    pub fn add<I>(&self, lines: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let batch: Vec<String> = lines.into_iter().map(Into::into).collect();
        if batch.is_empty() {
            return;
        }
        let mut inner = self.inner.write();
        inner.lines.extend(batch);
        inner.version += 1;
        inner.enforce_capacity();
    }

    /// Append a single line.
    pub fn push(&self, line: impl Into<String>) {
        self.add(std::iter::once(line.into()));
    }

    /// Current version; strictly increases with every append and capacity change.
    pub fn version(&self) -> u64 {
        self.inner.read().version
    }

    /// Maximum number of lines kept; `0` means unbounded.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity
    }

    /// Change the capacity, evicting from the front immediately when it shrinks.
    pub fn set_capacity(&self, capacity: usize) {
        let mut inner = self.inner.write();
        inner.capacity = capacity;
        inner.version += 1;
        inner.enforce_capacity();
    }

    /// Number of stored lines.
    pub fn len(&self) -> usize {
        self.inner.read().lines.len()
    }

    /// Returns `true` when no lines are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.read().lines.is_empty()
    }

    /// Resolve a bookmark. `Start` and `End` always resolve.
    pub fn get_bookmark(&self, key: &Bookmark) -> Option<Anchor> {
        self.inner.read().resolve(key)
    }

    /// Store `anchor` under `key`, clamped to a valid position.
    ///
    /// # Panics
    /// Panics if `key` is `Start` or `End`.
    pub fn set_bookmark(&self, key: Bookmark, anchor: Anchor) {
        self.inner.write().store(key, anchor);
    }

    /// Remove `key`; absent keys are ignored.
    ///
    /// # Panics
    /// Panics if `key` is `Start` or `End`.
    pub fn remove_bookmark(&self, key: &Bookmark) {
        self.inner.write().forget(key);
    }

    /// Text between two bookmarks in document order, with crossed line breaks
    /// replaced by `separator`.
    ///
    /// # Returns
    /// `None` if either key is not set.
    pub fn string(&self, a: &Bookmark, b: &Bookmark, separator: &str) -> Option<String> {
        let inner = self.inner.read();
        let a = inner.resolve(a)?;
        let b = inner.resolve(b)?;
        Some(inner.text_between(a, b, separator))
    }

    /// Text between two arbitrary anchors, clamped to the current lines.
    pub fn text_between(&self, a: Anchor, b: Anchor, separator: &str) -> String {
        let inner = self.inner.read();
        let (a, b) = (inner.clamp(a), inner.clamp(b));
        inner.text_between(a, b, separator)
    }

    /// Clamp `anchor` to the nearest valid position in the current lines.
    pub fn clamp_anchor(&self, anchor: Anchor) -> Anchor {
        self.inner.read().clamp(anchor)
    }
}
