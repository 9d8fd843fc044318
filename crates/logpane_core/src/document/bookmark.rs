//! Bookmark keys.

use std::fmt;

/// Key into a document's bookmark table.
///
/// `Start` and `End` are reserved: they are computed from the current lines on
/// every lookup and can never be stored or removed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Bookmark {
    Start,
    End,
    SelectionStart,
    SelectionEnd,
    Named(String),
}

impl Bookmark {
    /// Convenience constructor for a caller-defined key.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Returns `true` for the computed keys `Start` and `End`.
    pub fn is_reserved(&self) -> bool {
        matches!(self, Self::Start | Self::End)
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
            Self::SelectionStart => f.write_str("selection-start"),
            Self::SelectionEnd => f.write_str("selection-end"),
            Self::Named(name) => write!(f, "named:{}", name),
        }
    }
}
