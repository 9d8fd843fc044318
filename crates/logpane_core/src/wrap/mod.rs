//! Line wrapping driven by an explicit measurement function.
//!
//! Text is first split into segments at every LF, CR or CRLF. Each segment is
//! then cut into fragments whose measured width fits the requested width.
//! Fragment offsets are UTF-8 byte offsets into the original text, and end-of-
//! line markers never appear in fragment text.

use crate::alg::binary_search;
use crate::anchor::Anchor;
use crate::error::PaneError;
use icu_properties::props::{GeneralCategory, GeneralCategoryGroup};
use icu_properties::CodePointMapData;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How lines longer than the available width are broken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    /// Only end-of-line markers break text.
    Off,
    /// Break at the last character that fits.
    Break,
    /// Break at the last word boundary that fits, falling back to `Break`.
    #[default]
    Word,
}

impl WrapMode {
    /// Next mode in the `Off -> Word -> Off` word-wrap toggle.
    pub fn toggled_word(self) -> Self {
        match self {
            WrapMode::Word => WrapMode::Off,
            WrapMode::Off | WrapMode::Break => WrapMode::Word,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WrapMode::Off => "off",
            WrapMode::Break => "break",
            WrapMode::Word => "word",
        }
    }
}

impl fmt::Display for WrapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WrapMode {
    type Err = PaneError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(WrapMode::Off),
            "break" => Ok(WrapMode::Break),
            "word" => Ok(WrapMode::Word),
            _ => Err(PaneError::InvalidWrapMode(value.trim().to_string())),
        }
    }
}

/// One wrapped row of a document line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    /// Position of the first byte of `text` in the document.
    pub anchor: Anchor,
}

impl Fragment {
    /// Anchor just past the last byte of the fragment.
    pub fn end(&self) -> Anchor {
        self.anchor.offset_by(self.text.len())
    }
}

/// Split `text` at LF, CR and CRLF.
///
/// Each returned segment lists the byte offset of every character followed by
/// the segment's end offset, so a segment always has at least one entry. Empty
/// text yields one empty segment; a trailing end-of-line marker does not start
/// a new one.
pub(crate) fn segment_offsets(text: &str) -> Vec<Vec<usize>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((offset, ch)) = chars.next() {
        match ch {
            '\n' | '\r' => {
                current.push(offset);
                segments.push(std::mem::take(&mut current));
                if ch == '\r' && matches!(chars.peek(), Some((_, '\n'))) {
                    chars.next();
                }
            }
            _ => current.push(offset),
        }
    }
    if !current.is_empty() {
        current.push(text.len());
        segments.push(current);
    } else if segments.is_empty() {
        segments.push(vec![0]);
    }
    segments
}

pub(crate) fn is_space(ch: char) -> bool {
    ch.is_whitespace()
}

pub(crate) fn is_punct(ch: char) -> bool {
    let category = CodePointMapData::<GeneralCategory>::new().get(ch);
    GeneralCategoryGroup::Punctuation.contains(category)
}

/// Move a break at character index `fit` back to a word boundary.
///
/// `size` is the number of characters in the segment. Returns `(end, next)`:
/// the fragment ends before character `end` and the following fragment
/// starts at character `next`, with whitespace between them dropped. When no
/// boundary exists before `fit`, returns `(fit, fit)`.
pub(crate) fn trim_partial_word<F>(fit: usize, size: usize, mut char_at: F) -> (usize, usize)
where
    F: FnMut(usize) -> char,
{
    let mut trim = fit;
    let mut next = fit;
    let mut partial = true;
    if next == size || is_space(char_at(next)) {
        partial = false;
        if next < size {
            next += 1;
        }
        while next < size && is_space(char_at(next)) {
            next += 1;
        }
    }

    for i in (0..fit).rev() {
        let ch = char_at(i);
        if is_space(ch) {
            partial = false;
        } else if !partial || is_punct(ch) {
            return (trim, next);
        } else {
            next = i;
        }
        trim = i;
    }
    (fit, fit)
}

/// Wrap `text` to `width`, calling `emit(fragment, byte_offset)` for every row.
///
/// `measure` returns the rendered width of a string and must be
/// non-decreasing as a string grows. Width-driven rows always hold at least
/// one character, so any `width` terminates.
pub fn wrap_str<'a, M, E>(
    text: &'a str,
    width: f32,
    mode: WrapMode,
    mut measure: M,
    mut emit: E,
) where
    M: FnMut(&str) -> f32,
    E: FnMut(&'a str, usize),
{
    for segment in segment_offsets(text) {
        let mut offsets = segment.as_slice();
        if mode == WrapMode::Off || offsets.len() == 1 {
            let (first, last) = (offsets[0], offsets[offsets.len() - 1]);
            emit(&text[first..last], first);
            continue;
        }

        while offsets.len() > 1 {
            let start = offsets[0];
            let size = offsets.len() - 1;
            let (fit, _) = binary_search(size, width, |i| measure(&text[start..offsets[i]]));
            let fit = fit.max(1);
            let (end, next) = match mode {
                WrapMode::Word => {
                    trim_partial_word(fit, size, |i| char_starting_at(text, offsets[i]))
                }
                _ => (fit, fit),
            };
            emit(&text[start..offsets[end]], start);
            offsets = &offsets[next..];
        }
    }
}

fn char_starting_at(text: &str, offset: usize) -> char {
    text[offset..].chars().next().unwrap_or('\n')
}

/// Wrap one string into `(fragment, byte_offset)` rows.
pub fn wrap_line<M>(text: &str, width: f32, mode: WrapMode, measure: M) -> Vec<(&str, usize)>
where
    M: FnMut(&str) -> f32,
{
    let mut rows = Vec::new();
    wrap_str(text, width, mode, measure, |fragment, offset| {
        rows.push((fragment, offset))
    });
    rows
}

/// Wrap every line of a document in order.
pub fn wrap_document<M>(
    lines: &[String],
    width: f32,
    mode: WrapMode,
    mut measure: M,
) -> Vec<Fragment>
where
    M: FnMut(&str) -> f32,
{
    let mut fragments = Vec::with_capacity(lines.len());
    for (line_index, line) in lines.iter().enumerate() {
        wrap_str(line, width, mode, &mut measure, |text, offset| {
            fragments.push(Fragment {
                text: text.to_string(),
                anchor: Anchor::new(line_index, offset),
            });
        });
    }
    fragments
}

#[cfg(test)]
mod tests;
