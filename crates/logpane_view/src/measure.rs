//! Text measurement seam between the layout engine and the host renderer.

use crate::geometry::Size;
use serde::Deserialize;

/// Font style flags forwarded to the measurement callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub monospace: bool,
}

/// Measures rendered text.
///
/// Implementations must be deterministic for a given `(text, size, style)` and
/// the returned width must not shrink as `text` grows; wrapping and hit
/// testing binary search over prefix widths.
pub trait TextMeasure {
    fn measure(&self, text: &str, size: f32, style: TextStyle) -> Size;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, f32, TextStyle) -> Size,
{
    fn measure(&self, text: &str, size: f32, style: TextStyle) -> Size {
        self(text, size, style)
    }
}

/// A measure bound to one text size and style.
pub struct Measurer<'a, M: TextMeasure + ?Sized> {
    measure: &'a M,
    size: f32,
    style: TextStyle,
}

impl<M: TextMeasure + ?Sized> Clone for Measurer<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: TextMeasure + ?Sized> Copy for Measurer<'_, M> {}

impl<'a, M: TextMeasure + ?Sized> Measurer<'a, M> {
    pub fn new(measure: &'a M, size: f32, style: TextStyle) -> Self {
        Self {
            measure,
            size,
            style,
        }
    }

    pub fn width(&self, text: &str) -> f32 {
        self.measure.measure(text, self.size, self.style).width
    }

    /// Height of one text row, floored to whole pixels.
    pub fn line_height(&self) -> f32 {
        self.measure.measure("", self.size, self.style).height.floor()
    }
}

/// Fixed-advance measurement: every character is `size * advance_em` wide and
/// every line `size * line_height_em` tall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasure {
    pub advance_em: f32,
    pub line_height_em: f32,
}

impl MonospaceMeasure {
    pub const fn new(advance_em: f32, line_height_em: f32) -> Self {
        Self {
            advance_em,
            line_height_em,
        }
    }
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self::new(0.6, 1.25)
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, text: &str, size: f32, _style: TextStyle) -> Size {
        Size::new(
            text.chars().count() as f32 * size * self.advance_em,
            size * self.line_height_em,
        )
    }
}
