//! Plain 2D geometry in logical pixels.
//!
//! Positions are in content coordinates: `y == 0` is the top of the scrollable
//! content, not the top of the visible window.

/// A point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub position: Position,
    pub size: Size,
}

impl Rect {
    pub const fn new(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.height
    }

    /// Returns `true` when the rectangle overlaps the half-open band `[top, bottom)`.
    pub fn intersects_band(&self, top: f32, bottom: f32) -> bool {
        self.position.y < bottom && self.bottom() > top
    }
}
