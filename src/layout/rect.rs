//! Rect: cell-grid geometry for painting.
//!
//! Coordinates are signed: a box may be laid out partly or fully off the
//! canvas, and clipping happens only when cells are written.

/// One side of a box.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Edge {
    /// Left side.
    Left,
    /// Top side.
    Top,
    /// Right side.
    Right,
    /// Bottom side.
    Bottom,
}

impl Edge {
    /// All edges in scan order (left, top, right, bottom).
    pub const ALL: [Self; 4] = [Self::Left, Self::Top, Self::Right, Self::Bottom];
}

/// Per-edge extents (margin, padding or border widths).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Insets<T> {
    /// Left extent.
    pub left: T,
    /// Top extent.
    pub top: T,
    /// Right extent.
    pub right: T,
    /// Bottom extent.
    pub bottom: T,
}

impl<T> Insets<T> {
    /// Borrow the extent of one edge.
    pub const fn edge_ref(&self, edge: Edge) -> &T {
        match edge {
            Edge::Left => &self.left,
            Edge::Top => &self.top,
            Edge::Right => &self.right,
            Edge::Bottom => &self.bottom,
        }
    }
}

impl<T: Copy> Insets<T> {
    /// The same extent on every edge.
    pub const fn uniform(value: T) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    /// Extent of one edge.
    pub const fn get(&self, edge: Edge) -> T {
        match edge {
            Edge::Left => self.left,
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
        }
    }

    /// Set the extent of one edge.
    pub fn set(&mut self, edge: Edge, value: T) {
        match edge {
            Edge::Left => self.left = value,
            Edge::Top => self.top = value,
            Edge::Right => self.right = value,
            Edge::Bottom => self.bottom = value,
        }
    }

    /// Apply `f` to every edge.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Insets<U> {
        Insets {
            left: f(self.left),
            top: f(self.top),
            right: f(self.right),
            bottom: f(self.bottom),
        }
    }
}

/// A rectangle defined by position and size, in cells.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Column of the top-left corner.
    pub x: i32,
    /// Row of the top-left corner.
    pub y: i32,
    /// Width in columns (never negative).
    pub width: i32,
    /// Height in rows (never negative).
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle; negative sizes clamp to zero.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    /// Zero-sized rectangle.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Get the area (number of cells).
    #[inline]
    pub const fn area(&self) -> i64 {
        (self.width as i64) * (self.height as i64)
    }

    /// Check if the rectangle is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Get the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Check if a cell is inside the rectangle.
    #[inline]
    pub const fn contains(&self, row: i32, col: i32) -> bool {
        col >= self.x && col < self.right() && row >= self.y && row < self.bottom()
    }

    /// Shrink by per-edge extents; collapses to an empty rect at the inner origin.
    #[inline]
    #[must_use]
    pub fn inset(&self, by: Insets<i32>) -> Self {
        let x = self.x.saturating_add(by.left);
        let y = self.y.saturating_add(by.top);
        Self::new(
            x,
            y,
            self.width.saturating_sub(by.left).saturating_sub(by.right),
            self.height.saturating_sub(by.top).saturating_sub(by.bottom),
        )
    }

    /// Grow by per-edge extents.
    #[inline]
    #[must_use]
    pub fn outset(&self, by: Insets<i32>) -> Self {
        Self::new(
            self.x.saturating_sub(by.left),
            self.y.saturating_sub(by.top),
            self.width.saturating_add(by.left).saturating_add(by.right),
            self.height.saturating_add(by.top).saturating_add(by.bottom),
        )
    }

    /// The overlap of two rectangles; empty if they do not meet.
    #[inline]
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Self::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
    }

    /// Iterate over every `(row, col)` in the rectangle, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let (x, right) = (self.x, self.right());
        (self.y..self.bottom()).flat_map(move |row| (x..right).map(move |col| (row, col)))
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}
