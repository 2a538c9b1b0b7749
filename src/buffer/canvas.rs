//! Canvas: a fixed-size grid of cells for one rendered frame.
//!
//! Cells are stored in row-major order in one contiguous `Vec`. Coordinates
//! are signed so callers can address cells off the grid; every write is
//! bounds-checked and out-of-range writes are silently dropped.

use super::cell::Cell;
use crate::layout::Rect;
use crate::style::ColorMode;

/// A grid of cells, `rows` × `columns`.
///
/// Access is in row-major order: `index = row * columns + col`. A canvas
/// may have zero rows or columns; it then holds no cells and every write
/// is clipped.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    rows: usize,
    columns: usize,
}

impl Canvas {
    /// Create a canvas with every cell set to `fill`.
    pub fn new(rows: usize, columns: usize, fill: Cell) -> Self {
        Self {
            cells: vec![fill; rows.saturating_mul(columns)],
            rows,
            columns,
        }
    }

    /// Create a canvas of unstyled blanks.
    pub fn blank(rows: usize, columns: usize) -> Self {
        Self::new(rows, columns, Cell::BLANK)
    }

    /// Number of rows.
    #[inline]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// The whole canvas as a rectangle at the origin.
    pub fn bounds(&self) -> Rect {
        let clamp = |v: usize| i32::try_from(v).unwrap_or(i32::MAX);
        Rect::new(0, 0, clamp(self.columns), clamp(self.rows))
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the canvas has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert (row, col) to a linear index, or `None` if off the grid.
    #[inline]
    pub fn index_of(&self, row: i32, col: i32) -> Option<usize> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < self.rows && col < self.columns).then(|| row * self.columns + col)
    }

    /// Cell at (row, col).
    #[inline]
    pub fn get(&self, row: i32, col: i32) -> Option<&Cell> {
        self.index_of(row, col).map(|i| &self.cells[i])
    }

    /// Mutable cell at (row, col).
    #[inline]
    pub fn get_mut(&mut self, row: i32, col: i32) -> Option<&mut Cell> {
        self.index_of(row, col).map(|i| &mut self.cells[i])
    }

    /// Set the cell at (row, col).
    ///
    /// Returns `false` if the coordinates are off the grid.
    #[inline]
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(row, col) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Fill the on-grid part of `rect` with `cell`.
    pub fn fill_rect(&mut self, rect: Rect, cell: Cell) {
        let Some(clip) = self.clip(rect) else {
            return;
        };
        for row in clip.rows {
            let start = row * self.columns;
            self.cells[start + clip.cols.start..start + clip.cols.end].fill(cell);
        }
    }

    /// Intersect `rect` with the grid as index ranges.
    fn clip(&self, rect: Rect) -> Option<ClipRange> {
        let to_index = |v: i32, max: usize| usize::try_from(v.max(0)).map_or(max, |v| v.min(max));
        let rows = to_index(rect.y, self.rows)..to_index(rect.bottom(), self.rows);
        let cols = to_index(rect.x, self.columns)..to_index(rect.right(), self.columns);
        (!rows.is_empty() && !cols.is_empty()).then_some(ClipRange { rows, cols })
    }

    /// Reset every cell to `fill`.
    pub fn clear(&mut self, fill: Cell) {
        self.cells.fill(fill);
    }

    /// Iterate over rows.
    pub fn row_slices(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks(0) panics; a zero-column canvas still has `rows` empty rows
        let width = self.columns.max(1);
        let empty: &[Cell] = &[];
        let rows = self.rows;
        self.cells
            .chunks(width)
            .chain(std::iter::repeat(empty))
            .take(rows)
    }

    /// One unstyled string per row, cells concatenated in column order.
    pub fn lines(&self) -> Vec<String> {
        crate::terminal::serialize_plain(self)
    }

    /// One styled string per row for the given color mode.
    pub fn serialize(&self, mode: ColorMode) -> Vec<String> {
        crate::terminal::serialize(self, mode)
    }
}

struct ClipRange {
    rows: std::ops::Range<usize>,
    cols: std::ops::Range<usize>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("rows", &self.rows)
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, line) in self.lines().iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}
