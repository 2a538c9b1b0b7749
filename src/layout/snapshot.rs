//! `LayoutSnapshot`: the per-node result of a layout pass.

use super::rect::{Insets, Rect};

/// Geometry of one node as computed by the layout engine.
///
/// `left`/`top` are relative to the parent's content box (for the root: to
/// the canvas origin). `width`/`height` describe the border box. All values
/// are in cells; the compositor treats non-finite or negative values as zero.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct LayoutSnapshot {
    /// Column offset of the border box.
    pub left: f32,
    /// Row offset of the border box.
    pub top: f32,
    /// Border-box width.
    pub width: f32,
    /// Border-box height.
    pub height: f32,
    /// Computed margin extents.
    pub margin: Insets<f32>,
    /// Computed padding extents.
    pub padding: Insets<f32>,
    /// Computed border extents.
    pub border: Insets<f32>,
}

impl LayoutSnapshot {
    /// A snapshot with the given border box and no box-model extents.
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
            ..Self::default()
        }
    }

    /// Builder: set margin extents.
    #[must_use]
    pub const fn with_margin(mut self, margin: Insets<f32>) -> Self {
        self.margin = margin;
        self
    }

    /// Builder: set padding extents.
    #[must_use]
    pub const fn with_padding(mut self, padding: Insets<f32>) -> Self {
        self.padding = padding;
        self
    }

    /// Builder: set border extents.
    #[must_use]
    pub const fn with_border(mut self, border: Insets<f32>) -> Self {
        self.border = border;
        self
    }

    /// Border box placed at `origin`, clamped to whole non-negative cells.
    pub fn border_box(&self, origin: (i32, i32)) -> Rect {
        Rect::new(
            origin.0.saturating_add(to_offset(self.left)),
            origin.1.saturating_add(to_offset(self.top)),
            to_extent(self.width),
            to_extent(self.height),
        )
    }
}

/// Round a coordinate to whole cells; non-finite values become 0.
pub fn to_offset(value: f32) -> i32 {
    if value.is_finite() {
        // saturating float-to-int cast
        #[allow(clippy::cast_possible_truncation)]
        let cells = value.round() as i32;
        cells
    } else {
        0
    }
}

/// Round a size to whole cells; negative or non-finite values become 0.
pub fn to_extent(value: f32) -> i32 {
    to_offset(value).max(0)
}

/// Clamp every edge of `insets` with [`to_extent`].
pub fn to_extents(insets: Insets<f32>) -> Insets<i32> {
    insets.map(to_extent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_clamps_to_zero() {
        assert_eq!(to_extent(f32::NAN), 0);
        assert_eq!(to_extent(f32::INFINITY), 0);
        assert_eq!(to_extent(-4.0), 0);
        assert_eq!(to_offset(-4.0), -4);
        assert_eq!(to_extent(2.6), 3);
    }

    #[test]
    fn test_border_box_offsets_origin() {
        let snapshot = LayoutSnapshot::new(2.0, 1.0, 5.0, -1.0);
        let rect = snapshot.border_box((10, 10));
        assert_eq!(rect, Rect::new(12, 11, 5, 0));
    }
}
