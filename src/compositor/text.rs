//! Text layout: character wrapping of a text run inside a content box.
//!
//! A glyph is one extended grapheme cluster and always takes one cell.
//! Text fills the box left to right, wraps at the right edge and stops at
//! the bottom edge; whatever does not fit is dropped.

use unicode_segmentation::UnicodeSegmentation;

use crate::layout::Rect;

/// Number of glyphs (grapheme clusters) in `text`.
pub fn glyph_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Rows needed to wrap `glyphs` glyphs at `width` columns.
pub const fn wrapped_rows(glyphs: usize, width: usize) -> usize {
    if width == 0 {
        0
    } else {
        glyphs.div_ceil(width)
    }
}

/// A glyph and the cell it lands on.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PlacedGlyph<'a> {
    /// Canvas row.
    pub row: i32,
    /// Canvas column.
    pub col: i32,
    /// The grapheme cluster.
    pub glyph: &'a str,
}

/// Place the glyphs of `text` inside `content`, row-major, dropping the
/// overflow.
pub fn place_text(text: &str, content: Rect) -> impl Iterator<Item = PlacedGlyph<'_>> {
    let width = usize::try_from(content.width).unwrap_or(0);
    let height = usize::try_from(content.height).unwrap_or(0);
    let capacity = width.saturating_mul(height);
    text.graphemes(true)
        .take(capacity)
        .enumerate()
        .map(move |(i, glyph)| {
            // i < width * height, and both fit in i32
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let (row, col) = ((i / width) as i32, (i % width) as i32);
            PlacedGlyph {
                row: content.y.saturating_add(row),
                col: content.x.saturating_add(col),
                glyph,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(text: &str, content: Rect) -> Vec<(i32, i32, &str)> {
        place_text(text, content).map(|p| (p.row, p.col, p.glyph)).collect()
    }

    #[test]
    fn test_wraps_at_right_edge() {
        let placed = positions("abcde", Rect::new(2, 1, 2, 5));
        assert_eq!(
            placed,
            vec![(1, 2, "a"), (1, 3, "b"), (2, 2, "c"), (2, 3, "d"), (3, 2, "e")]
        );
    }

    #[test]
    fn test_drops_overflow() {
        let placed = positions("abcdefgh", Rect::new(0, 0, 3, 2));
        assert_eq!(placed.len(), 6);
        assert_eq!(placed.last(), Some(&(1, 2, "f")));
    }

    #[test]
    fn test_empty_box_places_nothing() {
        assert!(positions("abc", Rect::new(0, 0, 0, 4)).is_empty());
        assert!(positions("abc", Rect::new(0, 0, 4, 0)).is_empty());
    }

    #[test]
    fn test_graphemes_take_one_cell() {
        let placed = positions("e\u{301}x", Rect::new(0, 0, 5, 1));
        assert_eq!(placed, vec![(0, 0, "e\u{301}"), (0, 1, "x")]);
        assert_eq!(glyph_count("e\u{301}x"), 2);
    }

    #[test]
    fn test_wrapped_rows() {
        assert_eq!(wrapped_rows(10, 4), 3);
        assert_eq!(wrapped_rows(8, 4), 2);
        assert_eq!(wrapped_rows(0, 4), 0);
        assert_eq!(wrapped_rows(5, 0), 0);
    }
}
