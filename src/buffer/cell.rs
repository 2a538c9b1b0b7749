//! Cell: one styled glyph of the canvas.
//!
//! # Memory Layout
//!
//! A cell stores its grapheme inline, so a canvas is a single flat
//! allocation with no per-cell heap data:
//!
//! ```text
//! ┌──────────────┬──────────┬────────────────┬────────────────┐
//! │  grapheme    │  len     │  fg            │  bg            │
//! │  [u8; 4]     │  u8      │  Option<Color> │  Option<Color> │
//! └──────────────┴──────────┴────────────────┴────────────────┘
//! ```
//!
//! Graphemes longer than four UTF-8 bytes (ZWJ emoji sequences and the like)
//! keep only their first `char`.

use crate::style::{Color, ColorSpec};

/// A single canvas cell: glyph plus optional foreground and background.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Inline grapheme storage (UTF-8 bytes).
    grapheme: [u8; 4],
    /// Byte length of the grapheme (1-4).
    grapheme_len: u8,
    /// Foreground color; `None` is the terminal default.
    fg: Option<Color>,
    /// Background color; `None` is the terminal default.
    bg: Option<Color>,
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

impl Cell {
    /// An unstyled space.
    pub const BLANK: Self = Self {
        grapheme: [b' ', 0, 0, 0],
        grapheme_len: 1,
        fg: None,
        bg: None,
    };

    /// Create an unstyled cell from a character. Control characters become
    /// a space.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_char(c: char) -> Self {
        if c.is_control() {
            return Self::BLANK;
        }
        let mut grapheme = [0u8; 4];
        let len = c.encode_utf8(&mut grapheme).len();
        Self {
            grapheme,
            grapheme_len: len as u8,
            fg: None,
            bg: None,
        }
    }

    /// Create an unstyled cell from a grapheme cluster.
    ///
    /// Clusters that do not fit inline keep their first `char`; an empty
    /// string yields a blank.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_grapheme(s: &str) -> Self {
        let bytes = s.as_bytes();
        match s.chars().next() {
            None => Self::BLANK,
            Some(first) if bytes.len() > 4 || first.is_control() => Self::from_char(first),
            Some(_) => {
                let mut grapheme = [0u8; 4];
                grapheme[..bytes.len()].copy_from_slice(bytes);
                Self {
                    grapheme,
                    grapheme_len: bytes.len() as u8,
                    fg: None,
                    bg: None,
                }
            }
        }
    }

    /// Create a cell styled with resolved color specs. Unresolved specs
    /// paint as nothing.
    #[inline]
    pub fn paint(glyph: char, fg: Option<&ColorSpec>, bg: Option<&ColorSpec>) -> Self {
        Self::from_char(glyph)
            .with_fg(fg.and_then(ColorSpec::paint))
            .with_bg(bg.and_then(ColorSpec::paint))
    }

    /// Get the grapheme as a string slice.
    #[inline]
    pub fn grapheme(&self) -> &str {
        std::str::from_utf8(&self.grapheme[..usize::from(self.grapheme_len)]).unwrap_or(" ")
    }

    /// Get the foreground color.
    #[inline]
    pub const fn fg(&self) -> Option<Color> {
        self.fg
    }

    /// Get the background color.
    #[inline]
    pub const fn bg(&self) -> Option<Color> {
        self.bg
    }

    /// Whether the cell carries any color.
    #[inline]
    pub const fn is_styled(&self) -> bool {
        self.fg.is_some() || self.bg.is_some()
    }

    /// Set the foreground color.
    #[inline]
    pub const fn set_fg(&mut self, fg: Option<Color>) -> &mut Self {
        self.fg = fg;
        self
    }

    /// Set the background color.
    #[inline]
    pub const fn set_bg(&mut self, bg: Option<Color>) -> &mut Self {
        self.bg = bg;
        self
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Option<Color>) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Option<Color>) -> Self {
        self.bg = bg;
        self
    }

    /// Reset the cell to an unstyled space.
    #[inline]
    pub const fn reset(&mut self) {
        *self = Self::BLANK;
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("grapheme", &self.grapheme())
            .field("fg", &self.fg)
            .field("bg", &self.bg)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{NamedColor, Rgb};

    #[test]
    fn test_blank_is_unstyled_space() {
        assert_eq!(Cell::BLANK.grapheme(), " ");
        assert!(!Cell::BLANK.is_styled());
        assert_eq!(Cell::default(), Cell::BLANK);
    }

    #[test]
    fn test_cell_from_char_unicode() {
        let cell = Cell::from_char('┌');
        assert_eq!(cell.grapheme(), "┌");
    }

    #[test]
    fn test_control_chars_become_blank() {
        assert_eq!(Cell::from_char('\n'), Cell::BLANK);
        assert_eq!(Cell::from_grapheme("\t"), Cell::BLANK);
        assert_eq!(Cell::from_grapheme("\r\n"), Cell::BLANK);
    }

    #[test]
    fn test_cell_from_grapheme_fits() {
        let cell = Cell::from_grapheme("é");
        assert_eq!(cell.grapheme(), "é");
    }

    #[test]
    fn test_cell_from_grapheme_overflow_keeps_first_char() {
        let cell = Cell::from_grapheme("👨‍👩‍👧");
        assert_eq!(cell.grapheme(), "👨");
        assert_eq!(Cell::from_grapheme(""), Cell::BLANK);
    }

    #[test]
    fn test_paint_resolves_colors() {
        let red = ColorSpec::resolve("red");
        let bogus = ColorSpec::resolve("bogus");
        let hex = ColorSpec::resolve("#010203");

        let cell = Cell::paint('x', Some(&red), Some(&hex));
        assert_eq!(cell.fg(), Some(Color::Named(NamedColor::Red)));
        assert_eq!(cell.bg(), Some(Color::Rgb(Rgb::new(1, 2, 3))));

        // unresolved colors paint as nothing
        assert_eq!(Cell::paint('x', Some(&bogus), None), Cell::from_char('x'));
    }

    #[test]
    fn test_cell_reset() {
        let mut cell = Cell::from_char('X').with_fg(Some(Color::Named(NamedColor::Blue)));
        cell.reset();
        assert_eq!(cell, Cell::BLANK);
    }
}
