//! Border glyph table and per-edge border configuration.

use super::color::ColorSpec;
use crate::layout::Edge;

/// The six glyphs needed to outline a rectangle.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BorderGlyphs {
    /// Top and bottom edges.
    pub horizontal: char,
    /// Left and right edges.
    pub vertical: char,
    /// Top-left corner.
    pub top_left: char,
    /// Top-right corner.
    pub top_right: char,
    /// Bottom-left corner.
    pub bottom_left: char,
    /// Bottom-right corner.
    pub bottom_right: char,
}

impl BorderGlyphs {
    const fn new(chars: [char; 6]) -> Self {
        let [horizontal, vertical, top_left, top_right, bottom_left, bottom_right] = chars;
        Self {
            horizontal,
            vertical,
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }
}

const SOLID: BorderGlyphs = BorderGlyphs::new(['─', '│', '┌', '┐', '└', '┘']);
const ROUND: BorderGlyphs = BorderGlyphs::new(['─', '│', '╭', '╮', '╰', '╯']);
const DOUBLE: BorderGlyphs = BorderGlyphs::new(['═', '║', '╔', '╗', '╚', '╝']);
const BOLD: BorderGlyphs = BorderGlyphs::new(['━', '┃', '┏', '┓', '┗', '┛']);
const DASHED: BorderGlyphs = BorderGlyphs::new(['╌', '╎', '┌', '┐', '└', '┘']);
const CLASSIC: BorderGlyphs = BorderGlyphs::new(['-', '|', '+', '+', '+', '+']);

/// Border style identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum BorderStyle {
    /// Light box-drawing lines.
    #[default]
    Solid,
    /// Light lines with rounded corners.
    Round,
    /// Double lines.
    Double,
    /// Heavy lines.
    Bold,
    /// Light dashed lines.
    Dashed,
    /// Plain ASCII.
    Classic,
}

impl BorderStyle {
    /// Look up a style keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let style = match keyword.to_ascii_lowercase().as_str() {
            "solid" | "single" => Self::Solid,
            "round" | "rounded" => Self::Round,
            "double" => Self::Double,
            "bold" | "heavy" => Self::Bold,
            "dashed" => Self::Dashed,
            "classic" | "ascii" => Self::Classic,
            _ => return None,
        };
        Some(style)
    }

    /// Glyph set for this style.
    pub const fn glyphs(self) -> &'static BorderGlyphs {
        match self {
            Self::Solid => &SOLID,
            Self::Round => &ROUND,
            Self::Double => &DOUBLE,
            Self::Bold => &BOLD,
            Self::Dashed => &DASHED,
            Self::Classic => &CLASSIC,
        }
    }
}

/// Border configuration of a single edge.
///
/// Terminal cells cannot render partial thickness, so `width` is 0 or 1.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct BorderSpec {
    width: u8,
    /// Glyph style of this edge.
    pub style: BorderStyle,
    /// Glyph color of this edge.
    pub color: Option<ColorSpec>,
}

impl BorderSpec {
    /// An enabled solid edge with no color.
    pub const fn solid() -> Self {
        Self {
            width: 1,
            style: BorderStyle::Solid,
            color: None,
        }
    }

    /// Builder: set the style.
    #[must_use]
    pub const fn with_style(mut self, style: BorderStyle) -> Self {
        self.style = style;
        self
    }

    /// Builder: set the color.
    #[must_use]
    pub fn with_color(mut self, color: ColorSpec) -> Self {
        self.color = Some(color);
        self
    }

    /// Edge width in cells (0 or 1).
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Set the width; any non-zero value enables the edge.
    pub fn set_width(&mut self, width: u32) {
        self.width = u8::from(width > 0);
    }

    /// Whether the edge is drawn.
    pub const fn is_enabled(&self) -> bool {
        self.width > 0
    }
}

/// Border configuration of all four edges.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Borders {
    /// Left edge.
    pub left: BorderSpec,
    /// Top edge.
    pub top: BorderSpec,
    /// Right edge.
    pub right: BorderSpec,
    /// Bottom edge.
    pub bottom: BorderSpec,
}

impl Borders {
    /// The same spec on all four edges.
    pub fn all(spec: &BorderSpec) -> Self {
        Self {
            left: spec.clone(),
            top: spec.clone(),
            right: spec.clone(),
            bottom: spec.clone(),
        }
    }

    /// Spec of one edge.
    pub const fn edge(&self, edge: Edge) -> &BorderSpec {
        match edge {
            Edge::Left => &self.left,
            Edge::Top => &self.top,
            Edge::Right => &self.right,
            Edge::Bottom => &self.bottom,
        }
    }

    /// Mutable spec of one edge.
    pub fn edge_mut(&mut self, edge: Edge) -> &mut BorderSpec {
        match edge {
            Edge::Left => &mut self.left,
            Edge::Top => &mut self.top,
            Edge::Right => &mut self.right,
            Edge::Bottom => &mut self.bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_style_defaults_to_solid() {
        assert_eq!(BorderStyle::from_keyword("wavy"), None);
        assert_eq!(BorderStyle::default().glyphs().top_left, '┌');
    }

    #[test]
    fn test_round_glyphs() {
        let glyphs = BorderStyle::from_keyword("ROUND").unwrap().glyphs();
        assert_eq!(glyphs.top_left, '╭');
        assert_eq!(glyphs.bottom_right, '╯');
        assert_eq!(glyphs.horizontal, '─');
    }

    #[test]
    fn test_edges_start_uncolored() {
        assert_eq!(BorderSpec::default().color, None);
        assert_eq!(BorderSpec::solid().color, None);
        assert_eq!(BorderSpec::default().style, BorderStyle::Solid);
        assert!(Borders::default().edge(Edge::Top).color.is_none());
    }

    #[test]
    fn test_width_is_boolean() {
        let mut spec = BorderSpec::default();
        assert!(!spec.is_enabled());
        spec.set_width(3);
        assert_eq!(spec.width(), 1);
        spec.set_width(0);
        assert!(!spec.is_enabled());
    }

    #[test]
    fn test_edge_access() {
        let mut borders = Borders::default();
        borders.edge_mut(Edge::Right).set_width(1);
        assert!(borders.right.is_enabled());
        assert!(!borders.edge(Edge::Left).is_enabled());
    }
}
