//! The paint pass: walk the box tree depth first and write every node's
//! margin, border, background and text into a [`Canvas`].
//!
//! Each node is painted in five steps, parent before children:
//!
//! 1. resolve the border box from the layout snapshot and the parent's
//!    content origin,
//! 2. blank the margin ring,
//! 3. draw the border ring,
//! 4. fill the interior with the background color,
//! 5. lay out text (text runs only),
//!
//! then every child is painted at this node's content origin. Children are
//! never clipped to their parent; only the canvas bounds clip.

use bitflags::bitflags;
use log::{debug, trace};

use super::text::place_text;
use crate::buffer::{Canvas, Cell};
use crate::layout::{to_extents, Edge, Insets, Rect};
use crate::style::{BorderSpec, Borders, ColorSpec};
use crate::tree::{BoxNode, BoxTree, NodeId, NodeKind, TreeError};

bitflags! {
    /// Set of border edges meeting at one cell.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    struct Edges: u8 {
        const LEFT = 0b0001;
        const TOP = 0b0010;
        const RIGHT = 0b0100;
        const BOTTOM = 0b1000;
    }
}

impl Edges {
    const fn of(edge: Edge) -> Self {
        match edge {
            Edge::Left => Self::LEFT,
            Edge::Top => Self::TOP,
            Edge::Right => Self::RIGHT,
            Edge::Bottom => Self::BOTTOM,
        }
    }

    fn enabled(borders: &Borders) -> Self {
        Edge::ALL
            .into_iter()
            .filter(|&edge| borders.edge(edge).is_enabled())
            .fold(Self::empty(), |acc, edge| acc | Self::of(edge))
    }

    /// Edges of `rect` that pass through (row, col).
    fn at(rect: Rect, row: i32, col: i32) -> Self {
        let mut here = Self::empty();
        here.set(Self::LEFT, col == rect.x);
        here.set(Self::TOP, row == rect.y);
        here.set(Self::RIGHT, col == rect.right() - 1);
        here.set(Self::BOTTOM, row == rect.bottom() - 1);
        here
    }

    /// The first edge in scan order; it hosts the glyph drawn here.
    fn host(self) -> Option<Edge> {
        Edge::ALL.into_iter().find(|&edge| self.contains(Self::of(edge)))
    }
}

/// Paint the tree at `root` onto a fresh `rows` × `columns` canvas.
///
/// # Errors
///
/// Fails only if `root` is not a node of `tree`.
pub fn paint(tree: &BoxTree, root: NodeId, rows: usize, columns: usize) -> Result<Canvas, TreeError> {
    let mut canvas = Canvas::blank(rows, columns);
    paint_into(tree, root, &mut canvas)?;
    Ok(canvas)
}

/// Reset `canvas` to blanks and paint the tree at `root` onto it.
///
/// # Errors
///
/// Fails only if `root` is not a node of `tree`.
pub fn paint_into(tree: &BoxTree, root: NodeId, canvas: &mut Canvas) -> Result<(), TreeError> {
    tree.node(root)?;
    canvas.clear(Cell::BLANK);
    let painted = paint_node(tree, root, (0, 0), canvas);
    debug!(
        "painted {painted} nodes onto {}x{} canvas",
        canvas.columns(),
        canvas.rows()
    );
    Ok(())
}

/// Paint one node and its subtree; returns the number of nodes visited.
fn paint_node(tree: &BoxTree, id: NodeId, origin: (i32, i32), canvas: &mut Canvas) -> usize {
    let Some(node) = tree.get(id) else {
        return 0;
    };
    if matches!(node.kind, NodeKind::Comment(_)) || node.style.flex.hidden {
        return 0;
    }

    let layout = &node.layout;
    let border_box = layout.border_box(origin);
    let border = border_extents(node);
    let interior = border_box.inset(border);
    let content = interior.inset(to_extents(layout.padding));
    trace!("paint {id} at {border_box:?}");

    if !border_box.is_empty() {
        paint_margin(border_box, to_extents(layout.margin), canvas);
        paint_border(border_box, &node.style.borders, canvas);
        paint_background(interior, node.style.background.as_ref(), canvas);
        if let NodeKind::Text(text) = &node.kind {
            paint_text(text, content, tree.inherited_color(id), canvas);
        }
    }

    let mut painted = 1;
    for &child in node.children() {
        painted += paint_node(tree, child, (content.x, content.y), canvas);
    }
    painted
}

/// Border thickness used to find the interior: the larger of the laid-out
/// border and the enabled border spec, per edge.
fn border_extents(node: &BoxNode) -> Insets<i32> {
    let mut extents = to_extents(node.layout.border);
    for edge in Edge::ALL {
        let spec = i32::from(node.style.borders.edge(edge).width());
        extents.set(edge, extents.get(edge).max(spec));
    }
    extents
}

fn paint_margin(border_box: Rect, margin: Insets<i32>, canvas: &mut Canvas) {
    if margin == Insets::default() {
        return;
    }
    let outer = border_box.outset(margin).intersection(&canvas.bounds());
    for (row, col) in outer.cells() {
        if !border_box.contains(row, col) {
            canvas.set(row, col, Cell::BLANK);
        }
    }
}

fn paint_border(rect: Rect, borders: &Borders, canvas: &mut Canvas) {
    let enabled = Edges::enabled(borders);
    if enabled.is_empty() {
        return;
    }
    for (row, col) in ring(rect, canvas.bounds()) {
        let here = Edges::at(rect, row, col) & enabled;
        let Some(host) = here.host() else {
            continue;
        };
        let spec = borders.edge(host);
        let glyph = border_glyph(here, spec);
        let bg = canvas.get(row, col).and_then(Cell::bg);
        canvas.set(row, col, Cell::paint(glyph, spec.color.as_ref(), None).with_bg(bg));
    }
}

/// Corner glyph when a vertical and a horizontal edge meet, otherwise the
/// straight glyph of whichever edges are present.
fn border_glyph(here: Edges, host: &BorderSpec) -> char {
    let glyphs = host.style.glyphs();
    let corner = |a: Edges, b: Edges| here.contains(a | b);
    if corner(Edges::TOP, Edges::LEFT) {
        glyphs.top_left
    } else if corner(Edges::TOP, Edges::RIGHT) {
        glyphs.top_right
    } else if corner(Edges::BOTTOM, Edges::LEFT) {
        glyphs.bottom_left
    } else if corner(Edges::BOTTOM, Edges::RIGHT) {
        glyphs.bottom_right
    } else if here.intersects(Edges::LEFT | Edges::RIGHT) {
        glyphs.vertical
    } else {
        glyphs.horizontal
    }
}

/// Cells on the outermost ring of `rect` that fall inside `clip`, each once.
fn ring(rect: Rect, clip: Rect) -> impl Iterator<Item = (i32, i32)> {
    let (top, bottom) = (rect.y, rect.bottom() - 1);
    let (left, right) = (rect.x, rect.right() - 1);
    rect.intersection(&clip)
        .cells()
        .filter(move |&(row, col)| row == top || row == bottom || col == left || col == right)
}

fn paint_background(interior: Rect, background: Option<&ColorSpec>, canvas: &mut Canvas) {
    let Some(color) = background.and_then(ColorSpec::paint) else {
        return;
    };
    canvas.fill_rect(interior, Cell::BLANK.with_bg(Some(color)));
}

fn paint_text(text: &str, content: Rect, color: Option<&ColorSpec>, canvas: &mut Canvas) {
    let fg = color.and_then(ColorSpec::paint);
    for placed in place_text(text, content) {
        let bg = canvas.get(placed.row, placed.col).and_then(Cell::bg);
        let cell = Cell::from_grapheme(placed.glyph).with_fg(fg).with_bg(bg);
        canvas.set(placed.row, placed.col, cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutSnapshot;
    use crate::style::{BorderStyle, Color, NamedColor, StylePatch};

    fn boxed(tree: &mut BoxTree, inline: &str, layout: LayoutSnapshot) -> NodeId {
        let id = tree.create_element("box");
        tree.set_style(id, &StylePatch::parse(inline)).unwrap();
        tree.set_layout(id, layout).unwrap();
        id
    }

    #[test]
    fn test_full_border() {
        let mut tree = BoxTree::new();
        let root = boxed(
            &mut tree,
            "border: solid",
            LayoutSnapshot::new(0.0, 0.0, 4.0, 3.0).with_border(Insets::uniform(1.0)),
        );
        let canvas = paint(&tree, root, 3, 4).unwrap();
        assert_eq!(canvas.lines(), vec!["┌──┐", "│  │", "└──┘"]);
    }

    #[test]
    fn test_border_glyphs_uncolored_without_border_color() {
        let mut tree = BoxTree::new();
        let root = boxed(
            &mut tree,
            "border: round; color: red",
            LayoutSnapshot::new(0.0, 0.0, 3.0, 3.0).with_border(Insets::uniform(1.0)),
        );
        let canvas = paint(&tree, root, 3, 3).unwrap();
        for (row, col) in [(0, 0), (0, 1), (1, 0), (1, 2), (2, 2)] {
            assert_eq!(canvas.get(row, col).and_then(Cell::fg), None, "({row}, {col})");
        }

        tree.set_style(root, &StylePatch::parse("border-color: white")).unwrap();
        let canvas = paint(&tree, root, 3, 3).unwrap();
        let white = Some(Color::Named(NamedColor::White));
        assert_eq!(canvas.get(0, 0).and_then(Cell::fg), white);
    }

    #[test]
    fn test_single_edge_never_draws_corners() {
        let mut tree = BoxTree::new();
        let root = boxed(&mut tree, "border-left: round", LayoutSnapshot::new(0.0, 0.0, 3.0, 3.0));
        let canvas = paint(&tree, root, 3, 3).unwrap();
        assert_eq!(canvas.lines(), vec!["│  ", "│  ", "│  "]);
    }

    #[test]
    fn test_two_adjacent_edges_share_a_corner() {
        let mut tree = BoxTree::new();
        let root = boxed(
            &mut tree,
            "border-top: double; border-right: solid",
            LayoutSnapshot::new(0.0, 0.0, 3.0, 2.0),
        );
        let canvas = paint(&tree, root, 2, 3).unwrap();
        // top hosts the top-right corner
        assert_eq!(canvas.lines(), vec!["══╗", "  │"]);
    }

    #[test]
    fn test_corner_color_follows_scan_order() {
        let mut tree = BoxTree::new();
        let root = boxed(
            &mut tree,
            "border: solid; border-left-color: red; border-top-color: blue; \
             border-right-color: green; border-bottom-color: yellow",
            LayoutSnapshot::new(0.0, 0.0, 3.0, 3.0),
        );
        let canvas = paint(&tree, root, 3, 3).unwrap();
        let fg = |row, col| canvas.get(row, col).and_then(Cell::fg);
        let named = |c| Some(Color::Named(c));

        assert_eq!(fg(0, 0), named(NamedColor::Red));
        assert_eq!(fg(0, 2), named(NamedColor::Blue));
        assert_eq!(fg(2, 0), named(NamedColor::Red));
        assert_eq!(fg(2, 2), named(NamedColor::Green));
        assert_eq!(fg(2, 1), named(NamedColor::Yellow));
    }

    #[test]
    fn test_corner_style_follows_host_edge() {
        let mut tree = BoxTree::new();
        let root = boxed(&mut tree, "border: bold", LayoutSnapshot::new(0.0, 0.0, 2.0, 2.0));
        tree.set_style(root, &StylePatch::new().set("border-left-style", "double")).unwrap();
        let canvas = paint(&tree, root, 2, 2).unwrap();
        assert_eq!(canvas.lines(), vec!["╔┓", "╚┛"]);
        assert_eq!(tree.style(root).unwrap().borders.top.style, BorderStyle::Bold);
    }

    #[test]
    fn test_background_fills_interior_only() {
        let mut tree = BoxTree::new();
        let root = boxed(
            &mut tree,
            "border: solid; background-color: blue; margin: 1",
            LayoutSnapshot::new(1.0, 1.0, 4.0, 3.0)
                .with_border(Insets::uniform(1.0))
                .with_margin(Insets::uniform(1.0)),
        );
        let canvas = paint(&tree, root, 5, 6).unwrap();
        let bg = |row, col| canvas.get(row, col).and_then(Cell::bg);
        let blue = Some(Color::Named(NamedColor::Blue));

        assert_eq!(bg(2, 2), blue);
        assert_eq!(bg(2, 3), blue);
        assert_eq!(bg(1, 1), None);
        assert_eq!(bg(0, 0), None);
    }

    #[test]
    fn test_text_inherits_color_and_keeps_background() {
        let mut tree = BoxTree::new();
        let root = boxed(
            &mut tree,
            "color: red; background-color: #000",
            LayoutSnapshot::new(0.0, 0.0, 3.0, 2.0),
        );
        let text = tree.create_text("abcdefg");
        tree.append(root, text).unwrap();
        tree.set_layout(text, LayoutSnapshot::new(0.0, 0.0, 3.0, 2.0)).unwrap();

        let canvas = paint(&tree, root, 2, 3).unwrap();
        assert_eq!(canvas.lines(), vec!["abc", "def"]);
        let cell = canvas.get(1, 2).unwrap();
        assert_eq!(cell.fg(), Some(Color::Named(NamedColor::Red)));
        assert!(cell.bg().is_some());
    }

    #[test]
    fn test_children_paint_at_content_origin_unclipped() {
        let mut tree = BoxTree::new();
        let root = boxed(
            &mut tree,
            "border: solid; padding: 1",
            LayoutSnapshot::new(0.0, 0.0, 4.0, 4.0)
                .with_border(Insets::uniform(1.0))
                .with_padding(Insets::uniform(1.0)),
        );
        let text = tree.create_text("xy");
        tree.append(root, text).unwrap();
        // laid out past the parent's right edge
        tree.set_layout(text, LayoutSnapshot::new(2.0, 0.0, 2.0, 1.0)).unwrap();

        let canvas = paint(&tree, root, 4, 7).unwrap();
        assert_eq!(canvas.lines()[2], "│  │xy ");
    }

    #[test]
    fn test_zero_size_node_still_paints_children() {
        let mut tree = BoxTree::new();
        let root = boxed(
            &mut tree,
            "background-color: red",
            LayoutSnapshot::new(1.0, 0.0, f32::NAN, -3.0),
        );
        let text = tree.create_text("hi");
        tree.append(root, text).unwrap();
        tree.set_layout(text, LayoutSnapshot::new(0.0, 0.0, 2.0, 1.0)).unwrap();

        let canvas = paint(&tree, root, 1, 4).unwrap();
        assert_eq!(canvas.lines(), vec![" hi "]);
        assert!(canvas.cells().iter().all(|cell| cell.bg().is_none()));
    }

    #[test]
    fn test_later_siblings_win_overlaps() {
        let mut tree = BoxTree::new();
        let root = boxed(&mut tree, "", LayoutSnapshot::new(0.0, 0.0, 3.0, 1.0));
        for text in ["aaa", "b"] {
            let run = tree.create_text(text);
            tree.append(root, run).unwrap();
            tree.set_layout(run, LayoutSnapshot::new(0.0, 0.0, 3.0, 1.0)).unwrap();
        }
        let canvas = paint(&tree, root, 1, 3).unwrap();
        assert_eq!(canvas.lines(), vec!["baa"]);
    }

    #[test]
    fn test_detached_nodes_contribute_nothing() {
        let mut tree = BoxTree::new();
        let root = boxed(&mut tree, "", LayoutSnapshot::new(0.0, 0.0, 3.0, 1.0));
        let orphan = tree.create_text("zzz");
        tree.set_layout(orphan, LayoutSnapshot::new(0.0, 0.0, 3.0, 1.0)).unwrap();

        let canvas = paint(&tree, root, 1, 3).unwrap();
        assert_eq!(canvas.lines(), vec!["   "]);
    }

    #[test]
    fn test_oversized_box_clips_to_canvas() {
        let mut tree = BoxTree::new();
        let root = boxed(
            &mut tree,
            "border: solid; margin: 1",
            LayoutSnapshot::new(1.0, 1.0, f32::MAX, 1.0e9).with_margin(Insets::uniform(1.0)),
        );
        let canvas = paint(&tree, root, 3, 4).unwrap();
        assert_eq!(canvas.lines(), vec!["    ", " ┌──", " │  "]);
    }

    #[test]
    fn test_unknown_root() {
        let tree = BoxTree::new();
        assert_eq!(
            paint(&tree, NodeId::new(0), 1, 1).unwrap_err(),
            TreeError::UnknownNode(NodeId::new(0))
        );
    }
}
