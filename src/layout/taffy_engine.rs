//! Taffy adapter: run flexbox layout over a [`BoxTree`] and store one
//! [`LayoutSnapshot`] per reachable node.
//!
//! The taffy tree is rebuilt from the box tree on every pass. Text runs are
//! leaves measured with character wrapping. Snapshot offsets are converted
//! from taffy's parent-border-box coordinates to parent-content-box
//! coordinates, which is what the compositor recurses with.

use log::debug;
use taffy::{
    AlignContent as TaffyAlignContent, AlignItems as TaffyAlignItems, AvailableSpace,
    Dimension as TaffyDimension, Display, FlexDirection as TaffyFlexDirection,
    FlexWrap as TaffyFlexWrap, LengthPercentage, LengthPercentageAuto,
    NodeId as TaffyNodeId, Position as TaffyPosition, Rect as TaffyRect, Size,
    Style as TaffyStyle, TaffyError, TaffyTree,
};
use thiserror::Error;

use super::rect::Insets;
use super::snapshot::LayoutSnapshot;
use crate::compositor::text::{glyph_count, wrapped_rows};
use crate::style::{
    AlignItems, Dimension, FlexDirection, FlexWrap, Justify, Position, Style,
};
use crate::tree::{BoxTree, NodeId, NodeKind, TreeError};

/// Failure of a layout pass.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The flexbox engine rejected the tree.
    #[error("layout engine failure: {0}")]
    Taffy(#[from] TaffyError),
    /// The box tree does not contain the requested root.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Space offered to the root of a layout pass, in cells.
///
/// `None` lets the root size itself to its content on that axis.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct AvailableSize {
    /// Available columns.
    pub columns: Option<f32>,
    /// Available rows.
    pub rows: Option<f32>,
}

impl AvailableSize {
    /// A definite canvas size.
    pub fn definite(columns: usize, rows: usize) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let (columns, rows) = (columns as f32, rows as f32);
        Self {
            columns: Some(columns),
            rows: Some(rows),
        }
    }

    fn to_taffy(self) -> Size<AvailableSpace> {
        let axis = |v: Option<f32>| v.map_or(AvailableSpace::MaxContent, AvailableSpace::Definite);
        Size {
            width: axis(self.columns),
            height: axis(self.rows),
        }
    }
}

/// Computes geometry for every node reachable from a root.
///
/// Called once per frame, before painting. Implementations write results
/// with [`BoxTree::set_layout`] and never touch anything else.
pub trait LayoutEngine {
    /// Lay out the subtree at `root` within `available`.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is unknown or the engine fails.
    fn calculate_layout(
        &mut self,
        tree: &mut BoxTree,
        root: NodeId,
        available: AvailableSize,
    ) -> Result<(), LayoutError>;
}

/// Measure context attached to text leaves.
#[derive(Clone, Copy, Debug)]
struct TextMeasure {
    glyphs: usize,
}

/// One built node: box-tree id, taffy id, taffy id of its parent.
type Built = (NodeId, TaffyNodeId, Option<TaffyNodeId>);

/// Flexbox layout backed by `taffy`.
pub struct TaffyLayoutEngine {
    taffy: TaffyTree<TextMeasure>,
}

impl TaffyLayoutEngine {
    /// Create an engine with an empty taffy tree.
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
        }
    }

    fn build(
        &mut self,
        tree: &BoxTree,
        id: NodeId,
        parent: Option<TaffyNodeId>,
        built: &mut Vec<Built>,
    ) -> Result<TaffyNodeId, LayoutError> {
        let node = tree.node(id)?;
        let style = to_taffy_style(&node.style);

        let taffy_id = if let NodeKind::Text(text) = &node.kind {
            let measure = TextMeasure {
                glyphs: glyph_count(text),
            };
            self.taffy.new_leaf_with_context(style, measure)?
        } else {
            self.taffy.new_leaf(style)?
        };
        built.push((id, taffy_id, parent));

        for &child in node.children() {
            let child_id = self.build(tree, child, Some(taffy_id), built)?;
            self.taffy.add_child(taffy_id, child_id)?;
        }
        Ok(taffy_id)
    }
}

impl Default for TaffyLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine for TaffyLayoutEngine {
    fn calculate_layout(
        &mut self,
        tree: &mut BoxTree,
        root: NodeId,
        available: AvailableSize,
    ) -> Result<(), LayoutError> {
        self.taffy.clear();
        let mut built = Vec::new();
        let taffy_root = self.build(tree, root, None, &mut built)?;

        self.taffy.compute_layout_with_measure(
            taffy_root,
            available.to_taffy(),
            |known, available, _node, context, _style| match context {
                Some(text) => measure_text(*text, known, available),
                None => Size::ZERO,
            },
        )?;

        for (id, taffy_id, parent) in built {
            let layout = self.taffy.layout(taffy_id)?;
            let margin = tree.node(id)?.style.flex.margin;
            let (left, top) = match parent {
                Some(parent) => {
                    let parent = self.taffy.layout(parent)?;
                    (
                        layout.location.x - parent.border.left - parent.padding.left,
                        layout.location.y - parent.border.top - parent.padding.top,
                    )
                }
                None => (margin.left, margin.top),
            };
            let snapshot = LayoutSnapshot::new(left, top, layout.size.width, layout.size.height)
                .with_margin(margin)
                .with_padding(from_taffy_rect(layout.padding))
                .with_border(from_taffy_rect(layout.border));
            tree.set_layout(id, snapshot)?;
        }

        debug!("layout pass over {} nodes, available {available:?}", self.taffy.total_node_count());
        Ok(())
    }
}

/// Character-wrap measurement: as wide as the text or the available
/// width, whichever is smaller; as tall as the wrapped row count.
fn measure_text(
    text: TextMeasure,
    known: Size<Option<f32>>,
    available: Size<AvailableSpace>,
) -> Size<f32> {
    #[allow(clippy::cast_precision_loss)]
    let glyphs = text.glyphs as f32;
    let max_width = match available.width {
        AvailableSpace::Definite(width) => width.floor().max(1.0),
        AvailableSpace::MinContent => 1.0,
        AvailableSpace::MaxContent => glyphs,
    };
    let width = known.width.unwrap_or_else(|| glyphs.min(max_width));
    let height = known.height.unwrap_or_else(|| {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let columns = width.max(0.0) as usize;
        #[allow(clippy::cast_precision_loss)]
        let rows = wrapped_rows(text.glyphs, columns) as f32;
        rows
    });
    Size { width, height }
}

fn from_taffy_rect(rect: TaffyRect<f32>) -> Insets<f32> {
    Insets {
        left: rect.left,
        top: rect.top,
        right: rect.right,
        bottom: rect.bottom,
    }
}

/// Convert a closed style to a taffy style.
///
/// Explicit lengths size the content box, so border and padding are added
/// on top of them. Percentages size the border box.
fn to_taffy_style(style: &Style) -> TaffyStyle {
    let flex = &style.flex;
    let border = Insets {
        left: f32::from(style.borders.left.width()),
        top: f32::from(style.borders.top.width()),
        right: f32::from(style.borders.right.width()),
        bottom: f32::from(style.borders.bottom.width()),
    };
    let extra_width = border.left + border.right + flex.padding.left + flex.padding.right;
    let extra_height = border.top + border.bottom + flex.padding.top + flex.padding.bottom;
    let length = LengthPercentage::Length;
    let inset = |v: Option<f32>| v.map_or(LengthPercentageAuto::Auto, LengthPercentageAuto::Length);

    TaffyStyle {
        display: if flex.hidden { Display::None } else { Display::Flex },
        position: match flex.position {
            Position::Relative => TaffyPosition::Relative,
            Position::Absolute => TaffyPosition::Absolute,
        },
        inset: TaffyRect {
            left: inset(flex.inset.left),
            right: inset(flex.inset.right),
            top: inset(flex.inset.top),
            bottom: inset(flex.inset.bottom),
        },
        size: Size {
            width: to_taffy_dimension(flex.width, extra_width),
            height: to_taffy_dimension(flex.height, extra_height),
        },
        margin: TaffyRect {
            left: LengthPercentageAuto::Length(flex.margin.left),
            right: LengthPercentageAuto::Length(flex.margin.right),
            top: LengthPercentageAuto::Length(flex.margin.top),
            bottom: LengthPercentageAuto::Length(flex.margin.bottom),
        },
        padding: TaffyRect {
            left: length(flex.padding.left),
            right: length(flex.padding.right),
            top: length(flex.padding.top),
            bottom: length(flex.padding.bottom),
        },
        border: TaffyRect {
            left: length(border.left),
            right: length(border.right),
            top: length(border.top),
            bottom: length(border.bottom),
        },
        gap: Size {
            width: length(flex.column_gap),
            height: length(flex.row_gap),
        },
        flex_direction: match flex.direction {
            FlexDirection::Row => TaffyFlexDirection::Row,
            FlexDirection::Column => TaffyFlexDirection::Column,
            FlexDirection::RowReverse => TaffyFlexDirection::RowReverse,
            FlexDirection::ColumnReverse => TaffyFlexDirection::ColumnReverse,
        },
        flex_wrap: match flex.wrap {
            FlexWrap::NoWrap => TaffyFlexWrap::NoWrap,
            FlexWrap::Wrap => TaffyFlexWrap::Wrap,
            FlexWrap::WrapReverse => TaffyFlexWrap::WrapReverse,
        },
        justify_content: Some(to_taffy_align_content(flex.justify_content)),
        align_content: Some(to_taffy_align_content(flex.align_content)),
        align_items: Some(match flex.align_items {
            AlignItems::Stretch => TaffyAlignItems::Stretch,
            AlignItems::FlexStart => TaffyAlignItems::FlexStart,
            AlignItems::FlexEnd => TaffyAlignItems::FlexEnd,
            AlignItems::Center => TaffyAlignItems::Center,
            AlignItems::Baseline => TaffyAlignItems::Baseline,
        }),
        flex_grow: flex.grow,
        flex_shrink: flex.shrink,
        flex_basis: to_taffy_dimension(flex.basis, 0.0),
        ..TaffyStyle::default()
    }
}

fn to_taffy_dimension(dimension: Dimension, extra: f32) -> TaffyDimension {
    match dimension {
        Dimension::Auto => TaffyDimension::Auto,
        Dimension::Cells(cells) => TaffyDimension::Length(cells + extra),
        Dimension::Percent(fraction) => TaffyDimension::Percent(fraction),
    }
}

const fn to_taffy_align_content(justify: Justify) -> TaffyAlignContent {
    match justify {
        Justify::FlexStart => TaffyAlignContent::FlexStart,
        Justify::FlexEnd => TaffyAlignContent::FlexEnd,
        Justify::Center => TaffyAlignContent::Center,
        Justify::Stretch => TaffyAlignContent::Stretch,
        Justify::SpaceBetween => TaffyAlignContent::SpaceBetween,
        Justify::SpaceAround => TaffyAlignContent::SpaceAround,
        Justify::SpaceEvenly => TaffyAlignContent::SpaceEvenly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StylePatch;

    fn run(tree: &mut BoxTree, root: NodeId, columns: usize, rows: usize) {
        TaffyLayoutEngine::new()
            .calculate_layout(tree, root, AvailableSize::definite(columns, rows))
            .unwrap();
    }

    fn element(tree: &mut BoxTree, inline: &str) -> NodeId {
        let id = tree.create_element("box");
        tree.set_style(id, &StylePatch::parse(inline)).unwrap();
        id
    }

    fn layout(tree: &BoxTree, id: NodeId) -> LayoutSnapshot {
        tree.node(id).unwrap().layout
    }

    #[test]
    fn test_single_root() {
        let mut tree = BoxTree::new();
        let root = element(&mut tree, "width: 40; height: 10");
        run(&mut tree, root, 80, 24);

        let snapshot = layout(&tree, root);
        assert_eq!((snapshot.left, snapshot.top), (0.0, 0.0));
        assert_eq!((snapshot.width, snapshot.height), (40.0, 10.0));
    }

    #[test]
    fn test_explicit_size_is_content_box() {
        let mut tree = BoxTree::new();
        let root = element(&mut tree, "width: 10; height: 1; border: solid; padding: 1");
        run(&mut tree, root, 80, 24);

        let snapshot = layout(&tree, root);
        assert_eq!((snapshot.width, snapshot.height), (14.0, 5.0));
        assert_eq!(snapshot.border, Insets::uniform(1.0));
        assert_eq!(snapshot.padding, Insets::uniform(1.0));
    }

    #[test]
    fn test_root_margin_offsets_root() {
        let mut tree = BoxTree::new();
        let root = element(&mut tree, "width: 4; height: 2; margin: 1 3");
        run(&mut tree, root, 80, 24);

        let snapshot = layout(&tree, root);
        assert_eq!((snapshot.left, snapshot.top), (3.0, 1.0));
        assert_eq!(snapshot.margin.right, 3.0);
    }

    #[test]
    fn test_child_offset_is_content_relative() {
        let mut tree = BoxTree::new();
        let root = element(&mut tree, "width: 40; height: 10; padding-left: 2; padding-top: 1; border-left: solid");
        let child = element(&mut tree, "width: 10; height: 5");
        tree.append(root, child).unwrap();
        run(&mut tree, root, 80, 24);

        let snapshot = layout(&tree, child);
        assert_eq!((snapshot.left, snapshot.top), (0.0, 0.0));
        assert_eq!((snapshot.width, snapshot.height), (10.0, 5.0));
    }

    #[test]
    fn test_flex_row_places_siblings() {
        let mut tree = BoxTree::new();
        let root = element(&mut tree, "width: 40; height: 10; flex-direction: row");
        let a = element(&mut tree, "width: 10; height: 5");
        let b = element(&mut tree, "width: 10; height: 5; margin-left: 2");
        tree.append(root, a).unwrap();
        tree.append(root, b).unwrap();
        run(&mut tree, root, 80, 24);

        assert_eq!(layout(&tree, a).left, 0.0);
        assert_eq!(layout(&tree, b).left, 12.0);
    }

    #[test]
    fn test_flex_column_and_grow() {
        let mut tree = BoxTree::new();
        let root = element(&mut tree, "width: 20; height: 10; flex-direction: column");
        let a = element(&mut tree, "height: 2");
        let b = element(&mut tree, "flex-grow: 1");
        tree.append(root, a).unwrap();
        tree.append(root, b).unwrap();
        run(&mut tree, root, 80, 24);

        assert_eq!(layout(&tree, b).top, 2.0);
        assert_eq!(layout(&tree, b).height, 8.0);
        assert_eq!(layout(&tree, b).width, 20.0);
    }

    #[test]
    fn test_unstyled_siblings_stack() {
        let mut tree = BoxTree::new();
        let root = element(&mut tree, "width: 8; height: 3");
        let a = element(&mut tree, "height: 1");
        let b = element(&mut tree, "height: 1");
        tree.append(root, a).unwrap();
        tree.append(root, b).unwrap();
        run(&mut tree, root, 80, 24);

        assert_eq!((layout(&tree, a).left, layout(&tree, a).top), (0.0, 0.0));
        assert_eq!((layout(&tree, b).left, layout(&tree, b).top), (0.0, 1.0));
        assert_eq!(layout(&tree, b).width, 8.0);
    }

    #[test]
    fn test_justify_content_center() {
        let mut tree = BoxTree::new();
        let root = element(&mut tree, "width: 100; height: 10; flex-direction: row; justify-content: center");
        let child = element(&mut tree, "width: 20; height: 5");
        tree.append(root, child).unwrap();
        run(&mut tree, root, 120, 24);

        assert_eq!(layout(&tree, child).left, 40.0);
    }

    #[test]
    fn test_percent_root_fills_canvas() {
        let mut tree = BoxTree::new();
        let root = element(&mut tree, "width: 100%; height: 100%; border: solid");
        run(&mut tree, root, 30, 7);

        let snapshot = layout(&tree, root);
        assert_eq!((snapshot.width, snapshot.height), (30.0, 7.0));
    }

    #[test]
    fn test_text_wraps_to_width() {
        let mut tree = BoxTree::new();
        let root = element(&mut tree, "width: 4; height: 10; flex-direction: column; align-items: flex-start");
        let text = tree.create_text("abcdefghij");
        tree.append(root, text).unwrap();
        run(&mut tree, root, 80, 24);

        let snapshot = layout(&tree, text);
        assert_eq!((snapshot.width, snapshot.height), (4.0, 3.0));
    }

    #[test]
    fn test_hidden_nodes_take_no_space() {
        let mut tree = BoxTree::new();
        let root = element(&mut tree, "width: 40; height: 10");
        let comment = tree.create_comment("placeholder");
        let hidden = element(&mut tree, "width: 10; height: 5; display: none");
        let shown = element(&mut tree, "width: 10; height: 5");
        tree.append(root, comment).unwrap();
        tree.append(root, hidden).unwrap();
        tree.append(root, shown).unwrap();
        run(&mut tree, root, 80, 24);

        assert_eq!(layout(&tree, hidden).width, 0.0);
        assert_eq!(layout(&tree, comment).width, 0.0);
        assert_eq!((layout(&tree, shown).left, layout(&tree, shown).top), (0.0, 0.0));
    }

    #[test]
    fn test_unknown_root_is_an_error() {
        let mut tree = BoxTree::new();
        let result = TaffyLayoutEngine::new().calculate_layout(
            &mut tree,
            NodeId::new(3),
            AvailableSize::definite(10, 10),
        );
        assert!(matches!(result, Err(LayoutError::Tree(TreeError::UnknownNode(_)))));
    }

    #[test]
    fn test_measure_text() {
        let text = TextMeasure { glyphs: 10 };
        let size = measure_text(
            text,
            Size { width: None, height: None },
            Size { width: AvailableSpace::Definite(3.0), height: AvailableSpace::MaxContent },
        );
        assert_eq!((size.width, size.height), (3.0, 4.0));

        let empty = measure_text(
            TextMeasure { glyphs: 0 },
            Size { width: None, height: None },
            Size { width: AvailableSpace::MaxContent, height: AvailableSpace::MaxContent },
        );
        assert_eq!((empty.width, empty.height), (0.0, 0.0));
    }
}
