//! Engine: the pipeline driver.
//!
//! The Engine owns the box tree and a root container that fills the
//! canvas. A frame is produced in three synchronous steps: mutate the tree,
//! [`reflow`](Engine::reflow) it, then [`paint`](Engine::paint) and
//! serialize. Nothing is cached between frames.

use std::io::{self, Write};

use crossterm::terminal;
use log::debug;

use crate::buffer::Canvas;
use crate::compositor;
use crate::error::Result;
use crate::layout::{AvailableSize, LayoutEngine, TaffyLayoutEngine};
use crate::style::{ColorMode, StylePatch};
use crate::terminal::{flush_lines, flush_with, serialize};
use crate::tree::{BoxTree, NodeId};

/// Configuration for the Engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Canvas width in columns.
    pub columns: usize,
    /// Canvas height in rows.
    pub rows: usize,
    /// How 24-bit colors are written.
    pub color_mode: ColorMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            columns: 80,
            rows: 24,
            color_mode: ColorMode::TrueColor,
        }
    }
}

impl EngineConfig {
    /// Size the canvas to the current terminal and detect its color support.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal size cannot be queried.
    pub fn from_terminal() -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        Ok(Self {
            columns: usize::from(columns),
            rows: usize::from(rows),
            color_mode: ColorMode::detect(),
        })
    }

    /// Set the canvas size (builder pattern).
    #[must_use]
    pub const fn with_size(mut self, columns: usize, rows: usize) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    /// Set the color mode (builder pattern).
    #[must_use]
    pub const fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }
}

/// The render pipeline: box tree, layout engine and configuration.
pub struct Engine<L = TaffyLayoutEngine> {
    config: EngineConfig,
    tree: BoxTree,
    root: NodeId,
    layout: L,
}

impl Engine {
    /// Create an engine with flexbox layout.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_layout_engine(config, TaffyLayoutEngine::new())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<L: LayoutEngine> Engine<L> {
    /// Create an engine with a custom layout engine.
    pub fn with_layout_engine(config: EngineConfig, layout: L) -> Self {
        let mut tree = BoxTree::new();
        let fill = StylePatch::new().set("width", "100%").set("height", "100%");
        let root = tree.create_styled("root", &fill);
        Self {
            config,
            tree,
            root,
            layout,
        }
    }

    /// The root container; it fills the canvas.
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// The box tree.
    pub const fn tree(&self) -> &BoxTree {
        &self.tree
    }

    /// The box tree, for the mutation protocol.
    pub const fn tree_mut(&mut self) -> &mut BoxTree {
        &mut self.tree
    }

    /// Current configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Change the canvas size. Takes effect on the next reflow.
    pub fn resize(&mut self, columns: usize, rows: usize) {
        debug!("resize to {columns}x{rows}");
        self.config.columns = columns;
        self.config.rows = rows;
    }

    /// Run layout over the tree for the current canvas size.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout engine fails.
    pub fn reflow(&mut self) -> Result<()> {
        let available = AvailableSize::definite(self.config.columns, self.config.rows);
        self.layout
            .calculate_layout(&mut self.tree, self.root, available)?;
        Ok(())
    }

    /// Paint the tree as last laid out onto a fresh canvas.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is missing from the tree.
    pub fn paint(&self) -> Result<Canvas> {
        let canvas = compositor::paint(&self.tree, self.root, self.config.rows, self.config.columns)?;
        Ok(canvas)
    }

    /// Reflow, paint and serialize one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if layout or painting fails.
    pub fn render(&mut self) -> Result<Vec<String>> {
        self.reflow()?;
        let canvas = self.paint()?;
        Ok(serialize(&canvas, self.config.color_mode))
    }

    /// Render one frame and write it to `writer` in a single write.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn render_to<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        let lines = self.render()?;
        flush_lines(&lines, writer)?;
        Ok(())
    }

    /// Render one frame and hand each line to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render_with(&mut self, sink: impl FnMut(&str)) -> Result<()> {
        let lines = self.render()?;
        flush_with(&lines, sink);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::layout::LayoutError;
    use crate::tree::TreeError;

    fn small(columns: usize, rows: usize) -> Engine {
        Engine::new(EngineConfig::default().with_size(columns, rows))
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!((config.columns, config.rows), (80, 24));
        assert_eq!(config.color_mode, ColorMode::TrueColor);
    }

    #[test]
    fn test_empty_root_renders_blank_canvas() {
        let mut engine = small(3, 2);
        assert_eq!(engine.render().unwrap(), vec!["   ", "   "]);
    }

    #[test]
    fn test_root_fills_canvas() {
        let mut engine = small(5, 3);
        let root = engine.root();
        engine
            .tree_mut()
            .set_style(root, &StylePatch::parse("border: round"))
            .unwrap();
        assert_eq!(engine.render().unwrap(), vec!["╭───╮", "│   │", "╰───╯"]);
    }

    #[test]
    fn test_resize_changes_next_frame() {
        let mut engine = small(3, 1);
        engine.resize(6, 2);
        let lines = engine.render().unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| line.chars().count() == 6));
    }

    #[test]
    fn test_render_to_writes_lines() {
        let mut engine = small(2, 2);
        let root = engine.root();
        let text = engine.tree_mut().create_text("abc");
        engine.tree_mut().append(root, text).unwrap();

        let mut out = Vec::new();
        engine.render_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ab\nc \n");
    }

    #[test]
    fn test_render_with_sink() {
        let mut engine = small(2, 1);
        let mut count = 0;
        engine.render_with(|_| count += 1).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_label_updates_do_not_grow_tree() {
        let mut engine = small(8, 1);
        let root = engine.root();
        let label = engine.tree_mut().create_element("div");
        engine.tree_mut().append(root, label).unwrap();

        for i in 0..1000 {
            engine.tree_mut().set_element_text(label, &i.to_string()).unwrap();
            engine.render().unwrap();
        }
        assert_eq!(engine.tree().len(), 3);
        assert_eq!(engine.render().unwrap(), vec!["999     "]);
    }

    #[test]
    fn test_layout_errors_propagate() {
        struct Failing;
        impl LayoutEngine for Failing {
            fn calculate_layout(
                &mut self,
                _tree: &mut BoxTree,
                root: NodeId,
                _available: AvailableSize,
            ) -> std::result::Result<(), LayoutError> {
                Err(LayoutError::Tree(TreeError::UnknownNode(root)))
            }
        }

        let mut engine = Engine::with_layout_engine(EngineConfig::default(), Failing);
        assert!(matches!(engine.render(), Err(Error::Layout(_))));
    }
}
