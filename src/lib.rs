//! # Boxgrid
//!
//! Paints a laid-out tree of styled boxes onto a terminal character grid.
//!
//! Boxgrid is the last stage of a terminal UI pipeline: given a box tree
//! whose nodes carry flexbox styles, it computes layout, composites borders,
//! backgrounds and wrapped text into a [`Canvas`] of cells, and serializes
//! that canvas into one string per row.
//!
//! ## Core Concepts
//!
//! - **Box tree**: containers, text runs and comments held in an arena
//! - **Layout snapshot**: per-node geometry, computed once per frame
//! - **Painter's order**: later siblings overwrite earlier ones, children are not clipped
//! - **Full repaint**: every frame is painted from scratch
//!
//! ## Example
//!
//! ```rust,ignore
//! use boxgrid::{Engine, EngineConfig, StylePatch};
//!
//! let mut engine = Engine::new(EngineConfig::default().with_size(12, 3));
//! let root = engine.root();
//! let tree = engine.tree_mut();
//! let card = tree.create_element("box");
//! tree.set_style(card, &StylePatch::parse("width: 10; height: 1; border: solid"))?;
//! tree.append(root, card)?;
//!
//! for line in engine.render()? {
//!     println!("{line}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod compositor;
pub mod engine;
pub mod error;
pub mod layout;
pub mod style;
pub mod terminal;
pub mod tree;

// Re-exports for convenience
pub use buffer::{Canvas, Cell};
pub use compositor::{paint, paint_into};
pub use engine::{Engine, EngineConfig};
pub use error::{Error, Result};
pub use layout::{
    AvailableSize, Edge, Insets, LayoutEngine, LayoutError, LayoutSnapshot, Rect,
    TaffyLayoutEngine,
};
pub use style::{
    BorderSpec, BorderStyle, Borders, Color, ColorMode, ColorSpec, Dimension, NamedColor, Rgb,
    Style, StylePatch,
};
pub use terminal::{flush_lines, flush_with, serialize, serialize_plain, OutputBuffer};
pub use tree::{BoxNode, BoxTree, NodeId, NodeKind, TreeError};
