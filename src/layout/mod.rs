//! Layout module: cell geometry and the per-node layout snapshot.
//!
//! Layout is computed once per frame by a [`LayoutEngine`] and stored on each
//! node as a read-only [`LayoutSnapshot`]. Painting never re-runs layout.

mod rect;
mod snapshot;
mod taffy_engine;

pub use rect::{Edge, Insets, Rect};
pub use snapshot::{to_extent, to_extents, to_offset, LayoutSnapshot};
pub use taffy_engine::{AvailableSize, LayoutEngine, LayoutError, TaffyLayoutEngine};
