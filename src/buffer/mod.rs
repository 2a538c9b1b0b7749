//! Buffer module: the canvas a paint pass writes into.
//!
//! This module contains:
//! - [`Cell`]: one styled glyph, stored inline
//! - [`Canvas`]: a bounds-checked grid of cells for one frame

mod canvas;
mod cell;

pub use canvas::Canvas;
pub use cell::Cell;
