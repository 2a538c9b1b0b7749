//! Compositor module: paint a laid-out box tree onto a canvas.
//!
//! - [`paint`] / [`paint_into`]: the recursive paint pass
//! - [`text`]: character wrapping shared with text measurement

mod paint;
pub mod text;

pub use paint::{paint, paint_into};
