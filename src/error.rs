//! Crate-level error type.

use thiserror::Error;

use crate::layout::LayoutError;
use crate::tree::TreeError;

/// Any failure of the render pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// A tree mutation violated the tree contract.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// The layout pass failed.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// Writing output failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the pipeline.
pub type Result<T> = std::result::Result<T, Error>;
