//! Style module: the closed, per-node style model.
//!
//! - [`ColorSpec`]: classified color input, resolved to a paintable [`Color`]
//! - [`BorderStyle`] / [`BorderGlyphs`]: the border glyph table
//! - [`BorderSpec`] / [`Borders`]: per-edge border configuration
//! - [`Style`] / [`StylePatch`]: translation from loosely-typed declarations

mod border;
mod color;
mod declaration;

pub use border::{BorderGlyphs, BorderSpec, BorderStyle, Borders};
pub use color::{Color, ColorMode, ColorSpec, NamedColor, Rgb};
pub use declaration::{
    AlignItems, Dimension, FlexDirection, FlexStyle, FlexWrap, Justify, Position, Style,
    StylePatch,
};
