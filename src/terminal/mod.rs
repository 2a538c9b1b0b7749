//! Terminal module: serialization of finished frames and line sinks.

mod output;

pub use output::{flush_lines, flush_with, serialize, serialize_plain, OutputBuffer};
