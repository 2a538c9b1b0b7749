//! Output: turn a finished canvas into lines and hand them to a sink.
//!
//! Styled rows carry SGR sequences written through crossterm's `Command`
//! API. Escape sequences never count toward a row's width: every row holds
//! exactly `canvas.columns()` glyphs.

use std::io::Write;

use crossterm::style::{ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::Command;

use crate::buffer::{Canvas, Cell};
use crate::style::{Color, ColorMode};

/// Serialize every row with color escape sequences.
///
/// Colors are emitted only where the (fg, bg) pair changes within a row. A
/// row still colored at its last cell ends with a reset; a row without
/// styled cells is plain text.
pub fn serialize(canvas: &Canvas, mode: ColorMode) -> Vec<String> {
    canvas.row_slices().map(|row| styled_row(row, mode)).collect()
}

/// Serialize every row as plain glyphs.
pub fn serialize_plain(canvas: &Canvas) -> Vec<String> {
    canvas
        .row_slices()
        .map(|row| row.iter().map(Cell::grapheme).collect())
        .collect()
}

fn styled_row(row: &[Cell], mode: ColorMode) -> String {
    let mut output = String::with_capacity(row.len() * 2);
    let mut current: (Option<Color>, Option<Color>) = (None, None);

    for cell in row {
        let (fg, bg) = (cell.fg(), cell.bg());
        if (fg, bg) != current {
            // a color can only be dropped by resetting both
            if (current.0.is_some() && fg.is_none()) || (current.1.is_some() && bg.is_none()) {
                let _ = ResetColor.write_ansi(&mut output);
                current = (None, None);
            }
            if fg != current.0 {
                if let Some(color) = fg {
                    let _ = SetForegroundColor(color.to_terminal(mode)).write_ansi(&mut output);
                }
            }
            if bg != current.1 {
                if let Some(color) = bg {
                    let _ = SetBackgroundColor(color.to_terminal(mode)).write_ansi(&mut output);
                }
            }
            current = (fg, bg);
        }
        output.push_str(cell.grapheme());
    }

    if current != (None, None) {
        let _ = ResetColor.write_ansi(&mut output);
    }
    output
}

/// Pre-allocated buffer that collects a whole frame before writing it.
///
/// All output is accumulated here, then flushed in a single `write_all`.
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append one line followed by `\n`.
    #[inline]
    pub fn push_line(&mut self, line: &str) {
        self.data.extend_from_slice(line.as_bytes());
        self.data.push(b'\n');
    }

    /// Flush to a writer in a single call.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Write every line, each terminated by `\n`, with one `write_all`.
///
/// # Errors
///
/// Returns an error if the underlying writer fails.
pub fn flush_lines<S: AsRef<str>, W: Write>(lines: &[S], writer: &mut W) -> std::io::Result<()> {
    let capacity = lines.iter().map(|l| l.as_ref().len() + 1).sum();
    let mut buffer = OutputBuffer::with_capacity(capacity);
    for line in lines {
        buffer.push_line(line.as_ref());
    }
    buffer.flush_to(writer)
}

/// Hand every line to a caller-supplied sink, in row order.
pub fn flush_with<S: AsRef<str>>(lines: &[S], mut sink: impl FnMut(&str)) {
    for line in lines {
        sink(line.as_ref());
    }
}
