//! Output buffering and frame serialization.
//!
//! These components keep terminal output small by:
//! - Batching a whole frame into a single write
//! - Tracking the last emitted style so SGR codes are only written at
//!   style transitions, not per cell
//! - Moving the cursor with relative codes instead of rewriting rows

use std::io;

use super::ansi;
use super::buffer::CellBuffer;
use crate::types::Style;

// =============================================================================
// OutputBuffer
// =============================================================================

/// A buffer that accumulates output for batch writing.
///
/// Instead of many small writes to the terminal, we accumulate everything
/// and flush once per frame.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(16384)
    }

    /// Create a buffer with specific capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Clear the buffer without deallocating.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Write a single character.
    #[inline]
    pub fn write_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.data.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }

    /// Get the accumulated data as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl io::Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(()) // Buffering only - the backend does the real write
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// Serializes a [`CellBuffer`] into escape sequences.
///
/// Remembers where the cursor-marked cell was last seen, so a frame without
/// one leaves the terminal cursor where it was.
#[derive(Debug, Default)]
pub struct Renderer {
    output: OutputBuffer,
    cursor: (u16, u16),
}

impl Renderer {
    /// Create a renderer with an empty output buffer.
    pub fn new() -> Self {
        Self {
            output: OutputBuffer::new(),
            cursor: (0, 0),
        }
    }

    /// Last recorded cursor position as (column, row).
    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    /// Pending output for the last drawn frame.
    pub fn output(&self) -> &OutputBuffer {
        &self.output
    }

    /// Drop pending output after it has been written.
    pub fn clear(&mut self) {
        self.output.clear();
    }

    /// Serialize the whole grid.
    ///
    /// Rows are written top to bottom from the origin. A style change
    /// between consecutive cells emits a reset followed by one code per
    /// active part of the new style. The filler after a wide glyph is
    /// skipped. Afterwards the cursor is parked on the cursor-marked cell
    /// using relative movement from the origin.
    pub fn draw(&mut self, buffer: &CellBuffer) -> io::Result<()> {
        let out = &mut self.output;
        ansi::origin(out)?;

        let mut last_style = Style::EMPTY;
        for y in 0..buffer.height() {
            if y != 0 {
                ansi::next_row(out)?;
            }
            let row = buffer.row(y);
            for (x, cell) in row.iter().enumerate() {
                let style = cell.style.without_cursor();
                if style != last_style {
                    ansi::style(out, style)?;
                    last_style = style;
                }
                if cell.style.has_cursor() {
                    self.cursor = (x as u16, y);
                }
                let is_filler = cell.width == 0 && x > 0 && row[x - 1].width == 2;
                if !is_filler {
                    out.write_char(cell.ch);
                }
            }
        }

        ansi::reset(out)?;
        ansi::origin(out)?;
        ansi::cursor_down(out, self.cursor.1)?;
        ansi::cursor_forward(out, self.cursor.0)?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
