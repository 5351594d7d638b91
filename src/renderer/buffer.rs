//! CellBuffer and drawing primitives.
//!
//! The CellBuffer is a 2D grid of Cells that represents what should be
//! displayed on the terminal. All drawing operations work on this buffer.
//!
//! # Design Decisions
//!
//! - **Flat storage**: Uses `Vec<Cell>` with row-major indexing.
//! - **Signed coordinates**: Layout can place content above or left of the
//!   screen (scrolling); writes outside the grid are dropped.
//! - **Clipping**: Border and fill primitives take the bounding ancestor's
//!   frame and never write outside it.
//! - **Wide characters**: A wide glyph is followed by a width-0 filler cell.

use crate::layout::text_measure::char_width;
use crate::types::{Cell, Frame, Style};

/// Columns between a frame's left edge and its title.
pub const TITLE_INSET: i32 = 2;

/// Rounded box-drawing glyphs: (horizontal, vertical, top-left, top-right,
/// bottom-right, bottom-left).
const BORDER: (char, char, char, char, char, char) = ('─', '│', '╭', '╮', '╯', '╰');

// =============================================================================
// CellBuffer
// =============================================================================

/// A 2D buffer of terminal cells.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`
#[derive(Debug, Clone, PartialEq)]
pub struct CellBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl CellBuffer {
    /// Create a new buffer filled with blank cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    /// Get buffer width.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Get buffer height.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The whole grid as a frame.
    #[inline]
    pub fn bounds(&self) -> Frame {
        Frame::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Check if coordinates are in bounds.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get a cell reference (returns None if out of bounds).
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// One row of cells.
    pub fn row(&self, y: u16) -> &[Cell] {
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Reallocate for new terminal dimensions (clears content).
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::default(); width as usize * height as usize];
    }

    /// Overwrite every cell with a blank in `style`.
    pub fn fill(&mut self, style: Style) {
        self.cells.fill(Cell::blank(style));
    }

    /// Write one cell. Out-of-range writes and identical cells are skipped.
    pub fn put(&mut self, x: i32, y: i32, cell: Cell) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = self.index(x, y);
        if self.cells[idx] != cell {
            self.cells[idx] = cell;
        }
    }

    /// Fill the part of `frame` that lies inside `bounds` with `cell`.
    ///
    /// A wide glyph whose filler gets overwritten at the left edge is
    /// replaced by a blank so no half glyph is left behind.
    pub fn fill_rect(&mut self, frame: Frame, bounds: Frame, cell: Cell) {
        let area = frame.intersect(&bounds).intersect(&self.bounds());
        for y in area.y..area.bottom() {
            let left = area.x - 1;
            if let Some(prev) = self.get(left, y).copied() {
                if prev.width == 2 {
                    let idx = self.index(left, y);
                    self.cells[idx] = Cell::blank(prev.style);
                }
            }
            for x in area.x..area.right() {
                let idx = self.index(x, y);
                self.cells[idx] = cell;
            }
        }
    }

    /// Stamp a rounded border on the edges of `frame`.
    ///
    /// Only the segments inside `bounds` are written, so a nested border
    /// never paints over a scrolled-out ancestor edge.
    pub fn put_border(&mut self, frame: Frame, bounds: Frame, style: Style) {
        if frame.width < 2 || frame.height < 2 {
            return;
        }
        let (h, v, tl, tr, br, bl) = BORDER;
        let (left, right) = (frame.x, frame.right() - 1);
        let (top, bottom) = (frame.y, frame.bottom() - 1);

        let stamp = |buffer: &mut Self, x: i32, y: i32, ch: char| {
            if bounds.contains(x, y) {
                buffer.put(x, y, Cell::new(ch, 1, style));
            }
        };

        for x in left + 1..right {
            stamp(self, x, top, h);
            stamp(self, x, bottom, h);
        }
        for y in top + 1..bottom {
            stamp(self, left, y, v);
            stamp(self, right, y, v);
        }
        stamp(self, left, top, tl);
        stamp(self, right, top, tr);
        stamp(self, right, bottom, br);
        stamp(self, left, bottom, bl);
    }

    /// Write a title on the top row of `frame`, starting [`TITLE_INSET`]
    /// columns in.
    ///
    /// Stops at the first line break or once `max_width` columns are used.
    /// Nothing is written when the top row is outside `bounds`.
    pub fn put_title(&mut self, frame: Frame, bounds: Frame, max_width: i32, title: &str, style: Style) {
        if !bounds.contains_row(frame.y) {
            return;
        }
        let mut col = 0;
        for ch in title.chars() {
            if ch == '\n' {
                return;
            }
            let width = char_width(ch);
            if width == 0 {
                continue;
            }
            if col + width > max_width {
                return;
            }
            let x = frame.x + TITLE_INSET + col;
            if bounds.contains(x, frame.y) {
                if width == 1 {
                    self.put(x, frame.y, Cell::new(ch, 1, style));
                } else if bounds.contains(x + 1, frame.y) {
                    self.put(x, frame.y, Cell::new(ch, 2, style));
                    self.put(x + 1, frame.y, Cell::filler(style));
                } else {
                    self.put(x, frame.y, Cell::blank(style));
                }
            }
            col += width;
        }
    }

    /// The visible text of a row, with wide-glyph fillers skipped.
    pub fn line(&self, y: u16) -> String {
        self.row(y)
            .iter()
            .filter(|cell| cell.width != 0)
            .map(|cell| cell.ch)
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
