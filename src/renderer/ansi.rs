//! ANSI escape sequences for terminal control.
//!
//! This is the whole vocabulary tervi emits:
//! - Cursor save/restore, visibility and relative movement
//! - Alternate screen buffer
//! - SGR reset, 256-color foreground/background and text attributes

use std::io::Write;

use crate::types::{Attr, Style};

// =============================================================================
// Constants
// =============================================================================

/// Rows moved up by [`origin`]; more than any terminal is tall.
const ORIGIN_ROWS: u16 = 1000;

// =============================================================================
// Cursor Movement
// =============================================================================

/// Move cursor up by n rows.
#[inline]
pub fn cursor_up<W: Write>(w: &mut W, n: u16) -> std::io::Result<()> {
    if n > 0 {
        write!(w, "\x1b[{}A", n)
    } else {
        Ok(())
    }
}

/// Move cursor down by n rows.
#[inline]
pub fn cursor_down<W: Write>(w: &mut W, n: u16) -> std::io::Result<()> {
    if n > 0 {
        write!(w, "\x1b[{}B", n)
    } else {
        Ok(())
    }
}

/// Move cursor forward (right) by n columns.
#[inline]
pub fn cursor_forward<W: Write>(w: &mut W, n: u16) -> std::io::Result<()> {
    if n > 0 {
        write!(w, "\x1b[{}C", n)
    } else {
        Ok(())
    }
}

/// Move to the top-left corner without absolute addressing.
///
/// Moving up further than the screen height clamps at the first row.
#[inline]
pub fn origin<W: Write>(w: &mut W) -> std::io::Result<()> {
    cursor_up(w, ORIGIN_ROWS)?;
    w.write_all(b"\r")
}

/// Move to the start of the next row.
#[inline]
pub fn next_row<W: Write>(w: &mut W) -> std::io::Result<()> {
    cursor_down(w, 1)?;
    w.write_all(b"\r")
}

/// Save cursor position (SCO).
#[inline]
pub fn cursor_save<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[s")
}

/// Restore cursor position (SCO).
#[inline]
pub fn cursor_restore<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[u")
}

/// Hide cursor.
#[inline]
pub fn cursor_hide<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?25l")
}

/// Show cursor.
#[inline]
pub fn cursor_show<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?25h")
}

// =============================================================================
// Screen Control
// =============================================================================

/// Enter alternate screen buffer.
#[inline]
pub fn enter_alt_screen<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?1049h")
}

/// Exit alternate screen buffer.
#[inline]
pub fn exit_alt_screen<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?1049l")
}

// =============================================================================
// Colors and Attributes
// =============================================================================

/// Reset all attributes and colors.
#[inline]
pub fn reset<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[0m")
}

/// Set a 256-color foreground.
#[inline]
pub fn fg<W: Write>(w: &mut W, index: u8) -> std::io::Result<()> {
    write!(w, "\x1b[38;5;{}m", index)
}

/// Set a 256-color background.
#[inline]
pub fn bg<W: Write>(w: &mut W, index: u8) -> std::io::Result<()> {
    write!(w, "\x1b[48;5;{}m", index)
}

/// Emit one SGR sequence per active text attribute.
pub fn attrs<W: Write>(w: &mut W, attr: Attr) -> std::io::Result<()> {
    const CODES: [(Attr, u8); 5] = [
        (Attr::BOLD, 1),
        (Attr::ITALIC, 3),
        (Attr::UNDERLINE, 4),
        (Attr::REVERSE, 7),
        (Attr::STRIKETHROUGH, 9),
    ];

    for (flag, code) in CODES {
        if attr.contains(flag) {
            write!(w, "\x1b[{}m", code)?;
        }
    }
    Ok(())
}

/// Reset, then apply every active part of `style`.
///
/// Unset colors (index 0) are left at the terminal default.
pub fn style<W: Write>(w: &mut W, style: Style) -> std::io::Result<()> {
    reset(w)?;
    if style.fg != 0 {
        fg(w, style.fg)?;
    }
    if style.bg != 0 {
        bg(w, style.bg)?;
    }
    attrs(w, style.attrs)
}

// =============================================================================
// Tests
// =============================================================================
