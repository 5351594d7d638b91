//! Key values produced by the decoder.
//!
//! Terminals in raw mode send plain characters for most keys, control
//! characters for Ctrl combinations, and short escape sequences for the
//! arrow keys. [`Key`] folds those into one value type.

use std::fmt;

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Nothing was decoded (empty input).
    Null,
    /// A single character, including control characters.
    Char(char),
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Interrupt. Always ends the run before any handler sees it.
    pub const CTRL_C: Key = Key::ctrl('c');
    /// Backspace on terminals that send BS instead of DEL.
    pub const CTRL_H: Key = Key::ctrl('h');
    pub const TAB: Key = Key::Char('\t');
    /// Raw mode delivers Enter as a carriage return.
    pub const ENTER: Key = Key::Char('\r');
    pub const ESC: Key = Key::Char('\u{1b}');
    pub const BACKSPACE: Key = Key::Char('\u{7f}');

    /// The control character sent for Ctrl + `letter`.
    pub const fn ctrl(letter: char) -> Key {
        Key::Char(((letter as u8) & 0x1f) as char)
    }

    /// Numeric key code.
    ///
    /// Characters map to their code point. Arrow keys map to their three
    /// escape-sequence bytes packed big-endian (`ESC [ A` is `0x1b5b41`).
    pub const fn code(self) -> u32 {
        match self {
            Key::Null => 0,
            Key::Char(ch) => ch as u32,
            Key::Up => 0x1b5b41,
            Key::Down => 0x1b5b42,
            Key::Right => 0x1b5b43,
            Key::Left => 0x1b5b44,
        }
    }

    /// Arrow key for the final byte of `ESC [ x`.
    pub(crate) const fn arrow(last: char) -> Option<Key> {
        match last {
            'A' => Some(Key::Up),
            'B' => Some(Key::Down),
            'C' => Some(Key::Right),
            'D' => Some(Key::Left),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Key::Null => f.write_str("Null"),
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Left => f.write_str("Left"),
            Key::Right => f.write_str("Right"),
            Key::ENTER => f.write_str("Enter"),
            Key::TAB => f.write_str("Tab"),
            Key::ESC => f.write_str("Esc"),
            Key::BACKSPACE => f.write_str("Backspace"),
            Key::Char(' ') => f.write_str("Space"),
            Key::Char(ch) if (ch as u32) < 0x20 => {
                write!(f, "Ctrl-{}", ((ch as u8) | 0x40) as char)
            }
            Key::Char(ch) => write!(f, "{ch}"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
