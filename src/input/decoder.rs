//! Escape-sequence key decoder.
//!
//! Turns the front of a buffer of received characters into one [`Key`].
//! Only the CSI form of the arrow keys (`ESC [ A..D`) is recognized; any
//! other escape sequence comes out one character at a time.

use super::keys::Key;

const ESC: char = '\u{1b}';

/// Decode one key from the front of `buffer`.
///
/// Returns the key and how many characters it consumed. An empty buffer
/// gives `(Key::Null, 0)`, which callers use as the stop condition.
pub fn decode(buffer: &[char]) -> (Key, usize) {
    match buffer {
        [] => (Key::Null, 0),
        [ESC, '[', last, ..] => match Key::arrow(*last) {
            Some(arrow) => (arrow, 3),
            None => (Key::ESC, 1),
        },
        [first, ..] => (Key::Char(*first), 1),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test_case("", Key::Null, 0 ; "empty")]
    #[test_case("a", Key::Char('a'), 1 ; "plain")]
    #[test_case("日本", Key::Char('日'), 1 ; "wide")]
    #[test_case("\x1b[A", Key::Up, 3 ; "up")]
    #[test_case("\x1b[B", Key::Down, 3 ; "down")]
    #[test_case("\x1b[C", Key::Right, 3 ; "right")]
    #[test_case("\x1b[Dxyz", Key::Left, 3 ; "left with trailing input")]
    #[test_case("\x1b[", Key::ESC, 1 ; "truncated sequence")]
    #[test_case("\x1b[Z", Key::ESC, 1 ; "unknown final byte")]
    #[test_case("\x1bOA", Key::ESC, 1 ; "ss3 arrow is not special")]
    #[test_case("\x03", Key::CTRL_C, 1 ; "interrupt")]
    fn test_decode(input: &str, key: Key, used: usize) {
        assert_eq!(decode(&chars(input)), (key, used));
    }

    #[test]
    fn test_decode_sequence_of_keys() {
        let input = chars("a\x1b[Bb\x1bOA");
        let mut rest = &input[..];
        let mut keys = Vec::new();
        while let (key, used @ 1..) = decode(rest) {
            keys.push(key);
            rest = &rest[used..];
        }
        assert_eq!(
            keys,
            vec![
                Key::Char('a'),
                Key::Down,
                Key::Char('b'),
                Key::ESC,
                Key::Char('O'),
                Key::Char('A'),
            ]
        );
    }
}
