//! Stock widgets built from the view primitives.
//!
//! Widgets keep no hidden state. Whatever must outlive a frame (selection,
//! scroll offset, edited text) lives in a state struct owned by the
//! application and shared with the widget through `Rc<RefCell<_>>`, so both
//! the layout-time producer and the key handler can reach it.

use std::cell::RefCell;
use std::rc::Rc;

use super::{cursor, inline_stack, lazy, map, map_n, text, vstack, View};
use crate::input::{Key, Outcome};
use crate::layout::text_measure::string_width;
use crate::types::Direction;

/// Priority given to modal widgets so they see keys first.
pub const MODAL_PRIORITY: i32 = 1_000;

// =============================================================================
// List
// =============================================================================

/// Selection and scroll position of a [`list`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListState {
    pub selected: usize,
    pub offset: i32,
}

/// A vertical list of one-row items with an underlined selection.
///
/// Up/Down move the selection. The list scrolls just enough to keep the
/// selected row visible.
pub fn list(state: &Rc<RefCell<ListState>>, items: Vec<View>) -> View {
    let len = items.len();
    let last = len.saturating_sub(1);
    let layout_state = Rc::clone(state);
    let key_state = Rc::clone(state);

    lazy(Direction::Vertical, move |viewport| {
        let mut state = layout_state.borrow_mut();
        state.selected = state.selected.min(last);

        let selected = state.selected as i32;
        if selected + state.offset >= viewport.height {
            state.offset = viewport.height - selected - 1;
        }
        if selected < -state.offset {
            state.offset = -selected;
        }
        viewport.offset_y = state.offset;

        let selected = state.selected;
        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| item.height(1).when(i == selected, View::underline))
            .collect()
    })
    .key_handler(move |key| {
        let mut state = key_state.borrow_mut();
        match key {
            Key::Up => state.selected = state.selected.saturating_sub(1),
            Key::Down => state.selected = (state.selected + 1).min(last),
            _ => return Outcome::Unhandled,
        }
        Outcome::Handled
    })
}

/// A [`list`] with one row per item.
pub fn list_map<T>(
    state: &Rc<RefCell<ListState>>,
    items: impl IntoIterator<Item = T>,
    f: impl FnMut(T) -> View,
) -> View {
    list(state, map(items, f))
}

/// A [`list`] with one row per index in `0..n`.
pub fn list_map_n(
    state: &Rc<RefCell<ListState>>,
    n: usize,
    f: impl FnMut(usize) -> View,
) -> View {
    list(state, map_n(n, f))
}

// =============================================================================
// Scroll view
// =============================================================================

/// Vertical offset of a [`scroll_view`] (0 or negative).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    pub offset: i32,
}

/// A vertical stack that may be taller than its frame.
///
/// Up/Down scroll by one row. The offset is kept between
/// `height - content_height` and 0, so the content never scrolls past
/// its last line.
pub fn scroll_view(state: &Rc<RefCell<ScrollState>>, items: Vec<View>) -> View {
    let layout_state = Rc::clone(state);
    let key_state = Rc::clone(state);

    lazy(Direction::Vertical, move |viewport| {
        let content: i32 = items
            .iter()
            .filter_map(View::node)
            .map(|node| node.measured_height(viewport.width))
            .sum();

        let mut state = layout_state.borrow_mut();
        if viewport.height - state.offset >= content {
            state.offset = viewport.height - content;
        }
        if state.offset > 0 {
            state.offset = 0;
        }
        viewport.offset_y = state.offset;
        items
    })
    .allow_overflow()
    .key_handler(move |key| {
        let mut state = key_state.borrow_mut();
        match key {
            Key::Up => state.offset += 1,
            Key::Down => state.offset -= 1,
            _ => return Outcome::Unhandled,
        }
        Outcome::Handled
    })
}

// =============================================================================
// Text field
// =============================================================================

/// Content and cursor of a [`text_field`].
///
/// `position` is a byte offset into `text`, always on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFieldState {
    pub text: String,
    pub position: usize,
}

impl TextFieldState {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let position = text.len();
        Self { text, position }
    }

    /// Cursor position snapped back onto a valid char boundary.
    fn cursor(&self) -> usize {
        let mut position = self.position.min(self.text.len());
        while !self.text.is_char_boundary(position) {
            position -= 1;
        }
        position
    }

    /// Insert a character before the cursor.
    pub fn insert(&mut self, ch: char) {
        let position = self.cursor();
        self.text.insert(position, ch);
        self.position = position + ch.len_utf8();
    }

    /// Remove the character before the cursor.
    pub fn delete_backward(&mut self) {
        let position = self.cursor();
        if let Some(ch) = self.text[..position].chars().next_back() {
            let start = position - ch.len_utf8();
            self.text.replace_range(start..position, "");
            self.position = start;
        }
    }

    pub fn move_left(&mut self) {
        let position = self.cursor();
        if let Some(ch) = self.text[..position].chars().next_back() {
            self.position = position - ch.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        let position = self.cursor();
        if let Some(ch) = self.text[position..].chars().next() {
            self.position = position + ch.len_utf8();
        }
    }

    /// Apply one key. Esc and control keys other than Enter and Backspace
    /// are left for other handlers.
    pub fn handle_key(&mut self, key: Key) -> Outcome {
        match key {
            Key::ENTER => self.insert('\n'),
            Key::BACKSPACE | Key::CTRL_H => self.delete_backward(),
            Key::Left => self.move_left(),
            Key::Right => self.move_right(),
            Key::Up | Key::Down => {}
            Key::Char(ch) if !ch.is_control() => self.insert(ch),
            _ => return Outcome::Unhandled,
        }
        Outcome::Handled
    }
}

/// An editable multi-line text buffer.
///
/// The character under the cursor is drawn inverted and marks the terminal
/// cursor. At the end of the text, or on a line break, a blank cell stands
/// in for it.
pub fn text_field(state: &Rc<RefCell<TextFieldState>>) -> View {
    let body = {
        let state = state.borrow();
        let (before, rest) = state.text.split_at(state.cursor());
        let (under, after) = match rest.chars().next() {
            None => (" ".to_string(), ""),
            Some('\n') => (" ".to_string(), rest),
            Some(ch) => (ch.to_string(), &rest[ch.len_utf8()..]),
        };
        inline_stack([text(before), cursor(under).invert(true), text(after)])
    };

    let key_state = Rc::clone(state);
    vstack([body]).key_handler(move |key| key_state.borrow_mut().handle_key(key))
}

// =============================================================================
// Confirm dialog
// =============================================================================

/// Open/closed flag and current choice of a [`confirm_dialog`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmState {
    pub open: bool,
    pub confirmed: bool,
}

const DIALOG_WIDTH: u16 = 36;
const DIALOG_HEIGHT: u16 = 7;
const BUTTONS: [&str; 3] = [" Yes ", " ", " No "];

/// A bordered yes/no dialog, hidden while closed.
///
/// Left/Right pick an answer. Enter on "Yes" terminates the run, Enter on
/// "No" or Esc closes the dialog. Every other key is swallowed while the
/// dialog is open.
pub fn confirm_dialog(
    state: &Rc<RefCell<ConfirmState>>,
    title: impl Into<String>,
    message: &str,
) -> View {
    let ConfirmState { open, confirmed } = *state.borrow();
    let inner = DIALOG_WIDTH as i32 - 4;
    let message_pad = " ".repeat(((inner - string_width(message)) / 2).max(0) as usize);
    let buttons_width: i32 = BUTTONS.iter().map(|b| string_width(b)).sum();
    let buttons_pad = " ".repeat(((inner - buttons_width) / 2).max(0) as usize);

    let key_state = Rc::clone(state);
    inline_stack([
        text(format!("{message_pad}{message}\n\n{buttons_pad}")),
        text(BUTTONS[0]).invert(confirmed),
        text(BUTTONS[1]),
        text(BUTTONS[2]).invert(!confirmed),
    ])
    .absolute_size(DIALOG_WIDTH, DIALOG_HEIGHT)
    .title(title)
    .border()
    .priority(MODAL_PRIORITY)
    .key_handler(move |key| {
        let mut state = key_state.borrow_mut();
        match key {
            Key::ESC => {
                state.confirmed = false;
                state.open = false;
            }
            Key::Left => state.confirmed = true,
            Key::Right => state.confirmed = false,
            Key::ENTER if state.confirmed => return Outcome::Terminate,
            Key::ENTER => state.open = false,
            _ => {}
        }
        Outcome::Handled
    })
    .hidden(!open)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::HandlerQueue;
    use crate::layout::text_measure::wrap_lines;
    use crate::layout::Molder;
    use crate::renderer::CellBuffer;
    use crate::types::{Attr, Style};
    use crate::view::{spacer, string, Span};

    fn shared<T>(value: T) -> Rc<RefCell<T>> {
        Rc::new(RefCell::new(value))
    }

    fn press(view: View, key: Key) -> Outcome {
        let mut node = view.into_node().unwrap();
        let handler = node.key_handler.as_mut().unwrap();
        handler(key)
    }

    fn render(width: u16, height: u16, root: View) -> CellBuffer {
        let mut buffer = CellBuffer::new(width, height);
        let mut handlers = HandlerQueue::new();
        Molder::new(&mut buffer, &mut handlers)
            .mold_root(root, Style::EMPTY)
            .unwrap();
        buffer
    }

    fn lines(buffer: &CellBuffer) -> Vec<String> {
        (0..buffer.height()).map(|y| buffer.line(y)).collect()
    }

    fn letters() -> Vec<View> {
        ["a", "b", "c", "d", "e"].into_iter().map(text).collect()
    }

    #[test]
    fn test_list_selection_clamped_by_keys() {
        let state = shared(ListState::default());
        let items = || vec![text("a"), text("b")];

        assert_eq!(press(list(&state, items()), Key::Up), Outcome::Handled);
        assert_eq!(state.borrow().selected, 0);

        press(list(&state, items()), Key::Down);
        press(list(&state, items()), Key::Down);
        assert_eq!(state.borrow().selected, 1);

        assert_eq!(press(list(&state, items()), Key::Char('x')), Outcome::Unhandled);
    }

    #[test]
    fn test_list_scrolls_to_keep_selection_visible() {
        let state = shared(ListState {
            selected: 4,
            offset: 0,
        });

        let buffer = render(1, 2, list(&state, letters()));
        assert_eq!(lines(&buffer), vec!["d", "e"]);
        assert_eq!(state.borrow().offset, -3);
        assert!(buffer.get(0, 1).unwrap().style.attrs.contains(Attr::UNDERLINE));
        assert!(!buffer.get(0, 0).unwrap().style.attrs.contains(Attr::UNDERLINE));

        state.borrow_mut().selected = 0;
        let buffer = render(1, 2, list(&state, letters()));
        assert_eq!(lines(&buffer), vec!["a", "b"]);
        assert_eq!(state.borrow().offset, 0);
    }

    #[test]
    fn test_list_selection_past_end_is_clamped_on_layout() {
        let state = shared(ListState {
            selected: 9,
            offset: 0,
        });
        let buffer = render(1, 2, list_map_n(&state, 3, |i| string(i)));
        assert_eq!(state.borrow().selected, 2);
        assert_eq!(lines(&buffer), vec!["1", "2"]);
    }

    #[test]
    fn test_list_map_builds_rows() {
        let state = shared(ListState::default());
        let buffer = render(2, 2, list_map(&state, ["x", "y", "z"], text));
        assert_eq!(lines(&buffer), vec!["x ", "y "]);
    }

    #[test]
    fn test_scroll_view_keys_move_one_row() {
        let state = shared(ScrollState::default());
        assert_eq!(press(scroll_view(&state, letters()), Key::Down), Outcome::Handled);
        assert_eq!(state.borrow().offset, -1);
        assert_eq!(press(scroll_view(&state, letters()), Key::Up), Outcome::Handled);
        assert_eq!(state.borrow().offset, 0);
        assert_eq!(press(scroll_view(&state, letters()), Key::ENTER), Outcome::Unhandled);
    }

    #[test]
    fn test_scroll_view_renders_offset() {
        let state = shared(ScrollState { offset: -1 });
        let buffer = render(1, 2, scroll_view(&state, letters()));
        assert_eq!(lines(&buffer), vec!["b", "c"]);
    }

    #[test]
    fn test_scroll_view_offset_is_clamped() {
        // Five rows in a two-row viewport: the offset stays within -3..=0.
        let state = shared(ScrollState { offset: -10 });
        let buffer = render(1, 2, scroll_view(&state, letters()));
        assert_eq!(state.borrow().offset, -3);
        assert_eq!(lines(&buffer), vec!["d", "e"]);

        state.borrow_mut().offset = 4;
        let buffer = render(1, 2, scroll_view(&state, letters()));
        assert_eq!(state.borrow().offset, 0);
        assert_eq!(lines(&buffer), vec!["a", "b"]);
    }

    #[test]
    fn test_scroll_view_overflow_is_clipped_to_its_frame() {
        // The wrapped leaf is three rows tall inside a two-row scroll view.
        let state = shared(ScrollState::default());
        let root = || vstack([scroll_view(&state, vec![text("abcdef")]).height(2), spacer()]);

        let buffer = render(2, 4, root());
        assert_eq!(lines(&buffer), vec!["ab", "cd", "  ", "  "]);

        state.borrow_mut().offset = -1;
        let buffer = render(2, 4, root());
        assert_eq!(state.borrow().offset, -1);
        assert_eq!(lines(&buffer), vec!["cd", "ef", "  ", "  "]);
    }

    #[test]
    fn test_text_field_editing() {
        let mut field = TextFieldState::default();
        for ch in "héllo".chars() {
            field.handle_key(Key::Char(ch));
        }
        assert_eq!(field.text, "héllo");

        field.handle_key(Key::Left);
        field.handle_key(Key::Left);
        field.handle_key(Key::Left);
        field.handle_key(Key::Left);
        assert_eq!(field.position, 1);
        field.handle_key(Key::Right);
        assert_eq!(field.position, 3);

        field.handle_key(Key::BACKSPACE);
        assert_eq!(field.text, "hllo");
        assert_eq!(field.position, 1);

        field.handle_key(Key::ENTER);
        assert_eq!(field.text, "h\nllo");
        assert_eq!(field.position, 2);
    }

    #[test]
    fn test_text_field_leaves_escape_unhandled() {
        let mut field = TextFieldState::new("abc");
        assert_eq!(field.handle_key(Key::ESC), Outcome::Unhandled);
        assert_eq!(field.handle_key(Key::Up), Outcome::Handled);
        assert_eq!(field.text, "abc");
    }

    #[test]
    fn test_text_field_backspace_at_start_is_noop() {
        let mut field = TextFieldState::new("ab");
        field.position = 0;
        field.delete_backward();
        assert_eq!(field.text, "ab");
        assert_eq!(field.position, 0);
    }

    #[test]
    fn test_text_field_renders_cursor_cell() {
        let state = shared(TextFieldState::new("ab"));
        let view = text_field(&state);
        assert!(!view.is_leaf());

        state.borrow_mut().position = 1;
        let node = text_field(&state).into_node().unwrap();
        let crate::view::Payload::Container { children, .. } = node.payload else {
            panic!("text field is a container");
        };
        let mut viewport = crate::view::Viewport::default();
        let body = children(&mut viewport).remove(0);
        let runs: Vec<Span> = body.node().unwrap().spans().unwrap().to_vec();
        assert_eq!(runs[1].text, "b");
        assert!(runs[1].style.has_cursor());
        assert_eq!(wrap_lines(&runs, 10), vec!["ab"]);
    }

    #[test]
    fn test_confirm_dialog_flow() {
        let state = shared(ConfirmState { open: true, confirmed: false });
        let dialog = || confirm_dialog(&state, "Quit", "Are you sure?");

        assert_eq!(press(dialog(), Key::ENTER), Outcome::Handled);
        assert!(!state.borrow().open);
        assert!(dialog().is_empty());

        state.borrow_mut().open = true;
        press(dialog(), Key::Left);
        assert!(state.borrow().confirmed);
        assert_eq!(press(dialog(), Key::ENTER), Outcome::Terminate);
    }

    #[test]
    fn test_confirm_dialog_escape_closes() {
        let state = shared(ConfirmState { open: true, confirmed: true });
        press(confirm_dialog(&state, "Quit", "?"), Key::ESC);
        assert_eq!(*state.borrow(), ConfirmState::default());
    }
}
