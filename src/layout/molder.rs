//! The molding pass: size, place and paint one view tree.
//!
//! A node receives its frame from its parent. It resolves its style, paints
//! its own decoration and text, registers its key handler, and then sizes
//! its children in two passes:
//!
//! 1. Explicit sizes: absolute sizes are kept, relative sizes become
//!    `available * n / 12`, and a text leaf inside a vertical stack gets the
//!    height its wrapped text needs at its final width.
//! 2. Auto sizes: along the stacking axis the remaining space is split
//!    between auto children in order, each taking `remaining / autos_left`.
//!    Across the stacking axis (and in layered stacks) auto means the whole
//!    available extent.
//!
//! Children are placed one after another along the stacking axis, or
//! centered in layered stacks. Everything a child paints is clipped to its
//! parent's inner area intersected with the parent's own clip rectangle.

use tracing::trace;

use super::text_measure::flow;
use crate::error::{Error, Result};
use crate::input::HandlerQueue;
use crate::renderer::CellBuffer;
use crate::types::{Cell, Direction, Frame, Style};
use crate::view::{zstack, Node, Payload, Span, View, Viewport};

/// Lays out a view tree into a cell buffer.
///
/// Holds the two outputs of a frame: the painted cells and the key handlers
/// of every view that was reached.
pub struct Molder<'a> {
    buffer: &'a mut CellBuffer,
    handlers: &'a mut HandlerQueue,
}

impl<'a> Molder<'a> {
    pub fn new(buffer: &'a mut CellBuffer, handlers: &'a mut HandlerQueue) -> Self {
        Self { buffer, handlers }
    }

    /// Mold `root` over the whole buffer.
    ///
    /// The root is wrapped in a layered container sized to the screen, so a
    /// root with an explicit size is centered.
    pub fn mold_root(&mut self, root: View, ambient: Style) -> Result<()> {
        let screen = self.buffer.bounds();
        let root = zstack([root]).absolute_size(self.buffer.width(), self.buffer.height());
        self.mold(root, screen, screen, ambient, false)
    }

    /// Mold one view into `frame`, painting only inside `bounds`.
    ///
    /// Unless `allow_overflow` is set, a frame reaching past the right or
    /// bottom edge of the screen fails with [`Error::TerminalTooSmall`].
    pub fn mold(
        &mut self,
        view: View,
        frame: Frame,
        bounds: Frame,
        ambient: Style,
        allow_overflow: bool,
    ) -> Result<()> {
        match view.into_node() {
            Some(node) => self.mold_node(*node, frame, bounds, ambient, allow_overflow),
            None => Ok(()),
        }
    }

    fn mold_node(
        &mut self,
        node: Node,
        frame: Frame,
        bounds: Frame,
        ambient: Style,
        allow_overflow: bool,
    ) -> Result<()> {
        let (width, height) = (self.buffer.width(), self.buffer.height());
        if !allow_overflow && (frame.right() > width as i32 || frame.bottom() > height as i32) {
            return Err(Error::TerminalTooSmall {
                width,
                height,
                frame,
            });
        }

        let style = node.style.merge(ambient);
        let paint = style.without_cursor();
        let inner = frame.inset(node.padding);
        let is_leaf = node.spans().is_some();

        if node.border.is_some() || node.title.is_some() || is_leaf || style.bg != 0 {
            self.buffer.fill_rect(frame, bounds, Cell::blank(paint));
        }
        if let Some(border) = node.border {
            self.buffer
                .put_border(frame, bounds, border.merge(style).without_cursor());
        }
        if let Some(title) = &node.title {
            self.buffer.put_title(
                frame,
                frame.intersect(&bounds),
                inner.width,
                &format!(" {title} "),
                paint,
            );
        }
        if let Some(handler) = node.key_handler {
            self.handlers.push(node.priority, handler);
        }

        match node.payload {
            Payload::Leaf(spans) => {
                self.mold_text(&spans, style, inner, bounds, allow_overflow);
                Ok(())
            }
            Payload::Container {
                direction,
                children,
            } => {
                let mut viewport = Viewport {
                    width: inner.width,
                    height: inner.height,
                    offset_y: node.offset_y,
                };
                let children: Vec<Node> = children(&mut viewport)
                    .into_iter()
                    .filter_map(View::into_node)
                    .map(|child| *child)
                    .collect();
                let layout = ChildLayout {
                    direction,
                    frame,
                    inner,
                    bottom_padding: node.padding.bottom as i32,
                    offset_y: viewport.offset_y,
                };
                let overflow = allow_overflow || node.allow_overflow;
                self.mold_children(children, &layout, inner.intersect(&bounds), style, overflow)
            }
        }
    }

    /// Paint wrapped text runs inside `inner`.
    ///
    /// Lines past the inner height are dropped unless overflow is allowed;
    /// either way nothing is written outside `bounds`.
    fn mold_text(
        &mut self,
        spans: &[Span],
        style: Style,
        inner: Frame,
        bounds: Frame,
        allow_overflow: bool,
    ) {
        let clip = Frame::new(inner.x, bounds.y, inner.width, bounds.height).intersect(&bounds);
        let buffer = &mut *self.buffer;
        flow(spans, inner.width, |run, placed| {
            if !allow_overflow && placed.line >= inner.height {
                return false;
            }
            let y = inner.y + placed.line;
            if y >= clip.bottom() {
                return false;
            }
            if y < clip.y {
                return true;
            }
            let x = inner.x + placed.x;
            let cell_style = spans[run].style.merge(style);
            if !clip.contains(x, y) {
                return true;
            }
            if placed.width == 2 {
                // A wide glyph whose second column is clipped becomes a blank.
                if clip.contains(x + 1, y) {
                    buffer.put(x, y, Cell::new(placed.ch, 2, cell_style));
                    buffer.put(x + 1, y, Cell::filler(cell_style));
                } else {
                    buffer.put(x, y, Cell::blank(cell_style.without_cursor()));
                }
            } else {
                buffer.put(x, y, Cell::new(placed.ch, placed.width as u8, cell_style));
            }
            true
        });
    }

    fn mold_children(
        &mut self,
        mut children: Vec<Node>,
        layout: &ChildLayout,
        bounds: Frame,
        style: Style,
        allow_overflow: bool,
    ) -> Result<()> {
        let ChildLayout {
            direction, inner, ..
        } = *layout;

        // Pass 1: explicit sizes.
        let mut remaining_width = inner.width;
        let mut remaining_height = inner.height;
        let mut auto_widths = 0;
        let mut auto_heights = 0;
        for child in &mut children {
            if child.absolute_width == 0 {
                child.absolute_width = inner.width * child.relative_width as i32 / 12;
            }
            if child.absolute_height == 0
                && direction == Direction::Vertical
                && child.spans().is_some()
            {
                child.absolute_width = child.width_within(inner.width);
                child.absolute_height = child.measured_height(inner.width);
            }
            if child.absolute_height == 0 {
                child.absolute_height = inner.height * child.relative_height as i32 / 12;
            }

            remaining_width -= child.absolute_width;
            remaining_height -= child.absolute_height;
            if child.absolute_width == 0 {
                auto_widths += 1;
            }
            if child.absolute_height == 0 {
                auto_heights += 1;
            }
        }
        trace!(
            children = children.len(),
            auto_widths,
            auto_heights,
            remaining_width,
            remaining_height,
            "sized children"
        );

        // Pass 2: auto sizes and placement.
        let mut next_x = inner.x;
        let mut next_y = inner.y + layout.offset_y;
        for mut child in children {
            if child.absolute_width == 0 {
                child.absolute_width = if direction == Direction::Horizontal {
                    let share = (remaining_width / auto_widths).max(0);
                    auto_widths -= 1;
                    remaining_width -= share;
                    share
                } else {
                    inner.width
                };
            }
            if child.absolute_height == 0 {
                child.absolute_height = if direction == Direction::Vertical {
                    let share = (remaining_height / auto_heights).max(0);
                    auto_heights -= 1;
                    remaining_height -= share;
                    share
                } else {
                    inner.height
                };
            }

            let x = match direction {
                Direction::Horizontal => next_x,
                _ => inner.x + (inner.width - child.absolute_width) / 2,
            };
            let y = match direction {
                Direction::Vertical => next_y,
                _ => inner.y + (inner.height - child.absolute_height) / 2,
            };
            if y + layout.bottom_padding >= layout.frame.bottom() {
                break;
            }

            let child_frame = Frame::new(x, y, child.absolute_width, child.absolute_height);
            match direction {
                Direction::Horizontal => next_x += child.absolute_width,
                Direction::Vertical => next_y += child.absolute_height,
                Direction::Layered => {}
            }
            self.mold_node(child, child_frame, bounds, style, allow_overflow)?;
        }
        Ok(())
    }
}

/// Geometry a container hands down to its children.
#[derive(Debug, Clone, Copy)]
struct ChildLayout {
    direction: Direction,
    frame: Frame,
    inner: Frame,
    bottom_padding: i32,
    offset_y: i32,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, Outcome};
    use crate::types::Attr;
    use crate::view::{cursor, hstack, inline_stack, spacer, text, vstack};

    fn render(width: u16, height: u16, root: View) -> Result<(CellBuffer, HandlerQueue)> {
        let mut buffer = CellBuffer::new(width, height);
        let mut handlers = HandlerQueue::new();
        Molder::new(&mut buffer, &mut handlers).mold_root(root, Style::EMPTY)?;
        Ok((buffer, handlers))
    }

    fn lines(buffer: &CellBuffer) -> Vec<String> {
        (0..buffer.height()).map(|y| buffer.line(y)).collect()
    }

    #[test]
    fn test_text_fills_screen_from_origin() {
        let (buffer, _) = render(6, 2, text("hello world")).unwrap();
        assert_eq!(lines(&buffer), vec!["hello ", "world "]);
    }

    #[test]
    fn test_vstack_leaf_heights_come_from_wrapping() {
        let root = vstack([text("abcdef"), text("g")]);
        let (buffer, _) = render(3, 4, root).unwrap();
        assert_eq!(lines(&buffer), vec!["abc", "def", "g  ", "   "]);
    }

    #[test]
    fn test_hstack_splits_remainder_between_autos() {
        let root = hstack([
            spacer().bg(1),
            text("x").width(2).bg(2),
            spacer().bg(3),
        ]);
        let (buffer, _) = render(7, 1, root).unwrap();
        let bgs: Vec<u8> = buffer.row(0).iter().map(|c| c.style.bg).collect();
        assert_eq!(bgs, vec![1, 1, 2, 2, 3, 3, 3]);
    }

    #[test]
    fn test_relative_size_in_twelfths() {
        let root = hstack([spacer().relative_size(3, 0).bg(5), spacer().bg(6)]);
        let (buffer, _) = render(12, 1, root).unwrap();
        let fives = buffer.row(0).iter().filter(|c| c.style.bg == 5).count();
        assert_eq!(fives, 3);
    }

    #[test]
    fn test_layered_children_are_centered() {
        let root = text("ab").absolute_size(2, 1);
        let (buffer, _) = render(6, 3, root).unwrap();
        assert_eq!(lines(&buffer), vec!["      ", "  ab  ", "      "]);
    }

    #[test]
    fn test_border_and_title() {
        let root = text("hi").border().title("T");
        let (buffer, _) = render(8, 5, root).unwrap();
        assert_eq!(
            lines(&buffer),
            vec!["╭─ T ──╮", "│      │", "│ hi   │", "│      │", "╰──────╯"]
        );
    }

    #[test]
    fn test_too_small_terminal_fails() {
        let err = render(4, 2, text("x").absolute_size(5, 1)).unwrap_err();
        assert!(matches!(err, Error::TerminalTooSmall { width: 4, height: 2, .. }));
    }

    #[test]
    fn test_overflow_is_clipped_instead_of_failing() {
        let root = vstack([text("a").height(3), text("b").height(3)])
            .allow_overflow()
            .absolute_size(3, 4);
        let (buffer, _) = render(3, 4, root).unwrap();
        assert_eq!(buffer.line(0), "a  ");
        assert_eq!(buffer.line(3), "b  ");
    }

    #[test]
    fn test_offset_scrolls_children_and_clips_above() {
        let root = vstack([text("a"), text("b"), text("c")]).offset_y(-1).allow_overflow();
        let (buffer, _) = render(2, 3, root).unwrap();
        assert_eq!(lines(&buffer), vec!["b ", "c ", "  "]);
    }

    #[test]
    fn test_leaf_stops_at_inner_height() {
        let (buffer, _) = render(2, 2, vstack([text("abcdef").height(1)])).unwrap();
        assert_eq!(lines(&buffer), vec!["ab", "  "]);
    }

    #[test]
    fn test_style_inherits_and_inverts() {
        let root = vstack([inline_stack([text("a"), text("b").invert(true)])]).fg(9).bg(4);
        let (buffer, _) = render(2, 1, root).unwrap();
        let a = buffer.get(0, 0).unwrap().style;
        let b = buffer.get(1, 0).unwrap().style;
        assert_eq!((a.fg, a.bg), (9, 4));
        assert_eq!((b.fg, b.bg), (4, 9));
    }

    #[test]
    fn test_wide_glyph_gets_filler() {
        let (buffer, _) = render(3, 1, text("日a")).unwrap();
        assert_eq!(buffer.get(0, 0).unwrap().width, 2);
        assert_eq!(buffer.get(1, 0).unwrap().width, 0);
        assert_eq!(buffer.get(2, 0).unwrap().ch, 'a');
    }

    #[test]
    fn test_wide_glyph_clipped_by_parent_keeps_row_width() {
        let root = hstack([text("abc日").width(6)]).border().absolute_size(8, 5);
        let (buffer, _) = render(8, 5, root).unwrap();

        for y in 0..buffer.height() {
            let row = buffer.row(y);
            for (x, cell) in row.iter().enumerate() {
                if cell.width == 2 {
                    assert_eq!(row.get(x + 1).map(|next| next.width), Some(0), "row {y} col {x}");
                }
            }
        }
        assert_eq!(buffer.line(2), "│ abc  │");
    }

    #[test]
    fn test_cursor_marks_only_text_cells() {
        let root = hstack([text("x"), cursor("_")]);
        let (buffer, _) = render(4, 1, root).unwrap();
        let marked: Vec<i32> = (0..4)
            .filter(|&x| buffer.get(x, 0).unwrap().style.attrs.contains(Attr::CURSOR))
            .collect();
        assert_eq!(marked, vec![2]);
    }

    #[test]
    fn test_key_handlers_registered_with_priority() {
        let root = vstack([
            text("a").key_handler(|_| Outcome::Unhandled).priority(1),
            text("b").key_handler(|_| Outcome::Handled).priority(7),
            text("c"),
        ]);
        let (_, mut handlers) = render(4, 3, root).unwrap();
        assert_eq!(handlers.len(), 2);
        assert_eq!(handlers.pop().map(|(p, _)| p), Some(7));
        assert_eq!(handlers.dispatch(Key::Up), Outcome::Unhandled);
    }

    #[test]
    fn test_lazy_children_see_viewport() {
        use std::cell::Cell as Shared;
        use std::rc::Rc;

        let seen = Rc::new(Shared::new((0, 0)));
        let probe = Rc::clone(&seen);
        let root = crate::view::lazy(Direction::Vertical, move |viewport| {
            probe.set((viewport.width, viewport.height));
            Vec::new()
        })
        .padding(1);
        render(10, 6, root).unwrap();
        assert_eq!(seen.get(), (8, 4));
    }
}
