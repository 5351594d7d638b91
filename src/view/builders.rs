//! View constructors.
//!
//! Leaves: [`text`], [`string`], [`spans`], [`cursor`], [`line_break`].
//! Containers: [`hstack`], [`vstack`], [`zstack`], [`lazy`], [`spacer`].
//! [`inline_stack`] flattens leaf children into a single leaf so their runs
//! wrap together like one paragraph.
//!
//! The `*map*` helpers turn an iterator of items into views.

use super::{Payload, Span, View, Viewport};
use crate::types::{Attr, Direction, Style};

// =============================================================================
// Leaves
// =============================================================================

/// A text leaf.
pub fn text(content: impl Into<String>) -> View {
    View::leaf(vec![Span::raw(content)])
}

/// A text leaf from anything displayable.
pub fn string(value: impl ToString) -> View {
    text(value.to_string())
}

/// A leaf from pre-styled runs.
pub fn spans(runs: impl IntoIterator<Item = Span>) -> View {
    View::leaf(runs.into_iter().collect())
}

/// A text leaf whose cells mark the terminal cursor position.
pub fn cursor(content: impl Into<String>) -> View {
    text(content).style(Style::EMPTY.with(Attr::CURSOR))
}

/// A hard line break, useful inside [`inline_stack`].
pub fn line_break() -> View {
    text("\n")
}

// =============================================================================
// Containers
// =============================================================================

/// An empty layered container. Takes its share of space and paints nothing
/// unless styled.
pub fn spacer() -> View {
    View::container(Direction::Layered, Box::new(|_| Vec::new()))
}

fn stack(direction: Direction, children: impl IntoIterator<Item = View>) -> View {
    let children: Vec<View> = children.into_iter().collect();
    View::container(direction, Box::new(move |_| children))
}

/// Children side by side, left to right.
pub fn hstack(children: impl IntoIterator<Item = View>) -> View {
    stack(Direction::Horizontal, children)
}

/// Children top to bottom.
pub fn vstack(children: impl IntoIterator<Item = View>) -> View {
    stack(Direction::Vertical, children)
}

/// Children layered in the same area, each centered.
pub fn zstack(children: impl IntoIterator<Item = View>) -> View {
    stack(Direction::Layered, children)
}

/// A container whose children are produced during layout.
///
/// `produce` sees the container's resolved inner size and may set
/// [`Viewport::offset_y`] to scroll what it returns.
pub fn lazy<F>(direction: Direction, produce: F) -> View
where
    F: FnOnce(&mut Viewport) -> Vec<View> + 'static,
{
    View::container(direction, Box::new(produce))
}

/// Merge leaf children into one leaf.
///
/// Each child's style is layered under its runs, so per-child colors and
/// attributes survive. Empty and container children are dropped.
pub fn inline_stack(children: impl IntoIterator<Item = View>) -> View {
    let mut runs = Vec::new();
    for child in children {
        let Some(node) = child.into_node() else {
            continue;
        };
        let style = node.style;
        if let Payload::Leaf(spans) = node.payload {
            runs.extend(spans.into_iter().map(|span| Span {
                style: span.style.over(style),
                text: span.text,
            }));
        }
    }
    View::leaf(runs)
}

// =============================================================================
// Mapping helpers
// =============================================================================

/// One view per item.
pub fn map<T>(items: impl IntoIterator<Item = T>, f: impl FnMut(T) -> View) -> Vec<View> {
    items.into_iter().map(f).collect()
}

/// One view per index in `0..n`.
pub fn map_n(n: usize, f: impl FnMut(usize) -> View) -> Vec<View> {
    (0..n).map(f).collect()
}

pub fn hmap<T>(items: impl IntoIterator<Item = T>, f: impl FnMut(T) -> View) -> View {
    hstack(map(items, f))
}

pub fn vmap<T>(items: impl IntoIterator<Item = T>, f: impl FnMut(T) -> View) -> View {
    vstack(map(items, f))
}

pub fn vmap_n(n: usize, f: impl FnMut(usize) -> View) -> View {
    vstack(map_n(n, f))
}

pub fn zmap<T>(items: impl IntoIterator<Item = T>, f: impl FnMut(T) -> View) -> View {
    zstack(map(items, f))
}

pub fn inline_map<T>(items: impl IntoIterator<Item = T>, f: impl FnMut(T) -> View) -> View {
    inline_stack(map(items, f))
}

pub fn inline_map_n(n: usize, f: impl FnMut(usize) -> View) -> View {
    inline_stack(map_n(n, f))
}

// =============================================================================
// Tests
// =============================================================================
