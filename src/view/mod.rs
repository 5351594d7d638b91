//! View tree - the declarative description of one frame.
//!
//! Application code builds a fresh tree of [`View`]s every frame. A view is
//! either a leaf holding styled text runs, or a container whose children are
//! produced lazily when the layout engine reaches it. Nothing here does I/O;
//! the tree is consumed by [`crate::layout`] and then dropped.
//!
//! # Empty views
//!
//! A `View` may be empty (see [`View::none`] and [`View::hidden`]). Empty
//! views take no space and are skipped by their parent, and every modifier
//! is a no-op on them, so conditional UI composes without `Option` juggling:
//!
//! ```ignore
//! vstack([
//!     text("always"),
//!     text("sometimes").hidden(!show_details),
//! ])
//! ```

pub mod builders;
pub mod widgets;

pub use builders::*;
pub use widgets::{
    confirm_dialog, list, list_map, list_map_n, scroll_view, text_field, ConfirmState, ListState, ScrollState,
    TextFieldState,
};

use crate::input::{Key, KeyHandler, Outcome};
use crate::layout::text_measure::wrapped_height;
use crate::types::{Attr, Direction, Padding, Style};

/// Padding forced on every side by a border.
pub const BORDER_PADDING: u8 = 2;

/// Top padding forced by a title.
pub const TITLE_PADDING: u8 = 2;

// =============================================================================
// Span
// =============================================================================

/// A run of text with one style.
///
/// The style is layered over the style of the leaf that holds the run and
/// resolved at paint time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    /// Unstyled run.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::EMPTY,
        }
    }

    /// Run with its own style.
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

impl From<&str> for Span {
    fn from(text: &str) -> Self {
        Span::raw(text)
    }
}

impl From<String> for Span {
    fn from(text: String) -> Self {
        Span::raw(text)
    }
}

// =============================================================================
// Viewport
// =============================================================================

/// The resolved inner area of a container, handed to its child producer.
///
/// `offset_y` starts at the container's own offset; a producer may change
/// it to scroll the children it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    pub offset_y: i32,
}

/// Produces a container's children at layout time.
pub type ChildrenFn = Box<dyn FnOnce(&mut Viewport) -> Vec<View>>;

// =============================================================================
// Node
// =============================================================================

/// What a node holds: text, or children.
pub(crate) enum Payload {
    Leaf(Vec<Span>),
    Container {
        direction: Direction,
        children: ChildrenFn,
    },
}

/// A non-empty view.
pub(crate) struct Node {
    /// Size in cells, 0 = auto.
    pub(crate) absolute_width: i32,
    pub(crate) absolute_height: i32,
    /// Size in twelfths of the parent's inner area, 0 = unset.
    pub(crate) relative_width: u8,
    pub(crate) relative_height: u8,
    pub(crate) padding: Padding,
    pub(crate) style: Style,
    pub(crate) border: Option<Style>,
    pub(crate) title: Option<String>,
    pub(crate) priority: i32,
    pub(crate) offset_y: i32,
    pub(crate) allow_overflow: bool,
    pub(crate) payload: Payload,
    pub(crate) key_handler: Option<KeyHandler>,
}

impl Node {
    fn new(payload: Payload) -> Self {
        Self {
            absolute_width: 0,
            absolute_height: 0,
            relative_width: 0,
            relative_height: 0,
            padding: Padding::ZERO,
            style: Style::EMPTY,
            border: None,
            title: None,
            priority: 0,
            offset_y: 0,
            allow_overflow: false,
            payload,
            key_handler: None,
        }
    }

    /// Text runs if this is a leaf.
    pub(crate) fn spans(&self) -> Option<&[Span]> {
        match &self.payload {
            Payload::Leaf(spans) => Some(spans),
            Payload::Container { .. } => None,
        }
    }

    /// Width taken inside a parent `available` cells wide when this node is
    /// not split with siblings: absolute, else relative, else all of it.
    pub(crate) fn width_within(&self, available: i32) -> i32 {
        let width = if self.absolute_width != 0 {
            self.absolute_width
        } else {
            available * self.relative_width as i32 / 12
        };
        if width == 0 { available } else { width }
    }

    /// Height needed inside a vertical parent `available` cells wide.
    ///
    /// An absolute height wins. A leaf needs its wrapped text plus padding;
    /// any other node needs nothing.
    pub(crate) fn measured_height(&self, available: i32) -> i32 {
        if self.absolute_height != 0 {
            return self.absolute_height;
        }
        match self.spans() {
            Some(spans) => {
                let inner = self.width_within(available) - self.padding.horizontal();
                wrapped_height(spans, inner) + self.padding.vertical()
            }
            None => 0,
        }
    }
}

// =============================================================================
// View
// =============================================================================

/// A possibly-empty node of the view tree.
///
/// Built with the constructors in [`builders`] and configured with chained
/// modifiers. Modifiers take `self` by value and return it.
#[must_use]
pub struct View {
    node: Option<Box<Node>>,
}

impl View {
    /// The empty view.
    pub fn none() -> Self {
        Self { node: None }
    }

    pub(crate) fn leaf(spans: Vec<Span>) -> Self {
        Self::from_node(Node::new(Payload::Leaf(spans)))
    }

    pub(crate) fn container(direction: Direction, children: ChildrenFn) -> Self {
        Self::from_node(Node::new(Payload::Container {
            direction,
            children,
        }))
    }

    fn from_node(node: Node) -> Self {
        Self {
            node: Some(Box::new(node)),
        }
    }

    /// Whether this view is empty.
    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    /// Whether this view is a text leaf.
    pub fn is_leaf(&self) -> bool {
        self.node.as_deref().and_then(Node::spans).is_some()
    }

    pub(crate) fn node(&self) -> Option<&Node> {
        self.node.as_deref()
    }

    pub(crate) fn into_node(self) -> Option<Box<Node>> {
        self.node
    }

    #[inline]
    fn map_node(mut self, f: impl FnOnce(&mut Node)) -> Self {
        if let Some(node) = self.node.as_deref_mut() {
            f(node);
        }
        self
    }

    // -------------------------------------------------------------------------
    // Sizing
    // -------------------------------------------------------------------------

    /// Size in twelfths of the parent's inner area (12 = 100%, 0 = auto).
    ///
    /// Values above 12 are allowed and overflow the parent.
    pub fn relative_size(self, width: u8, height: u8) -> Self {
        self.map_node(|node| {
            node.relative_width = width;
            node.relative_height = height;
        })
    }

    /// Size in cells (0 = auto).
    pub fn absolute_size(self, width: u16, height: u16) -> Self {
        self.map_node(|node| {
            node.absolute_width = width as i32;
            node.absolute_height = height as i32;
        })
    }

    /// Width in cells, height untouched.
    pub fn width(self, width: u16) -> Self {
        self.map_node(|node| node.absolute_width = width as i32)
    }

    /// Height in cells, width untouched.
    pub fn height(self, height: u16) -> Self {
        self.map_node(|node| node.absolute_height = height as i32)
    }

    /// Padding inside the frame, CSS shorthand via [`Padding`]'s `From` impls.
    pub fn padding(self, padding: impl Into<Padding>) -> Self {
        let padding = padding.into();
        self.map_node(|node| node.padding = padding)
    }

    // -------------------------------------------------------------------------
    // Decoration
    // -------------------------------------------------------------------------

    /// Title written on the top edge. Forces a top padding of 2.
    pub fn title(self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.map_node(|node| {
            node.padding.top = TITLE_PADDING;
            node.title = Some(title);
        })
    }

    /// Rounded border in the view's own style. Forces a padding of 2.
    pub fn border(self) -> Self {
        self.border_style(Style::EMPTY)
    }

    /// Rounded border with its own style, resolved against the view's style.
    pub fn border_style(self, style: Style) -> Self {
        self.map_node(|node| {
            node.padding = Padding::all(BORDER_PADDING);
            node.border = Some(style);
        })
    }

    /// Replace the whole style override.
    pub fn style(self, style: Style) -> Self {
        self.map_node(|node| node.style = style)
    }

    /// Foreground palette index.
    pub fn fg(self, color: u8) -> Self {
        self.map_node(|node| node.style.fg = color)
    }

    /// Background palette index.
    pub fn bg(self, color: u8) -> Self {
        self.map_node(|node| node.style.bg = color)
    }

    fn attr(self, attr: Attr) -> Self {
        self.map_node(|node| node.style.attrs.insert(attr))
    }

    pub fn bold(self) -> Self {
        self.attr(Attr::BOLD)
    }

    pub fn italic(self) -> Self {
        self.attr(Attr::ITALIC)
    }

    pub fn underline(self) -> Self {
        self.attr(Attr::UNDERLINE)
    }

    pub fn strikethrough(self) -> Self {
        self.attr(Attr::STRIKETHROUGH)
    }

    pub fn reverse(self) -> Self {
        self.attr(Attr::REVERSE)
    }

    /// Swap the resolved foreground and background.
    pub fn invert(self, invert: bool) -> Self {
        self.map_node(|node| node.style.attrs.set(Attr::INVERT, invert))
    }

    // -------------------------------------------------------------------------
    // Behavior
    // -------------------------------------------------------------------------

    /// Handle keys while this view is on screen.
    ///
    /// Handlers run in descending [`priority`](View::priority) order until
    /// one returns something other than [`Outcome::Unhandled`].
    pub fn key_handler<F>(self, handler: F) -> Self
    where
        F: FnMut(Key) -> Outcome + 'static,
    {
        self.map_node(|node| node.key_handler = Some(Box::new(handler)))
    }

    /// Dispatch priority of this view's key handler.
    pub fn priority(self, priority: i32) -> Self {
        self.map_node(|node| node.priority = priority)
    }

    /// Vertical offset applied to the children of a container.
    pub fn offset_y(self, offset: i32) -> Self {
        self.map_node(|node| node.offset_y = offset)
    }

    /// Let descendants extend past the terminal; they are clipped instead
    /// of failing the frame.
    pub fn allow_overflow(self) -> Self {
        self.map_node(|node| node.allow_overflow = true)
    }

    /// Remove the view entirely when `hidden` is true.
    pub fn hidden(self, hidden: bool) -> Self {
        if hidden {
            View::none()
        } else {
            self
        }
    }

    /// Apply `f` only when `condition` holds.
    pub fn when(self, condition: bool, f: impl FnOnce(View) -> View) -> Self {
        if condition && !self.is_empty() {
            f(self)
        } else {
            self
        }
    }
}

impl Default for View {
    fn default() -> Self {
        View::none()
    }
}

impl From<Option<View>> for View {
    fn from(view: Option<View>) -> Self {
        view.unwrap_or_default()
    }
}

impl std::fmt::Debug for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.node.as_deref() {
            None => f.write_str("View::none"),
            Some(node) => {
                let kind = match &node.payload {
                    Payload::Leaf(_) => "leaf",
                    Payload::Container { .. } => "container",
                };
                f.debug_struct("View")
                    .field("kind", &kind)
                    .field("absolute_width", &node.absolute_width)
                    .field("absolute_height", &node.absolute_height)
                    .field("padding", &node.padding)
                    .field("style", &node.style)
                    .finish_non_exhaustive()
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_on_empty_view_are_noops() {
        let view = View::none()
            .bold()
            .border()
            .title("x")
            .absolute_size(3, 3)
            .key_handler(|_| Outcome::Handled);
        assert!(view.is_empty());
    }

    #[test]
    fn test_border_forces_padding() {
        let view = text("a").padding(1).border();
        assert_eq!(view.node().unwrap().padding, Padding::all(2));
    }

    #[test]
    fn test_title_forces_top_padding() {
        let view = text("a").padding((0, 1)).title("t");
        let padding = view.node().unwrap().padding;
        assert_eq!(padding.top, 2);
        assert_eq!(padding.leading, 1);
        assert_eq!(padding.bottom, 0);
    }

    #[test]
    fn test_hidden_removes_view() {
        assert!(text("a").hidden(true).is_empty());
        assert!(!text("a").hidden(false).is_empty());
    }

    #[test]
    fn test_when_applies_conditionally() {
        let on = text("a").when(true, View::bold);
        let off = text("a").when(false, View::bold);
        assert!(on.node().unwrap().style.attrs.contains(Attr::BOLD));
        assert!(!off.node().unwrap().style.attrs.contains(Attr::BOLD));
    }

    #[test]
    fn test_invert_toggles() {
        let view = text("a").invert(true);
        assert!(view.node().unwrap().style.attrs.contains(Attr::INVERT));
        let view = view.invert(false);
        assert!(!view.node().unwrap().style.attrs.contains(Attr::INVERT));
    }

    #[test]
    fn test_measured_height_includes_padding() {
        let view = text("abcdef").padding((1, 1));
        // 6 glyphs in 3 columns (5 - 2 padding) -> 2 lines, + 2 padding.
        assert_eq!(view.node().unwrap().measured_height(5), 4);
    }
}
