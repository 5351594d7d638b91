//! Core types for tervi.
//!
//! These types define the foundation that everything builds on.
//! They flow from the view tree through layout into the cell buffer,
//! and define what the renderer understands.

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const STRIKETHROUGH = 1 << 3;
        const REVERSE = 1 << 4;
        /// Swap resolved foreground and background. Consumed by [`Style::merge`].
        const INVERT = 1 << 5;
        /// The terminal cursor is parked on this cell after drawing.
        const CURSOR = 1 << 6;
    }
}

// =============================================================================
// Style
// =============================================================================

/// Foreground used by an inverted style whose background was unset.
pub const INVERT_FALLBACK_FG: u8 = 16;

/// Background used by an inverted style whose foreground was unset.
pub const INVERT_FALLBACK_BG: u8 = 15;

/// Visual attributes of a cell.
///
/// Colors are 256-color palette indices. Index 0 means "unset": the value
/// is inherited from the ambient style during [`Style::merge`], and a
/// resolved 0 renders as the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: u8,
    pub bg: u8,
    pub attrs: Attr,
}

impl Style {
    /// The fully-unset style.
    pub const EMPTY: Self = Self {
        fg: 0,
        bg: 0,
        attrs: Attr::NONE,
    };

    /// Create a style from colors and attributes.
    pub const fn new(fg: u8, bg: u8, attrs: Attr) -> Self {
        Self { fg, bg, attrs }
    }

    /// Style with only a foreground color.
    pub const fn fg(fg: u8) -> Self {
        Self::new(fg, 0, Attr::NONE)
    }

    /// Style with only a background color.
    pub const fn bg(bg: u8) -> Self {
        Self::new(0, bg, Attr::NONE)
    }

    /// Add attributes.
    pub const fn with(mut self, attrs: Attr) -> Self {
        self.attrs = self.attrs.union(attrs);
        self
    }

    /// Check whether this style marks the cursor cell.
    #[inline]
    pub const fn has_cursor(&self) -> bool {
        self.attrs.contains(Attr::CURSOR)
    }

    /// Same style without the cursor marker.
    #[inline]
    pub const fn without_cursor(mut self) -> Self {
        self.attrs = self.attrs.difference(Attr::CURSOR);
        self
    }

    /// Resolve this style against the ambient style of its parent.
    ///
    /// Unset colors and attributes are taken from `ambient`. If this style
    /// asks for [`Attr::INVERT`], the resolved colors are swapped afterwards;
    /// a swapped-in channel that was unset becomes a fixed contrast color.
    /// The result never carries `INVERT`, so merging a resolved style again
    /// changes nothing.
    pub fn merge(self, ambient: Style) -> Style {
        let mut fg = if self.fg == 0 { ambient.fg } else { self.fg };
        let mut bg = if self.bg == 0 { ambient.bg } else { self.bg };
        let mut attrs = self.attrs | ambient.attrs.difference(Attr::INVERT);

        if attrs.contains(Attr::INVERT) {
            let (resolved_fg, resolved_bg) = (fg, bg);
            fg = if resolved_bg == 0 { INVERT_FALLBACK_FG } else { resolved_bg };
            bg = if resolved_fg == 0 { INVERT_FALLBACK_BG } else { resolved_fg };
            attrs.remove(Attr::INVERT);
        }

        Style { fg, bg, attrs }
    }

    /// Layer this style on top of `base` without resolving it.
    ///
    /// Set colors win and attribute flags are combined. Unlike
    /// [`Style::merge`], [`Attr::INVERT`] is kept so it still applies when
    /// the layered style is resolved later.
    pub fn over(self, base: Style) -> Style {
        Style {
            fg: if self.fg == 0 { base.fg } else { self.fg },
            bg: if self.bg == 0 { base.bg } else { self.bg },
            attrs: self.attrs | base.attrs,
        }
    }
}

// =============================================================================
// Cell - The atomic unit of terminal rendering
// =============================================================================

/// A single terminal cell.
///
/// `width` is 1 for normal glyphs, 2 for wide glyphs, and 0 for the filler
/// slot that follows a wide glyph (skipped on output).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub width: u8,
    pub style: Style,
}

impl Cell {
    /// Create a cell.
    pub const fn new(ch: char, width: u8, style: Style) -> Self {
        Self { ch, width, style }
    }

    /// A blank cell painted with `style`.
    pub const fn blank(style: Style) -> Self {
        Self::new(' ', 1, style)
    }

    /// The filler that follows a wide glyph.
    pub const fn filler(style: Style) -> Self {
        Self::new(' ', 0, style.without_cursor())
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Style::EMPTY)
    }
}

// =============================================================================
// Frame - Rectangles assigned during layout
// =============================================================================

/// An axis-aligned rectangle in terminal cells.
///
/// Signed so that scrolled content can sit above the visible area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Frame {
    /// Create a new frame.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the last column.
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// One past the last row.
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Check if a point is inside this frame.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if a row is inside this frame's vertical span.
    #[inline]
    pub const fn contains_row(&self, y: i32) -> bool {
        y >= self.y && y < self.bottom()
    }

    /// Intersection of two frames. Disjoint frames give a zero-sized frame.
    pub fn intersect(&self, other: &Frame) -> Frame {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        Frame::new(x1, y1, (x2 - x1).max(0), (y2 - y1).max(0))
    }

    /// The area left after removing `padding` from each side.
    pub fn inset(&self, padding: Padding) -> Frame {
        Frame::new(
            self.x + padding.leading as i32,
            self.y + padding.top as i32,
            self.width - padding.horizontal(),
            self.height - padding.vertical(),
        )
    }
}

// =============================================================================
// Padding
// =============================================================================

/// Padding on four sides, in cells.
///
/// Converts from CSS-style shorthands:
/// - `n`: all four sides
/// - `(v, h)`: top/bottom, leading/trailing
/// - `(top, h, bottom)`
/// - `(top, trailing, bottom, leading)`, clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: u8,
    pub leading: u8,
    pub bottom: u8,
    pub trailing: u8,
}

impl Padding {
    pub const ZERO: Self = Self::all(0);

    /// Same padding on all sides.
    pub const fn all(n: u8) -> Self {
        Self {
            top: n,
            leading: n,
            bottom: n,
            trailing: n,
        }
    }

    /// Leading + trailing.
    #[inline]
    pub const fn horizontal(&self) -> i32 {
        self.leading as i32 + self.trailing as i32
    }

    /// Top + bottom.
    #[inline]
    pub const fn vertical(&self) -> i32 {
        self.top as i32 + self.bottom as i32
    }
}

impl From<u8> for Padding {
    fn from(n: u8) -> Self {
        Self::all(n)
    }
}

impl From<(u8, u8)> for Padding {
    fn from((vertical, horizontal): (u8, u8)) -> Self {
        Self {
            top: vertical,
            leading: horizontal,
            bottom: vertical,
            trailing: horizontal,
        }
    }
}

impl From<(u8, u8, u8)> for Padding {
    fn from((top, horizontal, bottom): (u8, u8, u8)) -> Self {
        Self {
            top,
            leading: horizontal,
            bottom,
            trailing: horizontal,
        }
    }
}

impl From<(u8, u8, u8, u8)> for Padding {
    fn from((top, trailing, bottom, leading): (u8, u8, u8, u8)) -> Self {
        Self {
            top,
            leading,
            bottom,
            trailing,
        }
    }
}

// =============================================================================
// Direction
// =============================================================================

/// Stacking direction of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Children overlap in the same area, centered (z-stack).
    #[default]
    Layered,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_attrs() -> impl Strategy<Value = Attr> {
        any::<u8>().prop_map(Attr::from_bits_truncate)
    }

    fn arb_ambient() -> impl Strategy<Value = Style> {
        (any::<u8>(), any::<u8>(), arb_attrs()).prop_map(|(fg, bg, attrs)| {
            Style::new(fg, bg, attrs.difference(Attr::INVERT))
        })
    }

    fn arb_style() -> impl Strategy<Value = Style> {
        (any::<u8>(), any::<u8>(), arb_attrs()).prop_map(|(fg, bg, attrs)| Style::new(fg, bg, attrs))
    }

    proptest! {
        #[test]
        fn prop_unset_style_resolves_to_ambient(ambient in arb_ambient()) {
            prop_assert_eq!(Style::EMPTY.merge(ambient), ambient);
        }

        #[test]
        fn prop_resolved_style_is_fixed_point(style in arb_style(), ambient in arb_ambient()) {
            let resolved = style.merge(ambient);
            prop_assert_eq!(resolved.merge(ambient), resolved);
            prop_assert!(!resolved.attrs.contains(Attr::INVERT));
        }

        #[test]
        fn prop_merge_with_fully_set_style_keeps_colors(
            fg in 1u8..=255,
            bg in 1u8..=255,
            ambient in arb_ambient(),
        ) {
            let resolved = Style::new(fg, bg, Attr::NONE).merge(ambient);
            prop_assert_eq!(resolved.fg, fg);
            prop_assert_eq!(resolved.bg, bg);
        }
    }

    #[test]
    fn test_merge_inherits_unset_fields() {
        let ambient = Style::new(3, 4, Attr::BOLD);
        let own = Style::new(9, 0, Attr::ITALIC);
        let resolved = own.merge(ambient);
        assert_eq!(resolved.fg, 9);
        assert_eq!(resolved.bg, 4);
        assert_eq!(resolved.attrs, Attr::BOLD | Attr::ITALIC);
    }

    #[test]
    fn test_invert_swaps_after_inheritance() {
        let ambient = Style::new(200, 17, Attr::NONE);
        let resolved = Style::new(0, 0, Attr::INVERT).merge(ambient);
        assert_eq!(resolved.fg, 17);
        assert_eq!(resolved.bg, 200);
        assert!(!resolved.attrs.contains(Attr::INVERT));
    }

    #[test]
    fn test_invert_uses_contrast_fallbacks() {
        let resolved = Style::new(0, 0, Attr::INVERT).merge(Style::EMPTY);
        assert_eq!(resolved.fg, INVERT_FALLBACK_FG);
        assert_eq!(resolved.bg, INVERT_FALLBACK_BG);
    }

    #[test]
    fn test_over_keeps_invert_for_later() {
        let layered = Style::EMPTY.with(Attr::INVERT).over(Style::new(5, 0, Attr::BOLD));
        assert_eq!(layered, Style::new(5, 0, Attr::INVERT | Attr::BOLD));

        let resolved = layered.merge(Style::bg(9));
        assert_eq!((resolved.fg, resolved.bg), (9, 5));
    }

    #[test]
    fn test_filler_drops_cursor() {
        let style = Style::EMPTY.with(Attr::CURSOR | Attr::BOLD);
        let filler = Cell::filler(style);
        assert_eq!(filler.width, 0);
        assert!(!filler.style.has_cursor());
        assert!(filler.style.attrs.contains(Attr::BOLD));
    }

    #[test]
    fn test_frame_intersect() {
        let a = Frame::new(0, 0, 10, 10);
        let b = Frame::new(5, -3, 10, 5);
        assert_eq!(a.intersect(&b), Frame::new(5, 0, 5, 2));

        let c = Frame::new(20, 20, 3, 3);
        let empty = a.intersect(&c);
        assert_eq!(empty.width, 0);
        assert_eq!(empty.height, 0);
    }

    #[test]
    fn test_padding_shorthands() {
        assert_eq!(Padding::from(2), Padding::all(2));
        assert_eq!(
            Padding::from((1, 2)),
            Padding { top: 1, leading: 2, bottom: 1, trailing: 2 }
        );
        assert_eq!(
            Padding::from((1, 2, 3)),
            Padding { top: 1, leading: 2, bottom: 3, trailing: 2 }
        );
        assert_eq!(
            Padding::from((1, 2, 3, 4)),
            Padding { top: 1, leading: 4, bottom: 3, trailing: 2 }
        );
    }

    #[test]
    fn test_frame_inset() {
        let frame = Frame::new(2, 3, 20, 10);
        let inner = frame.inset(Padding::all(2));
        assert_eq!(inner, Frame::new(4, 5, 16, 6));
    }
}
