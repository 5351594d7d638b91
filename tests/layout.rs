//! Layout properties checked through the public molding API.

use proptest::prelude::*;
use tervi::input::HandlerQueue;
use tervi::layout::Molder;
use tervi::renderer::CellBuffer;
use tervi::{hstack, spacer, text, vstack, Style, View};

fn mold(width: u16, height: u16, root: View) -> CellBuffer {
    let mut buffer = CellBuffer::new(width, height);
    let mut handlers = HandlerQueue::new();
    Molder::new(&mut buffer, &mut handlers)
        .mold_root(root, Style::EMPTY)
        .unwrap();
    buffer
}

fn colored_spacers(n: usize) -> Vec<View> {
    (0..n).map(|i| spacer().bg(i as u8 + 1)).collect()
}

/// Cells per background color along one axis.
fn counts(n: usize, bgs: impl Iterator<Item = u8>) -> Vec<i32> {
    let mut counts = vec![0; n + 1];
    for bg in bgs {
        counts[bg as usize] += 1;
    }
    counts
}

proptest! {
    #[test]
    fn prop_hstack_auto_children_share_width(n in 0usize..12, width in 1u16..80) {
        let buffer = mold(width, 1, hstack(colored_spacers(n)));
        let counts = counts(n, buffer.row(0).iter().map(|c| c.style.bg));

        if n == 0 {
            prop_assert_eq!(counts[0], width as i32);
        } else {
            let floor = width as i32 / n as i32;
            prop_assert_eq!(counts[0], 0);
            prop_assert_eq!(counts[1..].iter().sum::<i32>(), width as i32);
            for &count in &counts[1..] {
                prop_assert!(count == floor || count == floor + 1);
            }
        }
    }

    #[test]
    fn prop_vstack_auto_children_share_height(n in 0usize..12, height in 1u16..60) {
        let buffer = mold(1, height, vstack(colored_spacers(n)));
        let column = (0..height).map(|y| buffer.get(0, y as i32).unwrap().style.bg);
        let counts = counts(n, column);

        if n == 0 {
            prop_assert_eq!(counts[0], height as i32);
        } else {
            let floor = height as i32 / n as i32;
            prop_assert_eq!(counts[0], 0);
            prop_assert_eq!(counts[1..].iter().sum::<i32>(), height as i32);
            for &count in &counts[1..] {
                prop_assert!(count == floor || count == floor + 1);
            }
        }
    }

    #[test]
    fn prop_fixed_children_leave_remainder_to_autos(fixed in 1u16..20, width in 20u16..80) {
        let root = hstack([spacer().width(fixed).bg(1), spacer().bg(2)]);
        let buffer = mold(width, 1, root);
        let counts = counts(2, buffer.row(0).iter().map(|c| c.style.bg));
        prop_assert_eq!(counts[1], fixed as i32);
        prop_assert_eq!(counts[2], (width - fixed) as i32);
    }

    #[test]
    fn prop_hstack_mixed_sizes_fill_padded_width(
        relative in 1u8..9,
        fixed in 1u16..6,
        pad in 0u8..4,
        width in 40u16..100,
    ) {
        let root = hstack(mixed_children(|v| v.relative_size(relative, 0), |v| v.width(fixed)))
            .padding(pad);
        let buffer = mold(width, 2 * pad as u16 + 1, root);
        let counts = counts(4, buffer.row(pad as u16).iter().map(|c| c.style.bg));

        let inner = width as i32 - 2 * pad as i32;
        let shares = expected_shares(inner, relative, fixed);
        prop_assert_eq!(counts[0], 2 * pad as i32);
        prop_assert_eq!(&counts[1..], &shares[..]);
    }

    #[test]
    fn prop_vstack_mixed_sizes_fill_padded_height(
        relative in 1u8..9,
        fixed in 1u16..6,
        pad in 0u8..4,
        height in 40u16..100,
    ) {
        let root = vstack(mixed_children(|v| v.relative_size(0, relative), |v| v.height(fixed)))
            .padding(pad);
        let buffer = mold(2 * pad as u16 + 1, height, root);
        let column = (0..height).map(|y| buffer.get(pad as i32, y as i32).unwrap().style.bg);
        let counts = counts(4, column);

        let inner = height as i32 - 2 * pad as i32;
        let shares = expected_shares(inner, relative, fixed);
        prop_assert_eq!(counts[0], 2 * pad as i32);
        prop_assert_eq!(&counts[1..], &shares[..]);
    }
}

/// A relative child, an absolute child and two autos, colored 1 to 4.
fn mixed_children(
    relative: impl FnOnce(View) -> View,
    absolute: impl FnOnce(View) -> View,
) -> Vec<View> {
    vec![
        relative(spacer().bg(1)),
        absolute(spacer().bg(2)),
        spacer().bg(3),
        spacer().bg(4),
    ]
}

/// Extents of the children built by [`mixed_children`] along the stacking axis.
fn expected_shares(inner: i32, relative: u8, fixed: u16) -> Vec<i32> {
    let relative = inner * relative as i32 / 12;
    let remaining = inner - relative - fixed as i32;
    let first_auto = remaining / 2;
    vec![relative, fixed as i32, first_auto, remaining - first_auto]
}

#[test]
fn test_nested_border_clipped_inside_scrolled_parent() {
    let child = text("x").border().absolute_size(8, 6);
    let root = vstack([child])
        .offset_y(-2)
        .allow_overflow()
        .border()
        .absolute_size(12, 6);
    let buffer = mold(12, 6, root);

    let lines: Vec<String> = (0..6).map(|y| buffer.line(y)).collect();
    assert_eq!(
        lines,
        vec![
            "╭──────────╮",
            "│          │",
            "│ │ x    │ │",
            "│ │      │ │",
            "│          │",
            "╰──────────╯",
        ]
    );
}

#[test]
fn test_hidden_children_take_no_space() {
    let root = hstack([
        spacer().bg(1),
        spacer().bg(2).hidden(true),
        spacer().bg(3),
    ]);
    let buffer = mold(4, 1, root);
    let bgs: Vec<u8> = buffer.row(0).iter().map(|c| c.style.bg).collect();
    assert_eq!(bgs, vec![1, 1, 3, 3]);
}
