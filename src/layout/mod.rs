//! Layout Module
//!
//! Recursive box layout for terminal UI ("molding").
//!
//! # Architecture
//!
//! There is no separate layout tree. The view tree built for a frame is
//! walked once, top-down: every node is sized by its parent, paints itself
//! into the [`CellBuffer`](crate::renderer::CellBuffer), registers its key
//! handler and hands the remaining space to its children. Text is measured
//! with the same flow that paints it, so measured and painted heights can't
//! disagree.
//!
//! # Example
//!
//! ```ignore
//! use tervi::layout::Molder;
//!
//! let mut buffer = CellBuffer::new(80, 24);
//! let mut handlers = HandlerQueue::new();
//! Molder::new(&mut buffer, &mut handlers).mold_root(build(), Style::EMPTY)?;
//! ```

mod molder;
pub mod text_measure;

pub use molder::Molder;
pub use text_measure::{char_width, string_width, wrap_lines, wrapped_height};
