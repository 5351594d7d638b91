//! Terminal renderer - the "blind" output layer.
//!
//! The renderer knows only about cells. It doesn't understand views or
//! layout. It takes a filled [`CellBuffer`] and outputs escape sequences
//! that redraw the alternate screen from the top-left corner.

pub mod ansi;
pub mod buffer;
pub mod output;

pub use buffer::{CellBuffer, TITLE_INSET};
pub use output::{OutputBuffer, Renderer};
