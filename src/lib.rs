//! # tervi
//!
//! Declarative terminal UI.
//!
//! The application describes the whole screen as a tree of [`View`]s each
//! frame; tervi lays it out, paints a grid of cells and redraws the
//! terminal with plain escape sequences.
//!
//! ## Architecture
//!
//! ```text
//! build() → View tree → layout (molding) → CellBuffer → Renderer → terminal
//!                              │
//!                              └→ HandlerQueue ← keys ← decoder ← stdin
//! ```
//!
//! State that must survive between frames belongs to the application.
//! Widgets that need some (lists, scroll views, text fields) take it as
//! `Rc<RefCell<_>>` so their key handlers can update it.
//!
//! ## Example
//!
//! ```ignore
//! use tervi::{run, text, vstack};
//!
//! run(|| {
//!     vstack([
//!         text("Hello").bold(),
//!         text("Press Ctrl-C to quit").fg(244),
//!     ])
//!     .border()
//!     .title("tervi")
//! })?;
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Style, cells, frames, padding
//! - [`color`] - 256-color palette helpers
//! - [`view`] - View tree, constructors, modifiers and stock widgets
//! - [`layout`] - Molding engine and text measurement
//! - [`renderer`] - Cell buffer and escape-sequence output
//! - [`input`] - stdin reader, key decoder, handler dispatch
//! - [`pipeline`] - Configuration, terminal lifecycle and the event loop

pub mod color;
pub mod error;
pub mod input;
pub mod layout;
pub mod pipeline;
pub mod renderer;
pub mod types;
pub mod view;

pub use error::{Error, Result};
pub use types::{Attr, Cell, Direction, Frame, Padding, Style};

pub use view::{
    confirm_dialog, cursor, hmap, hstack, inline_map, inline_map_n, inline_stack, lazy,
    line_break, list, list_map, list_map_n, map, map_n, scroll_view, spacer, spans, string, text, text_field, vmap,
    vmap_n, vstack, zmap, zstack, ConfirmState, ListState, ScrollState, Span, TextFieldState,
    View, Viewport,
};

pub use input::{Key, Outcome};

pub use pipeline::{run, run_with, Backend, Config, Event, Message, Runtime};
