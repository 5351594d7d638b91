//! Event-loop pipeline
//!
//! This module connects input, the application's view builder, layout and
//! the renderer into a running program.
//!
//! # Pipeline Architecture
//!
//! ```text
//! stdin thread ──chars──┐
//!                       ├─→ Runtime::tick → build() → Molder → CellBuffer → Renderer → Backend
//! event relay ──events──┘
//! ```
//!
//! ## Threads
//!
//! - **stdin reader**: blocks on stdin, sends decoded characters
//! - **event relay**: forwards application [`Message`]s, raises the
//!   terminate flag
//! - **scheduler** (caller's thread): the only owner of the grid, the view
//!   tree and the key handlers

pub mod config;
pub mod mount;
pub mod terminal;

pub use config::{Config, Event, EventHandler, Message, DEFAULT_EVENT_TIMEOUT, DEFAULT_KEY_TIMEOUT};
pub use mount::{run, run_with, Runtime};
pub use terminal::{Backend, StdoutBackend, TerminalGuard};
