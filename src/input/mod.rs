//! Keyboard input: reading, decoding and dispatch.
//!
//! - [`reader`] - stdin thread delivering decoded characters
//! - [`decoder`] - characters to [`Key`]s
//! - [`dispatch`] - priority queue of view key handlers

pub mod decoder;
pub mod dispatch;
pub mod keys;
pub mod reader;

pub use decoder::decode;
pub use dispatch::{HandlerQueue, KeyHandler, Outcome};
pub use keys::Key;
pub use reader::{StdinMessage, StdinReader};
