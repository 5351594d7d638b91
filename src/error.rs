//! Error types for tervi.
//!
//! Every error in the engine is either handled where it is detected
//! (clipping instead of failing, for example) or fatal to the run.
//! There is no retry policy.

use std::io;

use thiserror::Error;

use crate::types::Frame;

/// Errors surfaced by [`run`](crate::run) and the layout pass.
#[derive(Debug, Error)]
pub enum Error {
    /// A subtree could not fit on screen and overflow was not permitted.
    #[error("terminal size is too small: {frame:?} does not fit in {width}x{height}")]
    TerminalTooSmall {
        width: u16,
        height: u16,
        frame: Frame,
    },

    /// Raw mode or size query failed.
    #[error("failed to configure terminal: {0}")]
    Terminal(#[source] io::Error),

    /// The stdin reader thread hit a read error.
    #[error("failed to read keyboard input: {0}")]
    Input(#[source] io::Error),

    /// stdin reached EOF or the reader thread went away.
    #[error("keyboard input closed")]
    InputClosed,

    /// Writing a frame to the terminal failed.
    #[error("failed to write to terminal: {0}")]
    Output(#[source] io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
