//! Terminal setup and teardown.
//!
//! [`TerminalGuard`] puts the terminal into raw mode on the alternate screen
//! and undoes it when dropped, so every exit path (including errors and
//! panics unwinding through the run loop) leaves the shell usable.
//! [`Backend`] is where finished frames go and where the screen size comes
//! from; the scheduler only talks to that trait.

use std::io::{self, Write};

use tracing::warn;

use crate::error::{Error, Result};
use crate::renderer::{ansi, OutputBuffer};

// =============================================================================
// Backend
// =============================================================================

/// Frame sink and size source for the scheduler.
pub trait Backend {
    /// Current size as (columns, rows).
    fn size(&mut self) -> io::Result<(u16, u16)>;

    /// Write one serialized frame and flush it.
    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// The real terminal on stdout.
#[derive(Debug)]
pub struct StdoutBackend {
    out: io::Stdout,
}

impl StdoutBackend {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for StdoutBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for StdoutBackend {
    fn size(&mut self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut out = self.out.lock();
        out.write_all(bytes)?;
        out.flush()
    }
}

// =============================================================================
// TerminalGuard
// =============================================================================

/// Raw mode + alternate screen for as long as the guard lives.
#[derive(Debug)]
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    /// Enter raw mode, save the cursor, switch to the alternate screen and
    /// hide the cursor.
    pub fn acquire() -> Result<Self> {
        crossterm::terminal::enable_raw_mode().map_err(Error::Terminal)?;
        // From here on Drop restores whatever was changed.
        let guard = Self { _private: () };

        let mut out = OutputBuffer::with_capacity(32);
        ansi::cursor_save(&mut out).map_err(Error::Terminal)?;
        ansi::enter_alt_screen(&mut out).map_err(Error::Terminal)?;
        ansi::cursor_hide(&mut out).map_err(Error::Terminal)?;
        write_stdout(out.as_bytes()).map_err(Error::Terminal)?;
        Ok(guard)
    }

    fn restore() -> io::Result<()> {
        let mut out = OutputBuffer::with_capacity(32);
        ansi::reset(&mut out)?;
        ansi::cursor_show(&mut out)?;
        ansi::exit_alt_screen(&mut out)?;
        ansi::cursor_restore(&mut out)?;
        let written = write_stdout(out.as_bytes());
        crossterm::terminal::disable_raw_mode()?;
        written
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = Self::restore() {
            warn!(error = %err, "failed to restore terminal");
        }
    }
}

fn write_stdout(bytes: &[u8]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(bytes)?;
    out.flush()
}
