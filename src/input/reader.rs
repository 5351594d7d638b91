//! stdin reader for raw terminal input.
//!
//! Reads raw bytes in a dedicated thread, decodes them as UTF-8 and sends
//! the characters through a channel. A multi-byte character split across
//! two reads is held back until it is complete.

use std::io::{self, Read};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

use tracing::debug;

/// Capacity of the channel between the reader thread and the scheduler.
///
/// A full channel blocks the reader, which leaves further input queued in
/// the terminal.
pub const INPUT_CAPACITY: usize = 1024;

/// Messages from the reader thread.
#[derive(Debug)]
pub enum StdinMessage {
    /// Decoded characters, in arrival order.
    Data(Vec<char>),
    /// Input ended: `None` at EOF, `Some` on a read error.
    Closed(Option<io::Error>),
}

// =============================================================================
// UTF-8 decoding
// =============================================================================

/// Incremental UTF-8 decoder.
///
/// Invalid bytes become U+FFFD; an incomplete trailing sequence is kept
/// for the next call.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `bytes`, appending complete characters to `out`.
    pub fn feed(&mut self, bytes: &[u8], out: &mut Vec<char>) {
        self.pending.extend_from_slice(bytes);
        let mut rest: &[u8] = &self.pending;
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.extend(valid.chars());
                    rest = &[];
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    out.extend(std::str::from_utf8(valid).unwrap_or_default().chars());
                    match err.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            rest = after;
                            break;
                        }
                    }
                }
            }
        }
        let consumed = self.pending.len() - rest.len();
        self.pending.drain(..consumed);
    }

    /// Bytes of an incomplete character waiting for more input.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }
}

// =============================================================================
// Reader thread
// =============================================================================

/// Dedicated input reader thread.
///
/// The thread blocks in `read` and cannot be interrupted; it ends on EOF,
/// on a read error, or when the receiving side is dropped and the next
/// chunk arrives.
pub struct StdinReader {
    handle: Option<JoinHandle<()>>,
}

impl StdinReader {
    /// Spawn a reader on the process's stdin.
    pub fn spawn() -> io::Result<(Self, Receiver<StdinMessage>)> {
        Self::spawn_with(io::stdin())
    }

    /// Spawn a reader on any byte source.
    pub fn spawn_with<R>(source: R) -> io::Result<(Self, Receiver<StdinMessage>)>
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(INPUT_CAPACITY);
        let handle = thread::Builder::new()
            .name("tervi-stdin".to_string())
            .spawn(move || Self::read_loop(source, tx))?;
        Ok((
            Self {
                handle: Some(handle),
            },
            rx,
        ))
    }

    fn read_loop<R: Read>(mut source: R, tx: SyncSender<StdinMessage>) {
        let mut buf = [0u8; 256];
        let mut decoder = Utf8Decoder::new();
        loop {
            match source.read(&mut buf) {
                Ok(0) => {
                    debug!("input reached end of file");
                    let _ = tx.send(StdinMessage::Closed(None));
                    return;
                }
                Ok(n) => {
                    let mut chars = Vec::with_capacity(n);
                    decoder.feed(&buf[..n], &mut chars);
                    if !chars.is_empty() && tx.send(StdinMessage::Data(chars)).is_err() {
                        return;
                    }
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    debug!(error = %err, "input read failed");
                    let _ = tx.send(StdinMessage::Closed(Some(err)));
                    return;
                }
            }
        }
    }

}

impl Drop for StdinReader {
    fn drop(&mut self) {
        // A thread blocked on stdin can't be joined; only reap finished ones.
        if let Some(handle) = self.handle.take() {
            if handle.is_finished() {
                let _ = handle.join();
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
