//! Mount API - the event loop.
//!
//! [`run`] and [`run_with`] take over the terminal and drive a [`Runtime`]
//! until the application asks to stop. Each tick:
//!
//! 1. Collect key input until the key window times out. No input means the
//!    frame may be skipped.
//! 2. Decode and dispatch every collected key. Ctrl-C ends the run.
//! 3. Wait briefly for one external event; a delivered event forces a redraw.
//! 4. Re-read the terminal size; a change forces a redraw.
//! 5. Stop if termination was requested; skip the frame if nothing changed.
//! 6. Clear the grid, build and mold the view tree, serialize and flush.
//!
//! # Example
//!
//! ```ignore
//! use tervi::{run, text};
//!
//! run(|| text("Hello, world!").border().title("tervi"))?;
//! ```

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::config::{Config, Event, EventHandler, Message};
use super::terminal::{Backend, StdoutBackend, TerminalGuard};
use crate::error::{Error, Result};
use crate::input::{decode, HandlerQueue, Key, Outcome, StdinMessage, StdinReader};
use crate::layout::Molder;
use crate::renderer::{CellBuffer, Renderer};
use crate::types::Style;
use crate::view::View;

/// Capacity of the channel between the event relay and the scheduler.
const RELAY_CAPACITY: usize = 64;

// =============================================================================
// Entry points
// =============================================================================

/// Run an application with the default configuration.
///
/// `build` is called for every frame and returns the whole view tree.
/// Returns once Ctrl-C is pressed or a handler returns
/// [`Outcome::Terminate`].
pub fn run<F>(build: F) -> Result<()>
where
    F: FnMut() -> View,
{
    run_with(build, Config::<()>::new())
}

/// Run an application with explicit configuration.
pub fn run_with<F, E>(build: F, config: Config<E>) -> Result<()>
where
    F: FnMut() -> View,
    E: Send + 'static,
{
    let _guard = TerminalGuard::acquire()?;
    let (_reader, input) = StdinReader::spawn().map_err(Error::Terminal)?;
    let mut runtime = Runtime::new(build, config, StdoutBackend::new(), input)?;
    runtime.run()
}

// =============================================================================
// Runtime
// =============================================================================

/// The scheduler: owns the grid, the current key handlers and the inputs.
///
/// [`run_with`] wires it to the real terminal; tests drive it tick by tick
/// with their own [`Backend`] and input channel.
pub struct Runtime<F, E, B> {
    build: F,
    backend: B,
    buffer: CellBuffer,
    renderer: Renderer,
    handlers: HandlerQueue,
    input: Receiver<StdinMessage>,
    pending: Vec<char>,
    events: Option<Receiver<E>>,
    terminate: Arc<AtomicBool>,
    on_event: Option<EventHandler<E>>,
    default_style: Style,
    key_timeout: Duration,
    event_timeout: Duration,
    needs_redraw: bool,
}

impl<F, E, B> Runtime<F, E, B>
where
    F: FnMut() -> View,
    E: Send + 'static,
    B: Backend,
{
    /// Create a runtime. Starts the event relay thread if the config has an
    /// event channel.
    pub fn new(
        build: F,
        config: Config<E>,
        mut backend: B,
        input: Receiver<StdinMessage>,
    ) -> Result<Self> {
        let (width, height) = backend.size().map_err(Error::Terminal)?;
        let terminate = Arc::new(AtomicBool::new(false));
        let events = match config.events {
            Some(source) => {
                Some(spawn_relay(source, Arc::clone(&terminate)).map_err(Error::Terminal)?)
            }
            None => None,
        };
        debug!(width, height, "runtime started");

        Ok(Self {
            build,
            backend,
            buffer: CellBuffer::new(width, height),
            renderer: Renderer::new(),
            handlers: HandlerQueue::new(),
            input,
            pending: Vec::new(),
            events,
            terminate,
            on_event: config.on_event,
            default_style: config.default_style,
            key_timeout: config.key_timeout,
            event_timeout: config.event_timeout,
            needs_redraw: true,
        })
    }

    /// Tick until the run ends.
    pub fn run(&mut self) -> Result<()> {
        while self.tick()?.is_continue() {}
        Ok(())
    }

    /// The grid as of the last frame.
    pub fn buffer(&self) -> &CellBuffer {
        &self.buffer
    }

    /// Key handlers registered by the last frame.
    pub fn handlers(&self) -> &HandlerQueue {
        &self.handlers
    }

    /// Run one tick. `Break` means the run is over.
    pub fn tick(&mut self) -> Result<ControlFlow<()>> {
        let started = Instant::now();

        // 1. Key input
        self.collect_input()?;
        let mut skip = self.pending.is_empty() && !self.needs_redraw;

        // 2. Dispatch
        if self.dispatch_keys().is_break() {
            return Ok(ControlFlow::Break(()));
        }
        let dispatched = started.elapsed();

        // 3. External events
        if let Some(event) = self.poll_event() {
            skip = false;
            if self.fallback(Event::External(event)) == Outcome::Terminate {
                debug!("terminated by event handler");
                return Ok(ControlFlow::Break(()));
            }
        }

        // 4. Resize
        let (width, height) = self.backend.size().map_err(Error::Terminal)?;
        if (width, height) != (self.buffer.width(), self.buffer.height()) {
            debug!(width, height, "terminal resized");
            self.buffer.resize(width, height);
            skip = false;
        }

        // 5. Exit or skip
        if self.terminate.load(Ordering::SeqCst) {
            debug!("terminate message received");
            return Ok(ControlFlow::Break(()));
        }
        if skip {
            return Ok(ControlFlow::Continue(()));
        }

        // 6. Render
        self.render()?;
        self.needs_redraw = false;
        trace!(
            dispatch_us = dispatched.as_micros() as u64,
            total_us = started.elapsed().as_micros() as u64,
            "frame rendered"
        );
        Ok(ControlFlow::Continue(()))
    }

    /// Collect characters until the key window passes without input.
    fn collect_input(&mut self) -> Result<()> {
        loop {
            match self.input.recv_timeout(self.key_timeout) {
                Ok(StdinMessage::Data(chars)) => self.pending.extend(chars),
                Ok(StdinMessage::Closed(None)) | Err(RecvTimeoutError::Disconnected) => {
                    return Err(Error::InputClosed);
                }
                Ok(StdinMessage::Closed(Some(err))) => return Err(Error::Input(err)),
                Err(RecvTimeoutError::Timeout) => return Ok(()),
            }
        }
    }

    /// Decode and dispatch everything collected so far.
    fn dispatch_keys(&mut self) -> ControlFlow<()> {
        loop {
            let (key, used) = decode(&self.pending);
            if used == 0 {
                return ControlFlow::Continue(());
            }
            self.pending.drain(..used);
            trace!(%key, "key");

            if key == Key::CTRL_C {
                debug!("interrupted");
                return ControlFlow::Break(());
            }
            let outcome = match self.handlers.dispatch(key) {
                Outcome::Unhandled => self.fallback(Event::Key(key)),
                outcome => outcome,
            };
            if outcome == Outcome::Terminate {
                debug!(%key, "terminated by key handler");
                return ControlFlow::Break(());
            }
        }
    }

    fn poll_event(&mut self) -> Option<E> {
        let events = self.events.as_ref()?;
        match events.recv_timeout(self.event_timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                debug!("event channel closed");
                self.events = None;
                None
            }
        }
    }

    fn fallback(&mut self, event: Event<E>) -> Outcome {
        match self.on_event.as_mut() {
            Some(handler) => handler(event),
            None => Outcome::Unhandled,
        }
    }

    fn render(&mut self) -> Result<()> {
        self.buffer.fill(self.default_style);
        self.handlers.clear();

        let root = (self.build)();
        Molder::new(&mut self.buffer, &mut self.handlers).mold_root(root, self.default_style)?;

        self.renderer.draw(&self.buffer).map_err(Error::Output)?;
        let written = self.backend.write_frame(self.renderer.output().as_bytes());
        self.renderer.clear();
        written.map_err(Error::Output)
    }
}

/// Forward application messages to the scheduler.
///
/// Events go through a bounded channel; `Terminate` raises the shared flag
/// and ends the relay.
fn spawn_relay<E: Send + 'static>(
    source: Receiver<Message<E>>,
    terminate: Arc<AtomicBool>,
) -> std::io::Result<Receiver<E>> {
    let (tx, rx) = mpsc::sync_channel(RELAY_CAPACITY);
    thread::Builder::new()
        .name("tervi-events".to_string())
        .spawn(move || {
            for message in source {
                match message {
                    Message::Event(event) => {
                        if tx.send(event).is_err() {
                            return;
                        }
                    }
                    Message::Terminate => {
                        terminate.store(true, Ordering::SeqCst);
                        return;
                    }
                }
            }
        })?;
    Ok(rx)
}
