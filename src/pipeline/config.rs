//! Run configuration.
//!
//! ```ignore
//! let (tx, rx) = std::sync::mpsc::channel();
//! let config = Config::new()
//!     .events(rx)
//!     .on_event(|event| match event {
//!         Event::Key(Key::ESC) => Outcome::Terminate,
//!         Event::External(tick) => { /* update app state */ Outcome::Handled }
//!         _ => Outcome::Unhandled,
//!     })
//!     .default_style(Style::fg(252));
//! tervi::run_with(build, config)?;
//! ```

use std::fmt;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crate::input::{Key, Outcome};
use crate::types::Style;

/// How long the scheduler keeps collecting key input in one tick.
pub const DEFAULT_KEY_TIMEOUT: Duration = Duration::from_millis(1);

/// How long the scheduler waits for an external event in one tick.
pub const DEFAULT_EVENT_TIMEOUT: Duration = Duration::from_micros(100);

/// Something the fallback handler is told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<E> {
    /// A key no view handler took.
    Key(Key),
    /// An event sent by the application through [`Config::events`].
    External(E),
}

/// What the application sends into a running loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message<E> {
    /// Deliver an event to the fallback handler and redraw.
    Event(E),
    /// Stop the loop at the end of the current tick.
    Terminate,
}

/// The fallback handler.
pub type EventHandler<E> = Box<dyn FnMut(Event<E>) -> Outcome>;

/// Options for [`run_with`](crate::run_with).
pub struct Config<E = ()> {
    pub(crate) events: Option<Receiver<Message<E>>>,
    pub(crate) on_event: Option<EventHandler<E>>,
    pub(crate) default_style: Style,
    pub(crate) key_timeout: Duration,
    pub(crate) event_timeout: Duration,
}

impl<E> Config<E> {
    pub fn new() -> Self {
        Self {
            events: None,
            on_event: None,
            default_style: Style::EMPTY,
            key_timeout: DEFAULT_KEY_TIMEOUT,
            event_timeout: DEFAULT_EVENT_TIMEOUT,
        }
    }

    /// Channel of application events. Each delivered event forces a redraw.
    pub fn events(mut self, events: Receiver<Message<E>>) -> Self {
        self.events = Some(events);
        self
    }

    /// Handler for external events and for keys no view took.
    pub fn on_event<F>(mut self, handler: F) -> Self
    where
        F: FnMut(Event<E>) -> Outcome + 'static,
    {
        self.on_event = Some(Box::new(handler));
        self
    }

    /// Style every view inherits from.
    pub fn default_style(mut self, style: Style) -> Self {
        self.default_style = style;
        self
    }

    /// Key collection window per tick.
    pub fn key_timeout(mut self, timeout: Duration) -> Self {
        self.key_timeout = timeout;
        self
    }

    /// External event wait per tick.
    pub fn event_timeout(mut self, timeout: Duration) -> Self {
        self.event_timeout = timeout;
        self
    }
}

impl<E> Default for Config<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Config<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("events", &self.events.is_some())
            .field("on_event", &self.on_event.is_some())
            .field("default_style", &self.default_style)
            .field("key_timeout", &self.key_timeout)
            .field("event_timeout", &self.event_timeout)
            .finish()
    }
}
