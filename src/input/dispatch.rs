//! Priority dispatch of key presses to view handlers.
//!
//! Every frame the layout engine registers the key handler of each visible
//! view together with that view's priority. A key is offered to the
//! handlers from the highest priority down until one of them takes it.
//! Handlers stay registered for the remaining keys of the same tick.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::keys::Key;

/// Result of offering an event to a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Not interested; offer the event to the next handler.
    #[default]
    Unhandled,
    /// Consumed; stop dispatching this event.
    Handled,
    /// Consumed; stop the run.
    Terminate,
}

/// A view's key handler.
pub type KeyHandler = Box<dyn FnMut(Key) -> Outcome>;

struct Entry {
    priority: i32,
    handler: KeyHandler,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority.cmp(&other.priority)
    }
}

/// Max-heap of key handlers keyed by priority.
///
/// The order of handlers with equal priority is unspecified.
#[derive(Default)]
pub struct HandlerQueue {
    heap: BinaryHeap<Entry>,
}

impl HandlerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler.
    pub fn push(&mut self, priority: i32, handler: KeyHandler) {
        self.heap.push(Entry { priority, handler });
    }

    /// Remove and return the highest-priority handler.
    pub fn pop(&mut self) -> Option<(i32, KeyHandler)> {
        self.heap.pop().map(|entry| (entry.priority, entry.handler))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every handler (start of a new frame).
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Offer `key` to the handlers in descending priority.
    ///
    /// Stops at the first handler that returns something other than
    /// [`Outcome::Unhandled`] and returns that. All handlers remain
    /// registered afterwards.
    pub fn dispatch(&mut self, key: Key) -> Outcome {
        let mut offered = Vec::with_capacity(self.heap.len());
        let mut outcome = Outcome::Unhandled;
        while let Some(mut entry) = self.heap.pop() {
            outcome = (entry.handler)(key);
            offered.push(entry);
            if outcome != Outcome::Unhandled {
                break;
            }
        }
        self.heap.extend(offered);
        outcome
    }
}

impl std::fmt::Debug for HandlerQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerQueue")
            .field("len", &self.heap.len())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
