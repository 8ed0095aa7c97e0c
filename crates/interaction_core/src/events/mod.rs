//! Observer lists for fire-and-forget notifications
//!
//! Key principles:
//! - Explicit registration returning a [`SubscriptionId`]
//! - Explicit removal by id and bulk `clear`
//! - Handlers run in registration order
//! - A handler cannot add or remove handlers on the signal that is
//!   currently emitting: `emit` holds the signal mutably for its whole
//!   duration, so the handler list seen by one emission is fixed

use std::fmt;

/// Handle returned by [`Signal::connect`], used to disconnect later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Multicast notification with payload `A`
pub struct Signal<A> {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Box<dyn FnMut(&A)>)>,
}

impl<A> Signal<A> {
    /// Create a signal with no handlers
    pub fn new() -> Self {
        Self {
            next_id: 0,
            handlers: Vec::new(),
        }
    }

    /// Register a handler, returning its subscription id
    pub fn connect(&mut self, handler: impl FnMut(&A) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler; returns `false` if it was not registered
    pub fn disconnect(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Remove every handler
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Deliver `args` to every handler in registration order
    pub fn emit(&mut self, args: &A) {
        for (_, handler) in &mut self.handlers {
            handler(args);
        }
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handler is registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<A> Default for Signal<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Signal<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
