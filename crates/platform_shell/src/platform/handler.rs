//! Event handler contract
//!
//! Backends push translated events into a handler; the trace player
//! pushes replayed events into the same handler. Application code
//! downstream of the handler cannot tell a live session from a replay,
//! which is the whole point of the trace subsystem.

use std::collections::VecDeque;

use super::event::PlatformEvent;

/// Receives dispatched platform events
///
/// Returns true if the event was consumed, false to allow forwarding
/// when handlers are chained.
pub trait EventHandler {
    /// Handle one event, return true if consumed
    fn on_event(&mut self, event: &PlatformEvent) -> bool;
}

/// Adapter turning a closure into an [`EventHandler`]
pub struct FnEventHandler<F>
where
    F: FnMut(&PlatformEvent) -> bool,
{
    callback: F,
}

impl<F> FnEventHandler<F>
where
    F: FnMut(&PlatformEvent) -> bool,
{
    /// Wrap a closure
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> EventHandler for FnEventHandler<F>
where
    F: FnMut(&PlatformEvent) -> bool,
{
    fn on_event(&mut self, event: &PlatformEvent) -> bool {
        (self.callback)(event)
    }
}

/// Handler that queues events for pull-style consumption
///
/// Useful for applications that would rather drain events once per
/// frame than react inside the dispatch call, and for tests that want
/// to assert on exactly what was dispatched.
#[derive(Default)]
pub struct QueueingHandler {
    queue: VecDeque<PlatformEvent>,
}

impl QueueingHandler {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the oldest queued event, if any
    pub fn pop(&mut self) -> Option<PlatformEvent> {
        self.queue.pop_front()
    }

    /// Drain every queued event in dispatch order
    pub fn drain(&mut self) -> Vec<PlatformEvent> {
        self.queue.drain(..).collect()
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl EventHandler for QueueingHandler {
    fn on_event(&mut self, event: &PlatformEvent) -> bool {
        self.queue.push_back(event.clone());
        true
    }
}

/// Shared handlers: a window owns one end, the application keeps the
/// other to read results out (single-threaded, like everything here).
impl<H: EventHandler> EventHandler for std::rc::Rc<std::cell::RefCell<H>> {
    fn on_event(&mut self, event: &PlatformEvent) -> bool {
        self.borrow_mut().on_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::event::EventKind;
    use crate::platform::window::WindowId;

    fn close_event(timestamp: f64) -> PlatformEvent {
        PlatformEvent::new(timestamp, WindowId::new(1), EventKind::WindowClose)
    }

    #[test]
    fn closure_handler_sees_every_event() {
        let mut seen = 0;
        {
            let mut handler = FnEventHandler::new(|_event| {
                seen += 1;
                true
            });
            assert!(handler.on_event(&close_event(0.0)));
            assert!(handler.on_event(&close_event(1.0)));
        }
        assert_eq!(seen, 2);
    }

    #[test]
    fn queueing_handler_preserves_dispatch_order() {
        let mut handler = QueueingHandler::new();
        handler.on_event(&close_event(0.0));
        handler.on_event(&close_event(5.0));
        handler.on_event(&close_event(12.0));

        let drained = handler.drain();
        let stamps: Vec<f64> = drained.iter().map(|e| e.timestamp).collect();
        assert_eq!(stamps, vec![0.0, 5.0, 12.0]);
        assert!(handler.is_empty());
    }
}
