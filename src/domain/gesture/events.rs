use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use crate::domain::errors::GestureError;
use crate::domain::gesture::value_objects::PullState;

/// Base trait for all gesture events
pub trait DomainEvent: Debug + Clone {
    fn event_type(&self) -> &'static str;
}

/// Events published by the pull-to-refresh controller
#[derive(Debug, Clone, PartialEq)]
pub enum PullEvent {
    StateChanged { from: PullState, to: PullState },
    DistanceChanged { distance: f64 },
    RefreshStarted,
    /// The refresh attempt settled. Errors end here; they never become state.
    RefreshSettled { result: Result<(), GestureError> },
}

impl DomainEvent for PullEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PullEvent::StateChanged { .. } => "StateChanged",
            PullEvent::DistanceChanged { .. } => "DistanceChanged",
            PullEvent::RefreshStarted => "RefreshStarted",
            PullEvent::RefreshSettled { .. } => "RefreshSettled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<E> = Rc<dyn Fn(&E)>;

/// Single-threaded listener registry.
///
/// Handlers are snapshotted before dispatch, so a handler may subscribe,
/// unsubscribe or call back into the publisher without a borrow conflict.
pub struct Subscribers<E> {
    next_id: RefCell<u64>,
    handlers: RefCell<Vec<(SubscriptionId, Handler<E>)>>,
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self { next_id: RefCell::new(0), handlers: RefCell::new(Vec::new()) }
    }
}

impl<E> Subscribers<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&E) + 'static,
    {
        let id = {
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            SubscriptionId(*next)
        };
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn publish(&self, event: &E) {
        let snapshot: Vec<Handler<E>> =
            self.handlers.borrow().iter().map(|(_, handler)| handler.clone()).collect();
        for handler in snapshot {
            handler(event);
        }
    }

    pub fn clear(&self) {
        self.handlers.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn unsubscribed_handler_stops_receiving() {
        let subs: Subscribers<PullEvent> = Subscribers::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let id = subs.subscribe(move |_| counter.set(counter.get() + 1));

        subs.publish(&PullEvent::RefreshStarted);
        assert!(subs.unsubscribe(id));
        subs.publish(&PullEvent::RefreshStarted);

        assert_eq!(hits.get(), 1);
        assert!(subs.is_empty());
        assert!(!subs.unsubscribe(id));
    }

    #[test]
    fn event_type_names_variant() {
        let ev = PullEvent::StateChanged { from: PullState::Idle, to: PullState::Pulling };
        assert_eq!(ev.event_type(), "StateChanged");
    }
}
