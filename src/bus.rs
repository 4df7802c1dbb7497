//! The same-session event bus.
//!
//! Independently-mounted views observe state changes made by other views
//! without polling: a mutation site writes the store, then emits a
//! [`Notification`] carrying the new collection, and every subscriber to
//! that topic runs synchronously, in subscription order, on the same
//! logical tick. There is no queuing, no batching, and no cross-process
//! delivery -- a second session sharing the same backing store goes stale
//! until it re-reads on its own.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::event::{Notification, Topic};

type Handler = Arc<dyn Fn(&Notification) + Send + Sync>;

struct Registration {
    id: u64,
    topic: Topic,
    handler: Handler,
}

#[derive(Default)]
struct BusInner {
    next_id: u64,
    subscribers: Vec<Registration>,
}

/// Synchronous publish/subscribe bus for [`Notification`]s.
///
/// `Clone` is cheap -- the subscriber list is `Arc`-wrapped and shared, so
/// clones observe the same subscriptions.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<Mutex<BusInner>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("EventBus")
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl EventBus {
    /// Create a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every notification on `topic`.
    ///
    /// Returns a [`Subscription`] disposer. Dropping it unregisters the
    /// handler, so a view that unmounts cannot leak its subscription; call
    /// [`Subscription::forget`] to keep the handler for the life of the
    /// bus instead.
    pub fn subscribe<F>(&self, topic: Topic, handler: F) -> Subscription
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push(Registration {
            id,
            topic,
            handler: Arc::new(handler),
        });
        tracing::debug!(topic = %topic, id, "subscribed");
        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
            active: true,
        }
    }

    /// Notify every current subscriber to the notification's topic.
    ///
    /// Handlers run synchronously in subscription order before `emit`
    /// returns. Emitting with no subscribers is a no-op. The subscriber
    /// list is snapshotted first, so a handler may subscribe or
    /// unsubscribe (or emit) without deadlocking; registrations made
    /// during the emit are not retroactively invoked for it.
    ///
    /// Returns the number of handlers notified.
    pub fn emit(&self, notification: &Notification) -> usize {
        let topic = notification.topic();
        let handlers: Vec<Handler> = {
            let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner
                .subscribers
                .iter()
                .filter(|r| r.topic == topic)
                .map(|r| Arc::clone(&r.handler))
                .collect()
        };
        tracing::debug!(topic = %topic, handlers = handlers.len(), "emitting");
        for handler in &handlers {
            handler(notification);
        }
        handlers.len()
    }

    /// Number of live subscriptions across all topics.
    pub fn subscriber_count(&self) -> usize {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.subscribers.len()
    }
}

/// Disposer for a single subscription.
///
/// Dropping the value unregisters the handler. [`forget`](Subscription::forget)
/// leaves the handler registered for as long as the bus lives.
#[must_use = "dropping a Subscription immediately unsubscribes its handler"]
pub struct Subscription {
    id: u64,
    inner: Weak<Mutex<BusInner>>,
    active: bool,
}

impl Subscription {
    /// Unregister the handler now. Equivalent to dropping the value.
    pub fn unsubscribe(mut self) {
        self.remove();
    }

    /// Keep the handler registered for the life of the bus and discard
    /// the disposer.
    pub fn forget(mut self) {
        self.active = false;
    }

    fn remove(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(inner) = self.inner.upgrade() {
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.subscribers.retain(|r| r.id != self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.active)
            .finish()
    }
}
