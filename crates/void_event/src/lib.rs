//! # void_event - Event Bus
//!
//! Typed publish/subscribe event system for gameplay broadcasts:
//! - Publishing through a shared reference (events are queued)
//! - Priority-based delivery when the queue is processed
//! - One-shot subscriptions that detach after their first delivery
//! - Channels for consumers that prefer to drain events on their own tick
//!
//! Events are delivered in [`EventBus::process`], never inside
//! [`EventBus::publish`], so a publisher is never re-entered by its own
//! broadcast.

use std::any::{Any, TypeId};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;

/// Event priority
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    Low = 0,
    #[default]
    Normal = 1,
    High = 2,
    Critical = 3,
}

/// Event envelope containing metadata
pub struct EventEnvelope {
    /// Event type ID
    pub type_id: TypeId,
    /// Event data
    pub data: Box<dyn Any + Send + Sync>,
    /// Priority
    pub priority: Priority,
    /// Frame the event was published in
    pub frame: u64,
}

impl EventEnvelope {
    /// Create a new envelope
    pub fn new<E: Event>(event: E, priority: Priority, frame: u64) -> Self {
        Self {
            type_id: TypeId::of::<E>(),
            data: Box::new(event),
            priority,
            frame,
        }
    }

    /// Try to downcast to specific event type
    pub fn downcast_ref<E: Event>(&self) -> Option<&E> {
        self.data.downcast_ref::<E>()
    }
}

/// Trait for events
pub trait Event: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Event for T {}

/// Dynamic event handler
pub type DynamicHandler = Box<dyn Fn(&dyn Any) + Send + Sync>;

/// Subscriber ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

struct Subscription {
    id: SubscriberId,
    priority: Priority,
    once: bool,
    handler: DynamicHandler,
}

/// Event bus for publishing and subscribing to events
pub struct EventBus {
    queue: Mutex<Vec<EventEnvelope>>,
    handlers: BTreeMap<TypeId, Vec<Subscription>>,
    next_subscriber_id: u64,
    frame: u64,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(Vec::new()),
            handlers: BTreeMap::new(),
            next_subscriber_id: 1,
            frame: 0,
        }
    }

    /// Publish an event
    pub fn publish<E: Event>(&self, event: E) {
        self.publish_with_priority(event, Priority::Normal);
    }

    /// Publish an event with priority
    pub fn publish_with_priority<E: Event>(&self, event: E, priority: Priority) {
        self.queue
            .lock()
            .push(EventEnvelope::new(event, priority, self.frame));
    }

    /// Subscribe to an event type
    pub fn subscribe<E: Event, F>(&mut self, handler: F) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.insert_subscription(handler, Priority::Normal, false)
    }

    /// Subscribe with priority
    pub fn subscribe_with_priority<E: Event, F>(
        &mut self,
        handler: F,
        priority: Priority,
    ) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.insert_subscription(handler, priority, false)
    }

    /// Subscribe for exactly one delivery; the subscription detaches itself afterwards
    pub fn subscribe_once<E: Event, F>(&mut self, handler: F) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.insert_subscription(handler, Priority::Normal, true)
    }

    /// Route every event of type `E` into a channel the caller drains itself
    pub fn subscribe_channel<E: Event + Clone>(&mut self) -> (SubscriberId, EventChannel<E>) {
        let channel = EventChannel::new();
        let sender = channel.clone();
        let id = self.subscribe(move |event: &E| sender.send(event.clone()));
        (id, channel)
    }

    fn insert_subscription<E: Event, F>(
        &mut self,
        handler: F,
        priority: Priority,
        once: bool,
    ) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = SubscriberId(self.next_subscriber_id);
        self.next_subscriber_id += 1;

        let wrapped: DynamicHandler = Box::new(move |any: &dyn Any| {
            if let Some(event) = any.downcast_ref::<E>() {
                handler(event);
            }
        });

        let handlers = self.handlers.entry(TypeId::of::<E>()).or_default();
        handlers.push(Subscription {
            id,
            priority,
            once,
            handler: wrapped,
        });
        // Stable sort keeps subscription order within a priority
        handlers.sort_by(|a, b| b.priority.cmp(&a.priority));

        id
    }

    /// Unsubscribe. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        for handlers in self.handlers.values_mut() {
            handlers.retain(|sub| sub.id != id);
        }
    }

    /// Whether a subscription is still attached
    pub fn is_subscribed(&self, id: SubscriberId) -> bool {
        self.handlers
            .values()
            .any(|handlers| handlers.iter().any(|sub| sub.id == id))
    }

    /// Deliver all pending events. Events published by handlers are
    /// delivered on the next call.
    pub fn process(&mut self) -> usize {
        let mut events = std::mem::take(&mut *self.queue.lock());
        events.sort_by(|a, b| b.priority.cmp(&a.priority));
        let delivered = events.len();

        for envelope in events {
            let Some(handlers) = self.handlers.get_mut(&envelope.type_id) else {
                log::trace!("event dropped: no subscribers");
                continue;
            };
            for sub in handlers.iter() {
                (sub.handler)(envelope.data.as_ref());
            }
            handlers.retain(|sub| !sub.once);
        }

        self.frame += 1;
        delivered
    }

    /// Clear all events without processing
    pub fn clear(&self) {
        self.queue.lock().clear();
    }

    /// Get pending event count
    pub fn pending_count(&self) -> usize {
        self.queue.lock().len()
    }

    /// Check if there are pending events
    pub fn has_pending(&self) -> bool {
        !self.queue.lock().is_empty()
    }

    /// Number of `process` calls so far
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared inbox for single-type events. Clones share the same queue.
pub struct EventChannel<E: Event> {
    queue: Arc<Mutex<VecDeque<E>>>,
}

impl<E: Event> EventChannel<E> {
    /// Create a new channel
    pub fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Send an event
    pub fn send(&self, event: E) {
        self.queue.lock().push_back(event);
    }

    /// Receive the oldest event
    pub fn receive(&self) -> Option<E> {
        self.queue.lock().pop_front()
    }

    /// Drain all events in arrival order
    pub fn drain(&self) -> Vec<E> {
        self.queue.lock().drain(..).collect()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Get pending count
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }
}

impl<E: Event> Clone for EventChannel<E> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
        }
    }
}

impl<E: Event> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Prelude
pub mod prelude {
    pub use crate::{Event, EventBus, EventChannel, EventEnvelope, Priority, SubscriberId};
}
