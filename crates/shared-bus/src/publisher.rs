//! # Lifecycle Publisher
//!
//! Defines the publishing side of the lifecycle bus.
//!
//! Publishing is synchronous: a field notifies its container inside the
//! mutation that caused the transition, so delivery must not suspend.

use crate::events::{EventFilter, LifecycleEvent};
use crate::subscriber::{EventStream, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::trace;

/// Trait for publishing lifecycle events.
pub trait LifecyclePublisher: Send + Sync {
    /// Publish an event to the bus.
    ///
    /// # Returns
    ///
    /// The number of active subscribers that received the event.
    fn publish(&self, event: LifecycleEvent) -> usize;

    /// Get the total number of events published.
    fn events_published(&self) -> u64;
}

/// In-memory implementation of the lifecycle bus.
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer semantics.
pub struct InMemoryLifecycleBus {
    /// Broadcast sender for events.
    sender: broadcast::Sender<LifecycleEvent>,

    /// Total events published.
    events_published: AtomicU64,

    /// Channel capacity.
    capacity: usize,
}

impl InMemoryLifecycleBus {
    /// Create a new bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new bus with specified capacity.
    ///
    /// A zero capacity is raised to one; broadcast channels need room for at
    /// least one message.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            events_published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribe to events matching a filter.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        trace!(topics = ?filter.topics, kinds = ?filter.kinds, paths = ?filter.paths, "New lifecycle subscription");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Get a stream of events matching a filter.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        EventStream::new(self.subscribe(filter))
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryLifecycleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecyclePublisher for InMemoryLifecycleBus {
    fn publish(&self, event: LifecycleEvent) -> usize {
        let kind = event.kind;
        let path = event.path.clone();

        self.events_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(event) {
            Ok(receivers) => {
                trace!(kind = %kind, path = %path, receivers, "Lifecycle event published");
                receivers
            }
            Err(_) => {
                // Nobody listening is the normal case for headless forms.
                trace!(kind = %kind, path = %path, "Lifecycle event had no receivers");
                0
            }
        }
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}
