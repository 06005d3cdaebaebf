//! # Event Publisher
//!
//! Defines the publishing side of the event bus.

use crate::events::{EventEnvelope, EventFilter, RegistryEvent};
use crate::subscriber::{EventStream, Subscription};
use crate::{DEFAULT_CHANNEL_CAPACITY, PROTOCOL_VERSION};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, warn};
use uuid::Uuid;

/// Trait for publishing events to the bus.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an event emitted by the call identified by `correlation_id`.
    ///
    /// # Returns
    ///
    /// The number of active subscribers that received the event.
    async fn publish(&self, correlation_id: Uuid, event: RegistryEvent) -> usize;

    /// Get the total number of events published.
    fn events_published(&self) -> u64;
}

/// In-memory bus over `tokio::sync::broadcast`.
///
/// Every subscriber sees every envelope in sequence order, filtering on its
/// own side. `capacity` bounds how far a subscriber may fall behind before
/// it starts losing envelopes (reported as `SubscriptionError::Lagged`).
pub struct InMemoryEventBus {
    /// Broadcast sender for envelopes.
    sender: broadcast::Sender<EventEnvelope>,

    /// Serializes sequence assignment and send.
    order: Mutex<()>,

    /// Total events published. Doubles as the next sequence number.
    events_published: AtomicU64,

    /// Channel capacity.
    capacity: usize,
}

impl InMemoryEventBus {
    /// Create a new in-memory event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new in-memory event bus with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            order: Mutex::new(()),
            events_published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribe to envelopes matching `filter`, starting with the next one
    /// published.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(
            topics = ?filter.topics,
            tokens = filter.token_ids.len(),
            next_sequence = self.events_published(),
            "Subscription opened"
        );
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Same as [`Self::subscribe`], as a `Stream`.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        debug!(topics = ?filter.topics, "Event stream opened");
        EventStream::new(self.sender.subscribe(), filter)
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

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, correlation_id: Uuid, event: RegistryEvent) -> usize {
        let _order = self.order.lock().await;

        let topic = event.topic();
        // Always advance the sequence (event was attempted)
        let sequence = self.events_published.fetch_add(1, Ordering::SeqCst);

        let envelope = EventEnvelope {
            version: PROTOCOL_VERSION,
            correlation_id,
            sequence,
            event,
        };

        match self.sender.send(envelope) {
            Ok(receiver_count) => {
                debug!(
                    topic = ?topic,
                    sequence,
                    receivers = receiver_count,
                    "Event published"
                );
                receiver_count
            }
            Err(e) => {
                warn!(
                    topic = ?topic,
                    sequence,
                    error = %e,
                    "Event dropped (no receivers)"
                );
                0
            }
        }
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::SeqCst)
    }
}
