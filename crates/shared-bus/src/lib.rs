//! # Shared Bus - Notification Bus for Registry Events
//!
//! Every committed registry call publishes its notifications here, where
//! external indexers and in-process consumers subscribe to them.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │   Registry   │                    │   Indexer    │
//! │   Service    │    publish()       │  / Journal   │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! ## Ordering
//!
//! - Each published event is wrapped in an `EventEnvelope` carrying the
//!   call's `correlation_id` and a bus-wide `sequence`.
//! - Events from one call share a correlation id and have consecutive
//!   sequence numbers in emission order.
//!
//! ## Lag
//!
//! A subscriber more than `capacity` envelopes behind loses the oldest ones.
//! The loss is reported as `SubscriptionError::Lagged { missed }` by the
//! next read; it is never skipped silently.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventEnvelope, EventFilter, EventTopic, RegistryEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Current protocol version for bus envelopes.
pub const PROTOCOL_VERSION: u16 = 1;

/// Maximum events to buffer per subscriber before the oldest are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
