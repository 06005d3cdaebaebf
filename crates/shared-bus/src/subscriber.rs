//! # Subscriptions
//!
//! Read side of the bus. Each subscriber owns a bounded window of the
//! broadcast channel; a subscriber that falls further behind than the
//! channel capacity loses the oldest envelopes. Every such gap is reported
//! as `SubscriptionError::Lagged` with the number of envelopes missed, so
//! consumers that fold the stream (audit trails, indexers) can tell a
//! complete history from a truncated one.

use crate::events::{EventEnvelope, EventFilter};
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::Stream;
use tracing::warn;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The event bus was dropped and every buffered envelope consumed.
    #[error("event bus closed")]
    Closed,

    /// Envelopes were overwritten before this subscriber read them.
    #[error("subscriber lagged: {missed} envelopes lost")]
    Lagged {
        /// Number of envelopes (of any topic) that were lost.
        missed: u64,
    },
}

/// A filtered view of the bus.
pub struct Subscription {
    receiver: broadcast::Receiver<EventEnvelope>,
    filter: EventFilter,
    /// Sequence of the last envelope taken off the channel, matched or not.
    last_sequence: Option<u64>,
    /// Envelopes lost over the life of the subscription.
    missed: u64,
    /// Gap hit by `drain` after it had already collected envelopes.
    pending_gap: Option<u64>,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<EventEnvelope>, filter: EventFilter) -> Self {
        Self {
            receiver,
            filter,
            last_sequence: None,
            missed: 0,
            pending_gap: None,
        }
    }

    /// Waits for the next matching envelope.
    ///
    /// # Errors
    ///
    /// `Lagged` once per gap, after which reading resumes at the oldest
    /// envelope still buffered; `Closed` when the bus is gone.
    pub async fn recv(&mut self) -> Result<EventEnvelope, SubscriptionError> {
        if let Some(missed) = self.pending_gap.take() {
            return Err(SubscriptionError::Lagged { missed });
        }
        loop {
            match self.receiver.recv().await {
                Ok(envelope) => {
                    if let Some(envelope) = self.accept(envelope) {
                        return Ok(envelope);
                    }
                }
                Err(RecvError::Closed) => return Err(SubscriptionError::Closed),
                Err(RecvError::Lagged(missed)) => return Err(self.gap(missed)),
            }
        }
    }

    /// Takes the next matching envelope if one is buffered.
    ///
    /// # Errors
    ///
    /// Same as [`Self::recv`].
    pub fn try_recv(&mut self) -> Result<Option<EventEnvelope>, SubscriptionError> {
        if let Some(missed) = self.pending_gap.take() {
            return Err(SubscriptionError::Lagged { missed });
        }
        loop {
            match self.receiver.try_recv() {
                Ok(envelope) => {
                    if let Some(envelope) = self.accept(envelope) {
                        return Ok(Some(envelope));
                    }
                }
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Closed) => return Err(SubscriptionError::Closed),
                Err(TryRecvError::Lagged(missed)) => return Err(self.gap(missed)),
            }
        }
    }

    /// Takes every matching envelope currently buffered, in bus order.
    ///
    /// A gap met after some envelopes were collected is held back and
    /// reported by the next read, so neither the envelopes nor the gap are
    /// lost.
    ///
    /// # Errors
    ///
    /// Same as [`Self::recv`], when nothing was collected before the error.
    pub fn drain(&mut self) -> Result<Vec<EventEnvelope>, SubscriptionError> {
        let mut drained = Vec::new();
        loop {
            match self.try_recv() {
                Ok(Some(envelope)) => drained.push(envelope),
                Ok(None) => return Ok(drained),
                Err(err) if drained.is_empty() => return Err(err),
                Err(err) => {
                    if let SubscriptionError::Lagged { missed } = err {
                        self.pending_gap = Some(missed);
                    }
                    return Ok(drained);
                }
            }
        }
    }

    /// Filter for this subscription.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    /// Sequence of the last envelope read from the bus, filtered out or not.
    #[must_use]
    pub fn last_sequence(&self) -> Option<u64> {
        self.last_sequence
    }

    /// Total envelopes lost to lag so far.
    #[must_use]
    pub fn missed(&self) -> u64 {
        self.missed
    }

    fn accept(&mut self, envelope: EventEnvelope) -> Option<EventEnvelope> {
        self.last_sequence = Some(envelope.sequence);
        self.filter.matches(&envelope.event).then_some(envelope)
    }

    fn gap(&mut self, missed: u64) -> SubscriptionError {
        self.missed += missed;
        warn!(
            missed,
            last_sequence = ?self.last_sequence,
            topics = ?self.filter.topics,
            "Subscriber lagged, envelopes lost"
        );
        SubscriptionError::Lagged { missed }
    }
}

/// Filtered bus envelopes as a `Stream`.
///
/// Yields `Err(SubscriptionError::Lagged)` in place of every gap and ends
/// when the bus is dropped.
pub struct EventStream {
    inner: BroadcastStream<EventEnvelope>,
    filter: EventFilter,
}

impl EventStream {
    pub(crate) fn new(receiver: broadcast::Receiver<EventEnvelope>, filter: EventFilter) -> Self {
        Self {
            inner: BroadcastStream::new(receiver),
            filter,
        }
    }

    /// Filter for this stream.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

impl Stream for EventStream {
    type Item = Result<EventEnvelope, SubscriptionError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match Pin::new(&mut self.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(envelope))) => {
                    if self.filter.matches(&envelope.event) {
                        return Poll::Ready(Some(Ok(envelope)));
                    }
                }
                Poll::Ready(Some(Err(BroadcastStreamRecvError::Lagged(missed)))) => {
                    warn!(missed, "Event stream lagged, envelopes lost");
                    return Poll::Ready(Some(Err(SubscriptionError::Lagged { missed })));
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
