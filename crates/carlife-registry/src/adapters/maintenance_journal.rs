//! # Maintenance Journal
//!
//! Append-only audit trail of maintenance visits, folded from the
//! `MaintenanceAdded` notifications on the bus. The registry core keeps only
//! the latest service state; this adapter keeps every visit.
//!
//! A feed that lags loses envelopes. The journal records each such gap and
//! reports it from `sync`; a journal with gaps is no longer a complete
//! history.

use crate::domain::entities::MaintenanceEntry;
use shared_bus::{
    EventEnvelope, EventFilter, EventTopic, RegistryEvent, Subscription, SubscriptionError,
};
use shared_types::entities::TokenId;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from [`MaintenanceJournal::sync`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum JournalError {
    /// The feed lost envelopes during this sync. Everything received was
    /// still folded; the loss is recorded in [`MaintenanceJournal::gaps`].
    #[error("maintenance feed lagged: {missed} envelopes lost, {added} entries added")]
    Incomplete {
        /// Envelopes lost during this sync.
        missed: u64,
        /// Entries folded during this sync.
        added: usize,
    },

    /// The bus is gone.
    #[error("maintenance feed closed")]
    Closed,
}

/// A stretch of the bus the journal never saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalGap {
    /// Sequence of the last envelope read before the gap.
    pub after_sequence: Option<u64>,
    /// Envelopes lost, of any topic.
    pub missed: u64,
}

/// Per-record maintenance histories in bus order.
#[derive(Debug, Default, Clone)]
pub struct MaintenanceJournal {
    histories: HashMap<TokenId, Vec<MaintenanceEntry>>,
    entries: usize,
    gaps: Vec<JournalGap>,
}

impl MaintenanceJournal {
    /// Create an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter for a subscription that feeds this journal.
    #[must_use]
    pub fn filter() -> EventFilter {
        EventFilter::topics(vec![EventTopic::Lifecycle])
    }

    /// Folds one envelope. Returns true if it was a maintenance entry.
    pub fn apply(&mut self, envelope: &EventEnvelope) -> bool {
        let RegistryEvent::MaintenanceAdded {
            token_id,
            mileage,
            notes,
        } = &envelope.event
        else {
            return false;
        };

        self.histories
            .entry(*token_id)
            .or_default()
            .push(MaintenanceEntry {
                token_id: *token_id,
                mileage: *mileage,
                notes: notes.clone(),
                sequence: envelope.sequence,
            });
        self.entries += 1;
        true
    }

    /// Folds every buffered envelope of `subscription`. Returns the number
    /// of maintenance entries added.
    ///
    /// # Errors
    ///
    /// `Incomplete` when the feed lagged; reading continues past the gap, so
    /// the envelopes that survived are folded regardless. `Closed` when the
    /// bus is gone and nothing was buffered.
    pub fn sync(&mut self, subscription: &mut Subscription) -> Result<usize, JournalError> {
        let mut added = 0;
        let mut missed = 0;
        loop {
            match subscription.try_recv() {
                Ok(Some(envelope)) => {
                    if self.apply(&envelope) {
                        added += 1;
                    }
                }
                Ok(None) => break,
                Err(SubscriptionError::Lagged { missed: lost }) => {
                    self.note_gap(subscription.last_sequence(), lost);
                    missed += lost;
                }
                Err(SubscriptionError::Closed) if added == 0 && missed == 0 => {
                    return Err(JournalError::Closed);
                }
                Err(SubscriptionError::Closed) => break,
            }
        }

        debug!(added, total = self.entries, "Maintenance journal synced");
        if missed > 0 {
            return Err(JournalError::Incomplete { missed, added });
        }
        Ok(added)
    }

    /// Records envelopes lost by the feed, for consumers reading it with
    /// `Subscription::recv` instead of [`Self::sync`].
    pub fn note_gap(&mut self, after_sequence: Option<u64>, missed: u64) {
        warn!(missed, after_sequence = ?after_sequence, "Maintenance journal has a gap");
        self.gaps.push(JournalGap {
            after_sequence,
            missed,
        });
    }

    /// Gaps met so far, oldest first.
    #[must_use]
    pub fn gaps(&self) -> &[JournalGap] {
        &self.gaps
    }

    /// True while the journal has seen every maintenance notification since
    /// its subscription opened.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.gaps.is_empty()
    }

    /// Visits of one record, oldest first.
    #[must_use]
    pub fn history(&self, token_id: TokenId) -> &[MaintenanceEntry] {
        self.histories
            .get(&token_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of entries across all records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
    }

    /// True when no visit has been journaled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }
}
