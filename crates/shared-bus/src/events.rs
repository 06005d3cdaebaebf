//! # Registry Events
//!
//! Defines all notifications that flow through the shared bus.

use serde::{Deserialize, Serialize};
use shared_types::entities::{AccountId, RoleId, TokenId};
use uuid::Uuid;

/// All notifications the registry can publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    // =========================================================================
    // LIFECYCLE
    // =========================================================================
    /// A new vehicle record and its identity token were created.
    VehicleMinted {
        /// Newly assigned id.
        token_id: TokenId,
        /// Initial holder of the identity token.
        recipient: AccountId,
        /// Vehicle identification number as given at mint.
        vin: String,
    },

    /// Mileage and condition of a record were overwritten.
    VehicleInfoUpdated {
        /// Updated record.
        token_id: TokenId,
        /// New mileage.
        mileage: u64,
        /// New condition text.
        condition: String,
    },

    /// A maintenance visit was recorded.
    ///
    /// `notes` exist only in this notification; the record keeps the latest
    /// service date and mileage.
    MaintenanceAdded {
        /// Serviced record.
        token_id: TokenId,
        /// Mileage at service time.
        mileage: u64,
        /// Free-text service notes.
        notes: String,
    },

    // =========================================================================
    // TOKEN LEDGER
    // =========================================================================
    /// An identity token changed holder.
    Transfer {
        /// Previous holder.
        from: AccountId,
        /// New holder.
        to: AccountId,
        /// Transferred token.
        token_id: TokenId,
    },

    // =========================================================================
    // PAUSE CONTROLLER
    // =========================================================================
    /// The global pause switch changed.
    PauseChanged {
        /// New value.
        paused: bool,
        /// Account that flipped the switch.
        by: AccountId,
    },

    /// The minting pause switch changed.
    MintingPauseChanged {
        /// New value.
        paused: bool,
        /// Account that flipped the switch.
        by: AccountId,
    },

    // =========================================================================
    // AUTHORIZATION
    // =========================================================================
    /// An account was added to or removed from the custom-authorized set.
    AuthorizationChanged {
        /// Affected account.
        account: AccountId,
        /// Whether the account is now authorized.
        authorized: bool,
        /// Admin that made the change.
        by: AccountId,
    },

    /// The admin nominated a successor who has not yet accepted.
    AdminTransferStarted {
        /// Current admin.
        current: AccountId,
        /// Nominated successor.
        pending: AccountId,
    },

    /// Admin rights moved to a new account.
    AdminTransferred {
        /// Former admin.
        previous: AccountId,
        /// New admin.
        new: AccountId,
    },

    /// An account gained a role.
    RoleGranted {
        /// Granted role.
        role: RoleId,
        /// Account that received it.
        account: AccountId,
        /// Account that granted it.
        sender: AccountId,
    },

    /// An account lost a role.
    RoleRevoked {
        /// Revoked role.
        role: RoleId,
        /// Account that lost it.
        account: AccountId,
        /// Account that revoked it (the holder itself on renounce).
        sender: AccountId,
    },

    /// The admin role governing a role was replaced.
    RoleAdminChanged {
        /// Governed role.
        role: RoleId,
        /// Previous admin role.
        previous_admin: RoleId,
        /// New admin role.
        new_admin: RoleId,
    },
}

impl RegistryEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::VehicleMinted { .. }
            | Self::VehicleInfoUpdated { .. }
            | Self::MaintenanceAdded { .. } => EventTopic::Lifecycle,
            Self::Transfer { .. } => EventTopic::Transfer,
            Self::PauseChanged { .. } | Self::MintingPauseChanged { .. } => EventTopic::Pause,
            Self::AuthorizationChanged { .. }
            | Self::AdminTransferStarted { .. }
            | Self::AdminTransferred { .. }
            | Self::RoleGranted { .. }
            | Self::RoleRevoked { .. }
            | Self::RoleAdminChanged { .. } => EventTopic::Authorization,
        }
    }

    /// Get the record this event refers to, if any.
    #[must_use]
    pub fn token_id(&self) -> Option<TokenId> {
        match self {
            Self::VehicleMinted { token_id, .. }
            | Self::VehicleInfoUpdated { token_id, .. }
            | Self::MaintenanceAdded { token_id, .. }
            | Self::Transfer { token_id, .. } => Some(*token_id),
            _ => None,
        }
    }
}

/// A published event together with its ordering metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Envelope protocol version.
    pub version: u16,
    /// Identifies the registry call that emitted the event.
    pub correlation_id: Uuid,
    /// Bus-wide publication order, starting at 0.
    pub sequence: u64,
    /// The notification itself.
    pub event: RegistryEvent,
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Mint, update and maintenance notifications.
    Lifecycle,
    /// Identity token transfers.
    Transfer,
    /// Pause switch changes.
    Pause,
    /// Allow-list, admin and role changes.
    Authorization,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Records to include. Empty means every record and record-less events.
    pub token_ids: Vec<TokenId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            token_ids: Vec::new(),
        }
    }

    /// Create a filter for events about specific records.
    #[must_use]
    pub fn for_tokens(token_ids: Vec<TokenId>) -> Self {
        Self {
            topics: Vec::new(),
            token_ids,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &RegistryEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let token_match = self.token_ids.is_empty()
            || event
                .token_id()
                .is_some_and(|id| self.token_ids.contains(&id));

        topic_match && token_match
    }
}
