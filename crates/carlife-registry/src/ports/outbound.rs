//! # Driven Ports (SPI - Outbound)
//!
//! Collaborators the registry depends on:
//! - the token ledger, which owns identity creation, holders and transfers
//! - a clock, the sole source of `now`

use crate::domain::pause::TransferGate;
use crate::errors::LedgerError;
use async_trait::async_trait;
use shared_types::entities::{AccountId, Timestamp, TokenId};
use std::time::{SystemTime, UNIX_EPOCH};

// =============================================================================
// TOKEN LEDGER
// =============================================================================

/// Identity-token bookkeeping.
///
/// ## Implementation Notes
///
/// `transfer` must call `gate.transfers_allowed()` before any ownership or
/// receiver check and fail with `LedgerError::TransferPaused` when it
/// returns false.
#[async_trait]
pub trait TokenLedger: Send + Sync {
    /// Creates the identity token `token_id` held by `owner`.
    ///
    /// # Errors
    ///
    /// `InvalidReceiver` for the zero account, `AlreadyMinted` for a reused id.
    async fn mint_identity(
        &self,
        owner: AccountId,
        token_id: TokenId,
        metadata_uri: Option<String>,
    ) -> Result<(), LedgerError>;

    /// Moves `token_id` from `from` to `to` on behalf of `caller`.
    async fn transfer(
        &self,
        gate: &dyn TransferGate,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        token_id: TokenId,
    ) -> Result<(), LedgerError>;

    /// Current holder.
    async fn owner_of(&self, token_id: TokenId) -> Result<AccountId, LedgerError>;

    /// Metadata URI stored at mint, empty when none.
    async fn metadata_uri(&self, token_id: TokenId) -> Result<String, LedgerError>;

    /// Number of tokens held by `owner`.
    async fn balance_of(&self, owner: AccountId) -> u64;
}

// =============================================================================
// CLOCK
// =============================================================================

/// Source of the current time, in unix seconds.
pub trait Clock: Send + Sync {
    /// Current time.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0)
    }
}
