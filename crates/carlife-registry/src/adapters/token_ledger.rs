//! # Token Ledger Adapter
//!
//! In-memory identity-token ledger with ERC-721 style ownership rules.
//! Production deployments would back `TokenLedger` with the chain itself.

use crate::domain::pause::TransferGate;
use crate::errors::LedgerError;
use crate::ports::outbound::TokenLedger;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::entities::{AccountId, TokenId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

#[derive(Debug, Clone)]
struct TokenEntry {
    owner: AccountId,
    metadata_uri: String,
}

/// In-memory ledger.
#[derive(Debug, Default)]
pub struct InMemoryTokenLedger {
    tokens: RwLock<HashMap<TokenId, TokenEntry>>,
    balances: RwLock<HashMap<AccountId, u64>>,
    /// When set, every call fails with `Unavailable`.
    offline: AtomicBool,
}

impl InMemoryTokenLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an outage.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of identity tokens in existence.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.read().len()
    }

    fn ensure_online(&self) -> Result<(), LedgerError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(LedgerError::Unavailable("ledger offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TokenLedger for InMemoryTokenLedger {
    async fn mint_identity(
        &self,
        owner: AccountId,
        token_id: TokenId,
        metadata_uri: Option<String>,
    ) -> Result<(), LedgerError> {
        self.ensure_online()?;
        if owner.is_zero() {
            return Err(LedgerError::InvalidReceiver(owner));
        }

        let mut tokens = self.tokens.write();
        if tokens.contains_key(&token_id) {
            return Err(LedgerError::AlreadyMinted(token_id));
        }
        tokens.insert(
            token_id,
            TokenEntry {
                owner,
                metadata_uri: metadata_uri.unwrap_or_default(),
            },
        );
        *self.balances.write().entry(owner).or_insert(0) += 1;

        debug!(token_id = %token_id, owner = %owner, "Identity minted");
        Ok(())
    }

    async fn transfer(
        &self,
        gate: &dyn TransferGate,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        token_id: TokenId,
    ) -> Result<(), LedgerError> {
        self.ensure_online()?;
        if !gate.transfers_allowed() {
            return Err(LedgerError::TransferPaused);
        }

        let mut tokens = self.tokens.write();
        let entry = tokens
            .get_mut(&token_id)
            .ok_or(LedgerError::TokenNotFound(token_id))?;

        if entry.owner != from {
            return Err(LedgerError::IncorrectOwner {
                token_id,
                expected: from,
                actual: entry.owner,
            });
        }
        if caller != entry.owner {
            return Err(LedgerError::NotOwner { caller, token_id });
        }
        if to.is_zero() {
            return Err(LedgerError::InvalidReceiver(to));
        }
        entry.owner = to;
        let mut balances = self.balances.write();
        if let Some(balance) = balances.get_mut(&from) {
            *balance = balance.saturating_sub(1);
        }
        *balances.entry(to).or_insert(0) += 1;

        debug!(token_id = %token_id, from = %from, to = %to, "Identity transferred");
        Ok(())
    }

    async fn owner_of(&self, token_id: TokenId) -> Result<AccountId, LedgerError> {
        self.ensure_online()?;
        self.tokens
            .read()
            .get(&token_id)
            .map(|entry| entry.owner)
            .ok_or(LedgerError::TokenNotFound(token_id))
    }

    async fn metadata_uri(&self, token_id: TokenId) -> Result<String, LedgerError> {
        self.ensure_online()?;
        self.tokens
            .read()
            .get(&token_id)
            .map(|entry| entry.metadata_uri.clone())
            .ok_or(LedgerError::TokenNotFound(token_id))
    }

    async fn balance_of(&self, owner: AccountId) -> u64 {
        self.balances.read().get(&owner).copied().unwrap_or(0)
    }
}
