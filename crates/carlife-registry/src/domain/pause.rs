//! # Pause Controller
//!
//! Two independent switches: the global pause gates identity transfers (and,
//! in strict mode, every mutation); the minting pause gates record creation.

use crate::errors::RegistryError;
use serde::{Deserialize, Serialize};

/// Synchronous predicate the token ledger consults before committing a
/// transfer.
pub trait TransferGate: Send + Sync {
    /// Returns false while transfers must be rejected.
    fn transfers_allowed(&self) -> bool;
}

/// Both pause switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseState {
    paused: bool,
    minting_paused: bool,
}

impl PauseState {
    /// Creates the controller with explicit initial values.
    #[must_use]
    pub fn new(paused: bool, minting_paused: bool) -> Self {
        Self {
            paused,
            minting_paused,
        }
    }

    /// Global pause.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Minting pause.
    #[must_use]
    pub fn is_minting_paused(&self) -> bool {
        self.minting_paused
    }

    /// Sets the global pause. Returns true if the value changed.
    pub fn set_paused(&mut self, paused: bool) -> bool {
        std::mem::replace(&mut self.paused, paused) != paused
    }

    /// Sets the minting pause. Returns true if the value changed.
    pub fn set_minting_paused(&mut self, paused: bool) -> bool {
        std::mem::replace(&mut self.minting_paused, paused) != paused
    }

    /// Gate for `mint`. The minting pause is checked first.
    pub fn check_mint(&self, strict: bool) -> Result<(), RegistryError> {
        if self.minting_paused {
            return Err(RegistryError::MintingPaused);
        }
        self.check_mutation(strict)
    }

    /// Gate for record mutations. Only the strict variant consults the
    /// global pause.
    pub fn check_mutation(&self, strict: bool) -> Result<(), RegistryError> {
        if strict && self.paused {
            return Err(RegistryError::OperationPaused);
        }
        Ok(())
    }

    /// Gate for identity transfers. Runs ahead of every other transfer
    /// check, so a paused registry rejects all of them alike.
    pub fn check_transfer(&self) -> Result<(), RegistryError> {
        if self.paused {
            return Err(RegistryError::OperationPaused);
        }
        Ok(())
    }
}

impl Default for PauseState {
    /// Minting starts paused; the global switch starts open.
    fn default() -> Self {
        Self::new(false, true)
    }
}

impl TransferGate for PauseState {
    fn transfers_allowed(&self) -> bool {
        !self.paused
    }
}
