//! # Error Types
//!
//! All error types for registry operations and the token-ledger collaborator.

use crate::domain::authorization::Permission;
use shared_types::entities::{AccountId, TokenId};
use thiserror::Error;

// =============================================================================
// REGISTRY ERRORS
// =============================================================================

/// Errors returned by every registry operation.
///
/// A failed call leaves no trace: no record, counter, flag or membership
/// change is committed and no notification is published.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Caller failed the authorization predicate for the operation.
    #[error("unauthorized: {caller} lacks {permission} permission")]
    Unauthorized {
        /// Rejected caller.
        caller: AccountId,
        /// Right the caller lacked.
        permission: Permission,
    },

    /// Minting is paused.
    #[error("minting is paused")]
    MintingPaused,

    /// The global pause blocks this operation.
    #[error("operation is paused")]
    OperationPaused,

    /// No record exists for the id.
    #[error("record not found: {0}")]
    RecordNotFound(TokenId),

    /// Batch read exceeds the configured maximum.
    #[error("batch too large: {requested} > {max}")]
    BatchTooLarge {
        /// Requested count.
        requested: u64,
        /// Configured maximum.
        max: u64,
    },

    /// The token ledger rejected the call.
    #[error("ledger error: {0}")]
    Ledger(LedgerError),
}

impl RegistryError {
    /// Returns the payload-free discriminant of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::MintingPaused => ErrorKind::MintingPaused,
            Self::OperationPaused => ErrorKind::OperationPaused,
            Self::RecordNotFound(_) => ErrorKind::RecordNotFound,
            Self::BatchTooLarge { .. } => ErrorKind::BatchTooLarge,
            Self::Ledger(_) => ErrorKind::Ledger,
        }
    }

    /// Builds an `Unauthorized` error.
    #[must_use]
    pub fn unauthorized(caller: AccountId, permission: Permission) -> Self {
        Self::Unauthorized { caller, permission }
    }
}

impl From<LedgerError> for RegistryError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::TransferPaused => Self::OperationPaused,
            other => Self::Ledger(other),
        }
    }
}

/// Stable error discriminants, for callers that branch on cause only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`RegistryError::Unauthorized`].
    Unauthorized,
    /// See [`RegistryError::MintingPaused`].
    MintingPaused,
    /// See [`RegistryError::OperationPaused`].
    OperationPaused,
    /// See [`RegistryError::RecordNotFound`].
    RecordNotFound,
    /// See [`RegistryError::BatchTooLarge`].
    BatchTooLarge,
    /// See [`RegistryError::Ledger`].
    Ledger,
}

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors from the token-ledger collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No identity token exists for the id.
    #[error("token not found: {0}")]
    TokenNotFound(TokenId),

    /// An identity token already exists for the id.
    #[error("token already minted: {0}")]
    AlreadyMinted(TokenId),

    /// `from` does not hold the token.
    #[error("incorrect owner of {token_id}: expected {expected}, holder is {actual}")]
    IncorrectOwner {
        /// Token being moved.
        token_id: TokenId,
        /// Holder named by the caller.
        expected: AccountId,
        /// Actual holder.
        actual: AccountId,
    },

    /// Caller is not allowed to move the token.
    #[error("{caller} is not the holder of {token_id}")]
    NotOwner {
        /// Rejected caller.
        caller: AccountId,
        /// Token being moved.
        token_id: TokenId,
    },

    /// Tokens cannot be held by the receiver.
    #[error("invalid receiver: {0}")]
    InvalidReceiver(AccountId),

    /// The transfer gate refused the transfer.
    #[error("transfers are paused")]
    TransferPaused,

    /// Ledger backend could not be reached.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// TESTS
// =============================================================================
