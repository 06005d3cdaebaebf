//! # Core Identity Entities
//!
//! ## Clusters
//!
//! - **Accounts**: `AccountId`
//! - **Tokens**: `TokenId`, `Timestamp`
//! - **Access Control**: `RoleId`

use crate::errors::ParseIdError;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// CLUSTER A: ACCOUNTS
// =============================================================================

/// A 20-byte account identity (caller, admin, token holder).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 20]);

impl AccountId {
    /// The zero account. Never a valid token holder.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an account from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an account whose bytes are all `byte`.
    #[must_use]
    pub const fn repeat_byte(byte: u8) -> Self {
        Self([byte; 20])
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero account.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = hex::encode(self.0);
        write!(f, "0x{}...{}", &encoded[..8], &encoded[36..])
    }
}

impl FromStr for AccountId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| ParseIdError::InvalidHex(e.to_string()))?;
        let array: [u8; 20] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| ParseIdError::InvalidLength {
                expected: 20,
                actual: bytes.len(),
            })?;
        Ok(Self(array))
    }
}

impl From<[u8; 20]> for AccountId {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// CLUSTER B: TOKENS
// =============================================================================

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Sequential identity of a registered vehicle, assigned from 0 upward.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Debug, Serialize, Deserialize,
)]
pub struct TokenId(pub u64);

impl TokenId {
    /// The first id ever assigned.
    pub const FIRST: Self = Self(0);

    /// Returns the raw integer.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the id `offset` positions after this one, if representable.
    #[must_use]
    pub fn checked_add(self, offset: u64) -> Option<Self> {
        self.0.checked_add(offset).map(Self)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TokenId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

// =============================================================================
// CLUSTER C: ACCESS CONTROL
// =============================================================================

/// A 32-byte role identifier, derived as `keccak256(name)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct RoleId(pub [u8; 32]);

impl RoleId {
    /// The all-zero role. Used as the default admin role.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Derives a role id from its name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let digest = Keccak256::digest(name.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = hex::encode(self.0);
        write!(f, "0x{}...", &encoded[..8])
    }
}
