//! # Driving Ports (API - Inbound)
//!
//! The lifecycle and read surface every deployment exposes, independent of
//! the chosen authorization strategy. Strategy-specific administration
//! (allow-list, role graph, admin handover) lives on the service itself.

use crate::domain::entities::{NewVehicle, RecordView};
use crate::errors::RegistryError;
use async_trait::async_trait;
use shared_types::entities::{AccountId, TokenId};

/// Primary API of the vehicle registry.
///
/// Every mutating call names its `caller`; each call is atomic and a
/// failure leaves no state change and no notification behind.
#[async_trait]
pub trait VehicleRegistryApi: Send + Sync {
    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Registers a vehicle and mints its identity token to
    /// `vehicle.recipient`.
    ///
    /// # Errors
    ///
    /// - `MintingPaused` while minting is paused (checked before the caller)
    /// - `OperationPaused` while globally paused in strict mode
    /// - `Unauthorized` if the caller may not mint
    /// - `Ledger(InvalidReceiver)` when minting to the zero account
    async fn mint(&self, caller: AccountId, vehicle: NewVehicle) -> Result<TokenId, RegistryError>;

    /// Overwrites mileage and condition of an existing record.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, then `RecordNotFound`; `OperationPaused` in strict mode.
    async fn update_info(
        &self,
        caller: AccountId,
        token_id: TokenId,
        mileage: u64,
        condition: String,
    ) -> Result<(), RegistryError>;

    /// Records a maintenance visit: new mileage, service date set to now.
    /// `notes` are published, not stored.
    ///
    /// # Errors
    ///
    /// Same as [`Self::update_info`].
    async fn add_maintenance(
        &self,
        caller: AccountId,
        token_id: TokenId,
        mileage: u64,
        notes: String,
    ) -> Result<(), RegistryError>;

    // =========================================================================
    // READS
    // =========================================================================

    /// Returns a record with its current holder.
    async fn get_record(&self, token_id: TokenId) -> Result<RecordView, RegistryError>;

    /// Returns records `[start, start + count)`, failing the whole call on
    /// any missing id.
    async fn get_record_batch(
        &self,
        start: TokenId,
        count: u64,
    ) -> Result<Vec<RecordView>, RegistryError>;

    /// Number of records ever minted.
    async fn total_count(&self) -> u64;

    /// Metadata URI recorded at mint, empty when none was given.
    async fn token_uri(&self, token_id: TokenId) -> Result<String, RegistryError>;

    /// Collection name.
    fn name(&self) -> &str;

    /// Collection symbol.
    fn symbol(&self) -> &str;

    /// Largest `count` accepted by [`Self::get_record_batch`].
    fn max_batch_size(&self) -> u64;

    // =========================================================================
    // PAUSE CONTROL
    // =========================================================================

    /// Sets the global pause. Admin only; idempotent.
    async fn set_paused(&self, caller: AccountId, paused: bool) -> Result<(), RegistryError>;

    /// Sets the minting pause. Admin only; idempotent.
    async fn set_minting_paused(&self, caller: AccountId, paused: bool)
        -> Result<(), RegistryError>;

    /// Global pause.
    async fn is_paused(&self) -> bool;

    /// Minting pause.
    async fn is_minting_paused(&self) -> bool;

    // =========================================================================
    // IDENTITY TRANSFER
    // =========================================================================

    /// Moves the identity token; the ledger consults the pause controller
    /// before committing.
    ///
    /// # Errors
    ///
    /// `OperationPaused` while globally paused, `RecordNotFound` for unknown
    /// ids, otherwise the ledger's own rejection.
    async fn transfer(
        &self,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        token_id: TokenId,
    ) -> Result<(), RegistryError>;
}
