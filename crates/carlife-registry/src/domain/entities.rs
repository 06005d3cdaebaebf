//! # Domain Entities
//!
//! Vehicle records and the inputs/outputs of the lifecycle operations.

use serde::{Deserialize, Serialize};
use shared_types::entities::{AccountId, Timestamp, TokenId};

// =============================================================================
// VEHICLE RECORD
// =============================================================================

/// The mutable data of one registered vehicle.
///
/// `id`, `vin`, `make`, `model` and `year` are fixed at mint. `mileage` and
/// `condition` are overwritten by updates; `last_service_date` changes only
/// through maintenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Sequential id, equal to the identity token id.
    pub id: TokenId,
    /// Vehicle identification number. Not required to be unique.
    pub vin: String,
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Model year.
    pub year: u16,
    /// Odometer reading.
    pub mileage: u64,
    /// Free-text condition.
    pub condition: String,
    /// Mint time, then the time of the latest maintenance.
    pub last_service_date: Timestamp,
}

impl VehicleRecord {
    /// Builds the record created by minting `vehicle` as `id` at `now`.
    #[must_use]
    pub fn from_mint(id: TokenId, vehicle: &NewVehicle, now: Timestamp) -> Self {
        Self {
            id,
            vin: vehicle.vin.clone(),
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year,
            mileage: vehicle.mileage,
            condition: vehicle.condition.clone(),
            last_service_date: now,
        }
    }
}

// =============================================================================
// MINT INPUT
// =============================================================================

/// Everything a caller supplies to mint a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVehicle {
    /// Initial holder of the identity token.
    pub recipient: AccountId,
    /// Vehicle identification number.
    pub vin: String,
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Model year (0 when unknown).
    pub year: u16,
    /// Odometer reading at registration.
    pub mileage: u64,
    /// Condition at registration.
    pub condition: String,
    /// Per-token metadata URI handed to the ledger.
    pub metadata_uri: Option<String>,
}

impl NewVehicle {
    /// Starts a mint request with the identity fields set.
    pub fn new(
        recipient: AccountId,
        vin: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            recipient,
            vin: vin.into(),
            make: make.into(),
            model: model.into(),
            year: 0,
            mileage: 0,
            condition: String::new(),
            metadata_uri: None,
        }
    }

    /// Sets the model year.
    #[must_use]
    pub fn year(mut self, year: u16) -> Self {
        self.year = year;
        self
    }

    /// Sets the odometer reading.
    #[must_use]
    pub fn mileage(mut self, mileage: u64) -> Self {
        self.mileage = mileage;
        self
    }

    /// Sets the condition text.
    #[must_use]
    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }

    /// Sets the metadata URI.
    #[must_use]
    pub fn metadata_uri(mut self, uri: impl Into<String>) -> Self {
        self.metadata_uri = Some(uri.into());
        self
    }
}

// =============================================================================
// QUERY RESULTS
// =============================================================================

/// A record together with the current identity-token holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordView {
    /// Stored record.
    pub record: VehicleRecord,
    /// Current holder, as reported by the token ledger.
    pub owner: AccountId,
}

/// One entry of a maintenance audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceEntry {
    /// Serviced record.
    pub token_id: TokenId,
    /// Mileage at service time.
    pub mileage: u64,
    /// Service notes.
    pub notes: String,
    /// Bus sequence number of the originating notification.
    pub sequence: u64,
}
