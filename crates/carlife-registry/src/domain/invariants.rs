//! # Domain Invariants
//!
//! Properties that must hold across every committed call. The service
//! asserts them in debug builds; tests use them directly.
//!
//! - Ids are dense: the record at index `i` has id `i`.
//! - `total_count` never decreases.
//! - `id`, `vin`, `make`, `model` and `year` never change after mint.
//! - `last_service_date` never moves backwards.

use crate::domain::entities::VehicleRecord;
use shared_types::entities::{Timestamp, TokenId};

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Every record sits at the index equal to its id.
#[must_use]
pub fn check_dense_ids(records: &[VehicleRecord]) -> bool {
    records
        .iter()
        .enumerate()
        .all(|(index, record)| record.id == TokenId(index as u64))
}

/// The record count is monotonically non-decreasing.
#[must_use]
pub fn check_count_monotonic(before: u64, after: u64) -> bool {
    after >= before
}

/// Fields fixed at mint are unchanged between two snapshots of a record.
#[must_use]
pub fn check_identity_fields_unchanged(before: &VehicleRecord, after: &VehicleRecord) -> bool {
    before.id == after.id
        && before.vin == after.vin
        && before.make == after.make
        && before.model == after.model
        && before.year == after.year
}

/// A service date only moves forward.
#[must_use]
pub fn check_service_date_not_regressed(before: Timestamp, after: Timestamp) -> bool {
    after >= before
}
