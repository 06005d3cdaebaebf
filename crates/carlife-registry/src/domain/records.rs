//! # Record Store
//!
//! Dense, append-and-update-only table of vehicle records. The record with
//! id `i` lives at index `i`; nothing is ever removed.

use crate::domain::entities::{NewVehicle, VehicleRecord};
use crate::errors::RegistryError;
use shared_types::entities::{Timestamp, TokenId};

/// In-memory record table.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<VehicleRecord>,
}

impl RecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records ever minted.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.records.len() as u64
    }

    /// Id the next append will receive.
    #[must_use]
    pub fn next_id(&self) -> TokenId {
        TokenId(self.total_count())
    }

    /// True iff `0 <= id < total_count`.
    #[must_use]
    pub fn contains(&self, id: TokenId) -> bool {
        id.value() < self.total_count()
    }

    /// All records in id order.
    #[must_use]
    pub fn as_slice(&self) -> &[VehicleRecord] {
        &self.records
    }

    /// Looks up a record.
    pub fn get(&self, id: TokenId) -> Result<&VehicleRecord, RegistryError> {
        usize::try_from(id.value())
            .ok()
            .and_then(|index| self.records.get(index))
            .ok_or(RegistryError::RecordNotFound(id))
    }

    fn get_mut(&mut self, id: TokenId) -> Result<&mut VehicleRecord, RegistryError> {
        usize::try_from(id.value())
            .ok()
            .and_then(|index| self.records.get_mut(index))
            .ok_or(RegistryError::RecordNotFound(id))
    }

    /// Appends the record for `vehicle` under the next id and returns it.
    pub fn append(&mut self, vehicle: &NewVehicle, now: Timestamp) -> TokenId {
        let id = self.next_id();
        self.records.push(VehicleRecord::from_mint(id, vehicle, now));
        id
    }

    /// Overwrites mileage and condition. `last_service_date` is untouched.
    pub fn update_info(
        &mut self,
        id: TokenId,
        mileage: u64,
        condition: String,
    ) -> Result<&VehicleRecord, RegistryError> {
        let record = self.get_mut(id)?;
        record.mileage = mileage;
        record.condition = condition;
        Ok(record)
    }

    /// Overwrites mileage and stamps the service date.
    pub fn record_maintenance(
        &mut self,
        id: TokenId,
        mileage: u64,
        now: Timestamp,
    ) -> Result<&VehicleRecord, RegistryError> {
        let record = self.get_mut(id)?;
        record.mileage = mileage;
        record.last_service_date = now;
        Ok(record)
    }

    /// Returns records `[start, start + count)`, all or nothing.
    ///
    /// `count` above `max` fails with `BatchTooLarge` before anything else is
    /// looked at. Any id outside the table fails the whole call with
    /// `RecordNotFound` naming the first missing id. `count == 0` yields an
    /// empty batch.
    pub fn batch(
        &self,
        start: TokenId,
        count: u64,
        max: u64,
    ) -> Result<&[VehicleRecord], RegistryError> {
        if count > max {
            return Err(RegistryError::BatchTooLarge {
                requested: count,
                max,
            });
        }
        if count == 0 {
            return Ok(&[]);
        }

        let total = self.total_count();
        if start.value() >= total {
            return Err(RegistryError::RecordNotFound(start));
        }
        if count > total - start.value() {
            return Err(RegistryError::RecordNotFound(TokenId(total)));
        }

        // Both bounds are within `records.len()` here
        let first = start.value() as usize;
        Ok(&self.records[first..first + count as usize])
    }
}
