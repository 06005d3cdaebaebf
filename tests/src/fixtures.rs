//! # Test Fixtures
//!
//! Well-known accounts and vehicle builders shared by the scenarios and
//! benchmarks.

use carlife_registry::prelude::*;
use rand::Rng;

/// Deployer / admin account.
pub const ADMIN: AccountId = AccountId::repeat_byte(0xAD);
/// First vehicle holder.
pub const ALICE: AccountId = AccountId::repeat_byte(0xA1);
/// Second vehicle holder.
pub const BOB: AccountId = AccountId::repeat_byte(0xB0);
/// Service provider (workshop) account.
pub const WORKSHOP: AccountId = AccountId::repeat_byte(0x57);
/// Account that is never granted anything.
pub const MALLORY: AccountId = AccountId::repeat_byte(0x66);

/// The reference vehicle: Tesla Model S, 50 000 km, good condition.
#[must_use]
pub fn model_s(recipient: AccountId) -> NewVehicle {
    NewVehicle::new(recipient, "V1", "Tesla", "Model S")
        .year(2020)
        .mileage(50_000)
        .condition("good")
}

/// A vehicle with a VIN derived from `n`.
#[must_use]
pub fn numbered_vehicle(recipient: AccountId, n: u64) -> NewVehicle {
    NewVehicle::new(recipient, format!("VIN{n:014}"), "Toyota", "Corolla")
        .year(2015)
        .mileage(n * 1_000)
        .condition("fair")
}

/// `n` distinct random non-zero accounts.
pub fn random_accounts(rng: &mut impl Rng, n: usize) -> Vec<AccountId> {
    let mut accounts = Vec::with_capacity(n);
    while accounts.len() < n {
        let account = AccountId::new(rng.gen());
        if !account.is_zero() && !accounts.contains(&account) {
            accounts.push(account);
        }
    }
    accounts
}

/// Mints `n` numbered vehicles to `recipient`, returning their ids.
pub async fn mint_many<R: VehicleRegistryApi + ?Sized>(
    registry: &R,
    caller: AccountId,
    recipient: AccountId,
    n: u64,
) -> Result<Vec<TokenId>, RegistryError> {
    let mut ids = Vec::new();
    for i in 0..n {
        ids.push(registry.mint(caller, numbered_vehicle(recipient, i)).await?);
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_accounts_distinct() {
        let mut rng = StdRng::seed_from_u64(7);
        let accounts = random_accounts(&mut rng, 64);
        let unique: std::collections::HashSet<_> = accounts.iter().collect();
        assert_eq!(unique.len(), 64);
    }

    #[test]
    fn test_numbered_vehicle_vin() {
        assert_eq!(numbered_vehicle(ALICE, 42).vin, "VIN00000000000042");
    }
}
