//! # CarLife Registry - Vehicle Records over an Identity-Token Ledger
//!
//! ## Purpose
//!
//! Keeps one record per registered vehicle and decides, for every mutating
//! call, whether it is permitted given the caller's authorization, the two
//! pause switches and the record's existence. Identity tokens (creation,
//! holders, transfers) belong to an external token ledger reached through
//! the [`ports::TokenLedger`] port.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Ids are dense, sequential from 0 | `domain/records.rs` - `RecordStore::append()` |
//! | A record exists iff `id < total_count` | `domain/records.rs` - `RecordStore::get()` |
//! | `total_count` never decreases | `domain/invariants.rs` - `check_count_monotonic()` |
//! | VIN, make, model, year fixed after mint | `domain/invariants.rs` - `check_identity_fields_unchanged()` |
//! | Rejected calls commit nothing | `service.rs` - one write lock per call |
//!
//! ## Operation Gates
//!
//! | Operation | Pause gate | Authorization |
//! |-----------|------------|---------------|
//! | `mint` | minting pause (+ global pause if strict) | `can_mint` |
//! | `update_info` | global pause if strict | `can_mutate` |
//! | `add_maintenance` | global pause if strict | `can_mutate` |
//! | `transfer` | global pause (via `TransferGate`) | token holder |
//! | `set_paused` / `set_minting_paused` | none | `can_administer` |
//!
//! ## Authorization Strategies
//!
//! | Strategy | Mint / mutate | Administer |
//! |----------|---------------|------------|
//! | `AllowListAuthorization` | admin or allow-listed | admin (two-step handover) |
//! | `RoleGraphAuthorization` | `PROVIDER_ROLE` or `DEFAULT_ADMIN_ROLE` | `DEFAULT_ADMIN_ROLE` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use carlife_registry::prelude::*;
//!
//! let t = create_test_service(admin);
//! let id = t.service.mint(admin, NewVehicle::new(alice, "V1", "Tesla", "Model S")).await?;
//! t.service.add_maintenance(admin, id, 61_000, "Oil change".into()).await?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{MaintenanceEntry, NewVehicle, RecordView, VehicleRecord};

    // Authorization
    pub use crate::domain::authorization::{
        provider_role, AllowListAuthorization, AuthorizationPolicy, Permission,
        RoleGraphAuthorization, DEFAULT_ADMIN_ROLE, PROVIDER_ROLE_NAME,
    };

    // Pause and records
    pub use crate::domain::pause::{PauseState, TransferGate};
    pub use crate::domain::records::RecordStore;

    // Invariants
    pub use crate::domain::invariants::{
        check_count_monotonic, check_dense_ids, check_identity_fields_unchanged,
        check_service_date_not_regressed,
    };

    // Ports
    pub use crate::ports::inbound::VehicleRegistryApi;
    pub use crate::ports::outbound::{Clock, SystemClock, TokenLedger};

    // Errors and configuration
    pub use crate::config::{ConfigError, RegistryConfig, DEFAULT_MAX_BATCH_SIZE};
    pub use crate::errors::{ErrorKind, LedgerError, RegistryError};

    // Adapters
    pub use crate::adapters::{
        InMemoryTokenLedger, JournalError, JournalGap, MaintenanceJournal, ManualClock,
    };

    // Service
    pub use crate::service::{
        create_role_test_service, create_test_service, create_test_service_with,
        RegistryService, ServiceStats, TestRegistry, TEST_CLOCK_START,
    };

    // Shared identifiers
    pub use shared_types::entities::{AccountId, RoleId, Timestamp, TokenId};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
