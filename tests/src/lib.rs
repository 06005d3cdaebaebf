//! # CarLife Test Suite
//!
//! Cross-crate scenarios exercising the registry, the bus and telemetry
//! together.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Accounts, vehicles, bulk helpers
//! └── integration/
//!     ├── lifecycle.rs      # Mint / update / maintenance / reads
//!     ├── authorization.rs  # Allow-list and role-graph deployments
//!     ├── pause.rs          # Global and minting pause semantics
//!     └── events.rs         # Notification order, journal, streams
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p carlife-tests
//!
//! # By category
//! cargo test -p carlife-tests integration::pause::
//!
//! # Benchmarks
//! cargo bench -p carlife-tests
//! ```

pub mod fixtures;
pub mod integration;
