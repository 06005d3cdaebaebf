//! # Shared Types Crate
//!
//! Identity primitives used across the CarLife workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: account, token and role identities are
//!   defined once here and reused by the registry core and the bus.
//! - **Value Semantics**: every type is `Copy` and compared by value.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
