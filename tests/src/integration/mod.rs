//! # Integration Scenarios
//!
//! Each module drives a fully wired registry (in-memory ledger, manual clock,
//! broadcast bus) through one family of behaviors.

pub mod authorization;
pub mod events;
pub mod pause;
