//! # Adapters Layer (Outer Hexagon)
//!
//! In-memory implementations of the driven ports, plus bus consumers.

pub mod clock;
pub mod maintenance_journal;
pub mod token_ledger;

pub use clock::*;
pub use maintenance_journal::*;
pub use token_ledger::*;
