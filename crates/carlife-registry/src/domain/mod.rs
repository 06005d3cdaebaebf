//! # Domain Layer (Inner Hexagon)
//!
//! Pure registry rules: authorization strategies, pause switches, the record
//! table and its invariants. No I/O, no async.

pub mod authorization;
pub mod entities;
pub mod invariants;
pub mod pause;
pub mod records;

pub use authorization::*;
pub use entities::*;
pub use invariants::*;
pub use pause::*;
pub use records::*;
