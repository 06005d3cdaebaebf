//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions between the registry core and the outside world.
//!
//! - **Driving Ports (Inbound)**: `VehicleRegistryApi`
//! - **Driven Ports (Outbound)**: `TokenLedger`, `Clock`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
