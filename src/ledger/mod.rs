//! Ledger engine: split resolution, balance aggregation and debt simplification

pub mod balance;
pub mod core;
pub mod settlement;
pub mod split;

pub use balance::*;
pub use core::*;
pub use settlement::*;
pub use split::*;
