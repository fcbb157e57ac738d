//! # Domain Module
//!
//! Core domain types for the staking ledger.

pub mod config;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod registry;
pub mod state;
pub mod value_objects;
pub mod withdrawals;

pub use config::*;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use registry::VaultRegistry;
pub use state::LedgerState;
pub use value_objects::*;
pub use withdrawals::WithdrawalQueue;
