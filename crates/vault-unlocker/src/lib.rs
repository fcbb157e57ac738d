//! # Vault Unlocker
//!
//! Emergency recovery agent for vaults stuck in a long consensus lock.
//!
//! ## Recovery Sequence
//!
//! ```text
//! treasury:  update_vault_owner(slot, unlocker)
//! operator:  unlock_vault(slot)      pays principal + penalty, gets principal back,
//!                                    vault handed back to the ledger
//! treasury:  harvest_vault(slot) -> withdraw_matured(index)
//! owner:     retrieve_ftm()          sweeps the remaining balance
//! ```
//!
//! The unlocker never touches ledger state directly; every step goes
//! through [`stake_ledger::LiquidStakingApi`]. Worth and exchange rate are
//! identical before and after the sequence.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod unlocker;

pub use unlocker::{UnlockReceipt, UnlockerRoles, VaultUnlocker};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
