//! # Shared Types Crate
//!
//! Primitive aliases and arithmetic helpers used across the staking workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: amounts, timestamps and identities are defined
//!   once here so the ledger and the unlocker never disagree on widths.
//! - **Wei precision**: every FTM amount is an integer count of 1e-18 FTM.
//! - **No silent overflow**: helpers return `Option` and callers map `None`
//!   onto their own error type.

pub mod entities;
pub mod math;

pub use entities::*;
pub use math::*;
