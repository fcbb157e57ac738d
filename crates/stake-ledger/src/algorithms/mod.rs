//! # Algorithms Module
//!
//! Pure computations behind the ledger operations.

pub mod exchange_rate;
pub mod penalty;
pub mod sourcing;

pub use exchange_rate::{exchange_rate, ftm_for_liquid, liquid_for_deposit};
pub use penalty::{LinearLockPenalty, NoPenalty};
pub use sourcing::{plan_shortfall, ShortfallPlan, VaultDrain};
