//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-memory implementations of the outbound ports, used by tests and by
//! embedders that run the ledger inside a single process.

mod clock;
mod consensus;
mod liquid_token;
mod selector;
mod state_store;
mod transfer;

pub use clock::ManualClock;
pub use consensus::InMemoryConsensus;
pub use liquid_token::InMemoryLiquidToken;
pub use selector::SingleSlotSelector;
pub use state_store::InMemoryStateStore;
pub use transfer::InMemoryNativeTransfer;
