//! # Liquid Staking Test Suite
//!
//! Cross-crate flows that drive the ledger and the unlocker together.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── mod.rs        # Protocol fixture wired to in-memory adapters
//! │   ├── scenarios.rs  # Deposit, lock, rewards, withdrawal flows
//! │   └── recovery.rs   # Emergency unlock sequences
//! └── benches/
//!     └── ledger_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p staking-tests
//! cargo test -p staking-tests integration::recovery
//! cargo bench -p staking-tests
//! ```

pub mod integration;
