//! # Core Aliases
//!
//! Identity, amount and time aliases plus the fixed-point constants the
//! exchange-rate and fee arithmetic is built on.

// Re-export U256 from primitive-types for overflow-free intermediate products
pub use primitive_types::U256;

/// A 20-byte account address.
pub type Address = [u8; 20];

/// An FTM or liquid-token amount in wei (1e-18 units).
pub type Amount = u128;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Duration in seconds.
pub type DurationSecs = u64;

/// Consensus-layer validator identifier.
pub type ValidatorId = u64;

/// Position of a vault inside the registry.
pub type VaultSlot = u64;

/// Caller-supplied withdrawal request key.
pub type WithdrawalId = u64;

/// The all-zero address.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// One whole FTM in wei.
pub const ONE_FTM: Amount = 1_000_000_000_000_000_000;

/// Fixed-point scale of the exchange rate (1.0 == `RATE_PRECISION`).
pub const RATE_PRECISION: Amount = ONE_FTM;

/// Basis points in one whole (100%).
pub const BIPS_DENOMINATOR: u32 = 10_000;

/// Seconds in one day.
pub const ONE_DAY_SECS: DurationSecs = 86_400;

/// Render an address as `0x` plus its first four bytes, for log lines.
pub fn short_address(address: &Address) -> String {
    format!("0x{}..", hex::encode(&address[..4]))
}

/// Parse a `0x`-prefixed (or bare) 40 character hex string into an address.
pub fn parse_address(value: &str) -> Option<Address> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(digits).ok()?;
    bytes.try_into().ok()
}
