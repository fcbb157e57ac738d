//! Ledger configuration with environment overrides.

use super::errors::{StakingError, StakingResult};
use super::value_objects::{DepositBounds, PauseFlags};
use serde::{Deserialize, Serialize};
use shared_types::{
    parse_address, Address, Amount, DurationSecs, BIPS_DENOMINATOR, ONE_DAY_SECS, ZERO_ADDRESS,
};
use std::env;

/// Default withdrawal delay (one week).
pub const DEFAULT_WITHDRAWAL_DELAY_SECS: DurationSecs = 7 * ONE_DAY_SECS;

/// Default registry capacity.
pub const DEFAULT_MAX_VAULT_COUNT: u64 = 200;

/// Ledger configuration, persisted together with the ledger state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingConfig {
    /// Treasury role: capacity, ownership and administrative operations.
    pub treasury: Address,
    /// Role allowed to report consensus rewards.
    pub reward_reporter: Address,
    /// Protocol share of rewards in basis points.
    pub protocol_fee_bips: u32,
    /// Deposit limits.
    pub deposit_limits: DepositBounds,
    /// Delay between `undelegate` and `withdraw`.
    pub withdrawal_delay_secs: DurationSecs,
    /// Maximum number of occupied registry slots.
    pub max_vault_count: u64,
    /// Feature switches.
    pub pause_flags: PauseFlags,
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            treasury: ZERO_ADDRESS,
            reward_reporter: ZERO_ADDRESS,
            protocol_fee_bips: 0,
            deposit_limits: DepositBounds::default(),
            withdrawal_delay_secs: DEFAULT_WITHDRAWAL_DELAY_SECS,
            max_vault_count: DEFAULT_MAX_VAULT_COUNT,
            pause_flags: PauseFlags::default(),
        }
    }
}

impl StakingConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `LS_TREASURY`: treasury address, hex (default: zero address)
    /// - `LS_REWARD_REPORTER`: reward reporter address, hex (default: treasury)
    /// - `LS_PROTOCOL_FEE_BIPS`: protocol fee (default: 0)
    /// - `LS_MIN_DEPOSIT` / `LS_MAX_DEPOSIT`: deposit limits in wei (default: 1 / 1e9 FTM)
    /// - `LS_WITHDRAWAL_DELAY_SECS`: withdrawal delay (default: 604800)
    /// - `LS_MAX_VAULT_COUNT`: registry capacity (default: 200)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let treasury = env_address("LS_TREASURY").unwrap_or(defaults.treasury);

        Self {
            treasury,
            reward_reporter: env_address("LS_REWARD_REPORTER").unwrap_or(treasury),
            protocol_fee_bips: env_parse("LS_PROTOCOL_FEE_BIPS")
                .unwrap_or(defaults.protocol_fee_bips),
            deposit_limits: DepositBounds {
                min: env_parse::<Amount>("LS_MIN_DEPOSIT").unwrap_or(defaults.deposit_limits.min),
                max: env_parse::<Amount>("LS_MAX_DEPOSIT").unwrap_or(defaults.deposit_limits.max),
            },
            withdrawal_delay_secs: env_parse("LS_WITHDRAWAL_DELAY_SECS")
                .unwrap_or(defaults.withdrawal_delay_secs),
            max_vault_count: env_parse("LS_MAX_VAULT_COUNT").unwrap_or(defaults.max_vault_count),
            pause_flags: defaults.pause_flags,
        }
    }

    /// Builder-style treasury override.
    pub fn with_treasury(mut self, treasury: Address) -> Self {
        self.treasury = treasury;
        self
    }

    /// Builder-style reward reporter override.
    pub fn with_reward_reporter(mut self, reporter: Address) -> Self {
        self.reward_reporter = reporter;
        self
    }

    /// Reject configurations the ledger cannot operate under.
    pub fn validate(&self) -> StakingResult<()> {
        if self.protocol_fee_bips > BIPS_DENOMINATOR {
            return Err(StakingError::InvalidConfig(format!(
                "protocol fee {} bips exceeds {}",
                self.protocol_fee_bips, BIPS_DENOMINATOR
            )));
        }
        if self.deposit_limits.min > self.deposit_limits.max {
            return Err(StakingError::InvalidConfig(format!(
                "deposit min {} above max {}",
                self.deposit_limits.min, self.deposit_limits.max
            )));
        }
        if self.max_vault_count == 0 {
            return Err(StakingError::InvalidConfig(
                "max vault count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn env_address(key: &str) -> Option<Address> {
    env::var(key).ok().and_then(|v| parse_address(&v))
}
