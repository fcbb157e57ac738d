//! In-memory liquid token ledger.

use crate::domain::{StakingError, StakingResult};
use crate::ports::LiquidToken;
use parking_lot::RwLock;
use shared_types::{short_address, Address, Amount};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

#[derive(Default)]
struct TokenBook {
    balances: HashMap<Address, Amount>,
    total_supply: Amount,
}

/// Liquid token balances kept in memory.
#[derive(Default)]
pub struct InMemoryLiquidToken {
    book: RwLock<TokenBook>,
    fail_mints: AtomicBool,
}

impl InMemoryLiquidToken {
    /// Empty token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent mint fail (testing).
    pub fn set_fail_mints(&self, fail: bool) {
        self.fail_mints.store(fail, Ordering::SeqCst);
    }

    /// Move units between holders.
    pub fn transfer(&self, from: &Address, to: &Address, amount: Amount) -> StakingResult<()> {
        let mut book = self.book.write();
        let available = book.balances.get(from).copied().unwrap_or(0);
        if available < amount {
            return Err(StakingError::InsufficientLiquidBalance {
                required: amount,
                available,
            });
        }
        book.balances.insert(*from, available - amount);
        let credited = book.balances.entry(*to).or_insert(0);
        *credited = credited
            .checked_add(amount)
            .ok_or(StakingError::ArithmeticOverflow)?;
        Ok(())
    }
}

impl LiquidToken for InMemoryLiquidToken {
    fn mint(&self, to: &Address, amount: Amount) -> StakingResult<()> {
        if self.fail_mints.load(Ordering::SeqCst) {
            return Err(StakingError::Token("mint rejected".to_string()));
        }
        let mut book = self.book.write();
        let supply = book
            .total_supply
            .checked_add(amount)
            .ok_or(StakingError::ArithmeticOverflow)?;
        let balance = book.balances.entry(*to).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(StakingError::ArithmeticOverflow)?;
        book.total_supply = supply;
        debug!("[token] mint {} to {}", amount, short_address(to));
        Ok(())
    }

    fn burn(&self, from: &Address, amount: Amount) -> StakingResult<()> {
        let mut book = self.book.write();
        let available = book.balances.get(from).copied().unwrap_or(0);
        if available < amount {
            return Err(StakingError::InsufficientLiquidBalance {
                required: amount,
                available,
            });
        }
        book.balances.insert(*from, available - amount);
        book.total_supply = book.total_supply.saturating_sub(amount);
        debug!("[token] burn {} from {}", amount, short_address(from));
        Ok(())
    }

    fn balance_of(&self, holder: &Address) -> Amount {
        self.book.read().balances.get(holder).copied().unwrap_or(0)
    }

    fn total_supply(&self) -> Amount {
        self.book.read().total_supply
    }
}
