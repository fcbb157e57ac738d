//! In-memory native FTM transfers.

use crate::domain::{StakingError, StakingResult};
use crate::ports::NativeTransfer;
use parking_lot::Mutex;
use shared_types::{short_address, Address, Amount};
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Records every amount received per address.
#[derive(Default)]
pub struct InMemoryNativeTransfer {
    received: Mutex<HashMap<Address, Amount>>,
    rejecting: Mutex<HashSet<Address>>,
}

impl InMemoryNativeTransfer {
    /// No transfers yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total received by `address`.
    pub fn received(&self, address: &Address) -> Amount {
        self.received.lock().get(address).copied().unwrap_or(0)
    }

    /// Make transfers to `address` fail (testing).
    pub fn reject(&self, address: Address) {
        self.rejecting.lock().insert(address);
    }

    /// Accept transfers to `address` again.
    pub fn accept(&self, address: &Address) {
        self.rejecting.lock().remove(address);
    }
}

impl NativeTransfer for InMemoryNativeTransfer {
    fn send(&self, to: &Address, amount: Amount) -> StakingResult<()> {
        if self.rejecting.lock().contains(to) {
            return Err(StakingError::Transfer(format!(
                "{} rejected {amount}",
                short_address(to)
            )));
        }
        let mut received = self.received.lock();
        let balance = received.entry(*to).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(StakingError::ArithmeticOverflow)?;
        info!("[transfer] {} wei to {}", amount, short_address(to));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_accumulates() {
        let transfer = InMemoryNativeTransfer::new();
        transfer.send(&[1u8; 20], 5).unwrap();
        transfer.send(&[1u8; 20], 7).unwrap();
        assert_eq!(transfer.received(&[1u8; 20]), 12);
    }

    #[test]
    fn test_rejecting_recipient() {
        let transfer = InMemoryNativeTransfer::new();
        transfer.reject([2u8; 20]);
        assert!(matches!(
            transfer.send(&[2u8; 20], 1),
            Err(StakingError::Transfer(_))
        ));
        assert_eq!(transfer.received(&[2u8; 20]), 0);

        transfer.accept(&[2u8; 20]);
        assert!(transfer.send(&[2u8; 20], 1).is_ok());
    }
}
