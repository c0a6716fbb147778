//! In-memory SOUK token ledger.
//!
//! An ERC20-style ledger with balances and allowances. Every transfer
//! reports success or failure as a single boolean — callers never see why
//! a movement was refused, only that it was, which matches the surface the
//! marketplace is written against. The reason is logged at debug level.
//!
//! The ledger also exposes a checkpoint seam ([`TokenLedger::snapshot`] /
//! [`TokenLedger::restore`]) so a transactional caller can undo all token
//! movements of an aborted operation, and a fault-injection switch
//! ([`TokenLedger::set_fail_transfers`]) for exercising dependency-failure
//! paths in tests.

use crate::address::Address;
use crate::amount::Amount;
use crate::error::{Result, TokenError};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{debug, info};

/// Ledger state: who holds what, and who may spend on whose behalf.
#[derive(Debug, Default, Clone)]
struct LedgerState {
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
    fail_transfers: bool,
}

/// A point-in-time copy of the ledger state.
///
/// Produced by [`TokenLedger::snapshot`] and consumed by
/// [`TokenLedger::restore`]. Opaque to callers.
#[derive(Debug, Clone)]
pub struct LedgerSnapshot(LedgerState);

/// In-memory ERC20-style token ledger.
#[derive(Debug, Default)]
pub struct TokenLedger {
    state: Mutex<LedgerState>,
}

impl TokenLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint tokens into an account (test/ops faucet).
    pub fn mint(&self, to: &Address, amount: Amount) {
        let mut state = self.state.lock();
        let balance = state.balances.entry(to.clone()).or_default();
        *balance = balance.saturating_add(amount);

        info!(to = %to, amount = %amount, "mint completed");
    }

    /// Get the balance of an address.
    #[must_use]
    pub fn balance_of(&self, who: &Address) -> Amount {
        let state = self.state.lock();
        state.balances.get(who).copied().unwrap_or(Amount::ZERO)
    }

    /// Set the allowance `spender` may pull from `owner`.
    ///
    /// Returns `true`; the operation cannot fail.
    pub fn approve(&self, owner: &Address, spender: &Address, amount: Amount) -> bool {
        let mut state = self.state.lock();
        state
            .allowances
            .insert((owner.clone(), spender.clone()), amount);

        debug!(owner = %owner, spender = %spender, amount = %amount, "allowance set");
        true
    }

    /// Get the remaining allowance `spender` may pull from `owner`.
    #[must_use]
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        let state = self.state.lock();
        state
            .allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Transfer tokens from one account to another.
    ///
    /// Returns `false` without moving funds if the sender's balance is
    /// insufficient. A zero-amount transfer succeeds.
    pub fn transfer(&self, from: &Address, to: &Address, amount: Amount) -> bool {
        let mut state = self.state.lock();
        match Self::try_move(&mut state, from, to, amount) {
            Ok(()) => {
                debug!(from = %from, to = %to, amount = %amount, "transfer completed");
                true
            }
            Err(err) => {
                debug!(from = %from, to = %to, amount = %amount, error = %err, "transfer refused");
                false
            }
        }
    }

    /// Transfer tokens on behalf of `from`, debiting `spender`'s allowance.
    ///
    /// Returns `false` without moving funds if the allowance or balance is
    /// insufficient.
    pub fn transfer_from(
        &self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> bool {
        let mut state = self.state.lock();

        let key = (from.clone(), spender.clone());
        let allowed = state.allowances.get(&key).copied().unwrap_or(Amount::ZERO);
        if allowed < amount {
            debug!(
                spender = %spender,
                from = %from,
                allowed = %allowed,
                amount = %amount,
                error = %TokenError::InsufficientAllowance {
                    have: allowed.units(),
                    need: amount.units(),
                },
                "transfer_from refused"
            );
            return false;
        }

        match Self::try_move(&mut state, from, to, amount) {
            Ok(()) => {
                if let Some(allowance) = state.allowances.get_mut(&key) {
                    *allowance = allowance.saturating_sub(amount);
                }
                debug!(spender = %spender, from = %from, to = %to, amount = %amount, "transfer_from completed");
                true
            }
            Err(err) => {
                debug!(spender = %spender, from = %from, to = %to, amount = %amount, error = %err, "transfer_from refused");
                false
            }
        }
    }

    /// Take a checkpoint of the full ledger state.
    ///
    /// The checkpoint covers the whole ledger: [`TokenLedger::restore`]
    /// rewinds *every* account, not just those the caller touched. The
    /// snapshot/restore window therefore assumes a single writer — no
    /// other party may move funds between the two calls, or its movements
    /// are erased by the restore. The marketplace honors this by holding
    /// its own state lock for the full window.
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot(self.state.lock().clone())
    }

    /// Restore the ledger to a previously taken checkpoint.
    ///
    /// See [`TokenLedger::snapshot`] for the single-writer requirement.
    pub fn restore(&self, snapshot: LedgerSnapshot) {
        *self.state.lock() = snapshot.0;
        debug!("ledger restored to checkpoint");
    }

    /// Make every subsequent transfer report failure (fault injection).
    pub fn set_fail_transfers(&self, fail: bool) {
        self.state.lock().fail_transfers = fail;
    }

    /// Move funds between accounts, checking the failure switch and balance.
    fn try_move(
        state: &mut LedgerState,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<()> {
        if state.fail_transfers {
            return Err(TokenError::TransfersDisabled);
        }

        let have = state.balances.get(from).copied().unwrap_or(Amount::ZERO);
        if have < amount {
            return Err(TokenError::InsufficientBalance {
                have: have.units(),
                need: amount.units(),
            });
        }

        if let Some(balance) = state.balances.get_mut(from) {
            *balance = balance.saturating_sub(amount);
        }
        let recipient = state.balances.entry(to.clone()).or_default();
        *recipient = recipient.saturating_add(amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn funded(name: &str, amount: Amount) -> (TokenLedger, Address) {
        let ledger = TokenLedger::new();
        let addr = Address::new(name);
        ledger.mint(&addr, amount);
        (ledger, addr)
    }

    #[test]
    fn test_balance_zero_for_unknown() {
        let ledger = TokenLedger::new();
        assert!(ledger.balance_of(&Address::new("nobody")).is_zero());
    }

    #[test]
    fn test_mint_and_balance() {
        let (ledger, addr) = funded("alice", Amount::souk(100.0));
        assert_eq!(ledger.balance_of(&addr), Amount::souk(100.0));
    }

    #[test]
    fn test_transfer() {
        let (ledger, alice) = funded("alice", Amount::souk(100.0));
        let bob = Address::new("bob");

        assert!(ledger.transfer(&alice, &bob, Amount::souk(30.0)));
        assert_eq!(ledger.balance_of(&alice), Amount::souk(70.0));
        assert_eq!(ledger.balance_of(&bob), Amount::souk(30.0));
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let (ledger, alice) = funded("alice", Amount::souk(10.0));
        let bob = Address::new("bob");

        assert!(!ledger.transfer(&alice, &bob, Amount::souk(20.0)));
        // Nothing moved
        assert_eq!(ledger.balance_of(&alice), Amount::souk(10.0));
        assert!(ledger.balance_of(&bob).is_zero());
    }

    #[test]
    fn test_zero_transfer_succeeds() {
        let ledger = TokenLedger::new();
        let alice = Address::new("alice");
        let bob = Address::new("bob");
        assert!(ledger.transfer(&alice, &bob, Amount::ZERO));
    }

    #[test]
    fn test_transfer_from_requires_allowance() {
        let (ledger, alice) = funded("alice", Amount::souk(100.0));
        let market = Address::new("market");

        assert!(!ledger.transfer_from(&market, &alice, &market, Amount::souk(50.0)));

        assert!(ledger.approve(&alice, &market, Amount::souk(50.0)));
        assert!(ledger.transfer_from(&market, &alice, &market, Amount::souk(50.0)));
        assert_eq!(ledger.balance_of(&market), Amount::souk(50.0));
    }

    #[test]
    fn test_transfer_from_debits_allowance() {
        let (ledger, alice) = funded("alice", Amount::souk(100.0));
        let market = Address::new("market");
        ledger.approve(&alice, &market, Amount::souk(60.0));

        assert!(ledger.transfer_from(&market, &alice, &market, Amount::souk(40.0)));
        assert_eq!(ledger.allowance(&alice, &market), Amount::souk(20.0));

        // Remaining allowance too small for a second pull of 40
        assert!(!ledger.transfer_from(&market, &alice, &market, Amount::souk(40.0)));
    }

    #[test]
    fn test_transfer_from_insufficient_balance() {
        let (ledger, alice) = funded("alice", Amount::souk(10.0));
        let market = Address::new("market");
        ledger.approve(&alice, &market, Amount::souk(100.0));

        assert!(!ledger.transfer_from(&market, &alice, &market, Amount::souk(50.0)));
        // Allowance untouched on refusal
        assert_eq!(ledger.allowance(&alice, &market), Amount::souk(100.0));
    }

    #[test]
    fn test_snapshot_restore() {
        let (ledger, alice) = funded("alice", Amount::souk(100.0));
        let bob = Address::new("bob");

        let checkpoint = ledger.snapshot();
        assert!(ledger.transfer(&alice, &bob, Amount::souk(25.0)));
        assert_eq!(ledger.balance_of(&bob), Amount::souk(25.0));

        ledger.restore(checkpoint);
        assert_eq!(ledger.balance_of(&alice), Amount::souk(100.0));
        assert!(ledger.balance_of(&bob).is_zero());
    }

    #[test]
    fn test_fail_transfers_switch() {
        let (ledger, alice) = funded("alice", Amount::souk(100.0));
        let bob = Address::new("bob");

        ledger.set_fail_transfers(true);
        assert!(!ledger.transfer(&alice, &bob, Amount::souk(1.0)));

        ledger.set_fail_transfers(false);
        assert!(ledger.transfer(&alice, &bob, Amount::souk(1.0)));
    }
}
