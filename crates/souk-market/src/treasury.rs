//! Accrual of platform fees awaiting withdrawal.

use serde::{Deserialize, Serialize};
use souk_token::Amount;

/// Running total of uncollected platform fees.
///
/// Fees accrue from confirmed sales and cancellation penalties; the whole
/// total is drained by an administrative withdrawal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treasury {
    accrued: Amount,
}

impl Treasury {
    /// Add a fee to the running total.
    pub fn accrue(&mut self, amount: Amount) {
        self.accrued = self.accrued.saturating_add(amount);
    }

    /// The current uncollected total.
    #[must_use]
    pub const fn total(&self) -> Amount {
        self.accrued
    }

    /// Zero the running total, returning what was accrued.
    pub fn drain(&mut self) -> Amount {
        std::mem::take(&mut self.accrued)
    }
}
