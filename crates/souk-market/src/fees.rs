//! Fee and penalty arithmetic.
//!
//! # Precision Guarantees
//!
//! All splits use **integer floor division** over token base units:
//!
//! - A percentage share is `value × pct ÷ 100`, floored.
//! - The division remainder is never redistributed: it stays with
//!   whichever party is *not* receiving the fee/penalty share. This is
//!   the exact, intentional settlement semantics, not an approximation.
//! - Every split conserves value: the parts always sum to the input.

use serde::{Deserialize, Serialize};
use souk_token::Amount;

/// Platform fee on a confirmed sale, percent.
pub const PLATFORM_FEE_PERCENT: u64 = 5;

/// Penalty forfeited by a canceling buyer, percent of price.
pub const CANCEL_PENALTY_PERCENT: u64 = 10;

/// Platform share of the cancellation penalty, percent of the penalty.
pub const PENALTY_FEE_PERCENT: u64 = 3;

/// How a confirmed sale's price divides between seller and platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleSplit {
    /// Platform fee, accrued to the treasury.
    pub fee: Amount,
    /// Seller payout.
    pub payout: Amount,
}

/// How a canceled purchase's price divides between buyer, seller, and
/// platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelSplit {
    /// Refund returned to the buyer.
    pub refund: Amount,
    /// Penalty share transferred to the seller.
    pub penalty_to_seller: Amount,
    /// Penalty share accrued to the treasury.
    pub fee_on_penalty: Amount,
}

/// Split a confirmed sale: `fee = floor(price × 5 / 100)`, the rest to
/// the seller.
#[must_use]
pub const fn sale_split(price: Amount) -> SaleSplit {
    let fee = price.floor_percent(PLATFORM_FEE_PERCENT);
    SaleSplit {
        fee,
        payout: price.saturating_sub(fee),
    }
}

/// Split a cancellation: `penalty = floor(price × 10 / 100)` is forfeited
/// by the buyer, and `floor(penalty × 3 / 100)` of it goes to the
/// platform, the rest of the penalty to the seller.
#[must_use]
pub const fn cancel_split(price: Amount) -> CancelSplit {
    let penalty = price.floor_percent(CANCEL_PENALTY_PERCENT);
    let fee_on_penalty = penalty.floor_percent(PENALTY_FEE_PERCENT);
    CancelSplit {
        refund: price.saturating_sub(penalty),
        penalty_to_seller: penalty.saturating_sub(fee_on_penalty),
        fee_on_penalty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sale_split_round_figures() {
        // price = 100 SOUK in 6-decimal base units
        let split = sale_split(Amount::from_units(100_000_000));
        assert_eq!(split.fee.units(), 5_000_000);
        assert_eq!(split.payout.units(), 95_000_000);
    }

    #[test]
    fn test_cancel_split_round_figures() {
        let split = cancel_split(Amount::from_units(100_000_000));
        assert_eq!(split.refund.units(), 90_000_000);
        assert_eq!(split.penalty_to_seller.units(), 9_700_000);
        assert_eq!(split.fee_on_penalty.units(), 300_000);
    }

    #[test]
    fn test_sale_split_floors_toward_seller() {
        // 5% of 99 = 4.95 -> fee 4, remainder stays with the seller
        let split = sale_split(Amount::from_units(99));
        assert_eq!(split.fee.units(), 4);
        assert_eq!(split.payout.units(), 95);
    }

    #[test]
    fn test_cancel_split_floors() {
        // penalty = floor(99 * 10 / 100) = 9; fee = floor(9 * 3 / 100) = 0
        let split = cancel_split(Amount::from_units(99));
        assert_eq!(split.refund.units(), 90);
        assert_eq!(split.penalty_to_seller.units(), 9);
        assert_eq!(split.fee_on_penalty.units(), 0);
    }

    #[test]
    fn test_tiny_price_all_to_buyer() {
        // penalty floors to zero below 10 units
        let split = cancel_split(Amount::from_units(9));
        assert_eq!(split.refund.units(), 9);
        assert!(split.penalty_to_seller.is_zero());
        assert!(split.fee_on_penalty.is_zero());
    }

    proptest! {
        #[test]
        fn prop_sale_split_conserves_price(units in 0u64..) {
            let price = Amount::from_units(units);
            let split = sale_split(price);
            prop_assert_eq!(split.fee.saturating_add(split.payout), price);
        }

        #[test]
        fn prop_cancel_split_conserves_price(units in 0u64..) {
            let price = Amount::from_units(units);
            let split = cancel_split(price);
            let total = split
                .refund
                .saturating_add(split.penalty_to_seller)
                .saturating_add(split.fee_on_penalty);
            prop_assert_eq!(total, price);
        }

        #[test]
        fn prop_fee_never_exceeds_penalty(units in 0u64..) {
            let split = cancel_split(Amount::from_units(units));
            prop_assert!(split.fee_on_penalty <= split.refund.saturating_add(split.penalty_to_seller).saturating_add(split.fee_on_penalty));
            prop_assert!(split.fee_on_penalty.units() <= units / 10);
        }
    }
}
