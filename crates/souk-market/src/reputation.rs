//! Reputation rules: rating slots and automatic suspension.

use crate::error::MarketError;
use crate::registry::Seller;
use souk_token::Address;

/// Reports at which a seller with zero confirmed sales is auto-blocked.
pub const AUTO_BLOCK_REPORT_THRESHOLD: u64 = 3;

/// Block reason recorded by the automatic suspension rule.
pub const AUTO_BLOCK_REASON: &str = "Multiple reports with no confirmed purchases";

/// Whether a seller's counters now trip the automatic suspension rule.
#[must_use]
pub const fn should_auto_block(seller: &Seller) -> bool {
    seller.reported_purchases >= AUTO_BLOCK_REPORT_THRESHOLD && seller.confirmed_purchases == 0
}

/// Check that a seller has a free rating slot.
///
/// One slot is consumed per confirmed purchase, shared across all raters,
/// so a seller's cumulative rating can never exceed their confirmed sales.
///
/// # Errors
///
/// `NoConfirmedPurchases` when the seller has no confirmed sales;
/// `RatingExceeded` when every slot is consumed.
pub fn check_rating_slot(identity: &Address, seller: &Seller) -> Result<(), MarketError> {
    if seller.confirmed_purchases == 0 {
        return Err(MarketError::NoConfirmedPurchases {
            seller: identity.clone(),
        });
    }
    if seller.rating >= seller.confirmed_purchases {
        return Err(MarketError::RatingExceeded {
            seller: identity.clone(),
        });
    }
    Ok(())
}
