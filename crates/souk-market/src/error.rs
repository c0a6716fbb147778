//! Error types for souk-market.
//!
//! One variant per distinguishable failure cause. Every error is terminal
//! for the invocation that produced it: the operation commits nothing and
//! the caller must re-issue the call.

use souk_token::Address;
use thiserror::Error;

/// Errors that can occur in marketplace operations.
#[derive(Debug, Error)]
pub enum MarketError {
    // --- Validation -------------------------------------------------------
    /// A required field is empty or a numeric field is zero.
    #[error("invalid input: {message}")]
    Validation {
        /// Description of the violated requirement.
        message: String,
    },

    // --- Authorization ----------------------------------------------------
    /// Caller lacks the administrative capability.
    #[error("unauthorized: {caller} is not the owner")]
    Unauthorized {
        /// The rejected caller.
        caller: Address,
    },

    /// Seller has no registry entry.
    #[error("seller not registered: {seller}")]
    NotRegistered {
        /// The unknown seller.
        seller: Address,
    },

    /// Seller is blocked.
    #[error("seller blocked: {seller}")]
    SellerBlocked {
        /// The blocked seller.
        seller: Address,
    },

    // --- State conflicts --------------------------------------------------
    /// Identity already has a seller record.
    #[error("seller already registered: {seller}")]
    AlreadyRegistered {
        /// The conflicting identity.
        seller: Address,
    },

    /// Seller is already blocked.
    #[error("seller already blocked: {seller}")]
    AlreadyBlocked {
        /// The seller.
        seller: Address,
    },

    /// Seller is not blocked.
    #[error("seller not blocked: {seller}")]
    NotBlocked {
        /// The seller.
        seller: Address,
    },

    /// Product id is 0 or beyond the current count.
    #[error("product not found: {id}")]
    ProductNotFound {
        /// The unknown product id.
        id: u64,
    },

    /// Product has no remaining inventory.
    #[error("product out of stock: {id}")]
    OutOfStock {
        /// The product id.
        id: u64,
    },

    /// A seller may not purchase their own product.
    #[error("seller cannot purchase own product")]
    SelfPurchase,

    /// The (product, buyer) pair already has an active paid purchase.
    #[error("purchase already paid")]
    AlreadyPaid,

    /// The (product, buyer) pair has no active paid purchase.
    #[error("purchase not paid")]
    NotPaid,

    /// The purchase was already confirmed.
    #[error("purchase already confirmed")]
    AlreadyConfirmed,

    /// The purchase was already confirmed; it can no longer be canceled.
    #[error("purchase already sold")]
    AlreadySold,

    /// The (product, buyer) pair was never canceled.
    #[error("purchase not canceled")]
    NotCanceled,

    /// The cancellation was already reported.
    #[error("cancellation already reported")]
    AlreadyReported,

    /// Seller has no confirmed purchases to rate against.
    #[error("seller has no confirmed purchases: {seller}")]
    NoConfirmedPurchases {
        /// The seller.
        seller: Address,
    },

    /// Seller's rating already equals their confirmed purchase count.
    #[error("rating slots exhausted for seller: {seller}")]
    RatingExceeded {
        /// The seller.
        seller: Address,
    },

    /// Fee withdrawal destination is the null identity.
    #[error("invalid withdrawal destination")]
    InvalidDestination,

    // --- Dependency failures ----------------------------------------------
    /// The value transfer reported failure.
    #[error("token transfer failed")]
    TransferFailed,

    /// The cancellation refund to the buyer reported failure.
    #[error("refund transfer failed")]
    RefundTransferFailed,

    /// The cancellation penalty transfer to the seller reported failure.
    #[error("penalty transfer failed")]
    PenaltyTransferFailed,

    /// The fee withdrawal transfer reported failure.
    #[error("fee transfer failed")]
    FeeTransferFailed,
}

impl MarketError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = MarketError::validation("name must not be empty");
        assert!(err.to_string().contains("name must not be empty"));
    }

    #[test]
    fn test_unauthorized_display() {
        let err = MarketError::Unauthorized {
            caller: Address::new("mallory"),
        };
        assert!(err.to_string().contains("mallory"));
    }

    #[test]
    fn test_product_not_found_display() {
        let err = MarketError::ProductNotFound { id: 7 };
        assert!(err.to_string().contains('7'));
    }
}
