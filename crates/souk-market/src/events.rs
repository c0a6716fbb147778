//! Marketplace notifications.
//!
//! Events are queued inside a transaction and published only when the
//! transaction commits; an aborted operation publishes nothing.

use serde::{Deserialize, Serialize};
use souk_token::{Address, Amount};

/// A structured notification emitted by a committed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A seller listed a new product.
    ProductCreated {
        /// Product id.
        id: u64,
        /// Product name.
        name: String,
        /// Product image URL.
        image_url: String,
        /// Listed price.
        price: Amount,
        /// Seller identity.
        seller: Address,
        /// Seller display name at listing time.
        seller_name: String,
        /// Initial inventory.
        inventory: u64,
    },

    /// A buyer paid for a product into escrow.
    ProductPurchased {
        /// Product id.
        id: u64,
        /// Product name.
        name: String,
        /// Price paid into escrow.
        price: Amount,
        /// Seller identity.
        seller: Address,
        /// Buyer identity.
        buyer: Address,
        /// Whether the purchase is paid (always true on emission).
        paid: bool,
    },

    /// A buyer confirmed receipt, releasing escrow to the seller.
    PaymentConfirmed {
        /// Product id.
        id: u64,
        /// Product name.
        name: String,
        /// Product price.
        price: Amount,
        /// Seller identity.
        seller: Address,
        /// Buyer identity.
        buyer: Address,
    },

    /// A new seller registered.
    SellerRegistered {
        /// Seller identity.
        seller: Address,
        /// Display name.
        name: String,
        /// Profile URI.
        profile_uri: String,
    },

    /// A seller received a rating.
    SellerRated {
        /// Seller identity.
        seller: Address,
        /// New cumulative rating.
        rating: u64,
    },

    /// A seller was blocked (manually or automatically).
    SellerBlocked {
        /// Seller identity.
        seller: Address,
        /// Block reason.
        reason: String,
    },

    /// A seller was unblocked.
    SellerUnblocked {
        /// Seller identity.
        seller: Address,
    },
}

impl Event {
    /// Short name of the event kind, for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ProductCreated { .. } => "ProductCreated",
            Self::ProductPurchased { .. } => "ProductPurchased",
            Self::PaymentConfirmed { .. } => "PaymentConfirmed",
            Self::SellerRegistered { .. } => "SellerRegistered",
            Self::SellerRated { .. } => "SellerRated",
            Self::SellerBlocked { .. } => "SellerBlocked",
            Self::SellerUnblocked { .. } => "SellerUnblocked",
        }
    }
}
