//! Per-(product, buyer) purchase records and the escrow state machine.
//!
//! Each pair moves through `Open → Paid → {Sold | Canceled}`; `Sold` is
//! terminal, `Canceled` may return to `Paid` through a repurchase. The
//! `canceled` and `reported` markers are one-way and survive repurchase —
//! they record history for the reputation rules, not current state.

use serde::{Deserialize, Serialize};
use souk_token::Address;

/// The observable state of a (product, buyer) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseStatus {
    /// No active purchase (never purchased, or record rolled back).
    Open,
    /// Paid into escrow, awaiting confirm or cancel.
    Paid,
    /// Confirmed sale. Terminal.
    Sold,
    /// Canceled; the pair may repurchase.
    Canceled,
}

impl PurchaseStatus {
    /// Checks if a transition to the target status is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: &Self) -> bool {
        use PurchaseStatus::{Canceled, Open, Paid, Sold};

        matches!(
            (self, target),
            (Open | Canceled, Paid) | (Paid, Sold) | (Paid, Canceled)
        )
    }
}

impl std::fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::Paid => write!(f, "Paid"),
            Self::Sold => write!(f, "Sold"),
            Self::Canceled => write!(f, "Canceled"),
        }
    }
}

/// A purchase record for one (product, buyer) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    /// The product.
    pub product_id: u64,
    /// The buyer.
    pub buyer: Address,
    /// Funds are currently held in escrow for this pair.
    pub paid: bool,
    /// The sale was confirmed. Never reverts to false.
    pub sold: bool,
    /// The pair canceled at least once. One-way.
    pub canceled: bool,
    /// A cancellation of this pair was reported. One-way.
    pub reported: bool,
}

impl Purchase {
    /// Create a fresh record for a first purchase attempt.
    #[must_use]
    pub const fn new(product_id: u64, buyer: Address) -> Self {
        Self {
            product_id,
            buyer,
            paid: false,
            sold: false,
            canceled: false,
            reported: false,
        }
    }

    /// Derive the pair's current status from its flags.
    #[must_use]
    pub const fn status(&self) -> PurchaseStatus {
        if self.sold {
            PurchaseStatus::Sold
        } else if self.paid {
            PurchaseStatus::Paid
        } else if self.canceled {
            PurchaseStatus::Canceled
        } else {
            PurchaseStatus::Open
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        use PurchaseStatus::{Canceled, Open, Paid, Sold};
        assert!(Open.can_transition_to(&Paid));
        assert!(Paid.can_transition_to(&Sold));
        assert!(Paid.can_transition_to(&Canceled));
        assert!(Canceled.can_transition_to(&Paid));
    }

    #[test]
    fn test_sold_is_terminal() {
        use PurchaseStatus::{Canceled, Paid, Sold};
        assert!(!Sold.can_transition_to(&Paid));
        assert!(!Sold.can_transition_to(&Canceled));
        assert!(!Sold.can_transition_to(&Sold));
    }

    #[test]
    fn test_invalid_transitions() {
        use PurchaseStatus::{Canceled, Open, Paid, Sold};
        assert!(!Open.can_transition_to(&Sold));
        assert!(!Open.can_transition_to(&Canceled));
        assert!(!Paid.can_transition_to(&Paid));
        assert!(!Canceled.can_transition_to(&Sold));
    }

    #[test]
    fn test_status_derivation() {
        let mut purchase = Purchase::new(1, Address::new("aya"));
        assert_eq!(purchase.status(), PurchaseStatus::Open);

        purchase.paid = true;
        assert_eq!(purchase.status(), PurchaseStatus::Paid);

        purchase.paid = false;
        purchase.canceled = true;
        assert_eq!(purchase.status(), PurchaseStatus::Canceled);

        // Repurchase after cancel: paid again, marker survives
        purchase.paid = true;
        assert_eq!(purchase.status(), PurchaseStatus::Paid);
        assert!(purchase.canceled);

        purchase.sold = true;
        assert_eq!(purchase.status(), PurchaseStatus::Sold);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(PurchaseStatus::Paid.to_string(), "Paid");
        assert_eq!(PurchaseStatus::Canceled.to_string(), "Canceled");
    }

    #[test]
    fn test_purchase_serialization() {
        let purchase = Purchase::new(4, Address::new("aya"));
        let json = serde_json::to_string(&purchase).expect("serialize");
        let parsed: Purchase = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(purchase, parsed);
    }
}
