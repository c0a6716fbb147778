//! Seller identity, profile, and block state.

use crate::error::MarketError;
use serde::{Deserialize, Serialize};
use souk_token::Address;
use std::collections::HashMap;

/// A registered seller's public record.
///
/// Name and profile are immutable after registration; the counters are
/// mutated by escrow outcomes and the reputation rules, and only ever grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    /// Display name.
    pub name: String,
    /// Profile URI.
    pub profile_uri: String,
    /// Number of confirmed (completed) sales.
    pub confirmed_purchases: u64,
    /// Number of canceled purchases.
    pub canceled_purchases: u64,
    /// Number of reported cancellations.
    pub reported_purchases: u64,
    /// Cumulative rating count.
    pub rating: u64,
}

impl Seller {
    fn new(name: String, profile_uri: String) -> Self {
        Self {
            name,
            profile_uri,
            confirmed_purchases: 0,
            canceled_purchases: 0,
            reported_purchases: 0,
            rating: 0,
        }
    }

    /// Record a confirmed sale.
    pub fn record_confirmed(&mut self) {
        self.confirmed_purchases = self.confirmed_purchases.saturating_add(1);
    }

    /// Record a canceled purchase.
    pub fn record_canceled(&mut self) {
        self.canceled_purchases = self.canceled_purchases.saturating_add(1);
    }

    /// Record a reported cancellation.
    pub fn record_reported(&mut self) {
        self.reported_purchases = self.reported_purchases.saturating_add(1);
    }
}

/// Contact details, visible only to buyers holding a paid purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerContact {
    /// Physical location.
    pub location: String,
    /// Phone number.
    pub phone: String,
}

/// Details of a blocked seller; exists only while the block is in force.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedSeller {
    /// The blocked seller.
    pub seller: Address,
    /// Free-text block reason.
    pub reason: String,
}

/// Seller registry state: profiles, contacts, and block records.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    sellers: HashMap<Address, Seller>,
    contacts: HashMap<Address, SellerContact>,
    blocked: HashMap<Address, BlockedSeller>,
}

impl Registry {
    /// Register a new seller with profile and contact data.
    ///
    /// # Errors
    ///
    /// `Validation` if any field is empty; `AlreadyRegistered` if the
    /// identity already has a seller record.
    pub fn register(
        &mut self,
        identity: &Address,
        name: &str,
        profile_uri: &str,
        location: &str,
        phone: &str,
    ) -> Result<(), MarketError> {
        if identity.is_null() {
            return Err(MarketError::validation("identity must not be empty"));
        }
        for (field, value) in [
            ("name", name),
            ("profile_uri", profile_uri),
            ("location", location),
            ("phone", phone),
        ] {
            if value.is_empty() {
                return Err(MarketError::validation(format!(
                    "{field} must not be empty"
                )));
            }
        }
        if self.sellers.contains_key(identity) {
            return Err(MarketError::AlreadyRegistered {
                seller: identity.clone(),
            });
        }

        self.sellers.insert(
            identity.clone(),
            Seller::new(name.to_string(), profile_uri.to_string()),
        );
        self.contacts.insert(
            identity.clone(),
            SellerContact {
                location: location.to_string(),
                phone: phone.to_string(),
            },
        );
        Ok(())
    }

    /// Set the block flag and record for a seller.
    ///
    /// # Errors
    ///
    /// `AlreadyBlocked` if the seller is already blocked.
    pub fn block(&mut self, identity: &Address, reason: &str) -> Result<(), MarketError> {
        if self.blocked.contains_key(identity) {
            return Err(MarketError::AlreadyBlocked {
                seller: identity.clone(),
            });
        }
        self.blocked.insert(
            identity.clone(),
            BlockedSeller {
                seller: identity.clone(),
                reason: reason.to_string(),
            },
        );
        Ok(())
    }

    /// Clear the block flag and record for a seller.
    ///
    /// # Errors
    ///
    /// `NotBlocked` if the seller is not blocked.
    pub fn unblock(&mut self, identity: &Address) -> Result<(), MarketError> {
        if self.blocked.remove(identity).is_none() {
            return Err(MarketError::NotBlocked {
                seller: identity.clone(),
            });
        }
        Ok(())
    }

    /// Whether the seller is currently blocked.
    #[must_use]
    pub fn is_blocked(&self, identity: &Address) -> bool {
        self.blocked.contains_key(identity)
    }

    /// Look up a seller record.
    #[must_use]
    pub fn seller(&self, identity: &Address) -> Option<&Seller> {
        self.sellers.get(identity)
    }

    /// Look up a seller record for mutation.
    pub fn seller_mut(&mut self, identity: &Address) -> Option<&mut Seller> {
        self.sellers.get_mut(identity)
    }

    /// Look up a seller's contact record.
    #[must_use]
    pub fn contact(&self, identity: &Address) -> Option<&SellerContact> {
        self.contacts.get(identity)
    }

    /// Look up the block record for a seller.
    ///
    /// # Errors
    ///
    /// `NotBlocked` if the seller is not blocked.
    pub fn blocked_detail(&self, identity: &Address) -> Result<&BlockedSeller, MarketError> {
        self.blocked
            .get(identity)
            .ok_or_else(|| MarketError::NotBlocked {
                seller: identity.clone(),
            })
    }
}
