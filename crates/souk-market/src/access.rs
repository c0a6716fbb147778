//! Single-owner authorization gate.
//!
//! The administrative capability is an explicit caller value checked
//! against the owner fixed at construction, never ambient identity.

use crate::error::MarketError;
use souk_token::Address;

/// Gate for administrative operations (block, unblock, fee withdrawal).
#[derive(Debug, Clone)]
pub struct AccessControl {
    owner: Address,
}

impl AccessControl {
    /// Create a gate with the given owner.
    #[must_use]
    pub const fn new(owner: Address) -> Self {
        Self { owner }
    }

    /// The designated owner.
    #[must_use]
    pub const fn owner(&self) -> &Address {
        &self.owner
    }

    /// Check that `caller` holds the administrative capability.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for any caller other than the owner.
    pub fn require_owner(&self, caller: &Address) -> Result<(), MarketError> {
        if *caller == self.owner {
            Ok(())
        } else {
            Err(MarketError::Unauthorized {
                caller: caller.clone(),
            })
        }
    }
}
