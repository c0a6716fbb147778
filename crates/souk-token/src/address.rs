//! Participant identities for the Souk ledger.
//!
//! Addresses are opaque labels: the marketplace never interprets them
//! beyond equality, hashing, and the null check.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque participant identity.
///
/// The empty string is the null identity; it is never a valid transfer
/// destination and the marketplace rejects it where the protocol requires.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// Create an address from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The null identity.
    #[must_use]
    pub const fn null() -> Self {
        Self(String::new())
    }

    /// Get the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this is the null identity.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Address {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_roundtrip() {
        let addr = Address::new("alice");
        assert_eq!(addr.as_str(), "alice");
        assert_eq!(format!("{addr}"), "alice");
    }

    #[test]
    fn test_null_address() {
        assert!(Address::null().is_null());
        assert!(!Address::new("bob").is_null());
    }

    #[test]
    fn test_address_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Address::new("alice"));
        set.insert(Address::new("bob"));
        set.insert(Address::new("alice")); // Duplicate
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_address_serialization() {
        let addr = Address::new("carol");
        let json = serde_json::to_string(&addr).expect("serialize");
        let parsed: Address = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(addr, parsed);
    }
}
