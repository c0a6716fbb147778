//! The marketplace's whole mutable state, cloned per transaction.

use crate::catalog::Catalog;
use crate::escrow::Purchase;
use crate::registry::Registry;
use crate::treasury::Treasury;
use souk_token::Address;
use std::collections::HashMap;

/// All marketplace state behind the transaction boundary.
///
/// `Clone` is load-bearing: each mutating operation works on a clone and
/// swaps it back in only on commit, so a failed operation leaves the
/// original untouched.
#[derive(Debug, Default, Clone)]
pub struct MarketState {
    /// Seller profiles, contacts, and block records.
    pub registry: Registry,
    /// Product listings.
    pub catalog: Catalog,
    /// Purchase records, keyed by (product id, buyer).
    pub purchases: HashMap<(u64, Address), Purchase>,
    /// Uncollected platform fees.
    pub treasury: Treasury,
}
