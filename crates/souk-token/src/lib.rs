//! # souk-token
//!
//! Value-transfer ledger for the Souk marketplace.
//!
//! This crate provides:
//! - [`Address`] — opaque participant identity
//! - [`Amount`] — token amount with fixed-point precision
//! - [`TokenLedger`] — in-memory ERC20-style ledger (balances, allowances)
//!
//! ## Token Details
//!
//! - **Name**: SOUK
//! - **Decimals**: 6 (1 SOUK = `1_000_000` base units)
//! - **Use**: escrow payments on the Souk marketplace
//!
//! The ledger reports every transfer outcome as a single boolean; there are
//! no partial transfers and no distinguishing error codes on the wire. The
//! marketplace consumes exactly that surface.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod address;
pub mod amount;
pub mod error;
pub mod ledger;

pub use address::Address;
pub use amount::Amount;
pub use error::{Result, TokenError};
pub use ledger::{LedgerSnapshot, TokenLedger};

/// SOUK token decimals.
pub const SOUK_DECIMALS: u8 = 6;

/// One SOUK in base units.
pub const UNITS_PER_SOUK: u64 = 1_000_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(SOUK_DECIMALS, 6);
        assert_eq!(UNITS_PER_SOUK, 1_000_000);
    }
}
