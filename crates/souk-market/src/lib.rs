//! # souk-market
//!
//! Escrow-based marketplace ledger for the Souk platform.
//!
//! Buyers pay into escrow when purchasing; funds are released to the
//! seller (minus a platform fee) on confirmation, or mostly refunded
//! (minus a cancellation penalty) on cancellation. A reputation layer
//! lets buyers rate sellers and report cancellations, automatically
//! suspending sellers who accumulate reports without a single confirmed
//! sale.
//!
//! The entry point is [`Marketplace`]; every mutating operation on it is
//! atomic — it either fully commits, including all token transfer legs,
//! or leaves no trace.
//!
//! ## Architecture
//!
//! - [`registry`] — seller profiles, contacts, and block state
//! - [`catalog`] — product listings and inventory
//! - [`escrow`] — per-(product, buyer) purchase records and their state
//!   machine
//! - [`fees`] — fee and penalty splits (floor division over base units)
//! - [`reputation`] — rating slots and the auto-suspension rule
//! - [`treasury`] — fee accrual awaiting administrative withdrawal
//! - [`access`] — the single-owner authorization gate
//! - [`market`] — the aggregate tying it all together transactionally

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod access;
pub mod catalog;
pub mod error;
pub mod escrow;
pub mod events;
pub mod fees;
pub mod market;
pub mod registry;
pub mod reputation;
pub mod state;
pub mod treasury;

pub use access::AccessControl;
pub use catalog::Product;
pub use error::MarketError;
pub use escrow::{Purchase, PurchaseStatus};
pub use events::Event;
pub use fees::{CancelSplit, SaleSplit, cancel_split, sale_split};
pub use market::Marketplace;
pub use registry::{BlockedSeller, Seller, SellerContact};
pub use treasury::Treasury;
