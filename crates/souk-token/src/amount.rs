//! SOUK token amount representation.
//!
//! Amounts are stored as base units (1 SOUK = 10^6 units) internally for
//! precision, with convenient conversion to/from decimal SOUK.

use crate::UNITS_PER_SOUK;
use crate::error::{Result, TokenError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// An amount of SOUK tokens.
///
/// Internally stored as base units (1 SOUK = 10^6 units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount {
    units: u64,
}

impl Amount {
    /// Zero SOUK.
    pub const ZERO: Self = Self { units: 0 };

    /// Maximum amount (`u64::MAX` units).
    pub const MAX: Self = Self { units: u64::MAX };

    /// Create an amount from base units.
    #[must_use]
    pub const fn from_units(units: u64) -> Self {
        Self { units }
    }

    /// Create an amount from SOUK (decimal representation).
    ///
    /// # Panics
    ///
    /// Panics if the amount is negative.
    #[must_use]
    pub fn souk(amount: f64) -> Self {
        assert!(amount >= 0.0, "amount must be non-negative");
        let units = (amount * UNITS_PER_SOUK as f64).round() as u64;
        Self { units }
    }

    /// Try to create an amount from SOUK.
    ///
    /// # Errors
    ///
    /// Returns error if amount is negative.
    pub fn try_souk(amount: f64) -> Result<Self> {
        if amount < 0.0 {
            return Err(TokenError::InvalidAmount {
                message: "amount must be non-negative".to_string(),
            });
        }
        Ok(Self::souk(amount))
    }

    /// Get the amount in base units.
    #[must_use]
    pub const fn units(&self) -> u64 {
        self.units
    }

    /// Get the amount in SOUK (decimal).
    #[must_use]
    pub fn as_souk(&self) -> f64 {
        self.units as f64 / UNITS_PER_SOUK as f64
    }

    /// Check if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.units == 0
    }

    /// Floor-divided percentage of this amount: `units × pct ÷ 100`.
    ///
    /// Uses a u128 intermediate so the multiplication cannot overflow. The
    /// remainder of the division is discarded; it stays with whichever
    /// party is not receiving the percentage share. This is the exact
    /// settlement arithmetic of the marketplace, not an approximation.
    #[must_use]
    pub const fn floor_percent(&self, pct: u64) -> Self {
        let scaled = self.units as u128 * pct as u128 / 100;
        if scaled > u64::MAX as u128 {
            Self::MAX
        } else {
            Self {
                units: scaled as u64,
            }
        }
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(&self, other: Self) -> Self {
        Self {
            units: self.units.saturating_add(other.units),
        }
    }

    /// Saturating subtraction.
    #[must_use]
    pub const fn saturating_sub(&self, other: Self) -> Self {
        Self {
            units: self.units.saturating_sub(other.units),
        }
    }

    /// Checked addition.
    #[must_use]
    pub const fn checked_add(&self, other: Self) -> Option<Self> {
        match self.units.checked_add(other.units) {
            Some(units) => Some(Self { units }),
            None => None,
        }
    }

    /// Checked subtraction.
    #[must_use]
    pub const fn checked_sub(&self, other: Self) -> Option<Self> {
        match self.units.checked_sub(other.units) {
            Some(units) => Some(Self { units }),
            None => None,
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} SOUK", self.as_souk())
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            units: self.units + other.units,
        }
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            units: self.units - other.units,
        }
    }
}

impl From<u64> for Amount {
    fn from(units: u64) -> Self {
        Self::from_units(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_souk_to_units() {
        let amount = Amount::souk(1.0);
        assert_eq!(amount.units(), UNITS_PER_SOUK);
    }

    #[test]
    fn test_units_to_souk() {
        let amount = Amount::from_units(UNITS_PER_SOUK);
        assert!((amount.as_souk() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero() {
        assert!(Amount::ZERO.is_zero());
        assert_eq!(Amount::ZERO.units(), 0);
    }

    #[test]
    fn test_floor_percent_exact() {
        // 5% of 100 SOUK = 5 SOUK exactly
        let price = Amount::from_units(100_000_000);
        assert_eq!(price.floor_percent(5).units(), 5_000_000);
    }

    #[test]
    fn test_floor_percent_truncates() {
        // 5% of 99 units = 4.95, floored to 4
        let amount = Amount::from_units(99);
        assert_eq!(amount.floor_percent(5).units(), 4);
    }

    #[test]
    fn test_floor_percent_no_overflow() {
        // u64::MAX × 10 overflows u64 but not the u128 intermediate
        let amount = Amount::MAX;
        assert_eq!(amount.floor_percent(10).units(), u64::MAX / 10);
    }

    #[test]
    fn test_saturating_add() {
        let c = Amount::MAX.saturating_add(Amount::souk(1.0));
        assert_eq!(c, Amount::MAX);
    }

    #[test]
    fn test_saturating_sub() {
        let c = Amount::souk(1.0).saturating_sub(Amount::souk(2.0));
        assert!(c.is_zero());
    }

    #[test]
    fn test_display() {
        let amount = Amount::souk(1.5);
        let s = format!("{amount}");
        assert!(s.contains("1.5"));
        assert!(s.contains("SOUK"));
    }

    #[test]
    fn test_try_souk_negative() {
        assert!(Amount::try_souk(-1.0).is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(Amount::souk(1.0) < Amount::souk(2.0));
    }

    #[test]
    fn test_serialization() {
        let amount = Amount::souk(1.5);
        let json = serde_json::to_string(&amount).expect("serialize");
        let parsed: Amount = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(amount, parsed);
    }

    proptest! {
        #[test]
        fn prop_floor_percent_bounded(units in 0u64.., pct in 0u64..=100) {
            let share = Amount::from_units(units).floor_percent(pct);
            prop_assert!(share.units() <= units);
        }

        #[test]
        fn prop_floor_percent_remainder_conserved(units in 0u64.., pct in 0u64..=100) {
            let amount = Amount::from_units(units);
            let share = amount.floor_percent(pct);
            let rest = amount.saturating_sub(share);
            prop_assert_eq!(share.saturating_add(rest), amount);
        }
    }
}
