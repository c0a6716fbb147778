//! Error types for SOUK token operations.
//!
//! These never cross the ledger's public transfer surface — transfers
//! report a plain boolean — but they carry the reason into the debug log.

use thiserror::Error;

/// Result type alias for token operations.
pub type Result<T> = std::result::Result<T, TokenError>;

/// Errors that can occur inside the token ledger.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Insufficient balance for a transfer.
    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance {
        /// Current balance in base units.
        have: u64,
        /// Required balance in base units.
        need: u64,
    },

    /// Insufficient allowance for a delegated transfer.
    #[error("insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance {
        /// Current allowance in base units.
        have: u64,
        /// Required allowance in base units.
        need: u64,
    },

    /// Transfers are administratively disabled (fault injection).
    #[error("transfers disabled")]
    TransfersDisabled,

    /// Invalid amount.
    #[error("invalid amount: {message}")]
    InvalidAmount {
        /// Description of the amount error.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_balance_display() {
        let err = TokenError::InsufficientBalance { have: 5, need: 10 };
        assert!(err.to_string().contains('5'));
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn test_insufficient_allowance_display() {
        let err = TokenError::InsufficientAllowance { have: 0, need: 7 };
        assert!(err.to_string().contains("allowance"));
    }
}
