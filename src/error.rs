//! Error types shared by the storage layer and the budget manager.

use thiserror::Error;

/// Errors raised by ledger operations.
///
/// `Validation` is always recoverable: nothing was written and the caller may
/// ask the user again. `Storage` means SQLite could not complete the request.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A user-supplied value broke a contract (amount, category, date, month).
    #[error("{0}")]
    Validation(String),

    /// The database could not complete the operation.
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A running total left the range `Decimal` can represent.
    #[error("Amount overflow: totals exceed the supported range")]
    Overflow,
}

impl LedgerError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
