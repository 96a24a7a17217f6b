//! The module contains the errors the ledger can return.
//!
//! - [`InvalidAmount`] an amount string that is not a finite decimal.
//! - [`NegativeAmount`] an amount that parses but is below zero.
//! - [`UnknownTransactionKind`] a bucket transaction `type` other than
//!   `deposit`/`withdraw`.
//! - [`UnsupportedCurrency`] a currency code without a formatter.
//! - [`Overflow`] an aggregate that no longer fits in minor units.
//!
//!  [`InvalidAmount`]: LedgerError::InvalidAmount
//!  [`NegativeAmount`]: LedgerError::NegativeAmount
//!  [`UnknownTransactionKind`]: LedgerError::UnknownTransactionKind
//!  [`UnsupportedCurrency`]: LedgerError::UnsupportedCurrency
//!  [`Overflow`]: LedgerError::Overflow
use thiserror::Error;

/// Ledger custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Negative amount: {0}")]
    NegativeAmount(String),
    #[error("Unknown transaction type: \"{0}\"")]
    UnknownTransactionKind(String),
    #[error("Unknown flow type: \"{0}\"")]
    UnknownFlowKind(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
    #[error("Aggregate overflow")]
    Overflow,
    #[error("record {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: Box<LedgerError>,
    },
}

impl LedgerError {
    /// Attaches the position of the offending record.
    #[must_use]
    pub fn at(self, index: usize) -> Self {
        match self {
            already @ Self::Record { .. } => already,
            other => Self::Record {
                index,
                source: Box::new(other),
            },
        }
    }

    /// Returns the error without the record position, if any.
    #[must_use]
    pub fn cause(&self) -> &LedgerError {
        match self {
            Self::Record { source, .. } => source.cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_wraps_once() {
        let err = LedgerError::Overflow.at(3).at(7);
        assert_eq!(
            err,
            LedgerError::Record {
                index: 3,
                source: Box::new(LedgerError::Overflow)
            }
        );
        assert_eq!(err.cause(), &LedgerError::Overflow);
        assert_eq!(err.to_string(), "record 3: Aggregate overflow");
    }
}
