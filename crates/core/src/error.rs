//! Domain error taxonomy for the entry and remittance subsystem.
//!
//! Every variant is a business-rule violation, not a system fault: expected,
//! recoverable-by-the-caller conditions raised synchronously from the
//! operation that detects them. None are retryable.

use chrono::NaiveDate;
use fundflow_shared::error::AppError;
use fundflow_shared::types::CurrencyCode;
use thiserror::Error;

/// Errors surfaced by the entry lifecycle, validators, and remittance
/// services.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// No exchange rate row matches the currency and date.
    #[error("No exchange rate is defined for the given currency and date.")]
    NoExchangeRateDefined {
        /// The currency that was looked up.
        currency: CurrencyCode,
        /// The occurred-at date used for the lookup.
        date: NaiveDate,
    },

    /// The entity is in the wrong status for the attempted operation.
    #[error("{0}")]
    InvalidState(String),

    /// The actor's capabilities do not permit the operation.
    #[error("{0}")]
    Unauthorized(String),

    /// The operation falls outside the workspace's active period.
    #[error("{0}")]
    OutOfPeriod(String),

    /// The workspace team's remittance has been confirmed; team entries
    /// are locked.
    #[error("Remittance for this workspace team is already confirmed.")]
    RemittanceLocked,

    /// A required field is missing or an input value is invalid.
    #[error("{0}")]
    ValidationFailed(String),
}

impl DomainError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NoExchangeRateDefined { .. } => "NO_EXCHANGE_RATE_DEFINED",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::OutOfPeriod(_) => "OUT_OF_PERIOD",
            Self::RemittanceLocked => "REMITTANCE_LOCKED",
            Self::ValidationFailed(_) => "VALIDATION_FAILED",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NoExchangeRateDefined { .. } | Self::ValidationFailed(_) => 400,
            Self::Unauthorized(_) => 403,
            Self::InvalidState(_) | Self::OutOfPeriod(_) | Self::RemittanceLocked => 422,
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::NoExchangeRateDefined { .. } | DomainError::ValidationFailed(_) => {
                Self::Validation(message)
            }
            DomainError::Unauthorized(_) => Self::Forbidden(message),
            DomainError::InvalidState(_)
            | DomainError::OutOfPeriod(_)
            | DomainError::RemittanceLocked => Self::BusinessRule(message),
        }
    }
}
