//! Currency code value type.
//!
//! CRITICAL: Never use floating-point for money calculations. Amounts are
//! `rust_decimal::Decimal` everywhere; this type only identifies which
//! currency an amount is denominated in.

use serde::{Deserialize, Serialize};

/// ISO 4217 alphabetic currency code (e.g., "USD", "EUR").
///
/// Stored uppercase; two codes are equal iff their uppercase forms match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a currency code, normalizing to uppercase.
    ///
    /// # Errors
    ///
    /// Returns an error unless the code is exactly three ASCII letters.
    pub fn new(code: &str) -> Result<Self, String> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!("Invalid currency code: {code}"));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
