//! Exact amount conversion.
//!
//! CRITICAL: the snapshotted rate is applied with no intermediate rounding.
//! Aggregations over converted amounts must be reproducible from the stored
//! rows, so rounding is left to the presentation layer.

use rust_decimal::Decimal;

/// Converts an amount using the given exchange rate.
///
/// Returns the exact product at `Decimal` precision.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate
}
