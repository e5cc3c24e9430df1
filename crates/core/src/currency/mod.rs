//! Multi-currency handling and exchange rates.
//!
//! # Modules
//!
//! - `exchange` - Exchange rate row types and the snapshot reference
//! - `resolver` - Closest prior-or-equal date rate resolution
//! - `conversion` - Exact amount conversion

pub mod conversion;
pub mod exchange;
pub mod resolver;

#[cfg(test)]
mod resolver_props;

pub use conversion::convert_amount;
pub use exchange::{OrgExchangeRate, RateRef, RateSource, WorkspaceExchangeRate};
pub use resolver::resolve_rate;
