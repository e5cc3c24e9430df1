//! Exchange rate row types and the snapshot reference.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fundflow_shared::types::{
    CurrencyCode, OrgExchangeRateId, OrganizationId, WorkspaceExchangeRateId, WorkspaceId,
};

/// An organization-level exchange rate row.
///
/// Immutable once referenced by an entry; the store protects referenced rows
/// from deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgExchangeRate {
    /// Unique identifier.
    pub id: OrgExchangeRateId,
    /// Owning organization.
    pub organization: OrganizationId,
    /// The currency this rate converts from.
    pub currency: CurrencyCode,
    /// Units of the organization's base currency per unit of `currency`.
    pub rate: Decimal,
    /// Date from which this rate applies.
    pub effective_date: NaiveDate,
}

/// A workspace-level exchange rate row.
///
/// Only rows with `is_approved` participate in resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceExchangeRate {
    /// Unique identifier.
    pub id: WorkspaceExchangeRateId,
    /// Owning workspace.
    pub workspace: WorkspaceId,
    /// The currency this rate converts from.
    pub currency: CurrencyCode,
    /// Units of the organization's base currency per unit of `currency`.
    pub rate: Decimal,
    /// Date from which this rate applies.
    pub effective_date: NaiveDate,
    /// Whether the rate has been approved for use.
    pub is_approved: bool,
}

/// The rate row a resolution produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateSource {
    /// An organization-level rate was used.
    Org(OrgExchangeRate),
    /// A workspace-level rate was used.
    Workspace(WorkspaceExchangeRate),
}

impl RateSource {
    /// The rate value to snapshot onto the entry.
    #[must_use]
    pub fn rate(&self) -> Decimal {
        match self {
            Self::Org(r) => r.rate,
            Self::Workspace(r) => r.rate,
        }
    }

    /// The effective date of the winning row.
    #[must_use]
    pub fn effective_date(&self) -> NaiveDate {
        match self {
            Self::Org(r) => r.effective_date,
            Self::Workspace(r) => r.effective_date,
        }
    }

    /// The reference to pin onto the entry.
    #[must_use]
    pub fn rate_ref(&self) -> RateRef {
        match self {
            Self::Org(r) => RateRef::Org(r.id),
            Self::Workspace(r) => RateRef::Workspace(r.id),
        }
    }
}

/// Reference to the exchange rate row an entry snapshotted its rate from.
///
/// Exactly one of the two scopes is referenced, by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateRef {
    /// The rate came from an organization-level row.
    Org(OrgExchangeRateId),
    /// The rate came from a workspace-level row.
    Workspace(WorkspaceExchangeRateId),
}
