//! Closest prior-or-equal date exchange rate resolution.
//!
//! Workspace-level rates take precedence over organization-level rates. A
//! workspace row only participates when approved.

use chrono::NaiveDate;

use fundflow_shared::types::CurrencyCode;

use super::exchange::{OrgExchangeRate, RateSource, WorkspaceExchangeRate};

/// Finds the applicable exchange rate for `currency` on `occurred_at`.
///
/// Search order:
/// 1. Approved workspace rates with `effective_date <= occurred_at`,
///    latest effective date wins.
/// 2. Organization rates under the same date rule.
///
/// Duplicate effective dates within a scope are broken by the greatest row
/// id (UUID v7 byte order, i.e. the most recently created row). Returns
/// `None` when neither scope matches; callers must surface
/// `NoExchangeRateDefined` rather than defaulting to a rate of 1.
#[must_use]
pub fn resolve_rate(
    currency: &CurrencyCode,
    occurred_at: NaiveDate,
    org_rates: &[OrgExchangeRate],
    workspace_rates: &[WorkspaceExchangeRate],
) -> Option<RateSource> {
    let workspace_hit = workspace_rates
        .iter()
        .filter(|r| r.is_approved && &r.currency == currency && r.effective_date <= occurred_at)
        .max_by_key(|r| (r.effective_date, r.id));

    if let Some(rate) = workspace_hit {
        return Some(RateSource::Workspace(rate.clone()));
    }

    org_rates
        .iter()
        .filter(|r| &r.currency == currency && r.effective_date <= occurred_at)
        .max_by_key(|r| (r.effective_date, r.id))
        .map(|rate| RateSource::Org(rate.clone()))
}
