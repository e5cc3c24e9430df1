//! Remittance obligation types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fundflow_shared::types::{OrgMemberId, RemittanceId, WorkspaceTeamId};

/// Payment state of a team's remittance obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemittanceStatus {
    /// Nothing paid yet.
    Pending,
    /// Some but not all of the due amount paid.
    Partial,
    /// The due amount fully covered.
    Paid,
    /// Obligation canceled; excluded from further synchronization.
    Canceled,
}

impl RemittanceStatus {
    /// String form used in audit metadata.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Partial => "partial",
            Self::Paid => "paid",
            Self::Canceled => "canceled",
        }
    }
}

/// Derives the status implied by the current due/paid amounts.
#[must_use]
pub fn derive_status(due_amount: Decimal, paid_amount: Decimal) -> RemittanceStatus {
    if paid_amount <= Decimal::ZERO {
        RemittanceStatus::Pending
    } else if paid_amount < due_amount {
        RemittanceStatus::Partial
    } else {
        RemittanceStatus::Paid
    }
}

/// One workspace team's remittance obligation. One-to-one with the team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remittance {
    /// Unique identifier.
    pub id: RemittanceId,
    /// The owning workspace team.
    pub workspace_team: WorkspaceTeamId,
    /// Amount owed: effective rate applied to approved income and
    /// disbursement totals. Maintained by the sync engine.
    pub due_amount: Decimal,
    /// Amount covered so far: approved remittance entry totals plus manual
    /// payments. Maintained by the sync engine and the payment service.
    pub paid_amount: Decimal,
    /// Current payment state.
    pub status: RemittanceStatus,
    /// Who confirmed full payment. Set at most once; locks team entries.
    pub confirmed_by: Option<OrgMemberId>,
    /// When full payment was confirmed.
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl Remittance {
    /// A fresh, empty obligation for a team.
    #[must_use]
    pub fn new_for_team(workspace_team: WorkspaceTeamId) -> Self {
        Self {
            id: RemittanceId::new(),
            workspace_team,
            due_amount: Decimal::ZERO,
            paid_amount: Decimal::ZERO,
            status: RemittanceStatus::Pending,
            confirmed_by: None,
            confirmed_at: None,
        }
    }

    /// Whether full payment has been confirmed.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.confirmed_by.is_some()
    }
}
