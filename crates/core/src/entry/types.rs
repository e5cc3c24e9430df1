//! Financial entry domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fundflow_shared::types::{
    AttachmentId, CurrencyCode, EntryId, OrgMemberId, OrganizationId, TeamMemberId,
    WorkspaceId, WorkspaceTeamId,
};

use crate::currency::RateRef;

/// Kind of financial entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Money received by a team.
    Income,
    /// Money spent by a team.
    Disbursement,
    /// A team's payment toward its remittance obligation.
    Remittance,
    /// An expense charged to the workspace itself.
    WorkspaceExpense,
    /// An expense charged to the organization itself.
    OrgExpense,
}

impl EntryType {
    /// Whether this entry type belongs to a workspace team.
    #[must_use]
    pub fn is_team_scoped(self) -> bool {
        matches!(self, Self::Income | Self::Disbursement | Self::Remittance)
    }

    /// Which side of the team's remittance this type feeds, if any.
    #[must_use]
    pub fn remittance_effect(self) -> Option<RemittanceEffect> {
        match self {
            Self::Income | Self::Disbursement => Some(RemittanceEffect::Due),
            Self::Remittance => Some(RemittanceEffect::Paid),
            Self::WorkspaceExpense | Self::OrgExpense => None,
        }
    }

    /// String form used in audit metadata.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Disbursement => "disbursement",
            Self::Remittance => "remittance",
            Self::WorkspaceExpense => "workspace_expense",
            Self::OrgExpense => "org_expense",
        }
    }
}

/// Which remittance aggregate an entry contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemittanceEffect {
    /// Contributes to the amount the team owes.
    Due,
    /// Contributes to the amount the team has paid.
    Paid,
}

/// Review status of an entry.
///
/// `Pending` is the only state entries are created in. Once a reviewer
/// moves an entry out of `Pending` there is no path back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Awaiting review.
    Pending,
    /// Looked at by a reviewer, not yet decided.
    Reviewed,
    /// Counts toward remittance aggregates.
    Approved,
    /// Excluded from all aggregates.
    Rejected,
}

impl EntryStatus {
    /// String form used in audit metadata and error messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Who submitted an entry. Exactly one identity by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Submitter {
    /// Submitted by an organization member acting at org or workspace scope.
    OrgMember(OrgMemberId),
    /// Submitted by a member of the owning team.
    TeamMember(TeamMemberId),
}

/// A single financial entry with its snapshotted exchange rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier.
    pub id: EntryId,
    /// Kind of entry, immutable after creation.
    pub entry_type: EntryType,
    /// Amount in the entry's own currency.
    pub amount: Decimal,
    /// Currency the amount is denominated in.
    pub currency: CurrencyCode,
    /// Rate snapshotted at creation (or last user edit). Later changes to
    /// the rate row never touch this value.
    pub exchange_rate_used: Decimal,
    /// Which rate row the snapshot came from.
    pub rate_ref: RateRef,
    /// Business date of the underlying event.
    pub occurred_at: NaiveDate,
    /// Free-form description.
    pub description: String,
    /// Owning organization.
    pub organization: OrganizationId,
    /// Owning workspace, when workspace- or team-scoped.
    pub workspace: Option<WorkspaceId>,
    /// Owning workspace team, for team-scoped entry types.
    pub workspace_team: Option<WorkspaceTeamId>,
    /// Who submitted the entry.
    pub submitter: Submitter,
    /// Current review status.
    pub status: EntryStatus,
    /// Reviewer note attached to the last status change.
    pub status_note: Option<String>,
    /// When the status last changed. None until the first change.
    pub status_last_updated_at: Option<DateTime<Utc>>,
    /// Who last changed the status. None until the first change.
    pub last_status_modified_by: Option<OrgMemberId>,
    /// Flagged for follow-up, set automatically when created without
    /// attachments.
    pub is_flagged: bool,
    /// Creation timestamp, immutable.
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Amount converted into the organization currency using the
    /// snapshotted rate. Exact product, no rounding.
    #[must_use]
    pub fn converted_amount(&self) -> Decimal {
        crate::currency::convert_amount(self.amount, self.exchange_rate_used)
    }
}

/// A receipt or supporting document attached to an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Unique identifier.
    pub id: AttachmentId,
    /// The entry this attachment belongs to.
    pub entry: EntryId,
    /// Original filename.
    pub filename: String,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

/// Attachment payload supplied with create/update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentInput {
    /// Original filename.
    pub filename: String,
}

/// Input for creating an entry.
#[derive(Debug, Clone)]
pub struct CreateEntryInput {
    /// Kind of entry.
    pub entry_type: EntryType,
    /// Amount in `currency`.
    pub amount: Decimal,
    /// Currency the amount is denominated in.
    pub currency: CurrencyCode,
    /// Business date of the underlying event.
    pub occurred_at: NaiveDate,
    /// Free-form description.
    pub description: String,
    /// Owning organization.
    pub organization: OrganizationId,
    /// Owning workspace, required for workspace- and team-scoped types.
    pub workspace: Option<WorkspaceId>,
    /// Owning team, required for team-scoped types.
    pub workspace_team: Option<WorkspaceTeamId>,
    /// Who is submitting the entry.
    pub submitter: Submitter,
    /// Supporting documents. An empty list flags the entry.
    pub attachments: Vec<AttachmentInput>,
}

/// Submitter-editable fields of a pending entry. `None` leaves the field
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInputs {
    /// New amount.
    pub amount: Option<Decimal>,
    /// New currency. Forces a rate re-resolution.
    pub currency: Option<CurrencyCode>,
    /// New business date. Forces a rate re-resolution.
    pub occurred_at: Option<NaiveDate>,
    /// New description.
    pub description: Option<String>,
    /// New attachments, applied according to `replace_attachments`.
    pub attachments: Vec<AttachmentInput>,
    /// Replace the existing attachment set instead of appending.
    pub replace_attachments: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_team_scoped_types() {
        assert!(EntryType::Income.is_team_scoped());
        assert!(EntryType::Disbursement.is_team_scoped());
        assert!(EntryType::Remittance.is_team_scoped());
        assert!(!EntryType::WorkspaceExpense.is_team_scoped());
        assert!(!EntryType::OrgExpense.is_team_scoped());
    }

    #[test]
    fn test_remittance_effect_mapping() {
        assert_eq!(
            EntryType::Income.remittance_effect(),
            Some(RemittanceEffect::Due)
        );
        assert_eq!(
            EntryType::Disbursement.remittance_effect(),
            Some(RemittanceEffect::Due)
        );
        assert_eq!(
            EntryType::Remittance.remittance_effect(),
            Some(RemittanceEffect::Paid)
        );
        assert_eq!(EntryType::WorkspaceExpense.remittance_effect(), None);
        assert_eq!(EntryType::OrgExpense.remittance_effect(), None);
    }

    #[test]
    fn test_converted_amount_is_exact() {
        let entry = Entry {
            id: EntryId::new(),
            entry_type: EntryType::Income,
            amount: dec!(33.33),
            currency: CurrencyCode::new("EUR").unwrap(),
            exchange_rate_used: dec!(1.234567),
            rate_ref: RateRef::Org(fundflow_shared::types::OrgExchangeRateId::new()),
            occurred_at: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            description: "donation".into(),
            organization: OrganizationId::new(),
            workspace: None,
            workspace_team: Some(WorkspaceTeamId::new()),
            submitter: Submitter::TeamMember(TeamMemberId::new()),
            status: EntryStatus::Pending,
            status_note: None,
            status_last_updated_at: None,
            last_status_modified_by: None,
            is_flagged: false,
            created_at: Utc::now(),
        };
        assert_eq!(entry.converted_amount(), dec!(41.14811811));
    }
}
