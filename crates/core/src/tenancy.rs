//! Tenancy reference data: workspaces and workspace teams.
//!
//! These are read-model snapshots of entities owned by the (excluded) outer
//! application; the core only depends on the fields listed here.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fundflow_shared::types::{OrganizationId, TeamId, WorkspaceId, WorkspaceTeamId};

/// The active date window of a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspacePeriod {
    /// First day of the workspace period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the workspace period (inclusive).
    pub end_date: NaiveDate,
}

impl WorkspacePeriod {
    /// Returns true if `date` falls within the period, bounds inclusive.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// A bounded-time program/project within an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    /// Unique identifier.
    pub id: WorkspaceId,
    /// Owning organization.
    pub organization: OrganizationId,
    /// Active date window; entries may only be submitted inside it.
    pub period: WorkspacePeriod,
    /// Default remittance rate, as a percentage (e.g. `10` = 10%).
    pub remittance_rate: Decimal,
}

/// A team's participation in a specific workspace; the unit remittance is
/// tracked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceTeam {
    /// Unique identifier.
    pub id: WorkspaceTeamId,
    /// The workspace this participation belongs to.
    pub workspace: WorkspaceId,
    /// The participating team.
    pub team: TeamId,
    /// Per-team remittance rate override, as a percentage.
    pub custom_remittance_rate: Option<Decimal>,
}

impl WorkspaceTeam {
    /// The remittance rate in effect for this team: the custom override if
    /// set, else the parent workspace's default.
    #[must_use]
    pub fn effective_remittance_rate(&self, workspace: &Workspace) -> Decimal {
        self.custom_remittance_rate
            .unwrap_or(workspace.remittance_rate)
    }
}
