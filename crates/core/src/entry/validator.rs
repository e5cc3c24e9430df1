//! Authorization and period rules for team-scoped entries.

use chrono::NaiveDate;

use fundflow_shared::types::WorkspaceTeamId;

use crate::actor::{ActorCapabilities, TeamRole};
use crate::error::DomainError;
use crate::store::MemoryStore;
use crate::tenancy::WorkspacePeriod;

use super::types::{Entry, EntryStatus, EntryType};

/// Rule checker for entry creation and mutation within a workspace team.
///
/// Built once per request from the actor's capability snapshot plus the
/// team's context, then consulted by the lifecycle services. Holds no
/// mutable state; every check is a pure predicate over the snapshot.
#[derive(Debug, Clone)]
pub struct TeamEntryValidator {
    caps: ActorCapabilities,
    period: WorkspacePeriod,
    remittance_confirmed: bool,
}

impl TeamEntryValidator {
    /// Builds a validator from explicit context.
    #[must_use]
    pub fn new(caps: ActorCapabilities, period: WorkspacePeriod, remittance_confirmed: bool) -> Self {
        Self {
            caps,
            period,
            remittance_confirmed,
        }
    }

    /// Builds a validator for a team, reading the workspace period and the
    /// remittance confirmation state from the store.
    pub fn for_team(
        store: &MemoryStore,
        team: WorkspaceTeamId,
        caps: ActorCapabilities,
    ) -> Result<Self, DomainError> {
        let workspace_team = store
            .workspace_team(team)
            .ok_or_else(|| DomainError::ValidationFailed("workspace team not found".into()))?;
        let workspace = store
            .workspace(workspace_team.workspace)
            .ok_or_else(|| DomainError::ValidationFailed("workspace not found".into()))?;
        let remittance_confirmed = store
            .remittance_for_team(team)
            .is_some_and(|r| r.confirmed_by.is_some());

        Ok(Self::new(caps, workspace.period, remittance_confirmed))
    }

    /// Checks that the actor may move an entry to `new_status`.
    pub fn check_status_transition(&self, new_status: EntryStatus) -> Result<(), DomainError> {
        if new_status == EntryStatus::Approved {
            if !(self.caps.is_org_admin || self.caps.is_operations_reviewer) {
                return Err(DomainError::Unauthorized(
                    "Only Admin and Operation Reviewer can approve entries.".into(),
                ));
            }
        } else if !(self.caps.is_org_admin
            || self.caps.is_operations_reviewer
            || self.caps.is_team_coordinator
            || self.caps.is_workspace_admin)
        {
            return Err(DomainError::Unauthorized(
                "You are not allowed to update entry status.".into(),
            ));
        }
        Ok(())
    }

    /// Checks that today falls within the workspace period and, when given,
    /// that the occurred date does too.
    pub fn check_workspace_period(
        &self,
        today: NaiveDate,
        occurred_at: Option<NaiveDate>,
    ) -> Result<(), DomainError> {
        if !self.period.contains(today) {
            return Err(DomainError::OutOfPeriod(
                "Entries can only be submitted during the workspace period.".into(),
            ));
        }
        if let Some(date) = occurred_at {
            if !self.period.contains(date) {
                return Err(DomainError::OutOfPeriod(
                    "The occurred date must be within the workspace period.".into(),
                ));
            }
        }
        Ok(())
    }

    /// Checks that the team's remittance has not been confirmed.
    pub fn check_remittance_unlocked(&self) -> Result<(), DomainError> {
        if self.remittance_confirmed {
            return Err(DomainError::RemittanceLocked);
        }
        Ok(())
    }

    /// Checks that the actor may create an entry of the given type.
    ///
    /// Expense types are unrestricted here; their authorization lives one
    /// level up in workspace/org permissions.
    pub fn check_create_authorization(&self, entry_type: EntryType) -> Result<(), DomainError> {
        match entry_type {
            EntryType::Income | EntryType::Disbursement => {
                if !(self.caps.is_org_admin
                    || self.caps.is_team_coordinator
                    || self.caps.team_role == Some(TeamRole::Submitter))
                {
                    return Err(DomainError::Unauthorized(
                        "Only Admin, Team Coordinators, and Submitters are authorized for this action."
                            .into(),
                    ));
                }
            }
            EntryType::Remittance => {
                if !(self.caps.is_org_admin || self.caps.is_team_coordinator) {
                    return Err(DomainError::Unauthorized(
                        "Only Admin and Team Coordinator are authorized for this action.".into(),
                    ));
                }
            }
            EntryType::WorkspaceExpense | EntryType::OrgExpense => {}
        }
        Ok(())
    }

    /// Full pre-create check: period first, then authorization.
    pub fn validate_for_create(
        &self,
        entry_type: EntryType,
        today: NaiveDate,
        occurred_at: NaiveDate,
    ) -> Result<(), DomainError> {
        self.check_workspace_period(today, Some(occurred_at))?;
        self.check_create_authorization(entry_type)
    }

    /// Full pre-update check: remittance lock, then period (against the new
    /// occurred date or the entry's current one), then the status transition
    /// when a new status is supplied.
    pub fn validate_for_update(
        &self,
        entry: &Entry,
        new_status: Option<EntryStatus>,
        today: NaiveDate,
        occurred_at: Option<NaiveDate>,
    ) -> Result<(), DomainError> {
        self.check_remittance_unlocked()?;
        let date_for_period = occurred_at.unwrap_or(entry.occurred_at);
        self.check_workspace_period(today, Some(date_for_period))?;
        if let Some(status) = new_status {
            self.check_status_transition(status)?;
        }
        Ok(())
    }
}
