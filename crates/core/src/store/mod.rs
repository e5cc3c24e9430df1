//! In-memory transactional store.
//!
//! Tables are plain cloneable maps; [`MemoryStore::atomically`] gives the
//! all-or-nothing boundary the lifecycle services run inside. A mutation
//! closure that returns `Err` leaves the store exactly as it found it.

use std::collections::BTreeMap;

use fundflow_shared::types::{
    EntryId, OrgExchangeRateId, OrganizationId, WorkspaceExchangeRateId, WorkspaceId,
    WorkspaceTeamId,
};

use crate::currency::{OrgExchangeRate, RateRef, WorkspaceExchangeRate};
use crate::entry::types::{Attachment, Entry};
use crate::error::DomainError;
use crate::remittance::types::Remittance;
use crate::tenancy::{Workspace, WorkspaceTeam};

/// All state the core operates on, held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    workspaces: BTreeMap<WorkspaceId, Workspace>,
    workspace_teams: BTreeMap<WorkspaceTeamId, WorkspaceTeam>,
    entries: BTreeMap<EntryId, Entry>,
    attachments: BTreeMap<EntryId, Vec<Attachment>>,
    remittances: BTreeMap<WorkspaceTeamId, Remittance>,
    org_rates: Vec<OrgExchangeRate>,
    workspace_rates: Vec<WorkspaceExchangeRate>,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` transactionally: the store is snapshotted first, and the
    /// snapshot is restored when `f` returns `Err`.
    pub fn atomically<T, E>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E> {
        let snapshot = self.clone();
        match f(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                *self = snapshot;
                Err(err)
            }
        }
    }

    // Tenancy ---------------------------------------------------------------

    /// Registers a workspace.
    pub fn insert_workspace(&mut self, workspace: Workspace) {
        self.workspaces.insert(workspace.id, workspace);
    }

    /// Registers a workspace team and creates its remittance row.
    pub fn insert_workspace_team(&mut self, team: WorkspaceTeam) {
        self.remittances
            .entry(team.id)
            .or_insert_with(|| Remittance::new_for_team(team.id));
        self.workspace_teams.insert(team.id, team);
    }

    /// Looks up a workspace.
    #[must_use]
    pub fn workspace(&self, id: WorkspaceId) -> Option<&Workspace> {
        self.workspaces.get(&id)
    }

    /// Looks up a workspace team.
    #[must_use]
    pub fn workspace_team(&self, id: WorkspaceTeamId) -> Option<&WorkspaceTeam> {
        self.workspace_teams.get(&id)
    }

    // Exchange rates --------------------------------------------------------

    /// Registers an organization-level exchange rate.
    pub fn insert_org_rate(&mut self, rate: OrgExchangeRate) {
        self.org_rates.push(rate);
    }

    /// Registers a workspace-level exchange rate.
    pub fn insert_workspace_rate(&mut self, rate: WorkspaceExchangeRate) {
        self.workspace_rates.push(rate);
    }

    /// Organization rates for one organization.
    #[must_use]
    pub fn org_rates_for(&self, organization: OrganizationId) -> Vec<OrgExchangeRate> {
        self.org_rates
            .iter()
            .filter(|r| r.organization == organization)
            .cloned()
            .collect()
    }

    /// Workspace rates for one workspace.
    #[must_use]
    pub fn workspace_rates_for(&self, workspace: WorkspaceId) -> Vec<WorkspaceExchangeRate> {
        self.workspace_rates
            .iter()
            .filter(|r| r.workspace == workspace)
            .cloned()
            .collect()
    }

    /// Deletes an organization rate row, refusing while any entry still
    /// references it.
    pub fn delete_org_rate(&mut self, id: OrgExchangeRateId) -> Result<(), DomainError> {
        let referenced = self
            .entries
            .values()
            .any(|e| e.rate_ref == RateRef::Org(id));
        if referenced {
            return Err(DomainError::InvalidState(
                "Cannot delete an exchange rate that entries reference.".into(),
            ));
        }
        self.org_rates.retain(|r| r.id != id);
        Ok(())
    }

    /// Deletes a workspace rate row, refusing while any entry still
    /// references it.
    pub fn delete_workspace_rate(&mut self, id: WorkspaceExchangeRateId) -> Result<(), DomainError> {
        let referenced = self
            .entries
            .values()
            .any(|e| e.rate_ref == RateRef::Workspace(id));
        if referenced {
            return Err(DomainError::InvalidState(
                "Cannot delete an exchange rate that entries reference.".into(),
            ));
        }
        self.workspace_rates.retain(|r| r.id != id);
        Ok(())
    }

    /// Mutates a rate row in place. Entry snapshots are unaffected.
    pub fn update_org_rate(&mut self, id: OrgExchangeRateId, f: impl FnOnce(&mut OrgExchangeRate)) {
        if let Some(rate) = self.org_rates.iter_mut().find(|r| r.id == id) {
            f(rate);
        }
    }

    // Entries ---------------------------------------------------------------

    /// Looks up an entry.
    #[must_use]
    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(&id)
    }

    /// Mutable access to an entry.
    pub fn entry_mut(&mut self, id: EntryId) -> Option<&mut Entry> {
        self.entries.get_mut(&id)
    }

    /// Inserts or replaces an entry.
    pub fn upsert_entry(&mut self, entry: Entry) {
        self.entries.insert(entry.id, entry);
    }

    /// Removes an entry and its attachments.
    pub fn remove_entry(&mut self, id: EntryId) -> Option<Entry> {
        self.attachments.remove(&id);
        self.entries.remove(&id)
    }

    /// All entries belonging to a workspace team, in id order.
    #[must_use]
    pub fn entries_for_team(&self, team: WorkspaceTeamId) -> Vec<&Entry> {
        self.entries
            .values()
            .filter(|e| e.workspace_team == Some(team))
            .collect()
    }

    // Attachments -----------------------------------------------------------

    /// Attachments of an entry.
    #[must_use]
    pub fn attachments_for(&self, entry: EntryId) -> &[Attachment] {
        self.attachments.get(&entry).map_or(&[], Vec::as_slice)
    }

    /// Appends attachments to an entry, or replaces the whole set.
    pub fn store_attachments(&mut self, entry: EntryId, files: Vec<Attachment>, replace: bool) {
        let slot = self.attachments.entry(entry).or_default();
        if replace {
            *slot = files;
        } else {
            slot.extend(files);
        }
    }

    // Remittances -----------------------------------------------------------

    /// The remittance row of a team, if one exists yet.
    #[must_use]
    pub fn remittance_for_team(&self, team: WorkspaceTeamId) -> Option<&Remittance> {
        self.remittances.get(&team)
    }

    /// The remittance row of a team, created empty when absent.
    pub fn ensure_remittance(&mut self, team: WorkspaceTeamId) -> &mut Remittance {
        self.remittances
            .entry(team)
            .or_insert_with(|| Remittance::new_for_team(team))
    }
}
