//! Entry lifecycle engine.
//!
//! Status machine: pending moves to reviewed, approved, or rejected and
//! never returns. Every mutation runs inside one store transaction and ends
//! with the remittance sync hook, so the sync always reads post-mutation
//! state.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::json;

use fundflow_shared::types::{AttachmentId, EntryId, OrgMemberId, WorkspaceTeamId};

use crate::audit::BusinessAuditLogger;
use crate::currency::resolve_rate;
use crate::error::DomainError;
use crate::remittance::sync::{sync_for_entry_event, sync_remittance};
use crate::store::MemoryStore;

use super::types::{
    Attachment, AttachmentInput, CreateEntryInput, Entry, EntryStatus, EntryType,
    UpdateUserInputs,
};
use super::validator::TeamEntryValidator;

// 0.01 in decimal parts: minimum accepted amount.
const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Stateless lifecycle operations over entries.
pub struct EntryService;

impl EntryService {
    /// Creates an entry together with its attachments.
    ///
    /// Resolves and snapshots the exchange rate, failing hard when no rate
    /// is defined. The entry starts pending and is flagged when no
    /// attachments were provided.
    pub fn create_entry(
        store: &mut MemoryStore,
        input: CreateEntryInput,
    ) -> Result<Entry, DomainError> {
        if input.amount < MIN_AMOUNT {
            return Err(DomainError::ValidationFailed(
                "Amount must be at least 0.01.".into(),
            ));
        }
        if input.entry_type == EntryType::WorkspaceExpense && input.workspace.is_none() {
            return Err(DomainError::ValidationFailed(
                "Workspace is required for workspace expense entries".into(),
            ));
        }
        if input.entry_type.is_team_scoped() && input.workspace_team.is_none() {
            return Err(DomainError::ValidationFailed(
                "Workspace team is required for team-based entries".into(),
            ));
        }

        let entry = store.atomically(|s| {
            // Team-scoped entries inherit the team's workspace when none
            // was given explicitly.
            let workspace = match (input.workspace, input.workspace_team) {
                (Some(ws), _) => Some(ws),
                (None, Some(team)) => s.workspace_team(team).map(|t| t.workspace),
                (None, None) => None,
            };

            let rate = Self::resolve_snapshot(s, &input, workspace)?;

            let has_attachments = !input.attachments.is_empty();
            let entry = Entry {
                id: EntryId::new(),
                entry_type: input.entry_type,
                amount: input.amount,
                currency: input.currency.clone(),
                exchange_rate_used: rate.0,
                rate_ref: rate.1,
                occurred_at: input.occurred_at,
                description: input.description.clone(),
                organization: input.organization,
                workspace,
                workspace_team: input.workspace_team,
                submitter: input.submitter,
                status: EntryStatus::Pending,
                status_note: None,
                status_last_updated_at: None,
                last_status_modified_by: None,
                is_flagged: !has_attachments,
                created_at: Utc::now(),
            };
            let entry_id = entry.id;
            s.upsert_entry(entry.clone());
            if has_attachments {
                let files = materialize_attachments(entry_id, &input.attachments);
                s.store_attachments(entry_id, files, false);
            }

            // The hook fires on every persist, even though a fresh entry is
            // pending and cannot change the aggregates yet. Every lifecycle
            // path goes through the same code.
            sync_for_entry_event(s, entry.workspace_team, entry.entry_type)?;
            Ok(entry)
        })?;

        BusinessAuditLogger::log_entry_action(
            "submit",
            entry.id,
            &json!({
                "entry_type": entry.entry_type.as_str(),
                "amount": entry.amount.to_string(),
                "currency": entry.currency.as_str(),
                "has_attachments": !entry.is_flagged,
            }),
        );
        Ok(entry)
    }

    /// Creates a team entry after running the full pre-create validation.
    pub fn create_team_entry(
        store: &mut MemoryStore,
        validator: &TeamEntryValidator,
        today: NaiveDate,
        input: CreateEntryInput,
    ) -> Result<Entry, DomainError> {
        validator.validate_for_create(input.entry_type, today, input.occurred_at)?;
        Self::create_entry(store, input)
    }

    /// Updates the submitter-editable fields of a pending entry.
    ///
    /// The exchange rate is re-resolved only when the currency or occurred
    /// date actually changed.
    pub fn update_user_inputs(
        store: &mut MemoryStore,
        entry_id: EntryId,
        updates: UpdateUserInputs,
    ) -> Result<Entry, DomainError> {
        let updated = store.atomically(|s| {
            let entry = s
                .entry(entry_id)
                .ok_or_else(|| DomainError::ValidationFailed("entry not found".into()))?
                .clone();
            if entry.status != EntryStatus::Pending {
                return Err(DomainError::InvalidState(
                    "User can only update Entry info during the pending stage.".into(),
                ));
            }
            if let Some(amount) = updates.amount {
                if amount < MIN_AMOUNT {
                    return Err(DomainError::ValidationFailed(
                        "Amount must be at least 0.01.".into(),
                    ));
                }
            }

            let new_currency = updates.currency.clone().unwrap_or(entry.currency.clone());
            let new_occurred_at = updates.occurred_at.unwrap_or(entry.occurred_at);
            let currency_changed = new_currency != entry.currency;
            let occurred_at_changed = new_occurred_at != entry.occurred_at;

            let new_rate = if currency_changed || occurred_at_changed {
                let org_rates = s.org_rates_for(entry.organization);
                let ws_rates = entry
                    .workspace
                    .map(|ws| s.workspace_rates_for(ws))
                    .unwrap_or_default();
                let source = resolve_rate(&new_currency, new_occurred_at, &org_rates, &ws_rates)
                    .ok_or(DomainError::NoExchangeRateDefined {
                        currency: new_currency.clone(),
                        date: new_occurred_at,
                    })?;
                Some((source.rate(), source.rate_ref()))
            } else {
                None
            };

            let entry = s
                .entry_mut(entry_id)
                .ok_or_else(|| DomainError::ValidationFailed("entry not found".into()))?;
            if let Some(amount) = updates.amount {
                entry.amount = amount;
            }
            entry.currency = new_currency;
            entry.occurred_at = new_occurred_at;
            if let Some(description) = updates.description {
                entry.description = description;
            }
            if let Some((rate, rate_ref)) = new_rate {
                entry.exchange_rate_used = rate;
                entry.rate_ref = rate_ref;
            }
            let mut snapshot = entry.clone();

            if !updates.attachments.is_empty() {
                let files = materialize_attachments(entry_id, &updates.attachments);
                s.store_attachments(entry_id, files, updates.replace_attachments);
                if snapshot.is_flagged && !s.attachments_for(entry_id).is_empty() {
                    let entry = s
                        .entry_mut(entry_id)
                        .ok_or_else(|| DomainError::ValidationFailed("entry not found".into()))?;
                    entry.is_flagged = false;
                    snapshot = entry.clone();
                }
            }

            sync_for_entry_event(s, snapshot.workspace_team, snapshot.entry_type)?;
            Ok(snapshot)
        })?;

        BusinessAuditLogger::log_entry_action(
            "update",
            entry_id,
            &json!({ "is_flagged": updated.is_flagged }),
        );
        Ok(updated)
    }

    /// Unconditionally assigns a new status.
    ///
    /// Authorization must already have been checked by the caller through
    /// the validator. Stamps the note, modifier, and timestamp, then syncs.
    pub fn update_status(
        store: &mut MemoryStore,
        entry_id: EntryId,
        new_status: EntryStatus,
        note: Option<String>,
        reviewer: OrgMemberId,
    ) -> Result<Entry, DomainError> {
        let (old_status, updated) = store.atomically(|s| {
            let entry = s
                .entry_mut(entry_id)
                .ok_or_else(|| DomainError::ValidationFailed("entry not found".into()))?;
            let old_status = entry.status;
            entry.status = new_status;
            entry.status_note = note;
            entry.last_status_modified_by = Some(reviewer);
            entry.status_last_updated_at = Some(Utc::now());
            let snapshot = entry.clone();

            sync_for_entry_event(s, snapshot.workspace_team, snapshot.entry_type)?;
            Ok((old_status, snapshot))
        })?;

        BusinessAuditLogger::log_status_change(entry_id, old_status, updated.status, reviewer);
        Ok(updated)
    }

    /// Reviews an entry: approve, reject, or flag.
    ///
    /// Rejection and flagging both require notes. The entry must be pending,
    /// except that an entry may be flagged at its current status.
    pub fn review(
        store: &mut MemoryStore,
        entry_id: EntryId,
        reviewer: OrgMemberId,
        status: EntryStatus,
        notes: Option<String>,
        is_flagged: bool,
    ) -> Result<Entry, DomainError> {
        if is_flagged {
            if notes.as_deref().unwrap_or("").is_empty() {
                return Err(DomainError::ValidationFailed(
                    "Notes are required when flagging an entry.".into(),
                ));
            }
        } else {
            validate_review_data(status, notes.as_deref())?;
        }

        let updated = store.atomically(|s| {
            let entry = s
                .entry_mut(entry_id)
                .ok_or_else(|| DomainError::ValidationFailed("entry not found".into()))?;
            let reviewable =
                entry.status == EntryStatus::Pending || (is_flagged && entry.status == status);
            if !reviewable {
                return Err(DomainError::InvalidState(format!(
                    "Cannot review entry with status: {}",
                    entry.status.as_str()
                )));
            }

            entry.status = status;
            entry.last_status_modified_by = Some(reviewer);
            entry.status_note = Some(notes.clone().unwrap_or_default());
            entry.status_last_updated_at = Some(Utc::now());
            entry.is_flagged = is_flagged;
            let snapshot = entry.clone();

            sync_for_entry_event(s, snapshot.workspace_team, snapshot.entry_type)?;
            Ok(snapshot)
        })?;

        let action = if is_flagged {
            "flag"
        } else if status == EntryStatus::Approved {
            "approve"
        } else {
            "reject"
        };
        BusinessAuditLogger::log_entry_action(
            action,
            entry_id,
            &json!({ "status": updated.status.as_str(), "reviewer": reviewer.to_string() }),
        );
        Ok(updated)
    }

    /// Reviews a batch of entries with one status and note.
    ///
    /// The status/notes combination is validated once upfront. Entries that
    /// are no longer pending (and not flagged) are silently skipped; a batch
    /// where everything was skipped is an error.
    pub fn bulk_review(
        store: &mut MemoryStore,
        entry_ids: &[EntryId],
        reviewer: OrgMemberId,
        status: EntryStatus,
        notes: Option<String>,
    ) -> Result<Vec<Entry>, DomainError> {
        validate_review_data(status, notes.as_deref())?;

        let reviewed = store.atomically(|s| {
            let mut reviewed = Vec::new();
            let mut due_teams = BTreeSet::new();
            let mut paid_teams = BTreeSet::new();

            for &entry_id in entry_ids {
                let Some(entry) = s.entry_mut(entry_id) else {
                    continue;
                };
                if entry.status != EntryStatus::Pending && !entry.is_flagged {
                    continue;
                }

                entry.status = status;
                entry.last_status_modified_by = Some(reviewer);
                entry.status_note = Some(notes.clone().unwrap_or_default());
                entry.status_last_updated_at = Some(Utc::now());
                track_sync_targets(entry, &mut due_teams, &mut paid_teams);
                reviewed.push(entry.clone());
            }

            if reviewed.is_empty() {
                return Err(DomainError::ValidationFailed("no valid entries".into()));
            }
            run_team_syncs(s, &due_teams, &paid_teams)?;
            Ok(reviewed)
        })?;

        BusinessAuditLogger::log_bulk_operation(
            &format!("bulk_{}_entries", status.as_str()),
            reviewed.len(),
            &json!({
                "total_requested": entry_ids.len(),
                "reviewer": reviewer.to_string(),
            }),
        );
        Ok(reviewed)
    }

    /// Deletes a pending, untouched entry.
    pub fn delete_entry(store: &mut MemoryStore, entry_id: EntryId) -> Result<Entry, DomainError> {
        let deleted = store.atomically(|s| {
            let entry = s
                .entry(entry_id)
                .ok_or_else(|| DomainError::ValidationFailed("entry not found".into()))?;
            check_delete_preconditions(entry)?;

            let deleted = s
                .remove_entry(entry_id)
                .ok_or_else(|| DomainError::ValidationFailed("entry not found".into()))?;
            sync_for_entry_event(s, deleted.workspace_team, deleted.entry_type)?;
            Ok(deleted)
        })?;

        BusinessAuditLogger::log_entry_action(
            "delete",
            entry_id,
            &json!({ "entry_type": deleted.entry_type.as_str() }),
        );
        Ok(deleted)
    }

    /// Deletes every eligible entry in the batch, returning the count.
    ///
    /// Ineligible rows are skipped, not errors, but a batch where nothing
    /// qualified is. The deletes and the resulting remittance recomputes
    /// commit as one transaction.
    pub fn bulk_delete(store: &mut MemoryStore, entry_ids: &[EntryId]) -> Result<usize, DomainError> {
        let deleted = store.atomically(|s| {
            let mut deleted = 0usize;
            let mut due_teams = BTreeSet::new();
            let mut paid_teams = BTreeSet::new();

            for &entry_id in entry_ids {
                let Some(entry) = s.entry(entry_id) else {
                    continue;
                };
                if check_delete_preconditions(entry).is_err() {
                    continue;
                }
                if let Some(removed) = s.remove_entry(entry_id) {
                    track_sync_targets(&removed, &mut due_teams, &mut paid_teams);
                    deleted += 1;
                }
            }

            if deleted == 0 {
                return Err(DomainError::ValidationFailed("no valid entries".into()));
            }
            run_team_syncs(s, &due_teams, &paid_teams)?;
            Ok(deleted)
        })?;

        BusinessAuditLogger::log_bulk_operation(
            "bulk_delete_entries",
            deleted,
            &json!({ "total_requested": entry_ids.len() }),
        );
        Ok(deleted)
    }

    fn resolve_snapshot(
        store: &MemoryStore,
        input: &CreateEntryInput,
        workspace: Option<fundflow_shared::types::WorkspaceId>,
    ) -> Result<(Decimal, crate::currency::RateRef), DomainError> {
        let org_rates = store.org_rates_for(input.organization);
        let ws_rates = workspace
            .map(|ws| store.workspace_rates_for(ws))
            .unwrap_or_default();
        let source = resolve_rate(&input.currency, input.occurred_at, &org_rates, &ws_rates)
            .ok_or(DomainError::NoExchangeRateDefined {
                currency: input.currency.clone(),
                date: input.occurred_at,
            })?;
        Ok((source.rate(), source.rate_ref()))
    }
}

fn validate_review_data(status: EntryStatus, notes: Option<&str>) -> Result<(), DomainError> {
    if !matches!(status, EntryStatus::Approved | EntryStatus::Rejected) {
        return Err(DomainError::ValidationFailed(format!(
            "Invalid review status: {}",
            status.as_str()
        )));
    }
    if status == EntryStatus::Rejected && notes.unwrap_or("").is_empty() {
        return Err(DomainError::ValidationFailed(format!(
            "Notes are required when {} an entry",
            status.as_str()
        )));
    }
    Ok(())
}

fn check_delete_preconditions(entry: &Entry) -> Result<(), DomainError> {
    if entry.last_status_modified_by.is_some() {
        return Err(DomainError::InvalidState(
            "Cannot delete an entry when someone has already modified the status.".into(),
        ));
    }
    if entry.status != EntryStatus::Pending {
        return Err(DomainError::InvalidState(
            "Cannot delete an entry that is not pending review".into(),
        ));
    }
    Ok(())
}

fn materialize_attachments(entry: EntryId, inputs: &[AttachmentInput]) -> Vec<Attachment> {
    inputs
        .iter()
        .map(|input| Attachment {
            id: AttachmentId::new(),
            entry,
            filename: input.filename.clone(),
            uploaded_at: Utc::now(),
        })
        .collect()
}

fn track_sync_targets(
    entry: &Entry,
    due_teams: &mut BTreeSet<WorkspaceTeamId>,
    paid_teams: &mut BTreeSet<WorkspaceTeamId>,
) {
    use super::types::RemittanceEffect;

    let (Some(team), Some(effect)) = (entry.workspace_team, entry.entry_type.remittance_effect())
    else {
        return;
    };
    match effect {
        RemittanceEffect::Due => due_teams.insert(team),
        RemittanceEffect::Paid => paid_teams.insert(team),
    };
}

fn run_team_syncs(
    store: &mut MemoryStore,
    due_teams: &BTreeSet<WorkspaceTeamId>,
    paid_teams: &BTreeSet<WorkspaceTeamId>,
) -> Result<(), DomainError> {
    for &team in due_teams {
        sync_remittance(store, team, true, false)?;
    }
    for &team in paid_teams {
        sync_remittance(store, team, false, true)?;
    }
    Ok(())
}
