//! Remittance synchronization engine.
//!
//! Recomputes a team's due and paid amounts as pure aggregations over its
//! approved entries. No incremental counters: re-running a sync against the
//! same entry set always yields the same amounts.

use rust_decimal::Decimal;

use fundflow_shared::types::WorkspaceTeamId;

use crate::entry::types::{EntryStatus, EntryType};
use crate::error::DomainError;
use crate::remittance::types::{derive_status, RemittanceStatus};
use crate::store::MemoryStore;

/// One percent, as a divisor for percentage rates.
const PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// Recomputes the requested sides of a team's remittance.
///
/// `recompute_due` re-aggregates approved income and disbursement entries
/// under the team's effective remittance rate; `recompute_paid`
/// re-aggregates approved remittance entries. The derived status follows,
/// except that a canceled remittance keeps its status. Confirmation fields
/// are never touched here.
///
/// Creates the remittance row when the team does not have one yet.
pub fn sync_remittance(
    store: &mut MemoryStore,
    workspace_team: WorkspaceTeamId,
    recompute_due: bool,
    recompute_paid: bool,
) -> Result<(), DomainError> {
    if !recompute_due && !recompute_paid {
        return Ok(());
    }

    let team = store
        .workspace_team(workspace_team)
        .ok_or_else(|| DomainError::ValidationFailed("workspace team not found".into()))?
        .clone();
    let workspace = store
        .workspace(team.workspace)
        .ok_or_else(|| DomainError::ValidationFailed("workspace not found".into()))?;
    let rate = team.effective_remittance_rate(workspace);

    let entries = store.entries_for_team(workspace_team);
    let approved = |wanted: &[EntryType]| -> Decimal {
        entries
            .iter()
            .filter(|e| e.status == EntryStatus::Approved && wanted.contains(&e.entry_type))
            .map(|e| e.converted_amount())
            .sum()
    };

    let due = recompute_due
        .then(|| rate / PERCENT * approved(&[EntryType::Income, EntryType::Disbursement]));
    let paid = recompute_paid.then(|| approved(&[EntryType::Remittance]));

    let remittance = store.ensure_remittance(workspace_team);
    if let Some(due) = due {
        remittance.due_amount = due;
    }
    if let Some(paid) = paid {
        remittance.paid_amount = paid;
    }
    if remittance.status != RemittanceStatus::Canceled {
        remittance.status = derive_status(remittance.due_amount, remittance.paid_amount);
    }
    Ok(())
}

/// Fires the sync appropriate for a lifecycle event on `entry_type`: due
/// for income and disbursement, paid for remittance entries, nothing for
/// expenses.
pub fn sync_for_entry_event(
    store: &mut MemoryStore,
    workspace_team: Option<WorkspaceTeamId>,
    entry_type: EntryType,
) -> Result<(), DomainError> {
    use crate::entry::types::RemittanceEffect;

    let (Some(team), Some(effect)) = (workspace_team, entry_type.remittance_effect()) else {
        return Ok(());
    };
    match effect {
        RemittanceEffect::Due => sync_remittance(store, team, true, false),
        RemittanceEffect::Paid => sync_remittance(store, team, false, true),
    }
}
