//! Business audit side channel.
//!
//! Emits one structured `tracing` event per successful mutation. The channel
//! is infallible and runs outside the transaction: a failure to record an
//! audit event can never abort the operation that triggered it.

use serde_json::Value;
use tracing::info;

use fundflow_shared::types::{EntryId, OrgMemberId, WorkspaceTeamId};

use crate::entry::types::EntryStatus;

/// Fire-and-forget audit event emitter.
pub struct BusinessAuditLogger;

impl BusinessAuditLogger {
    /// Records a lifecycle action on a single entry.
    pub fn log_entry_action(action: &str, entry_id: EntryId, metadata: &Value) {
        info!(
            target: "fundflow::audit",
            audit = "entry",
            action,
            entry_id = %entry_id,
            metadata = %metadata,
            "entry {action}"
        );
    }

    /// Records a status change on an entry.
    pub fn log_status_change(
        entry_id: EntryId,
        from: EntryStatus,
        to: EntryStatus,
        reviewer: OrgMemberId,
    ) {
        info!(
            target: "fundflow::audit",
            audit = "entry_status",
            entry_id = %entry_id,
            from = from.as_str(),
            to = to.as_str(),
            reviewer = %reviewer,
            "entry status changed"
        );
    }

    /// Records a bulk operation and how many rows it touched.
    pub fn log_bulk_operation(action: &str, affected: usize, metadata: &Value) {
        info!(
            target: "fundflow::audit",
            audit = "bulk",
            action,
            affected,
            metadata = %metadata,
            "bulk {action} touched {affected} entries"
        );
    }

    /// Records an action on a team's remittance.
    pub fn log_remittance_action(action: &str, workspace_team: WorkspaceTeamId, metadata: &Value) {
        info!(
            target: "fundflow::audit",
            audit = "remittance",
            action,
            workspace_team = %workspace_team,
            metadata = %metadata,
            "remittance {action}"
        );
    }
}
