//! Remittance confirmation and manual payment adjustments.

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;

use fundflow_shared::types::{OrgMemberId, WorkspaceTeamId};

use crate::actor::ActorCapabilities;
use crate::audit::BusinessAuditLogger;
use crate::error::DomainError;
use crate::remittance::types::{derive_status, Remittance, RemittanceStatus};
use crate::store::MemoryStore;

/// Operations on a team's remittance outside the sync engine.
pub struct RemittanceService;

impl RemittanceService {
    /// Confirms that a team's remittance has been fully paid.
    ///
    /// Restricted to workspace admins and operations reviewers. Once set,
    /// the confirmation locks the team's entries against further mutation;
    /// confirming an already confirmed remittance is an error.
    pub fn confirm_payment(
        store: &mut MemoryStore,
        workspace_team: WorkspaceTeamId,
        caps: &ActorCapabilities,
        confirmer: OrgMemberId,
    ) -> Result<Remittance, DomainError> {
        if !(caps.is_workspace_admin || caps.is_operations_reviewer) {
            return Err(DomainError::Unauthorized(
                "You do not have permission to confirm this remittance.".into(),
            ));
        }

        let updated = store.atomically(|s| {
            let remittance = s.ensure_remittance(workspace_team);
            if remittance.is_confirmed() {
                return Err(DomainError::RemittanceLocked);
            }
            if remittance.paid_amount < remittance.due_amount {
                return Err(DomainError::ValidationFailed(
                    "Cannot confirm payment: The due amount has not been fully paid.".into(),
                ));
            }
            remittance.confirmed_by = Some(confirmer);
            remittance.confirmed_at = Some(Utc::now());
            Ok(remittance.clone())
        })?;

        BusinessAuditLogger::log_remittance_action(
            "confirm_payment",
            workspace_team,
            &json!({ "confirmed_by": confirmer.to_string() }),
        );
        Ok(updated)
    }

    /// Records a manual payment against the remittance.
    ///
    /// The amount must be positive and must not exceed what is still owed;
    /// overpayment is rejected with the excess reported.
    pub fn record_payment(
        store: &mut MemoryStore,
        workspace_team: WorkspaceTeamId,
        caps: &ActorCapabilities,
        amount: Decimal,
    ) -> Result<Remittance, DomainError> {
        if !(caps.is_org_admin || caps.is_workspace_admin || caps.is_operations_reviewer) {
            return Err(DomainError::Unauthorized(
                "You do not have permission to record a payment for this remittance.".into(),
            ));
        }
        if amount <= Decimal::ZERO {
            return Err(DomainError::ValidationFailed(
                "Payment amount must be positive.".into(),
            ));
        }

        let updated = store.atomically(|s| {
            let remittance = s.ensure_remittance(workspace_team);
            if remittance.status == RemittanceStatus::Paid {
                return Err(DomainError::InvalidState(
                    "Remittance is already fully paid.".into(),
                ));
            }
            let remaining = remittance.due_amount - remittance.paid_amount;
            if amount > remaining {
                let excess = amount - remaining;
                return Err(DomainError::ValidationFailed(format!(
                    "Payment exceeds the remaining due amount by {excess}."
                )));
            }
            remittance.paid_amount += amount;
            remittance.status = derive_status(remittance.due_amount, remittance.paid_amount);
            Ok(remittance.clone())
        })?;

        BusinessAuditLogger::log_remittance_action(
            "record_payment",
            workspace_team,
            &json!({ "amount": amount.to_string(), "status": updated.status.as_str() }),
        );
        Ok(updated)
    }

    /// Cancels a team's remittance obligation.
    ///
    /// Refused while any payment has been recorded. Canceling twice is a
    /// no-op success.
    pub fn cancel(
        store: &mut MemoryStore,
        workspace_team: WorkspaceTeamId,
        caps: &ActorCapabilities,
    ) -> Result<Remittance, DomainError> {
        if !(caps.is_org_admin || caps.is_workspace_admin || caps.is_operations_reviewer) {
            return Err(DomainError::Unauthorized(
                "You do not have permission to cancel this remittance.".into(),
            ));
        }

        let updated = store.atomically(|s| {
            let remittance = s.ensure_remittance(workspace_team);
            if remittance.status == RemittanceStatus::Canceled {
                return Ok(remittance.clone());
            }
            if remittance.paid_amount != Decimal::ZERO {
                return Err(DomainError::ValidationFailed(
                    "Cannot cancel a remittance that has payments recorded.".into(),
                ));
            }
            remittance.status = RemittanceStatus::Canceled;
            Ok(remittance.clone())
        })?;

        BusinessAuditLogger::log_remittance_action("cancel", workspace_team, &json!({}));
        Ok(updated)
    }
}
