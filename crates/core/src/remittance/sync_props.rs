//! Property tests for remittance synchronization.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use fundflow_shared::types::{
    CurrencyCode, EntryId, OrgExchangeRateId, OrganizationId, TeamId, TeamMemberId, WorkspaceId,
    WorkspaceTeamId,
};

use crate::currency::RateRef;
use crate::entry::types::{Entry, EntryStatus, EntryType, Submitter};
use crate::store::MemoryStore;
use crate::tenancy::{Workspace, WorkspacePeriod, WorkspaceTeam};

use super::sync::sync_remittance;

fn seed_team(store: &mut MemoryStore, rate_percent: Decimal) -> WorkspaceTeamId {
    let workspace = Workspace {
        id: WorkspaceId::new(),
        organization: OrganizationId::new(),
        period: WorkspacePeriod {
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        },
        remittance_rate: rate_percent,
    };
    let team = WorkspaceTeam {
        id: WorkspaceTeamId::new(),
        workspace: workspace.id,
        team: TeamId::new(),
        custom_remittance_rate: None,
    };
    let team_id = team.id;
    store.insert_workspace(workspace);
    store.insert_workspace_team(team);
    team_id
}

fn entry(team: WorkspaceTeamId, entry_type: EntryType, status: EntryStatus, cents: i64) -> Entry {
    Entry {
        id: EntryId::new(),
        entry_type,
        amount: Decimal::new(cents, 2),
        currency: CurrencyCode::new("USD").unwrap(),
        exchange_rate_used: Decimal::ONE,
        rate_ref: RateRef::Org(OrgExchangeRateId::new()),
        occurred_at: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        description: String::new(),
        organization: OrganizationId::new(),
        workspace: None,
        workspace_team: Some(team),
        submitter: Submitter::TeamMember(TeamMemberId::new()),
        status,
        status_note: None,
        status_last_updated_at: None,
        last_status_modified_by: None,
        is_flagged: false,
        created_at: Utc::now(),
    }
}

fn arb_entry_kind() -> impl Strategy<Value = EntryType> {
    prop_oneof![
        Just(EntryType::Income),
        Just(EntryType::Disbursement),
        Just(EntryType::Remittance),
        Just(EntryType::WorkspaceExpense),
    ]
}

fn arb_status() -> impl Strategy<Value = EntryStatus> {
    prop_oneof![
        Just(EntryStatus::Pending),
        Just(EntryStatus::Reviewed),
        Just(EntryStatus::Approved),
        Just(EntryStatus::Rejected),
    ]
}

proptest! {
    /// Re-running the sync against an unchanged entry set never changes the
    /// remittance. Pure aggregation, no drift.
    #[test]
    fn sync_is_idempotent(
        rows in proptest::collection::vec((arb_entry_kind(), arb_status(), 1i64..1_000_000), 0..12),
        rate_percent in 0i64..100,
    ) {
        let mut store = MemoryStore::new();
        let team = seed_team(&mut store, Decimal::from(rate_percent));
        for (kind, status, cents) in rows {
            store.upsert_entry(entry(team, kind, status, cents));
        }

        sync_remittance(&mut store, team, true, true).unwrap();
        let first = store.remittance_for_team(team).unwrap().clone();
        sync_remittance(&mut store, team, true, true).unwrap();
        let second = store.remittance_for_team(team).unwrap().clone();

        prop_assert_eq!(first, second);
    }

    /// Due scales linearly with the rate and only counts approved income
    /// and disbursement rows.
    #[test]
    fn due_matches_manual_aggregation(
        rows in proptest::collection::vec((arb_entry_kind(), arb_status(), 1i64..1_000_000), 0..12),
        rate_percent in 0i64..100,
    ) {
        let mut store = MemoryStore::new();
        let rate = Decimal::from(rate_percent);
        let team = seed_team(&mut store, rate);
        let mut qualifying = Decimal::ZERO;
        for (kind, status, cents) in rows {
            if status == EntryStatus::Approved
                && matches!(kind, EntryType::Income | EntryType::Disbursement)
            {
                qualifying += Decimal::new(cents, 2);
            }
            store.upsert_entry(entry(team, kind, status, cents));
        }

        sync_remittance(&mut store, team, true, false).unwrap();

        let expected = rate / Decimal::ONE_HUNDRED * qualifying;
        prop_assert_eq!(store.remittance_for_team(team).unwrap().due_amount, expected);
    }
}
