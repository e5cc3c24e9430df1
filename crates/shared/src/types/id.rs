//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `WorkspaceId` where an
//! `OrganizationId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(OrganizationId, "Unique identifier for an organization.");
typed_id!(WorkspaceId, "Unique identifier for a workspace.");
typed_id!(TeamId, "Unique identifier for a team.");
typed_id!(
    WorkspaceTeamId,
    "Unique identifier for a team's participation in a workspace."
);
typed_id!(OrgMemberId, "Unique identifier for an organization member.");
typed_id!(TeamMemberId, "Unique identifier for a team member.");
typed_id!(EntryId, "Unique identifier for a financial entry.");
typed_id!(AttachmentId, "Unique identifier for an entry attachment.");
typed_id!(RemittanceId, "Unique identifier for a remittance ledger.");
typed_id!(
    OrgExchangeRateId,
    "Unique identifier for an organization-level exchange rate."
);
typed_id!(
    WorkspaceExchangeRateId,
    "Unique identifier for a workspace-level exchange rate."
);
