//! Actor capability snapshot.
//!
//! The (excluded) request-context layer computes these flags from session and
//! membership lookups; the core consumes them as a single explicit value
//! object instead of scattering capability introspection across call sites.

use serde::{Deserialize, Serialize};

/// A team member's role within a workspace team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    /// Coordinates the team and may submit remittances.
    Coordinator,
    /// May submit income and disbursement entries.
    Submitter,
    /// Read-only reviewer of team activity.
    Auditor,
}

impl TeamRole {
    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coordinator => "coordinator",
            Self::Submitter => "submitter",
            Self::Auditor => "auditor",
        }
    }

    /// Parse a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "coordinator" => Some(Self::Coordinator),
            "submitter" => Some(Self::Submitter),
            "auditor" => Some(Self::Auditor),
            _ => None,
        }
    }
}

impl std::fmt::Display for TeamRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Capability flags for the current actor.
///
/// Flags are not hierarchical: an operations reviewer is not implicitly an
/// org admin. Each service/validator call receives the full snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorCapabilities {
    /// Administrator of the owning organization.
    pub is_org_admin: bool,
    /// Administrator of the current workspace.
    pub is_workspace_admin: bool,
    /// Reviewer of operational entries for the workspace.
    pub is_operations_reviewer: bool,
    /// Coordinator of the current workspace team.
    pub is_team_coordinator: bool,
    /// The actor's role on the current team, when they are a team member.
    pub team_role: Option<TeamRole>,
}

impl ActorCapabilities {
    /// Capability set for an organization admin.
    #[must_use]
    pub fn org_admin() -> Self {
        Self {
            is_org_admin: true,
            ..Self::default()
        }
    }

    /// Capability set for a workspace admin.
    #[must_use]
    pub fn workspace_admin() -> Self {
        Self {
            is_workspace_admin: true,
            ..Self::default()
        }
    }

    /// Capability set for an operations reviewer.
    #[must_use]
    pub fn operations_reviewer() -> Self {
        Self {
            is_operations_reviewer: true,
            ..Self::default()
        }
    }

    /// Capability set for a team coordinator.
    #[must_use]
    pub fn team_coordinator() -> Self {
        Self {
            is_team_coordinator: true,
            team_role: Some(TeamRole::Coordinator),
            ..Self::default()
        }
    }

    /// Capability set for a plain team member with the given role.
    #[must_use]
    pub fn team_member(role: TeamRole) -> Self {
        Self {
            team_role: Some(role),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_role_parse() {
        assert_eq!(TeamRole::parse("coordinator"), Some(TeamRole::Coordinator));
        assert_eq!(TeamRole::parse("SUBMITTER"), Some(TeamRole::Submitter));
        assert_eq!(TeamRole::parse("Auditor"), Some(TeamRole::Auditor));
        assert_eq!(TeamRole::parse("invalid"), None);
    }

    #[test]
    fn test_team_role_as_str() {
        assert_eq!(TeamRole::Coordinator.as_str(), "coordinator");
        assert_eq!(TeamRole::Submitter.as_str(), "submitter");
        assert_eq!(TeamRole::Auditor.as_str(), "auditor");
    }

    #[test]
    fn test_capability_constructors() {
        assert!(ActorCapabilities::org_admin().is_org_admin);
        assert!(ActorCapabilities::workspace_admin().is_workspace_admin);
        assert!(ActorCapabilities::operations_reviewer().is_operations_reviewer);

        let coordinator = ActorCapabilities::team_coordinator();
        assert!(coordinator.is_team_coordinator);
        assert_eq!(coordinator.team_role, Some(TeamRole::Coordinator));

        let submitter = ActorCapabilities::team_member(TeamRole::Submitter);
        assert!(!submitter.is_team_coordinator);
        assert_eq!(submitter.team_role, Some(TeamRole::Submitter));
    }

    #[test]
    fn test_default_has_no_capabilities() {
        let caps = ActorCapabilities::default();
        assert!(!caps.is_org_admin);
        assert!(!caps.is_workspace_admin);
        assert!(!caps.is_operations_reviewer);
        assert!(!caps.is_team_coordinator);
        assert_eq!(caps.team_role, None);
    }
}
