//! Authorization decision types

use crate::types::{ActionType, Outcome, ResourceId, RoleId, RuleKey, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authorization decision with the reasoning that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    /// Unique decision ID
    pub id: String,

    /// Tri-state result
    pub outcome: Outcome,

    pub user: UserId,
    pub action: ActionType,
    pub resource: ResourceId,

    /// Role the query was evaluated against, if one could be resolved
    pub effective_role: Option<RoleId>,

    /// Why the engine reached this outcome
    pub reason: DecisionReason,

    /// Decision timestamp
    pub timestamp: DateTime<Utc>,
}

impl Decision {
    pub(crate) fn new(
        user: &str,
        action: ActionType,
        resource: &str,
        effective_role: Option<RoleId>,
        reason: DecisionReason,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            outcome: reason.outcome(),
            user: user.to_string(),
            action,
            resource: resource.to_string(),
            effective_role,
            reason,
            timestamp: Utc::now(),
        }
    }

    /// Boolean view: only an explicit allow grants access
    pub fn allowed(&self) -> bool {
        self.outcome.is_allowed()
    }
}

/// Reason for an authorization decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DecisionReason {
    /// A deny rule matched the effective role
    ExplicitDeny { rule: RuleKey },

    /// An allow rule matched and no deny rule did
    ExplicitAllow { rule: RuleKey },

    /// Neither map holds the triple for the effective role
    NoRule { rule: RuleKey },

    /// The user holds no roles
    NoRoles,

    /// The user holds several roles and none appears in the precedence list
    NoPrecedenceMatch { roles: Vec<RoleId> },
}

impl DecisionReason {
    pub fn outcome(&self) -> Outcome {
        match self {
            DecisionReason::ExplicitDeny { .. } => Outcome::Denied,
            DecisionReason::ExplicitAllow { .. } => Outcome::Allowed,
            DecisionReason::NoRule { .. }
            | DecisionReason::NoRoles
            | DecisionReason::NoPrecedenceMatch { .. } => Outcome::Unknown,
        }
    }
}
