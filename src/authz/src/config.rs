//! Engine configuration and declarative policy bootstrap
//!
//! A [`PolicyDocument`] describes roles, resources, rules and user
//! assignments in JSON so that a host can seed a [`crate::Registry`] at
//! startup:
//!
//! ```json
//! {
//!   "config": { "role_precedence": ["super-admin", "admin", "normal-user"] },
//!   "roles": { "admin": ["READ", "WRITE"], "normal-user": ["READ"] },
//!   "resources": ["file"],
//!   "allow": [{ "role": "admin", "action": "write", "resources": ["file"] }],
//!   "deny": [{ "role": "normal-user", "action": "write", "resources": ["file"] }],
//!   "users": { "alice": ["admin", "normal-user"] }
//! }
//! ```
//!
//! Loading a document is configuration, not persistence: nothing is ever
//! written back.

use crate::error::{AuthzError, Result};
use crate::precedence::RolePrecedence;
use crate::types::{ActionType, ResourceId, RoleId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Authority ranking used when a user holds several roles
    #[serde(default)]
    pub role_precedence: RolePrecedence,

    /// Reject rules and assignments that reference unregistered roles or
    /// resources
    #[serde(default = "default_strict_validation")]
    pub strict_validation: bool,
}

fn default_strict_validation() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            role_precedence: RolePrecedence::default(),
            strict_validation: default_strict_validation(),
        }
    }
}

impl EngineConfig {
    /// Config with the given precedence ranking and strict validation on
    pub fn with_precedence<I, R>(ranking: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RoleId>,
    {
        Self {
            role_precedence: RolePrecedence::new(ranking),
            ..Default::default()
        }
    }

    pub fn strict(mut self, strict_validation: bool) -> Self {
        self.strict_validation = strict_validation;
        self
    }
}

/// One allow or deny entry of a policy document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub role: RoleId,
    pub action: ActionType,
    pub resources: Vec<ResourceId>,
}

/// Declarative description of a registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDocument {
    #[serde(default)]
    pub config: EngineConfig,

    /// Role name → nominal action set
    #[serde(default)]
    pub roles: BTreeMap<RoleId, BTreeSet<ActionType>>,

    #[serde(default)]
    pub resources: BTreeSet<ResourceId>,

    #[serde(default)]
    pub allow: Vec<RuleSpec>,

    #[serde(default)]
    pub deny: Vec<RuleSpec>,

    /// User → assigned roles
    #[serde(default)]
    pub users: BTreeMap<UserId, BTreeSet<RoleId>>,
}

impl PolicyDocument {
    /// Parse a document from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    /// Read and parse a document from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Structural checks that do not depend on strict validation
    pub fn validate(&self) -> Result<()> {
        if self.roles.keys().any(|role| role.is_empty()) {
            return Err(AuthzError::Config("role name cannot be empty".to_string()));
        }

        if self.resources.iter().any(|resource| resource.is_empty()) {
            return Err(AuthzError::Config(
                "resource name cannot be empty".to_string(),
            ));
        }

        for rule in self.allow.iter().chain(self.deny.iter()) {
            if rule.action.as_str().is_empty() {
                return Err(AuthzError::Config(format!(
                    "rule for role '{}' has an empty action",
                    rule.role
                )));
            }
        }

        Ok(())
    }
}
