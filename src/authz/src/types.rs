//! Core authorization types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique role identifier
pub type RoleId = String;

/// Unique resource identifier
pub type ResourceId = String;

/// Unique user identifier
pub type UserId = String;

/// Action type (READ, WRITE, DELETE, ...)
///
/// Always stored upper-cased so that `read`, `Read` and `READ` key the same
/// rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ActionType(String);

impl ActionType {
    /// Create a new action type, normalizing its case
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().to_uppercase())
    }

    /// Normalized action name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ActionType {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for ActionType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<ActionType> for String {
    fn from(action: ActionType) -> Self {
        action.0
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rule key: (role, action, resource)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleKey {
    pub role: RoleId,
    pub action: ActionType,
    pub resource: ResourceId,
}

impl RuleKey {
    pub fn new(
        role: impl Into<RoleId>,
        action: impl Into<ActionType>,
        resource: impl Into<ResourceId>,
    ) -> Self {
        Self {
            role: role.into(),
            action: action.into(),
            resource: resource.into(),
        }
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.role, self.action, self.resource)
    }
}

/// Rule effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleEffect {
    /// Permit the action
    Allow,
    /// Forbid the action
    Deny,
}

/// Outcome of an authorization query
///
/// `Unknown` means no applicable rule was found. It is not an implicit
/// grant, and it is not the same thing as an explicit deny.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    /// An explicit deny rule matched
    Denied,
    /// An explicit allow rule matched and no deny rule did
    Allowed,
    /// No effective role, or no rule for the effective role
    Unknown,
}

impl Outcome {
    /// Boolean view: only an explicit allow grants access
    pub fn is_allowed(self) -> bool {
        matches!(self, Outcome::Allowed)
    }

    pub fn is_denied(self) -> bool {
        matches!(self, Outcome::Denied)
    }

    pub fn is_unknown(self) -> bool {
        matches!(self, Outcome::Unknown)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Denied => "DENIED",
            Outcome::Allowed => "ALLOWED",
            Outcome::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_type_normalization() {
        assert_eq!(ActionType::new("read"), ActionType::new("READ"));
        assert_eq!(ActionType::new("Write").as_str(), "WRITE");
        assert_eq!(ActionType::from("delete").to_string(), "DELETE");
    }

    #[test]
    fn test_action_type_serde_normalizes() {
        let action: ActionType = serde_json::from_str("\"read\"").unwrap();
        assert_eq!(action.as_str(), "READ");
        assert_eq!(serde_json::to_string(&action).unwrap(), "\"READ\"");
    }

    #[test]
    fn test_rule_key_case_insensitive_action() {
        let a = RuleKey::new("admin", "write", "file");
        let b = RuleKey::new("admin", "WRITE", "file");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "(admin, WRITE, file)");
    }

    #[test]
    fn test_outcome_boolean_view() {
        assert!(Outcome::Allowed.is_allowed());
        assert!(!Outcome::Denied.is_allowed());
        assert!(!Outcome::Unknown.is_allowed());
        assert!(Outcome::Unknown.is_unknown());
        assert_eq!(serde_json::to_string(&Outcome::Denied).unwrap(), "\"DENIED\"");
    }
}
