//! Effective role resolution
//!
//! A user may hold several roles, but a query is evaluated against exactly
//! one of them. [`RolePrecedence`] is the caller-supplied authority ranking
//! (highest first) used to pick that role.
//!
//! # Example
//!
//! ```rust
//! use rbac_acl::precedence::{RolePrecedence, Resolution};
//! use std::collections::BTreeSet;
//!
//! let precedence = RolePrecedence::new(["super-admin", "admin", "normal-user"]);
//! let held: BTreeSet<String> = ["normal-user", "admin"].iter().map(|s| s.to_string()).collect();
//!
//! assert_eq!(precedence.resolve(&held), Resolution::Resolved("admin".to_string()));
//! ```

use crate::types::RoleId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Result of effective role resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A single effective role was selected
    Resolved(RoleId),

    /// The user holds no roles
    NoRoles,

    /// The user holds several roles and none is ranked
    NoPrecedenceMatch,
}

impl Resolution {
    pub fn role(&self) -> Option<&RoleId> {
        match self {
            Resolution::Resolved(role) => Some(role),
            _ => None,
        }
    }
}

/// Ordered authority ranking of role identifiers, highest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RolePrecedence {
    ranking: Vec<RoleId>,
}

impl RolePrecedence {
    /// Build a ranking; duplicate entries keep their first (highest) position
    pub fn new<I, R>(ranking: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RoleId>,
    {
        let mut seen = BTreeSet::new();
        let ranking = ranking
            .into_iter()
            .map(Into::<RoleId>::into)
            .filter(|role| seen.insert(role.clone()))
            .collect();
        Self { ranking }
    }

    /// Rank of a role (0 = highest authority)
    pub fn rank(&self, role: &str) -> Option<usize> {
        self.ranking.iter().position(|r| r == role)
    }

    pub fn roles(&self) -> &[RoleId] {
        &self.ranking
    }

    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }

    /// Pick the effective role out of the roles a user holds
    ///
    /// A single held role is effective whether or not it is ranked. With
    /// several roles, the highest-ranked held role wins.
    pub fn resolve(&self, held: &BTreeSet<RoleId>) -> Resolution {
        let mut iter = held.iter();
        match (iter.next(), iter.next()) {
            (None, _) => Resolution::NoRoles,
            (Some(only), None) => Resolution::Resolved(only.clone()),
            _ => self
                .ranking
                .iter()
                .find(|role| held.contains(*role))
                .map(|role| Resolution::Resolved(role.clone()))
                .unwrap_or(Resolution::NoPrecedenceMatch),
        }
    }
}
