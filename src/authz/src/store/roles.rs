//! Role registry

use crate::types::{ActionType, RoleId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Role definition
///
/// The action set is descriptive metadata. Decisions only consult rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique role name (e.g., "admin")
    pub id: RoleId,

    /// Nominal action types associated with the role
    #[serde(default)]
    pub actions: BTreeSet<ActionType>,
}

impl Role {
    /// Create a new role
    pub fn new<I, A>(id: impl Into<RoleId>, actions: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<ActionType>,
    {
        Self {
            id: id.into(),
            actions: actions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Registry of role names to their nominal action sets
#[derive(Debug, Clone, Default)]
pub struct RoleStore {
    roles: HashMap<RoleId, Role>,
}

impl RoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a role, overwriting any previous definition (last write wins)
    ///
    /// Returns the previous definition, if any.
    pub fn insert(&mut self, role: Role) -> Option<Role> {
        self.roles.insert(role.id.clone(), role)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.roles.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Role> {
        self.roles.get(id)
    }

    /// Nominal action set of a role
    pub fn actions(&self, id: &str) -> Option<&BTreeSet<ActionType>> {
        self.roles.get(id).map(|role| &role.actions)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.roles.values()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
