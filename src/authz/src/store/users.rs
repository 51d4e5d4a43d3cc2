//! User-role assignments

use crate::types::{RoleId, UserId};
use std::collections::{BTreeSet, HashMap};

/// Registry mapping user identifiers to their assigned roles
///
/// Assignment is set-valued. Roles are kept in a `BTreeSet` so that
/// iteration order (logging, diagnostics) is stable.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: HashMap<UserId, BTreeSet<RoleId>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the user's assignment set (not additive)
    pub fn assign<I, R>(&mut self, user: impl Into<UserId>, roles: I)
    where
        I: IntoIterator<Item = R>,
        R: Into<RoleId>,
    {
        self.users
            .insert(user.into(), roles.into_iter().map(Into::into).collect());
    }

    /// Add a single role to an existing user
    ///
    /// Returns `None` if the user is not registered, otherwise whether the
    /// role was newly added.
    pub fn add_role(&mut self, user: &str, role: impl Into<RoleId>) -> Option<bool> {
        self.users.get_mut(user).map(|roles| roles.insert(role.into()))
    }

    /// Remove a single user→role edge
    ///
    /// Returns `None` if the user is not registered, otherwise whether the
    /// role was held.
    pub fn revoke(&mut self, user: &str, role: &str) -> Option<bool> {
        self.users.get_mut(user).map(|roles| roles.remove(role))
    }

    pub fn contains(&self, user: &str) -> bool {
        self.users.contains_key(user)
    }

    /// Roles currently assigned to the user
    pub fn roles_of(&self, user: &str) -> Option<&BTreeSet<RoleId>> {
        self.users.get(user)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UserId, &BTreeSet<RoleId>)> {
        self.users.iter()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
