//! Thread-safe registry handle
//!
//! [`Registry`] has no internal synchronization. Hosts that query from
//! several threads share it through [`SharedRegistry`]: mutations take the
//! write lock, queries the read lock, so a query never observes a
//! half-applied mutation.

use crate::config::EngineConfig;
use crate::engine::{Decision, EngineMetrics, Registry};
use crate::error::Result;
use crate::types::{ActionType, Outcome, ResourceId, RoleId, RuleEffect, UserId};
use parking_lot::RwLock;
use std::sync::Arc;

/// Cloneable handle to a registry behind a read-write lock
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl SharedRegistry {
    pub fn new(config: EngineConfig) -> Self {
        Self::from_registry(Registry::new(config))
    }

    pub fn from_registry(registry: Registry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn add_role<I, A>(&self, role: impl Into<RoleId>, actions: I) -> Result<()>
    where
        I: IntoIterator<Item = A>,
        A: Into<ActionType>,
    {
        self.inner.write().add_role(role, actions)
    }

    pub fn add_resource(&self, resource: impl Into<ResourceId>) -> Result<()> {
        self.inner.write().add_resource(resource)
    }

    pub fn add_user<I, R>(&self, user: impl Into<UserId>, roles: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: Into<RoleId>,
    {
        self.inner.write().add_user(user, roles)
    }

    pub fn assign_role(&self, user: &str, role: impl Into<RoleId>) -> Result<bool> {
        self.inner.write().assign_role(user, role)
    }

    pub fn revoke_role_from_user(&self, user: &str, role: &str) -> Result<bool> {
        self.inner.write().revoke_role_from_user(user, role)
    }

    pub fn allow<I, R>(&self, role: &str, action: impl Into<ActionType>, resources: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: Into<ResourceId>,
    {
        self.inner.write().allow(role, action, resources)
    }

    pub fn deny<I, R>(&self, role: &str, action: impl Into<ActionType>, resources: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: Into<ResourceId>,
    {
        self.inner.write().deny(role, action, resources)
    }

    pub fn revoke_rule(&self, effect: RuleEffect, role: &str, action: &str, resource: &str) -> bool {
        self.inner.write().revoke_rule(effect, role, action, resource)
    }

    pub fn check(&self, user: &str, action: &str, resource: &str) -> Result<Decision> {
        self.inner.read().check(user, action, resource)
    }

    pub fn is_allowed(&self, user: &str, action: &str, resource: &str) -> Result<Outcome> {
        self.inner.read().is_allowed(user, action, resource)
    }

    pub fn effective_role(&self, user: &str) -> Result<Option<RoleId>> {
        self.inner.read().effective_role(user)
    }

    pub fn get_metrics(&self) -> EngineMetrics {
        self.inner.read().get_metrics()
    }

    /// Run several reads against one consistent snapshot
    pub fn read<T>(&self, f: impl FnOnce(&Registry) -> T) -> T {
        f(&self.inner.read())
    }

    /// Apply several mutations atomically with respect to queries
    pub fn write<T>(&self, f: impl FnOnce(&mut Registry) -> T) -> T {
        f(&mut self.inner.write())
    }
}
