//! Registry and decision engine
//!
//! [`Registry`] owns the role, resource, user and rule stores together with
//! the [`EngineConfig`]. Every mutation goes through it. Queries are answered
//! by [`AuthorizationEngine`], a stateless view over borrowed stores.
//!
//! # Decision pipeline
//!
//! ```text
//! user ─→ UserStore ─→ RolePrecedence ─→ effective role
//!                                            │
//!          (role, ACTION, resource) ←────────┘
//!                    │
//!          Denied? ─→ Allowed? ─→ Unknown
//! ```

pub mod decision;
pub mod metrics;

pub use decision::{Decision, DecisionReason};
pub use metrics::{EngineMetrics, MetricsCollector};

use crate::config::{EngineConfig, PolicyDocument};
use crate::error::{AuthzError, Result};
use crate::precedence::{Resolution, RolePrecedence};
use crate::rules::RuleSet;
use crate::store::{ResourceStore, Role, RoleStore, UserStore};
use crate::types::{ActionType, Outcome, ResourceId, RoleId, RuleEffect, RuleKey, UserId};

use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Stateless decision logic over borrowed stores
#[derive(Debug, Clone, Copy)]
pub struct AuthorizationEngine<'a> {
    resources: &'a ResourceStore,
    users: &'a UserStore,
    rules: &'a RuleSet,
    precedence: &'a RolePrecedence,
}

impl<'a> AuthorizationEngine<'a> {
    pub fn new(
        resources: &'a ResourceStore,
        users: &'a UserStore,
        rules: &'a RuleSet,
        precedence: &'a RolePrecedence,
    ) -> Self {
        Self {
            resources,
            users,
            rules,
            precedence,
        }
    }

    /// Resolve the role a query for `user` is evaluated against
    ///
    /// An empty user id resolves as a user with no roles.
    pub fn resolve(&self, user: &str) -> Result<Resolution> {
        if user.is_empty() {
            return Ok(Resolution::NoRoles);
        }

        let held = self
            .users
            .roles_of(user)
            .ok_or_else(|| AuthzError::UnknownUser(user.to_string()))?;

        Ok(self.precedence.resolve(held))
    }

    /// Decide whether `user` may perform `action` on `resource`
    ///
    /// # Errors
    ///
    /// `UnknownUser` / `UnknownResource` if a non-empty identifier was never
    /// registered. These are caller bugs, not authorization outcomes.
    pub fn check(&self, user: &str, action: &str, resource: &str) -> Result<Decision> {
        let resolution = self.resolve(user)?;
        if !resource.is_empty() && !self.resources.contains(resource) {
            return Err(AuthzError::UnknownResource(resource.to_string()));
        }

        let action = ActionType::new(action);

        let role = match resolution {
            Resolution::Resolved(role) => role,
            Resolution::NoRoles => {
                return Ok(Decision::new(user, action, resource, None, DecisionReason::NoRoles));
            }
            Resolution::NoPrecedenceMatch => {
                let roles = self
                    .users
                    .roles_of(user)
                    .map(|held| held.iter().cloned().collect())
                    .unwrap_or_default();
                return Ok(Decision::new(
                    user,
                    action,
                    resource,
                    None,
                    DecisionReason::NoPrecedenceMatch { roles },
                ));
            }
        };

        let rule = RuleKey::new(role.clone(), action.clone(), resource);
        let reason = if self.rules.is_denied(&rule) {
            DecisionReason::ExplicitDeny { rule }
        } else if self.rules.is_allowed(&rule) {
            DecisionReason::ExplicitAllow { rule }
        } else {
            DecisionReason::NoRule { rule }
        };

        Ok(Decision::new(user, action, resource, Some(role), reason))
    }

    /// Tri-state decision without the explanation
    pub fn is_allowed(&self, user: &str, action: &str, resource: &str) -> Result<Outcome> {
        self.check(user, action, resource).map(|decision| decision.outcome)
    }
}

/// Caller-owned authorization registry
///
/// # Example
///
/// ```rust
/// use rbac_acl::{EngineConfig, Outcome, Registry};
///
/// # fn main() -> rbac_acl::Result<()> {
/// let mut acl = Registry::new(EngineConfig::with_precedence(["admin", "normal-user"]));
///
/// acl.add_role("admin", ["READ", "WRITE"])?;
/// acl.add_role("normal-user", ["READ"])?;
/// acl.add_resource("file")?;
/// acl.allow("admin", "write", ["file"])?;
/// acl.add_user("alice", ["admin", "normal-user"])?;
///
/// assert_eq!(acl.is_allowed("alice", "WRITE", "file")?, Outcome::Allowed);
///
/// acl.revoke_role_from_user("alice", "admin")?;
/// assert_eq!(acl.is_allowed("alice", "WRITE", "file")?, Outcome::Unknown);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    roles: RoleStore,
    resources: ResourceStore,
    users: UserStore,
    rules: RuleSet,
    config: EngineConfig,
    metrics: MetricsCollector,
}

impl Registry {
    /// Create an empty registry
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Build a registry from a policy document
    ///
    /// Sections are applied in dependency order: roles, resources, allow
    /// rules, deny rules, users.
    pub fn from_document(document: PolicyDocument) -> Result<Self> {
        document.validate()?;

        let PolicyDocument {
            config,
            roles,
            resources,
            allow,
            deny,
            users,
        } = document;

        let mut registry = Self::new(config);

        for (role, actions) in roles {
            registry.add_role(role, actions)?;
        }
        for resource in resources {
            registry.add_resource(resource)?;
        }
        for rule in allow {
            registry.allow(&rule.role, rule.action, rule.resources)?;
        }
        for rule in deny {
            registry.deny(&rule.role, rule.action, rule.resources)?;
        }
        for (user, roles) in users {
            registry.add_user(user, roles)?;
        }

        info!(
            "Registry loaded: {} roles, {} resources, {} allow rules, {} deny rules, {} users",
            registry.roles.len(),
            registry.resources.len(),
            registry.rules.len(RuleEffect::Allow),
            registry.rules.len(RuleEffect::Deny),
            registry.users.len()
        );

        Ok(registry)
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Register a role with its nominal action set (last write wins)
    pub fn add_role<I, A>(&mut self, role: impl Into<RoleId>, actions: I) -> Result<()>
    where
        I: IntoIterator<Item = A>,
        A: Into<ActionType>,
    {
        let role = Role::new(role, actions);
        if role.id.is_empty() {
            return Err(AuthzError::InvalidInput("role name cannot be empty".to_string()));
        }

        debug!("Registering role '{}' with {} actions", role.id, role.actions.len());
        if self.roles.insert(role).is_some() {
            debug!("Role definition overwritten");
        }
        Ok(())
    }

    /// Register a resource; idempotent
    pub fn add_resource(&mut self, resource: impl Into<ResourceId>) -> Result<()> {
        let resource = resource.into();
        if resource.is_empty() {
            return Err(AuthzError::InvalidInput(
                "resource name cannot be empty".to_string(),
            ));
        }

        debug!("Registering resource '{}'", resource);
        self.resources.insert(resource);
        Ok(())
    }

    /// Assign roles to a user, replacing any previous assignment
    pub fn add_user<I, R>(&mut self, user: impl Into<UserId>, roles: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: Into<RoleId>,
    {
        let user = user.into();
        if user.is_empty() {
            return Err(AuthzError::InvalidInput("user name cannot be empty".to_string()));
        }

        let roles: BTreeSet<RoleId> = roles.into_iter().map(Into::into).collect();
        for role in &roles {
            self.ensure_role(role)?;
        }

        debug!("Assigning roles {:?} to user '{}'", roles, user);
        self.users.assign(user, roles);
        Ok(())
    }

    /// Add a single role to a registered user
    ///
    /// Returns whether the role was newly assigned.
    pub fn assign_role(&mut self, user: &str, role: impl Into<RoleId>) -> Result<bool> {
        let role = role.into();
        if !self.users.contains(user) {
            return Err(AuthzError::UnknownUser(user.to_string()));
        }
        self.ensure_role(&role)?;

        debug!("Assigning role '{}' to user '{}'", role, user);
        self.users
            .add_role(user, role)
            .ok_or_else(|| AuthzError::UnknownUser(user.to_string()))
    }

    /// Revoke a single role from a user
    ///
    /// The role stays registered. Returns whether the user held it.
    pub fn revoke_role_from_user(&mut self, user: &str, role: &str) -> Result<bool> {
        let revoked = self
            .users
            .revoke(user, role)
            .ok_or_else(|| AuthzError::UnknownUser(user.to_string()))?;

        debug!("Revoked role '{}' from user '{}': {}", role, user, revoked);
        Ok(revoked)
    }

    // ------------------------------------------------------------------
    // Rules
    // ------------------------------------------------------------------

    /// Allow `role` to perform `action` on each of `resources`
    pub fn allow<I, R>(&mut self, role: &str, action: impl Into<ActionType>, resources: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: Into<ResourceId>,
    {
        self.add_rules(RuleEffect::Allow, role, action.into(), resources)
    }

    /// Deny `role` from performing `action` on each of `resources`
    pub fn deny<I, R>(&mut self, role: &str, action: impl Into<ActionType>, resources: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: Into<ResourceId>,
    {
        self.add_rules(RuleEffect::Deny, role, action.into(), resources)
    }

    fn add_rules<I, R>(
        &mut self,
        effect: RuleEffect,
        role: &str,
        action: ActionType,
        resources: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: Into<ResourceId>,
    {
        if action.as_str().is_empty() {
            return Err(AuthzError::InvalidInput("action cannot be empty".to_string()));
        }

        // Validate everything before touching the rule maps
        let resources: Vec<ResourceId> = resources.into_iter().map(Into::into).collect();
        self.ensure_role(role)?;
        for resource in &resources {
            self.ensure_resource(resource)?;
        }

        debug!(
            "Adding {:?} rule: role='{}', action={}, resources={:?}",
            effect, role, action, resources
        );

        match effect {
            RuleEffect::Allow => self.rules.allow(role, action, resources),
            RuleEffect::Deny => self.rules.deny(role, action, resources),
        }
        Ok(())
    }

    /// Remove a single allow or deny rule. Returns whether it existed.
    pub fn revoke_rule(
        &mut self,
        effect: RuleEffect,
        role: &str,
        action: &str,
        resource: &str,
    ) -> bool {
        let key = RuleKey::new(role, action, resource);
        let removed = self.rules.revoke(effect, &key);
        debug!("Revoked {:?} rule {}: {}", effect, key, removed);
        removed
    }

    fn ensure_role(&self, role: &str) -> Result<()> {
        if self.config.strict_validation && !self.roles.contains(role) {
            warn!("Rejected reference to unregistered role '{}'", role);
            return Err(AuthzError::UnknownRole(role.to_string()));
        }
        Ok(())
    }

    fn ensure_resource(&self, resource: &str) -> Result<()> {
        if self.config.strict_validation && !self.resources.contains(resource) {
            warn!("Rejected reference to unregistered resource '{}'", resource);
            return Err(AuthzError::UnknownResource(resource.to_string()));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Decision engine over the current store state
    pub fn engine(&self) -> AuthorizationEngine<'_> {
        AuthorizationEngine::new(
            &self.resources,
            &self.users,
            &self.rules,
            &self.config.role_precedence,
        )
    }

    /// Decide and explain whether `user` may perform `action` on `resource`
    pub fn check(&self, user: &str, action: &str, resource: &str) -> Result<Decision> {
        match self.engine().check(user, action, resource) {
            Ok(decision) => {
                debug!(
                    "Decision: {} user='{}' action={} resource='{}' role={:?}",
                    decision.outcome,
                    decision.user,
                    decision.action,
                    decision.resource,
                    decision.effective_role
                );
                self.metrics.record_decision(decision.outcome);
                Ok(decision)
            }
            Err(e) => {
                debug!("Query rejected: {}", e);
                self.metrics.record_error();
                Err(e)
            }
        }
    }

    /// Tri-state decision: Denied, Allowed or Unknown
    pub fn is_allowed(&self, user: &str, action: &str, resource: &str) -> Result<Outcome> {
        self.check(user, action, resource).map(|decision| decision.outcome)
    }

    /// Effective role for `user` under the configured precedence
    pub fn effective_role(&self, user: &str) -> Result<Option<RoleId>> {
        self.engine()
            .resolve(user)
            .map(|resolution| resolution.role().cloned())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    pub fn role_actions(&self, role: &str) -> Option<&BTreeSet<ActionType>> {
        self.roles.actions(role)
    }

    pub fn has_resource(&self, resource: &str) -> bool {
        self.resources.contains(resource)
    }

    pub fn has_user(&self, user: &str) -> bool {
        self.users.contains(user)
    }

    /// Roles currently assigned to `user`
    pub fn roles_of(&self, user: &str) -> Option<&BTreeSet<RoleId>> {
        self.users.roles_of(user)
    }

    pub fn roles(&self) -> &RoleStore {
        &self.roles
    }

    pub fn resources(&self) -> &ResourceStore {
        &self.resources
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the precedence ranking; takes effect on the next query
    pub fn set_role_precedence(&mut self, precedence: RolePrecedence) {
        debug!("Role precedence set to {:?}", precedence.roles());
        self.config.role_precedence = precedence;
    }

    pub fn get_metrics(&self) -> EngineMetrics {
        self.metrics.get_metrics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> Registry {
        let mut acl = Registry::new(EngineConfig::with_precedence([
            "super-admin",
            "admin",
            "normal-user",
        ]));
        acl.add_role("super-admin", ["READ", "WRITE", "DELETE"]).unwrap();
        acl.add_role("admin", ["READ", "WRITE"]).unwrap();
        acl.add_role("normal-user", ["READ"]).unwrap();
        acl.add_resource("file").unwrap();
        acl
    }

    #[test]
    fn test_unknown_resource_is_error() {
        let mut acl = sample_registry();
        acl.add_user("alice", ["admin"]).unwrap();

        let result = acl.is_allowed("alice", "READ", "missing");
        assert!(matches!(result, Err(AuthzError::UnknownResource(_))));
        assert_eq!(acl.get_metrics().error_count, 1);
    }

    #[test]
    fn test_unknown_user_is_error() {
        let acl = sample_registry();
        let result = acl.is_allowed("ghost", "READ", "file");
        assert!(matches!(result, Err(AuthzError::UnknownUser(_))));
    }

    #[test]
    fn test_empty_identifiers_resolve_to_unknown() {
        let mut acl = sample_registry();
        acl.add_user("alice", ["admin"]).unwrap();
        acl.allow("admin", "READ", ["file"]).unwrap();

        assert_eq!(acl.is_allowed("", "READ", "file").unwrap(), Outcome::Unknown);
        assert_eq!(acl.is_allowed("alice", "READ", "").unwrap(), Outcome::Unknown);
    }

    #[test]
    fn test_user_without_roles() {
        let mut acl = sample_registry();
        acl.add_user("nobody", Vec::<String>::new()).unwrap();

        let decision = acl.check("nobody", "READ", "file").unwrap();
        assert_eq!(decision.outcome, Outcome::Unknown);
        assert_eq!(decision.reason, DecisionReason::NoRoles);
        assert!(decision.effective_role.is_none());
    }

    #[test]
    fn test_strict_validation_rejects_unregistered_references() {
        let mut acl = sample_registry();

        assert!(matches!(
            acl.allow("ghost-role", "READ", ["file"]),
            Err(AuthzError::UnknownRole(_))
        ));
        assert!(matches!(
            acl.deny("admin", "READ", ["file", "ghost-file"]),
            Err(AuthzError::UnknownResource(_))
        ));
        assert!(matches!(
            acl.add_user("alice", ["admin", "ghost-role"]),
            Err(AuthzError::UnknownRole(_))
        ));

        // Rejected calls leave state untouched
        assert!(acl.rules().is_empty());
        assert!(!acl.has_user("alice"));
    }

    #[test]
    fn test_lenient_mode_accepts_unregistered_references() {
        let mut acl = Registry::new(EngineConfig::default().strict(false));
        acl.add_resource("file").unwrap();
        acl.allow("ghost-role", "READ", ["file"]).unwrap();
        acl.add_user("alice", ["ghost-role"]).unwrap();

        assert_eq!(acl.is_allowed("alice", "read", "file").unwrap(), Outcome::Allowed);
    }

    #[test]
    fn test_empty_names_rejected() {
        let mut acl = sample_registry();
        assert!(matches!(acl.add_role("", ["READ"]), Err(AuthzError::InvalidInput(_))));
        assert!(matches!(acl.add_resource(""), Err(AuthzError::InvalidInput(_))));
        assert!(matches!(
            acl.add_user("", ["admin"]),
            Err(AuthzError::InvalidInput(_))
        ));
        assert!(matches!(
            acl.allow("admin", "", ["file"]),
            Err(AuthzError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_assign_role() {
        let mut acl = sample_registry();
        acl.allow("admin", "WRITE", ["file"]).unwrap();
        acl.add_user("bob", ["normal-user"]).unwrap();

        assert_eq!(acl.is_allowed("bob", "WRITE", "file").unwrap(), Outcome::Unknown);

        assert!(acl.assign_role("bob", "admin").unwrap());
        assert!(!acl.assign_role("bob", "admin").unwrap());
        assert_eq!(acl.is_allowed("bob", "WRITE", "file").unwrap(), Outcome::Allowed);

        assert!(matches!(
            acl.assign_role("ghost", "admin"),
            Err(AuthzError::UnknownUser(_))
        ));
    }

    #[test]
    fn test_revoke_role_from_unknown_user() {
        let mut acl = sample_registry();
        assert!(matches!(
            acl.revoke_role_from_user("ghost", "admin"),
            Err(AuthzError::UnknownUser(_))
        ));
    }

    #[test]
    fn test_revoke_keeps_role_registered() {
        let mut acl = sample_registry();
        acl.add_user("alice", ["admin"]).unwrap();

        assert!(acl.revoke_role_from_user("alice", "admin").unwrap());
        assert!(!acl.revoke_role_from_user("alice", "admin").unwrap());
        assert!(acl.has_role("admin"));
        assert!(acl.roles_of("alice").unwrap().is_empty());
    }

    #[test]
    fn test_revoke_rule() {
        let mut acl = sample_registry();
        acl.add_user("alice", ["admin"]).unwrap();
        acl.deny("admin", "DELETE", ["file"]).unwrap();
        acl.allow("admin", "DELETE", ["file"]).unwrap();

        assert_eq!(acl.is_allowed("alice", "DELETE", "file").unwrap(), Outcome::Denied);

        assert!(acl.revoke_rule(RuleEffect::Deny, "admin", "delete", "file"));
        assert_eq!(acl.is_allowed("alice", "DELETE", "file").unwrap(), Outcome::Allowed);

        assert!(acl.revoke_rule(RuleEffect::Allow, "admin", "DELETE", "file"));
        assert!(!acl.revoke_rule(RuleEffect::Allow, "admin", "DELETE", "file"));
        assert_eq!(acl.is_allowed("alice", "DELETE", "file").unwrap(), Outcome::Unknown);
    }

    #[test]
    fn test_no_precedence_match() {
        let mut acl = Registry::new(EngineConfig::with_precedence(["admin"]));
        acl.add_role("auditor", ["READ"]).unwrap();
        acl.add_role("guest", ["READ"]).unwrap();
        acl.add_resource("file").unwrap();
        acl.allow("auditor", "READ", ["file"]).unwrap();
        acl.add_user("carol", ["auditor", "guest"]).unwrap();

        let decision = acl.check("carol", "READ", "file").unwrap();
        assert_eq!(decision.outcome, Outcome::Unknown);
        assert_eq!(
            decision.reason,
            DecisionReason::NoPrecedenceMatch {
                roles: vec!["auditor".to_string(), "guest".to_string()]
            }
        );
        assert_eq!(acl.effective_role("carol").unwrap(), None);
    }

    #[test]
    fn test_set_role_precedence() {
        let mut acl = sample_registry();
        acl.allow("normal-user", "READ", ["file"]).unwrap();
        acl.deny("admin", "READ", ["file"]).unwrap();
        acl.add_user("dave", ["admin", "normal-user"]).unwrap();

        assert_eq!(acl.is_allowed("dave", "READ", "file").unwrap(), Outcome::Denied);

        acl.set_role_precedence(RolePrecedence::new(["normal-user", "admin"]));
        assert_eq!(acl.effective_role("dave").unwrap().as_deref(), Some("normal-user"));
        assert_eq!(acl.is_allowed("dave", "READ", "file").unwrap(), Outcome::Allowed);
    }

    #[test]
    fn test_engine_view_matches_registry() {
        let mut acl = sample_registry();
        acl.allow("admin", "WRITE", ["file"]).unwrap();
        acl.add_user("alice", ["admin"]).unwrap();

        let engine = acl.engine();
        assert_eq!(engine.is_allowed("alice", "write", "file").unwrap(), Outcome::Allowed);

        // The engine view does not record metrics
        assert_eq!(acl.get_metrics().total_requests, 0);
    }
}
