//! Allow and deny rule storage

use crate::types::{ActionType, ResourceId, RoleId, RuleEffect, RuleKey};
use std::collections::HashMap;

/// Two independent rule maps keyed by (role, action, resource)
///
/// A key may appear in neither map, in one, or in both. Conflicts are not
/// resolved here; the engine checks the deny map first.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    allowed: HashMap<RuleKey, bool>,
    denied: HashMap<RuleKey, bool>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `action` on every resource as allowed for `role`
    pub fn allow<I, R>(&mut self, role: &str, action: impl Into<ActionType>, resources: I)
    where
        I: IntoIterator<Item = R>,
        R: Into<ResourceId>,
    {
        self.insert(RuleEffect::Allow, role, action.into(), resources);
    }

    /// Mark `action` on every resource as denied for `role`
    pub fn deny<I, R>(&mut self, role: &str, action: impl Into<ActionType>, resources: I)
    where
        I: IntoIterator<Item = R>,
        R: Into<ResourceId>,
    {
        self.insert(RuleEffect::Deny, role, action.into(), resources);
    }

    fn insert<I, R>(&mut self, effect: RuleEffect, role: &str, action: ActionType, resources: I)
    where
        I: IntoIterator<Item = R>,
        R: Into<ResourceId>,
    {
        let map = self.map_mut(effect);
        for resource in resources {
            map.insert(RuleKey::new(role, action.clone(), resource), true);
        }
    }

    /// Remove a single rule. Returns true if it existed.
    pub fn revoke(&mut self, effect: RuleEffect, key: &RuleKey) -> bool {
        self.map_mut(effect).remove(key).is_some()
    }

    /// Look up a rule; `None` means no entry exists for the key
    pub fn lookup(&self, effect: RuleEffect, key: &RuleKey) -> Option<bool> {
        self.map(effect).get(key).copied()
    }

    pub fn is_denied(&self, key: &RuleKey) -> bool {
        self.lookup(RuleEffect::Deny, key).unwrap_or(false)
    }

    pub fn is_allowed(&self, key: &RuleKey) -> bool {
        self.lookup(RuleEffect::Allow, key).unwrap_or(false)
    }

    /// All rules attached to a role, with their effect
    pub fn rules_for_role<'a>(
        &'a self,
        role: &'a str,
    ) -> impl Iterator<Item = (RuleEffect, &'a RuleKey)> + 'a {
        let allowed = self
            .allowed
            .keys()
            .filter(move |key| key.role == role)
            .map(|key| (RuleEffect::Allow, key));
        let denied = self
            .denied
            .keys()
            .filter(move |key| key.role == role)
            .map(|key| (RuleEffect::Deny, key));
        denied.chain(allowed)
    }

    /// Number of rules with the given effect
    pub fn len(&self, effect: RuleEffect) -> usize {
        self.map(effect).len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty() && self.denied.is_empty()
    }

    fn map(&self, effect: RuleEffect) -> &HashMap<RuleKey, bool> {
        match effect {
            RuleEffect::Allow => &self.allowed,
            RuleEffect::Deny => &self.denied,
        }
    }

    fn map_mut(&mut self, effect: RuleEffect) -> &mut HashMap<RuleKey, bool> {
        match effect {
            RuleEffect::Allow => &mut self.allowed,
            RuleEffect::Deny => &mut self.denied,
        }
    }
}

/// Convenience for callers that only have string parts
pub fn rule_key(role: &str, action: &str, resource: &str) -> RuleKey {
    RuleKey::new(RoleId::from(role), action, ResourceId::from(resource))
}
