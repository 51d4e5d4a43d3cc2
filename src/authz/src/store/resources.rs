//! Resource registry

use crate::types::ResourceId;
use std::collections::HashSet;

/// Registry of resource names that rules may reference
///
/// Flat namespace: `"docs"` and `"docs/report"` are unrelated resources.
#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    resources: HashSet<ResourceId>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource; idempotent. Returns true if newly added.
    pub fn insert(&mut self, resource: impl Into<ResourceId>) -> bool {
        self.resources.insert(resource.into())
    }

    pub fn contains(&self, resource: &str) -> bool {
        self.resources.contains(resource)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceId> {
        self.resources.iter()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_registration_is_idempotent() {
        let mut store = ResourceStore::new();
        assert!(store.insert("file"));
        assert!(!store.insert("file"));

        assert_eq!(store.len(), 1);
        assert!(store.contains("file"));
        assert!(!store.contains("file/child"));
    }
}
