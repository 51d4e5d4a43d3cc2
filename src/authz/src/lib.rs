//! # rbac-acl
//!
//! Embeddable role-based authorization engine.
//!
//! ## Features
//!
//! - **Tri-state decisions**: `Denied`, `Allowed` and `Unknown` (no rule
//!   applies) are distinct outcomes
//! - **Deny overrides allow** for the same (role, action, resource) triple
//! - **Configurable role precedence** for users holding several roles
//! - **Case-insensitive action types**
//! - **Strict registration checks** for roles and resources referenced by
//!   rules and assignments
//! - **JSON policy documents** for bootstrapping a registry
//! - **Shared handle** behind a read-write lock for multi-threaded hosts
//!
//! ## Example
//!
//! ```rust
//! use rbac_acl::{EngineConfig, Outcome, Registry};
//!
//! # fn main() -> rbac_acl::Result<()> {
//! let mut acl = Registry::new(EngineConfig::with_precedence(["admin", "normal-user"]));
//!
//! acl.add_role("admin", ["READ", "WRITE", "DELETE"])?;
//! acl.add_role("normal-user", ["READ"])?;
//! acl.add_resource("file")?;
//!
//! acl.allow("admin", "WRITE", ["file"])?;
//! acl.deny("admin", "DELETE", ["file"])?;
//! acl.add_user("alice", ["admin", "normal-user"])?;
//!
//! assert_eq!(acl.is_allowed("alice", "write", "file")?, Outcome::Allowed);
//! assert_eq!(acl.is_allowed("alice", "delete", "file")?, Outcome::Denied);
//! assert_eq!(acl.is_allowed("alice", "read", "file")?, Outcome::Unknown);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod precedence;
pub mod rules;
pub mod shared;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::{EngineConfig, PolicyDocument, RuleSpec};
pub use engine::{AuthorizationEngine, Decision, DecisionReason, EngineMetrics, Registry};
pub use error::{AuthzError, Result};
pub use precedence::{Resolution, RolePrecedence};
pub use rules::RuleSet;
pub use shared::SharedRegistry;
pub use store::{ResourceStore, Role, RoleStore, UserStore};
pub use types::{ActionType, Outcome, ResourceId, RoleId, RuleEffect, RuleKey, UserId};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
