//! Registries of roles, resources and user-role assignments
//!
//! The stores are plain owned maps with no internal synchronization. They
//! know nothing about each other; cross-store validation (e.g. "is this role
//! registered?") is done by [`crate::engine::Registry`].

pub mod resources;
pub mod roles;
pub mod users;

pub use resources::ResourceStore;
pub use roles::{Role, RoleStore};
pub use users::UserStore;
