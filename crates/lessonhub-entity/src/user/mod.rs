//! User domain entities.

pub mod model;
pub mod role;

pub use model::{Actor, ApplicationUser};
pub use role::{RoleSet, UserRole};
