//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lessonhub_core::types::{SchoolId, UserId};

use super::role::{RoleSet, UserRole};

/// A registered user, as returned by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ApplicationUser {
    /// Unique user identifier.
    pub id: UserId,
    /// Human-readable display name.
    pub display_name: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// The user's school, if any.
    pub school_id: Option<SchoolId>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

/// A user together with their resolved roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The user record.
    pub user: ApplicationUser,
    /// Roles held by the user.
    pub roles: RoleSet,
}

impl Actor {
    /// Create an actor.
    pub fn new(user: ApplicationUser, roles: RoleSet) -> Self {
        Self { user, roles }
    }

    /// The actor's user id.
    pub fn id(&self) -> UserId {
        self.user.id
    }

    /// The actor's school.
    pub fn school_id(&self) -> Option<SchoolId> {
        self.user.school_id
    }

    /// Check whether the actor holds a role.
    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.contains(role)
    }

    /// Check whether the actor is a system administrator.
    pub fn is_system_admin(&self) -> bool {
        self.has_role(UserRole::SystemAdmin)
    }
}
