//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles known to the platform.
///
/// The identity collaborator reports roles as free-form names; they are
/// parsed into this closed set at the boundary so that authorization
/// rules match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Platform operator.
    SystemAdmin,
    /// Administrator of one school.
    SchoolAdmin,
    /// Reviews content.
    ContentModerator,
    /// Teaches classes.
    Teacher,
    /// Learner.
    Student,
}

impl UserRole {
    /// Every role, in declaration order.
    pub const ALL: [UserRole; 5] = [
        Self::SystemAdmin,
        Self::SchoolAdmin,
        Self::ContentModerator,
        Self::Teacher,
        Self::Student,
    ];

    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SystemAdmin => "system_admin",
            Self::SchoolAdmin => "school_admin",
            Self::ContentModerator => "content_moderator",
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::SystemAdmin => 1,
            Self::SchoolAdmin => 1 << 1,
            Self::ContentModerator => 1 << 2,
            Self::Teacher => 1 << 3,
            Self::Student => 1 << 4,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = lessonhub_core::AppError;

    /// Accepts `SystemAdmin`, `system_admin`, `system-admin` and so on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "systemadmin" => Ok(Self::SystemAdmin),
            "schooladmin" => Ok(Self::SchoolAdmin),
            "contentmoderator" => Ok(Self::ContentModerator),
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            _ => Err(lessonhub_core::AppError::validation(format!(
                "Invalid user role: '{s}'"
            ))),
        }
    }
}

/// The set of roles held by one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoleSet(u8);

impl RoleSet {
    /// An empty role set.
    pub fn empty() -> Self {
        Self(0)
    }

    /// Add a role.
    pub fn insert(&mut self, role: UserRole) {
        self.0 |= role.bit();
    }

    /// Check whether a role is present.
    pub fn contains(&self, role: UserRole) -> bool {
        self.0 & role.bit() != 0
    }

    /// Check whether the set holds no roles.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate over the contained roles in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = UserRole> + '_ {
        UserRole::ALL.into_iter().filter(|r| self.contains(*r))
    }
}

impl FromIterator<UserRole> for RoleSet {
    fn from_iter<I: IntoIterator<Item = UserRole>>(iter: I) -> Self {
        let mut set = Self::empty();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl Serialize for RoleSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for RoleSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let roles = Vec::<UserRole>::deserialize(deserializer)?;
        Ok(roles.into_iter().collect())
    }
}
