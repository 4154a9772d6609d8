//! Classroom entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lessonhub_core::types::{ClassroomId, SchoolId, UserId};

/// Whether a classroom is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "classroom_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ClassroomStatus {
    /// Running this term.
    Active,
    /// Closed.
    Inactive,
}

/// A class taught by one teacher within one school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Classroom {
    /// Unique classroom identifier.
    pub id: ClassroomId,
    /// Display name.
    pub name: String,
    /// The class teacher.
    pub teacher_id: UserId,
    /// The school the class belongs to.
    pub school_id: SchoolId,
    /// Whether the class is in use.
    pub status: ClassroomStatus,
    /// When the classroom was created.
    pub created_at: DateTime<Utc>,
}
