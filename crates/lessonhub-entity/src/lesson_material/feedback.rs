//! Rows that hang off a lesson material and die with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lessonhub_core::types::{ApprovalId, LessonMaterialId, QuestionId, UserId};

/// A question asked about a lesson material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LessonMaterialQuestion {
    /// Unique identifier.
    pub id: QuestionId,
    /// The material the question refers to.
    pub lesson_material_id: LessonMaterialId,
    /// Who asked.
    pub author_id: UserId,
    /// Question text.
    pub content: String,
    /// When the question was asked.
    pub created_at: DateTime<Utc>,
}

/// A moderation decision on a lesson material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LessonMaterialApproval {
    /// Unique identifier.
    pub id: ApprovalId,
    /// The reviewed material.
    pub lesson_material_id: LessonMaterialId,
    /// The reviewing user.
    pub reviewer_id: UserId,
    /// Whether the material was approved.
    pub approved: bool,
    /// Reviewer comment.
    pub comment: Option<String>,
    /// When the decision was made.
    pub created_at: DateTime<Utc>,
}
