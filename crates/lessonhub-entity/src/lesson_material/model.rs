//! Lesson material entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lessonhub_core::types::{FolderId, LessonMaterialId, SchoolId, UserId};

use super::status::{ContentType, LessonMaterialStatus, Visibility};

/// A single piece of file-backed learning content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LessonMaterial {
    /// Unique identifier.
    pub id: LessonMaterialId,
    /// Title shown to learners.
    pub title: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Kind of backing file.
    pub content_type: ContentType,
    /// Pointer to the externally stored bytes.
    pub source_url: String,
    /// Size of the backing file in bytes.
    pub file_size: i64,
    /// Whether the content was AI generated.
    pub is_ai_content: bool,
    /// Audience.
    pub visibility: Visibility,
    /// The original creator.
    pub created_by_user_id: UserId,
    /// Owning school, if any.
    pub school_id: Option<SchoolId>,
    /// Usability.
    pub status: LessonMaterialStatus,
    /// Folder whose archive step deactivated this material, if any.
    pub deactivated_by_folder_id: Option<FolderId>,
    /// When the material was created.
    pub created_at: DateTime<Utc>,
    /// When the material was last updated.
    pub updated_at: DateTime<Utc>,
}

impl LessonMaterial {
    /// Build a new active, private material.
    pub fn new(
        title: String,
        content_type: ContentType,
        source_url: String,
        created_by_user_id: UserId,
        school_id: Option<SchoolId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: LessonMaterialId::new(),
            title,
            description: None,
            content_type,
            source_url,
            file_size: 0,
            is_ai_content: false,
            visibility: Visibility::Private,
            created_by_user_id,
            school_id,
            status: LessonMaterialStatus::Active,
            deactivated_by_folder_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the material is usable.
    pub fn is_active(&self) -> bool {
        self.status == LessonMaterialStatus::Active
    }

    /// Check if a folder archive, rather than an independent delete, took
    /// the material out of use.
    pub fn deactivated_by_archive(&self) -> bool {
        self.status == LessonMaterialStatus::Deleted && self.deactivated_by_folder_id.is_some()
    }
}
