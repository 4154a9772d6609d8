//! Folder to lesson-material join rows.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lessonhub_core::types::{FolderId, FolderLessonMaterialId, LessonMaterialId};

/// Places a lesson material inside a folder.
///
/// The same material may be linked from several folders; its lifetime is
/// governed by the union of its links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FolderLessonMaterial {
    /// Unique link identifier.
    pub id: FolderLessonMaterialId,
    /// The containing folder.
    pub folder_id: FolderId,
    /// The linked lesson material.
    pub lesson_material_id: LessonMaterialId,
    /// Position within the folder.
    #[sqlx(rename = "sort_order")]
    pub order: Option<i32>,
}

impl FolderLessonMaterial {
    /// Create a new link.
    pub fn new(
        folder_id: FolderId,
        lesson_material_id: LessonMaterialId,
        order: Option<i32>,
    ) -> Self {
        Self {
            id: FolderLessonMaterialId::new(),
            folder_id,
            lesson_material_id,
            order,
        }
    }
}
