//! Folder link queries and reference counts.

use async_trait::async_trait;
use sqlx::PgPool;

use lessonhub_core::error::{AppError, ErrorKind};
use lessonhub_core::result::AppResult;
use lessonhub_core::types::{FolderId, FolderLessonMaterialId, LessonMaterialId};
use lessonhub_entity::folder::{FolderLessonMaterial, FolderStatus};

use crate::repositories::FolderLinkRepository;

/// Reads `folder_lesson_materials`.
#[derive(Debug, Clone)]
pub struct PgFolderLinkRepository {
    pool: PgPool,
}

impl PgFolderLinkRepository {
    /// Create a new link repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderLinkRepository for PgFolderLinkRepository {
    async fn find_by_folder(&self, folder_id: FolderId) -> AppResult<Vec<FolderLessonMaterial>> {
        sqlx::query_as::<_, FolderLessonMaterial>(
            "SELECT * FROM folder_lesson_materials WHERE folder_id = $1 \
             ORDER BY sort_order ASC NULLS LAST, id",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folder links", e))
    }

    async fn find_by_material(
        &self,
        lesson_material_id: LessonMaterialId,
    ) -> AppResult<Vec<FolderLessonMaterial>> {
        sqlx::query_as::<_, FolderLessonMaterial>(
            "SELECT * FROM folder_lesson_materials WHERE lesson_material_id = $1 ORDER BY id",
        )
        .bind(lesson_material_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list material links", e)
        })
    }

    async fn count_links_excluding(
        &self,
        lesson_material_id: LessonMaterialId,
        excluded: &[FolderLessonMaterialId],
    ) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM folder_lesson_materials \
             WHERE lesson_material_id = $1 AND NOT (id = ANY($2))",
        )
        .bind(lesson_material_id)
        .bind(excluded.to_vec())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count links", e))?;
        Ok(count as u64)
    }

    async fn count_active_folder_links_excluding(
        &self,
        lesson_material_id: LessonMaterialId,
        excluded: &[FolderId],
    ) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM folder_lesson_materials l \
             JOIN folders f ON f.id = l.folder_id \
             WHERE l.lesson_material_id = $1 AND f.status = $2 \
               AND NOT (l.folder_id = ANY($3))",
        )
        .bind(lesson_material_id)
        .bind(FolderStatus::Active)
        .bind(excluded.to_vec())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count active folder links", e)
        })?;
        Ok(count as u64)
    }

    async fn max_order(&self, folder_id: FolderId) -> AppResult<Option<i32>> {
        sqlx::query_scalar::<_, Option<i32>>(
            "SELECT MAX(sort_order) FROM folder_lesson_materials WHERE folder_id = $1",
        )
        .bind(folder_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read link order", e))
    }
}
