//! Lesson material queries.

use async_trait::async_trait;
use sqlx::PgPool;

use lessonhub_core::error::{AppError, ErrorKind};
use lessonhub_core::result::AppResult;
use lessonhub_core::types::LessonMaterialId;
use lessonhub_entity::lesson_material::LessonMaterial;

use crate::repositories::LessonMaterialRepository;

/// Reads `lesson_materials`.
#[derive(Debug, Clone)]
pub struct PgLessonMaterialRepository {
    pool: PgPool,
}

impl PgLessonMaterialRepository {
    /// Create a new lesson material repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LessonMaterialRepository for PgLessonMaterialRepository {
    async fn find_by_id(&self, id: LessonMaterialId) -> AppResult<Option<LessonMaterial>> {
        sqlx::query_as::<_, LessonMaterial>("SELECT * FROM lesson_materials WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find lesson material", e)
            })
    }

    async fn find_by_ids(&self, ids: &[LessonMaterialId]) -> AppResult<Vec<LessonMaterial>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, LessonMaterial>(
            "SELECT * FROM lesson_materials WHERE id = ANY($1) ORDER BY id",
        )
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find lesson materials", e)
        })
    }
}
