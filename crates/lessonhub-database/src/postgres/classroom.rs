//! Classroom lookup.

use async_trait::async_trait;
use sqlx::PgPool;

use lessonhub_core::error::{AppError, ErrorKind};
use lessonhub_core::result::AppResult;
use lessonhub_core::types::ClassroomId;
use lessonhub_entity::classroom::Classroom;

use crate::repositories::ClassroomRepository;

/// Reads `classrooms`.
#[derive(Debug, Clone)]
pub struct PgClassroomRepository {
    pool: PgPool,
}

impl PgClassroomRepository {
    /// Create a new classroom repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassroomRepository for PgClassroomRepository {
    async fn find_by_id(&self, id: ClassroomId) -> AppResult<Option<Classroom>> {
        sqlx::query_as::<_, Classroom>("SELECT * FROM classrooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find classroom", e))
    }
}
