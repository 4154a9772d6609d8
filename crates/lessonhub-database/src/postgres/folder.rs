//! Folder queries.

use async_trait::async_trait;
use sqlx::PgPool;

use lessonhub_core::error::{AppError, ErrorKind};
use lessonhub_core::result::AppResult;
use lessonhub_core::types::{FolderId, UserId};
use lessonhub_entity::folder::{Folder, FolderOwner, FolderOwnerType, FolderStatus};

use crate::repositories::FolderRepository;

/// Reads `folders`.
#[derive(Debug, Clone)]
pub struct PgFolderRepository {
    pool: PgPool,
}

impl PgFolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderRepository for PgFolderRepository {
    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_by_ids(&self, ids: &[FolderId]) -> AppResult<Vec<Folder>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = ANY($1) ORDER BY id")
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folders", e))
    }

    async fn find_archived_personal(&self, owner: UserId) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders \
             WHERE owner_type = $1 AND owner_ref = $2 AND status = $3 \
             ORDER BY id",
        )
        .bind(FolderOwnerType::Personal)
        .bind(owner.into_uuid())
        .bind(FolderStatus::Archived)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list archived folders", e)
        })
    }

    async fn find_active_siblings(
        &self,
        owner: FolderOwner,
        parent_id: Option<FolderId>,
    ) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders \
             WHERE owner_type = $1 AND owner_ref = $2 \
               AND parent_id IS NOT DISTINCT FROM $3 AND status = $4 \
             ORDER BY sort_order ASC, name ASC",
        )
        .bind(owner.owner_type())
        .bind(owner.owner_ref())
        .bind(parent_id)
        .bind(FolderStatus::Active)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list sibling folders", e))
    }

    async fn max_order(
        &self,
        owner: FolderOwner,
        parent_id: Option<FolderId>,
    ) -> AppResult<Option<i32>> {
        sqlx::query_scalar::<_, Option<i32>>(
            "SELECT MAX(sort_order) FROM folders \
             WHERE owner_type = $1 AND owner_ref = $2 AND parent_id IS NOT DISTINCT FROM $3",
        )
        .bind(owner.owner_type())
        .bind(owner.owner_ref())
        .bind(parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read folder order", e))
    }
}
