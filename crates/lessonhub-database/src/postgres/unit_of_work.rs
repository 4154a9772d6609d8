//! Transactional commit of a [`ChangeSet`].

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use lessonhub_core::error::{AppError, ErrorKind};
use lessonhub_core::result::AppResult;
use lessonhub_entity::lesson_material::LessonMaterialStatus;

use crate::unit_of_work::{Change, ChangeSet, UnitOfWork};

/// Applies every change of a set inside one PostgreSQL transaction.
#[derive(Debug, Clone)]
pub struct PgUnitOfWork {
    pool: PgPool,
}

impl PgUnitOfWork {
    /// Create a new unit of work.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn write_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        let unique = e
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation());
        if unique {
            AppError::with_source(ErrorKind::Conflict, message, e)
        } else {
            AppError::with_source(ErrorKind::Database, message, e)
        }
    }
}

fn expect_row(rows: u64, what: &str) -> AppResult<()> {
    if rows == 0 {
        return Err(AppError::conflict(format!("{what} no longer exists")));
    }
    Ok(())
}

async fn apply(tx: &mut Transaction<'_, Postgres>, change: Change) -> AppResult<()> {
    match change {
        Change::InsertFolder(folder) => {
            sqlx::query(
                "INSERT INTO folders \
                 (id, name, sort_order, owner_type, owner_ref, parent_id, status, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            )
            .bind(folder.id)
            .bind(&folder.name)
            .bind(folder.order)
            .bind(folder.owner_type)
            .bind(folder.owner_ref)
            .bind(folder.parent_id)
            .bind(folder.status)
            .bind(folder.created_at)
            .bind(folder.updated_at)
            .execute(&mut **tx)
            .await
            .map_err(write_error("Failed to insert folder"))?;
        }
        Change::UpdateFolder(folder) => {
            let result = sqlx::query(
                "UPDATE folders SET name = $2, sort_order = $3, parent_id = $4, status = $5, \
                 updated_at = $6 WHERE id = $1",
            )
            .bind(folder.id)
            .bind(&folder.name)
            .bind(folder.order)
            .bind(folder.parent_id)
            .bind(folder.status)
            .bind(folder.updated_at)
            .execute(&mut **tx)
            .await
            .map_err(write_error("Failed to update folder"))?;
            expect_row(result.rows_affected(), &format!("Folder {}", folder.id))?;
        }
        Change::RemoveFolder(id) => {
            sqlx::query("DELETE FROM folder_lesson_materials WHERE folder_id = $1")
                .bind(id)
                .execute(&mut **tx)
                .await
                .map_err(write_error("Failed to remove folder links"))?;
            sqlx::query("DELETE FROM folders WHERE id = $1")
                .bind(id)
                .execute(&mut **tx)
                .await
                .map_err(write_error("Failed to remove folder"))?;
        }
        Change::InsertLink(link) => {
            sqlx::query(
                "INSERT INTO folder_lesson_materials (id, folder_id, lesson_material_id, sort_order) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(link.id)
            .bind(link.folder_id)
            .bind(link.lesson_material_id)
            .bind(link.order)
            .execute(&mut **tx)
            .await
            .map_err(write_error("Failed to insert folder link"))?;
        }
        Change::RemoveLink(id) => {
            sqlx::query("DELETE FROM folder_lesson_materials WHERE id = $1")
                .bind(id)
                .execute(&mut **tx)
                .await
                .map_err(write_error("Failed to remove folder link"))?;
        }
        Change::DeactivateLessonMaterial { id, by_folder } => {
            let result = sqlx::query(
                "UPDATE lesson_materials SET status = $2, deactivated_by_folder_id = $3, \
                 updated_at = $4 WHERE id = $1",
            )
            .bind(id)
            .bind(LessonMaterialStatus::Deleted)
            .bind(by_folder)
            .bind(Utc::now())
            .execute(&mut **tx)
            .await
            .map_err(write_error("Failed to deactivate lesson material"))?;
            expect_row(result.rows_affected(), &format!("Lesson material {id}"))?;
        }
        Change::ReactivateLessonMaterial(id) => {
            let result = sqlx::query(
                "UPDATE lesson_materials SET status = $2, deactivated_by_folder_id = NULL, \
                 updated_at = $3 WHERE id = $1",
            )
            .bind(id)
            .bind(LessonMaterialStatus::Active)
            .bind(Utc::now())
            .execute(&mut **tx)
            .await
            .map_err(write_error("Failed to reactivate lesson material"))?;
            expect_row(result.rows_affected(), &format!("Lesson material {id}"))?;
        }
        Change::PurgeLessonMaterial(id) => {
            for statement in [
                "DELETE FROM lesson_material_questions WHERE lesson_material_id = $1",
                "DELETE FROM lesson_material_approvals WHERE lesson_material_id = $1",
                "DELETE FROM folder_lesson_materials WHERE lesson_material_id = $1",
                "DELETE FROM lesson_materials WHERE id = $1",
            ] {
                sqlx::query(statement)
                    .bind(id)
                    .execute(&mut **tx)
                    .await
                    .map_err(write_error("Failed to purge lesson material"))?;
            }
        }
    }
    Ok(())
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn commit(&self, changes: ChangeSet) -> AppResult<()> {
        if changes.is_empty() {
            return Ok(());
        }
        let total = changes.len();

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        for change in changes {
            // Dropping `tx` on error rolls the transaction back.
            apply(&mut tx, change).await?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        debug!(changes = total, "Committed change set");
        Ok(())
    }
}
