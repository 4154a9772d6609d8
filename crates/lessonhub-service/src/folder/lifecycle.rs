//! Folder status transitions: archive, restore, delete, bulk personal delete.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use lessonhub_auth::FolderPermissionChecker;
use lessonhub_core::types::FolderId;
use lessonhub_database::{Change, ChangeSet, FolderRepository, UnitOfWork};
use lessonhub_entity::folder::{Folder, FolderStatus};
use lessonhub_entity::user::Actor;

use crate::cascade::{CascadeOutcome, CascadeResolver};
use crate::context::RequestContext;
use crate::error::{LifecycleError, LifecycleOperation, LifecycleResult, operation_failed};

/// Result of an archive or restore.
#[derive(Debug, Clone, Serialize)]
pub struct FolderTransition {
    /// The folder.
    pub folder_id: FolderId,
    /// Its new status.
    pub status: FolderStatus,
    /// Material effects.
    pub cascade: CascadeOutcome,
}

/// Result of a single or bulk delete.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeleteOutcome {
    /// Folders removed by this call.
    pub deleted: Vec<FolderId>,
    /// Folders that were already deleted and left alone.
    pub already_deleted: Vec<FolderId>,
    /// Material effects.
    pub cascade: CascadeOutcome,
}

/// Drives folders through `Active → Archived → Deleted` and back.
#[derive(Clone)]
pub struct FolderLifecycleService {
    /// Folder reads.
    folders: Arc<dyn FolderRepository>,
    /// Commit boundary.
    unit_of_work: Arc<dyn UnitOfWork>,
    /// Material cascade.
    cascade: CascadeResolver,
    /// Authorization predicate.
    permissions: FolderPermissionChecker,
}

impl std::fmt::Debug for FolderLifecycleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderLifecycleService").finish()
    }
}

impl FolderLifecycleService {
    /// Creates a new folder lifecycle service.
    pub fn new(
        folders: Arc<dyn FolderRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
        cascade: CascadeResolver,
        permissions: FolderPermissionChecker,
    ) -> Self {
        Self {
            folders,
            unit_of_work,
            cascade,
            permissions,
        }
    }

    /// Archive an active personal folder and deactivate materials that have
    /// no other active home.
    pub async fn archive(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
    ) -> LifecycleResult<FolderTransition> {
        let op = LifecycleOperation::Archive;
        let folder = self.load_folder(ctx, folder_id, op).await?;

        match folder.status {
            FolderStatus::Active => {}
            FolderStatus::Archived => {
                return Err(LifecycleError::FolderAlreadyArchived { folder_id });
            }
            FolderStatus::Deleted => {
                return Err(LifecycleError::FolderAlreadyDeleted { folder_id });
            }
        }

        self.authorize_status_change(ctx, &folder, op).await?;

        let mut changes = ChangeSet::new();
        changes.push(Change::UpdateFolder(with_status(&folder, FolderStatus::Archived)));
        let cascade = self
            .cascade
            .plan_archive(&folder, &mut changes)
            .await
            .map_err(operation_failed(ctx, op))?;

        self.unit_of_work
            .commit(changes)
            .await
            .map_err(operation_failed(ctx, op))?;

        info!(
            actor_id = %ctx.actor_id,
            folder_id = %folder_id,
            deactivated = cascade.deactivated,
            "Folder archived"
        );

        Ok(FolderTransition {
            folder_id,
            status: FolderStatus::Archived,
            cascade,
        })
    }

    /// Restore an archived personal folder and reactivate the materials its
    /// archive deactivated.
    pub async fn restore(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
    ) -> LifecycleResult<FolderTransition> {
        let op = LifecycleOperation::Restore;
        let folder = self.load_folder(ctx, folder_id, op).await?;

        if folder.status != FolderStatus::Archived {
            return Err(LifecycleError::FolderShouldBeArchivedBeforeRestore {
                folder_id,
                status: folder.status,
            });
        }

        self.authorize_status_change(ctx, &folder, op).await?;

        let mut changes = ChangeSet::new();
        changes.push(Change::UpdateFolder(with_status(&folder, FolderStatus::Active)));
        let cascade = self
            .cascade
            .plan_restore(&folder, &mut changes)
            .await
            .map_err(operation_failed(ctx, op))?;

        self.unit_of_work
            .commit(changes)
            .await
            .map_err(operation_failed(ctx, op))?;

        info!(
            actor_id = %ctx.actor_id,
            folder_id = %folder_id,
            reactivated = cascade.reactivated,
            "Folder restored"
        );

        Ok(FolderTransition {
            folder_id,
            status: FolderStatus::Active,
            cascade,
        })
    }

    /// Delete an archived folder with its links, purging orphaned
    /// materials of personal folders. Already deleted folders succeed
    /// without changes.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
    ) -> LifecycleResult<DeleteOutcome> {
        let op = LifecycleOperation::Delete;
        let folder = self.load_folder(ctx, folder_id, op).await?;

        match folder.status {
            FolderStatus::Archived => {}
            FolderStatus::Deleted => {
                info!(actor_id = %ctx.actor_id, folder_id = %folder_id, "Folder already deleted");
                return Ok(DeleteOutcome {
                    already_deleted: vec![folder_id],
                    ..DeleteOutcome::default()
                });
            }
            FolderStatus::Active => {
                return Err(LifecycleError::FolderShouldBeArchivedBeforeDelete {
                    folder_id,
                    status: folder.status,
                });
            }
        }

        let actor = self.require_actor(ctx, &folder, op).await?;
        self.authorize(ctx, &folder, &actor, op).await?;

        self.commit_delete(ctx, vec![folder], Vec::new(), op).await
    }

    /// Delete several archived personal folders in one commit.
    ///
    /// An empty `folder_ids` selects every archived personal folder of the
    /// actor. Any folder that is not personal, not archived, or not
    /// permitted aborts the whole batch before anything is staged.
    pub async fn bulk_delete_personal(
        &self,
        ctx: &RequestContext,
        folder_ids: &[FolderId],
    ) -> LifecycleResult<DeleteOutcome> {
        let op = LifecycleOperation::Delete;

        let selected = if folder_ids.is_empty() {
            self.folders
                .find_archived_personal(ctx.actor_id)
                .await
                .map_err(operation_failed(ctx, op))?
        } else {
            let requested: BTreeSet<FolderId> = folder_ids.iter().copied().collect();
            let ids: Vec<FolderId> = requested.iter().copied().collect();
            let found = self
                .folders
                .find_by_ids(&ids)
                .await
                .map_err(operation_failed(ctx, op))?;
            if let Some(missing) = requested
                .iter()
                .find(|id| !found.iter().any(|f| f.id == **id))
            {
                return Err(LifecycleError::FolderNotFound {
                    folder_id: *missing,
                });
            }
            found
        };

        let mut targets = Vec::new();
        let mut already_deleted = Vec::new();
        for folder in selected {
            if folder.status == FolderStatus::Deleted {
                already_deleted.push(folder.id);
                continue;
            }
            if !folder.is_personal() {
                return Err(LifecycleError::FolderMustBePersonal {
                    folder_id: folder.id,
                });
            }
            if folder.status != FolderStatus::Archived {
                return Err(LifecycleError::FolderShouldBeArchivedBeforeDelete {
                    folder_id: folder.id,
                    status: folder.status,
                });
            }
            targets.push(folder);
        }

        if let Some(first) = targets.first() {
            let actor = self.require_actor(ctx, first, op).await?;
            for folder in &targets {
                self.authorize(ctx, folder, &actor, op).await?;
            }
        }

        self.commit_delete(ctx, targets, already_deleted, op).await
    }

    async fn commit_delete(
        &self,
        ctx: &RequestContext,
        targets: Vec<Folder>,
        already_deleted: Vec<FolderId>,
        op: LifecycleOperation,
    ) -> LifecycleResult<DeleteOutcome> {
        if targets.is_empty() {
            info!(
                actor_id = %ctx.actor_id,
                already_deleted = already_deleted.len(),
                "Nothing to delete"
            );
            return Ok(DeleteOutcome {
                already_deleted,
                ..DeleteOutcome::default()
            });
        }

        let mut changes = ChangeSet::new();
        let cascade = self
            .cascade
            .plan_delete(&targets, &mut changes)
            .await
            .map_err(operation_failed(ctx, op))?;
        for folder in &targets {
            changes.push(Change::RemoveFolder(folder.id));
        }

        self.unit_of_work
            .commit(changes)
            .await
            .map_err(operation_failed(ctx, op))?;

        let deleted: Vec<FolderId> = targets.iter().map(|f| f.id).collect();
        info!(
            actor_id = %ctx.actor_id,
            folders = deleted.len(),
            already_deleted = already_deleted.len(),
            links_removed = cascade.links_removed,
            purged = cascade.purged,
            "Folders deleted"
        );

        Ok(DeleteOutcome {
            deleted,
            already_deleted,
            cascade,
        })
    }

    async fn load_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        op: LifecycleOperation,
    ) -> LifecycleResult<Folder> {
        self.folders
            .find_by_id(folder_id)
            .await
            .map_err(operation_failed(ctx, op))?
            .ok_or(LifecycleError::FolderNotFound { folder_id })
    }

    async fn require_actor(
        &self,
        ctx: &RequestContext,
        folder: &Folder,
        op: LifecycleOperation,
    ) -> LifecycleResult<Actor> {
        match self
            .permissions
            .load_actor(ctx.actor_id)
            .await
            .map_err(operation_failed(ctx, op))?
        {
            Some(actor) => Ok(actor),
            None => {
                warn!(actor_id = %ctx.actor_id, folder_id = %folder.id, "Unknown actor");
                Err(LifecycleError::forbidden_folder(ctx.actor_id, folder.id))
            }
        }
    }

    async fn authorize(
        &self,
        ctx: &RequestContext,
        folder: &Folder,
        actor: &Actor,
        op: LifecycleOperation,
    ) -> LifecycleResult<()> {
        let access = self
            .permissions
            .resolve_for_actor(folder, actor)
            .await
            .map_err(operation_failed(ctx, op))?;
        if !access.is_granted() {
            warn!(
                actor_id = %ctx.actor_id,
                folder_id = %folder.id,
                operation = %op,
                "Folder access denied"
            );
            return Err(LifecycleError::forbidden_folder(ctx.actor_id, folder.id));
        }
        Ok(())
    }

    /// Predicate first, then only system administrators may change the
    /// status of a class folder.
    async fn authorize_status_change(
        &self,
        ctx: &RequestContext,
        folder: &Folder,
        op: LifecycleOperation,
    ) -> LifecycleResult<()> {
        let actor = self.require_actor(ctx, folder, op).await?;
        self.authorize(ctx, folder, &actor, op).await?;
        if !folder.is_personal() && !actor.is_system_admin() {
            warn!(
                actor_id = %ctx.actor_id,
                folder_id = %folder.id,
                operation = %op,
                "Class folder status change rejected"
            );
            return Err(LifecycleError::FolderMustBePersonal {
                folder_id: folder.id,
            });
        }
        Ok(())
    }
}

fn with_status(folder: &Folder, status: FolderStatus) -> Folder {
    Folder {
        status,
        updated_at: Utc::now(),
        ..folder.clone()
    }
}
