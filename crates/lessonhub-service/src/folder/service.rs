//! Folder creation and metadata updates.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use validator::Validate;

use lessonhub_auth::FolderPermissionChecker;
use lessonhub_core::types::{ClassroomId, FolderId};
use lessonhub_database::{Change, ChangeSet, FolderRepository, UnitOfWork};
use lessonhub_entity::folder::{Folder, FolderOwner, FolderStatus};

use crate::context::RequestContext;
use crate::error::{LifecycleError, LifecycleOperation, LifecycleResult, operation_failed};

use super::request::{CreateFolderRequest, RenameFolderRequest, ReorderFolderRequest};

/// Creates, renames and reorders folders.
#[derive(Clone)]
pub struct FolderService {
    /// Folder reads.
    folders: Arc<dyn FolderRepository>,
    /// Commit boundary.
    unit_of_work: Arc<dyn UnitOfWork>,
    /// Authorization predicate.
    permissions: FolderPermissionChecker,
}

impl std::fmt::Debug for FolderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderService").finish()
    }
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<dyn FolderRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
        permissions: FolderPermissionChecker,
    ) -> Self {
        Self {
            folders,
            unit_of_work,
            permissions,
        }
    }

    /// Create a personal folder owned by the actor.
    pub async fn create_personal(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> LifecycleResult<Folder> {
        self.create(ctx, FolderOwner::Personal(ctx.actor_id), req)
            .await
    }

    /// Create a folder owned by a classroom.
    pub async fn create_class(
        &self,
        ctx: &RequestContext,
        classroom_id: ClassroomId,
        req: CreateFolderRequest,
    ) -> LifecycleResult<Folder> {
        self.create(ctx, FolderOwner::Class(classroom_id), req).await
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        owner: FolderOwner,
        req: CreateFolderRequest,
    ) -> LifecycleResult<Folder> {
        let op = LifecycleOperation::Create;
        let req = req.trimmed();
        req.validate()
            .map_err(|e| LifecycleError::InvalidFolderName {
                reason: e.to_string(),
            })?;

        if let Some(parent_id) = req.parent_id {
            let parent = self
                .folders
                .find_by_id(parent_id)
                .await
                .map_err(operation_failed(ctx, op))?;
            let reason = match parent.as_ref() {
                None => Some("parent folder does not exist"),
                Some(p) if p.status != FolderStatus::Active => Some("parent folder is not active"),
                Some(p) if p.owner() != owner => Some("parent folder has a different owner"),
                Some(_) => None,
            };
            if let Some(reason) = reason {
                return Err(LifecycleError::InvalidParentFolder {
                    parent_id,
                    reason: reason.to_string(),
                });
            }
        }

        let order = self
            .folders
            .max_order(owner, req.parent_id)
            .await
            .map_err(operation_failed(ctx, op))?
            .map_or(0, |max| max + 1);
        let folder = Folder::new(owner, req.name, req.parent_id, order);

        self.require_permission(ctx, &folder, op).await?;

        let mut changes = ChangeSet::new();
        changes.push(Change::InsertFolder(folder.clone()));
        self.unit_of_work
            .commit(changes)
            .await
            .map_err(operation_failed(ctx, op))?;

        info!(
            actor_id = %ctx.actor_id,
            folder_id = %folder.id,
            owner_type = ?folder.owner_type,
            order = folder.order,
            "Folder created"
        );

        Ok(folder)
    }

    /// Rename an active folder.
    pub async fn rename(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        req: RenameFolderRequest,
    ) -> LifecycleResult<Folder> {
        let op = LifecycleOperation::Update;
        let req = req.trimmed();
        req.validate()
            .map_err(|e| LifecycleError::InvalidFolderName {
                reason: e.to_string(),
            })?;

        let folder = self.load_active(ctx, folder_id, op).await?;
        self.require_permission(ctx, &folder, op).await?;

        if folder.name == req.name {
            return Ok(folder);
        }

        let old_name = folder.name.clone();
        let renamed = Folder {
            name: req.name,
            updated_at: Utc::now(),
            ..folder
        };

        let mut changes = ChangeSet::new();
        changes.push(Change::UpdateFolder(renamed.clone()));
        self.unit_of_work
            .commit(changes)
            .await
            .map_err(operation_failed(ctx, op))?;

        info!(
            actor_id = %ctx.actor_id,
            folder_id = %folder_id,
            old_name = %old_name,
            new_name = %renamed.name,
            "Folder renamed"
        );

        Ok(renamed)
    }

    /// Move an active folder to position `req.order` among its active
    /// siblings and renumber them densely from zero.
    ///
    /// Returns the siblings in their new order.
    pub async fn reorder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        req: ReorderFolderRequest,
    ) -> LifecycleResult<Vec<Folder>> {
        let op = LifecycleOperation::Update;
        req.validate()
            .map_err(|e| LifecycleError::InvalidFolderOrder {
                reason: e.to_string(),
            })?;

        let folder = self.load_active(ctx, folder_id, op).await?;
        self.require_permission(ctx, &folder, op).await?;

        let mut siblings: Vec<Folder> = self
            .folders
            .find_active_siblings(folder.owner(), folder.parent_id)
            .await
            .map_err(operation_failed(ctx, op))?
            .into_iter()
            .filter(|f| f.id != folder_id)
            .collect();
        let position = usize::try_from(req.order)
            .unwrap_or(0)
            .min(siblings.len());
        siblings.insert(position, folder);

        let now = Utc::now();
        let mut changes = ChangeSet::new();
        for (index, sibling) in siblings.iter_mut().enumerate() {
            let order = i32::try_from(index).unwrap_or(i32::MAX);
            if sibling.order != order {
                sibling.order = order;
                sibling.updated_at = now;
                changes.push(Change::UpdateFolder(sibling.clone()));
            }
        }

        let moved = changes.len();
        self.unit_of_work
            .commit(changes)
            .await
            .map_err(operation_failed(ctx, op))?;

        info!(
            actor_id = %ctx.actor_id,
            folder_id = %folder_id,
            position,
            renumbered = moved,
            "Folder reordered"
        );

        Ok(siblings)
    }

    async fn load_active(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        op: LifecycleOperation,
    ) -> LifecycleResult<Folder> {
        let folder = self
            .folders
            .find_by_id(folder_id)
            .await
            .map_err(operation_failed(ctx, op))?
            .ok_or(LifecycleError::FolderNotFound { folder_id })?;
        if folder.status != FolderStatus::Active {
            return Err(LifecycleError::FolderNotActive {
                folder_id,
                status: folder.status,
            });
        }
        Ok(folder)
    }

    async fn require_permission(
        &self,
        ctx: &RequestContext,
        folder: &Folder,
        op: LifecycleOperation,
    ) -> LifecycleResult<()> {
        let allowed = self
            .permissions
            .has_permission_to_update_folder(folder, ctx.actor_id)
            .await
            .map_err(operation_failed(ctx, op))?;
        if !allowed {
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
}
