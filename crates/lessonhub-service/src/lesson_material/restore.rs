//! Direct restore of deleted lesson materials into a personal folder.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use lessonhub_auth::{FolderPermissionChecker, can_restore_lesson_material};
use lessonhub_core::types::{FolderId, LessonMaterialId};
use lessonhub_database::{
    Change, ChangeSet, FolderLinkRepository, FolderRepository, LessonMaterialRepository,
    UnitOfWork,
};
use lessonhub_entity::folder::{FolderLessonMaterial, FolderStatus};
use lessonhub_entity::lesson_material::LessonMaterialStatus;

use crate::context::RequestContext;
use crate::error::{LifecycleError, LifecycleOperation, LifecycleResult, operation_failed};

/// Result of a direct restore.
#[derive(Debug, Clone, Serialize)]
pub struct MaterialRestoreOutcome {
    /// The target folder.
    pub folder_id: FolderId,
    /// Materials set back to `Active`.
    pub restored: Vec<LessonMaterialId>,
    /// Links created at the target folder.
    pub links_created: usize,
    /// Stale links to other folders removed.
    pub links_removed: usize,
}

/// Reattaches deleted lesson materials to one active personal folder.
#[derive(Clone)]
pub struct LessonMaterialRestoreService {
    folders: Arc<dyn FolderRepository>,
    lesson_materials: Arc<dyn LessonMaterialRepository>,
    links: Arc<dyn FolderLinkRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
    permissions: FolderPermissionChecker,
}

impl std::fmt::Debug for LessonMaterialRestoreService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LessonMaterialRestoreService").finish()
    }
}

impl LessonMaterialRestoreService {
    /// Creates a new lesson material restore service.
    pub fn new(
        folders: Arc<dyn FolderRepository>,
        lesson_materials: Arc<dyn LessonMaterialRepository>,
        links: Arc<dyn FolderLinkRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
        permissions: FolderPermissionChecker,
    ) -> Self {
        Self {
            folders,
            lesson_materials,
            links,
            unit_of_work,
            permissions,
        }
    }

    /// Reactivate the deleted materials among `material_ids` and link each
    /// of them to `folder_id` only.
    ///
    /// Ids that are unknown or not deleted are ignored; if none remain the
    /// call fails with [`LifecycleError::LessonMaterialNotFound`].
    pub async fn restore(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        material_ids: &[LessonMaterialId],
    ) -> LifecycleResult<MaterialRestoreOutcome> {
        let op = LifecycleOperation::RestoreLessonMaterials;

        let actor = self
            .permissions
            .load_actor(ctx.actor_id)
            .await
            .map_err(operation_failed(ctx, op))?;

        let folder = self
            .folders
            .find_by_id(folder_id)
            .await
            .map_err(operation_failed(ctx, op))?
            .ok_or(LifecycleError::FolderNotFound { folder_id })?;
        if !folder.is_personal() {
            return Err(LifecycleError::FolderMustBePersonal { folder_id });
        }
        if folder.status != FolderStatus::Active {
            return Err(LifecycleError::FolderNotActive {
                folder_id,
                status: folder.status,
            });
        }

        let Some(actor) = actor else {
            warn!(actor_id = %ctx.actor_id, folder_id = %folder_id, "Unknown actor");
            return Err(LifecycleError::forbidden_folder(ctx.actor_id, folder_id));
        };
        let access = self
            .permissions
            .resolve_for_actor(&folder, &actor)
            .await
            .map_err(operation_failed(ctx, op))?;
        if !access.is_granted() {
            warn!(actor_id = %ctx.actor_id, folder_id = %folder_id, "Folder access denied");
            return Err(LifecycleError::forbidden_folder(ctx.actor_id, folder_id));
        }

        let ids: Vec<LessonMaterialId> = material_ids
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let materials: Vec<_> = self
            .lesson_materials
            .find_by_ids(&ids)
            .await
            .map_err(operation_failed(ctx, op))?
            .into_iter()
            .filter(|m| m.status == LessonMaterialStatus::Deleted)
            .collect();
        if materials.is_empty() {
            return Err(LifecycleError::LessonMaterialNotFound);
        }

        if let Some(denied) = materials
            .iter()
            .find(|m| !can_restore_lesson_material(&actor, m))
        {
            warn!(
                actor_id = %ctx.actor_id,
                lesson_material_id = %denied.id,
                "Lesson material restore denied"
            );
            return Err(LifecycleError::Forbidden {
                actor_id: ctx.actor_id,
                target: format!("lesson material {}", denied.id),
            });
        }

        let mut next_order = self
            .links
            .max_order(folder_id)
            .await
            .map_err(operation_failed(ctx, op))?
            .map_or(0, |max| max + 1);

        let mut changes = ChangeSet::new();
        let mut outcome = MaterialRestoreOutcome {
            folder_id,
            restored: Vec::with_capacity(materials.len()),
            links_created: 0,
            links_removed: 0,
        };

        for material in &materials {
            changes.push(Change::ReactivateLessonMaterial(material.id));
            outcome.restored.push(material.id);

            let mut linked_here = false;
            for link in self
                .links
                .find_by_material(material.id)
                .await
                .map_err(operation_failed(ctx, op))?
            {
                if link.folder_id == folder_id {
                    linked_here = true;
                } else {
                    debug!(
                        lesson_material_id = %material.id,
                        stale_folder_id = %link.folder_id,
                        "Removing stale link"
                    );
                    changes.push(Change::RemoveLink(link.id));
                    outcome.links_removed += 1;
                }
            }

            if !linked_here {
                changes.push(Change::InsertLink(FolderLessonMaterial::new(
                    folder_id,
                    material.id,
                    Some(next_order),
                )));
                next_order += 1;
                outcome.links_created += 1;
            }
        }

        self.unit_of_work
            .commit(changes)
            .await
            .map_err(operation_failed(ctx, op))?;

        info!(
            actor_id = %ctx.actor_id,
            folder_id = %folder_id,
            restored = outcome.restored.len(),
            links_created = outcome.links_created,
            links_removed = outcome.links_removed,
            "Lesson materials restored"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use lessonhub_core::types::{SchoolId, UserId};
    use lessonhub_entity::folder::FolderOwner;

    use crate::error::LifecycleErrorKind;
    use crate::test_support::Fixture;

    use super::*;

    #[tokio::test]
    async fn test_restore_moves_material_into_target() {
        let fx = Fixture::new();
        let owner = fx.user(&["Teacher"], None).await;
        let target = fx.personal_folder(owner, FolderStatus::Active).await;
        let old_home = fx.personal_folder(owner, FolderStatus::Archived).await;
        let material = fx.material(owner, LessonMaterialStatus::Deleted).await;
        fx.link(old_home, material).await;

        let outcome = fx
            .services
            .lesson_materials
            .restore(&fx.ctx(owner), target, &[material])
            .await
            .unwrap();

        assert_eq!(outcome.restored, vec![material]);
        assert_eq!(outcome.links_created, 1);
        assert_eq!(outcome.links_removed, 1);
        assert_eq!(
            fx.material_status(material).await,
            Some(LessonMaterialStatus::Active)
        );
        let links = fx.links_of(material).await;
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].folder_id, target);
    }

    #[tokio::test]
    async fn test_restore_keeps_existing_target_link() {
        let fx = Fixture::new();
        let owner = fx.user(&["Teacher"], None).await;
        let target = fx.personal_folder(owner, FolderStatus::Active).await;
        let material = fx.material(owner, LessonMaterialStatus::Deleted).await;
        let existing = fx.link(target, material).await;

        let outcome = fx
            .services
            .lesson_materials
            .restore(&fx.ctx(owner), target, &[material, material])
            .await
            .unwrap();

        assert_eq!(outcome.restored.len(), 1);
        assert_eq!(outcome.links_created, 0);
        let links = fx.links_of(material).await;
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].id, existing);
    }

    #[tokio::test]
    async fn test_restore_appends_links_in_order() {
        let fx = Fixture::new();
        let owner = fx.user(&["Teacher"], None).await;
        let target = fx.personal_folder(owner, FolderStatus::Active).await;
        let present = fx.material(owner, LessonMaterialStatus::Active).await;
        fx.link(target, present).await;
        let m1 = fx.material(owner, LessonMaterialStatus::Deleted).await;
        let m2 = fx.material(owner, LessonMaterialStatus::Deleted).await;

        fx.services
            .lesson_materials
            .restore(&fx.ctx(owner), target, &[m1, m2])
            .await
            .unwrap();

        let mut orders = Vec::new();
        for id in [m1, m2] {
            let links = fx.links_of(id).await;
            assert_eq!(links.len(), 1);
            orders.push(links[0].order);
        }
        orders.sort();
        assert_eq!(orders, vec![Some(1), Some(2)]);
    }

    #[tokio::test]
    async fn test_restore_ignores_active_and_unknown_ids() {
        let fx = Fixture::new();
        let owner = fx.user(&["Teacher"], None).await;
        let target = fx.personal_folder(owner, FolderStatus::Active).await;
        let active = fx.material(owner, LessonMaterialStatus::Active).await;

        let err = fx
            .services
            .lesson_materials
            .restore(&fx.ctx(owner), target, &[active, LessonMaterialId::new()])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "LESSON_MATERIAL_NOT_FOUND");
        assert_eq!(err.kind(), LifecycleErrorKind::NotFound);

        let err = fx
            .services
            .lesson_materials
            .restore(&fx.ctx(owner), target, &[])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "LESSON_MATERIAL_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_restore_target_must_be_active_personal() {
        let fx = Fixture::new();
        let school = SchoolId::new();
        let owner = fx.user(&["Teacher"], Some(school)).await;
        let classroom = fx.classroom(owner, school).await;
        let class = fx
            .folder(FolderOwner::Class(classroom), FolderStatus::Active)
            .await;
        let archived = fx.personal_folder(owner, FolderStatus::Archived).await;
        let material = fx.material(owner, LessonMaterialStatus::Deleted).await;
        let ctx = fx.ctx(owner);

        let err = fx
            .services
            .lesson_materials
            .restore(&ctx, class, &[material])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "FOLDER_MUST_BE_PERSONAL");

        let err = fx
            .services
            .lesson_materials
            .restore(&ctx, archived, &[material])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "FOLDER_NOT_ACTIVE");

        let err = fx
            .services
            .lesson_materials
            .restore(&ctx, FolderId::new(), &[material])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "FOLDER_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_restore_requires_creator_or_admin() {
        let fx = Fixture::new();
        let owner = fx.user(&["Teacher"], None).await;
        let author = fx.user(&["Teacher"], None).await;
        let admin = fx.user(&["SystemAdmin"], None).await;
        let target = fx.personal_folder(owner, FolderStatus::Active).await;
        let foreign = fx.material(author, LessonMaterialStatus::Deleted).await;

        let err = fx
            .services
            .lesson_materials
            .restore(&fx.ctx(owner), target, &[foreign])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "FORBIDDEN");
        assert_eq!(
            fx.material_status(foreign).await,
            Some(LessonMaterialStatus::Deleted)
        );

        fx.services
            .lesson_materials
            .restore(&fx.ctx(admin), target, &[foreign])
            .await
            .unwrap();
        assert_eq!(
            fx.material_status(foreign).await,
            Some(LessonMaterialStatus::Active)
        );
    }

    #[tokio::test]
    async fn test_restore_into_foreign_folder_is_forbidden() {
        let fx = Fixture::new();
        let owner = fx.user(&["Teacher"], None).await;
        let intruder = fx.user(&["Teacher"], None).await;
        let target = fx.personal_folder(owner, FolderStatus::Active).await;
        let material = fx.material(intruder, LessonMaterialStatus::Deleted).await;

        let err = fx
            .services
            .lesson_materials
            .restore(&fx.ctx(intruder), target, &[material])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "FORBIDDEN");

        let err = fx
            .services
            .lesson_materials
            .restore(&fx.ctx(UserId::new()), target, &[material])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), LifecycleErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_commit_failure_is_wrapped() {
        let fx = Fixture::new();
        let owner = fx.user(&["Teacher"], None).await;
        let target = fx.personal_folder(owner, FolderStatus::Active).await;
        let material = fx.material(owner, LessonMaterialStatus::Deleted).await;

        let err = fx
            .failing_services()
            .lesson_materials
            .restore(&fx.ctx(owner), target, &[material])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "LESSON_MATERIAL_RESTORE_FAILED");
        assert_eq!(
            fx.material_status(material).await,
            Some(LessonMaterialStatus::Deleted)
        );
    }
}
