//! Lesson material cascade for folder transitions.
//!
//! The resolver never writes. It reads links and materials, decides what
//! each material should become, and stages the result in the caller's
//! [`ChangeSet`].

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use lessonhub_core::result::AppResult;
use lessonhub_core::types::{FolderLessonMaterialId, LessonMaterialId};
use lessonhub_database::{Change, ChangeSet, FolderLinkRepository, LessonMaterialRepository};
use lessonhub_entity::folder::Folder;
use lessonhub_entity::lesson_material::LessonMaterial;

/// What a cascade staged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeOutcome {
    /// Materials flipped to `Deleted`.
    pub deactivated: usize,
    /// Materials flipped back to `Active`.
    pub reactivated: usize,
    /// Materials removed together with their questions and approvals.
    pub purged: usize,
    /// Folder links removed.
    pub links_removed: usize,
}

/// Computes lesson material effects of archive, restore and delete.
#[derive(Clone)]
pub struct CascadeResolver {
    links: Arc<dyn FolderLinkRepository>,
    lesson_materials: Arc<dyn LessonMaterialRepository>,
}

impl std::fmt::Debug for CascadeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CascadeResolver").finish()
    }
}

impl CascadeResolver {
    /// Creates a new cascade resolver.
    pub fn new(
        links: Arc<dyn FolderLinkRepository>,
        lesson_materials: Arc<dyn LessonMaterialRepository>,
    ) -> Self {
        Self {
            links,
            lesson_materials,
        }
    }

    /// Archive: deactivate every active material that no other active
    /// folder links, marking `folder` as the cause.
    pub async fn plan_archive(
        &self,
        folder: &Folder,
        changes: &mut ChangeSet,
    ) -> AppResult<CascadeOutcome> {
        let mut outcome = CascadeOutcome::default();

        for material in self.linked_materials(folder).await? {
            if !material.is_active() {
                debug!(lesson_material_id = %material.id, "Already deleted, left untouched");
                continue;
            }

            let other_homes = self
                .links
                .count_active_folder_links_excluding(material.id, &[folder.id])
                .await?;
            if other_homes > 0 {
                debug!(
                    lesson_material_id = %material.id,
                    other_homes,
                    "Still linked from active folders, kept active"
                );
                continue;
            }

            changes.push(Change::DeactivateLessonMaterial {
                id: material.id,
                by_folder: Some(folder.id),
            });
            outcome.deactivated += 1;
        }

        Ok(outcome)
    }

    /// Restore: reactivate every linked material that a folder archive
    /// deactivated, whichever folder that was. Materials deleted on their
    /// own carry no archive stamp and stay deleted.
    pub async fn plan_restore(
        &self,
        folder: &Folder,
        changes: &mut ChangeSet,
    ) -> AppResult<CascadeOutcome> {
        let mut outcome = CascadeOutcome::default();

        for material in self.linked_materials(folder).await? {
            if !material.deactivated_by_archive() {
                debug!(
                    lesson_material_id = %material.id,
                    status = %material.status,
                    "Not deactivated by an archive, left untouched"
                );
                continue;
            }
            if material.deactivated_by_folder_id != Some(folder.id) {
                debug!(
                    lesson_material_id = %material.id,
                    archived_by = ?material.deactivated_by_folder_id,
                    "Reactivating material archived through another folder"
                );
            }
            changes.push(Change::ReactivateLessonMaterial(material.id));
            outcome.reactivated += 1;
        }

        Ok(outcome)
    }

    /// Delete: remove every link of `folders`; purge materials of personal
    /// folders that have no link left outside the batch.
    ///
    /// Folder rows themselves are not staged here.
    pub async fn plan_delete(
        &self,
        folders: &[Folder],
        changes: &mut ChangeSet,
    ) -> AppResult<CascadeOutcome> {
        let mut outcome = CascadeOutcome::default();
        let mut removed: Vec<FolderLessonMaterialId> = Vec::new();
        let mut candidates: BTreeSet<LessonMaterialId> = BTreeSet::new();

        for folder in folders {
            for link in self.links.find_by_folder(folder.id).await? {
                if folder.is_personal() {
                    candidates.insert(link.lesson_material_id);
                }
                removed.push(link.id);
                changes.push(Change::RemoveLink(link.id));
                outcome.links_removed += 1;
            }
        }

        for material_id in candidates {
            let remaining = self
                .links
                .count_links_excluding(material_id, &removed)
                .await?;
            if remaining > 0 {
                debug!(
                    lesson_material_id = %material_id,
                    remaining,
                    "Still linked elsewhere, kept"
                );
                continue;
            }
            debug!(lesson_material_id = %material_id, "Orphaned, purging");
            changes.push(Change::PurgeLessonMaterial(material_id));
            outcome.purged += 1;
        }

        Ok(outcome)
    }

    async fn linked_materials(&self, folder: &Folder) -> AppResult<Vec<LessonMaterial>> {
        let ids: Vec<LessonMaterialId> = self
            .links
            .find_by_folder(folder.id)
            .await?
            .into_iter()
            .map(|link| link.lesson_material_id)
            .collect();
        self.lesson_materials.find_by_ids(&ids).await
    }
}

#[cfg(test)]
mod tests {
    use lessonhub_core::types::SchoolId;
    use lessonhub_database::{MemoryStore, Repositories};
    use lessonhub_entity::folder::{FolderOwner, FolderStatus};
    use lessonhub_entity::lesson_material::LessonMaterialStatus;

    use crate::test_support::Fixture;

    use super::*;

    fn resolver(store: &MemoryStore) -> CascadeResolver {
        let repos = Repositories::memory(store.clone());
        CascadeResolver::new(repos.links, repos.lesson_materials)
    }

    async fn load(fx: &Fixture, id: lessonhub_core::types::FolderId) -> Folder {
        fx.store.folder(id).await.unwrap()
    }

    #[tokio::test]
    async fn test_archive_ignores_links_from_archived_folders() {
        let fx = Fixture::new();
        let owner = fx.user(&["Teacher"], None).await;
        let folder = fx.personal_folder(owner, FolderStatus::Active).await;
        let parked = fx.personal_folder(owner, FolderStatus::Archived).await;
        let material = fx.material(owner, LessonMaterialStatus::Active).await;
        fx.link(folder, material).await;
        fx.link(parked, material).await;

        let mut changes = ChangeSet::new();
        let outcome = resolver(&fx.store)
            .plan_archive(&load(&fx, folder).await, &mut changes)
            .await
            .unwrap();

        assert_eq!(outcome.deactivated, 1);
        assert_eq!(
            changes.iter().next(),
            Some(&Change::DeactivateLessonMaterial {
                id: material,
                by_folder: Some(folder),
            })
        );
    }

    #[tokio::test]
    async fn test_restore_reactivates_material_archived_through_other_folder() {
        let fx = Fixture::new();
        let owner = fx.user(&["Teacher"], None).await;
        let folder = fx.personal_folder(owner, FolderStatus::Archived).await;
        let other = fx.personal_folder(owner, FolderStatus::Archived).await;
        let material = fx.material(owner, LessonMaterialStatus::Active).await;
        fx.link(folder, material).await;

        let mut row = fx.store.lesson_material(material).await.unwrap();
        row.status = LessonMaterialStatus::Deleted;
        row.deactivated_by_folder_id = Some(other);
        fx.store.insert_lesson_material(row).await;

        let mut changes = ChangeSet::new();
        let outcome = resolver(&fx.store)
            .plan_restore(&load(&fx, folder).await, &mut changes)
            .await
            .unwrap();

        assert_eq!(outcome.reactivated, 1);
        assert_eq!(
            changes.iter().next(),
            Some(&Change::ReactivateLessonMaterial(material))
        );
    }

    #[tokio::test]
    async fn test_restore_skips_independently_deleted_material() {
        let fx = Fixture::new();
        let owner = fx.user(&["Teacher"], None).await;
        let folder = fx.personal_folder(owner, FolderStatus::Archived).await;
        let material = fx.material(owner, LessonMaterialStatus::Deleted).await;
        fx.link(folder, material).await;

        let mut changes = ChangeSet::new();
        let outcome = resolver(&fx.store)
            .plan_restore(&load(&fx, folder).await, &mut changes)
            .await
            .unwrap();

        assert_eq!(outcome.reactivated, 0);
        assert!(changes.is_empty());
    }

    #[tokio::test]
    async fn test_delete_never_purges_through_class_folders() {
        let fx = Fixture::new();
        let school = SchoolId::new();
        let teacher = fx.user(&["Teacher"], Some(school)).await;
        let classroom = fx.classroom(teacher, school).await;
        let class = fx
            .folder(FolderOwner::Class(classroom), FolderStatus::Archived)
            .await;
        let material = fx.material(teacher, LessonMaterialStatus::Active).await;
        fx.link(class, material).await;

        let mut changes = ChangeSet::new();
        let outcome = resolver(&fx.store)
            .plan_delete(&[load(&fx, class).await], &mut changes)
            .await
            .unwrap();

        assert_eq!(outcome.links_removed, 1);
        assert_eq!(outcome.purged, 0);
        assert_eq!(changes.count(|c| matches!(c, Change::PurgeLessonMaterial(_))), 0);
    }

    #[tokio::test]
    async fn test_delete_counts_links_outside_batch() {
        let fx = Fixture::new();
        let owner = fx.user(&["Teacher"], None).await;
        let doomed = fx.personal_folder(owner, FolderStatus::Archived).await;
        let keeper = fx.personal_folder(owner, FolderStatus::Archived).await;
        let shared = fx.material(owner, LessonMaterialStatus::Deleted).await;
        let lonely = fx.material(owner, LessonMaterialStatus::Active).await;
        fx.link(doomed, shared).await;
        fx.link(keeper, shared).await;
        fx.link(doomed, lonely).await;

        let mut changes = ChangeSet::new();
        let outcome = resolver(&fx.store)
            .plan_delete(&[load(&fx, doomed).await], &mut changes)
            .await
            .unwrap();

        assert_eq!(outcome.links_removed, 2);
        assert_eq!(outcome.purged, 1);
        assert!(changes.iter().any(|c| *c == Change::PurgeLessonMaterial(lonely)));
        assert!(!changes.iter().any(|c| *c == Change::PurgeLessonMaterial(shared)));
    }
}
