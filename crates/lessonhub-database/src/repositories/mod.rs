//! Repository interfaces consumed by the lifecycle engine.
//!
//! Reads only. Every mutation is staged in a
//! [`ChangeSet`](crate::unit_of_work::ChangeSet) and applied by a
//! [`UnitOfWork`](crate::unit_of_work::UnitOfWork).

use async_trait::async_trait;

use lessonhub_core::result::AppResult;
use lessonhub_core::types::{
    ClassroomId, FolderId, FolderLessonMaterialId, LessonMaterialId, UserId,
};
use lessonhub_entity::classroom::Classroom;
use lessonhub_entity::folder::{Folder, FolderLessonMaterial, FolderOwner};
use lessonhub_entity::lesson_material::LessonMaterial;
use lessonhub_entity::user::ApplicationUser;

/// Identity and role lookup.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Find a user by ID.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<ApplicationUser>>;

    /// Raw role names assigned to a user.
    async fn roles_for_user(&self, id: UserId) -> AppResult<Vec<String>>;
}

/// Classroom lookup.
#[async_trait]
pub trait ClassroomRepository: Send + Sync + 'static {
    /// Find a classroom by ID.
    async fn find_by_id(&self, id: ClassroomId) -> AppResult<Option<Classroom>>;
}

/// Folder queries.
#[async_trait]
pub trait FolderRepository: Send + Sync + 'static {
    /// Find a folder by ID.
    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>>;

    /// Find every folder whose ID is in `ids`. Unknown IDs are skipped.
    async fn find_by_ids(&self, ids: &[FolderId]) -> AppResult<Vec<Folder>>;

    /// All archived personal folders owned by a user.
    async fn find_archived_personal(&self, owner: UserId) -> AppResult<Vec<Folder>>;

    /// Active folders with the given owner and parent, by ascending order.
    async fn find_active_siblings(
        &self,
        owner: FolderOwner,
        parent_id: Option<FolderId>,
    ) -> AppResult<Vec<Folder>>;

    /// Highest `order` among folders with the given owner and parent.
    async fn max_order(
        &self,
        owner: FolderOwner,
        parent_id: Option<FolderId>,
    ) -> AppResult<Option<i32>>;
}

/// Lesson material queries.
#[async_trait]
pub trait LessonMaterialRepository: Send + Sync + 'static {
    /// Find a lesson material by ID.
    async fn find_by_id(&self, id: LessonMaterialId) -> AppResult<Option<LessonMaterial>>;

    /// Find every material whose ID is in `ids`. Unknown IDs are skipped.
    async fn find_by_ids(&self, ids: &[LessonMaterialId]) -> AppResult<Vec<LessonMaterial>>;
}

/// Folder ↔ lesson material link queries.
#[async_trait]
pub trait FolderLinkRepository: Send + Sync + 'static {
    /// Links pointing at a folder.
    async fn find_by_folder(&self, folder_id: FolderId) -> AppResult<Vec<FolderLessonMaterial>>;

    /// Links pointing at a lesson material.
    async fn find_by_material(
        &self,
        lesson_material_id: LessonMaterialId,
    ) -> AppResult<Vec<FolderLessonMaterial>>;

    /// Number of links to a material, ignoring the `excluded` link IDs.
    async fn count_links_excluding(
        &self,
        lesson_material_id: LessonMaterialId,
        excluded: &[FolderLessonMaterialId],
    ) -> AppResult<u64>;

    /// Number of links to a material from *active* folders, ignoring the
    /// `excluded` folders.
    async fn count_active_folder_links_excluding(
        &self,
        lesson_material_id: LessonMaterialId,
        excluded: &[FolderId],
    ) -> AppResult<u64>;

    /// Highest link `order` inside a folder.
    async fn max_order(&self, folder_id: FolderId) -> AppResult<Option<i32>>;
}
