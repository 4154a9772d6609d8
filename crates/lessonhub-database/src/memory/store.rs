//! In-memory implementation of every repository and the unit of work.
//!
//! All tables sit behind one Tokio `RwLock`. A commit applies its change
//! set to a scratch copy and swaps it in only when every change succeeded.
//! Suitable for tests and single-process runs only.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use lessonhub_core::error::AppError;
use lessonhub_core::result::AppResult;
use lessonhub_core::types::{
    ApprovalId, ClassroomId, FolderId, FolderLessonMaterialId, LessonMaterialId, QuestionId,
    UserId,
};
use lessonhub_entity::classroom::Classroom;
use lessonhub_entity::folder::{Folder, FolderLessonMaterial, FolderOwner, FolderStatus};
use lessonhub_entity::lesson_material::{
    LessonMaterial, LessonMaterialApproval, LessonMaterialQuestion, LessonMaterialStatus,
};
use lessonhub_entity::user::ApplicationUser;

use crate::repositories::{
    ClassroomRepository, FolderLinkRepository, FolderRepository, LessonMaterialRepository,
    UserRepository,
};
use crate::unit_of_work::{Change, ChangeSet, UnitOfWork};

#[derive(Debug, Clone, Default)]
struct Tables {
    users: BTreeMap<UserId, ApplicationUser>,
    roles: HashMap<UserId, Vec<String>>,
    classrooms: BTreeMap<ClassroomId, Classroom>,
    folders: BTreeMap<FolderId, Folder>,
    lesson_materials: BTreeMap<LessonMaterialId, LessonMaterial>,
    links: BTreeMap<FolderLessonMaterialId, FolderLessonMaterial>,
    questions: BTreeMap<QuestionId, LessonMaterialQuestion>,
    approvals: BTreeMap<ApprovalId, LessonMaterialApproval>,
}

impl Tables {
    fn apply(&mut self, change: Change) -> AppResult<()> {
        match change {
            Change::InsertFolder(folder) => {
                if self.folders.contains_key(&folder.id) {
                    return Err(AppError::conflict(format!(
                        "Folder {} already exists",
                        folder.id
                    )));
                }
                self.folders.insert(folder.id, folder);
            }
            Change::UpdateFolder(folder) => {
                let existing = self.folders.get_mut(&folder.id).ok_or_else(|| {
                    AppError::conflict(format!("Folder {} no longer exists", folder.id))
                })?;
                existing.name = folder.name;
                existing.order = folder.order;
                existing.parent_id = folder.parent_id;
                existing.status = folder.status;
                existing.updated_at = folder.updated_at;
            }
            Change::RemoveFolder(folder_id) => {
                self.folders.remove(&folder_id);
                self.links.retain(|_, link| link.folder_id != folder_id);
                for child in self.folders.values_mut() {
                    if child.parent_id == Some(folder_id) {
                        child.parent_id = None;
                    }
                }
            }
            Change::InsertLink(link) => {
                if !self.folders.contains_key(&link.folder_id) {
                    return Err(AppError::conflict(format!(
                        "Folder {} no longer exists",
                        link.folder_id
                    )));
                }
                if !self.lesson_materials.contains_key(&link.lesson_material_id) {
                    return Err(AppError::conflict(format!(
                        "Lesson material {} no longer exists",
                        link.lesson_material_id
                    )));
                }
                if self.links.values().any(|l| {
                    l.folder_id == link.folder_id && l.lesson_material_id == link.lesson_material_id
                }) {
                    return Err(AppError::conflict(format!(
                        "Lesson material {} is already linked to folder {}",
                        link.lesson_material_id, link.folder_id
                    )));
                }
                self.links.insert(link.id, link);
            }
            Change::RemoveLink(link_id) => {
                self.links.remove(&link_id);
            }
            Change::DeactivateLessonMaterial { id, by_folder } => {
                let material = self.material_mut(id)?;
                material.status = LessonMaterialStatus::Deleted;
                material.deactivated_by_folder_id = by_folder;
                material.updated_at = Utc::now();
            }
            Change::ReactivateLessonMaterial(id) => {
                let material = self.material_mut(id)?;
                material.status = LessonMaterialStatus::Active;
                material.deactivated_by_folder_id = None;
                material.updated_at = Utc::now();
            }
            Change::PurgeLessonMaterial(id) => {
                self.questions.retain(|_, q| q.lesson_material_id != id);
                self.approvals.retain(|_, a| a.lesson_material_id != id);
                self.links.retain(|_, l| l.lesson_material_id != id);
                self.lesson_materials.remove(&id);
            }
        }
        Ok(())
    }

    fn material_mut(&mut self, id: LessonMaterialId) -> AppResult<&mut LessonMaterial> {
        self.lesson_materials
            .get_mut(&id)
            .ok_or_else(|| AppError::conflict(format!("Lesson material {id} no longer exists")))
    }
}

/// Process-local store implementing every repository trait.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user with raw role names.
    pub async fn insert_user(&self, user: ApplicationUser, roles: &[&str]) {
        let mut tables = self.tables.write().await;
        tables
            .roles
            .insert(user.id, roles.iter().map(|r| r.to_string()).collect());
        tables.users.insert(user.id, user);
    }

    /// Seed a classroom.
    pub async fn insert_classroom(&self, classroom: Classroom) {
        self.tables
            .write()
            .await
            .classrooms
            .insert(classroom.id, classroom);
    }

    /// Seed a folder.
    pub async fn insert_folder(&self, folder: Folder) {
        self.tables.write().await.folders.insert(folder.id, folder);
    }

    /// Seed a lesson material.
    pub async fn insert_lesson_material(&self, material: LessonMaterial) {
        self.tables
            .write()
            .await
            .lesson_materials
            .insert(material.id, material);
    }

    /// Seed a folder link.
    pub async fn insert_link(&self, link: FolderLessonMaterial) {
        self.tables.write().await.links.insert(link.id, link);
    }

    /// Seed a question.
    pub async fn insert_question(&self, question: LessonMaterialQuestion) {
        self.tables
            .write()
            .await
            .questions
            .insert(question.id, question);
    }

    /// Seed an approval.
    pub async fn insert_approval(&self, approval: LessonMaterialApproval) {
        self.tables
            .write()
            .await
            .approvals
            .insert(approval.id, approval);
    }

    /// Snapshot of a folder row.
    pub async fn folder(&self, id: FolderId) -> Option<Folder> {
        self.tables.read().await.folders.get(&id).cloned()
    }

    /// Snapshot of a lesson material row.
    pub async fn lesson_material(&self, id: LessonMaterialId) -> Option<LessonMaterial> {
        self.tables.read().await.lesson_materials.get(&id).cloned()
    }

    /// Snapshot of every link row.
    pub async fn all_links(&self) -> Vec<FolderLessonMaterial> {
        self.tables.read().await.links.values().cloned().collect()
    }

    /// Number of question rows referencing a material.
    pub async fn question_count(&self, id: LessonMaterialId) -> usize {
        self.tables
            .read()
            .await
            .questions
            .values()
            .filter(|q| q.lesson_material_id == id)
            .count()
    }

    /// Number of approval rows referencing a material.
    pub async fn approval_count(&self, id: LessonMaterialId) -> usize {
        self.tables
            .read()
            .await
            .approvals
            .values()
            .filter(|a| a.lesson_material_id == id)
            .count()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<ApplicationUser>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn roles_for_user(&self, id: UserId) -> AppResult<Vec<String>> {
        Ok(self
            .tables
            .read()
            .await
            .roles
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl ClassroomRepository for MemoryStore {
    async fn find_by_id(&self, id: ClassroomId) -> AppResult<Option<Classroom>> {
        Ok(self.tables.read().await.classrooms.get(&id).cloned())
    }
}

#[async_trait]
impl FolderRepository for MemoryStore {
    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        Ok(self.tables.read().await.folders.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[FolderId]) -> AppResult<Vec<Folder>> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.folders.get(id).cloned())
            .collect())
    }

    async fn find_archived_personal(&self, owner: UserId) -> AppResult<Vec<Folder>> {
        Ok(self
            .tables
            .read()
            .await
            .folders
            .values()
            .filter(|f| f.is_personal_of(owner) && f.status == FolderStatus::Archived)
            .cloned()
            .collect())
    }

    async fn find_active_siblings(
        &self,
        owner: FolderOwner,
        parent_id: Option<FolderId>,
    ) -> AppResult<Vec<Folder>> {
        let mut siblings: Vec<Folder> = self
            .tables
            .read()
            .await
            .folders
            .values()
            .filter(|f| {
                f.owner() == owner && f.parent_id == parent_id && f.status == FolderStatus::Active
            })
            .cloned()
            .collect();
        siblings.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
        Ok(siblings)
    }

    async fn max_order(
        &self,
        owner: FolderOwner,
        parent_id: Option<FolderId>,
    ) -> AppResult<Option<i32>> {
        Ok(self
            .tables
            .read()
            .await
            .folders
            .values()
            .filter(|f| f.owner() == owner && f.parent_id == parent_id)
            .map(|f| f.order)
            .max())
    }
}

#[async_trait]
impl LessonMaterialRepository for MemoryStore {
    async fn find_by_id(&self, id: LessonMaterialId) -> AppResult<Option<LessonMaterial>> {
        Ok(self.tables.read().await.lesson_materials.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[LessonMaterialId]) -> AppResult<Vec<LessonMaterial>> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.lesson_materials.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl FolderLinkRepository for MemoryStore {
    async fn find_by_folder(&self, folder_id: FolderId) -> AppResult<Vec<FolderLessonMaterial>> {
        Ok(self
            .tables
            .read()
            .await
            .links
            .values()
            .filter(|l| l.folder_id == folder_id)
            .cloned()
            .collect())
    }

    async fn find_by_material(
        &self,
        lesson_material_id: LessonMaterialId,
    ) -> AppResult<Vec<FolderLessonMaterial>> {
        Ok(self
            .tables
            .read()
            .await
            .links
            .values()
            .filter(|l| l.lesson_material_id == lesson_material_id)
            .cloned()
            .collect())
    }

    async fn count_links_excluding(
        &self,
        lesson_material_id: LessonMaterialId,
        excluded: &[FolderLessonMaterialId],
    ) -> AppResult<u64> {
        let count = self
            .tables
            .read()
            .await
            .links
            .values()
            .filter(|l| l.lesson_material_id == lesson_material_id && !excluded.contains(&l.id))
            .count();
        Ok(count as u64)
    }

    async fn count_active_folder_links_excluding(
        &self,
        lesson_material_id: LessonMaterialId,
        excluded: &[FolderId],
    ) -> AppResult<u64> {
        let tables = self.tables.read().await;
        let count = tables
            .links
            .values()
            .filter(|l| l.lesson_material_id == lesson_material_id)
            .filter(|l| !excluded.contains(&l.folder_id))
            .filter(|l| {
                tables
                    .folders
                    .get(&l.folder_id)
                    .is_some_and(|f| f.status == FolderStatus::Active)
            })
            .count();
        Ok(count as u64)
    }

    async fn max_order(&self, folder_id: FolderId) -> AppResult<Option<i32>> {
        Ok(self
            .tables
            .read()
            .await
            .links
            .values()
            .filter(|l| l.folder_id == folder_id)
            .filter_map(|l| l.order)
            .max())
    }
}

#[async_trait]
impl UnitOfWork for MemoryStore {
    async fn commit(&self, changes: ChangeSet) -> AppResult<()> {
        let staged = changes.len();
        let mut tables = self.tables.write().await;
        let mut scratch = tables.clone();
        for change in changes {
            scratch.apply(change)?;
        }
        *tables = scratch;
        debug!(changes = staged, "Committed change set to memory store");
        Ok(())
    }
}
