//! In-memory fixtures shared by the service tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use lessonhub_core::error::AppError;
use lessonhub_core::result::AppResult;
use lessonhub_core::types::{
    ApprovalId, ClassroomId, FolderId, FolderLessonMaterialId, LessonMaterialId, QuestionId,
    SchoolId, UserId,
};
use lessonhub_database::{ChangeSet, MemoryStore, Repositories, UnitOfWork};
use lessonhub_entity::classroom::{Classroom, ClassroomStatus};
use lessonhub_entity::folder::{Folder, FolderLessonMaterial, FolderOwner, FolderStatus};
use lessonhub_entity::lesson_material::{
    ContentType, LessonMaterial, LessonMaterialApproval, LessonMaterialQuestion,
    LessonMaterialStatus,
};
use lessonhub_entity::user::ApplicationUser;

use crate::LessonHubServices;
use crate::context::RequestContext;

/// Unit of work whose commits always fail.
pub(crate) struct FailingUnitOfWork;

#[async_trait]
impl UnitOfWork for FailingUnitOfWork {
    async fn commit(&self, _changes: ChangeSet) -> AppResult<()> {
        Err(AppError::database("connection reset by peer"))
    }
}

pub(crate) struct Fixture {
    pub store: MemoryStore,
    pub services: LessonHubServices,
}

impl Fixture {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let services = LessonHubServices::new(&Repositories::memory(store.clone()));
        Self { store, services }
    }

    /// Services over the same data whose commits fail.
    pub fn failing_services(&self) -> LessonHubServices {
        let mut repos = Repositories::memory(self.store.clone());
        repos.unit_of_work = Arc::new(FailingUnitOfWork);
        LessonHubServices::new(&repos)
    }

    pub fn ctx(&self, actor_id: UserId) -> RequestContext {
        RequestContext::new(actor_id)
    }

    pub async fn user(&self, roles: &[&str], school_id: Option<SchoolId>) -> UserId {
        let user = ApplicationUser {
            id: UserId::new(),
            display_name: format!("user with {roles:?}"),
            email: None,
            school_id,
            created_at: Utc::now(),
        };
        let id = user.id;
        self.store.insert_user(user, roles).await;
        id
    }

    pub async fn classroom(&self, teacher_id: UserId, school_id: SchoolId) -> ClassroomId {
        let classroom = Classroom {
            id: ClassroomId::new(),
            name: "Class".into(),
            teacher_id,
            school_id,
            status: ClassroomStatus::Active,
            created_at: Utc::now(),
        };
        let id = classroom.id;
        self.store.insert_classroom(classroom).await;
        id
    }

    pub async fn folder(&self, owner: FolderOwner, status: FolderStatus) -> FolderId {
        self.child_folder(owner, None, status, 0).await
    }

    pub async fn personal_folder(&self, owner: UserId, status: FolderStatus) -> FolderId {
        self.folder(FolderOwner::Personal(owner), status).await
    }

    pub async fn child_folder(
        &self,
        owner: FolderOwner,
        parent_id: Option<FolderId>,
        status: FolderStatus,
        order: i32,
    ) -> FolderId {
        let mut folder = Folder::new(owner, format!("Folder {order}"), parent_id, order);
        folder.status = status;
        let id = folder.id;
        self.store.insert_folder(folder).await;
        id
    }

    pub async fn material(&self, creator: UserId, status: LessonMaterialStatus) -> LessonMaterialId {
        let mut material = LessonMaterial::new(
            "Material".into(),
            ContentType::Document,
            "s3://lessons/material.pdf".into(),
            creator,
            None,
        );
        material.status = status;
        let id = material.id;
        self.store.insert_lesson_material(material).await;
        id
    }

    pub async fn link(
        &self,
        folder_id: FolderId,
        material_id: LessonMaterialId,
    ) -> FolderLessonMaterialId {
        let link = FolderLessonMaterial::new(folder_id, material_id, Some(0));
        let id = link.id;
        self.store.insert_link(link).await;
        id
    }

    pub async fn feedback(&self, material_id: LessonMaterialId, author: UserId) {
        self.store
            .insert_question(LessonMaterialQuestion {
                id: QuestionId::new(),
                lesson_material_id: material_id,
                author_id: author,
                content: "Why?".into(),
                created_at: Utc::now(),
            })
            .await;
        self.store
            .insert_approval(LessonMaterialApproval {
                id: ApprovalId::new(),
                lesson_material_id: material_id,
                reviewer_id: author,
                approved: true,
                comment: None,
                created_at: Utc::now(),
            })
            .await;
    }

    pub async fn folder_status(&self, id: FolderId) -> Option<FolderStatus> {
        self.store.folder(id).await.map(|f| f.status)
    }

    pub async fn material_status(&self, id: LessonMaterialId) -> Option<LessonMaterialStatus> {
        self.store.lesson_material(id).await.map(|m| m.status)
    }

    pub async fn links_of(&self, material_id: LessonMaterialId) -> Vec<FolderLessonMaterial> {
        self.store
            .all_links()
            .await
            .into_iter()
            .filter(|l| l.lesson_material_id == material_id)
            .collect()
    }
}
