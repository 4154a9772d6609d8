//! Shared test helpers for integration tests.

#![allow(dead_code)]

use chrono::Utc;

use lessonhub_core::types::{
    ApprovalId, ClassroomId, FolderId, LessonMaterialId, QuestionId, SchoolId, UserId,
};
use lessonhub_database::{MemoryStore, Repositories};
use lessonhub_entity::classroom::{Classroom, ClassroomStatus};
use lessonhub_entity::folder::{Folder, FolderLessonMaterial, FolderOwner, FolderStatus};
use lessonhub_entity::lesson_material::{
    ContentType, LessonMaterial, LessonMaterialApproval, LessonMaterialQuestion,
    LessonMaterialStatus,
};
use lessonhub_entity::user::ApplicationUser;
use lessonhub_service::{LessonHubServices, RequestContext};

/// Test application context over an in-memory store.
pub struct TestApp {
    /// Direct access to the rows.
    pub store: MemoryStore,
    /// Services under test.
    pub services: LessonHubServices,
}

impl TestApp {
    /// Create a new test application with empty tables.
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let services = LessonHubServices::new(&Repositories::memory(store.clone()));
        Self { store, services }
    }

    /// Request context for a user.
    pub fn as_user(&self, user_id: UserId) -> RequestContext {
        RequestContext::new(user_id)
    }

    /// Create a user holding the given role names.
    pub async fn create_user(&self, roles: &[&str], school_id: Option<SchoolId>) -> UserId {
        let user = ApplicationUser {
            id: UserId::new(),
            display_name: format!("{roles:?}"),
            email: None,
            school_id,
            created_at: Utc::now(),
        };
        let id = user.id;
        self.store.insert_user(user, roles).await;
        id
    }

    /// Create a classroom.
    pub async fn create_classroom(&self, teacher_id: UserId, school_id: SchoolId) -> ClassroomId {
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

    /// Create a top-level folder in the given status.
    pub async fn create_folder(&self, owner: FolderOwner, status: FolderStatus) -> FolderId {
        let mut folder = Folder::new(owner, "Folder".into(), None, 0);
        folder.status = status;
        let id = folder.id;
        self.store.insert_folder(folder).await;
        id
    }

    /// Create a lesson material in the given status.
    pub async fn create_material(
        &self,
        creator: UserId,
        status: LessonMaterialStatus,
    ) -> LessonMaterialId {
        let mut material = LessonMaterial::new(
            "Lesson".into(),
            ContentType::Video,
            "s3://lessons/lesson.mp4".into(),
            creator,
            None,
        );
        material.status = status;
        let id = material.id;
        self.store.insert_lesson_material(material).await;
        id
    }

    /// Link a material into a folder.
    pub async fn link(&self, folder_id: FolderId, material_id: LessonMaterialId) {
        self.store
            .insert_link(FolderLessonMaterial::new(folder_id, material_id, None))
            .await;
    }

    /// Attach one question and one approval to a material.
    pub async fn add_feedback(&self, material_id: LessonMaterialId, author: UserId) {
        self.store
            .insert_question(LessonMaterialQuestion {
                id: QuestionId::new(),
                lesson_material_id: material_id,
                author_id: author,
                content: "Is this on the exam?".into(),
                created_at: Utc::now(),
            })
            .await;
        self.store
            .insert_approval(LessonMaterialApproval {
                id: ApprovalId::new(),
                lesson_material_id: material_id,
                reviewer_id: author,
                approved: true,
                comment: Some("ok".into()),
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

    pub async fn folders_linking(&self, material_id: LessonMaterialId) -> Vec<FolderId> {
        self.store
            .all_links()
            .await
            .into_iter()
            .filter(|l| l.lesson_material_id == material_id)
            .map(|l| l.folder_id)
            .collect()
    }
}
