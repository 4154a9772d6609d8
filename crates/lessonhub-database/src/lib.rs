//! # lessonhub-database
//!
//! Narrow repository interfaces consumed by the lifecycle engine, the
//! [`ChangeSet`] commit boundary, and two backends: PostgreSQL through
//! `sqlx` and an in-memory store for tests and local runs.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod repositories;
pub mod unit_of_work;

use std::sync::Arc;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use repositories::{
    ClassroomRepository, FolderLinkRepository, FolderRepository, LessonMaterialRepository,
    UserRepository,
};
pub use unit_of_work::{Change, ChangeSet, UnitOfWork};

/// Every collaborator the lifecycle services need, behind trait objects.
#[derive(Clone)]
pub struct Repositories {
    /// Identity and role lookup.
    pub users: Arc<dyn UserRepository>,
    /// Classroom lookup.
    pub classrooms: Arc<dyn ClassroomRepository>,
    /// Folder reads.
    pub folders: Arc<dyn FolderRepository>,
    /// Lesson material reads.
    pub lesson_materials: Arc<dyn LessonMaterialRepository>,
    /// Folder link reads and counts.
    pub links: Arc<dyn FolderLinkRepository>,
    /// Commit boundary.
    pub unit_of_work: Arc<dyn UnitOfWork>,
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish()
    }
}

impl Repositories {
    /// Repositories backed by a single in-memory store.
    pub fn memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            users: store.clone(),
            classrooms: store.clone(),
            folders: store.clone(),
            lesson_materials: store.clone(),
            links: store.clone(),
            unit_of_work: store,
        }
    }

    /// Repositories backed by PostgreSQL.
    pub fn postgres(pool: &DatabasePool) -> Self {
        let pool = pool.pool().clone();
        Self {
            users: Arc::new(postgres::PgUserRepository::new(pool.clone())),
            classrooms: Arc::new(postgres::PgClassroomRepository::new(pool.clone())),
            folders: Arc::new(postgres::PgFolderRepository::new(pool.clone())),
            lesson_materials: Arc::new(postgres::PgLessonMaterialRepository::new(pool.clone())),
            links: Arc::new(postgres::PgFolderLinkRepository::new(pool.clone())),
            unit_of_work: Arc::new(postgres::PgUnitOfWork::new(pool)),
        }
    }
}
