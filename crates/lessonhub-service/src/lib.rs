//! # lessonhub-service
//!
//! Lifecycle handlers for folders and lesson materials. Each handler loads
//! what it needs, checks state and authorization, stages its writes in a
//! `ChangeSet`, and commits once.
//!
//! Services follow constructor injection; [`LessonHubServices::new`] wires
//! all of them from one `Repositories` bundle.

pub mod cascade;
pub mod context;
pub mod error;
pub mod folder;
pub mod lesson_material;

#[cfg(test)]
pub(crate) mod test_support;

use lessonhub_auth::FolderPermissionChecker;
use lessonhub_database::Repositories;

pub use cascade::{CascadeOutcome, CascadeResolver};
pub use context::RequestContext;
pub use error::{LifecycleError, LifecycleErrorKind, LifecycleOperation, LifecycleResult};
pub use folder::{
    CreateFolderRequest, DeleteOutcome, FolderLifecycleService, FolderService, FolderTransition,
    RenameFolderRequest, ReorderFolderRequest,
};
pub use lesson_material::{LessonMaterialRestoreService, MaterialRestoreOutcome};

/// Every lifecycle service, sharing one set of repositories.
#[derive(Debug, Clone)]
pub struct LessonHubServices {
    /// Archive, restore and delete.
    pub lifecycle: FolderLifecycleService,
    /// Create, rename and reorder.
    pub folders: FolderService,
    /// Direct lesson material restore.
    pub lesson_materials: LessonMaterialRestoreService,
}

impl LessonHubServices {
    /// Wire all services.
    pub fn new(repos: &Repositories) -> Self {
        let permissions = FolderPermissionChecker::new(repos.users.clone(), repos.classrooms.clone());
        let cascade = CascadeResolver::new(repos.links.clone(), repos.lesson_materials.clone());

        Self {
            lifecycle: FolderLifecycleService::new(
                repos.folders.clone(),
                repos.unit_of_work.clone(),
                cascade,
                permissions.clone(),
            ),
            folders: FolderService::new(
                repos.folders.clone(),
                repos.unit_of_work.clone(),
                permissions.clone(),
            ),
            lesson_materials: LessonMaterialRestoreService::new(
                repos.folders.clone(),
                repos.lesson_materials.clone(),
                repos.links.clone(),
                repos.unit_of_work.clone(),
                permissions,
            ),
        }
    }
}
