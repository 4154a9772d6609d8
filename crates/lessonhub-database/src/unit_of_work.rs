//! Staged mutations and the commit boundary.
//!
//! Handlers never write directly. They validate, then stage [`Change`]s into
//! a [`ChangeSet`], then hand the whole set to [`UnitOfWork::commit`], which
//! applies it atomically or not at all.

use async_trait::async_trait;
use serde::Serialize;

use lessonhub_core::result::AppResult;
use lessonhub_core::types::{FolderId, FolderLessonMaterialId, LessonMaterialId};
use lessonhub_entity::folder::{Folder, FolderLessonMaterial};

/// A single staged write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Change {
    /// Insert a new folder row.
    InsertFolder(Folder),
    /// Overwrite name, order, parent, status and `updated_at` of a folder.
    UpdateFolder(Folder),
    /// Remove a folder row together with any remaining links.
    RemoveFolder(FolderId),
    /// Insert a folder link.
    InsertLink(FolderLessonMaterial),
    /// Remove a folder link.
    RemoveLink(FolderLessonMaterialId),
    /// Soft delete: flip a material to `Deleted`.
    DeactivateLessonMaterial {
        /// The material.
        id: LessonMaterialId,
        /// Folder whose archive caused the deactivation.
        by_folder: Option<FolderId>,
    },
    /// Flip a material back to `Active` and clear its deactivation marker.
    ReactivateLessonMaterial(LessonMaterialId),
    /// Hard delete: remove a material with its questions and approvals.
    PurgeLessonMaterial(LessonMaterialId),
}

/// Ordered list of staged writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    /// Create an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a change.
    pub fn push(&mut self, change: Change) {
        self.changes.push(change);
    }

    /// Number of staged changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Check if nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Iterate over staged changes in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.changes.iter()
    }

    /// Count staged changes matching a predicate.
    pub fn count(&self, predicate: impl Fn(&Change) -> bool) -> usize {
        self.changes.iter().filter(|c| predicate(c)).count()
    }
}

impl IntoIterator for ChangeSet {
    type Item = Change;
    type IntoIter = std::vec::IntoIter<Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

/// Applies a [`ChangeSet`] atomically.
#[async_trait]
pub trait UnitOfWork: Send + Sync + 'static {
    /// Apply every change or none of them.
    async fn commit(&self, changes: ChangeSet) -> AppResult<()>;
}
