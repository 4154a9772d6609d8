//! Lifecycle error taxonomy.
//!
//! Every variant carries a stable [`code`](LifecycleError::code) so callers
//! can map failures without inspecting messages. State and authorization
//! errors are raised before anything is staged; infrastructure failures
//! are wrapped in [`LifecycleError::OperationFailed`] with the name of
//! the operation that was running.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use lessonhub_core::error::AppError;
use lessonhub_core::types::{FolderId, UserId};
use lessonhub_entity::folder::FolderStatus;

use crate::context::RequestContext;

/// Result alias for lifecycle handlers.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Coarse category of a [`LifecycleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleErrorKind {
    /// A folder or lesson material id did not resolve.
    NotFound,
    /// The folder is in a status that does not permit the operation.
    InvalidState,
    /// The actor may not perform the operation.
    Forbidden,
    /// Caller input is malformed.
    Validation,
    /// An unexpected failure while reading or committing.
    OperationFailed,
}

/// The operation a wrapped failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleOperation {
    /// Folder archive.
    Archive,
    /// Folder restore.
    Restore,
    /// Folder delete, single or bulk.
    Delete,
    /// Folder creation.
    Create,
    /// Folder rename or reorder.
    Update,
    /// Direct lesson material restore.
    RestoreLessonMaterials,
}

impl LifecycleOperation {
    /// Stable failure code for this operation.
    pub fn failure_code(&self) -> &'static str {
        match self {
            Self::Archive => "FOLDER_ARCHIVE_FAILED",
            Self::Restore => "FOLDER_RESTORE_FAILED",
            Self::Delete => "FOLDER_DELETE_FAILED",
            Self::Create => "FOLDER_CREATE_FAILED",
            Self::Update => "FOLDER_UPDATE_FAILED",
            Self::RestoreLessonMaterials => "LESSON_MATERIAL_RESTORE_FAILED",
        }
    }
}

impl fmt::Display for LifecycleOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Archive => "folder archive",
            Self::Restore => "folder restore",
            Self::Delete => "folder delete",
            Self::Create => "folder create",
            Self::Update => "folder update",
            Self::RestoreLessonMaterials => "lesson material restore",
        };
        f.write_str(name)
    }
}

/// Errors returned by lifecycle handlers.
#[derive(Debug, Error)]
pub enum LifecycleError {
    // --- Lookup ---
    /// The folder does not exist.
    #[error("Folder {folder_id} not found")]
    FolderNotFound {
        /// The requested folder.
        folder_id: FolderId,
    },

    /// None of the requested lesson materials exist in a restorable state.
    #[error("No deleted lesson material matched the request")]
    LessonMaterialNotFound,

    // --- State ---
    /// Archive of a folder that is already archived.
    #[error("Folder {folder_id} is already archived")]
    FolderAlreadyArchived {
        /// The folder.
        folder_id: FolderId,
    },

    /// Archive of a folder that is already deleted.
    #[error("Folder {folder_id} is already deleted")]
    FolderAlreadyDeleted {
        /// The folder.
        folder_id: FolderId,
    },

    /// Delete of a folder that was not archived first.
    #[error("Folder {folder_id} is {status} and must be archived before it can be deleted")]
    FolderShouldBeArchivedBeforeDelete {
        /// The folder.
        folder_id: FolderId,
        /// Its current status.
        status: FolderStatus,
    },

    /// Restore of a folder that is not archived.
    #[error("Folder {folder_id} is {status} and must be archived before it can be restored")]
    FolderShouldBeArchivedBeforeRestore {
        /// The folder.
        folder_id: FolderId,
        /// Its current status.
        status: FolderStatus,
    },

    /// Metadata change or re-attachment on a folder that is not active.
    #[error("Folder {folder_id} is {status}, expected active")]
    FolderNotActive {
        /// The folder.
        folder_id: FolderId,
        /// Its current status.
        status: FolderStatus,
    },

    // --- Authorization ---
    /// The operation is only available on personal folders.
    #[error("Folder {folder_id} is not a personal folder")]
    FolderMustBePersonal {
        /// The folder.
        folder_id: FolderId,
    },

    /// The authorization rules deny the actor.
    #[error("User {actor_id} is not allowed to modify {target}")]
    Forbidden {
        /// The acting user.
        actor_id: UserId,
        /// What was being modified, e.g. `folder <id>`.
        target: String,
    },

    // --- Validation ---
    /// Folder name is empty or too long.
    #[error("Invalid folder name: {reason}")]
    InvalidFolderName {
        /// What is wrong with it.
        reason: String,
    },

    /// Folder order is negative.
    #[error("Invalid folder order: {reason}")]
    InvalidFolderOrder {
        /// What is wrong with it.
        reason: String,
    },

    /// The requested parent cannot hold the new folder.
    #[error("Invalid parent folder {parent_id}: {reason}")]
    InvalidParentFolder {
        /// The requested parent.
        parent_id: FolderId,
        /// Why it was rejected.
        reason: String,
    },

    // --- Infrastructure ---
    /// A repository read or the commit failed.
    #[error("{operation} failed: {source}")]
    OperationFailed {
        /// The operation that was running.
        operation: LifecycleOperation,
        /// The underlying infrastructure error.
        #[source]
        source: AppError,
    },
}

impl LifecycleError {
    /// Coarse category.
    pub fn kind(&self) -> LifecycleErrorKind {
        match self {
            Self::FolderNotFound { .. } | Self::LessonMaterialNotFound => {
                LifecycleErrorKind::NotFound
            }
            Self::FolderAlreadyArchived { .. }
            | Self::FolderAlreadyDeleted { .. }
            | Self::FolderShouldBeArchivedBeforeDelete { .. }
            | Self::FolderShouldBeArchivedBeforeRestore { .. }
            | Self::FolderNotActive { .. } => LifecycleErrorKind::InvalidState,
            Self::FolderMustBePersonal { .. } | Self::Forbidden { .. } => {
                LifecycleErrorKind::Forbidden
            }
            Self::InvalidFolderName { .. }
            | Self::InvalidFolderOrder { .. }
            | Self::InvalidParentFolder { .. } => LifecycleErrorKind::Validation,
            Self::OperationFailed { .. } => LifecycleErrorKind::OperationFailed,
        }
    }

    /// Stable discriminator for callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::FolderNotFound { .. } => "FOLDER_NOT_FOUND",
            Self::LessonMaterialNotFound => "LESSON_MATERIAL_NOT_FOUND",
            Self::FolderAlreadyArchived { .. } => "FOLDER_ALREADY_ARCHIVED",
            Self::FolderAlreadyDeleted { .. } => "FOLDER_ALREADY_DELETED",
            Self::FolderShouldBeArchivedBeforeDelete { .. } => {
                "FOLDER_SHOULD_BE_ARCHIVED_BEFORE_DELETE"
            }
            Self::FolderShouldBeArchivedBeforeRestore { .. } => {
                "FOLDER_SHOULD_BE_ARCHIVED_BEFORE_RESTORE"
            }
            Self::FolderNotActive { .. } => "FOLDER_NOT_ACTIVE",
            Self::FolderMustBePersonal { .. } => "FOLDER_MUST_BE_PERSONAL",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::InvalidFolderName { .. } => "INVALID_FOLDER_NAME",
            Self::InvalidFolderOrder { .. } => "INVALID_FOLDER_ORDER",
            Self::InvalidParentFolder { .. } => "INVALID_PARENT_FOLDER",
            Self::OperationFailed { operation, .. } => operation.failure_code(),
        }
    }

    pub(crate) fn forbidden_folder(actor_id: UserId, folder_id: FolderId) -> Self {
        Self::Forbidden {
            actor_id,
            target: format!("folder {folder_id}"),
        }
    }
}

/// Wrap an infrastructure error for `operation`, logging it once.
pub(crate) fn operation_failed(
    ctx: &RequestContext,
    operation: LifecycleOperation,
) -> impl FnOnce(AppError) -> LifecycleError + '_ {
    move |source| {
        warn!(
            actor_id = %ctx.actor_id,
            request_id = %ctx.request_id,
            elapsed_ms = ctx.elapsed_ms(),
            operation = %operation,
            error = %source,
            "Lifecycle operation failed"
        );
        LifecycleError::OperationFailed { operation, source }
    }
}

impl From<LifecycleError> for AppError {
    fn from(err: LifecycleError) -> Self {
        let message = format!("{}: {err}", err.code());
        match err.kind() {
            LifecycleErrorKind::NotFound => AppError::not_found(message),
            LifecycleErrorKind::InvalidState => AppError::invalid_state(message),
            LifecycleErrorKind::Forbidden => AppError::forbidden(message),
            LifecycleErrorKind::Validation => AppError::validation(message),
            LifecycleErrorKind::OperationFailed => match err {
                LifecycleError::OperationFailed { source, .. } => {
                    AppError::with_source(source.kind, message, source)
                }
                _ => AppError::internal(message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use lessonhub_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_codes_are_operation_specific() {
        for (operation, code) in [
            (LifecycleOperation::Archive, "FOLDER_ARCHIVE_FAILED"),
            (LifecycleOperation::Restore, "FOLDER_RESTORE_FAILED"),
            (LifecycleOperation::Delete, "FOLDER_DELETE_FAILED"),
            (LifecycleOperation::Create, "FOLDER_CREATE_FAILED"),
            (LifecycleOperation::Update, "FOLDER_UPDATE_FAILED"),
            (
                LifecycleOperation::RestoreLessonMaterials,
                "LESSON_MATERIAL_RESTORE_FAILED",
            ),
        ] {
            let err = LifecycleError::OperationFailed {
                operation,
                source: AppError::database("connection reset"),
            };
            assert_eq!(err.code(), code);
            assert_eq!(err.kind(), LifecycleErrorKind::OperationFailed);
        }
    }

    #[test]
    fn test_forbidden_is_distinct_from_invalid_state() {
        let folder_id = FolderId::new();
        let denied = LifecycleError::forbidden_folder(UserId::new(), folder_id);
        let wrong_state = LifecycleError::FolderAlreadyArchived { folder_id };
        assert_eq!(denied.kind(), LifecycleErrorKind::Forbidden);
        assert_eq!(wrong_state.kind(), LifecycleErrorKind::InvalidState);
        assert_ne!(denied.code(), wrong_state.code());
    }

    #[test]
    fn test_into_app_error() {
        let folder_id = FolderId::new();
        let err: AppError = LifecycleError::FolderNotFound { folder_id }.into();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(err.message.starts_with("FOLDER_NOT_FOUND"));

        let err: AppError = LifecycleError::FolderMustBePersonal { folder_id }.into();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let err: AppError = LifecycleError::OperationFailed {
            operation: LifecycleOperation::Delete,
            source: AppError::database("connection reset"),
        }
        .into();
        assert_eq!(err.kind, ErrorKind::Database);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_messages() {
        let folder_id = FolderId::new();
        let err = LifecycleError::FolderShouldBeArchivedBeforeDelete {
            folder_id,
            status: FolderStatus::Active,
        };
        assert_eq!(
            err.to_string(),
            format!("Folder {folder_id} is active and must be archived before it can be deleted")
        );
    }
}
