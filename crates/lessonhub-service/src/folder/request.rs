//! Folder request payloads with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use lessonhub_core::types::FolderId;

/// Create a folder.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 100, message = "must be 1 to 100 characters"))]
    pub name: String,
    /// Parent folder (None for top level).
    pub parent_id: Option<FolderId>,
}

/// Rename a folder.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameFolderRequest {
    /// New folder name.
    #[validate(length(min = 1, max = 100, message = "must be 1 to 100 characters"))]
    pub name: String,
}

/// Move a folder among its siblings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReorderFolderRequest {
    /// Zero-based target position.
    #[validate(range(min = 0, message = "must not be negative"))]
    pub order: i32,
}

impl CreateFolderRequest {
    /// Copy with surrounding whitespace stripped from the name.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            parent_id: self.parent_id,
        }
    }
}

impl RenameFolderRequest {
    /// Copy with surrounding whitespace stripped from the name.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }
}
