//! Folder lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a folder.
///
/// Folders move `Active → Archived → Deleted`; restore returns an
/// archived folder to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "folder_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FolderStatus {
    /// Visible and editable.
    Active,
    /// Hidden from normal listings; may be restored or deleted.
    Archived,
    /// Terminal state awaiting physical removal.
    Deleted,
}

impl FolderStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for FolderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FolderStatus {
    type Err = lessonhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            "deleted" => Ok(Self::Deleted),
            _ => Err(lessonhub_core::AppError::validation(format!(
                "Invalid folder status: '{s}'. Expected one of: active, archived, deleted"
            ))),
        }
    }
}
