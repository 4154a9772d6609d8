//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use lessonhub_core::types::{ClassroomId, FolderId, UserId};

use super::status::FolderStatus;

/// Maximum folder name length, in characters.
pub const FOLDER_NAME_MAX_LENGTH: usize = 100;

/// Discriminates who owns a folder. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "folder_owner_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FolderOwnerType {
    /// Owned by a single user.
    Personal,
    /// Owned by a classroom.
    Class,
}

/// Typed view of a folder's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum FolderOwner {
    /// A personal folder and its owning user.
    Personal(UserId),
    /// A class folder and its owning classroom.
    Class(ClassroomId),
}

impl FolderOwner {
    /// The stored discriminator.
    pub fn owner_type(&self) -> FolderOwnerType {
        match self {
            Self::Personal(_) => FolderOwnerType::Personal,
            Self::Class(_) => FolderOwnerType::Class,
        }
    }

    /// The stored reference (user id or classroom id).
    pub fn owner_ref(&self) -> Uuid {
        match self {
            Self::Personal(user_id) => user_id.into_uuid(),
            Self::Class(class_id) => class_id.into_uuid(),
        }
    }
}

/// A folder holding lesson materials, personal or class-scoped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Display name.
    pub name: String,
    /// Sort key among siblings, non-negative.
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    /// Personal or class ownership.
    pub owner_type: FolderOwnerType,
    /// User id for personal folders, classroom id for class folders.
    pub owner_ref: Uuid,
    /// Parent folder (null for top-level folders).
    pub parent_id: Option<FolderId>,
    /// Lifecycle state.
    pub status: FolderStatus,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Build a new active folder.
    pub fn new(owner: FolderOwner, name: String, parent_id: Option<FolderId>, order: i32) -> Self {
        let now = Utc::now();
        Self {
            id: FolderId::new(),
            name,
            order,
            owner_type: owner.owner_type(),
            owner_ref: owner.owner_ref(),
            parent_id,
            status: FolderStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Typed owner.
    pub fn owner(&self) -> FolderOwner {
        match self.owner_type {
            FolderOwnerType::Personal => FolderOwner::Personal(UserId::from_uuid(self.owner_ref)),
            FolderOwnerType::Class => FolderOwner::Class(ClassroomId::from_uuid(self.owner_ref)),
        }
    }

    /// Check if this is a personal folder.
    pub fn is_personal(&self) -> bool {
        self.owner_type == FolderOwnerType::Personal
    }

    /// Check if this folder is a personal folder of the given user.
    pub fn is_personal_of(&self, user_id: UserId) -> bool {
        self.owner() == FolderOwner::Personal(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_roundtrip() {
        let user = UserId::new();
        let folder = Folder::new(FolderOwner::Personal(user), "Maths".into(), None, 0);
        assert_eq!(folder.owner_type, FolderOwnerType::Personal);
        assert_eq!(folder.owner(), FolderOwner::Personal(user));
        assert!(folder.is_personal_of(user));
        assert!(!folder.is_personal_of(UserId::new()));

        let class = ClassroomId::new();
        let folder = Folder::new(FolderOwner::Class(class), "Year 7".into(), None, 3);
        assert_eq!(folder.owner(), FolderOwner::Class(class));
        assert!(!folder.is_personal());
        assert_eq!(folder.status, FolderStatus::Active);
    }

    #[test]
    fn test_class_owner_never_matches_user_with_same_uuid() {
        let raw = Uuid::new_v4();
        let folder = Folder::new(
            FolderOwner::Class(ClassroomId::from_uuid(raw)),
            "Shared".into(),
            None,
            0,
        );
        assert!(!folder.is_personal_of(UserId::from_uuid(raw)));
    }
}
