//! Folder domain entities.

pub mod link;
pub mod model;
pub mod status;

pub use link::FolderLessonMaterial;
pub use model::{FOLDER_NAME_MAX_LENGTH, Folder, FolderOwner, FolderOwnerType};
pub use status::FolderStatus;
