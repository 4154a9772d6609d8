//! Folder update authorization.

pub mod access;
pub mod checker;

pub use access::{FolderAccess, evaluate_folder_access};
pub use checker::FolderPermissionChecker;
