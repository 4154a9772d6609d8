//! # lessonhub-auth
//!
//! Authorization rules for folder lifecycle operations.
//!
//! ## Modules
//!
//! - `folder`: the folder update predicate and its resolver
//! - `lesson_material`: who may restore a deleted lesson material

pub mod folder;
pub mod lesson_material;

pub use folder::{FolderAccess, FolderPermissionChecker, evaluate_folder_access};
pub use lesson_material::can_restore_lesson_material;
