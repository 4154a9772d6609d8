//! Folder lifecycle and metadata services.

pub mod lifecycle;
pub mod request;
pub mod service;

pub use lifecycle::{DeleteOutcome, FolderLifecycleService, FolderTransition};
pub use request::{CreateFolderRequest, RenameFolderRequest, ReorderFolderRequest};
pub use service::FolderService;
