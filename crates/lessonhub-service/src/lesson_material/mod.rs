//! Lesson material services.

pub mod restore;

pub use restore::{LessonMaterialRestoreService, MaterialRestoreOutcome};
