//! Lesson material domain entities.

pub mod feedback;
pub mod model;
pub mod status;

pub use feedback::{LessonMaterialApproval, LessonMaterialQuestion};
pub use model::LessonMaterial;
pub use status::{ContentType, LessonMaterialStatus, Visibility};
