//! # lessonhub-entity
//!
//! Domain entity models for LessonHub. Every struct in this crate
//! represents a database table row or a domain value object. Row types
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize` and `sqlx::FromRow`.

pub mod classroom;
pub mod folder;
pub mod lesson_material;
pub mod user;
