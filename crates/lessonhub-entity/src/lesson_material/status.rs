//! Lesson material status and classification enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Usability of a lesson material.
///
/// There is no archived state of its own: a material follows archival
/// indirectly through its folder links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "lesson_material_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LessonMaterialStatus {
    /// Usable.
    Active,
    /// Soft-deleted; the row is kept for history until purged.
    Deleted,
}

impl LessonMaterialStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for LessonMaterialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who may see a lesson material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "lesson_material_visibility", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Creator only.
    Private,
    /// Members of the linked classes.
    Class,
    /// Everyone in the school.
    School,
}

/// Kind of file backing a lesson material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "lesson_material_content_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Video asset.
    Video,
    /// Audio asset.
    Audio,
    /// Document asset (PDF, slides, text).
    Document,
}
