//! Core type definitions used across the LessonHub workspace.

pub mod id;

pub use id::*;
