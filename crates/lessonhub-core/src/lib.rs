//! # lessonhub-core
//!
//! Core crate for LessonHub. Contains configuration schemas, typed
//! identifiers, and the unified infrastructure error system.
//!
//! This crate has **no** internal dependencies on other LessonHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
