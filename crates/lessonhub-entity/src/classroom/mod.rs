//! Classroom domain entities.

pub mod model;

pub use model::{Classroom, ClassroomStatus};
