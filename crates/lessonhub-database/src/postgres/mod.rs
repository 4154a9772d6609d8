//! PostgreSQL implementations of the repository traits and the unit of work.
//!
//! Queries are built at runtime with `sqlx::query_as`, so no database is
//! needed at compile time.

pub mod classroom;
pub mod folder;
pub mod lesson_material;
pub mod link;
pub mod unit_of_work;
pub mod user;

pub use classroom::PgClassroomRepository;
pub use folder::PgFolderRepository;
pub use lesson_material::PgLessonMaterialRepository;
pub use link::PgFolderLinkRepository;
pub use unit_of_work::PgUnitOfWork;
pub use user::PgUserRepository;
