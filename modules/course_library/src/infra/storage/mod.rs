pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod sea_repo;
pub mod sort_ext;

pub use sea_repo::SeaOrmCourseLibraryRepository;

use crate::domain::error::DomainError;

/// Convert a database error into a domain error, keeping the driver message
/// for logs only.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::database(e.to_string())
}
