use shaping::ShapingError;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::validation::ValidationViolation;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Author not found: {id}")]
    AuthorNotFound { id: Uuid },

    #[error("Course {course_id} not found for author {author_id}")]
    CourseNotFound { author_id: Uuid, course_id: Uuid },

    #[error("Some or all of the requested authors were not found ({found} of {requested})")]
    AuthorsMissing { requested: usize, found: usize },

    #[error("Invalid field selection: {0}")]
    InvalidFields(String),

    #[error("Invalid sort expression: {0}")]
    InvalidOrderBy(String),

    #[error("Validation failed")]
    Validation { violations: Vec<ValidationViolation> },

    #[error(transparent)]
    Shaping(#[from] ShapingError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    #[must_use]
    pub fn author_not_found(id: Uuid) -> Self {
        Self::AuthorNotFound { id }
    }

    #[must_use]
    pub fn course_not_found(author_id: Uuid, course_id: Uuid) -> Self {
        Self::CourseNotFound {
            author_id,
            course_id,
        }
    }

    #[must_use]
    pub fn invalid_fields(fields: impl Into<String>) -> Self {
        Self::InvalidFields(fields.into())
    }

    #[must_use]
    pub fn invalid_order_by(order_by: impl Into<String>) -> Self {
        Self::InvalidOrderBy(order_by.into())
    }

    #[must_use]
    pub fn validation(violations: Vec<ValidationViolation>) -> Self {
        Self::Validation { violations }
    }

    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
