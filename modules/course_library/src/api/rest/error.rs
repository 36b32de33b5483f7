use axum::http::{StatusCode, Uri};

use crate::api::rest::problem::{ApiResult, ErrDef, Problem};
use crate::domain::error::DomainError;

pub const AUTHOR_NOT_FOUND: ErrDef = ErrDef {
    status: StatusCode::NOT_FOUND,
    title: "Author Not Found",
    code: "COURSELIB_AUTHOR_NOT_FOUND",
    type_url: "https://errors.courselibrary.dev/author-not-found",
};

pub const COURSE_NOT_FOUND: ErrDef = ErrDef {
    status: StatusCode::NOT_FOUND,
    title: "Course Not Found",
    code: "COURSELIB_COURSE_NOT_FOUND",
    type_url: "https://errors.courselibrary.dev/course-not-found",
};

pub const INVALID_FIELDS: ErrDef = ErrDef {
    status: StatusCode::BAD_REQUEST,
    title: "Invalid Field Selection",
    code: "COURSELIB_INVALID_FIELDS",
    type_url: "https://errors.courselibrary.dev/invalid-fields",
};

pub const INVALID_ORDER_BY: ErrDef = ErrDef {
    status: StatusCode::BAD_REQUEST,
    title: "Invalid Sort Expression",
    code: "COURSELIB_INVALID_ORDER_BY",
    type_url: "https://errors.courselibrary.dev/invalid-order-by",
};

pub const BAD_REQUEST: ErrDef = ErrDef {
    status: StatusCode::BAD_REQUEST,
    title: "Bad Request",
    code: "COURSELIB_BAD_REQUEST",
    type_url: "https://errors.courselibrary.dev/bad-request",
};

pub const NOT_ACCEPTABLE: ErrDef = ErrDef {
    status: StatusCode::NOT_ACCEPTABLE,
    title: "Not Acceptable",
    code: "COURSELIB_NOT_ACCEPTABLE",
    type_url: "https://errors.courselibrary.dev/not-acceptable",
};

pub const VALIDATION_FAILED: ErrDef = ErrDef {
    status: StatusCode::UNPROCESSABLE_ENTITY,
    title: "Validation Failed",
    code: "COURSELIB_VALIDATION",
    type_url: "https://errors.courselibrary.dev/validation",
};

pub const INTERNAL: ErrDef = ErrDef {
    status: StatusCode::INTERNAL_SERVER_ERROR,
    title: "Internal Server Error",
    code: "COURSELIB_INTERNAL",
    type_url: "https://errors.courselibrary.dev/internal",
};

/// Map domain errors to RFC 9457 Problem responses
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    match e {
        DomainError::AuthorNotFound { id } => {
            AUTHOR_NOT_FOUND.with_context(format!("Author with id {id} was not found"), instance)
        }
        DomainError::AuthorsMissing { .. } => {
            AUTHOR_NOT_FOUND.with_context(e.to_string(), instance)
        }
        DomainError::CourseNotFound { .. } => {
            COURSE_NOT_FOUND.with_context(e.to_string(), instance)
        }
        DomainError::InvalidFields(fields) => INVALID_FIELDS.with_context(
            format!("Some or all of the requested fields do not exist on the resource: {fields}."),
            instance,
        ),
        DomainError::InvalidOrderBy(order_by) => INVALID_ORDER_BY.with_context(
            format!("The sort expression '{order_by}' cannot be mapped."),
            instance,
        ),
        DomainError::Validation { violations } => VALIDATION_FAILED
            .with_context("One or more validation errors occurred.", instance)
            .with_errors(violations.clone()),
        DomainError::Shaping(inner) if inner.is_client_error() => {
            BAD_REQUEST.with_context(inner.to_string(), instance)
        }
        DomainError::Shaping(_) | DomainError::Configuration { .. } => {
            tracing::error!(error = %e, "Shaping configuration error");
            INTERNAL.with_context("The server is misconfigured", instance)
        }
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = %e, "Database error occurred");
            INTERNAL.with_context("An internal database error occurred", instance)
        }
    }
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e, "/")
    }
}

/// Attach the request path to a failed domain call.
pub trait OrProblem<T> {
    /// # Errors
    /// The mapped [`Problem`] when `self` is an error.
    fn or_problem(self, uri: &Uri) -> ApiResult<T>;
}

impl<T, E: Into<DomainError>> OrProblem<T> for Result<T, E> {
    fn or_problem(self, uri: &Uri) -> ApiResult<T> {
        self.map_err(|e| domain_error_to_problem(&e.into(), uri.path()))
    }
}
