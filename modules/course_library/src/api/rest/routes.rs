use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};
use shaping::PropertyMappingRegistry;

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount the author, author-collection and course endpoints onto `router`.
///
/// GET routes answer HEAD as well.
#[must_use]
pub fn register_routes(
    router: Router,
    service: Arc<Service>,
    mappings: Arc<PropertyMappingRegistry>,
) -> Router {
    router
        // Authors
        .route(
            "/api/authors",
            get(handlers::list_authors).post(handlers::create_author),
        )
        .route("/api/authors/{author_id}", get(handlers::get_author))
        // Author collections
        .route(
            "/api/authorcollections",
            post(handlers::create_author_collection),
        )
        .route(
            "/api/authorcollections/{ids}",
            get(handlers::get_author_collection),
        )
        // Courses
        .route(
            "/api/authors/{author_id}/courses",
            get(handlers::list_courses).post(handlers::create_course),
        )
        .route(
            "/api/authors/{author_id}/courses/{course_id}",
            get(handlers::get_course)
                .put(handlers::replace_course)
                .patch(handlers::patch_course)
                .delete(handlers::delete_course),
        )
        .layer(Extension(service))
        .layer(Extension(mappings))
}
