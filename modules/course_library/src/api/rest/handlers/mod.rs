use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, Uri};
use axum::response::Response;
use axum::{Extension, Json};
use shaping::PropertyMappingRegistry;
use tracing::field::Empty;
use uuid::Uuid;

use crate::api::rest::dto::{
    AuthorCreationDto, AuthorsResourceParameters, CourseCreationDto, CourseUpdateDto, FieldsQuery,
};
use crate::api::rest::problem::ApiResult;
use crate::domain::service::Service;

mod author_collections;
mod authors;
mod courses;

// ==================== Author Handlers ====================

/// List authors with paging, filtering, mapped sorting and field shaping
#[tracing::instrument(skip(svc, mappings, query), fields(request_id = Empty))]
pub async fn list_authors(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Extension(mappings): Extension<Arc<PropertyMappingRegistry>>,
    query: Result<Query<AuthorsResourceParameters>, QueryRejection>,
) -> ApiResult<Response> {
    authors::list_authors(&uri, &svc, &mappings, query).await
}

/// Get one author, as plain JSON or with links depending on `Accept`
#[tracing::instrument(
    skip(svc, headers, query),
    fields(author.id = %author_id, request_id = Empty)
)]
pub async fn get_author(
    uri: Uri,
    headers: HeaderMap,
    Extension(svc): Extension<Arc<Service>>,
    Path(author_id): Path<Uuid>,
    query: Result<Query<FieldsQuery>, QueryRejection>,
) -> ApiResult<Response> {
    authors::get_author(&uri, &headers, &svc, author_id, query).await
}

/// Create an author, optionally with courses
#[tracing::instrument(skip(svc, payload), fields(request_id = Empty))]
pub async fn create_author(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    payload: Result<Json<AuthorCreationDto>, JsonRejection>,
) -> ApiResult<Response> {
    authors::create_author(&uri, &svc, payload).await
}

// ==================== Author Collection Handlers ====================

/// Get a fixed set of authors by `(id1,id2,...)`
#[tracing::instrument(skip(svc, mappings), fields(request_id = Empty))]
pub async fn get_author_collection(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Extension(mappings): Extension<Arc<PropertyMappingRegistry>>,
    Path(ids): Path<String>,
) -> ApiResult<Response> {
    author_collections::get_author_collection(&uri, &svc, &mappings, &ids).await
}

/// Create several authors at once
#[tracing::instrument(skip(svc, payload), fields(request_id = Empty))]
pub async fn create_author_collection(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    payload: Result<Json<Vec<AuthorCreationDto>>, JsonRejection>,
) -> ApiResult<Response> {
    author_collections::create_author_collection(&uri, &svc, payload).await
}

// ==================== Course Handlers ====================

#[tracing::instrument(skip(svc), fields(author.id = %author_id, request_id = Empty))]
pub async fn list_courses(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(author_id): Path<Uuid>,
) -> ApiResult<Response> {
    courses::list_courses(&uri, &svc, author_id).await
}

#[tracing::instrument(
    skip(svc),
    fields(author.id = %author_id, course.id = %course_id, request_id = Empty)
)]
pub async fn get_course(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path((author_id, course_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Response> {
    courses::get_course(&uri, &svc, author_id, course_id).await
}

#[tracing::instrument(skip(svc, payload), fields(author.id = %author_id, request_id = Empty))]
pub async fn create_course(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(author_id): Path<Uuid>,
    payload: Result<Json<CourseCreationDto>, JsonRejection>,
) -> ApiResult<Response> {
    courses::create_course(&uri, &svc, author_id, payload).await
}

/// Replace a course, creating it when the id is unknown
#[tracing::instrument(
    skip(svc, payload),
    fields(author.id = %author_id, course.id = %course_id, request_id = Empty)
)]
pub async fn replace_course(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path((author_id, course_id)): Path<(Uuid, Uuid)>,
    payload: Result<Json<CourseUpdateDto>, JsonRejection>,
) -> ApiResult<Response> {
    courses::replace_course(&uri, &svc, author_id, course_id, payload).await
}

/// Apply an RFC 6902 JSON Patch to a course
#[tracing::instrument(
    skip(svc, payload),
    fields(author.id = %author_id, course.id = %course_id, request_id = Empty)
)]
pub async fn patch_course(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path((author_id, course_id)): Path<(Uuid, Uuid)>,
    payload: Result<Json<json_patch::Patch>, JsonRejection>,
) -> ApiResult<Response> {
    courses::patch_course(&uri, &svc, author_id, course_id, payload).await
}

#[tracing::instrument(
    skip(svc),
    fields(author.id = %author_id, course.id = %course_id, request_id = Empty)
)]
pub async fn delete_course(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path((author_id, course_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Response> {
    courses::delete_course(&uri, &svc, author_id, course_id).await
}
