use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::Uri;
use axum::response::Response;
use tracing::debug;
use uuid::Uuid;

use crate::api::rest::dto::{CourseCreationDto, CourseDto, CourseUpdateDto};
use crate::api::rest::error::{BAD_REQUEST, OrProblem};
use crate::api::rest::links::course_path;
use crate::api::rest::media::Representation;
use crate::api::rest::problem::ApiResult;
use crate::api::rest::response::{created_json, json_body, no_content, ok_as};
use crate::domain::models::Upserted;
use crate::domain::service::Service;

pub(super) async fn list_courses(uri: &Uri, svc: &Service, author_id: Uuid) -> ApiResult<Response> {
    let courses = svc.list_courses(author_id).await.or_problem(uri)?;
    let dtos: Vec<CourseDto> = courses.into_iter().map(CourseDto::from).collect();
    Ok(ok_as(dtos, Representation::Json))
}

pub(super) async fn get_course(
    uri: &Uri,
    svc: &Service,
    author_id: Uuid,
    course_id: Uuid,
) -> ApiResult<Response> {
    let course = svc.get_course(author_id, course_id).await.or_problem(uri)?;
    Ok(ok_as(CourseDto::from(course), Representation::Json))
}

pub(super) async fn create_course(
    uri: &Uri,
    svc: &Service,
    author_id: Uuid,
    payload: Result<Json<CourseCreationDto>, JsonRejection>,
) -> ApiResult<Response> {
    let body = json_body(payload, uri)?;
    let course = svc.create_course(author_id, body.into()).await.or_problem(uri)?;
    let location = course_path(author_id, course.id);
    Ok(created_json(CourseDto::from(course), &location))
}

pub(super) async fn replace_course(
    uri: &Uri,
    svc: &Service,
    author_id: Uuid,
    course_id: Uuid,
    payload: Result<Json<CourseUpdateDto>, JsonRejection>,
) -> ApiResult<Response> {
    let body = json_body(payload, uri)?;
    match svc
        .upsert_course(author_id, course_id, body.into())
        .await
        .or_problem(uri)?
    {
        Upserted::Created(course) => {
            let location = course_path(author_id, course.id);
            Ok(created_json(CourseDto::from(course), &location))
        }
        Upserted::Updated(_) => Ok(no_content()),
    }
}

pub(super) async fn patch_course(
    uri: &Uri,
    svc: &Service,
    author_id: Uuid,
    course_id: Uuid,
    payload: Result<Json<json_patch::Patch>, JsonRejection>,
) -> ApiResult<Response> {
    let patch = json_body(payload, uri)?;
    let course = svc.get_course(author_id, course_id).await.or_problem(uri)?;

    let mut doc = serde_json::to_value(CourseUpdateDto::from(&course))
        .map_err(|e| BAD_REQUEST.with_context(e.to_string(), uri.path()))?;
    json_patch::patch(&mut doc, &patch.0)
        .map_err(|e| BAD_REQUEST.with_context(format!("Invalid patch document: {e}"), uri.path()))?;
    let patched: CourseUpdateDto = serde_json::from_value(doc).map_err(|e| {
        BAD_REQUEST.with_context(format!("Patched course is malformed: {e}"), uri.path())
    })?;
    debug!(?patched, "Applied patch to course");

    svc.update_course(author_id, course_id, patched.into())
        .await
        .or_problem(uri)?;
    Ok(no_content())
}

pub(super) async fn delete_course(
    uri: &Uri,
    svc: &Service,
    author_id: Uuid,
    course_id: Uuid,
) -> ApiResult<Response> {
    svc.delete_course(author_id, course_id).await.or_problem(uri)?;
    Ok(no_content())
}
