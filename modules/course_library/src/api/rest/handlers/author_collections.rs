use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::Uri;
use axum::response::Response;
use shaping::{PropertyMappingRegistry, apply_sort};
use uuid::Uuid;

use crate::api::rest::dto::{AuthorCreationDto, AuthorDto};
use crate::api::rest::error::{BAD_REQUEST, OrProblem};
use crate::api::rest::links::author_collection_path;
use crate::api::rest::media::Representation;
use crate::api::rest::problem::ApiResult;
use crate::api::rest::response::{created_json, json_body, ok_as};
use crate::domain::error::DomainError;
use crate::domain::models::{Author, NewAuthor};
use crate::domain::service::Service;

/// Parse `(id1,id2,...)`; the surrounding parentheses are optional.
fn parse_ids(raw: &str) -> Result<Vec<Uuid>, String> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(trimmed);
    if inner.trim().is_empty() {
        return Err("At least one author id is required".to_owned());
    }
    inner
        .split(',')
        .map(|s| {
            let s = s.trim();
            Uuid::parse_str(s).map_err(|_| format!("'{s}' is not a valid author id"))
        })
        .collect()
}

pub(super) async fn get_author_collection(
    uri: &Uri,
    svc: &Service,
    mappings: &PropertyMappingRegistry,
    raw_ids: &str,
) -> ApiResult<Response> {
    let ids = parse_ids(raw_ids).map_err(|msg| BAD_REQUEST.with_context(msg, uri.path()))?;

    let mapping = mappings.get_mapping::<AuthorDto, Author>().or_problem(uri)?;
    let steps = apply_sort(Some(svc.config().default_order_by.as_str()), mapping)
        .map_err(|e| DomainError::configuration(e.to_string()))
        .or_problem(uri)?;

    let authors = svc.get_author_collection(&ids, &steps).await.or_problem(uri)?;
    let dtos: Vec<AuthorDto> = authors.iter().map(AuthorDto::from).collect();
    Ok(ok_as(dtos, Representation::Json))
}

pub(super) async fn create_author_collection(
    uri: &Uri,
    svc: &Service,
    payload: Result<Json<Vec<AuthorCreationDto>>, JsonRejection>,
) -> ApiResult<Response> {
    let body = json_body(payload, uri)?;
    if body.is_empty() {
        return Err(BAD_REQUEST.with_context("The author collection must not be empty", uri.path()));
    }

    let new_authors: Vec<NewAuthor> = body.into_iter().map(Into::into).collect();
    let authors = svc.create_authors(new_authors).await.or_problem(uri)?;

    let ids: Vec<Uuid> = authors.iter().map(|a| a.id).collect();
    let dtos: Vec<AuthorDto> = authors.iter().map(AuthorDto::from).collect();
    Ok(created_json(dtos, &author_collection_path(&ids)))
}
