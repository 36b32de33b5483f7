use axum::Json;
use axum::extract::Query;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::{HeaderMap, HeaderValue, Uri, header};
use axum::response::Response;
use chrono::Utc;
use shaping::{PropertyMappingRegistry, apply_sort, has_properties, shape, shape_all};
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::rest::dto::{AuthorCreationDto, AuthorDto, AuthorsResourceParameters, FieldsQuery};
use crate::api::rest::error::{BAD_REQUEST, NOT_ACCEPTABLE, OrProblem, domain_error_to_problem};
use crate::api::rest::links::{AuthorsPageQuery, author_path, links_for_author, links_for_authors};
use crate::api::rest::media::{MediaError, Representation, negotiate};
use crate::api::rest::problem::{ApiResult, Problem};
use crate::api::rest::response::{
    Linked, LinkedCollection, created_json, json_body, ok_as, query_params,
};
use crate::domain::error::DomainError;
use crate::domain::models::Author;
use crate::domain::paging::PaginationMetadata;
use crate::domain::repo::AuthorFilter;
use crate::domain::service::Service;

const PAGINATION_HEADER: &str = "x-pagination";

fn invalid_fields(fields: Option<&str>, uri: &Uri) -> Problem {
    domain_error_to_problem(
        &DomainError::invalid_fields(fields.unwrap_or_default()),
        uri.path(),
    )
}

fn pagination_header(meta: &PaginationMetadata) -> Option<HeaderValue> {
    let json = serde_json::to_string(meta)
        .map_err(|e| warn!(error = %e, "Failed to serialize pagination metadata"))
        .ok()?;
    HeaderValue::from_str(&json).ok()
}

pub(super) async fn list_authors(
    uri: &Uri,
    svc: &Service,
    mappings: &PropertyMappingRegistry,
    query: Result<Query<AuthorsResourceParameters>, QueryRejection>,
) -> ApiResult<Response> {
    let params = query_params(query, uri)?;
    let fields = params.fields.as_deref();
    let order_by = params
        .order_by
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(svc.config().default_order_by.as_str());

    if !mappings
        .valid_mapping_exists::<AuthorDto, Author>(Some(order_by))
        .or_problem(uri)?
    {
        return Err(domain_error_to_problem(
            &DomainError::invalid_order_by(order_by),
            uri.path(),
        ));
    }
    if !has_properties::<AuthorDto>(fields) {
        return Err(invalid_fields(fields, uri));
    }

    let mapping = mappings.get_mapping::<AuthorDto, Author>().or_problem(uri)?;
    let steps = apply_sort(Some(order_by), mapping).or_problem(uri)?;
    let filter = AuthorFilter::new(
        params.main_category.as_deref(),
        params.search_query.as_deref(),
    );
    let window = svc.page_request(params.page_number, params.page_size);

    let page = svc
        .list_authors(&filter, window, &steps)
        .await
        .or_problem(uri)?;

    let now = Utc::now();
    let dtos: Vec<AuthorDto> = page
        .items
        .iter()
        .map(|a| AuthorDto::from_author(a, now))
        .collect();
    let shaped = shape_all(&dtos, fields).or_problem(uri)?;
    let value: Vec<Linked> = shaped
        .into_iter()
        .zip(&dtos)
        .map(|(record, dto)| Linked {
            record,
            links: links_for_author(dto.id, None),
        })
        .collect();

    let page_query = AuthorsPageQuery {
        page_number: page.current_page,
        page_size: page.page_size,
        main_category: params.main_category.as_deref(),
        search_query: params.search_query.as_deref(),
        order_by,
        fields,
    };
    let links = links_for_authors(&page_query, page.has_next(), page.has_previous());

    let mut resp = ok_as(LinkedCollection { value, links }, Representation::Json);
    if let Some(value) = pagination_header(&page.metadata()) {
        resp.headers_mut().insert(PAGINATION_HEADER, value);
    }
    Ok(resp)
}

pub(super) async fn get_author(
    uri: &Uri,
    headers: &HeaderMap,
    svc: &Service,
    author_id: Uuid,
    query: Result<Query<FieldsQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let representation = match negotiate(headers.get(header::ACCEPT)) {
        Ok(r) => r,
        Err(e @ MediaError::Unparseable(_)) => {
            return Err(BAD_REQUEST.with_context(e.to_string(), uri.path()));
        }
        Err(e @ MediaError::NotAcceptable(_)) => {
            return Err(NOT_ACCEPTABLE.with_context(e.to_string(), uri.path()));
        }
    };
    let FieldsQuery { fields } = query_params(query, uri)?;
    let fields = fields.as_deref();
    if !has_properties::<AuthorDto>(fields) {
        return Err(invalid_fields(fields, uri));
    }

    let author = svc.get_author(author_id).await.or_problem(uri)?;
    let record = shape(&AuthorDto::from(&author), fields).or_problem(uri)?;

    Ok(match representation {
        Representation::Hateoas => ok_as(
            Linked {
                record,
                links: links_for_author(author_id, fields),
            },
            representation,
        ),
        Representation::Json => ok_as(record, representation),
    })
}

pub(super) async fn create_author(
    uri: &Uri,
    svc: &Service,
    payload: Result<Json<AuthorCreationDto>, JsonRejection>,
) -> ApiResult<Response> {
    let body = json_body(payload, uri)?;
    let author = svc.create_author(body.into()).await.or_problem(uri)?;
    info!(author_id = %author.id, "Author created via REST");

    let record = shape(&AuthorDto::from(&author), None).or_problem(uri)?;
    let linked = Linked {
        record,
        links: links_for_author(author.id, None),
    };
    Ok(created_json(linked, &author_path(author.id)))
}
