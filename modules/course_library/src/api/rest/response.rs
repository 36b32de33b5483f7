//! Response helpers shared by the handlers.

use axum::Json;
use axum::extract::Query;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::{HeaderValue, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use shaping::ProjectedRecord;

use crate::api::rest::dto::LinkDto;
use crate::api::rest::error::BAD_REQUEST;
use crate::api::rest::media::Representation;
use crate::api::rest::problem::ApiResult;

/// A projected record with hypermedia links appended after its fields.
#[derive(Debug, Serialize)]
pub struct Linked {
    #[serde(flatten)]
    pub record: ProjectedRecord,
    pub links: Vec<LinkDto>,
}

/// Collection envelope `{ value, links }` for HATEOAS list responses.
#[derive(Debug, Serialize)]
pub struct LinkedCollection<T> {
    pub value: Vec<T>,
    pub links: Vec<LinkDto>,
}

/// 200 OK with a JSON body labelled with the negotiated media type.
#[must_use]
pub fn ok_as<T: Serialize>(value: T, representation: Representation) -> Response {
    with_content_type(Json(value).into_response(), representation)
}

/// 201 Created with a Location header and JSON body.
#[must_use]
pub fn created_json<T: Serialize>(value: T, location: &str) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location.to_owned())],
        Json(value),
    )
        .into_response()
}

/// 204 No Content
#[must_use]
pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

fn with_content_type(mut resp: Response, representation: Representation) -> Response {
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(representation.content_type()),
    );
    resp
}

/// Unwrap a JSON body, turning a malformed payload into a 400 Problem.
///
/// # Errors
/// A Problem describing the rejection.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>, uri: &Uri) -> ApiResult<T> {
    payload
        .map(|Json(v)| v)
        .map_err(|rejection| BAD_REQUEST.with_context(rejection.body_text(), uri.path()))
}

/// Unwrap query parameters, turning a malformed query into a 400 Problem.
///
/// # Errors
/// A Problem describing the rejection.
pub fn query_params<T>(query: Result<Query<T>, QueryRejection>, uri: &Uri) -> ApiResult<T> {
    query
        .map(|Query(v)| v)
        .map_err(|rejection| BAD_REQUEST.with_context(rejection.body_text(), uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shaping::{record_shape, shape};

    struct Item {
        id: i64,
    }

    record_shape! {
        Item {
            "id" => |i| i.id,
        }
    }

    #[test]
    fn linked_record_flattens_fields_before_links() {
        let linked = Linked {
            record: shape(&Item { id: 7 }, None).unwrap(),
            links: vec![LinkDto::new("/x", "self", "GET")],
        };
        assert_eq!(
            serde_json::to_string(&linked).unwrap(),
            r#"{"id":7,"links":[{"href":"/x","rel":"self","method":"GET"}]}"#
        );
    }

    #[test]
    fn created_sets_location() {
        let resp = created_json(serde_json::json!({ "id": 1 }), "/api/authors/1");
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/api/authors/1");
    }
}
