#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the complete REST API
//!
//! Drives the router end to end over an in-memory database: author listing
//! with paging, sorting and shaping, content negotiation, author collections
//! and course CRUD including upsert and JSON Patch.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use uuid::Uuid;

use course_library::CourseLibraryConfig;
use course_library::api::rest::media::HATEOAS_JSON;
use course_library::api::rest::problem::APPLICATION_PROBLEM_JSON;

mod support;
use support::{TestContext, seed_author, seed_course};

async fn seeded() -> TestContext {
    let ctx = TestContext::new().await;
    seed_author(&ctx.db, "Nancy", "Rye", "1668-05-21T00:00:00+00:00", "Rum").await;
    seed_author(&ctx.db, "Berry", "Beak", "1650-07-23T00:00:00+00:00", "Ships").await;
    seed_author(&ctx.db, "Eli", "Bones", "1701-12-16T00:00:00+00:00", "Singing").await;
    seed_author(&ctx.db, "Berry", "Abbot", "1690-01-01T00:00:00+00:00", "Maps").await;
    ctx
}

fn names(body: &Value) -> Vec<String> {
    body["value"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap().to_owned())
        .collect()
}

fn rels(links: &Value) -> Vec<String> {
    links
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["rel"].as_str().unwrap().to_owned())
        .collect()
}

fn assert_problem(resp: &support::TestResponse, status: StatusCode) {
    assert_eq!(resp.status, status, "body: {}", resp.body);
    assert_eq!(resp.header("content-type"), Some(APPLICATION_PROBLEM_JSON));
    assert_eq!(resp.body["status"], json!(status.as_u16()));
}

// ==================== Author List Tests ====================

#[tokio::test]
async fn test_list_authors_default_order_and_pagination_header() {
    let ctx = seeded().await;

    let resp = ctx.get("/api/authors").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        names(&resp.body),
        vec!["Berry Abbot", "Berry Beak", "Eli Bones", "Nancy Rye"]
    );

    let meta: Value = serde_json::from_str(resp.header("x-pagination").unwrap()).unwrap();
    assert_eq!(
        meta,
        json!({ "totalCount": 4, "pageSize": 10, "currentPage": 1, "totalPages": 1 })
    );
    assert_eq!(rels(&resp.body["links"]), vec!["self"]);

    let first = &resp.body["value"][0];
    assert!(first["id"].is_string());
    assert!(first["age"].as_i64().unwrap() > 300);
    assert_eq!(first["mainCategory"], "Maps");
    assert_eq!(
        rels(&first["links"]),
        vec!["self", "create_course_for_author", "courses"]
    );
}

#[tokio::test]
async fn test_list_authors_paging_links() {
    let ctx = seeded().await;

    let first = ctx.get("/api/authors?pageSize=2").await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(names(&first.body), vec!["Berry Abbot", "Berry Beak"]);
    assert_eq!(rels(&first.body["links"]), vec!["self", "nextPage"]);
    let next = first.body["links"][1]["href"].as_str().unwrap();
    assert!(next.starts_with("/api/authors?"));
    assert!(next.contains("pageNumber=2"));
    assert!(next.contains("pageSize=2"));
    assert!(next.contains("orderBy=Name"));

    let second = ctx.get(next).await;
    assert_eq!(names(&second.body), vec!["Eli Bones", "Nancy Rye"]);
    assert_eq!(rels(&second.body["links"]), vec!["self", "previousPage"]);
}

#[tokio::test]
async fn test_list_authors_page_size_is_clamped() {
    let ctx = seeded().await;

    let resp = ctx.get("/api/authors?pageSize=500").await;
    let meta: Value = serde_json::from_str(resp.header("x-pagination").unwrap()).unwrap();
    assert_eq!(meta["pageSize"], 20);
}

#[tokio::test]
async fn test_list_authors_order_by_mapped_properties() {
    let ctx = seeded().await;

    // Age is mapped onto DateOfBirth with reversed direction: oldest first.
    let resp = ctx.get("/api/authors?orderBy=age%20desc").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        names(&resp.body),
        vec!["Berry Beak", "Nancy Rye", "Berry Abbot", "Eli Bones"]
    );

    let resp = ctx.get("/api/authors?orderBy=mainCategory%20desc,%20name").await;
    assert_eq!(
        names(&resp.body),
        vec!["Eli Bones", "Berry Beak", "Nancy Rye", "Berry Abbot"]
    );

    let resp = ctx.get("/api/authors?orderBy=Name%20DESC").await;
    assert_eq!(
        names(&resp.body),
        vec!["Nancy Rye", "Eli Bones", "Berry Beak", "Berry Abbot"]
    );
}

#[tokio::test]
async fn test_list_authors_rejects_unmappable_order_by() {
    let ctx = seeded().await;

    let resp = ctx.get("/api/authors?orderBy=dateOfBirth").await;
    assert_problem(&resp, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["code"], "COURSELIB_INVALID_ORDER_BY");

    let resp = ctx.get("/api/authors?orderBy=name%20sideways").await;
    assert_problem(&resp, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_authors_shapes_fields() {
    let ctx = seeded().await;

    let resp = ctx.get("/api/authors?fields=name,%20ID").await;
    assert_eq!(resp.status, StatusCode::OK);
    for item in resp.body["value"].as_array().unwrap() {
        let keys: Vec<&str> = item.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 3, "{item}");
        assert!(item.get("name").is_some());
        assert!(item.get("id").is_some());
        assert!(item.get("links").is_some());
        assert!(item.get("age").is_none());
    }
    let self_link = resp.body["links"][0]["href"].as_str().unwrap();
    assert!(self_link.contains("fields=name"));

    let resp = ctx.get("/api/authors?fields=name,salary").await;
    assert_problem(&resp, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["code"], "COURSELIB_INVALID_FIELDS");
}

#[tokio::test]
async fn test_list_authors_filters() {
    let ctx = seeded().await;

    let resp = ctx.get("/api/authors?mainCategory=%20Rum%20").await;
    assert_eq!(names(&resp.body), vec!["Nancy Rye"]);

    let resp = ctx.get("/api/authors?searchQuery=bo").await;
    assert_eq!(names(&resp.body), vec!["Berry Abbot", "Eli Bones"]);

    let resp = ctx.get("/api/authors?mainCategory=Ships&searchQuery=Nancy").await;
    assert!(names(&resp.body).is_empty());
    let meta: Value = serde_json::from_str(resp.header("x-pagination").unwrap()).unwrap();
    assert_eq!(meta["totalCount"], 0);
}

#[tokio::test]
async fn test_list_authors_search_treats_wildcards_literally() {
    let ctx = TestContext::new().await;
    seed_author(&ctx.db, "Ann", "Bonny", "1697-11-08T00:00:00+00:00", "Piracy").await;
    seed_author(&ctx.db, "Mary", "Read", "1685-01-01T00:00:00+00:00", "Piracy").await;
    seed_author(&ctx.db, "Percy", "Cent", "1700-01-01T00:00:00+00:00", "100% Rum").await;

    let resp = ctx.get("/api/authors?searchQuery=%25").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(names(&resp.body), vec!["Percy Cent"]);

    let resp = ctx.get("/api/authors?searchQuery=_").await;
    assert!(names(&resp.body).is_empty());
}

#[tokio::test]
async fn test_list_authors_orders_by_age_across_utc_offsets() {
    let ctx = TestContext::new().await;
    // 01:00Z, the older of the two
    seed_author(&ctx.db, "Tokyo", "Born", "1700-01-01T10:00:00+09:00", "Travel").await;
    seed_author(&ctx.db, "London", "Born", "1700-01-01T05:00:00+00:00", "Travel").await;

    let resp = ctx.get("/api/authors?orderBy=age%20desc").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(names(&resp.body), vec!["Tokyo Born", "London Born"]);

    let resp = ctx.get("/api/authors?orderBy=age").await;
    assert_eq!(names(&resp.body), vec!["London Born", "Tokyo Born"]);
}

#[tokio::test]
async fn test_list_authors_uses_configured_default_order() {
    let ctx = TestContext::with_config(CourseLibraryConfig {
        default_order_by: "age".to_owned(),
        ..CourseLibraryConfig::default()
    })
    .await;
    seed_author(&ctx.db, "Young", "One", "1900-01-01T00:00:00+00:00", "X").await;
    seed_author(&ctx.db, "Old", "One", "1800-01-01T00:00:00+00:00", "X").await;

    let resp = ctx.get("/api/authors").await;
    assert_eq!(names(&resp.body), vec!["Young One", "Old One"]);
}

#[tokio::test]
async fn test_head_authors_has_no_body() {
    let ctx = seeded().await;

    let resp = ctx
        .send(
            Request::builder()
                .method(Method::HEAD)
                .uri("/api/authors")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, Value::Null);
}

// ==================== Single Author Tests ====================

#[tokio::test]
async fn test_get_author_negotiates_representation() {
    let ctx = TestContext::new().await;
    let author = seed_author(&ctx.db, "Nancy", "Rye", "1668-05-21T00:00:00+00:00", "Rum").await;
    let uri = format!("/api/authors/{}", author.id);

    let plain = ctx.get(&uri).await;
    assert_eq!(plain.status, StatusCode::OK);
    assert_eq!(plain.header("content-type"), Some("application/json"));
    assert_eq!(plain.body["name"], "Nancy Rye");
    assert!(plain.body.get("links").is_none());

    let rich = ctx.get_accept(&uri, HATEOAS_JSON).await;
    assert_eq!(rich.status, StatusCode::OK);
    assert_eq!(rich.header("content-type"), Some(HATEOAS_JSON));
    assert_eq!(
        rels(&rich.body["links"]),
        vec!["self", "create_course_for_author", "courses"]
    );

    let any = ctx.get_accept(&uri, "text/html;q=0.9, */*;q=0.1").await;
    assert_eq!(any.status, StatusCode::OK);
    assert!(any.body.get("links").is_none());
}

#[tokio::test]
async fn test_get_author_with_fields_and_links() {
    let ctx = TestContext::new().await;
    let author = seed_author(&ctx.db, "Eli", "Bones", "1701-12-16T00:00:00+00:00", "Singing").await;

    let resp = ctx
        .get_accept(&format!("/api/authors/{}?fields=mainCategory", author.id), HATEOAS_JSON)
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["mainCategory"], "Singing");
    assert!(resp.body.get("name").is_none());
    assert_eq!(
        resp.body["links"][0]["href"],
        format!("/api/authors/{}?fields=mainCategory", author.id)
    );

    let resp = ctx.get(&format!("/api/authors/{}?fields=nope", author.id)).await;
    assert_problem(&resp, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_author_media_type_errors() {
    let ctx = TestContext::new().await;
    let author = seed_author(&ctx.db, "Eli", "Bones", "1701-12-16T00:00:00+00:00", "Singing").await;
    let uri = format!("/api/authors/{}", author.id);

    let resp = ctx.get_accept(&uri, "definitely not a media type").await;
    assert_problem(&resp, StatusCode::BAD_REQUEST);

    let resp = ctx.get_accept(&uri, "text/html").await;
    assert_problem(&resp, StatusCode::NOT_ACCEPTABLE);
}

#[tokio::test]
async fn test_get_author_not_found() {
    let ctx = TestContext::new().await;

    let resp = ctx.get(&format!("/api/authors/{}", Uuid::new_v4())).await;
    assert_problem(&resp, StatusCode::NOT_FOUND);
    assert_eq!(resp.body["code"], "COURSELIB_AUTHOR_NOT_FOUND");
}

#[tokio::test]
async fn test_create_author_with_courses() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .send_json(
            Method::POST,
            "/api/authors",
            &json!({
                "firstName": "Jaimy",
                "lastName": "Johnson",
                "dateOfBirth": "1980-07-23T00:00:00+00:00",
                "dateOfDeath": "2020-07-22T00:00:00+00:00",
                "mainCategory": "Maps",
                "courses": [
                    { "title": "Charting", "description": "Coastlines and shoals" }
                ]
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
    assert_eq!(resp.body["name"], "Jaimy Johnson");
    assert_eq!(resp.body["age"], 39);
    let id = resp.body["id"].as_str().unwrap().to_owned();
    let location = format!("/api/authors/{id}");
    assert_eq!(resp.header("location"), Some(location.as_str()));
    assert_eq!(rels(&resp.body["links"])[0], "self");

    let courses = ctx.get(&format!("{location}/courses")).await;
    assert_eq!(courses.status, StatusCode::OK);
    assert_eq!(courses.body.as_array().unwrap().len(), 1);
    assert_eq!(courses.body[0]["title"], "Charting");
    assert_eq!(courses.body[0]["authorId"], id.as_str());
}

#[tokio::test]
async fn test_create_author_validation_failure() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .send_json(
            Method::POST,
            "/api/authors",
            &json!({
                "firstName": "",
                "lastName": "Johnson",
                "dateOfBirth": "1980-07-23T00:00:00+00:00",
                "mainCategory": "Maps",
                "courses": [ { "title": "", "description": "x" } ]
            }),
        )
        .await;
    assert_problem(&resp, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = resp.body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"firstName"));
    assert!(fields.contains(&"courses[0].title"));

    let list = ctx.get("/api/authors").await;
    assert!(names(&list.body).is_empty());
}

#[tokio::test]
async fn test_create_author_malformed_body() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .send(
            Request::post("/api/authors")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await;
    assert_problem(&resp, StatusCode::BAD_REQUEST);
}

// ==================== Author Collection Tests ====================

#[tokio::test]
async fn test_author_collection_round_trip() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .send_json(
            Method::POST,
            "/api/authorcollections",
            &json!([
                {
                    "firstName": "Zed",
                    "lastName": "Last",
                    "dateOfBirth": "1900-01-01T00:00:00+00:00",
                    "mainCategory": "A"
                },
                {
                    "firstName": "Amy",
                    "lastName": "First",
                    "dateOfBirth": "1910-01-01T00:00:00+00:00",
                    "mainCategory": "B"
                }
            ]),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
    let location = resp.header("location").unwrap().to_owned();
    assert!(location.starts_with("/api/authorcollections/("));
    assert!(location.ends_with(')'));

    let fetched = ctx.get(&location).await;
    assert_eq!(fetched.status, StatusCode::OK);
    let fetched_names: Vec<&str> = fetched
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(fetched_names, vec!["Amy First", "Zed Last"]);
}

#[tokio::test]
async fn test_author_collection_errors() {
    let ctx = TestContext::new().await;
    let author = seed_author(&ctx.db, "Eli", "Bones", "1701-12-16T00:00:00+00:00", "Singing").await;

    let resp = ctx
        .get(&format!("/api/authorcollections/({},{})", author.id, Uuid::new_v4()))
        .await;
    assert_problem(&resp, StatusCode::NOT_FOUND);

    let resp = ctx.get("/api/authorcollections/(abc)").await;
    assert_problem(&resp, StatusCode::BAD_REQUEST);

    let resp = ctx
        .send_json(Method::POST, "/api/authorcollections", &json!([]))
        .await;
    assert_problem(&resp, StatusCode::BAD_REQUEST);
}

// ==================== Course Tests ====================

#[tokio::test]
async fn test_course_crud_operations() {
    let ctx = TestContext::new().await;
    let author = seed_author(&ctx.db, "Eli", "Bones", "1701-12-16T00:00:00+00:00", "Singing").await;
    let courses_uri = format!("/api/authors/{}/courses", author.id);

    // Create
    let created = ctx
        .send_json(
            Method::POST,
            &courses_uri,
            &json!({ "title": "Sea Shanties", "description": "Songs for hauling" }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    let course_id = created.body["id"].as_str().unwrap().to_owned();
    let course_uri = format!("{courses_uri}/{course_id}");
    assert_eq!(created.header("location"), Some(course_uri.as_str()));

    // Get
    let fetched = ctx.get(&course_uri).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["title"], "Sea Shanties");
    assert_eq!(fetched.body["authorId"], author.id.to_string());

    // Replace existing
    let replaced = ctx
        .send_json(
            Method::PUT,
            &course_uri,
            &json!({ "title": "Capstan Shanties", "description": "Songs for the capstan" }),
        )
        .await;
    assert_eq!(replaced.status, StatusCode::NO_CONTENT);
    assert_eq!(ctx.get(&course_uri).await.body["title"], "Capstan Shanties");

    // Delete
    let deleted = ctx.delete(&course_uri).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert_problem(&ctx.get(&course_uri).await, StatusCode::NOT_FOUND);
    assert_problem(&ctx.delete(&course_uri).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_creates_course_with_given_id() {
    let ctx = TestContext::new().await;
    let author = seed_author(&ctx.db, "Eli", "Bones", "1701-12-16T00:00:00+00:00", "Singing").await;
    let course_id = Uuid::new_v4();
    let uri = format!("/api/authors/{}/courses/{course_id}", author.id);

    let resp = ctx
        .send_json(
            Method::PUT,
            &uri,
            &json!({ "title": "Knots", "description": "Bowline and friends" }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
    assert_eq!(resp.body["id"], course_id.to_string());
    assert_eq!(resp.header("location"), Some(uri.as_str()));

    let resp = ctx
        .send_json(Method::PUT, &uri, &json!({ "title": "Knots" }))
        .await;
    assert_problem(&resp, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_course_validation_rules() {
    let ctx = TestContext::new().await;
    let author = seed_author(&ctx.db, "Eli", "Bones", "1701-12-16T00:00:00+00:00", "Singing").await;
    let uri = format!("/api/authors/{}/courses", author.id);

    let resp = ctx
        .send_json(Method::POST, &uri, &json!({ "title": "Same", "description": "Same" }))
        .await;
    assert_problem(&resp, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp.body["errors"][0]["field"], "course");

    let resp = ctx
        .send_json(Method::POST, &uri, &json!({ "title": "x".repeat(101) }))
        .await;
    assert_problem(&resp, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp.body["errors"][0]["field"], "title");
}

#[tokio::test]
async fn test_courses_of_unknown_author() {
    let ctx = TestContext::new().await;
    let missing = Uuid::new_v4();

    assert_problem(
        &ctx.get(&format!("/api/authors/{missing}/courses")).await,
        StatusCode::NOT_FOUND,
    );
    let resp = ctx
        .send_json(
            Method::POST,
            &format!("/api/authors/{missing}/courses"),
            &json!({ "title": "Orphan", "description": "No author" }),
        )
        .await;
    assert_problem(&resp, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_course() {
    let ctx = TestContext::new().await;
    let author = seed_author(&ctx.db, "Eli", "Bones", "1701-12-16T00:00:00+00:00", "Singing").await;
    let course = seed_course(&ctx.db, author.id, "Rigging", "Ropes and blocks").await;
    let uri = format!("/api/authors/{}/courses/{}", author.id, course.id);

    let patch = |ops: Value| {
        Request::patch(uri.as_str())
            .header(header::CONTENT_TYPE, "application/json-patch+json")
            .body(Body::from(ops.to_string()))
            .unwrap()
    };

    let resp = ctx
        .send(patch(json!([
            { "op": "replace", "path": "/title", "value": "Advanced Rigging" }
        ])))
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT, "{}", resp.body);
    let fetched = ctx.get(&uri).await;
    assert_eq!(fetched.body["title"], "Advanced Rigging");
    assert_eq!(fetched.body["description"], "Ropes and blocks");

    // Operation against a missing path is an invalid patch.
    let resp = ctx
        .send(patch(json!([
            { "op": "replace", "path": "/missing/deep", "value": 1 }
        ])))
        .await;
    assert_problem(&resp, StatusCode::BAD_REQUEST);

    // Patched document violates the update rules.
    let resp = ctx
        .send(patch(json!([
            { "op": "replace", "path": "/description", "value": null }
        ])))
        .await;
    assert_problem(&resp, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(ctx.get(&uri).await.body["title"], "Advanced Rigging");
}
