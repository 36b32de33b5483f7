#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Test support utilities for `course_library` integration tests.
//!
//! Provides an in-memory database, a ready router and request helpers.

#![allow(dead_code)] // Support module provides utilities that may not all be used

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use chrono::{DateTime, FixedOffset};
use http_body_util::BodyExt;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt; // for oneshot
use uuid::Uuid;

use course_library::domain::models::{Author, Course};
use course_library::infra::storage::entity::{author, course};
use course_library::{CourseLibrary, CourseLibraryConfig};

/// Create a fresh in-memory `SQLite` database with migrations applied.
///
/// # Panics
/// Panics if the database connection or migrations fail.
pub async fn inmem_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    let module = CourseLibrary::new(db.clone(), CourseLibraryConfig::default())
        .expect("Failed to build module");
    module.migrate().await.expect("Failed to run migrations");

    db
}

/// Parse an RFC 3339 timestamp.
pub fn at(ts: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(ts).expect("valid timestamp")
}

/// Seed an author directly into the database.
pub async fn seed_author(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
    born: &str,
    main_category: &str,
) -> Author {
    let author = Author {
        id: Uuid::new_v4(),
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        date_of_birth: at(born),
        date_of_death: None,
        main_category: main_category.to_owned(),
    };
    author::ActiveModel::from(author.clone())
        .insert(db)
        .await
        .expect("Failed to seed author");
    author
}

/// Seed a course for `author_id` directly into the database.
pub async fn seed_course(
    db: &DatabaseConnection,
    author_id: Uuid,
    title: &str,
    description: &str,
) -> Course {
    let course = Course {
        id: Uuid::new_v4(),
        title: title.to_owned(),
        description: Some(description.to_owned()),
        author_id,
    };
    course::ActiveModel::from(course.clone())
        .insert(db)
        .await
        .expect("Failed to seed course");
    course
}

/// Response captured for assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub struct TestContext {
    pub db: DatabaseConnection,
    pub app: Router,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_config(CourseLibraryConfig::default()).await
    }

    pub async fn with_config(config: CourseLibraryConfig) -> Self {
        let db = inmem_db().await;
        let module = CourseLibrary::new(db.clone(), config).expect("Failed to build module");
        Self {
            db,
            app: module.router(),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body is JSON")
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn get_accept(&self, uri: &str, accept: &str) -> TestResponse {
        self.send(
            Request::get(uri)
                .header(header::ACCEPT, accept)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn send_json(&self, method: Method, uri: &str, body: &Value) -> TestResponse {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(
            Request::delete(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }
}
