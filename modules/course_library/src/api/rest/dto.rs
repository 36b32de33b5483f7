//! REST DTOs and their record shapes.
//!
//! Shape attribute names match the JSON (camelCase) property names, so the
//! `fields` query parameter and projected keys use the same vocabulary as the
//! full representation.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use shaping::{PropertyMapping, PropertyMappingRegistry, ShapingError, record_shape};
use uuid::Uuid;

use crate::domain::models::{Author, Course, CourseData, NewAuthor};

/// Public representation of an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub main_category: String,
}

record_shape! {
    AuthorDto {
        "id" => |a| a.id,
        "name" => |a| a.name.clone(),
        "age" => |a| a.age,
        "mainCategory" => |a| a.main_category.clone(),
    }
}

impl AuthorDto {
    #[must_use]
    pub fn from_author(author: &Author, now: DateTime<Utc>) -> Self {
        Self {
            id: author.id,
            name: author.full_name(),
            age: author.age_at(now),
            main_category: author.main_category.clone(),
        }
    }
}

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        Self::from_author(author, Utc::now())
    }
}

/// Public representation of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

record_shape! {
    CourseDto {
        "id" => |c| c.id,
        "title" => |c| c.title.clone(),
        "description" => |c| c.description.clone(),
        "authorId" => |c| c.author_id,
    }
}

impl From<Course> for CourseDto {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            author_id: c.author_id,
        }
    }
}

/// Request body for creating an author, optionally with a date of death and
/// an initial list of courses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorCreationDto {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub date_of_birth: DateTime<FixedOffset>,
    #[serde(default)]
    pub date_of_death: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub main_category: String,
    #[serde(default)]
    pub courses: Vec<CourseCreationDto>,
}

impl From<AuthorCreationDto> for NewAuthor {
    fn from(dto: AuthorCreationDto) -> Self {
        Self {
            first_name: dto.first_name,
            last_name: dto.last_name,
            date_of_birth: dto.date_of_birth,
            date_of_death: dto.date_of_death,
            main_category: dto.main_category,
            courses: dto.courses.into_iter().map(Into::into).collect(),
        }
    }
}

/// Request body for creating a course.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCreationDto {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<CourseCreationDto> for CourseData {
    fn from(dto: CourseCreationDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
        }
    }
}

/// Request body for replacing a course; also the document JSON Patch
/// operations are applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseUpdateDto {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<CourseUpdateDto> for CourseData {
    fn from(dto: CourseUpdateDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
        }
    }
}

impl From<&Course> for CourseUpdateDto {
    fn from(c: &Course) -> Self {
        Self {
            title: c.title.clone(),
            description: c.description.clone(),
        }
    }
}

/// Query parameters of the author list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorsResourceParameters {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub main_category: Option<String>,
    pub search_query: Option<String>,
    pub order_by: Option<String>,
    pub fields: Option<String>,
}

/// `fields` query parameter of single-resource endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldsQuery {
    pub fields: Option<String>,
}

/// Hypermedia link attached to HATEOAS representations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDto {
    pub href: String,
    pub rel: String,
    pub method: String,
}

impl LinkDto {
    #[must_use]
    pub fn new(href: impl Into<String>, rel: &str, method: &str) -> Self {
        Self {
            href: href.into(),
            rel: rel.to_owned(),
            method: method.to_owned(),
        }
    }
}

/// Sort mappings from public DTO keys to author storage fields.
///
/// # Errors
/// [`ShapingError::InvalidArgument`] if a table is malformed.
pub fn property_mappings() -> Result<PropertyMappingRegistry, ShapingError> {
    let author = PropertyMapping::builder()
        .map("Id", ["Id"])
        .map("MainCategory", ["MainCategory"])
        .map_reversed("Age", ["DateOfBirth"])
        .map("Name", ["FirstName", "LastName"])
        .build()?;

    Ok(PropertyMappingRegistry::new().register::<AuthorDto, Author>(author))
}
