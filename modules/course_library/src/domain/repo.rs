use async_trait::async_trait;
use shaping::ResolvedSortStep;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::models::{Author, Course};
use crate::domain::paging::{PageRequest, PagedList};

/// Author list filters; blank values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorFilter {
    /// Exact main category match.
    pub main_category: Option<String>,
    /// Substring match on main category, first name or last name.
    pub search_query: Option<String>,
}

impl AuthorFilter {
    #[must_use]
    pub fn new(main_category: Option<&str>, search_query: Option<&str>) -> Self {
        fn normalize(v: Option<&str>) -> Option<String> {
            v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned)
        }
        Self {
            main_category: normalize(main_category),
            search_query: normalize(search_query),
        }
    }
}

/// Persistence port for authors and their courses.
#[async_trait]
pub trait CourseLibraryRepository: Send + Sync {
    /// One page of authors matching `filter`, ordered by `sort`.
    async fn list_authors(
        &self,
        filter: &AuthorFilter,
        page: PageRequest,
        sort: &[ResolvedSortStep],
    ) -> Result<PagedList<Author>, DomainError>;

    async fn get_author(&self, id: Uuid) -> Result<Option<Author>, DomainError>;

    /// Authors whose ids are in `ids`; missing ids are simply absent.
    async fn get_authors(&self, ids: &[Uuid]) -> Result<Vec<Author>, DomainError>;

    async fn author_exists(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Insert authors with their courses atomically.
    async fn insert_authors(&self, authors: Vec<(Author, Vec<Course>)>) -> Result<(), DomainError>;

    async fn list_courses(&self, author_id: Uuid) -> Result<Vec<Course>, DomainError>;

    async fn get_course(
        &self,
        author_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Course>, DomainError>;

    async fn insert_course(&self, course: Course) -> Result<(), DomainError>;

    async fn update_course(&self, course: Course) -> Result<(), DomainError>;

    /// Returns `false` when nothing was deleted.
    async fn delete_course(&self, author_id: Uuid, course_id: Uuid) -> Result<bool, DomainError>;
}
