//! Domain service: business rules over the repository port.
//!
//! The service never sees DTOs or HTTP types. Sort expressions arrive already
//! translated into storage sort steps; field projection happens after the
//! service returns.

use std::sync::Arc;

use shaping::{ResolvedSortStep, sort_records};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::config::CourseLibraryConfig;
use crate::domain::error::DomainError;
use crate::domain::models::{Author, Course, CourseData, NewAuthor, Upserted};
use crate::domain::paging::{PageRequest, PagedList};
use crate::domain::repo::{AuthorFilter, CourseLibraryRepository};
use crate::domain::validation::{
    CourseIntent, ValidationViolation, validate_course, validate_new_author,
};

pub struct Service {
    repo: Arc<dyn CourseLibraryRepository>,
    config: CourseLibraryConfig,
}

impl Service {
    #[must_use]
    pub fn new(repo: Arc<dyn CourseLibraryRepository>, config: CourseLibraryConfig) -> Self {
        Self { repo, config }
    }

    #[must_use]
    pub fn config(&self) -> &CourseLibraryConfig {
        &self.config
    }

    /// Window for a list request, with the page size clamped to configuration.
    #[must_use]
    pub fn page_request(&self, page_number: Option<u32>, page_size: Option<u32>) -> PageRequest {
        PageRequest::new(
            page_number.unwrap_or(1),
            self.config.effective_page_size(page_size),
        )
    }

    /// # Errors
    /// Repository failures.
    #[instrument(skip(self, sort), fields(page = page.page_number, size = page.page_size))]
    pub async fn list_authors(
        &self,
        filter: &AuthorFilter,
        page: PageRequest,
        sort: &[ResolvedSortStep],
    ) -> Result<PagedList<Author>, DomainError> {
        let authors = self.repo.list_authors(filter, page, sort).await?;
        debug!(
            total = authors.total_count,
            returned = authors.items.len(),
            "Listed authors"
        );
        Ok(authors)
    }

    /// # Errors
    /// [`DomainError::AuthorNotFound`] or repository failures.
    pub async fn get_author(&self, id: Uuid) -> Result<Author, DomainError> {
        self.repo
            .get_author(id)
            .await?
            .ok_or_else(|| DomainError::author_not_found(id))
    }

    /// Fetch a fixed set of authors, all of which must exist, ordered by `sort`.
    ///
    /// # Errors
    /// [`DomainError::AuthorsMissing`] when any id is unknown;
    /// [`DomainError::Configuration`] when a sort step names no author attribute.
    pub async fn get_author_collection(
        &self,
        ids: &[Uuid],
        sort: &[ResolvedSortStep],
    ) -> Result<Vec<Author>, DomainError> {
        let mut unique: Vec<Uuid> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(id) {
                unique.push(*id);
            }
        }

        let mut authors = self.repo.get_authors(&unique).await?;
        if authors.len() != unique.len() {
            return Err(DomainError::AuthorsMissing {
                requested: unique.len(),
                found: authors.len(),
            });
        }
        sort_records(&mut authors, sort).map_err(|e| DomainError::configuration(e.to_string()))?;
        Ok(authors)
    }

    /// # Errors
    /// [`DomainError::Validation`] or repository failures.
    pub async fn create_author(&self, new_author: NewAuthor) -> Result<Author, DomainError> {
        let violations = validate_new_author(&new_author);
        if !violations.is_empty() {
            return Err(DomainError::validation(violations));
        }

        let (author, courses) = Self::materialize(new_author);
        let created = author.clone();
        self.repo.insert_authors(vec![(author, courses)]).await?;
        info!(author_id = %created.id, "Created author");
        Ok(created)
    }

    /// Create several authors in one transaction; nothing is stored if any
    /// entry is invalid.
    ///
    /// # Errors
    /// [`DomainError::Validation`] with violations prefixed by the entry index,
    /// or repository failures.
    pub async fn create_authors(
        &self,
        new_authors: Vec<NewAuthor>,
    ) -> Result<Vec<Author>, DomainError> {
        let violations: Vec<ValidationViolation> = new_authors
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                validate_new_author(a).into_iter().map(move |mut v| {
                    v.field = format!("[{i}].{}", v.field);
                    v
                })
            })
            .collect();
        if !violations.is_empty() {
            return Err(DomainError::validation(violations));
        }

        let rows: Vec<(Author, Vec<Course>)> =
            new_authors.into_iter().map(Self::materialize).collect();
        let created: Vec<Author> = rows.iter().map(|(a, _)| a.clone()).collect();
        self.repo.insert_authors(rows).await?;
        info!(count = created.len(), "Created author collection");
        Ok(created)
    }

    fn materialize(new_author: NewAuthor) -> (Author, Vec<Course>) {
        let author = Author {
            id: Uuid::new_v4(),
            first_name: new_author.first_name,
            last_name: new_author.last_name,
            date_of_birth: new_author.date_of_birth,
            date_of_death: new_author.date_of_death,
            main_category: new_author.main_category,
        };
        let courses = new_author
            .courses
            .into_iter()
            .map(|c| Course {
                id: Uuid::new_v4(),
                title: c.title,
                description: c.description,
                author_id: author.id,
            })
            .collect();
        (author, courses)
    }

    async fn ensure_author(&self, author_id: Uuid) -> Result<(), DomainError> {
        if self.repo.author_exists(author_id).await? {
            Ok(())
        } else {
            Err(DomainError::author_not_found(author_id))
        }
    }

    /// # Errors
    /// [`DomainError::AuthorNotFound`] or repository failures.
    pub async fn list_courses(&self, author_id: Uuid) -> Result<Vec<Course>, DomainError> {
        self.ensure_author(author_id).await?;
        self.repo.list_courses(author_id).await
    }

    /// # Errors
    /// [`DomainError::AuthorNotFound`], [`DomainError::CourseNotFound`] or
    /// repository failures.
    pub async fn get_course(
        &self,
        author_id: Uuid,
        course_id: Uuid,
    ) -> Result<Course, DomainError> {
        self.ensure_author(author_id).await?;
        self.repo
            .get_course(author_id, course_id)
            .await?
            .ok_or_else(|| DomainError::course_not_found(author_id, course_id))
    }

    /// # Errors
    /// [`DomainError::AuthorNotFound`], [`DomainError::Validation`] or
    /// repository failures.
    pub async fn create_course(
        &self,
        author_id: Uuid,
        data: CourseData,
    ) -> Result<Course, DomainError> {
        self.ensure_author(author_id).await?;
        Self::check(&data, CourseIntent::Create)?;

        let course = Course {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            author_id,
        };
        self.repo.insert_course(course.clone()).await?;
        info!(%author_id, course_id = %course.id, "Created course");
        Ok(course)
    }

    /// Replace a course, creating it under the given id if it does not exist.
    ///
    /// # Errors
    /// [`DomainError::AuthorNotFound`], [`DomainError::Validation`] or
    /// repository failures.
    pub async fn upsert_course(
        &self,
        author_id: Uuid,
        course_id: Uuid,
        data: CourseData,
    ) -> Result<Upserted, DomainError> {
        self.ensure_author(author_id).await?;
        Self::check(&data, CourseIntent::Update)?;

        let course = Course {
            id: course_id,
            title: data.title,
            description: data.description,
            author_id,
        };
        if self.repo.get_course(author_id, course_id).await?.is_some() {
            self.repo.update_course(course.clone()).await?;
            info!(%author_id, %course_id, "Updated course");
            Ok(Upserted::Updated(course))
        } else {
            self.repo.insert_course(course.clone()).await?;
            info!(%author_id, %course_id, "Created course by upsert");
            Ok(Upserted::Created(course))
        }
    }

    /// Overwrite the editable fields of an existing course.
    ///
    /// # Errors
    /// [`DomainError::AuthorNotFound`], [`DomainError::CourseNotFound`],
    /// [`DomainError::Validation`] or repository failures.
    pub async fn update_course(
        &self,
        author_id: Uuid,
        course_id: Uuid,
        data: CourseData,
    ) -> Result<Course, DomainError> {
        let mut course = self.get_course(author_id, course_id).await?;
        Self::check(&data, CourseIntent::Update)?;

        course.title = data.title;
        course.description = data.description;
        self.repo.update_course(course.clone()).await?;
        info!(%author_id, %course_id, "Updated course");
        Ok(course)
    }

    /// # Errors
    /// [`DomainError::AuthorNotFound`], [`DomainError::CourseNotFound`] or
    /// repository failures.
    pub async fn delete_course(&self, author_id: Uuid, course_id: Uuid) -> Result<(), DomainError> {
        self.ensure_author(author_id).await?;
        if self.repo.delete_course(author_id, course_id).await? {
            info!(%author_id, %course_id, "Deleted course");
            Ok(())
        } else {
            Err(DomainError::course_not_found(author_id, course_id))
        }
    }

    fn check(data: &CourseData, intent: CourseIntent) -> Result<(), DomainError> {
        let violations = validate_course(data, intent);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(violations))
        }
    }
}
