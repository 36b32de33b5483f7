use async_trait::async_trait;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use shaping::ResolvedSortStep;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::models::{Author, Course};
use crate::domain::paging::{PageRequest, PagedList};
use crate::domain::repo::{AuthorFilter, CourseLibraryRepository};
use crate::infra::storage::db_err;
use crate::infra::storage::entity::{author, course};
use crate::infra::storage::sort_ext::{ColumnMap, SortStepsExt, author_columns};

/// ORM-based implementation of the `CourseLibraryRepository` trait.
pub struct SeaOrmCourseLibraryRepository {
    db: DatabaseConnection,
    author_columns: ColumnMap<author::Entity>,
}

impl SeaOrmCourseLibraryRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            author_columns: author_columns(),
        }
    }

    fn author_condition(filter: &AuthorFilter) -> Condition {
        let mut cond = Condition::all();
        if let Some(category) = &filter.main_category {
            cond = cond.add(author::Column::MainCategory.eq(category.as_str()));
        }
        if let Some(q) = &filter.search_query {
            let pattern = format!("%{}%", escape_like(q));
            let mut any = Condition::any();
            for column in [
                author::Column::MainCategory,
                author::Column::FirstName,
                author::Column::LastName,
            ] {
                any = any.add(
                    Expr::col((author::Entity, column))
                        .like(LikeExpr::new(pattern.clone()).escape('\\')),
                );
            }
            cond = cond.add(any);
        }
        cond
    }
}

/// Escape `LIKE` metacharacters so `q` only ever matches literally.
fn escape_like(q: &str) -> String {
    let mut escaped = String::with_capacity(q.len());
    for ch in q.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[async_trait]
impl CourseLibraryRepository for SeaOrmCourseLibraryRepository {
    async fn list_authors(
        &self,
        filter: &AuthorFilter,
        page: PageRequest,
        sort: &[ResolvedSortStep],
    ) -> Result<PagedList<Author>, DomainError> {
        let base = author::Entity::find().filter(Self::author_condition(filter));

        let total = base.clone().count(&self.db).await.map_err(db_err)?;

        let models = base
            .order_by_steps(sort, &self.author_columns)?
            // tie-break so pages never overlap
            .order_by_asc(author::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.page_size))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(PagedList::new(
            models.into_iter().map(Into::into).collect(),
            total,
            page,
        ))
    }

    async fn get_author(&self, id: Uuid) -> Result<Option<Author>, DomainError> {
        let found = author::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn get_authors(&self, ids: &[Uuid]) -> Result<Vec<Author>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = author::Entity::find()
            .filter(author::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn author_exists(&self, id: Uuid) -> Result<bool, DomainError> {
        let count = author::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn insert_authors(
        &self,
        authors: Vec<(Author, Vec<Course>)>,
    ) -> Result<(), DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        for (a, courses) in authors {
            author::ActiveModel::from(a)
                .insert(&txn)
                .await
                .map_err(db_err)?;
            for c in courses {
                course::ActiveModel::from(c)
                    .insert(&txn)
                    .await
                    .map_err(db_err)?;
            }
        }
        txn.commit().await.map_err(db_err)
    }

    async fn list_courses(&self, author_id: Uuid) -> Result<Vec<Course>, DomainError> {
        let models = course::Entity::find()
            .filter(course::Column::AuthorId.eq(author_id))
            .order_by_asc(course::Column::Title)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_course(
        &self,
        author_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Course>, DomainError> {
        let found = course::Entity::find_by_id(course_id)
            .filter(course::Column::AuthorId.eq(author_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn insert_course(&self, c: Course) -> Result<(), DomainError> {
        course::ActiveModel::from(c)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn update_course(&self, c: Course) -> Result<(), DomainError> {
        course::ActiveModel::from(c)
            .update(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete_course(&self, author_id: Uuid, course_id: Uuid) -> Result<bool, DomainError> {
        let result = course::Entity::delete_many()
            .filter(course::Column::Id.eq(course_id))
            .filter(course::Column::AuthorId.eq(author_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
