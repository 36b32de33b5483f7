//! Applying translated sort steps to `SeaORM` selects.
//!
//! Storage field names coming out of the property mapping are resolved to
//! columns through a case-insensitive [`ColumnMap`]. This is the only place that
//! knows both the storage field vocabulary and the entity's `Column` enum.

use std::collections::HashMap;

use sea_orm::{EntityTrait, Order, QueryOrder, Select};
use shaping::{ResolvedSortStep, SortDir};

use crate::domain::error::DomainError;
use crate::infra::storage::entity::author;

/// Storage field name to column lookup for one entity.
pub struct ColumnMap<E: EntityTrait> {
    map: HashMap<String, E::Column>,
}

impl<E: EntityTrait> Default for ColumnMap<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityTrait> ColumnMap<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    #[must_use]
    pub fn insert(mut self, field: impl Into<String>, col: E::Column) -> Self {
        self.map.insert(field.into().to_lowercase(), col);
        self
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<E::Column> {
        self.map.get(&field.to_lowercase()).copied()
    }
}

/// Columns addressable by author sort mappings.
#[must_use]
pub fn author_columns() -> ColumnMap<author::Entity> {
    ColumnMap::new()
        .insert("Id", author::Column::Id)
        .insert("FirstName", author::Column::FirstName)
        .insert("LastName", author::Column::LastName)
        .insert("DateOfBirth", author::Column::DateOfBirth)
        .insert("DateOfDeath", author::Column::DateOfDeath)
        .insert("MainCategory", author::Column::MainCategory)
}

fn to_order(dir: SortDir) -> Order {
    match dir {
        SortDir::Asc => Order::Asc,
        SortDir::Desc => Order::Desc,
    }
}

pub trait SortStepsExt<E: EntityTrait>: Sized {
    /// Append `ORDER BY` terms for `steps`, in order.
    ///
    /// # Errors
    /// [`DomainError::Configuration`] when a step names a field with no column;
    /// that indicates a mapping table out of sync with the entity.
    fn order_by_steps(
        self,
        steps: &[ResolvedSortStep],
        columns: &ColumnMap<E>,
    ) -> Result<Self, DomainError>;
}

impl<E: EntityTrait> SortStepsExt<E> for Select<E> {
    fn order_by_steps(
        self,
        steps: &[ResolvedSortStep],
        columns: &ColumnMap<E>,
    ) -> Result<Self, DomainError> {
        steps.iter().try_fold(self, |query, step| {
            let col = columns.get(&step.storage_field).ok_or_else(|| {
                DomainError::configuration(format!(
                    "storage field '{}' has no column",
                    step.storage_field
                ))
            })?;
            Ok(query.order_by(col, to_order(step.dir)))
        })
    }
}
