//! Sort expression parsing and translation into storage sort steps.
//!
//! A sort expression is a comma-separated list of clauses, each a public key
//! optionally followed by a whitespace-delimited `asc` or `desc` token:
//! `"age desc, name"`. Clauses are translated through a [`PropertyMapping`]
//! into [`ResolvedSortStep`]s: a clause fans out into one step per destination
//! field and its direction flips when the mapping entry is reversed.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::ShapingError;
use crate::mapping::PropertyMapping;
use crate::shape::RecordShape;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDir {
    #[default]
    #[serde(rename = "asc")]
    Asc,
    #[serde(rename = "desc")]
    Desc,
}

impl SortDir {
    /// Reverse the sort direction (Asc <-> Desc)
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }

    #[must_use]
    pub fn is_descending(self) -> bool {
        self == SortDir::Desc
    }

    fn parse_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(SortDir::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(SortDir::Desc)
        } else {
            None
        }
    }
}

/// One parsed clause of a caller sort expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortClause<'a> {
    pub property_name: &'a str,
    pub dir: SortDir,
}

/// Query-ready sort unit on a storage field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSortStep {
    pub storage_field: String,
    pub dir: SortDir,
}

impl ResolvedSortStep {
    #[must_use]
    pub fn new(storage_field: impl Into<String>, dir: SortDir) -> Self {
        Self {
            storage_field: storage_field.into(),
            dir,
        }
    }
}

/// Parse one clause (`"name"`, `"age desc"`, `"Id ASC"`).
///
/// # Errors
/// [`ShapingError::InvalidSortDirection`] if the clause carries a trailing token
/// other than `asc`/`desc`, or more than one trailing token.
pub fn parse_clause(clause: &str) -> Result<SortClause<'_>, ShapingError> {
    let trimmed = clause.trim();
    let mut parts = trimmed.split_whitespace();
    let property_name = parts.next().unwrap_or_default();

    let dir = match (parts.next(), parts.next()) {
        (None, _) => SortDir::Asc,
        (Some(token), None) => SortDir::parse_token(token)
            .ok_or_else(|| ShapingError::InvalidSortDirection(trimmed.to_owned()))?,
        (Some(_), Some(_)) => return Err(ShapingError::InvalidSortDirection(trimmed.to_owned())),
    };

    Ok(SortClause { property_name, dir })
}

fn clauses(order_by: Option<&str>) -> impl Iterator<Item = &str> {
    order_by
        .filter(|s| !s.trim().is_empty())
        .into_iter()
        .flat_map(|s| s.split(','))
}

/// Translate a sort expression into ordered storage sort steps.
///
/// An absent or blank expression yields no steps. Steps follow clause order,
/// then destination-field order within each clause.
///
/// # Errors
/// - [`ShapingError::UnknownSortKey`] for a clause whose key is not mapped
/// - [`ShapingError::InvalidSortDirection`] for a malformed clause
pub fn apply_sort(
    order_by: Option<&str>,
    mapping: &PropertyMapping,
) -> Result<Vec<ResolvedSortStep>, ShapingError> {
    let mut steps = Vec::new();
    for raw in clauses(order_by) {
        let clause = parse_clause(raw)?;
        let entry = mapping
            .get(clause.property_name)
            .ok_or_else(|| ShapingError::UnknownSortKey(clause.property_name.to_owned()))?;

        let dir = if entry.reverse() {
            clause.dir.reverse()
        } else {
            clause.dir
        };
        steps.extend(
            entry
                .destination_fields()
                .iter()
                .map(|field| ResolvedSortStep::new(field.clone(), dir)),
        );
    }
    Ok(steps)
}

/// `true` when [`apply_sort`] would succeed for `order_by` on `mapping`.
#[must_use]
pub fn is_valid_sort_expression(order_by: Option<&str>, mapping: &PropertyMapping) -> bool {
    clauses(order_by).all(|raw| {
        parse_clause(raw).is_ok_and(|clause| mapping.contains_key(clause.property_name))
    })
}

/// Stable in-memory sort of records by resolved steps.
///
/// Each step's storage field is looked up (case-insensitively) as an attribute
/// of `T`. With no steps the slice keeps its order.
///
/// # Errors
/// [`ShapingError::UnknownProperty`] when a storage field is not an attribute of
/// `T`; the slice is left untouched in that case.
pub fn sort_records<T: RecordShape>(
    records: &mut [T],
    steps: &[ResolvedSortStep],
) -> Result<(), ShapingError> {
    let keys = steps
        .iter()
        .map(|step| {
            T::attribute(&step.storage_field)
                .map(|attr| (attr, step.dir))
                .ok_or_else(|| ShapingError::unknown_property(&step.storage_field, T::SHAPE_NAME))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if keys.is_empty() {
        return Ok(());
    }

    records.sort_by(|a, b| {
        keys.iter()
            .map(|(attr, dir)| {
                let ord = attr.read(a).sort_cmp(&attr.read(b));
                match dir {
                    SortDir::Asc => ord,
                    SortDir::Desc => ord.reverse(),
                }
            })
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
    Ok(())
}
