#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Response shaping and sort-key mapping for REST resources.
//!
//! - [`has_properties`] checks a caller field list against a [`RecordShape`]
//! - [`shape`] / [`shape_all`] project records into [`ProjectedRecord`]s
//! - [`PropertyMapping`] / [`PropertyMappingRegistry`] hold the public sort key
//!   to storage field tables, one per DTO/entity pair
//! - [`apply_sort`] translates a sort expression into [`ResolvedSortStep`]s and
//!   [`PropertyMappingRegistry::valid_mapping_exists`] checks it beforehand
//!
//! Everything here is synchronous and allocation-only; tables are built once
//! and shared read-only.

pub mod checker;
pub mod error;
pub mod mapping;
pub mod projector;
pub mod shape;
pub mod sort;
pub mod value;

pub use checker::has_properties;
pub use error::ShapingError;
pub use mapping::{
    PropertyMapping, PropertyMappingBuilder, PropertyMappingRegistry, PropertyMappingValue,
};
pub use projector::{ProjectedRecord, shape, shape_all};
pub use shape::{Attribute, AttributeReader, RecordShape, field_tokens};
pub use sort::{
    ResolvedSortStep, SortClause, SortDir, apply_sort, is_valid_sort_expression, parse_clause,
    sort_records,
};
pub use value::FieldValue;
