//! Field projection of record shapes into dynamically keyed records.
//!
//! Projection resolves the requested attribute list once per call and then reads
//! each record through the static attribute table, so shaping a page of records
//! costs one lookup pass plus one read per attribute and record.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::ShapingError;
use crate::shape::{Attribute, RecordShape, field_tokens};
use crate::value::FieldValue;

/// Ordered `name -> value` projection of a single record.
///
/// Keys use the declared casing of the source attribute and appear either in
/// request order or, for an unconstrained projection, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectedRecord {
    entries: Vec<(&'static str, FieldValue)>,
}

impl ProjectedRecord {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ProjectedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Resolve a field list into the attributes to read, in output order.
///
/// Repeated tokens (in any casing) are kept once, at their first position.
fn resolve<T: RecordShape>(
    fields: Option<&str>,
) -> Result<Vec<&'static Attribute<T>>, ShapingError> {
    let mut selected: Vec<&'static Attribute<T>> = Vec::new();
    let mut constrained = false;

    for token in field_tokens(fields) {
        constrained = true;
        let attr = T::attribute(token)
            .ok_or_else(|| ShapingError::unknown_property(token, T::SHAPE_NAME))?;
        if !selected.iter().any(|a| std::ptr::eq(*a, attr)) {
            selected.push(attr);
        }
    }

    if !constrained {
        selected.extend(T::attributes());
    }
    Ok(selected)
}

fn read_all<T: RecordShape>(source: &T, attrs: &[&'static Attribute<T>]) -> ProjectedRecord {
    ProjectedRecord {
        entries: attrs.iter().map(|a| (a.name(), a.read(source))).collect(),
    }
}

/// Project one record down to the attributes named in `fields`.
///
/// # Errors
/// [`ShapingError::UnknownProperty`] naming the first token with no matching
/// attribute; no partial result is produced.
pub fn shape<T: RecordShape>(
    source: &T,
    fields: Option<&str>,
) -> Result<ProjectedRecord, ShapingError> {
    let attrs = resolve::<T>(fields)?;
    Ok(read_all(source, &attrs))
}

/// Project every record of `sources`, returning a fully materialized list.
///
/// # Errors
/// Same as [`shape`]; the field list is validated before any record is read, so
/// an empty input with a bad field list still fails.
pub fn shape_all<'a, T, I>(
    sources: I,
    fields: Option<&str>,
) -> Result<Vec<ProjectedRecord>, ShapingError>
where
    T: RecordShape,
    I: IntoIterator<Item = &'a T>,
{
    let attrs = resolve::<T>(fields)?;
    Ok(sources.into_iter().map(|s| read_all(s, &attrs)).collect())
}
