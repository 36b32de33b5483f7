//! Sort-key mapping tables and their per-type-pair registry.
//!
//! A [`PropertyMapping`] translates the public sort keys of one DTO into the
//! storage fields of one entity. Keys are matched case-insensitively, the same
//! way the storage field maps of the ORM layer normalise their keys.

use std::any::{TypeId, type_name};
use std::collections::HashMap;

use crate::error::ShapingError;

/// Translation of one public sort key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyMappingValue {
    destination_fields: Vec<String>,
    reverse: bool,
}

impl PropertyMappingValue {
    /// # Errors
    /// [`ShapingError::InvalidArgument`] if `destination_fields` is empty or
    /// contains a blank name.
    pub fn new<I, S>(destination_fields: I, reverse: bool) -> Result<Self, ShapingError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let destination_fields: Vec<String> =
            destination_fields.into_iter().map(Into::into).collect();
        if destination_fields.is_empty() {
            return Err(ShapingError::invalid_argument(
                "destination field list must not be empty",
            ));
        }
        if destination_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ShapingError::invalid_argument(
                "destination field name must not be blank",
            ));
        }
        Ok(Self {
            destination_fields,
            reverse,
        })
    }

    #[must_use]
    pub fn destination_fields(&self) -> &[String] {
        &self.destination_fields
    }

    /// Whether ascending on the public key means descending on storage.
    #[must_use]
    pub fn reverse(&self) -> bool {
        self.reverse
    }
}

/// Immutable public-key to storage-field table for one DTO/entity pair.
#[derive(Clone, Debug, Default)]
pub struct PropertyMapping {
    // lowercase key -> (declared key, value)
    entries: HashMap<String, (String, PropertyMappingValue)>,
}

impl PropertyMapping {
    #[must_use]
    pub fn builder() -> PropertyMappingBuilder {
        PropertyMappingBuilder::default()
    }

    /// Case-insensitive lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropertyMappingValue> {
        self.entries.get(&key.to_lowercase()).map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Declared keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|(k, _)| k.as_str())
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

/// Collects entries and validates them on [`build`](Self::build).
#[derive(Debug, Default)]
pub struct PropertyMappingBuilder {
    pending: Vec<(String, Vec<String>, bool)>,
}

impl PropertyMappingBuilder {
    #[must_use]
    pub fn map<I, S>(self, key: impl Into<String>, destination_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(key.into(), destination_fields, false)
    }

    /// Same as [`map`](Self::map) but with the sort direction inverted.
    #[must_use]
    pub fn map_reversed<I, S>(self, key: impl Into<String>, destination_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(key.into(), destination_fields, true)
    }

    fn push<I, S>(mut self, key: String, destination_fields: I, reverse: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = destination_fields.into_iter().map(Into::into).collect();
        self.pending.push((key, fields, reverse));
        self
    }

    /// # Errors
    /// [`ShapingError::InvalidArgument`] on a blank key, a key registered twice
    /// (case-insensitively), or an invalid destination list.
    pub fn build(self) -> Result<PropertyMapping, ShapingError> {
        let mut entries = HashMap::with_capacity(self.pending.len());
        for (key, fields, reverse) in self.pending {
            let trimmed = key.trim();
            if trimmed.is_empty() {
                return Err(ShapingError::invalid_argument("mapping key must not be blank"));
            }
            let value = PropertyMappingValue::new(fields, reverse)?;
            let normalized = trimmed.to_lowercase();
            if entries.contains_key(&normalized) {
                return Err(ShapingError::invalid_argument(format!(
                    "mapping key '{trimmed}' is registered twice"
                )));
            }
            entries.insert(normalized, (trimmed.to_owned(), value));
        }
        Ok(PropertyMapping { entries })
    }
}

struct Registration {
    source: TypeId,
    destination: TypeId,
    mapping: PropertyMapping,
}

/// Process-wide set of mapping tables, built once at startup and then shared
/// read-only (typically behind an `Arc`).
#[derive(Default)]
pub struct PropertyMappingRegistry {
    registrations: Vec<Registration>,
}

impl PropertyMappingRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the table translating `S` sort keys into `D` storage fields.
    ///
    /// Registering the same pair twice is not rejected here; the ambiguity
    /// surfaces as a configuration error on lookup.
    #[must_use]
    pub fn register<S: 'static, D: 'static>(mut self, mapping: PropertyMapping) -> Self {
        self.registrations.push(Registration {
            source: TypeId::of::<S>(),
            destination: TypeId::of::<D>(),
            mapping,
        });
        self
    }

    /// # Errors
    /// [`ShapingError::Configuration`] unless exactly one table is registered
    /// for `(S, D)`.
    pub fn get_mapping<S: 'static, D: 'static>(&self) -> Result<&PropertyMapping, ShapingError> {
        let (source, destination) = (TypeId::of::<S>(), TypeId::of::<D>());
        let mut matches = self
            .registrations
            .iter()
            .filter(|r| r.source == source && r.destination == destination);

        match (matches.next(), matches.count()) {
            (Some(only), 0) => Ok(&only.mapping),
            (first, rest) => Err(ShapingError::Configuration {
                source_type: type_name::<S>(),
                destination_type: type_name::<D>(),
                found: usize::from(first.is_some()) + rest,
            }),
        }
    }

    /// Check whether every clause of `order_by` resolves through the `(S, D)`
    /// table. Unknown keys and malformed directions yield `Ok(false)`.
    ///
    /// # Errors
    /// [`ShapingError::Configuration`] when the table itself is missing; the
    /// table is resolved before the expression is inspected.
    pub fn valid_mapping_exists<S: 'static, D: 'static>(
        &self,
        order_by: Option<&str>,
    ) -> Result<bool, ShapingError> {
        let mapping = self.get_mapping::<S, D>()?;
        Ok(crate::sort::is_valid_sort_expression(order_by, mapping))
    }
}

impl std::fmt::Debug for PropertyMappingRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyMappingRegistry")
            .field("registrations", &self.registrations.len())
            .finish()
    }
}
