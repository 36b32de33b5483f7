//! Errors raised by the shaping and sort-mapping primitives.
//!
//! Boolean checks (`has_properties`, `valid_mapping_exists`) never produce these
//! for unknown names; they report absence through their return value instead.

/// Unified error type for projection and sort translation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapingError {
    /// A builder or helper received an argument it cannot work with
    /// (blank sort key, empty destination list, duplicate registration key).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A requested field does not exist on the record shape.
    #[error("property '{property}' cannot be found on {shape}")]
    UnknownProperty {
        property: String,
        shape: &'static str,
    },

    /// Zero or several mapping tables are registered for a DTO/entity pair.
    #[error(
        "cannot find exact property mapping instance for <{source_type}, {destination_type}> (found {found})"
    )]
    Configuration {
        source_type: &'static str,
        destination_type: &'static str,
        found: usize,
    },

    /// A sort clause names a key that is absent from the mapping table.
    #[error("key mapping for '{0}' does not exist")]
    UnknownSortKey(String),

    /// A sort clause carries a trailing token other than `asc`/`desc`.
    #[error("invalid sort direction in clause '{0}'")]
    InvalidSortDirection(String),
}

impl ShapingError {
    #[must_use]
    pub fn unknown_property(property: impl Into<String>, shape: &'static str) -> Self {
        Self::UnknownProperty {
            property: property.into(),
            shape,
        }
    }

    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// `true` for failures caused by caller input rather than a registration defect.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Configuration { .. } | Self::InvalidArgument(_))
    }
}
