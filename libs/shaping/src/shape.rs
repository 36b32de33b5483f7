//! Record shapes: a static attribute registry per DTO type.
//!
//! A record shape lists its publicly readable attributes once, in declaration
//! order, as `(name, reader)` pairs. Everything that needs "look up attribute by
//! name" (the property checker, the projector, in-memory sorting) goes through
//! this table instead of runtime reflection.
//!
//! # Example
//!
//! ```rust
//! use shaping::{record_shape, RecordShape};
//!
//! struct Book {
//!     title: String,
//!     pages: i64,
//! }
//!
//! record_shape! {
//!     Book {
//!         "Title" => |b| b.title.clone(),
//!         "Pages" => |b| b.pages,
//!     }
//! }
//!
//! assert_eq!(Book::attribute("title").map(|a| a.name()), Some("Title"));
//! assert!(Book::attribute("author").is_none());
//! ```

use crate::value::FieldValue;

/// Reader for one attribute of `T`.
pub type AttributeReader<T> = fn(&T) -> FieldValue;

/// One publicly readable attribute of a record shape.
pub struct Attribute<T: 'static> {
    name: &'static str,
    read: AttributeReader<T>,
}

impl<T: 'static> Attribute<T> {
    #[must_use]
    pub const fn new(name: &'static str, read: AttributeReader<T>) -> Self {
        Self { name, read }
    }

    /// Declared attribute name; projected keys always use this casing.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Read the attribute value off `source`.
    #[must_use]
    pub fn read(&self, source: &T) -> FieldValue {
        (self.read)(source)
    }
}

impl<T: 'static> std::fmt::Debug for Attribute<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A DTO-like structure with a fixed, named set of readable attributes.
///
/// Implement with [`record_shape!`](crate::record_shape) rather than by hand.
pub trait RecordShape: Sized + 'static {
    /// Type name used in error messages.
    const SHAPE_NAME: &'static str;

    /// All readable attributes, in declaration order.
    fn attributes() -> &'static [Attribute<Self>];

    /// Case-insensitive attribute lookup.
    #[must_use]
    fn attribute(name: &str) -> Option<&'static Attribute<Self>> {
        Self::attributes()
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }
}

/// Split a caller-supplied field list into trimmed tokens.
///
/// An absent or blank list yields no tokens. Empty segments (`"a,,b"`) are kept
/// as empty tokens so callers reject them like any other unknown name.
pub fn field_tokens(fields: Option<&str>) -> impl Iterator<Item = &str> {
    fields
        .filter(|f| !f.trim().is_empty())
        .into_iter()
        .flat_map(|f| f.split(','))
        .map(str::trim)
}

/// Declare the attribute table of a record shape.
///
/// Each entry maps a public attribute name to a closure reading it; the closure
/// result must convert into [`FieldValue`](crate::FieldValue).
#[macro_export]
macro_rules! record_shape {
    ($ty:ident { $($name:literal => |$src:ident| $read:expr),+ $(,)? }) => {
        impl $crate::RecordShape for $ty {
            const SHAPE_NAME: &'static str = stringify!($ty);

            fn attributes() -> &'static [$crate::Attribute<Self>] {
                const ATTRIBUTES: &[$crate::Attribute<$ty>] = &[
                    $($crate::Attribute::new($name, |$src: &$ty| $crate::FieldValue::from($read)),)+
                ];
                ATTRIBUTES
            }
        }
    };
}
