//! Property existence check for caller-supplied field lists.

use crate::shape::{RecordShape, field_tokens};

/// Returns `true` when every token of `fields` names an attribute of `T`.
///
/// An absent or blank list places no constraint and yields `true`. Lookup is
/// case-insensitive and stops at the first unknown token. Never fails.
#[must_use]
pub fn has_properties<T: RecordShape>(fields: Option<&str>) -> bool {
    field_tokens(fields).all(|token| T::attribute(token).is_some())
}
