//! Domain layer: models, business rules and the persistence port.
//!
//! The domain layer **MUST NOT** import `api::*`; the API depends on the
//! domain, never the other way round.

pub mod error;
pub mod models;
pub mod paging;
pub mod repo;
pub mod service;
pub mod validation;
