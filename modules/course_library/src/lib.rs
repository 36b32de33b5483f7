#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Course library module.
//!
//! Authors and their courses over REST, with caller-selected field shaping,
//! public-to-storage sort mapping, paging and hypermedia links.
//!
//! - `api::rest`: DTOs, handlers, routes, Problem Details, content negotiation
//! - `domain`: models, validation, paging, the service and its repository port
//! - `infra::storage`: SeaORM entities, migrations and the repository

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
pub mod module;

pub use config::CourseLibraryConfig;
pub use module::CourseLibrary;
