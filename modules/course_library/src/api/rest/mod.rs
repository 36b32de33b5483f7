pub mod dto;
pub mod error;
pub mod handlers;
pub mod links;
pub mod media;
pub mod problem;
pub mod response;
pub mod routes;
