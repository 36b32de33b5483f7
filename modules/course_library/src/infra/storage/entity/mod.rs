pub mod author;
pub mod course;
