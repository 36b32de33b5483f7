use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::Set;

use crate::domain::models::{Author, Course};
use crate::infra::storage::entity::{author, course};

impl From<author::Model> for Author {
    fn from(e: author::Model) -> Self {
        Self {
            id: e.id,
            first_name: e.first_name,
            last_name: e.last_name,
            date_of_birth: e.date_of_birth,
            date_of_death: e.date_of_death,
            main_category: e.main_category,
        }
    }
}

impl From<course::Model> for Course {
    fn from(e: course::Model) -> Self {
        Self {
            id: e.id,
            title: e.title,
            description: e.description,
            author_id: e.author_id,
        }
    }
}

impl From<Author> for author::ActiveModel {
    fn from(a: Author) -> Self {
        Self {
            id: Set(a.id),
            first_name: Set(a.first_name),
            last_name: Set(a.last_name),
            date_of_birth: Set(to_utc(a.date_of_birth)),
            date_of_death: Set(a.date_of_death.map(to_utc)),
            main_category: Set(a.main_category),
        }
    }
}

// SQLite keeps timestamps as text, so storage ordering is only chronological
// when every row shares one offset.
fn to_utc(ts: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    ts.with_timezone(&Utc).fixed_offset()
}

impl From<Course> for course::ActiveModel {
    fn from(c: Course) -> Self {
        Self {
            id: Set(c.id),
            title: Set(c.title),
            description: Set(c.description),
            author_id: Set(c.author_id),
        }
    }
}
