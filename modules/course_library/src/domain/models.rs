//! Domain models for authors and courses.

use chrono::{DateTime, Datelike, FixedOffset, Utc};
use shaping::record_shape;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: DateTime<FixedOffset>,
    pub date_of_death: Option<DateTime<FixedOffset>>,
    pub main_category: String,
}

// Storage-level attribute names; sort mappings resolve against these.
record_shape! {
    Author {
        "Id" => |a| a.id,
        "FirstName" => |a| a.first_name.clone(),
        "LastName" => |a| a.last_name.clone(),
        "DateOfBirth" => |a| a.date_of_birth,
        "DateOfDeath" => |a| a.date_of_death,
        "MainCategory" => |a| a.main_category.clone(),
    }
}

impl Author {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in whole years at death, or as of `now` for living authors.
    #[must_use]
    pub fn age_at(&self, now: DateTime<Utc>) -> i32 {
        let end = self
            .date_of_death
            .unwrap_or_else(|| now.with_timezone(self.date_of_birth.offset()));
        age_in_years(self.date_of_birth, end)
    }
}

/// Whole years elapsed between `from` and `to`, in `from`'s calendar.
#[must_use]
pub fn age_in_years(from: DateTime<FixedOffset>, to: DateTime<FixedOffset>) -> i32 {
    let to = to.with_timezone(from.offset());
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

/// Data for a new author, optionally with an initial set of courses.
#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: DateTime<FixedOffset>,
    pub date_of_death: Option<DateTime<FixedOffset>>,
    pub main_category: String,
    pub courses: Vec<CourseData>,
}

/// Editable course fields shared by create, replace and patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseData {
    pub title: String,
    pub description: Option<String>,
}

/// Outcome of a replace-or-insert of a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upserted {
    Created(Course),
    Updated(Course),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(y, m, d, 0, 0, 0)
            .unwrap()
    }

    #[test]
    fn age_counts_completed_years_only() {
        assert_eq!(age_in_years(at(1815, 12, 10), at(1852, 11, 27)), 36);
        assert_eq!(age_in_years(at(1815, 12, 10), at(1852, 12, 10)), 37);
        assert_eq!(age_in_years(at(2000, 1, 1), at(2000, 6, 1)), 0);
    }

    #[test]
    fn age_stops_at_date_of_death() {
        let author = Author {
            id: Uuid::new_v4(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            date_of_birth: at(1815, 12, 10),
            date_of_death: Some(at(1852, 11, 27)),
            main_category: "Mathematics".to_owned(),
        };
        assert_eq!(author.age_at(Utc::now()), 36);
        assert_eq!(author.full_name(), "Ada Lovelace");
    }
}
