//! Explicit model validation for incoming author and course data.
//!
//! Validators collect every violation instead of stopping at the first one; an
//! empty list means the input is acceptable.

use serde::{Deserialize, Serialize};

use crate::domain::models::{CourseData, NewAuthor};

pub const TITLE_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 1500;
pub const AUTHOR_TEXT_MAX_LEN: usize = 50;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationViolation {
    /// field path, e.g. "title" or "courses[0].title"
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ValidationViolation {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: &str) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: Some(code.to_owned()),
        }
    }
}

/// Which course shape is being validated; updates require a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseIntent {
    Create,
    Update,
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn field_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_owned()
    } else {
        format!("{prefix}.{field}")
    }
}

fn check_course(
    course: &CourseData,
    intent: CourseIntent,
    prefix: &str,
    out: &mut Vec<ValidationViolation>,
) {
    if is_blank(&course.title) {
        out.push(ValidationViolation::new(
            field_path(prefix, "title"),
            "Title is required for the course.",
            "required",
        ));
    } else if char_len(&course.title) > TITLE_MAX_LEN {
        out.push(ValidationViolation::new(
            field_path(prefix, "title"),
            format!("Title should not have more than {TITLE_MAX_LEN} characters."),
            "max_length",
        ));
    }

    let description = course.description.as_deref().unwrap_or_default();
    if intent == CourseIntent::Update && is_blank(description) {
        out.push(ValidationViolation::new(
            field_path(prefix, "description"),
            "Description is required for the course.",
            "required",
        ));
    }
    if char_len(description) > DESCRIPTION_MAX_LEN {
        out.push(ValidationViolation::new(
            field_path(prefix, "description"),
            format!("Description should not exceed more than {DESCRIPTION_MAX_LEN} characters."),
            "max_length",
        ));
    }

    if !is_blank(&course.title) && course.title == description {
        out.push(ValidationViolation::new(
            field_path(prefix, "course"),
            "Title should not be the same as description for the course.",
            "title_equals_description",
        ));
    }
}

/// Validate course data for creation or replacement.
#[must_use]
pub fn validate_course(course: &CourseData, intent: CourseIntent) -> Vec<ValidationViolation> {
    let mut out = Vec::new();
    check_course(course, intent, "", &mut out);
    out
}

fn check_author_text(value: &str, field: &str, label: &str, out: &mut Vec<ValidationViolation>) {
    if is_blank(value) {
        out.push(ValidationViolation::new(
            field,
            format!("{label} is required."),
            "required",
        ));
    } else if char_len(value) > AUTHOR_TEXT_MAX_LEN {
        out.push(ValidationViolation::new(
            field,
            format!("{label} should not have more than {AUTHOR_TEXT_MAX_LEN} characters."),
            "max_length",
        ));
    }
}

/// Validate a new author, including each nested course.
#[must_use]
pub fn validate_new_author(author: &NewAuthor) -> Vec<ValidationViolation> {
    let mut out = Vec::new();
    check_author_text(&author.first_name, "firstName", "First name", &mut out);
    check_author_text(&author.last_name, "lastName", "Last name", &mut out);
    check_author_text(&author.main_category, "mainCategory", "Main category", &mut out);

    if let Some(died) = author.date_of_death
        && died < author.date_of_birth
    {
        out.push(ValidationViolation::new(
            "dateOfDeath",
            "Date of death cannot precede date of birth.",
            "date_order",
        ));
    }

    for (i, course) in author.courses.iter().enumerate() {
        check_course(course, CourseIntent::Create, &format!("courses[{i}]"), &mut out);
    }
    out
}
