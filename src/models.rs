//! Validated inputs accepted by the registry core.
//!
//! These are the "record without id" shapes passed to `save` and `update`. Field
//! constraints are checked by the boundary layer before a value of these types exists.

use serde::{Deserialize, Serialize};

/// Mutable fields of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInput {
    /// Course title, 3 to 100 characters
    pub name: String,
}

impl CourseInput {
    /// Builds a course input from a title.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Mutable fields shared by teachers and students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonInput {
    /// Given name, 2 to 100 characters
    pub first_name: String,
    /// Family name, 2 to 100 characters
    pub last_name: String,
    /// Middle name or patronymic, 2 to 100 characters
    pub middle_name: String,
    /// Age in years, at least 5
    pub age: i32,
}

impl PersonInput {
    /// Builds a person input from its four fields.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        middle_name: impl Into<String>,
        age: i32,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            middle_name: middle_name.into(),
            age,
        }
    }
}
