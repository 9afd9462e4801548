//! JSON shapes exchanged at the HTTP boundary.
//!
//! Response DTOs are built from entity models and never nest further than one level:
//! a teacher carries its course, a course carries nothing. Request payloads keep every
//! field optional so that a missing value is reported as a field error rather than a
//! deserialization failure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    entities::{course, student, teacher},
    errors::{Error, Result},
    models::{CourseInput, PersonInput},
};

const NAME_MAX: usize = 100;
const COURSE_NAME_MIN: usize = 3;
const PERSON_NAME_MIN: usize = 2;
const MIN_AGE: i32 = 5;

/// A course as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    /// Course id
    pub id: i64,
    /// Course title
    pub course_name: String,
}

impl From<course::Model> for CourseDto {
    fn from(model: course::Model) -> Self {
        Self {
            id: model.id,
            course_name: model.name,
        }
    }
}

/// A teacher as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDto {
    /// Teacher id
    pub id: i64,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Middle name or patronymic
    pub middle_name: String,
    /// Age in years
    pub age: i32,
    /// The course taught, omitted when unassigned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<CourseDto>,
}

impl TeacherDto {
    /// Builds the DTO from a teacher and the course it teaches, if any.
    #[must_use]
    pub fn with_course(model: teacher::Model, course: Option<course::Model>) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            middle_name: model.middle_name,
            age: model.age,
            course: course.map(CourseDto::from),
        }
    }
}

impl From<teacher::Model> for TeacherDto {
    fn from(model: teacher::Model) -> Self {
        Self::with_course(model, None)
    }
}

impl From<(teacher::Model, Option<course::Model>)> for TeacherDto {
    fn from((model, course): (teacher::Model, Option<course::Model>)) -> Self {
        Self::with_course(model, course)
    }
}

/// A student as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    /// Student id
    pub id: i64,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Middle name or patronymic
    pub middle_name: String,
    /// Age in years
    pub age: i32,
}

impl From<student::Model> for StudentDto {
    fn from(model: student::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            middle_name: model.middle_name,
            age: model.age,
        }
    }
}

/// Body of assign/remove responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    /// Human-readable outcome
    pub message: String,
}

impl MessageDto {
    /// Wraps a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponseDto {
    /// HTTP status code, repeated in the body
    pub status_code: u16,
    /// Summary of the failure
    pub message: String,
    /// Field errors, present only for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

/// Create/update payload for a course. An `id` in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    /// Course title
    pub course_name: Option<String>,
}

impl CourseRequest {
    /// Validates the payload into a core input.
    ///
    /// # Errors
    /// Returns `Error::ValidationFailed` with one message per offending field.
    pub fn into_input(self) -> Result<CourseInput> {
        let mut errors = BTreeMap::new();
        let name = check_text(
            &mut errors,
            "courseName",
            self.course_name,
            COURSE_NAME_MIN,
            "Course title is mandatory",
            "Size should not be less that 3 symbols",
        );

        match name {
            Some(name) if errors.is_empty() => Ok(CourseInput::new(name)),
            _ => Err(Error::ValidationFailed { errors }),
        }
    }
}

/// Create/update payload shared by teachers and students. An `id` in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRequest {
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Middle name or patronymic
    pub middle_name: Option<String>,
    /// Age in years
    pub age: Option<i32>,
}

impl PersonRequest {
    /// Validates the payload into a core input.
    ///
    /// # Errors
    /// Returns `Error::ValidationFailed` with one message per offending field.
    pub fn into_input(self) -> Result<PersonInput> {
        let mut errors = BTreeMap::new();

        let first_name = check_text(
            &mut errors,
            "firstName",
            self.first_name,
            PERSON_NAME_MIN,
            "firstName field is mandatory",
            "First Name should have at least 2 characters",
        );
        let last_name = check_text(
            &mut errors,
            "lastName",
            self.last_name,
            PERSON_NAME_MIN,
            "lastName field is mandatory",
            "Last Name should have at least 2 characters",
        );
        let middle_name = check_text(
            &mut errors,
            "middleName",
            self.middle_name,
            PERSON_NAME_MIN,
            "middleName field is mandatory",
            "Middle Name should have at least 2 characters",
        );
        let age = match self.age {
            None => {
                errors.insert("age".to_owned(), "Age is mandatory field".to_owned());
                None
            }
            Some(age) if age < MIN_AGE => {
                errors.insert("age".to_owned(), "Age should not be less that 5".to_owned());
                None
            }
            Some(age) => Some(age),
        };

        match (first_name, last_name, middle_name, age) {
            (Some(first), Some(last), Some(middle), Some(age)) if errors.is_empty() => {
                Ok(PersonInput::new(first, last, middle, age))
            }
            _ => Err(Error::ValidationFailed { errors }),
        }
    }
}

/// Records a field error if `value` is missing or its length is outside `min..=100`.
fn check_text(
    errors: &mut BTreeMap<String, String>,
    field: &str,
    value: Option<String>,
    min: usize,
    missing: &str,
    bad_size: &str,
) -> Option<String> {
    let Some(value) = value else {
        errors.insert(field.to_owned(), missing.to_owned());
        return None;
    };
    let len = value.chars().count();
    if len < min || len > NAME_MAX {
        errors.insert(field.to_owned(), bad_size.to_owned());
        return None;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use serde_json::json;

    fn validation_errors(err: Error) -> BTreeMap<String, String> {
        match err {
            Error::ValidationFailed { errors } => errors,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_course_request_valid() {
        let req: CourseRequest =
            serde_json::from_value(json!({"id": 99, "courseName": "Physics"})).unwrap();
        assert_eq!(req.into_input().unwrap(), CourseInput::new("Physics"));
    }

    #[test]
    fn test_course_request_errors() {
        let errors = validation_errors(CourseRequest::default().into_input().unwrap_err());
        assert_eq!(errors["courseName"], "Course title is mandatory");

        let short = CourseRequest {
            course_name: Some("AB".into()),
        };
        let errors = validation_errors(short.into_input().unwrap_err());
        assert_eq!(errors["courseName"], "Size should not be less that 3 symbols");

        let long = CourseRequest {
            course_name: Some("x".repeat(101)),
        };
        assert!(long.into_input().is_err());
    }

    #[test]
    fn test_person_request_collects_every_field() {
        let req: PersonRequest =
            serde_json::from_value(json!({"firstName": "I", "age": 4})).unwrap();
        let errors = validation_errors(req.into_input().unwrap_err());

        assert_eq!(errors.len(), 4);
        assert_eq!(errors["firstName"], "First Name should have at least 2 characters");
        assert_eq!(errors["lastName"], "lastName field is mandatory");
        assert_eq!(errors["middleName"], "middleName field is mandatory");
        assert_eq!(errors["age"], "Age should not be less that 5");
    }

    #[test]
    fn test_person_request_valid() {
        let req: PersonRequest = serde_json::from_value(json!({
            "firstName": "Ivan",
            "lastName": "Petrov",
            "middleName": "Sergeevich",
            "age": 5
        }))
        .unwrap();
        assert_eq!(
            req.into_input().unwrap(),
            PersonInput::new("Ivan", "Petrov", "Sergeevich", 5)
        );
    }

    #[test]
    fn test_teacher_dto_nests_flat_course() {
        let teacher = teacher::Model {
            id: 1,
            first_name: "Ivan".into(),
            last_name: "Petrov".into(),
            middle_name: "Sergeevich".into(),
            age: 40,
            course_id: Some(7),
        };
        let course = course::Model {
            id: 7,
            name: "Math".into(),
        };

        let value = serde_json::to_value(TeacherDto::with_course(teacher.clone(), Some(course)))
            .unwrap();
        assert_eq!(value["firstName"], "Ivan");
        assert_eq!(value["course"], json!({"id": 7, "courseName": "Math"}));

        let value = serde_json::to_value(TeacherDto::from(teacher)).unwrap();
        assert!(value.get("course").is_none());
    }
}
