//! Unified error types for the registry.
//!
//! Lookups of required entities fail with [`Error::NotFound`]; assign/remove outcomes
//! that merely find the relationship already in (or missing from) the desired state are
//! reported as `bool` returns and never appear here.

use std::collections::BTreeMap;
use std::fmt;

use sea_orm::DbErr;
use thiserror::Error;

/// The three kinds of entity the registry manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A course
    Course,
    /// A teacher
    Teacher,
    /// A student
    Student,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self {
            Self::Course => "Course",
            Self::Teacher => "Teacher",
            Self::Student => "Student",
        };
        f.write_str(title)
    }
}

/// Errors surfaced by the registry core and its ambient layers.
#[derive(Debug, Error)]
pub enum Error {
    /// A required entity does not exist
    #[error("{kind} with id {id} not found")]
    NotFound {
        /// Which kind of entity was looked up
        kind: EntityKind,
        /// The id that matched nothing
        id: i64,
    },

    /// Field constraints violated, one message per field
    #[error("Validation failed")]
    ValidationFailed {
        /// Field name to message
        errors: BTreeMap<String, String>,
    },

    /// Store failure
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Settings could not be loaded
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// HTTP server failure
    #[error("Server error: {message}")]
    Server {
        /// What went wrong
        message: String,
    },

    /// I/O failure, e.g. binding the listener
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a missing course.
    #[must_use]
    pub const fn course_not_found(id: i64) -> Self {
        Self::NotFound {
            kind: EntityKind::Course,
            id,
        }
    }

    /// Shorthand for a missing teacher.
    #[must_use]
    pub const fn teacher_not_found(id: i64) -> Self {
        Self::NotFound {
            kind: EntityKind::Teacher,
            id,
        }
    }

    /// Shorthand for a missing student.
    #[must_use]
    pub const fn student_not_found(id: i64) -> Self {
        Self::NotFound {
            kind: EntityKind::Student,
            id,
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            Error::teacher_not_found(42).to_string(),
            "Teacher with id 42 not found"
        );
        assert_eq!(
            Error::course_not_found(1).to_string(),
            "Course with id 1 not found"
        );
    }
}
