//! Shared test utilities for the registry.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{course, student, teacher},
    entities,
    errors::Result,
    models::{CourseInput, PersonInput},
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Routes tracing output through the test harness. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test course with the given name.
pub async fn create_test_course(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::course::Model> {
    course::save(db, CourseInput::new(name)).await
}

/// Person fields with sensible defaults.
///
/// # Defaults
/// * `last_name`: "Petrov"
/// * `middle_name`: "Sergeevich"
/// * `age`: 30
#[must_use]
pub fn person(first_name: &str) -> PersonInput {
    PersonInput::new(first_name, "Petrov", "Sergeevich", 30)
}

/// Creates a test teacher with default fields and no course.
pub async fn create_test_teacher(
    db: &DatabaseConnection,
    first_name: &str,
) -> Result<entities::teacher::Model> {
    teacher::save(db, person(first_name)).await
}

/// Creates a test student with default fields.
pub async fn create_test_student(
    db: &DatabaseConnection,
    first_name: &str,
) -> Result<entities::student::Model> {
    student::save(db, person(first_name)).await
}

/// Sets up a complete test environment with one course and one teacher.
/// Returns (db, course, teacher) for teacher↔course scenarios.
pub async fn setup_with_course_and_teacher() -> Result<(
    DatabaseConnection,
    entities::course::Model,
    entities::teacher::Model,
)> {
    let db = setup_test_db().await?;
    let course = create_test_course(&db, "Math").await?;
    let teacher = create_test_teacher(&db, "Ivan").await?;
    Ok((db, course, teacher))
}
