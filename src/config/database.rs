//! Database configuration module for the registry.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema, including the join tables and their foreign-key actions, always matches
//! the Rust structs. Creation is idempotent: existing tables are left alone.

use crate::entities::{Course, Student, StudentCourse, StudentTeacher, Teacher};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::{debug, info, instrument};

/// Establishes a connection to the database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database at {}", database_url);
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all registry tables that do not exist yet.
///
/// Order matters: referenced tables are created before the tables holding foreign keys.
#[instrument(skip(db))]
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    create_table(db, Course).await?;
    create_table(db, Teacher).await?;
    create_table(db, Student).await?;
    create_table(db, StudentCourse).await?;
    create_table(db, StudentTeacher).await?;

    info!("Database tables ensured.");
    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(builder.build(&statement)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        course::Model as CourseModel, student::Model as StudentModel,
        student_course::Model as StudentCourseModel,
        student_teacher::Model as StudentTeacherModel, teacher::Model as TeacherModel,
    };
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<CourseModel> = Course::find().limit(1).all(&db).await?;
        let _: Vec<TeacherModel> = Teacher::find().limit(1).all(&db).await?;
        let _: Vec<StudentModel> = Student::find().limit(1).all(&db).await?;
        let _: Vec<StudentCourseModel> = StudentCourse::find().limit(1).all(&db).await?;
        let _: Vec<StudentTeacherModel> = StudentTeacher::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
