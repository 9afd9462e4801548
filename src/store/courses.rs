//! Course repository functions.

use crate::{
    entities::{Course, StudentCourse, Teacher, course, student_course, teacher},
    errors::Result,
    models::CourseInput,
};
use sea_orm::{ActiveValue::Unchanged, QueryOrder, Set, prelude::*};

/// Fetches a course by id.
pub async fn get<C>(db: &C, course_id: i64) -> Result<Option<course::Model>>
where
    C: ConnectionTrait,
{
    Course::find_by_id(course_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Fetches every course, ordered by id.
pub async fn get_all<C>(db: &C) -> Result<Vec<course::Model>>
where
    C: ConnectionTrait,
{
    Course::find()
        .order_by_asc(course::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Inserts a course and returns it with its generated id.
pub async fn insert<C>(db: &C, input: &CourseInput) -> Result<course::Model>
where
    C: ConnectionTrait,
{
    let course = course::ActiveModel {
        name: Set(input.name.clone()),
        ..Default::default()
    };
    course.insert(db).await.map_err(Into::into)
}

/// Overwrites the mutable fields of an existing course.
pub async fn replace<C>(db: &C, course_id: i64, input: &CourseInput) -> Result<course::Model>
where
    C: ConnectionTrait,
{
    let course = course::ActiveModel {
        id: Unchanged(course_id),
        name: Set(input.name.clone()),
    };
    course.update(db).await.map_err(Into::into)
}

/// Deletes a course row, returning the number of rows removed.
pub async fn delete<C>(db: &C, course_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = Course::delete_by_id(course_id).exec(db).await?;
    Ok(result.rows_affected)
}

/// Courses a student is enrolled in, ordered by id.
pub async fn enrolled_by<C>(db: &C, student_id: i64) -> Result<Vec<course::Model>>
where
    C: ConnectionTrait,
{
    Course::find()
        .inner_join(StudentCourse)
        .filter(student_course::Column::StudentId.eq(student_id))
        .order_by_asc(course::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Looks up the id of the course a teacher teaches.
///
/// Returns `None` both when the teacher has no course and when the teacher does not
/// exist; callers that need to tell those apart check the teacher first.
pub async fn find_course_id_by_teacher_id<C>(db: &C, teacher_id: i64) -> Result<Option<i64>>
where
    C: ConnectionTrait,
{
    let course = Course::find()
        .inner_join(Teacher)
        .filter(teacher::Column::Id.eq(teacher_id))
        .one(db)
        .await?;
    Ok(course.map(|c| c.id))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_get_missing_course_returns_none() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<course::Model>::new()])
            .into_connection();

        assert!(get(&db, 7).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_returns_rows_from_store() -> Result<()> {
        let rows = vec![
            course::Model {
                id: 1,
                name: "Math".to_string(),
            },
            course::Model {
                id: 2,
                name: "Physics".to_string(),
            },
        ];
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([rows.clone()])
            .into_connection();

        assert_eq!(get_all(&db).await?, rows);
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_replace_delete() -> Result<()> {
        let db = setup_test_db().await?;

        let course = insert(&db, &CourseInput::new("Math")).await?;
        assert!(course.id > 0);
        assert_eq!(course.name, "Math");

        let renamed = replace(&db, course.id, &CourseInput::new("Algebra")).await?;
        assert_eq!(renamed.id, course.id);
        assert_eq!(get(&db, course.id).await?.unwrap().name, "Algebra");

        assert_eq!(delete(&db, course.id).await?, 1);
        assert_eq!(delete(&db, course.id).await?, 0);
        assert!(get(&db, course.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_find_course_id_by_teacher_id() -> Result<()> {
        let db = setup_test_db().await?;
        let course = create_test_course(&db, "Math").await?;
        let teacher = create_test_teacher(&db, "Ivan").await?;

        assert_eq!(find_course_id_by_teacher_id(&db, teacher.id).await?, None);

        crate::store::teachers::set_course(&db, teacher.id, Some(course.id)).await?;
        assert_eq!(
            find_course_id_by_teacher_id(&db, teacher.id).await?,
            Some(course.id)
        );
        assert_eq!(find_course_id_by_teacher_id(&db, 999).await?, None);
        Ok(())
    }
}
