//! Student repository functions.

use crate::{
    entities::{Student, StudentCourse, StudentTeacher, student, student_course, student_teacher},
    errors::Result,
    models::PersonInput,
};
use sea_orm::{ActiveValue::Unchanged, QueryOrder, Set, prelude::*};

/// Fetches a student by id.
pub async fn get<C>(db: &C, student_id: i64) -> Result<Option<student::Model>>
where
    C: ConnectionTrait,
{
    Student::find_by_id(student_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Fetches every student, ordered by id.
pub async fn get_all<C>(db: &C) -> Result<Vec<student::Model>>
where
    C: ConnectionTrait,
{
    Student::find()
        .order_by_asc(student::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Inserts a student and returns it with its generated id.
pub async fn insert<C>(db: &C, input: &PersonInput) -> Result<student::Model>
where
    C: ConnectionTrait,
{
    let student = student::ActiveModel {
        first_name: Set(input.first_name.clone()),
        last_name: Set(input.last_name.clone()),
        middle_name: Set(input.middle_name.clone()),
        age: Set(input.age),
        ..Default::default()
    };
    student.insert(db).await.map_err(Into::into)
}

/// Overwrites name and age of an existing student.
pub async fn replace<C>(db: &C, student_id: i64, input: &PersonInput) -> Result<student::Model>
where
    C: ConnectionTrait,
{
    let student = student::ActiveModel {
        id: Unchanged(student_id),
        first_name: Set(input.first_name.clone()),
        last_name: Set(input.last_name.clone()),
        middle_name: Set(input.middle_name.clone()),
        age: Set(input.age),
    };
    student.update(db).await.map_err(Into::into)
}

/// Deletes a student row, returning the number of rows removed.
pub async fn delete<C>(db: &C, student_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = Student::delete_by_id(student_id).exec(db).await?;
    Ok(result.rows_affected)
}

/// Students enrolled in a course, ordered by id.
pub async fn enrolled_in<C>(db: &C, course_id: i64) -> Result<Vec<student::Model>>
where
    C: ConnectionTrait,
{
    Student::find()
        .inner_join(StudentCourse)
        .filter(student_course::Column::CourseId.eq(course_id))
        .order_by_asc(student::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Students linked to a teacher, ordered by id.
pub async fn taught_by<C>(db: &C, teacher_id: i64) -> Result<Vec<student::Model>>
where
    C: ConnectionTrait,
{
    Student::find()
        .inner_join(StudentTeacher)
        .filter(student_teacher::Column::TeacherId.eq(teacher_id))
        .order_by_asc(student::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
