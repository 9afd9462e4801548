//! Teacher repository functions, including the single-valued course reference.

use crate::{
    entities::{Course, StudentTeacher, Teacher, course, student_teacher, teacher},
    errors::Result,
    models::PersonInput,
};
use sea_orm::{
    ActiveValue::{NotSet, Unchanged},
    QueryOrder, Set,
    prelude::*,
    sea_query::Expr,
};

/// Fetches a teacher by id.
pub async fn get<C>(db: &C, teacher_id: i64) -> Result<Option<teacher::Model>>
where
    C: ConnectionTrait,
{
    Teacher::find_by_id(teacher_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Fetches a teacher together with its course, if it has one.
pub async fn get_with_course<C>(
    db: &C,
    teacher_id: i64,
) -> Result<Option<(teacher::Model, Option<course::Model>)>>
where
    C: ConnectionTrait,
{
    Teacher::find_by_id(teacher_id)
        .find_also_related(Course)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Fetches every teacher, ordered by id.
pub async fn get_all<C>(db: &C) -> Result<Vec<teacher::Model>>
where
    C: ConnectionTrait,
{
    Teacher::find()
        .order_by_asc(teacher::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Fetches every teacher paired with its course, ordered by teacher id.
pub async fn get_all_with_course<C>(db: &C) -> Result<Vec<(teacher::Model, Option<course::Model>)>>
where
    C: ConnectionTrait,
{
    Teacher::find()
        .find_also_related(Course)
        .order_by_asc(teacher::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Inserts a teacher without a course.
pub async fn insert<C>(db: &C, input: &PersonInput) -> Result<teacher::Model>
where
    C: ConnectionTrait,
{
    let teacher = teacher::ActiveModel {
        first_name: Set(input.first_name.clone()),
        last_name: Set(input.last_name.clone()),
        middle_name: Set(input.middle_name.clone()),
        age: Set(input.age),
        course_id: Set(None),
        ..Default::default()
    };
    teacher.insert(db).await.map_err(Into::into)
}

/// Overwrites name and age of an existing teacher. The course reference is not touched.
pub async fn replace<C>(db: &C, teacher_id: i64, input: &PersonInput) -> Result<teacher::Model>
where
    C: ConnectionTrait,
{
    let teacher = teacher::ActiveModel {
        id: Unchanged(teacher_id),
        first_name: Set(input.first_name.clone()),
        last_name: Set(input.last_name.clone()),
        middle_name: Set(input.middle_name.clone()),
        age: Set(input.age),
        course_id: NotSet,
    };
    teacher.update(db).await.map_err(Into::into)
}

/// Deletes a teacher row, returning the number of rows removed.
pub async fn delete<C>(db: &C, teacher_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = Teacher::delete_by_id(teacher_id).exec(db).await?;
    Ok(result.rows_affected)
}

/// Sets or clears the course a teacher teaches.
pub async fn set_course<C>(db: &C, teacher_id: i64, course_id: Option<i64>) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = Teacher::update_many()
        .col_expr(teacher::Column::CourseId, Expr::value(course_id))
        .filter(teacher::Column::Id.eq(teacher_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Clears the course reference of every listed teacher.
pub async fn clear_course<C>(db: &C, teacher_ids: &[i64]) -> Result<u64>
where
    C: ConnectionTrait,
{
    if teacher_ids.is_empty() {
        return Ok(0);
    }
    let result = Teacher::update_many()
        .col_expr(teacher::Column::CourseId, Expr::value(Option::<i64>::None))
        .filter(teacher::Column::Id.is_in(teacher_ids.iter().copied()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Teachers whose course reference equals `course_id`, ordered by id.
pub async fn by_course<C>(db: &C, course_id: i64) -> Result<Vec<teacher::Model>>
where
    C: ConnectionTrait,
{
    Teacher::find()
        .filter(teacher::Column::CourseId.eq(course_id))
        .order_by_asc(teacher::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Teachers linked to a student, ordered by id.
pub async fn teaching<C>(db: &C, student_id: i64) -> Result<Vec<teacher::Model>>
where
    C: ConnectionTrait,
{
    Teacher::find()
        .inner_join(StudentTeacher)
        .filter(student_teacher::Column::StudentId.eq(student_id))
        .order_by_asc(teacher::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
