//! Join-table functions for the two many-to-many associations.
//!
//! Pairs are always `(student_id, other_id)`, matching the left/right orientation of
//! [`crate::core::relationship::Membership`].

use crate::{
    entities::{StudentCourse, StudentTeacher, student_course, student_teacher},
    errors::Result,
};
use sea_orm::{Condition, Set, prelude::*};

/// Enrolment pairs `(student_id, course_id)` for one student.
pub async fn course_pairs_for_student<C>(db: &C, student_id: i64) -> Result<Vec<(i64, i64)>>
where
    C: ConnectionTrait,
{
    let rows = StudentCourse::find()
        .filter(student_course::Column::StudentId.eq(student_id))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|r| (r.student_id, r.course_id)).collect())
}

/// Enrolment pairs `(student_id, course_id)` for one course.
pub async fn course_pairs_for_course<C>(db: &C, course_id: i64) -> Result<Vec<(i64, i64)>>
where
    C: ConnectionTrait,
{
    let rows = StudentCourse::find()
        .filter(student_course::Column::CourseId.eq(course_id))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|r| (r.student_id, r.course_id)).collect())
}

/// Records an enrolment.
pub async fn insert_course_pair<C>(db: &C, student_id: i64, course_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let row = student_course::ActiveModel {
        student_id: Set(student_id),
        course_id: Set(course_id),
    };
    StudentCourse::insert(row).exec_without_returning(db).await?;
    Ok(())
}

/// Deletes the listed enrolments, returning the number of rows removed.
pub async fn delete_course_pairs<C>(db: &C, pairs: &[(i64, i64)]) -> Result<u64>
where
    C: ConnectionTrait,
{
    if pairs.is_empty() {
        return Ok(0);
    }
    let condition = pairs
        .iter()
        .fold(Condition::any(), |condition, &(student_id, course_id)| {
            condition.add(
                Condition::all()
                    .add(student_course::Column::StudentId.eq(student_id))
                    .add(student_course::Column::CourseId.eq(course_id)),
            )
        });
    let result = StudentCourse::delete_many().filter(condition).exec(db).await?;
    Ok(result.rows_affected)
}

/// Link pairs `(student_id, teacher_id)` for one student.
pub async fn teacher_pairs_for_student<C>(db: &C, student_id: i64) -> Result<Vec<(i64, i64)>>
where
    C: ConnectionTrait,
{
    let rows = StudentTeacher::find()
        .filter(student_teacher::Column::StudentId.eq(student_id))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|r| (r.student_id, r.teacher_id)).collect())
}

/// Link pairs `(student_id, teacher_id)` for one teacher.
pub async fn teacher_pairs_for_teacher<C>(db: &C, teacher_id: i64) -> Result<Vec<(i64, i64)>>
where
    C: ConnectionTrait,
{
    let rows = StudentTeacher::find()
        .filter(student_teacher::Column::TeacherId.eq(teacher_id))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|r| (r.student_id, r.teacher_id)).collect())
}

/// Records a student/teacher link.
pub async fn insert_teacher_pair<C>(db: &C, student_id: i64, teacher_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let row = student_teacher::ActiveModel {
        student_id: Set(student_id),
        teacher_id: Set(teacher_id),
    };
    StudentTeacher::insert(row).exec_without_returning(db).await?;
    Ok(())
}

/// Deletes the listed student/teacher links, returning the number of rows removed.
pub async fn delete_teacher_pairs<C>(db: &C, pairs: &[(i64, i64)]) -> Result<u64>
where
    C: ConnectionTrait,
{
    if pairs.is_empty() {
        return Ok(0);
    }
    let condition = pairs
        .iter()
        .fold(Condition::any(), |condition, &(student_id, teacher_id)| {
            condition.add(
                Condition::all()
                    .add(student_teacher::Column::StudentId.eq(student_id))
                    .add(student_teacher::Column::TeacherId.eq(teacher_id)),
            )
        });
    let result = StudentTeacher::delete_many().filter(condition).exec(db).await?;
    Ok(result.rows_affected)
}
