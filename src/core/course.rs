//! Course service - CRUD plus the course-anchored traversals.
//!
//! Deleting a course releases its teachers (their course reference becomes empty) and
//! drops every enrolment that pointed at it, all in the same transaction as the delete.

use crate::{
    core::relationship::{CourseStaff, Membership},
    entities::{course, student, teacher},
    errors::{Error, Result},
    models::CourseInput,
    store::{courses, links, students, teachers},
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info, instrument};

/// Finds a course by id.
///
/// # Errors
/// Returns `Error::NotFound` if no course has this id.
#[instrument(skip(db))]
pub async fn find_by_id(db: &DatabaseConnection, course_id: i64) -> Result<course::Model> {
    courses::get(db, course_id)
        .await?
        .ok_or_else(|| Error::course_not_found(course_id))
}

/// Lists every course. The order is not part of the contract.
#[instrument(skip(db))]
pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<course::Model>> {
    let all = courses::get_all(db).await?;
    debug!("Fetched {} courses.", all.len());
    Ok(all)
}

/// Stores a new course and returns it with its generated id.
#[instrument(skip(db))]
pub async fn save(db: &DatabaseConnection, input: CourseInput) -> Result<course::Model> {
    let course = courses::insert(db, &input).await?;
    info!("Created course '{}' (ID: {})", course.name, course.id);
    Ok(course)
}

/// Overwrites the name of an existing course.
///
/// # Errors
/// Returns `Error::NotFound` if no course has this id.
#[instrument(skip(db))]
pub async fn update(
    db: &DatabaseConnection,
    course_id: i64,
    input: CourseInput,
) -> Result<course::Model> {
    let txn = db.begin().await?;

    courses::get(&txn, course_id)
        .await?
        .ok_or_else(|| Error::course_not_found(course_id))?;
    let course = courses::replace(&txn, course_id, &input).await?;

    txn.commit().await?;
    info!("Updated course {}: name = '{}'", course.id, course.name);
    Ok(course)
}

/// Deletes a course after detaching its teachers and enrolled students.
///
/// # Errors
/// Returns `Error::NotFound` if no course has this id.
#[instrument(skip(db))]
pub async fn delete_by_id(db: &DatabaseConnection, course_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    courses::get(&txn, course_id)
        .await?
        .ok_or_else(|| Error::course_not_found(course_id))?;

    let mut staff = CourseStaff::from_assignments(
        teachers::by_course(&txn, course_id)
            .await?
            .into_iter()
            .map(|t| (t.id, t.course_id)),
    );
    let released = staff.detach_course(course_id);
    debug_assert!(staff.is_consistent());
    teachers::clear_course(&txn, &released).await?;

    let mut enrolments =
        Membership::from_pairs(links::course_pairs_for_course(&txn, course_id).await?);
    let dropped = enrolments.detach_right(course_id);
    debug_assert!(enrolments.is_consistent());
    links::delete_course_pairs(&txn, &dropped).await?;

    courses::delete(&txn, course_id).await?;
    txn.commit().await?;

    info!(
        "Deleted course {} (released {} teachers, dropped {} enrolments)",
        course_id,
        released.len(),
        dropped.len()
    );
    Ok(())
}

/// Students enrolled in a course.
///
/// # Errors
/// Returns `Error::NotFound` if no course has this id.
#[instrument(skip(db))]
pub async fn find_students_by_course(
    db: &DatabaseConnection,
    course_id: i64,
) -> Result<Vec<student::Model>> {
    find_by_id(db, course_id).await?;
    students::enrolled_in(db, course_id).await
}

/// Teachers currently teaching a course.
///
/// # Errors
/// Returns `Error::NotFound` if no course has this id.
#[instrument(skip(db))]
pub async fn find_teachers_by_course(
    db: &DatabaseConnection,
    course_id: i64,
) -> Result<Vec<teacher::Model>> {
    find_by_id(db, course_id).await?;
    teachers::by_course(db, course_id).await
}
