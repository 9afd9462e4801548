//! Teacher service - CRUD plus the teacher↔course assignment.
//!
//! A teacher teaches at most one course. `assign_course_to_teacher` refuses any
//! assignment while the teacher already has a course, including the same one, and
//! `remove_course_from_teacher` only succeeds for the course the teacher actually has.

use crate::{
    core::relationship::{CourseStaff, Membership},
    entities::{course, student, teacher},
    errors::{Error, Result},
    models::PersonInput,
    store::{courses, links, students, teachers},
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info, instrument};

/// Finds a teacher by id.
///
/// # Errors
/// Returns `Error::NotFound` if no teacher has this id.
#[instrument(skip(db))]
pub async fn find_by_id(db: &DatabaseConnection, teacher_id: i64) -> Result<teacher::Model> {
    teachers::get(db, teacher_id)
        .await?
        .ok_or_else(|| Error::teacher_not_found(teacher_id))
}

/// Finds a teacher together with the course it teaches.
///
/// # Errors
/// Returns `Error::NotFound` if no teacher has this id.
#[instrument(skip(db))]
pub async fn find_by_id_with_course(
    db: &DatabaseConnection,
    teacher_id: i64,
) -> Result<(teacher::Model, Option<course::Model>)> {
    teachers::get_with_course(db, teacher_id)
        .await?
        .ok_or_else(|| Error::teacher_not_found(teacher_id))
}

/// Lists every teacher. The order is not part of the contract.
#[instrument(skip(db))]
pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<teacher::Model>> {
    let all = teachers::get_all(db).await?;
    debug!("Fetched {} teachers.", all.len());
    Ok(all)
}

/// Lists every teacher paired with the course it teaches.
#[instrument(skip(db))]
pub async fn find_all_with_course(
    db: &DatabaseConnection,
) -> Result<Vec<(teacher::Model, Option<course::Model>)>> {
    teachers::get_all_with_course(db).await
}

/// Stores a new teacher without a course.
#[instrument(skip(db))]
pub async fn save(db: &DatabaseConnection, input: PersonInput) -> Result<teacher::Model> {
    let teacher = teachers::insert(db, &input).await?;
    info!(
        "Created teacher {} {} (ID: {})",
        teacher.first_name, teacher.last_name, teacher.id
    );
    Ok(teacher)
}

/// Overwrites name and age of an existing teacher, keeping its course.
///
/// # Errors
/// Returns `Error::NotFound` if no teacher has this id.
#[instrument(skip(db))]
pub async fn update(
    db: &DatabaseConnection,
    teacher_id: i64,
    input: PersonInput,
) -> Result<teacher::Model> {
    let txn = db.begin().await?;

    teachers::get(&txn, teacher_id)
        .await?
        .ok_or_else(|| Error::teacher_not_found(teacher_id))?;
    let teacher = teachers::replace(&txn, teacher_id, &input).await?;

    txn.commit().await?;
    info!("Updated teacher {}", teacher.id);
    Ok(teacher)
}

/// Deletes a teacher after unlinking it from its students.
///
/// # Errors
/// Returns `Error::NotFound` if no teacher has this id.
#[instrument(skip(db))]
pub async fn delete_by_id(db: &DatabaseConnection, teacher_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let teacher = teachers::get(&txn, teacher_id)
        .await?
        .ok_or_else(|| Error::teacher_not_found(teacher_id))?;

    let mut staff = CourseStaff::from_assignments([(teacher.id, teacher.course_id)]);
    let released_from = staff.detach_teacher(teacher.id);
    debug_assert!(staff.is_consistent());

    let mut tutoring =
        Membership::from_pairs(links::teacher_pairs_for_teacher(&txn, teacher_id).await?);
    let dropped = tutoring.detach_right(teacher_id);
    debug_assert!(tutoring.is_consistent());
    links::delete_teacher_pairs(&txn, &dropped).await?;

    teachers::delete(&txn, teacher_id).await?;
    txn.commit().await?;

    info!(
        "Deleted teacher {} (released from course {:?}, unlinked {} students)",
        teacher_id,
        released_from,
        dropped.len()
    );
    Ok(())
}

/// Makes `course_id` the course of `teacher_id`.
///
/// Returns `false` without changing anything if the teacher already teaches any course.
///
/// # Errors
/// Returns `Error::NotFound` if the course or the teacher does not exist.
#[instrument(skip(db))]
pub async fn assign_course_to_teacher(
    db: &DatabaseConnection,
    course_id: i64,
    teacher_id: i64,
) -> Result<bool> {
    let txn = db.begin().await?;

    let course = courses::get(&txn, course_id)
        .await?
        .ok_or_else(|| Error::course_not_found(course_id))?;
    let teacher = teachers::get(&txn, teacher_id)
        .await?
        .ok_or_else(|| Error::teacher_not_found(teacher_id))?;

    let mut staff = load_staff(&txn, &course, &teacher).await?;
    if !staff.assign(course.id, teacher.id) {
        info!(
            "Teacher {} already teaches course {:?}; not assigning course {}",
            teacher.id, teacher.course_id, course.id
        );
        return Ok(false);
    }
    debug_assert!(staff.is_consistent());

    teachers::set_course(&txn, teacher.id, staff.course_of(teacher.id)).await?;
    txn.commit().await?;

    info!("Assigned course {} to teacher {}", course.id, teacher.id);
    Ok(true)
}

/// Clears the course of `teacher_id` if it is `course_id`.
///
/// Returns `false` without changing anything if the teacher does not teach that course.
///
/// # Errors
/// Returns `Error::NotFound` if the course or the teacher does not exist.
#[instrument(skip(db))]
pub async fn remove_course_from_teacher(
    db: &DatabaseConnection,
    course_id: i64,
    teacher_id: i64,
) -> Result<bool> {
    let txn = db.begin().await?;

    let course = courses::get(&txn, course_id)
        .await?
        .ok_or_else(|| Error::course_not_found(course_id))?;
    let teacher = teachers::get(&txn, teacher_id)
        .await?
        .ok_or_else(|| Error::teacher_not_found(teacher_id))?;

    let mut staff = load_staff(&txn, &course, &teacher).await?;
    if !staff.remove(course.id, teacher.id) {
        info!(
            "Teacher {} does not teach course {}; nothing to remove",
            teacher.id, course.id
        );
        return Ok(false);
    }
    debug_assert!(staff.is_consistent());

    teachers::set_course(&txn, teacher.id, staff.course_of(teacher.id)).await?;
    txn.commit().await?;

    info!("Removed course {} from teacher {}", course.id, teacher.id);
    Ok(true)
}

/// The course a teacher teaches.
///
/// Returns `Ok(None)` when the teacher exists but has no course.
///
/// # Errors
/// Returns `Error::NotFound` only if no teacher has this id.
#[instrument(skip(db))]
pub async fn find_course_of_teacher(
    db: &DatabaseConnection,
    teacher_id: i64,
) -> Result<Option<course::Model>> {
    find_by_id(db, teacher_id).await?;

    match courses::find_course_id_by_teacher_id(db, teacher_id).await? {
        Some(course_id) => courses::get(db, course_id).await,
        None => {
            debug!("Teacher {} has no course", teacher_id);
            Ok(None)
        }
    }
}

/// Students linked to a teacher.
///
/// # Errors
/// Returns `Error::NotFound` if no teacher has this id.
#[instrument(skip(db))]
pub async fn find_students_of_teacher(
    db: &DatabaseConnection,
    teacher_id: i64,
) -> Result<Vec<student::Model>> {
    find_by_id(db, teacher_id).await?;
    students::taught_by(db, teacher_id).await
}

/// Loads the staff of `course` plus the current assignment of `teacher`.
async fn load_staff<C>(
    db: &C,
    course: &course::Model,
    teacher: &teacher::Model,
) -> Result<CourseStaff>
where
    C: sea_orm::ConnectionTrait,
{
    let rows = teachers::by_course(db, course.id)
        .await?
        .into_iter()
        .map(|t| (t.id, t.course_id))
        .chain(std::iter::once((teacher.id, teacher.course_id)));
    Ok(CourseStaff::from_assignments(rows))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{course as course_service, student as student_service};
    use crate::errors::EntityKind;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_save_then_find_by_id() -> Result<()> {
        let db = setup_test_db().await?;

        let input = PersonInput::new("Anna", "Sidorova", "Petrovna", 44);
        let saved = save(&db, input.clone()).await?;
        let found = find_by_id(&db, saved.id).await?;

        assert_eq!(found, saved);
        assert_eq!(found.first_name, input.first_name);
        assert_eq!(found.last_name, input.last_name);
        assert_eq!(found.middle_name, input.middle_name);
        assert_eq!(found.age, input.age);
        assert_eq!(found.course_id, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_assign_course_scenario() -> Result<()> {
        let (db, course, teacher) = setup_with_course_and_teacher().await?;

        assert!(assign_course_to_teacher(&db, course.id, teacher.id).await?);
        assert!(!assign_course_to_teacher(&db, course.id, teacher.id).await?);

        let staff = course_service::find_teachers_by_course(&db, course.id).await?;
        assert_eq!(staff.iter().map(|t| t.id).collect::<Vec<_>>(), vec![teacher.id]);

        assert!(remove_course_from_teacher(&db, course.id, teacher.id).await?);
        assert!(course_service::find_teachers_by_course(&db, course.id).await?.is_empty());

        // Free again after removal
        assert!(assign_course_to_teacher(&db, course.id, teacher.id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_assign_different_course_is_refused() -> Result<()> {
        let (db, math, teacher) = setup_with_course_and_teacher().await?;
        let art = create_test_course(&db, "Art").await?;

        assert!(assign_course_to_teacher(&db, math.id, teacher.id).await?);
        assert!(!assign_course_to_teacher(&db, art.id, teacher.id).await?);

        assert_eq!(find_by_id(&db, teacher.id).await?.course_id, Some(math.id));
        assert!(course_service::find_teachers_by_course(&db, art.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_wrong_course_changes_nothing() -> Result<()> {
        let (db, math, teacher) = setup_with_course_and_teacher().await?;
        let art = create_test_course(&db, "Art").await?;

        assert!(!remove_course_from_teacher(&db, math.id, teacher.id).await?);

        assign_course_to_teacher(&db, math.id, teacher.id).await?;
        assert!(!remove_course_from_teacher(&db, art.id, teacher.id).await?);
        assert_eq!(find_by_id(&db, teacher.id).await?.course_id, Some(math.id));
        Ok(())
    }

    #[tokio::test]
    async fn test_assign_requires_both_endpoints() -> Result<()> {
        let (db, course, teacher) = setup_with_course_and_teacher().await?;

        let missing_course = assign_course_to_teacher(&db, 999, teacher.id).await;
        assert!(matches!(
            missing_course.unwrap_err(),
            Error::NotFound {
                kind: EntityKind::Course,
                id: 999
            }
        ));

        let missing_teacher = remove_course_from_teacher(&db, course.id, 999).await;
        assert!(matches!(
            missing_teacher.unwrap_err(),
            Error::NotFound {
                kind: EntityKind::Teacher,
                id: 999
            }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_find_course_of_teacher() -> Result<()> {
        let (db, course, teacher) = setup_with_course_and_teacher().await?;

        assert_eq!(find_course_of_teacher(&db, teacher.id).await?, None);

        assign_course_to_teacher(&db, course.id, teacher.id).await?;
        assert_eq!(find_course_of_teacher(&db, teacher.id).await?, Some(course));

        assert!(matches!(
            find_course_of_teacher(&db, 999).await.unwrap_err(),
            Error::NotFound {
                kind: EntityKind::Teacher,
                ..
            }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_keeps_course() -> Result<()> {
        let (db, course, teacher) = setup_with_course_and_teacher().await?;
        assign_course_to_teacher(&db, course.id, teacher.id).await?;

        let input = PersonInput::new("Ivan", "Orlov", "Ilyich", 52);
        let updated = update(&db, teacher.id, input).await?;
        assert_eq!(updated.last_name, "Orlov");
        assert_eq!(updated.age, 52);
        assert_eq!(updated.course_id, Some(course.id));

        assert!(matches!(
            update(&db, 999, person("Nobody")).await.unwrap_err(),
            Error::NotFound { .. }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_find_with_course() -> Result<()> {
        let (db, course, teacher) = setup_with_course_and_teacher().await?;
        let other = create_test_teacher(&db, "Boris").await?;
        assign_course_to_teacher(&db, course.id, teacher.id).await?;

        let (found, with) = find_by_id_with_course(&db, teacher.id).await?;
        assert_eq!(found.id, teacher.id);
        assert_eq!(with.as_ref(), Some(&course));

        let all = find_all_with_course(&db).await?;
        assert_eq!(all.len(), 2);
        let unassigned = all.iter().find(|(t, _)| t.id == other.id).unwrap();
        assert!(unassigned.1.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_teacher_unlinks_students() -> Result<()> {
        let (db, course, teacher) = setup_with_course_and_teacher().await?;
        let student = create_test_student(&db, "Olga").await?;
        assign_course_to_teacher(&db, course.id, teacher.id).await?;
        student_service::assign_teacher_to_student(&db, teacher.id, student.id).await?;

        delete_by_id(&db, teacher.id).await?;

        assert!(matches!(
            find_by_id(&db, teacher.id).await.unwrap_err(),
            Error::NotFound { .. }
        ));
        assert!(student_service::find_teachers_by_student_id(&db, student.id).await?.is_empty());
        assert!(course_service::find_teachers_by_course(&db, course.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_teacher_fails() -> Result<()> {
        let db = setup_test_db().await?;
        let teacher = create_test_teacher(&db, "Ivan").await?;

        assert!(matches!(
            delete_by_id(&db, 999).await.unwrap_err(),
            Error::NotFound {
                kind: EntityKind::Teacher,
                id: 999
            }
        ));
        // Existing rows are untouched
        assert_eq!(find_by_id(&db, teacher.id).await?, teacher);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_students_of_teacher() -> Result<()> {
        let (db, _course, teacher) = setup_with_course_and_teacher().await?;
        let first = create_test_student(&db, "Olga").await?;
        let second = create_test_student(&db, "Pavel").await?;
        student_service::assign_teacher_to_student(&db, teacher.id, first.id).await?;
        student_service::assign_teacher_to_student(&db, teacher.id, second.id).await?;

        let students = find_students_of_teacher(&db, teacher.id).await?;
        assert_eq!(students, vec![first, second]);

        assert!(matches!(
            find_students_of_teacher(&db, 999).await.unwrap_err(),
            Error::NotFound { .. }
        ));
        Ok(())
    }
}
