//! Student service - CRUD plus enrolments and teacher links.
//!
//! Both associations are many-to-many and unique per pair. Assigning an existing pair
//! or removing a missing one returns `false`; only a missing endpoint is an error.

use crate::{
    core::relationship::Membership,
    entities::{course, student, teacher},
    errors::{Error, Result},
    models::PersonInput,
    store::{courses, links, students, teachers},
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info, instrument};

/// Finds a student by id.
///
/// # Errors
/// Returns `Error::NotFound` if no student has this id.
#[instrument(skip(db))]
pub async fn find_by_id(db: &DatabaseConnection, student_id: i64) -> Result<student::Model> {
    students::get(db, student_id)
        .await?
        .ok_or_else(|| Error::student_not_found(student_id))
}

/// Lists every student. The order is not part of the contract.
#[instrument(skip(db))]
pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<student::Model>> {
    let all = students::get_all(db).await?;
    debug!("Fetched {} students.", all.len());
    Ok(all)
}

/// Stores a new student and returns it with its generated id.
#[instrument(skip(db))]
pub async fn save(db: &DatabaseConnection, input: PersonInput) -> Result<student::Model> {
    let student = students::insert(db, &input).await?;
    info!(
        "Created student {} {} (ID: {})",
        student.first_name, student.last_name, student.id
    );
    Ok(student)
}

/// Overwrites name and age of an existing student.
///
/// # Errors
/// Returns `Error::NotFound` if no student has this id.
#[instrument(skip(db))]
pub async fn update(
    db: &DatabaseConnection,
    student_id: i64,
    input: PersonInput,
) -> Result<student::Model> {
    let txn = db.begin().await?;

    students::get(&txn, student_id)
        .await?
        .ok_or_else(|| Error::student_not_found(student_id))?;
    let student = students::replace(&txn, student_id, &input).await?;

    txn.commit().await?;
    info!("Updated student {}", student.id);
    Ok(student)
}

/// Deletes a student after dropping its enrolments and teacher links.
///
/// # Errors
/// Returns `Error::NotFound` if no student has this id.
#[instrument(skip(db))]
pub async fn delete_by_id(db: &DatabaseConnection, student_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    students::get(&txn, student_id)
        .await?
        .ok_or_else(|| Error::student_not_found(student_id))?;

    let mut enrolments =
        Membership::from_pairs(links::course_pairs_for_student(&txn, student_id).await?);
    let dropped_courses = enrolments.detach_left(student_id);
    debug_assert!(enrolments.is_consistent());
    links::delete_course_pairs(&txn, &dropped_courses).await?;

    let mut tutoring =
        Membership::from_pairs(links::teacher_pairs_for_student(&txn, student_id).await?);
    let dropped_teachers = tutoring.detach_left(student_id);
    debug_assert!(tutoring.is_consistent());
    links::delete_teacher_pairs(&txn, &dropped_teachers).await?;

    students::delete(&txn, student_id).await?;
    txn.commit().await?;

    info!(
        "Deleted student {} (dropped {} enrolments, {} teacher links)",
        student_id,
        dropped_courses.len(),
        dropped_teachers.len()
    );
    Ok(())
}

/// Courses a student is enrolled in.
///
/// # Errors
/// Returns `Error::NotFound` if no student has this id.
#[instrument(skip(db))]
pub async fn find_courses_by_student_id(
    db: &DatabaseConnection,
    student_id: i64,
) -> Result<Vec<course::Model>> {
    find_by_id(db, student_id).await?;
    courses::enrolled_by(db, student_id).await
}

/// Teachers linked to a student.
///
/// # Errors
/// Returns `Error::NotFound` if no student has this id.
#[instrument(skip(db))]
pub async fn find_teachers_by_student_id(
    db: &DatabaseConnection,
    student_id: i64,
) -> Result<Vec<teacher::Model>> {
    find_by_id(db, student_id).await?;
    teachers::teaching(db, student_id).await
}

/// Enrols a student in a course. Returns `false` if already enrolled.
///
/// # Errors
/// Returns `Error::NotFound` if the course or the student does not exist.
#[instrument(skip(db))]
pub async fn assign_course_to_student(
    db: &DatabaseConnection,
    course_id: i64,
    student_id: i64,
) -> Result<bool> {
    let txn = db.begin().await?;

    courses::get(&txn, course_id)
        .await?
        .ok_or_else(|| Error::course_not_found(course_id))?;
    students::get(&txn, student_id)
        .await?
        .ok_or_else(|| Error::student_not_found(student_id))?;

    let mut enrolments =
        Membership::from_pairs(links::course_pairs_for_student(&txn, student_id).await?);
    if !enrolments.assign(student_id, course_id) {
        info!("Student {} already enrolled in course {}", student_id, course_id);
        return Ok(false);
    }
    debug_assert!(enrolments.is_consistent());

    links::insert_course_pair(&txn, student_id, course_id).await?;
    txn.commit().await?;

    info!("Enrolled student {} in course {}", student_id, course_id);
    Ok(true)
}

/// Withdraws a student from a course. Returns `false` if not enrolled.
///
/// # Errors
/// Returns `Error::NotFound` if the course or the student does not exist.
#[instrument(skip(db))]
pub async fn remove_course_from_student(
    db: &DatabaseConnection,
    course_id: i64,
    student_id: i64,
) -> Result<bool> {
    let txn = db.begin().await?;

    courses::get(&txn, course_id)
        .await?
        .ok_or_else(|| Error::course_not_found(course_id))?;
    students::get(&txn, student_id)
        .await?
        .ok_or_else(|| Error::student_not_found(student_id))?;

    let mut enrolments =
        Membership::from_pairs(links::course_pairs_for_student(&txn, student_id).await?);
    if !enrolments.remove(student_id, course_id) {
        info!("Student {} is not enrolled in course {}", student_id, course_id);
        return Ok(false);
    }
    debug_assert!(enrolments.is_consistent());

    links::delete_course_pairs(&txn, &[(student_id, course_id)]).await?;
    txn.commit().await?;

    info!("Withdrew student {} from course {}", student_id, course_id);
    Ok(true)
}

/// Links a teacher to a student. Returns `false` if already linked.
///
/// # Errors
/// Returns `Error::NotFound` if the student or the teacher does not exist.
#[instrument(skip(db))]
pub async fn assign_teacher_to_student(
    db: &DatabaseConnection,
    teacher_id: i64,
    student_id: i64,
) -> Result<bool> {
    let txn = db.begin().await?;

    students::get(&txn, student_id)
        .await?
        .ok_or_else(|| Error::student_not_found(student_id))?;
    teachers::get(&txn, teacher_id)
        .await?
        .ok_or_else(|| Error::teacher_not_found(teacher_id))?;

    let mut tutoring =
        Membership::from_pairs(links::teacher_pairs_for_student(&txn, student_id).await?);
    if !tutoring.assign(student_id, teacher_id) {
        info!("Teacher {} already assigned to student {}", teacher_id, student_id);
        return Ok(false);
    }
    debug_assert!(tutoring.is_consistent());

    links::insert_teacher_pair(&txn, student_id, teacher_id).await?;
    txn.commit().await?;

    info!("Assigned teacher {} to student {}", teacher_id, student_id);
    Ok(true)
}

/// Unlinks a teacher from a student. Returns `false` if they were not linked.
///
/// # Errors
/// Returns `Error::NotFound` if the student or the teacher does not exist.
#[instrument(skip(db))]
pub async fn remove_teacher_from_student(
    db: &DatabaseConnection,
    teacher_id: i64,
    student_id: i64,
) -> Result<bool> {
    let txn = db.begin().await?;

    students::get(&txn, student_id)
        .await?
        .ok_or_else(|| Error::student_not_found(student_id))?;
    teachers::get(&txn, teacher_id)
        .await?
        .ok_or_else(|| Error::teacher_not_found(teacher_id))?;

    let mut tutoring =
        Membership::from_pairs(links::teacher_pairs_for_student(&txn, student_id).await?);
    if !tutoring.remove(student_id, teacher_id) {
        info!("Teacher {} is not assigned to student {}", teacher_id, student_id);
        return Ok(false);
    }
    debug_assert!(tutoring.is_consistent());

    links::delete_teacher_pairs(&txn, &[(student_id, teacher_id)]).await?;
    txn.commit().await?;

    info!("Removed teacher {} from student {}", teacher_id, student_id);
    Ok(true)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{course as course_service, teacher as teacher_service};
    use crate::errors::EntityKind;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_save_then_find_by_id() -> Result<()> {
        let db = setup_test_db().await?;

        let input = PersonInput::new("Olga", "Smirnova", "Igorevna", 19);
        let saved = save(&db, input.clone()).await?;
        let found = find_by_id(&db, saved.id).await?;

        assert_eq!(found, saved);
        assert_eq!(found.first_name, input.first_name);
        assert_eq!(found.age, 19);
        Ok(())
    }

    #[tokio::test]
    async fn test_enrol_in_two_courses_scenario() -> Result<()> {
        let db = setup_test_db().await?;
        let student = create_test_student(&db, "Olga").await?;
        let math = create_test_course(&db, "Math").await?;
        let art = create_test_course(&db, "Art").await?;

        assert!(assign_course_to_student(&db, math.id, student.id).await?);
        assert!(assign_course_to_student(&db, art.id, student.id).await?);

        let courses = find_courses_by_student_id(&db, student.id).await?;
        assert_eq!(courses.len(), 2);
        assert!(courses.contains(&math));
        assert!(courses.contains(&art));

        // Reverse traversal agrees
        assert_eq!(
            course_service::find_students_by_course(&db, math.id).await?,
            vec![student.clone()]
        );
        assert_eq!(
            course_service::find_students_by_course(&db, art.id).await?,
            vec![student]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_assign_course_twice_returns_false() -> Result<()> {
        let db = setup_test_db().await?;
        let student = create_test_student(&db, "Olga").await?;
        let math = create_test_course(&db, "Math").await?;

        assert!(assign_course_to_student(&db, math.id, student.id).await?);
        assert!(!assign_course_to_student(&db, math.id, student.id).await?);
        assert_eq!(find_courses_by_student_id(&db, student.id).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_course_from_student() -> Result<()> {
        let db = setup_test_db().await?;
        let student = create_test_student(&db, "Olga").await?;
        let math = create_test_course(&db, "Math").await?;

        assert!(!remove_course_from_student(&db, math.id, student.id).await?);

        assign_course_to_student(&db, math.id, student.id).await?;
        assert!(remove_course_from_student(&db, math.id, student.id).await?);
        assert!(find_courses_by_student_id(&db, student.id).await?.is_empty());
        assert!(course_service::find_students_by_course(&db, math.id).await?.is_empty());
        assert!(!remove_course_from_student(&db, math.id, student.id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_teacher_links_are_symmetric() -> Result<()> {
        let db = setup_test_db().await?;
        let student = create_test_student(&db, "Olga").await?;
        let teacher = create_test_teacher(&db, "Ivan").await?;

        assert!(assign_teacher_to_student(&db, teacher.id, student.id).await?);
        assert!(!assign_teacher_to_student(&db, teacher.id, student.id).await?);

        assert_eq!(
            find_teachers_by_student_id(&db, student.id).await?,
            vec![teacher.clone()]
        );
        assert_eq!(
            teacher_service::find_students_of_teacher(&db, teacher.id).await?,
            vec![student.clone()]
        );

        assert!(remove_teacher_from_student(&db, teacher.id, student.id).await?);
        assert!(!remove_teacher_from_student(&db, teacher.id, student.id).await?);
        assert!(find_teachers_by_student_id(&db, student.id).await?.is_empty());
        assert!(teacher_service::find_students_of_teacher(&db, teacher.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_endpoints_fail_with_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let student = create_test_student(&db, "Olga").await?;

        assert!(matches!(
            assign_course_to_student(&db, 77, student.id).await.unwrap_err(),
            Error::NotFound {
                kind: EntityKind::Course,
                id: 77
            }
        ));
        assert!(matches!(
            assign_teacher_to_student(&db, 88, student.id).await.unwrap_err(),
            Error::NotFound {
                kind: EntityKind::Teacher,
                id: 88
            }
        ));
        // Student is looked up before the teacher
        assert!(matches!(
            remove_teacher_from_student(&db, 88, 99).await.unwrap_err(),
            Error::NotFound {
                kind: EntityKind::Student,
                id: 99
            }
        ));
        assert!(matches!(
            find_courses_by_student_id(&db, 99).await.unwrap_err(),
            Error::NotFound { .. }
        ));
        assert!(matches!(
            find_teachers_by_student_id(&db, 99).await.unwrap_err(),
            Error::NotFound { .. }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_keeps_relationships() -> Result<()> {
        let db = setup_test_db().await?;
        let student = create_test_student(&db, "Olga").await?;
        let math = create_test_course(&db, "Math").await?;
        assign_course_to_student(&db, math.id, student.id).await?;

        let input = PersonInput::new("Olga", "Orlova", "Ivanovna", 20);
        let updated = update(&db, student.id, input).await?;
        assert_eq!(updated.last_name, "Orlova");
        assert_eq!(find_courses_by_student_id(&db, student.id).await?, vec![math]);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_student_detaches_everything() -> Result<()> {
        let db = setup_test_db().await?;
        let student = create_test_student(&db, "Olga").await?;
        let other = create_test_student(&db, "Pavel").await?;
        let math = create_test_course(&db, "Math").await?;
        let teacher = create_test_teacher(&db, "Ivan").await?;
        assign_course_to_student(&db, math.id, student.id).await?;
        assign_course_to_student(&db, math.id, other.id).await?;
        assign_teacher_to_student(&db, teacher.id, student.id).await?;

        delete_by_id(&db, student.id).await?;

        assert!(matches!(
            find_by_id(&db, student.id).await.unwrap_err(),
            Error::NotFound { .. }
        ));
        assert_eq!(
            course_service::find_students_by_course(&db, math.id).await?,
            vec![other]
        );
        assert!(teacher_service::find_students_of_teacher(&db, teacher.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_student_fail() -> Result<()> {
        let db = setup_test_db().await?;
        let student = create_test_student(&db, "Olga").await?;

        assert!(matches!(
            update(&db, 999, person("Nobody")).await.unwrap_err(),
            Error::NotFound {
                kind: EntityKind::Student,
                id: 999
            }
        ));
        assert!(matches!(
            delete_by_id(&db, 999).await.unwrap_err(),
            Error::NotFound {
                kind: EntityKind::Student,
                id: 999
            }
        ));
        assert_eq!(find_by_id(&db, student.id).await?, student);
        Ok(())
    }
}
