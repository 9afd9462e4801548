//! Student routes

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;

use super::{created, message};
use crate::core::student as student_service;
use crate::dto::{CourseDto, PersonRequest, StudentDto, TeacherDto};
use crate::http::error::ApiResult;
use crate::http::extractors::{IdPath, JsonBody};
use crate::http::AppState;

/// Path parameters of `/{student_id}/.../{teacher_id}` routes
#[derive(Debug, Deserialize)]
pub struct StudentTeacherPath {
    /// Student id
    pub student_id: i64,
    /// Teacher id
    pub teacher_id: i64,
}

/// Path parameters of `/{student_id}/.../{course_id}` routes
#[derive(Debug, Deserialize)]
pub struct StudentCoursePath {
    /// Student id
    pub student_id: i64,
    /// Course id
    pub course_id: i64,
}

/// GET /api/students
pub async fn list_students(State(state): State<AppState>) -> ApiResult<Json<Vec<StudentDto>>> {
    let students = student_service::find_all(state.db()).await?;
    Ok(Json(students.into_iter().map(StudentDto::from).collect()))
}

/// GET /api/students/{id}
pub async fn get_student(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<Json<StudentDto>> {
    let student = student_service::find_by_id(state.db(), id).await?;
    Ok(Json(student.into()))
}

/// GET /api/students/{id}/courses
pub async fn list_student_courses(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<Json<Vec<CourseDto>>> {
    let courses = student_service::find_courses_by_student_id(state.db(), id).await?;
    Ok(Json(courses.into_iter().map(CourseDto::from).collect()))
}

/// GET /api/students/{id}/teachers
pub async fn list_student_teachers(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<Json<Vec<TeacherDto>>> {
    let teachers = student_service::find_teachers_by_student_id(state.db(), id).await?;
    Ok(Json(teachers.into_iter().map(TeacherDto::from).collect()))
}

/// POST /api/students
pub async fn create_student(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PersonRequest>,
) -> ApiResult<Response> {
    let student = student_service::save(state.db(), req.into_input()?).await?;
    Ok(created(
        format!("/api/students/{}", student.id),
        StudentDto::from(student),
    ))
}

/// POST /api/students/{student_id}/teachers/{teacher_id}
pub async fn assign_teacher(
    State(state): State<AppState>,
    IdPath(path): IdPath<StudentTeacherPath>,
) -> ApiResult<Response> {
    let assigned =
        student_service::assign_teacher_to_student(state.db(), path.teacher_id, path.student_id)
            .await?;
    Ok(if assigned {
        message(StatusCode::OK, "Teacher assigned to student")
    } else {
        message(StatusCode::CONFLICT, "Teacher already assigned to this student")
    })
}

/// POST /api/students/{student_id}/courses/{course_id}
pub async fn assign_course(
    State(state): State<AppState>,
    IdPath(path): IdPath<StudentCoursePath>,
) -> ApiResult<Response> {
    let assigned =
        student_service::assign_course_to_student(state.db(), path.course_id, path.student_id)
            .await?;
    Ok(if assigned {
        message(StatusCode::OK, "Course assigned to student")
    } else {
        message(StatusCode::CONFLICT, "Course already assigned to this student")
    })
}

/// PUT /api/students/{id}
pub async fn update_student(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
    JsonBody(req): JsonBody<PersonRequest>,
) -> ApiResult<Json<StudentDto>> {
    let student = student_service::update(state.db(), id, req.into_input()?).await?;
    Ok(Json(student.into()))
}

/// DELETE /api/students/{id}
pub async fn delete_student(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<StatusCode> {
    student_service::delete_by_id(state.db(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/students/{student_id}/teachers/{teacher_id}
pub async fn remove_teacher(
    State(state): State<AppState>,
    IdPath(path): IdPath<StudentTeacherPath>,
) -> ApiResult<Response> {
    let removed =
        student_service::remove_teacher_from_student(state.db(), path.teacher_id, path.student_id)
            .await?;
    Ok(if removed {
        message(StatusCode::OK, "Teacher removed from student")
    } else {
        message(
            StatusCode::NOT_FOUND,
            "Teacher not found in the list of student's teachers",
        )
    })
}

/// DELETE /api/students/{student_id}/courses/{course_id}
pub async fn remove_course(
    State(state): State<AppState>,
    IdPath(path): IdPath<StudentCoursePath>,
) -> ApiResult<Response> {
    let removed =
        student_service::remove_course_from_student(state.db(), path.course_id, path.student_id)
            .await?;
    Ok(if removed {
        message(StatusCode::OK, "Course removed from student")
    } else {
        message(
            StatusCode::NOT_FOUND,
            "Course not found in the list of student's courses",
        )
    })
}
