//! Teacher routes

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use super::{created, message};
use crate::core::teacher as teacher_service;
use crate::dto::{CourseDto, PersonRequest, StudentDto, TeacherDto};
use crate::http::error::ApiResult;
use crate::http::extractors::{IdPath, JsonBody};
use crate::http::AppState;

/// Path parameters of `/{teacher_id}/.../{course_id}` routes
#[derive(Debug, Deserialize)]
pub struct TeacherCoursePath {
    /// Teacher id
    pub teacher_id: i64,
    /// Course id
    pub course_id: i64,
}

/// GET /api/teachers
pub async fn list_teachers(State(state): State<AppState>) -> ApiResult<Json<Vec<TeacherDto>>> {
    let teachers = teacher_service::find_all_with_course(state.db()).await?;
    Ok(Json(teachers.into_iter().map(TeacherDto::from).collect()))
}

/// GET /api/teachers/{id}
pub async fn get_teacher(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<Json<TeacherDto>> {
    let teacher = teacher_service::find_by_id_with_course(state.db(), id).await?;
    Ok(Json(teacher.into()))
}

/// GET /api/teachers/{id}/courses - 204 when the teacher has no course
pub async fn get_teacher_course(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<Response> {
    let response = match teacher_service::find_course_of_teacher(state.db(), id).await? {
        Some(course) => Json(CourseDto::from(course)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    };
    Ok(response)
}

/// GET /api/teachers/{id}/students
pub async fn list_teacher_students(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<Json<Vec<StudentDto>>> {
    let students = teacher_service::find_students_of_teacher(state.db(), id).await?;
    Ok(Json(students.into_iter().map(StudentDto::from).collect()))
}

/// POST /api/teachers
pub async fn create_teacher(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PersonRequest>,
) -> ApiResult<Response> {
    let teacher = teacher_service::save(state.db(), req.into_input()?).await?;
    Ok(created(
        format!("/api/teachers/{}", teacher.id),
        TeacherDto::from(teacher),
    ))
}

/// POST /api/teachers/{teacher_id}/courses/{course_id}
pub async fn assign_course(
    State(state): State<AppState>,
    IdPath(path): IdPath<TeacherCoursePath>,
) -> ApiResult<Response> {
    let assigned =
        teacher_service::assign_course_to_teacher(state.db(), path.course_id, path.teacher_id)
            .await?;
    Ok(if assigned {
        message(StatusCode::OK, "Teacher is assigned to the course")
    } else {
        message(StatusCode::CONFLICT, "Teacher cannot be assigned to two subjects")
    })
}

/// PUT /api/teachers/{id}
pub async fn update_teacher(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
    JsonBody(req): JsonBody<PersonRequest>,
) -> ApiResult<Json<TeacherDto>> {
    teacher_service::update(state.db(), id, req.into_input()?).await?;
    let teacher = teacher_service::find_by_id_with_course(state.db(), id).await?;
    Ok(Json(teacher.into()))
}

/// DELETE /api/teachers/{id}
pub async fn delete_teacher(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<StatusCode> {
    teacher_service::delete_by_id(state.db(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/teachers/{teacher_id}/courses/{course_id}
pub async fn remove_course(
    State(state): State<AppState>,
    IdPath(path): IdPath<TeacherCoursePath>,
) -> ApiResult<Response> {
    let removed =
        teacher_service::remove_course_from_teacher(state.db(), path.course_id, path.teacher_id)
            .await?;
    Ok(if removed {
        message(StatusCode::OK, "Course is removed from the teacher")
    } else {
        message(StatusCode::NOT_FOUND, "Teacher doesn't teach this subject")
    })
}
