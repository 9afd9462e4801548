//! Course routes

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;

use super::created;
use crate::core::course as course_service;
use crate::dto::{CourseDto, CourseRequest, StudentDto, TeacherDto};
use crate::http::error::ApiResult;
use crate::http::extractors::{IdPath, JsonBody};
use crate::http::AppState;

/// GET /api/courses
pub async fn list_courses(State(state): State<AppState>) -> ApiResult<Json<Vec<CourseDto>>> {
    let courses = course_service::find_all(state.db()).await?;
    Ok(Json(courses.into_iter().map(CourseDto::from).collect()))
}

/// GET /api/courses/{id}
pub async fn get_course(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<Json<CourseDto>> {
    let course = course_service::find_by_id(state.db(), id).await?;
    Ok(Json(course.into()))
}

/// GET /api/courses/{id}/students
pub async fn list_course_students(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<Json<Vec<StudentDto>>> {
    let students = course_service::find_students_by_course(state.db(), id).await?;
    Ok(Json(students.into_iter().map(StudentDto::from).collect()))
}

/// GET /api/courses/{id}/teachers - each teacher carries this course
pub async fn list_course_teachers(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<Json<Vec<TeacherDto>>> {
    let course = course_service::find_by_id(state.db(), id).await?;
    let teachers = course_service::find_teachers_by_course(state.db(), id).await?;
    Ok(Json(
        teachers
            .into_iter()
            .map(|t| TeacherDto::with_course(t, Some(course.clone())))
            .collect(),
    ))
}

/// POST /api/courses
pub async fn create_course(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CourseRequest>,
) -> ApiResult<Response> {
    let course = course_service::save(state.db(), req.into_input()?).await?;
    Ok(created(
        format!("/api/courses/{}", course.id),
        CourseDto::from(course),
    ))
}

/// PUT /api/courses/{id}
pub async fn update_course(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
    JsonBody(req): JsonBody<CourseRequest>,
) -> ApiResult<Json<CourseDto>> {
    let course = course_service::update(state.db(), id, req.into_input()?).await?;
    Ok(Json(course.into()))
}

/// DELETE /api/courses/{id}
pub async fn delete_course(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<StatusCode> {
    course_service::delete_by_id(state.db(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
