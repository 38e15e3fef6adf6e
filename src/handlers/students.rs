use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::ApiError;
use crate::store::models::{Student, StudentClassrooms, StudentDraft};

use super::AppState;

/// POST /students
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<StudentDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let student = state.students.create(draft).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// GET /students/:id
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Student>, ApiError> {
    let student = state.students.find_by_id(&id).await?;
    Ok(Json(student))
}

/// GET /students/:id/classrooms
pub async fn get_classrooms(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StudentClassrooms>, ApiError> {
    let summary = state.students.get_classrooms(&id).await?;
    Ok(Json(summary))
}

/// PUT /students/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<StudentDraft>,
) -> Result<Json<Student>, ApiError> {
    let student = state.students.update(&id, draft).await?;
    Ok(Json(student))
}

/// DELETE /students/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.students.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
