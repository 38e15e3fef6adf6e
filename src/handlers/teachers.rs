use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::ApiError;
use crate::store::models::{Teacher, TeacherDraft};

use super::AppState;

/// POST /teachers
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<TeacherDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let teacher = state.teachers.create(draft).await?;
    Ok((StatusCode::CREATED, Json(teacher)))
}

/// GET /teachers/:id
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Teacher>, ApiError> {
    let teacher = state.teachers.find_by_id(&id).await?;
    Ok(Json(teacher))
}

/// PUT /teachers/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<TeacherDraft>,
) -> Result<Json<Teacher>, ApiError> {
    let teacher = state.teachers.update(&id, draft).await?;
    Ok(Json(teacher))
}

/// DELETE /teachers/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.teachers.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
