use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::ApiError;
use crate::middleware::ActingTeacherId;
use crate::services::ActionResult;
use crate::store::models::{Classroom, ClassroomDraft, Student};

use super::AppState;

/// POST /classrooms
///
/// The owning teacher comes from the request body; the x-teacher-id header
/// is presence-checked by middleware like every other mutating route.
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<ClassroomDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let classroom = state.classrooms.create(draft).await?;
    Ok((StatusCode::CREATED, Json(classroom)))
}

/// GET /classrooms/:id
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Classroom>, ApiError> {
    let classroom = state.classrooms.find_by_id(&id).await?;
    Ok(Json(classroom))
}

/// PUT /classrooms/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(ActingTeacherId(teacher_id)): Extension<ActingTeacherId>,
    Json(draft): Json<ClassroomDraft>,
) -> Result<Json<Classroom>, ApiError> {
    let classroom = state.classrooms.update(&id, draft, &teacher_id).await?;
    Ok(Json(classroom))
}

/// DELETE /classrooms/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(ActingTeacherId(teacher_id)): Extension<ActingTeacherId>,
) -> Result<impl IntoResponse, ApiError> {
    state.classrooms.delete(&id, &teacher_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /classrooms/:id/students
pub async fn get_students(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(ActingTeacherId(teacher_id)): Extension<ActingTeacherId>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let roster = state.classrooms.get_students(&id, &teacher_id).await?;
    Ok(Json(roster))
}

/// POST /classrooms/:id/students/:student_id
pub async fn add_student(
    State(state): State<AppState>,
    Path((id, student_id)): Path<(String, String)>,
    Extension(ActingTeacherId(teacher_id)): Extension<ActingTeacherId>,
) -> Result<Json<ActionResult>, ApiError> {
    let result = state
        .classrooms
        .add_student(&id, &student_id, &teacher_id)
        .await?;
    Ok(Json(result))
}

/// DELETE /classrooms/:id/students/:student_id
pub async fn remove_student(
    State(state): State<AppState>,
    Path((id, student_id)): Path<(String, String)>,
    Extension(ActingTeacherId(teacher_id)): Extension<ActingTeacherId>,
) -> Result<Json<ActionResult>, ApiError> {
    let result = state
        .classrooms
        .remove_student(&id, &student_id, &teacher_id)
        .await?;
    Ok(Json(result))
}
