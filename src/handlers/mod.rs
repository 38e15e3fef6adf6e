pub mod classrooms;
pub mod students;
pub mod teachers;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::require_teacher_header;
use crate::services::{ClassroomService, StudentService, TeacherService};
use crate::store::EntityStore;

/// Shared handler state: the three workflow services plus the store handle
/// used by the health probe. Services are built once from a single injected
/// store; cloning is cheap (Arc internals).
#[derive(Clone)]
pub struct AppState {
    pub teachers: TeacherService,
    pub students: StudentService,
    pub classrooms: ClassroomService,
    store: Arc<dyn EntityStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            teachers: TeacherService::new(store.clone()),
            students: StudentService::new(store.clone()),
            classrooms: ClassroomService::new(store.clone()),
            store,
        }
    }
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(teacher_routes())
        .merge(student_routes())
        .merge(classroom_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn teacher_routes() -> Router<AppState> {
    use axum::routing::post;

    Router::new()
        .route("/teachers", post(teachers::create))
        .route(
            "/teachers/:id",
            get(teachers::find_by_id)
                .put(teachers::update)
                .delete(teachers::delete),
        )
}

fn student_routes() -> Router<AppState> {
    use axum::routing::post;

    Router::new()
        .route("/students", post(students::create))
        .route(
            "/students/:id",
            get(students::find_by_id)
                .put(students::update)
                .delete(students::delete),
        )
        .route("/students/:id/classrooms", get(students::get_classrooms))
}

fn classroom_routes() -> Router<AppState> {
    use axum::middleware::from_fn;
    use axum::routing::{post, put};

    // Mutating classroom routes and roster reads require the x-teacher-id
    // header, independent of the workflow's own ownership check.
    let gated = Router::new()
        .route("/classrooms", post(classrooms::create))
        .route("/classrooms/:id/students", get(classrooms::get_students))
        .route(
            "/classrooms/:id/students/:student_id",
            post(classrooms::add_student).delete(classrooms::remove_student),
        )
        .route_layer(from_fn(require_teacher_header));

    // GET /classrooms/:id is public; PUT/DELETE on the same path are gated
    let by_id = get(classrooms::find_by_id).merge(
        put(classrooms::update)
            .delete(classrooms::delete)
            .route_layer(from_fn(require_teacher_header)),
    );

    Router::new().route("/classrooms/:id", by_id).merge(gated)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Classroom API",
        "version": version,
        "description": "School management REST API - teachers, students, classrooms and enrollment",
        "endpoints": {
            "teachers": "/teachers[/:id]",
            "students": "/students[/:id], /students/:id/classrooms",
            "classrooms": "/classrooms[/:id], /classrooms/:id/students[/:studentId]",
            "health": "/health"
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "store": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "store_error": e.to_string()
            })),
        ),
    }
}
