pub mod classroom_service;
pub mod student_service;
pub mod teacher_service;

pub use classroom_service::ClassroomService;
pub use student_service::StudentService;
pub use teacher_service::TeacherService;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::store::models::{Classroom, Teacher};
use crate::store::StoreError;

/// The four failure kinds the workflows produce. The HTTP boundary maps
/// them to status codes (400, 404, 401, 422); store failures pass through
/// to the generic 5xx fallback.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{0}")]
    BadInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    UnprocessableState(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl WorkflowError {
    pub fn bad_input(message: impl Into<String>) -> Self {
        WorkflowError::BadInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        WorkflowError::NotFound(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        WorkflowError::Unauthorized(message.into())
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        WorkflowError::UnprocessableState(message.into())
    }
}

/// Success confirmation returned by roster mutations and deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
}

impl ActionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Parse a caller-supplied identifier. A malformed UUID can never reference
/// a stored record, so it reports as not-found for the named entity.
pub(crate) fn parse_entity_id(raw: &str, entity: &str) -> Result<Uuid, WorkflowError> {
    Uuid::parse_str(raw).map_err(|_| WorkflowError::not_found(format!("{} not found", entity)))
}

/// Ownership predicate: plain identity comparison between the classroom's
/// stored teacher reference and the claimed acting teacher. Not an
/// authentication mechanism.
pub(crate) fn owns(classroom: &Classroom, teacher: &Teacher) -> bool {
    classroom.teacher_id == teacher.id
}

/// Build the `Missing required fields: ...` rejection shared by the create
/// workflows.
pub(crate) fn missing_fields_error(missing: &[&str]) -> WorkflowError {
    WorkflowError::bad_input(format!("Missing required fields: {}", missing.join(", ")))
}
