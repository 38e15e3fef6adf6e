use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::store::models::{Teacher, TeacherDraft};
use crate::store::EntityStore;

use super::{missing_fields_error, parse_entity_id, ActionResult, WorkflowError};

/// Teacher lifecycle workflow: validated create, lookup, partial update and
/// a dependency-guarded delete.
#[derive(Clone)]
pub struct TeacherService {
    store: Arc<dyn EntityStore>,
}

impl TeacherService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, draft: TeacherDraft) -> Result<Teacher, WorkflowError> {
        let mut missing = Vec::new();
        if draft.name.is_none() {
            missing.push("name");
        }
        if draft.email.is_none() {
            missing.push("email");
        }
        if draft.registration.is_none() {
            missing.push("registration");
        }
        if draft.birth_date.is_none() {
            missing.push("birth_date");
        }
        if !missing.is_empty() {
            return Err(missing_fields_error(&missing));
        }

        // Presence checked above
        let (Some(name), Some(email), Some(registration), Some(birth_date)) =
            (draft.name, draft.email, draft.registration, draft.birth_date)
        else {
            return Err(missing_fields_error(&missing));
        };

        if self.store.find_teacher_by_email(&email).await?.is_some() {
            return Err(WorkflowError::unprocessable(
                "A teacher with this email already exists",
            ));
        }

        let now = Utc::now();
        let teacher = Teacher {
            id: Uuid::new_v4(),
            name,
            email,
            registration,
            birth_date,
            created_at: now,
            updated_at: now,
        };

        let created = self.store.insert_teacher(teacher).await?;
        tracing::info!(teacher_id = %created.id, "created teacher");
        Ok(created)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Teacher, WorkflowError> {
        let id = parse_entity_id(id, "Teacher")?;
        self.store
            .find_teacher(id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Teacher not found"))
    }

    pub async fn update(&self, id: &str, draft: TeacherDraft) -> Result<Teacher, WorkflowError> {
        let mut teacher = self.find_by_id(id).await?;
        teacher.merge(draft);
        self.store.save_teacher(&teacher).await?;
        Ok(teacher)
    }

    /// Delete a teacher. Refused while the teacher still owns classrooms,
    /// matching the classroom/roster guard.
    pub async fn delete(&self, id: &str) -> Result<ActionResult, WorkflowError> {
        let teacher = self.find_by_id(id).await?;

        let owned = self.store.count_classrooms_owned_by(teacher.id).await?;
        if owned > 0 {
            return Err(WorkflowError::unprocessable(
                "Cannot delete teacher with classrooms. Please remove all classrooms first.",
            ));
        }

        self.store.delete_teacher(teacher.id).await?;
        tracing::info!(teacher_id = %teacher.id, "deleted teacher");
        Ok(ActionResult::ok("Teacher deleted successfully"))
    }
}
