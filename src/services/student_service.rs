use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::store::models::{Student, StudentClassrooms, StudentDraft};
use crate::store::EntityStore;

use super::{missing_fields_error, parse_entity_id, ActionResult, WorkflowError};

/// Student lifecycle workflow plus the enrolled-classrooms summary view.
#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn EntityStore>,
}

impl StudentService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, draft: StudentDraft) -> Result<Student, WorkflowError> {
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

        let (Some(name), Some(email), Some(registration), Some(birth_date)) =
            (draft.name, draft.email, draft.registration, draft.birth_date)
        else {
            return Err(missing_fields_error(&missing));
        };

        if self.store.find_student_by_email(&email).await?.is_some() {
            return Err(WorkflowError::unprocessable(
                "A student with this email already exists",
            ));
        }

        let now = Utc::now();
        let student = Student {
            id: Uuid::new_v4(),
            name,
            email,
            registration,
            birth_date,
            created_at: now,
            updated_at: now,
        };

        let created = self.store.insert_student(student).await?;
        tracing::info!(student_id = %created.id, "created student");
        Ok(created)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Student, WorkflowError> {
        let id = parse_entity_id(id, "Student")?;
        self.store
            .find_student(id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Student not found"))
    }

    /// Classrooms the student is enrolled in, each summarized as the owning
    /// teacher's name and the room number.
    pub async fn get_classrooms(&self, id: &str) -> Result<StudentClassrooms, WorkflowError> {
        let student = self.find_by_id(id).await?;
        let classrooms = self.store.classrooms_of_student(student.id).await?;

        Ok(StudentClassrooms {
            student_name: student.name,
            classrooms,
        })
    }

    pub async fn update(&self, id: &str, draft: StudentDraft) -> Result<Student, WorkflowError> {
        let mut student = self.find_by_id(id).await?;
        student.merge(draft);
        self.store.save_student(&student).await?;
        Ok(student)
    }

    pub async fn delete(&self, id: &str) -> Result<ActionResult, WorkflowError> {
        let student = self.find_by_id(id).await?;
        self.store.delete_student(student.id).await?;
        tracing::info!(student_id = %student.id, "deleted student");
        Ok(ActionResult::ok("Student deleted successfully"))
    }
}
