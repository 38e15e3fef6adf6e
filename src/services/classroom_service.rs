use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::store::models::{Classroom, ClassroomDraft, ClassroomWithRoster, Student, Teacher};
use crate::store::EntityStore;

use super::{missing_fields_error, owns, parse_entity_id, ActionResult, WorkflowError};

/// Classroom lifecycle and the enrollment workflow. Every mutation is gated
/// on the acting teacher owning the classroom; roster changes additionally
/// enforce availability, duplicate-enrollment and capacity rules, checked in
/// a fixed order so each failure short-circuits with a distinct message.
///
/// All checks run before the single mutating store call, so a failed request
/// is never partially applied. Two concurrent adds against a classroom at
/// its capacity boundary can still both pass the capacity check; there is no
/// optimistic-concurrency control here.
#[derive(Clone)]
pub struct ClassroomService {
    store: Arc<dyn EntityStore>,
}

impl ClassroomService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, draft: ClassroomDraft) -> Result<Classroom, WorkflowError> {
        let mut missing = Vec::new();
        if draft.room_number.is_none() {
            missing.push("room_number");
        }
        if draft.capacity.is_none() {
            missing.push("capacity");
        }
        if draft.is_available.is_none() {
            missing.push("is_available");
        }
        if draft.teacher_id.is_none() {
            missing.push("teacher_id");
        }
        if !missing.is_empty() {
            return Err(missing_fields_error(&missing));
        }

        let (Some(room_number), Some(capacity), Some(is_available), Some(teacher_id)) = (
            draft.room_number,
            draft.capacity,
            draft.is_available,
            draft.teacher_id,
        ) else {
            return Err(missing_fields_error(&missing));
        };

        if capacity <= 0 {
            return Err(WorkflowError::bad_input("Capacity must be a positive integer"));
        }

        let teacher = self.load_teacher(&teacher_id).await?;

        if self
            .store
            .find_classroom_by_room_number(&room_number)
            .await?
            .is_some()
        {
            return Err(WorkflowError::unprocessable(
                "A classroom with this room number already exists",
            ));
        }

        let now = Utc::now();
        let classroom = Classroom {
            id: Uuid::new_v4(),
            room_number,
            capacity,
            is_available,
            teacher_id: teacher.id,
            created_at: now,
            updated_at: now,
        };

        let created = self.store.insert_classroom(classroom).await?;
        tracing::info!(classroom_id = %created.id, teacher_id = %teacher.id, "created classroom");
        Ok(created)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Classroom, WorkflowError> {
        let id = parse_entity_id(id, "Classroom")?;
        self.store
            .find_classroom(id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Classroom not found"))
    }

    pub async fn update(
        &self,
        id: &str,
        draft: ClassroomDraft,
        acting_teacher_id: &str,
    ) -> Result<Classroom, WorkflowError> {
        let mut classroom = self.find_by_id(id).await?;
        let teacher = self.load_teacher(acting_teacher_id).await?;

        if !owns(&classroom, &teacher) {
            return Err(WorkflowError::unauthorized(
                "Teacher cannot update a classroom they do not own",
            ));
        }

        // Re-check room-number uniqueness only when it actually changes.
        if let Some(room_number) = &draft.room_number {
            if *room_number != classroom.room_number
                && self
                    .store
                    .find_classroom_by_room_number(room_number)
                    .await?
                    .is_some()
            {
                return Err(WorkflowError::unprocessable(
                    "A classroom with this room number already exists",
                ));
            }
        }

        if let Some(capacity) = draft.capacity {
            if capacity <= 0 {
                return Err(WorkflowError::bad_input("Capacity must be a positive integer"));
            }
        }

        classroom.merge(draft);
        self.store.save_classroom(&classroom).await?;
        Ok(classroom)
    }

    /// Delete a classroom. Refused while students remain enrolled.
    pub async fn delete(
        &self,
        classroom_id: &str,
        acting_teacher_id: &str,
    ) -> Result<ActionResult, WorkflowError> {
        let loaded = self.load_classroom_with_roster(classroom_id).await?;
        let teacher = self.load_teacher(acting_teacher_id).await?;

        if !owns(&loaded.classroom, &teacher) {
            return Err(WorkflowError::unauthorized(
                "Teacher cannot remove students to a classroom they do not own",
            ));
        }

        if !loaded.students.is_empty() {
            return Err(WorkflowError::unprocessable(
                "Cannot delete classroom with allocated students. Please remove all students first.",
            ));
        }

        self.store.delete_classroom(loaded.classroom.id).await?;
        tracing::info!(classroom_id = %loaded.classroom.id, "deleted classroom");
        Ok(ActionResult::ok("Classroom deleted successfully"))
    }

    /// Current roster, visible only to the owning teacher.
    pub async fn get_students(
        &self,
        classroom_id: &str,
        acting_teacher_id: &str,
    ) -> Result<Vec<Student>, WorkflowError> {
        let loaded = self.load_classroom_with_roster(classroom_id).await?;
        let teacher = self.load_teacher(acting_teacher_id).await?;

        if !owns(&loaded.classroom, &teacher) {
            return Err(WorkflowError::unauthorized(
                "Teacher cannot remove students to a classroom they do not own",
            ));
        }

        Ok(loaded.students)
    }

    /// Enroll a student. Precondition order is normative: classroom, acting
    /// teacher, ownership, student, availability, duplicate, capacity.
    pub async fn add_student(
        &self,
        classroom_id: &str,
        student_id: &str,
        acting_teacher_id: &str,
    ) -> Result<ActionResult, WorkflowError> {
        let loaded = self.load_classroom_with_roster(classroom_id).await?;
        let teacher = self.load_teacher(acting_teacher_id).await?;

        if !owns(&loaded.classroom, &teacher) {
            return Err(WorkflowError::unauthorized(
                "Teacher cannot add students to a classroom they do not own",
            ));
        }

        let student = self.load_student(student_id).await?;

        if !loaded.classroom.is_available {
            return Err(WorkflowError::unprocessable(
                "Classroom is not available for student allocation",
            ));
        }

        if loaded.contains(student.id) {
            return Err(WorkflowError::unprocessable(
                "Student already allocated in this classroom",
            ));
        }

        if loaded.students.len() as i64 >= i64::from(loaded.classroom.capacity) {
            return Err(WorkflowError::unprocessable("Classroom is full"));
        }

        self.store.enroll(loaded.classroom.id, student.id).await?;
        tracing::info!(
            classroom_id = %loaded.classroom.id,
            student_id = %student.id,
            "enrolled student"
        );

        Ok(ActionResult::ok("Student added successfully to classroom"))
    }

    /// Remove a student from the roster. Succeeds only when the student is
    /// currently enrolled.
    pub async fn remove_student(
        &self,
        classroom_id: &str,
        student_id: &str,
        acting_teacher_id: &str,
    ) -> Result<ActionResult, WorkflowError> {
        let loaded = self.load_classroom_with_roster(classroom_id).await?;
        let teacher = self.load_teacher(acting_teacher_id).await?;

        if !owns(&loaded.classroom, &teacher) {
            return Err(WorkflowError::unauthorized(
                "Teacher cannot remove students to a classroom they do not own",
            ));
        }

        let student = self.load_student(student_id).await?;

        if !self
            .store
            .is_enrolled(loaded.classroom.id, student.id)
            .await?
        {
            return Err(WorkflowError::not_found(
                "Student does not exist in this classroom",
            ));
        }

        self.store.unenroll(loaded.classroom.id, student.id).await?;
        tracing::info!(
            classroom_id = %loaded.classroom.id,
            student_id = %student.id,
            "unenrolled student"
        );

        Ok(ActionResult::ok(
            "Student removed successfully from classroom",
        ))
    }

    async fn load_classroom_with_roster(
        &self,
        id: &str,
    ) -> Result<ClassroomWithRoster, WorkflowError> {
        let id = parse_entity_id(id, "Classroom")?;
        self.store
            .find_classroom_with_roster(id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Classroom not found"))
    }

    async fn load_teacher(&self, id: &str) -> Result<Teacher, WorkflowError> {
        let id = parse_entity_id(id, "Teacher")?;
        self.store
            .find_teacher(id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Teacher not found"))
    }

    async fn load_student(&self, id: &str) -> Result<Student, WorkflowError> {
        let id = parse_entity_id(id, "Student")?;
        self.store
            .find_student(id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Student not found"))
    }
}
