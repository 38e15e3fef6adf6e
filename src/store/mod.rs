pub mod memory;
pub mod models;
pub mod pg;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use models::{
    Classroom, ClassroomWithRoster, Student, StudentClassroomSummary, Teacher,
};

/// Errors from the persistence layer. Absence of a record is modeled as
/// `Ok(None)`, never as an error; these variants cover infrastructure
/// failures only and map to 500/503 at the HTTP boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence operations over teachers, students and classrooms, plus the
/// enrollment join table. The workflow services depend on this trait only,
/// so the business rules run identically over Postgres and the in-memory
/// store used in tests.
#[async_trait]
pub trait EntityStore: Send + Sync {
    // Teachers
    async fn find_teacher(&self, id: Uuid) -> Result<Option<Teacher>, StoreError>;
    async fn find_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>, StoreError>;
    async fn insert_teacher(&self, teacher: Teacher) -> Result<Teacher, StoreError>;
    async fn save_teacher(&self, teacher: &Teacher) -> Result<(), StoreError>;
    async fn delete_teacher(&self, id: Uuid) -> Result<(), StoreError>;
    async fn count_classrooms_owned_by(&self, teacher_id: Uuid) -> Result<i64, StoreError>;

    // Students
    async fn find_student(&self, id: Uuid) -> Result<Option<Student>, StoreError>;
    async fn find_student_by_email(&self, email: &str) -> Result<Option<Student>, StoreError>;
    async fn insert_student(&self, student: Student) -> Result<Student, StoreError>;
    async fn save_student(&self, student: &Student) -> Result<(), StoreError>;
    async fn delete_student(&self, id: Uuid) -> Result<(), StoreError>;

    /// Classrooms the student is enrolled in, with the owning teacher
    /// resolved (nested preload).
    async fn classrooms_of_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<StudentClassroomSummary>, StoreError>;

    // Classrooms
    async fn find_classroom(&self, id: Uuid) -> Result<Option<Classroom>, StoreError>;
    async fn find_classroom_by_room_number(
        &self,
        room_number: &str,
    ) -> Result<Option<Classroom>, StoreError>;
    async fn find_classroom_with_roster(
        &self,
        id: Uuid,
    ) -> Result<Option<ClassroomWithRoster>, StoreError>;
    async fn insert_classroom(&self, classroom: Classroom) -> Result<Classroom, StoreError>;
    async fn save_classroom(&self, classroom: &Classroom) -> Result<(), StoreError>;
    async fn delete_classroom(&self, id: Uuid) -> Result<(), StoreError>;

    // Enrollment join table
    async fn is_enrolled(&self, classroom_id: Uuid, student_id: Uuid) -> Result<bool, StoreError>;
    async fn enroll(&self, classroom_id: Uuid, student_id: Uuid) -> Result<(), StoreError>;
    async fn unenroll(&self, classroom_id: Uuid, student_id: Uuid) -> Result<(), StoreError>;

    /// Connectivity probe for the health endpoint.
    async fn health_check(&self) -> Result<(), StoreError>;
}
