use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub registration: String,
    pub birth_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied student fields, used for both create and partial update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub registration: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl Student {
    pub fn merge(&mut self, draft: StudentDraft) {
        if let Some(name) = draft.name {
            self.name = name;
        }
        if let Some(email) = draft.email {
            self.email = email;
        }
        if let Some(registration) = draft.registration {
            self.registration = registration;
        }
        if let Some(birth_date) = draft.birth_date {
            self.birth_date = birth_date;
        }
        self.updated_at = Utc::now();
    }
}

/// One classroom a student is enrolled in, with the owning teacher resolved.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentClassroomSummary {
    pub teacher_name: String,
    pub room_number: String,
}

/// Response shape for `GET /students/:id/classrooms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentClassrooms {
    pub student_name: String,
    pub classrooms: Vec<StudentClassroomSummary>,
}
