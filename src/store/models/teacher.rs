use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub registration: String,
    pub birth_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied teacher fields. All optional so that create can report
/// every missing required field and update can merge partially.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeacherDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub registration: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl Teacher {
    /// Apply a partial update, leaving absent fields untouched.
    pub fn merge(&mut self, draft: TeacherDraft) {
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
