use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Student;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Classroom {
    pub id: Uuid,
    pub room_number: String,
    pub capacity: i32,
    pub is_available: bool,
    pub teacher_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied classroom fields. `teacher_id` arrives as a raw string so
/// that a malformed UUID can be reported as teacher-not-found rather than a
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassroomDraft {
    pub room_number: Option<String>,
    pub capacity: Option<i32>,
    pub is_available: Option<bool>,
    pub teacher_id: Option<String>,
}

impl Classroom {
    /// Partial merge. Ownership never changes through update; the original
    /// API allowlists only room_number, capacity and is_available.
    pub fn merge(&mut self, draft: ClassroomDraft) {
        if let Some(room_number) = draft.room_number {
            self.room_number = room_number;
        }
        if let Some(capacity) = draft.capacity {
            self.capacity = capacity;
        }
        if let Some(is_available) = draft.is_available {
            self.is_available = is_available;
        }
        self.updated_at = Utc::now();
    }
}

/// A classroom loaded together with its current roster, in enrollment order.
#[derive(Debug, Clone, Serialize)]
pub struct ClassroomWithRoster {
    pub classroom: Classroom,
    pub students: Vec<Student>,
}

impl ClassroomWithRoster {
    pub fn contains(&self, student_id: Uuid) -> bool {
        self.students.iter().any(|s| s.id == student_id)
    }
}
