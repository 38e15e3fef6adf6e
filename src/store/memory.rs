use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use super::models::{
    Classroom, ClassroomWithRoster, Student, StudentClassroomSummary, Teacher,
};
use super::{EntityStore, StoreError};

/// In-memory entity store. Backs the test suite and local experimentation;
/// enrollment pairs are kept in insertion order so rosters read back the way
/// they were built.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    teachers: HashMap<Uuid, Teacher>,
    students: HashMap<Uuid, Student>,
    classrooms: HashMap<Uuid, Classroom>,
    enrollments: Vec<(Uuid, Uuid)>, // (classroom_id, student_id)
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means a test panicked mid-call; the data is
        // still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn find_teacher(&self, id: Uuid) -> Result<Option<Teacher>, StoreError> {
        Ok(self.inner().teachers.get(&id).cloned())
    }

    async fn find_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>, StoreError> {
        Ok(self
            .inner()
            .teachers
            .values()
            .find(|t| t.email == email)
            .cloned())
    }

    async fn insert_teacher(&self, teacher: Teacher) -> Result<Teacher, StoreError> {
        self.inner().teachers.insert(teacher.id, teacher.clone());
        Ok(teacher)
    }

    async fn save_teacher(&self, teacher: &Teacher) -> Result<(), StoreError> {
        self.inner().teachers.insert(teacher.id, teacher.clone());
        Ok(())
    }

    async fn delete_teacher(&self, id: Uuid) -> Result<(), StoreError> {
        self.inner().teachers.remove(&id);
        Ok(())
    }

    async fn count_classrooms_owned_by(&self, teacher_id: Uuid) -> Result<i64, StoreError> {
        let count = self
            .inner()
            .classrooms
            .values()
            .filter(|c| c.teacher_id == teacher_id)
            .count();
        Ok(count as i64)
    }

    async fn find_student(&self, id: Uuid) -> Result<Option<Student>, StoreError> {
        Ok(self.inner().students.get(&id).cloned())
    }

    async fn find_student_by_email(&self, email: &str) -> Result<Option<Student>, StoreError> {
        Ok(self
            .inner()
            .students
            .values()
            .find(|s| s.email == email)
            .cloned())
    }

    async fn insert_student(&self, student: Student) -> Result<Student, StoreError> {
        self.inner().students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn save_student(&self, student: &Student) -> Result<(), StoreError> {
        self.inner().students.insert(student.id, student.clone());
        Ok(())
    }

    async fn delete_student(&self, id: Uuid) -> Result<(), StoreError> {
        self.inner().students.remove(&id);
        Ok(())
    }

    async fn classrooms_of_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<StudentClassroomSummary>, StoreError> {
        let inner = self.inner();
        let mut summaries = Vec::new();
        for (classroom_id, enrolled) in &inner.enrollments {
            if *enrolled != student_id {
                continue;
            }
            let Some(classroom) = inner.classrooms.get(classroom_id) else {
                continue;
            };
            let Some(teacher) = inner.teachers.get(&classroom.teacher_id) else {
                continue;
            };
            summaries.push(StudentClassroomSummary {
                teacher_name: teacher.name.clone(),
                room_number: classroom.room_number.clone(),
            });
        }
        Ok(summaries)
    }

    async fn find_classroom(&self, id: Uuid) -> Result<Option<Classroom>, StoreError> {
        Ok(self.inner().classrooms.get(&id).cloned())
    }

    async fn find_classroom_by_room_number(
        &self,
        room_number: &str,
    ) -> Result<Option<Classroom>, StoreError> {
        Ok(self
            .inner()
            .classrooms
            .values()
            .find(|c| c.room_number == room_number)
            .cloned())
    }

    async fn find_classroom_with_roster(
        &self,
        id: Uuid,
    ) -> Result<Option<ClassroomWithRoster>, StoreError> {
        let inner = self.inner();
        let Some(classroom) = inner.classrooms.get(&id).cloned() else {
            return Ok(None);
        };
        let students = inner
            .enrollments
            .iter()
            .filter(|(classroom_id, _)| *classroom_id == id)
            .filter_map(|(_, student_id)| inner.students.get(student_id).cloned())
            .collect();
        Ok(Some(ClassroomWithRoster { classroom, students }))
    }

    async fn insert_classroom(&self, classroom: Classroom) -> Result<Classroom, StoreError> {
        self.inner()
            .classrooms
            .insert(classroom.id, classroom.clone());
        Ok(classroom)
    }

    async fn save_classroom(&self, classroom: &Classroom) -> Result<(), StoreError> {
        self.inner()
            .classrooms
            .insert(classroom.id, classroom.clone());
        Ok(())
    }

    async fn delete_classroom(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner();
        inner.classrooms.remove(&id);
        inner.enrollments.retain(|(classroom_id, _)| *classroom_id != id);
        Ok(())
    }

    async fn is_enrolled(&self, classroom_id: Uuid, student_id: Uuid) -> Result<bool, StoreError> {
        Ok(self
            .inner()
            .enrollments
            .contains(&(classroom_id, student_id)))
    }

    async fn enroll(&self, classroom_id: Uuid, student_id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner();
        if !inner.enrollments.contains(&(classroom_id, student_id)) {
            inner.enrollments.push((classroom_id, student_id));
        }
        Ok(())
    }

    async fn unenroll(&self, classroom_id: Uuid, student_id: Uuid) -> Result<(), StoreError> {
        self.inner()
            .enrollments
            .retain(|pair| *pair != (classroom_id, student_id));
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
