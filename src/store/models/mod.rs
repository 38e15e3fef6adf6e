pub mod classroom;
pub mod student;
pub mod teacher;

pub use classroom::{Classroom, ClassroomDraft, ClassroomWithRoster};
pub use student::{Student, StudentClassroomSummary, StudentClassrooms, StudentDraft};
pub use teacher::{Teacher, TeacherDraft};
