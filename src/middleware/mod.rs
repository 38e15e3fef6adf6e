pub mod validate_teacher_id;

pub use validate_teacher_id::{require_teacher_header, ActingTeacherId};
