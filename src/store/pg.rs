use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::config;

use super::models::{
    Classroom, ClassroomWithRoster, Student, StudentClassroomSummary, Teacher,
};
use super::{EntityStore, StoreError};

/// Postgres-backed entity store. Queries are runtime-checked; the schema
/// lives in `migrations/` and is applied on connect.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect using `DATABASE_URL` and run pending migrations.
    pub async fn connect() -> Result<Self, StoreError> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| StoreError::ConfigMissing("DATABASE_URL"))?;

        let cfg = config();
        let pool = PgPoolOptions::new()
            .max_connections(cfg.database.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(cfg.database.connection_timeout))
            .connect(&url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::MigrationError(e.to_string()))?;

        tracing::info!("Connected to Postgres and applied migrations");

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl EntityStore for PgStore {
    async fn find_teacher(&self, id: Uuid) -> Result<Option<Teacher>, StoreError> {
        let teacher = sqlx::query_as::<_, Teacher>("SELECT * FROM teachers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(teacher)
    }

    async fn find_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>, StoreError> {
        let teacher = sqlx::query_as::<_, Teacher>("SELECT * FROM teachers WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(teacher)
    }

    async fn insert_teacher(&self, teacher: Teacher) -> Result<Teacher, StoreError> {
        let inserted = sqlx::query_as::<_, Teacher>(
            r#"
            INSERT INTO teachers (id, name, email, registration, birth_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(teacher.id)
        .bind(&teacher.name)
        .bind(&teacher.email)
        .bind(&teacher.registration)
        .bind(teacher.birth_date)
        .bind(teacher.created_at)
        .bind(teacher.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(inserted)
    }

    async fn save_teacher(&self, teacher: &Teacher) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE teachers
            SET name = $2, email = $3, registration = $4, birth_date = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(teacher.id)
        .bind(&teacher.name)
        .bind(&teacher.email)
        .bind(&teacher.registration)
        .bind(teacher.birth_date)
        .bind(teacher.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_teacher(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count_classrooms_owned_by(&self, teacher_id: Uuid) -> Result<i64, StoreError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM classrooms WHERE teacher_id = $1")
                .bind(teacher_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn find_student(&self, id: Uuid) -> Result<Option<Student>, StoreError> {
        let student = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(student)
    }

    async fn find_student_by_email(&self, email: &str) -> Result<Option<Student>, StoreError> {
        let student = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(student)
    }

    async fn insert_student(&self, student: Student) -> Result<Student, StoreError> {
        let inserted = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (id, name, email, registration, birth_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(student.id)
        .bind(&student.name)
        .bind(&student.email)
        .bind(&student.registration)
        .bind(student.birth_date)
        .bind(student.created_at)
        .bind(student.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(inserted)
    }

    async fn save_student(&self, student: &Student) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE students
            SET name = $2, email = $3, registration = $4, birth_date = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(student.id)
        .bind(&student.name)
        .bind(&student.email)
        .bind(&student.registration)
        .bind(student.birth_date)
        .bind(student.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_student(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn classrooms_of_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<StudentClassroomSummary>, StoreError> {
        let rows = sqlx::query_as::<_, StudentClassroomSummary>(
            r#"
            SELECT t.name AS teacher_name, c.room_number
            FROM classroom_student cs
            JOIN classrooms c ON c.id = cs.classroom_id
            JOIN teachers t ON t.id = c.teacher_id
            WHERE cs.student_id = $1
            ORDER BY c.room_number
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_classroom(&self, id: Uuid) -> Result<Option<Classroom>, StoreError> {
        let classroom = sqlx::query_as::<_, Classroom>("SELECT * FROM classrooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(classroom)
    }

    async fn find_classroom_by_room_number(
        &self,
        room_number: &str,
    ) -> Result<Option<Classroom>, StoreError> {
        let classroom =
            sqlx::query_as::<_, Classroom>("SELECT * FROM classrooms WHERE room_number = $1")
                .bind(room_number)
                .fetch_optional(&self.pool)
                .await?;
        Ok(classroom)
    }

    async fn find_classroom_with_roster(
        &self,
        id: Uuid,
    ) -> Result<Option<ClassroomWithRoster>, StoreError> {
        let Some(classroom) = self.find_classroom(id).await? else {
            return Ok(None);
        };

        let students = sqlx::query_as::<_, Student>(
            r#"
            SELECT s.*
            FROM classroom_student cs
            JOIN students s ON s.id = cs.student_id
            WHERE cs.classroom_id = $1
            ORDER BY s.created_at
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(ClassroomWithRoster { classroom, students }))
    }

    async fn insert_classroom(&self, classroom: Classroom) -> Result<Classroom, StoreError> {
        let inserted = sqlx::query_as::<_, Classroom>(
            r#"
            INSERT INTO classrooms (id, room_number, capacity, is_available, teacher_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(classroom.id)
        .bind(&classroom.room_number)
        .bind(classroom.capacity)
        .bind(classroom.is_available)
        .bind(classroom.teacher_id)
        .bind(classroom.created_at)
        .bind(classroom.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(inserted)
    }

    async fn save_classroom(&self, classroom: &Classroom) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE classrooms
            SET room_number = $2, capacity = $3, is_available = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(classroom.id)
        .bind(&classroom.room_number)
        .bind(classroom.capacity)
        .bind(classroom.is_available)
        .bind(classroom.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_classroom(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM classrooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn is_enrolled(&self, classroom_id: Uuid, student_id: Uuid) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM classroom_student WHERE classroom_id = $1 AND student_id = $2)",
        )
        .bind(classroom_id)
        .bind(student_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn enroll(&self, classroom_id: Uuid, student_id: Uuid) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO classroom_student (classroom_id, student_id) VALUES ($1, $2)")
            .bind(classroom_id)
            .bind(student_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn unenroll(&self, classroom_id: Uuid, student_id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM classroom_student WHERE classroom_id = $1 AND student_id = $2")
            .bind(classroom_id)
            .bind(student_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
