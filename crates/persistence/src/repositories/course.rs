//! Course repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::CourseEntity;
use crate::metrics::QueryTimer;

const COURSE_COLUMNS: &str = "id, title, description, instructor, location, start_date, end_date, \
     day_of_week, time_start, time_end, target_classes, max_participants, \
     is_active, status, notes, created_at, updated_at";

/// Fields for creating a course or replacing one wholesale.
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub location: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub day_of_week: String,
    pub time_start: String,
    pub time_end: String,
    pub target_classes: String,
    pub max_participants: i32,
    pub is_active: bool,
    pub status: String,
    pub notes: Option<String>,
}

/// Partial course update; only set fields are written.
#[derive(Debug, Clone, Default)]
pub struct CourseChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructor: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub day_of_week: Option<String>,
    pub time_start: Option<String>,
    pub time_end: Option<String>,
    pub target_classes: Option<String>,
    pub max_participants: Option<i32>,
    pub is_active: Option<bool>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Error type for course deletion.
#[derive(Debug, thiserror::Error)]
pub enum DeleteCourseError {
    /// Registrations still reference the course (restrict policy).
    #[error("Course still has registrations")]
    HasRegistrations,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Repository for course-related database operations.
#[derive(Clone)]
pub struct CourseRepository {
    pool: PgPool,
}

impl CourseRepository {
    /// Creates a new CourseRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all courses ordered by start date ascending.
    pub async fn list(&self) -> Result<Vec<CourseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_courses");
        let result = sqlx::query_as::<_, CourseEntity>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses ORDER BY start_date ASC"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a course by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CourseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_course_by_id");
        let result = sqlx::query_as::<_, CourseEntity>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a new course.
    pub async fn create(&self, course: &NewCourse) -> Result<CourseEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_course");
        let result = sqlx::query_as::<_, CourseEntity>(&format!(
            r#"
            INSERT INTO courses (title, description, instructor, location, start_date, end_date,
                                 day_of_week, time_start, time_end, target_classes,
                                 max_participants, is_active, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {COURSE_COLUMNS}
            "#
        ))
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.instructor)
        .bind(&course.location)
        .bind(course.start_date)
        .bind(course.end_date)
        .bind(&course.day_of_week)
        .bind(&course.time_start)
        .bind(&course.time_end)
        .bind(&course.target_classes)
        .bind(course.max_participants)
        .bind(course.is_active)
        .bind(&course.status)
        .bind(&course.notes)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Replace all fields of an existing course.
    pub async fn replace(
        &self,
        id: Uuid,
        course: &NewCourse,
    ) -> Result<Option<CourseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("replace_course");
        let result = sqlx::query_as::<_, CourseEntity>(&format!(
            r#"
            UPDATE courses
            SET title = $2, description = $3, instructor = $4, location = $5,
                start_date = $6, end_date = $7, day_of_week = $8, time_start = $9,
                time_end = $10, target_classes = $11, max_participants = $12,
                is_active = $13, status = $14, notes = $15, updated_at = NOW()
            WHERE id = $1
            RETURNING {COURSE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.instructor)
        .bind(&course.location)
        .bind(course.start_date)
        .bind(course.end_date)
        .bind(&course.day_of_week)
        .bind(&course.time_start)
        .bind(&course.time_end)
        .bind(&course.target_classes)
        .bind(course.max_participants)
        .bind(course.is_active)
        .bind(&course.status)
        .bind(&course.notes)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Merge the set fields of `changes` into an existing course.
    pub async fn patch(
        &self,
        id: Uuid,
        changes: &CourseChanges,
    ) -> Result<Option<CourseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("patch_course");
        let result = sqlx::query_as::<_, CourseEntity>(&format!(
            r#"
            UPDATE courses
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                instructor = COALESCE($4, instructor),
                location = COALESCE($5, location),
                start_date = COALESCE($6, start_date),
                end_date = COALESCE($7, end_date),
                day_of_week = COALESCE($8, day_of_week),
                time_start = COALESCE($9, time_start),
                time_end = COALESCE($10, time_end),
                target_classes = COALESCE($11, target_classes),
                max_participants = COALESCE($12, max_participants),
                is_active = COALESCE($13, is_active),
                status = COALESCE($14, status),
                notes = COALESCE($15, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COURSE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.instructor)
        .bind(&changes.location)
        .bind(changes.start_date)
        .bind(changes.end_date)
        .bind(&changes.day_of_week)
        .bind(&changes.time_start)
        .bind(&changes.time_end)
        .bind(&changes.target_classes)
        .bind(changes.max_participants)
        .bind(changes.is_active)
        .bind(&changes.status)
        .bind(&changes.notes)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a course.
    ///
    /// Returns `Ok(false)` if no course with the ID exists. Fails with
    /// `HasRegistrations` while registrations still reference the course
    /// (restrict policy), so registration lists are never orphaned.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DeleteCourseError> {
        let timer = QueryTimer::new("delete_course");
        let mut tx = self.pool.begin().await?;

        let has_registrations: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM registrations WHERE course_id = $1)",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if has_registrations {
            timer.record();
            return Err(DeleteCourseError::HasRegistrations);
        }

        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    // CourseRepository queries require a database connection and are
    // covered by the integration tests in crates/api/tests.
}
