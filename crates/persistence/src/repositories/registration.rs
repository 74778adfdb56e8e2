//! Registration repository for database operations.

use chrono::NaiveDate;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::entities::{AttendanceEntity, RegistrationEntity};
use crate::metrics::QueryTimer;
use domain::models::{AttendanceEntry, Registration, RegistrationStatus};

const REGISTRATION_COLUMNS: &str = "id, course_id, first_name, last_name, email, phone, class, \
     ahv_number, birth_date, parent_name, parent_contact, comments, status, registered_at";

/// Fields for creating a registration.
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub course_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub class: String,
    pub ahv_number: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub parent_name: String,
    pub parent_contact: String,
    pub comments: Option<String>,
}

/// Error type for registration creation.
#[derive(Debug, thiserror::Error)]
pub enum CreateRegistrationError {
    #[error("Course not found")]
    CourseNotFound,

    #[error("Course is not active")]
    CourseInactive,

    #[error("Course is full")]
    CourseFull,

    #[error("Email is already registered for this course")]
    DuplicateEmail,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Repository for registration-related database operations.
#[derive(Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    /// Creates a new RegistrationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a registration, enforcing the course's activity flag and
    /// capacity.
    ///
    /// The course row is locked for the duration of the transaction, so
    /// the capacity count and the insert act as one atomic conditional
    /// write: two concurrent submissions for the last free place
    /// serialize on the row lock and the second one observes the first.
    pub async fn create(
        &self,
        new: &NewRegistration,
    ) -> Result<RegistrationEntity, CreateRegistrationError> {
        let timer = QueryTimer::new("create_registration");
        let mut tx = self.pool.begin().await?;

        let course: Option<(bool, i32)> = sqlx::query_as(
            "SELECT is_active, max_participants FROM courses WHERE id = $1 FOR UPDATE",
        )
        .bind(new.course_id)
        .fetch_optional(&mut *tx)
        .await?;

        let (is_active, max_participants) = match course {
            Some(row) => row,
            None => return Err(CreateRegistrationError::CourseNotFound),
        };

        if !is_active {
            return Err(CreateRegistrationError::CourseInactive);
        }

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM registrations WHERE course_id = $1")
                .bind(new.course_id)
                .fetch_one(&mut *tx)
                .await?;

        if count >= max_participants as i64 {
            return Err(CreateRegistrationError::CourseFull);
        }

        let entity = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            INSERT INTO registrations (course_id, first_name, last_name, email, phone, class,
                                       ahv_number, birth_date, parent_name, parent_contact, comments)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(new.course_id)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.class)
        .bind(&new.ahv_number)
        .bind(new.birth_date)
        .bind(&new.parent_name)
        .bind(&new.parent_contact)
        .bind(&new.comments)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                // Unique index on (course_id, email)
                if db_err.code().as_deref() == Some("23505") {
                    return CreateRegistrationError::DuplicateEmail;
                }
            }
            CreateRegistrationError::Database(e)
        })?;

        tx.commit().await?;
        timer.record();
        Ok(entity)
    }

    /// List registrations for a course ordered by registration date
    /// ascending, attendance logs included.
    pub async fn list_for_course(&self, course_id: Uuid) -> Result<Vec<Registration>, sqlx::Error> {
        let timer = QueryTimer::new("list_registrations_for_course");
        let entities = sqlx::query_as::<_, RegistrationEntity>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE course_id = $1 \
             ORDER BY registered_at ASC"
        ))
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = entities.iter().map(|e| e.id).collect();
        let mut attendance = self.attendance_by_registration(&ids).await?;
        timer.record();

        Ok(entities
            .into_iter()
            .map(|e| {
                let log = attendance.remove(&e.id).unwrap_or_default();
                e.into_domain(log)
            })
            .collect())
    }

    /// Find a registration by ID, attendance log included.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Registration>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration_by_id");
        let entity = sqlx::query_as::<_, RegistrationEntity>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let registration = match entity {
            Some(entity) => {
                let mut attendance = self.attendance_by_registration(&[entity.id]).await?;
                let log = attendance.remove(&entity.id).unwrap_or_default();
                Some(entity.into_domain(log))
            }
            None => None,
        };
        timer.record();
        Ok(registration)
    }

    /// Update a registration's status.
    ///
    /// Returns `Ok(None)` if no registration with the ID exists.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: RegistrationStatus,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_registration_status");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            "UPDATE registrations SET status = $2 WHERE id = $1 RETURNING {REGISTRATION_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Record attendance for a registration on a calendar date.
    ///
    /// Upserts into the attendance log: an existing entry for the date has
    /// its present flag and note replaced, otherwise a new entry is
    /// appended. Returns `Ok(None)` if no registration with the ID exists.
    pub async fn record_attendance(
        &self,
        registration_id: Uuid,
        date: NaiveDate,
        present: bool,
        note: Option<&str>,
    ) -> Result<Option<AttendanceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("record_attendance");

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM registrations WHERE id = $1)")
                .bind(registration_id)
                .fetch_one(&self.pool)
                .await?;

        if !exists {
            timer.record();
            return Ok(None);
        }

        let entity = sqlx::query_as::<_, AttendanceEntity>(
            r#"
            INSERT INTO attendance_entries (registration_id, date, present, note)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (registration_id, date)
            DO UPDATE SET present = EXCLUDED.present, note = EXCLUDED.note
            RETURNING id, registration_id, date, present, note
            "#,
        )
        .bind(registration_id)
        .bind(date)
        .bind(present)
        .bind(note)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(Some(entity))
    }

    /// Delete a registration. Returns false if no row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_registration");
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }

    /// Fetch attendance logs for a set of registrations, grouped by
    /// registration and ordered by date.
    async fn attendance_by_registration(
        &self,
        registration_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<AttendanceEntry>>, sqlx::Error> {
        if registration_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let entries = sqlx::query_as::<_, AttendanceEntity>(
            r#"
            SELECT id, registration_id, date, present, note
            FROM attendance_entries
            WHERE registration_id = ANY($1)
            ORDER BY date ASC
            "#,
        )
        .bind(registration_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<AttendanceEntry>> = HashMap::new();
        for entry in entries {
            grouped
                .entry(entry.registration_id)
                .or_default()
                .push(entry.into());
        }
        Ok(grouped)
    }
}
