//! Registration and attendance entities (database row mappings).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use domain::models::RegistrationStatus;

/// Database row mapping for the registrations table.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationEntity {
    pub id: Uuid,
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
    pub status: String,
    pub registered_at: DateTime<Utc>,
}

impl RegistrationEntity {
    /// Converts into the domain model with the given attendance log.
    pub fn into_domain(
        self,
        attendance: Vec<domain::models::AttendanceEntry>,
    ) -> domain::models::Registration {
        domain::models::Registration {
            id: self.id,
            course_id: self.course_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            class: self.class,
            ahv_number: self.ahv_number,
            birth_date: self.birth_date,
            parent_name: self.parent_name,
            parent_contact: self.parent_contact,
            comments: self.comments,
            // The column has a CHECK constraint matching the enum
            status: RegistrationStatus::from_str(&self.status)
                .unwrap_or(RegistrationStatus::Pending),
            registered_at: self.registered_at,
            attendance,
        }
    }
}

impl From<RegistrationEntity> for domain::models::Registration {
    fn from(entity: RegistrationEntity) -> Self {
        entity.into_domain(Vec::new())
    }
}

/// Database row mapping for the attendance_entries table.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceEntity {
    pub id: Uuid,
    pub registration_id: Uuid,
    pub date: NaiveDate,
    pub present: bool,
    pub note: Option<String>,
}

impl From<AttendanceEntity> for domain::models::AttendanceEntry {
    fn from(entity: AttendanceEntity) -> Self {
        Self {
            date: entity.date,
            present: entity.present,
            note: entity.note,
        }
    }
}
