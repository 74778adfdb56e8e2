//! Course entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the courses table.
#[derive(Debug, Clone, FromRow)]
pub struct CourseEntity {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub day_of_week: String,
    pub time_start: String,
    pub time_end: String,
    pub target_classes: String,
    pub max_participants: i32,
    pub is_active: bool,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CourseEntity> for domain::models::Course {
    fn from(entity: CourseEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            instructor: entity.instructor,
            location: entity.location,
            start_date: entity.start_date,
            end_date: entity.end_date,
            day_of_week: entity.day_of_week,
            time_start: entity.time_start,
            time_end: entity.time_end,
            target_classes: entity.target_classes,
            max_participants: entity.max_participants,
            is_active: entity.is_active,
            status: entity.status,
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
