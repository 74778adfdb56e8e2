//! Course domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status label shown for a course that takes place.
pub const STATUS_RUNNING: &str = "Angebot findet statt";

/// Status label shown for a cancelled course.
pub const STATUS_CANCELLED: &str = "Angebot findet nicht statt";

/// An offered activity session with a fixed schedule and capacity.
///
/// The `status` field is a free-text label ("Angebot findet statt",
/// "Spätanmeldung offen bis ..." and similar); the `is_active` flag is
/// what gates new registrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Free text, may name several people ("Hubert Anderhub, Nicole Egli").
    pub instructor: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub day_of_week: String,
    /// Time of day in HH:MM form.
    pub time_start: String,
    pub time_end: String,
    /// Addressed class range, e.g. "4.-9. Klasse".
    pub target_classes: String,
    pub max_participants: i32,
    pub is_active: bool,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_course() -> Course {
        Course {
            id: Uuid::new_v4(),
            title: "TENNIS".to_string(),
            description: "Tenniskurs für Einsteiger".to_string(),
            instructor: "Hubert Anderhub, Nicole Egli".to_string(),
            location: "Tennisplatz Muri".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 2, 12).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 25).unwrap(),
            day_of_week: "Mittwoch".to_string(),
            time_start: "13:00".to_string(),
            time_end: "14:00".to_string(),
            target_classes: "4.-9. Klasse".to_string(),
            max_participants: 48,
            is_active: true,
            status: STATUS_RUNNING.to_string(),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_course_serializes_camel_case() {
        let json = serde_json::to_value(sample_course()).unwrap();
        assert!(json.get("maxParticipants").is_some());
        assert!(json.get("startDate").is_some());
        assert!(json.get("isActive").is_some());
        assert!(json.get("max_participants").is_none());
    }

    #[test]
    fn test_course_dates_serialize_iso() {
        let json = serde_json::to_value(sample_course()).unwrap();
        assert_eq!(json["startDate"], "2025-02-12");
    }
}
