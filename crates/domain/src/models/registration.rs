//! Registration domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Review state of a registration. New submissions start as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for RegistrationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RegistrationStatus::Pending),
            "confirmed" => Ok(RegistrationStatus::Confirmed),
            "rejected" => Ok(RegistrationStatus::Rejected),
            _ => Err(format!("Invalid registration status: {}", s)),
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One line of a registration's attendance log.
///
/// At most one entry exists per calendar date; recording attendance for
/// a date that already has an entry replaces its present flag and note.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub date: NaiveDate,
    pub present: bool,
    pub note: Option<String>,
}

/// One participant's signup against a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: Uuid,
    pub course_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// School class of the participant, e.g. "5a".
    pub class: String,
    pub ahv_number: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub parent_name: String,
    pub parent_contact: String,
    pub comments: Option<String>,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
    pub attendance: Vec<AttendanceEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            RegistrationStatus::Pending,
            RegistrationStatus::Confirmed,
            RegistrationStatus::Rejected,
        ] {
            assert_eq!(
                RegistrationStatus::from_str(status.as_str()).unwrap(),
                status
            );
        }
    }

    #[test]
    fn test_status_rejects_unknown_values() {
        assert!(RegistrationStatus::from_str("approved").is_err());
        assert!(RegistrationStatus::from_str("PENDING").is_err());
        assert!(RegistrationStatus::from_str("").is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RegistrationStatus::Confirmed).unwrap(),
            "\"confirmed\""
        );
    }

    #[test]
    fn test_registration_serializes_camel_case() {
        let registration = Registration {
            id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            first_name: "Anna".to_string(),
            last_name: "Muster".to_string(),
            email: "anna@example.com".to_string(),
            phone: "079 123 45 67".to_string(),
            class: "5a".to_string(),
            ahv_number: Some("756.1234.5678.97".to_string()),
            birth_date: NaiveDate::from_ymd_opt(2014, 3, 1),
            parent_name: "Beat Muster".to_string(),
            parent_contact: "beat@example.com".to_string(),
            comments: None,
            status: RegistrationStatus::Pending,
            registered_at: Utc::now(),
            attendance: vec![],
        };

        let json = serde_json::to_value(registration).unwrap();
        assert!(json.get("courseId").is_some());
        assert!(json.get("firstName").is_some());
        assert!(json.get("registeredAt").is_some());
        assert_eq!(json["status"], "pending");
    }
}
