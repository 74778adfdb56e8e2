//! Registration routes.
//!
//! Submitting a registration is public and unauthenticated; everything
//! else on this surface is for teachers and admins.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use domain::export;
use domain::models::{AttendanceEntry, Registration, RegistrationStatus};
use persistence::repositories::{CourseRepository, NewRegistration, RegistrationRepository};

/// Request body for submitting a registration.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub course_id: Uuid,

    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,

    #[validate(length(min = 1, message = "Class is required"))]
    pub class: String,

    #[validate(custom(function = "shared::validation::validate_ahv_number"))]
    pub ahv_number: Option<String>,

    pub birth_date: Option<NaiveDate>,

    #[validate(length(min = 1, message = "Parent name is required"))]
    pub parent_name: String,

    #[validate(length(min = 1, message = "Parent contact is required"))]
    pub parent_contact: String,

    pub comments: Option<String>,
}

impl From<RegistrationRequest> for NewRegistration {
    fn from(request: RegistrationRequest) -> Self {
        Self {
            course_id: request.course_id,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            class: request.class,
            ahv_number: request.ahv_number,
            birth_date: request.birth_date,
            parent_name: request.parent_name,
            parent_contact: request.parent_contact,
            comments: request.comments,
        }
    }
}

/// Request body for updating a registration's status.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

/// Request body for recording attendance.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRequest {
    pub date: NaiveDate,
    pub present: bool,
    pub note: Option<String>,
}

/// Submit a registration for a course.
///
/// POST /api/registrations
///
/// The course must exist, be active, and have a free place; the capacity
/// check and insert happen in one atomic store operation.
pub async fn create_registration(
    State(state): State<AppState>,
    Json(request): Json<RegistrationRequest>,
) -> Result<(StatusCode, Json<Registration>), ApiError> {
    request.validate()?;

    let repo = RegistrationRepository::new(state.pool.clone());
    let registration = repo.create(&request.into()).await?;

    Ok((StatusCode::CREATED, Json(registration.into())))
}

/// List registrations for a course, oldest first.
///
/// GET /api/registrations/course/:course_id
pub async fn list_for_course(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<Vec<Registration>>, ApiError> {
    let courses = CourseRepository::new(state.pool.clone());
    if courses.find_by_id(course_id).await?.is_none() {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    let repo = RegistrationRepository::new(state.pool.clone());
    let registrations = repo.list_for_course(course_id).await?;

    Ok(Json(registrations))
}

/// Export a course's registrations as CSV.
///
/// GET /api/registrations/course/:course_id/export
pub async fn export_for_course(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let courses = CourseRepository::new(state.pool.clone());
    let course = courses
        .find_by_id(course_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    let repo = RegistrationRepository::new(state.pool.clone());
    let registrations = repo.list_for_course(course_id).await?;

    let csv = export::registrations_to_csv(&registrations);
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export::csv_file_name(&course.title)
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

/// Update a registration's status.
///
/// PATCH /api/registrations/:id
///
/// The status must be one of pending, confirmed, rejected; anything else
/// is rejected without touching the stored value.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<Registration>, ApiError> {
    let status: RegistrationStatus = request
        .status
        .parse()
        .map_err(|e: String| ApiError::Validation(e))?;

    let repo = RegistrationRepository::new(state.pool.clone());
    let registration = repo
        .update_status(id, status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Registration not found".to_string()))?;

    Ok(Json(registration.into()))
}

/// Record attendance for a registration on one date.
///
/// POST /api/registrations/:id/attendance
///
/// Upserts into the attendance log: a second call for the same date
/// replaces the entry's present flag and note.
pub async fn record_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AttendanceRequest>,
) -> Result<Json<AttendanceEntry>, ApiError> {
    let repo = RegistrationRepository::new(state.pool.clone());
    let entry = repo
        .record_attendance(id, request.date, request.present, request.note.as_deref())
        .await?
        .ok_or_else(|| ApiError::NotFound("Registration not found".to_string()))?;

    Ok(Json(entry.into()))
}

/// Delete a registration.
///
/// DELETE /api/registrations/:id
pub async fn delete_registration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let repo = RegistrationRepository::new(state.pool.clone());
    let deleted = repo.delete(id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Registration not found".to_string()));
    }

    Ok(Json(json!({ "message": "Registration removed" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RegistrationRequest {
        RegistrationRequest {
            course_id: Uuid::new_v4(),
            first_name: "Anna".to_string(),
            last_name: "Muster".to_string(),
            email: "anna@example.com".to_string(),
            phone: "079 123 45 67".to_string(),
            class: "5a".to_string(),
            ahv_number: None,
            birth_date: None,
            parent_name: "Beat Muster".to_string(),
            parent_contact: "beat@example.com".to_string(),
            comments: None,
        }
    }

    #[test]
    fn test_registration_request_valid() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_registration_request_rejects_bad_email() {
        let mut request = valid_request();
        request.email = "not-an-email".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_registration_request_rejects_bad_ahv_number() {
        let mut request = valid_request();
        request.ahv_number = Some("123".to_string());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_registration_request_accepts_valid_ahv_number() {
        let mut request = valid_request();
        request.ahv_number = Some("756.1234.5678.97".to_string());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_registration_request_rejects_missing_parent() {
        let mut request = valid_request();
        request.parent_name = String::new();
        assert!(request.validate().is_err());
    }
}
