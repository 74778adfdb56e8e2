//! Course routes.
//!
//! Listing and fetching courses is public; creating and updating needs a
//! teacher or admin principal, deletion an admin. PUT replaces the whole
//! record, PATCH merges only the provided fields.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::{course, Course};
use persistence::repositories::{CourseChanges, CourseRepository, NewCourse};

/// Request body for creating a course or replacing one wholesale.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, message = "Instructor is required"))]
    pub instructor: String,

    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[validate(length(min = 1, message = "Day of week is required"))]
    pub day_of_week: String,

    #[validate(custom(function = "shared::validation::validate_time_of_day"))]
    pub time_start: String,

    #[validate(custom(function = "shared::validation::validate_time_of_day"))]
    pub time_end: String,

    #[validate(length(min = 1, message = "Target classes are required"))]
    pub target_classes: String,

    #[validate(range(min = 0, message = "Maximum participants must be non-negative"))]
    pub max_participants: i32,

    /// Defaults to true when absent.
    pub is_active: Option<bool>,

    /// Free-text status label; defaults to "Angebot findet statt".
    pub status: Option<String>,

    pub notes: Option<String>,
}

impl From<CourseRequest> for NewCourse {
    fn from(request: CourseRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            instructor: request.instructor,
            location: request.location,
            start_date: request.start_date,
            end_date: request.end_date,
            day_of_week: request.day_of_week,
            time_start: request.time_start,
            time_end: request.time_end,
            target_classes: request.target_classes,
            max_participants: request.max_participants,
            is_active: request.is_active.unwrap_or(true),
            status: request
                .status
                .unwrap_or_else(|| course::STATUS_RUNNING.to_string()),
            notes: request.notes,
        }
    }
}

/// Request body for a partial course update.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CoursePatchRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "Instructor cannot be empty"))]
    pub instructor: Option<String>,

    #[validate(length(min = 1, message = "Location cannot be empty"))]
    pub location: Option<String>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    #[validate(length(min = 1, message = "Day of week cannot be empty"))]
    pub day_of_week: Option<String>,

    #[validate(custom(function = "shared::validation::validate_time_of_day"))]
    pub time_start: Option<String>,

    #[validate(custom(function = "shared::validation::validate_time_of_day"))]
    pub time_end: Option<String>,

    #[validate(length(min = 1, message = "Target classes cannot be empty"))]
    pub target_classes: Option<String>,

    #[validate(range(min = 0, message = "Maximum participants must be non-negative"))]
    pub max_participants: Option<i32>,

    pub is_active: Option<bool>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl From<CoursePatchRequest> for CourseChanges {
    fn from(request: CoursePatchRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            instructor: request.instructor,
            location: request.location,
            start_date: request.start_date,
            end_date: request.end_date,
            day_of_week: request.day_of_week,
            time_start: request.time_start,
            time_end: request.time_end,
            target_classes: request.target_classes,
            max_participants: request.max_participants,
            is_active: request.is_active,
            status: request.status,
            notes: request.notes,
        }
    }
}

/// List all courses ordered by start date.
///
/// GET /api/courses
pub async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, ApiError> {
    let repo = CourseRepository::new(state.pool.clone());
    let courses = repo.list().await?;

    Ok(Json(courses.into_iter().map(Course::from).collect()))
}

/// Fetch a single course.
///
/// GET /api/courses/:id
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, ApiError> {
    let repo = CourseRepository::new(state.pool.clone());
    let course = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    Ok(Json(course.into()))
}

/// Create a new course.
///
/// POST /api/courses
pub async fn create_course(
    State(state): State<AppState>,
    Json(request): Json<CourseRequest>,
) -> Result<(StatusCode, Json<Course>), ApiError> {
    request.validate()?;

    let repo = CourseRepository::new(state.pool.clone());
    let course = repo.create(&request.into()).await?;

    Ok((StatusCode::CREATED, Json(course.into())))
}

/// Replace all fields of a course.
///
/// PUT /api/courses/:id
pub async fn replace_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CourseRequest>,
) -> Result<Json<Course>, ApiError> {
    request.validate()?;

    let repo = CourseRepository::new(state.pool.clone());
    let course = repo
        .replace(id, &request.into())
        .await?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    Ok(Json(course.into()))
}

/// Merge provided fields into a course.
///
/// PATCH /api/courses/:id
pub async fn patch_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CoursePatchRequest>,
) -> Result<Json<Course>, ApiError> {
    request.validate()?;

    let repo = CourseRepository::new(state.pool.clone());
    let course = repo
        .patch(id, &request.into())
        .await?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    Ok(Json(course.into()))
}

/// Delete a course.
///
/// DELETE /api/courses/:id
///
/// Fails with 409 while registrations still reference the course.
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let repo = CourseRepository::new(state.pool.clone());
    let deleted = repo.delete(id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    Ok(Json(json!({ "message": "Course removed" })))
}
