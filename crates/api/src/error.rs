use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use persistence::repositories::{CreateRegistrationError, DeleteCourseError};

#[derive(Debug, Error)]
#[allow(dead_code)] // Some variants are only produced by middleware or From impls
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Registering against a course whose active flag is false.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Registering against a course whose capacity is reached.
    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            ApiError::InvalidState(msg) => (StatusCode::BAD_REQUEST, "invalid_state", msg.clone()),
            ApiError::CapacityExceeded(msg) => {
                (StatusCode::CONFLICT, "capacity_exceeded", msg.clone())
            }
            ApiError::Internal(msg) => {
                // Internal detail is logged server-side only, never sent to
                // the client.
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                )
            }
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => ApiError::Conflict("Resource already exists".into()),
                        "23503" => ApiError::NotFound("Referenced resource not found".into()),
                        _ => ApiError::Internal(format!("Database error: {}", db_err)),
                    }
                } else {
                    ApiError::Internal(format!("Database error: {}", db_err))
                }
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl From<CreateRegistrationError> for ApiError {
    fn from(err: CreateRegistrationError) -> Self {
        match err {
            CreateRegistrationError::CourseNotFound => {
                ApiError::NotFound("Course not found".into())
            }
            CreateRegistrationError::CourseInactive => {
                ApiError::InvalidState("Course is not active".into())
            }
            CreateRegistrationError::CourseFull => {
                ApiError::CapacityExceeded("Course is full".into())
            }
            CreateRegistrationError::DuplicateEmail => {
                ApiError::Conflict("Email is already registered for this course".into())
            }
            CreateRegistrationError::Database(db_err) => db_err.into(),
        }
    }
}

impl From<DeleteCourseError> for ApiError {
    fn from(err: DeleteCourseError) -> Self {
        match err {
            DeleteCourseError::HasRegistrations => {
                ApiError::Conflict("Course still has registrations".into())
            }
            DeleteCourseError::Database(db_err) => db_err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_api_error_status_codes() {
        let cases = [
            (
                ApiError::Unauthorized("no token".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::Forbidden("wrong role".into()),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::NotFound("course".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Conflict("duplicate".into()),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::Validation("bad field".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::InvalidState("inactive".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::CapacityExceeded("full".into()),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::Internal("db down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_from_sqlx_row_not_found() {
        let error: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(error, ApiError::NotFound(_)));
    }

    #[test]
    fn test_from_create_registration_error() {
        let error: ApiError = CreateRegistrationError::CourseFull.into();
        assert!(matches!(error, ApiError::CapacityExceeded(_)));

        let error: ApiError = CreateRegistrationError::CourseInactive.into();
        assert!(matches!(error, ApiError::InvalidState(_)));

        let error: ApiError = CreateRegistrationError::CourseNotFound.into();
        assert!(matches!(error, ApiError::NotFound(_)));

        let error: ApiError = CreateRegistrationError::DuplicateEmail.into();
        assert!(matches!(error, ApiError::Conflict(_)));
    }

    #[test]
    fn test_from_delete_course_error() {
        let error: ApiError = DeleteCourseError::HasRegistrations.into();
        assert!(matches!(error, ApiError::Conflict(_)));
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let response = ApiError::Internal("connection string leak".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
