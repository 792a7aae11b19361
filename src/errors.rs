use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type
#[derive(Debug)]
pub enum AppError {
    // Database errors
    DatabaseError(sqlx::Error),

    // Authentication errors
    InvalidCredentials,
    InvalidToken,
    TokenExpired,
    Unauthorized,

    // Validation errors
    ValidationError(String),

    // Account errors
    UserAlreadyExists,
    UserNotFound,

    // Profile lifecycle errors
    ProfileNotCompleted,
    ProfileAlreadyCompleted,

    // Addressing errors
    SkillNotFound,
    SlotNotFound,
    OfferNotFound,

    // Internal errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::DatabaseError(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                )
            }
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            ),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired".to_string()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::UserAlreadyExists => (
                StatusCode::CONFLICT,
                "An account with this email already exists".to_string(),
            ),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            AppError::ProfileNotCompleted => (
                StatusCode::FORBIDDEN,
                "Complete your profile before using this feature".to_string(),
            ),
            AppError::ProfileAlreadyCompleted => (
                StatusCode::CONFLICT,
                "Profile already completed".to_string(),
            ),
            AppError::SkillNotFound => (StatusCode::NOT_FOUND, "Skill not found".to_string()),
            AppError::SlotNotFound => (
                StatusCode::NOT_FOUND,
                "Availability slot not found".to_string(),
            ),
            AppError::OfferNotFound => (StatusCode::NOT_FOUND, "Offer not found".to_string()),
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

// Implement From trait for automatic conversion
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::DatabaseError(e)
    }
}
