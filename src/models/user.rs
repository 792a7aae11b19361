use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Credential columns checked at login
#[derive(Debug, FromRow)]
pub struct CredentialsRow {
    pub id: Uuid,
    pub password_hash: String,
}

/// Session columns read for the authenticated account
#[derive(Debug, FromRow)]
pub struct SessionRow {
    pub email: String,
    pub profile_completed: bool,
}

/// Register a new account
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Valid email address
    #[validate(email)]
    #[schema(example = "jane@example.com")]
    pub email: String,

    /// Password: at least 6 characters with one uppercase letter, one
    /// lowercase letter, one number and one special character
    #[schema(example = "Secure1!")]
    pub password: String,
}

/// Successful registration response; registration signs the account in, so a
/// token is issued immediately
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    /// Unique account identifier
    pub user_id: Uuid,
    /// Email address
    pub email: String,
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiration time in seconds
    pub expires_in: i64,
    /// Success message
    pub message: String,
}

/// Login with email and password
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Registered email address
    #[validate(email)]
    #[schema(example = "jane@example.com")]
    pub email: String,

    /// Your password
    #[validate(length(min = 1))]
    #[schema(example = "Secure1!")]
    pub password: String,
}

/// Successful login response with JWT token
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiration time in seconds
    pub expires_in: i64,
}

/// Current session: account identity plus the completion flag that gates
/// onboarding and matching
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    /// Account identifier
    pub user_id: Uuid,
    /// Email address
    pub email: String,
    /// Whether onboarding has completed the profile
    pub profile_completed: bool,
}
