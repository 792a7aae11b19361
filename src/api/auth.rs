use axum::{Extension, Json, extract::State, http::StatusCode};
use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::AppError,
    models::{
        app_state::AppState,
        user::{
            CredentialsRow, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
            SessionResponse, SessionRow,
        },
    },
    utils::password::{hash_password, validate_strength},
};

const JWT_EXPIRY_HOURS: i64 = 24;

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created and signed in", body = RegisterResponse),
        (status = 400, description = "Invalid email or weak password"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    // Validate input
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    validate_strength(&payload.password)?;

    // Check if the email is already taken
    let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(&state.db)
        .await?;

    if existing.is_some() {
        return Err(AppError::UserAlreadyExists);
    }

    // Hash password
    let password_hash = hash_password(&payload.password)?;

    // Insert the account with an incomplete profile; onboarding fills the rest
    let user_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO users (email, password_hash)
        VALUES ($1, $2)
        RETURNING id
        "#,
    )
    .bind(&payload.email)
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await?;

    // Sign the new account in right away
    let token = crate::utils::jwt::generate_token(user_id, &state.jwt_secret, JWT_EXPIRY_HOURS)?;

    tracing::info!("New account registered: {}", payload.email);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id,
            email: payload.email,
            access_token: token,
            token_type: "Bearer".to_string(),
            expires_in: JWT_EXPIRY_HOURS * 3600, // Convert to seconds
            message: "Registration successful! Complete your profile to start matching."
                .to_string(),
        }),
    ))
}

/// User login
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    // Validate input
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    // Find the account; unknown email and wrong password answer the same
    let user = sqlx::query_as::<_, CredentialsRow>(
        "SELECT id, password_hash FROM users WHERE email = $1",
    )
    .bind(&payload.email)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::InvalidCredentials)?;

    // Verify password
    let is_valid = crate::utils::password::verify_password(&payload.password, &user.password_hash)?;
    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    let token = crate::utils::jwt::generate_token(user.id, &state.jwt_secret, JWT_EXPIRY_HOURS)?;

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: JWT_EXPIRY_HOURS * 3600, // Convert to seconds
    }))
}

/// Current session
#[utoipa::path(
    get,
    path = "/api/v1/auth/session",
    responses(
        (status = 200, description = "Authenticated session", body = SessionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication",
    security(("bearer" = []))
)]
pub async fn session(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let row = sqlx::query_as::<_, SessionRow>(
        "SELECT email, profile_completed FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::UserNotFound)?;

    Ok(Json(SessionResponse {
        user_id,
        email: row.email,
        profile_completed: row.profile_completed,
    }))
}
