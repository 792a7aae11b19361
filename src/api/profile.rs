use axum::{Extension, Json, extract::State};
use sqlx::types::Json as Jsonb;
use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::AppError,
    models::{
        app_state::AppState,
        profile::{CompleteProfileRequest, Profile, ProfileResponse, ProfileRow},
        skill::{Skill, SkillList},
    },
};

/// Get current user's profile
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "User profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Profile not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Profile",
    security(("bearer" = []))
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<ProfileResponse>, AppError> {
    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        SELECT id, name, age, location, skills_offered, skills_wanted, profile_completed
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::UserNotFound)?;

    Ok(Json(ProfileResponse {
        profile: row.into(),
    }))
}

/// Complete onboarding
#[utoipa::path(
    put,
    path = "/api/v1/profile/onboarding",
    request_body = CompleteProfileRequest,
    responses(
        (status = 200, description = "Profile completed", body = ProfileResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Profile already completed"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Profile",
    security(("bearer" = []))
)]
pub async fn complete_onboarding(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(payload): Json<CompleteProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    // Validate input
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    // Onboarding runs once; the profile stays as completed afterwards
    let completed: bool = sqlx::query_scalar("SELECT profile_completed FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::UserNotFound)?;

    if completed {
        return Err(AppError::ProfileAlreadyCompleted);
    }

    // The first offered skill starts mastered, the first wanted one untouched
    let offered = Skill {
        id: Uuid::new_v4(),
        name: payload.offered_skill.name,
        category: payload.offered_skill.category,
        level: payload
            .offered_skill
            .level
            .unwrap_or_else(|| SkillList::Offered.default_level()),
        progress: SkillList::Offered.default_progress(),
    };
    let wanted = Skill {
        id: Uuid::new_v4(),
        name: payload.wanted_skill.name,
        category: payload.wanted_skill.category,
        level: payload
            .wanted_skill
            .level
            .unwrap_or_else(|| SkillList::Wanted.default_level()),
        progress: SkillList::Wanted.default_progress(),
    };

    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        UPDATE users
        SET
            name = $1,
            age = $2,
            location = $3,
            skills_offered = $4,
            skills_wanted = $5,
            profile_completed = true,
            updated_at = NOW()
        WHERE id = $6
        RETURNING id, name, age, location, skills_offered, skills_wanted, profile_completed
        "#,
    )
    .bind(&payload.name)
    .bind(payload.age)
    .bind(&payload.location)
    .bind(Jsonb(vec![offered]))
    .bind(Jsonb(vec![wanted]))
    .bind(user_id)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Profile completed for user {}", user_id);

    let profile: Profile = row.into();
    Ok(Json(ProfileResponse { profile }))
}
