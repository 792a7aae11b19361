use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sqlx::types::Json as Jsonb;
use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::AppError,
    models::{
        app_state::AppState,
        profile::ProfileRow,
        skill::{
            AddSkillRequest, DeleteSkillQuery, RemoveSkillResponse, Skill, SkillList,
            SkillResponse, UpdateSkillRequest,
        },
    },
};

/// Load the caller's skill lists; skill mutations require a completed profile
async fn load_skill_lists(
    state: &AppState,
    user_id: Uuid,
) -> Result<(Vec<Skill>, Vec<Skill>), AppError> {
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

    if !row.profile_completed {
        return Err(AppError::ProfileNotCompleted);
    }

    Ok((row.skills_offered.0, row.skills_wanted.0))
}

/// Write both lists back; the store contract is whole-array replacement
async fn store_skill_lists(
    state: &AppState,
    user_id: Uuid,
    offered: &[Skill],
    wanted: &[Skill],
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE users
        SET skills_offered = $1, skills_wanted = $2, updated_at = NOW()
        WHERE id = $3
        "#,
    )
    .bind(Jsonb(offered))
    .bind(Jsonb(wanted))
    .bind(user_id)
    .execute(&state.db)
    .await?;

    Ok(())
}

/// Add a skill
#[utoipa::path(
    post,
    path = "/api/v1/skills",
    request_body = AddSkillRequest,
    responses(
        (status = 201, description = "Skill added", body = SkillResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Profile not completed"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Skills",
    security(("bearer" = []))
)]
pub async fn add_skill(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(payload): Json<AddSkillRequest>,
) -> Result<(StatusCode, Json<SkillResponse>), AppError> {
    // Validate input
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let (mut offered, mut wanted) = load_skill_lists(&state, user_id).await?;

    // Level and progress fall back to the dialog defaults for the target list
    let skill = Skill {
        id: Uuid::new_v4(),
        name: payload.name,
        category: payload.category,
        level: payload
            .level
            .unwrap_or_else(|| payload.list.default_level()),
        progress: payload
            .progress
            .unwrap_or_else(|| payload.list.default_progress()),
    };

    match payload.list {
        SkillList::Offered => offered.push(skill.clone()),
        SkillList::Wanted => wanted.push(skill.clone()),
    }

    store_skill_lists(&state, user_id, &offered, &wanted).await?;

    Ok((
        StatusCode::CREATED,
        Json(SkillResponse {
            skill,
            message: "Skill added successfully!".to_string(),
        }),
    ))
}

/// Edit a skill in place
#[utoipa::path(
    put,
    path = "/api/v1/skills/{skill_id}",
    request_body = UpdateSkillRequest,
    params(
        ("skill_id" = Uuid, Path, description = "Skill entry identifier")
    ),
    responses(
        (status = 200, description = "Skill updated", body = SkillResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Profile not completed"),
        (status = 404, description = "Skill not found in the given list"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Skills",
    security(("bearer" = []))
)]
pub async fn update_skill(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(skill_id): Path<Uuid>,
    Json(payload): Json<UpdateSkillRequest>,
) -> Result<Json<SkillResponse>, AppError> {
    // Validate input
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let (mut offered, mut wanted) = load_skill_lists(&state, user_id).await?;

    let list = match payload.list {
        SkillList::Offered => &mut offered,
        SkillList::Wanted => &mut wanted,
    };

    // Replace the entry wholesale, keeping its id
    let entry = list
        .iter_mut()
        .find(|s| s.id == skill_id)
        .ok_or(AppError::SkillNotFound)?;
    *entry = Skill {
        id: skill_id,
        name: payload.name,
        category: payload.category,
        level: payload.level,
        progress: payload.progress,
    };
    let updated = entry.clone();

    store_skill_lists(&state, user_id, &offered, &wanted).await?;

    Ok(Json(SkillResponse {
        skill: updated,
        message: "Skill updated successfully!".to_string(),
    }))
}

/// Remove a skill
#[utoipa::path(
    delete,
    path = "/api/v1/skills/{skill_id}",
    params(
        ("skill_id" = Uuid, Path, description = "Skill entry identifier"),
        DeleteSkillQuery
    ),
    responses(
        (status = 200, description = "Skill removed", body = RemoveSkillResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Profile not completed"),
        (status = 404, description = "Skill not found in the given list"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Skills",
    security(("bearer" = []))
)]
pub async fn delete_skill(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(skill_id): Path<Uuid>,
    Query(query): Query<DeleteSkillQuery>,
) -> Result<Json<RemoveSkillResponse>, AppError> {
    let (mut offered, mut wanted) = load_skill_lists(&state, user_id).await?;

    let list = match query.list {
        SkillList::Offered => &mut offered,
        SkillList::Wanted => &mut wanted,
    };

    let before = list.len();
    list.retain(|s| s.id != skill_id);
    if list.len() == before {
        return Err(AppError::SkillNotFound);
    }

    store_skill_lists(&state, user_id, &offered, &wanted).await?;

    Ok(Json(RemoveSkillResponse {
        message: "Skill removed successfully!".to_string(),
    }))
}
