use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::AppError,
    matching::popular_offered_skills,
    models::{
        app_state::AppState,
        offer::{
            CreateOfferRequest, ListOffersResponse, OfferActionResponse, OfferResponse,
            OfferStatus, TutorOffer,
        },
        profile::{Profile, ProfileRow},
    },
};

const SUGGESTED_SKILLS_LIMIT: usize = 5;

/// List offers addressed to the caller
#[utoipa::path(
    get,
    path = "/api/v1/offers",
    responses(
        (status = 200, description = "Pending and accepted offers with skill suggestions", body = ListOffersResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Offers",
    security(("bearer" = []))
)]
pub async fn list_offers(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<ListOffersResponse>, AppError> {
    // Declined offers stay stored but never resurface
    let offers = sqlx::query_as::<_, TutorOffer>(
        r#"
        SELECT id, user_id, tutor_id, tutor_name, skill_offered, price, message, status, created_at
        FROM tutor_offers
        WHERE user_id = $1 AND status <> 'rejected'
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;

    // Suggestions come from what the rest of the roster offers most
    let roster: Vec<Profile> = sqlx::query_as::<_, ProfileRow>(
        r#"
        SELECT id, name, age, location, skills_offered, skills_wanted, profile_completed
        FROM users
        "#,
    )
    .fetch_all(&state.db)
    .await?
    .into_iter()
    .map(Profile::from)
    .collect();

    let suggested_skills = popular_offered_skills(user_id, &roster, SUGGESTED_SKILLS_LIMIT);

    Ok(Json(ListOffersResponse {
        count: offers.len(),
        offers,
        suggested_skills,
    }))
}

/// Send a tutor offer
#[utoipa::path(
    post,
    path = "/api/v1/offers",
    request_body = CreateOfferRequest,
    responses(
        (status = 201, description = "Offer sent", body = OfferResponse),
        (status = 400, description = "Invalid offer"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Profile not completed"),
        (status = 404, description = "Recipient not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Offers",
    security(("bearer" = []))
)]
pub async fn create_offer(
    State(state): State<AppState>,
    Extension(tutor_id): Extension<Uuid>,
    Json(payload): Json<CreateOfferRequest>,
) -> Result<(StatusCode, Json<OfferResponse>), AppError> {
    // Validate input
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    if payload.user_id == tutor_id {
        return Err(AppError::ValidationError(
            "You cannot send an offer to yourself".to_string(),
        ));
    }

    // The offer carries the tutor's display name, so the profile must be done
    let tutor: (Option<String>, bool) =
        sqlx::query_as("SELECT name, profile_completed FROM users WHERE id = $1")
            .bind(tutor_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or(AppError::UserNotFound)?;

    let tutor_name = match tutor {
        (Some(name), true) => name,
        _ => return Err(AppError::ProfileNotCompleted),
    };

    // Check the recipient exists
    let recipient: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1")
        .bind(payload.user_id)
        .fetch_optional(&state.db)
        .await?;

    if recipient.is_none() {
        return Err(AppError::UserNotFound);
    }

    let offer = sqlx::query_as::<_, TutorOffer>(
        r#"
        INSERT INTO tutor_offers (user_id, tutor_id, tutor_name, skill_offered, price, message)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, user_id, tutor_id, tutor_name, skill_offered, price, message, status, created_at
        "#,
    )
    .bind(payload.user_id)
    .bind(tutor_id)
    .bind(&tutor_name)
    .bind(&payload.skill_offered)
    .bind(payload.price)
    .bind(&payload.message)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Offer {} sent to user {}", offer.id, offer.user_id);

    Ok((
        StatusCode::CREATED,
        Json(OfferResponse {
            offer,
            message: "Offer sent successfully!".to_string(),
        }),
    ))
}

/// Accept an offer
#[utoipa::path(
    post,
    path = "/api/v1/offers/{offer_id}/accept",
    params(
        ("offer_id" = Uuid, Path, description = "Offer identifier")
    ),
    responses(
        (status = 200, description = "Offer accepted", body = OfferActionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Offer not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Offers",
    security(("bearer" = []))
)]
pub async fn accept_offer(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(offer_id): Path<Uuid>,
) -> Result<Json<OfferActionResponse>, AppError> {
    set_offer_status(&state, offer_id, user_id, OfferStatus::Accepted).await?;

    Ok(Json(OfferActionResponse {
        message: "Offer accepted!".to_string(),
        status: OfferStatus::Accepted,
    }))
}

/// Decline an offer
#[utoipa::path(
    post,
    path = "/api/v1/offers/{offer_id}/reject",
    params(
        ("offer_id" = Uuid, Path, description = "Offer identifier")
    ),
    responses(
        (status = 200, description = "Offer declined", body = OfferActionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Offer not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Offers",
    security(("bearer" = []))
)]
pub async fn reject_offer(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(offer_id): Path<Uuid>,
) -> Result<Json<OfferActionResponse>, AppError> {
    set_offer_status(&state, offer_id, user_id, OfferStatus::Rejected).await?;

    Ok(Json(OfferActionResponse {
        message: "Offer declined".to_string(),
        status: OfferStatus::Rejected,
    }))
}

/// Move an offer to a new status; only the recipient can act on it
async fn set_offer_status(
    state: &AppState,
    offer_id: Uuid,
    user_id: Uuid,
    status: OfferStatus,
) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE tutor_offers SET status = $1 WHERE id = $2 AND user_id = $3")
        .bind(status)
        .bind(offer_id)
        .bind(user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::OfferNotFound);
    }

    Ok(())
}
