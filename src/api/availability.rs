use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::{
        app_state::AppState,
        availability::{
            AddTimeSlotRequest, ListTimeSlotsResponse, RemoveTimeSlotResponse, TimeSlot,
            TimeSlotResponse,
        },
    },
};

/// List the caller's availability slots
#[utoipa::path(
    get,
    path = "/api/v1/availability",
    responses(
        (status = 200, description = "Availability slots", body = ListTimeSlotsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Availability",
    security(("bearer" = []))
)]
pub async fn list_slots(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<ListTimeSlotsResponse>, AppError> {
    let slots = sqlx::query_as::<_, TimeSlot>(
        r#"
        SELECT id, user_id, date, start_time, end_time, recurring, created_at
        FROM availability
        WHERE user_id = $1
        ORDER BY date, start_time
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(ListTimeSlotsResponse {
        count: slots.len(),
        slots,
    }))
}

/// Add an availability slot
#[utoipa::path(
    post,
    path = "/api/v1/availability",
    request_body = AddTimeSlotRequest,
    responses(
        (status = 201, description = "Slot added", body = TimeSlotResponse),
        (status = 400, description = "Invalid slot"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Availability",
    security(("bearer" = []))
)]
pub async fn add_slot(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(payload): Json<AddTimeSlotRequest>,
) -> Result<(StatusCode, Json<TimeSlotResponse>), AppError> {
    // Validate the slot
    if payload.end_time <= payload.start_time {
        return Err(AppError::ValidationError(
            "End time must be after start time".to_string(),
        ));
    }
    if payload.date < Utc::now().date_naive() {
        return Err(AppError::ValidationError(
            "Cannot add availability for a past date".to_string(),
        ));
    }

    let slot = sqlx::query_as::<_, TimeSlot>(
        r#"
        INSERT INTO availability (user_id, date, start_time, end_time, recurring)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, date, start_time, end_time, recurring, created_at
        "#,
    )
    .bind(user_id)
    .bind(payload.date)
    .bind(payload.start_time)
    .bind(payload.end_time)
    .bind(payload.recurring)
    .fetch_one(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(TimeSlotResponse {
            slot,
            message: "Time slot added successfully!".to_string(),
        }),
    ))
}

/// Remove an availability slot
#[utoipa::path(
    delete,
    path = "/api/v1/availability/{slot_id}",
    params(
        ("slot_id" = Uuid, Path, description = "Slot identifier")
    ),
    responses(
        (status = 200, description = "Slot removed", body = RemoveTimeSlotResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Slot not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Availability",
    security(("bearer" = []))
)]
pub async fn delete_slot(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(slot_id): Path<Uuid>,
) -> Result<Json<RemoveTimeSlotResponse>, AppError> {
    // Deleting is scoped to the owner; someone else's slot reads as missing
    let result = sqlx::query("DELETE FROM availability WHERE id = $1 AND user_id = $2")
        .bind(slot_id)
        .bind(user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::SlotNotFound);
    }

    Ok(Json(RemoveTimeSlotResponse {
        message: "Time slot removed successfully!".to_string(),
    }))
}
