use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Availability slot from database
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct TimeSlot {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub recurring: bool,
    pub created_at: DateTime<Utc>,
}

/// Add an availability slot
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddTimeSlotRequest {
    /// Date of the slot; past dates are rejected
    #[schema(example = "2026-09-12")]
    pub date: NaiveDate,

    /// Start of the slot
    #[schema(example = "09:00:00")]
    pub start_time: NaiveTime,

    /// End of the slot; must be after the start
    #[schema(example = "10:00:00")]
    pub end_time: NaiveTime,

    /// Repeat weekly
    #[serde(default)]
    pub recurring: bool,
}

/// Slot creation response
#[derive(Debug, Serialize, ToSchema)]
pub struct TimeSlotResponse {
    /// Created slot
    pub slot: TimeSlot,
    /// Success message
    pub message: String,
}

/// List of the caller's slots
#[derive(Debug, Serialize, ToSchema)]
pub struct ListTimeSlotsResponse {
    pub slots: Vec<TimeSlot>,
    /// Total count
    pub count: usize,
}

/// Slot removal response
#[derive(Debug, Serialize, ToSchema)]
pub struct RemoveTimeSlotResponse {
    /// Success message
    pub message: String,
}
