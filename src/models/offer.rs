use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Offer lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "offer_status", rename_all = "lowercase")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
}

/// Tutor offer from database; tutor_name is denormalized from the tutor's
/// profile at creation time
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct TutorOffer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tutor_id: Uuid,
    pub tutor_name: String,
    pub skill_offered: String,
    pub price: i32,
    pub message: String,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
}

/// Create a tutor offer for another user
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOfferRequest {
    /// Recipient account id
    pub user_id: Uuid,

    /// Skill the tutor will teach (1-100 characters)
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Cryptography")]
    pub skill_offered: String,

    /// Hourly price in whole currency units
    #[validate(range(min = 1, max = 1000))]
    #[schema(example = 25)]
    pub price: i32,

    /// Pitch shown to the recipient
    #[validate(length(max = 500))]
    #[schema(example = "Ten years of applied crypto; happy to start from the basics.")]
    pub message: String,
}

/// Offer creation response
#[derive(Debug, Serialize, ToSchema)]
pub struct OfferResponse {
    /// Created offer
    pub offer: TutorOffer,
    /// Success message
    pub message: String,
}

/// Offers addressed to the caller, plus roster-derived skill suggestions
#[derive(Debug, Serialize, ToSchema)]
pub struct ListOffersResponse {
    pub offers: Vec<TutorOffer>,
    /// Most-offered skill names across other users, most popular first
    pub suggested_skills: Vec<String>,
    /// Number of offers
    pub count: usize,
}

/// Accept/reject response
#[derive(Debug, Serialize, ToSchema)]
pub struct OfferActionResponse {
    /// Result message
    pub message: String,
    /// Status after the action
    pub status: OfferStatus,
}
