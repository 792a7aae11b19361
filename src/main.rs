mod api;
mod errors;
mod matching;
mod middleware;
mod models;
mod utils;

use axum::{
    Json, Router,
    extract::State,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};
use serde_json::{Value, json};
use shuttle_axum::ShuttleAxum;
use sqlx::postgres::PgPoolOptions;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::auth::{login, register, session};
use crate::api::availability::{add_slot, delete_slot, list_slots};
use crate::api::matches::find_matches;
use crate::api::offers::{accept_offer, create_offer, list_offers, reject_offer};
use crate::api::profile::{complete_onboarding, get_profile};
use crate::api::skills::{add_skill, delete_skill, update_skill};
use crate::middleware::auth::auth_middleware;
use crate::models::app_state::AppState;

/// Registers the bearer scheme the protected endpoints reference
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    paths(
        crate::api::auth::register,
        crate::api::auth::login,
        crate::api::auth::session,
        crate::api::profile::get_profile,
        crate::api::profile::complete_onboarding,
        crate::api::skills::add_skill,
        crate::api::skills::update_skill,
        crate::api::skills::delete_skill,
        crate::api::matches::find_matches,
        crate::api::availability::list_slots,
        crate::api::availability::add_slot,
        crate::api::availability::delete_slot,
        crate::api::offers::list_offers,
        crate::api::offers::create_offer,
        crate::api::offers::accept_offer,
        crate::api::offers::reject_offer,
    ),
    components(
        schemas(
            crate::models::user::RegisterRequest,
            crate::models::user::RegisterResponse,
            crate::models::user::LoginRequest,
            crate::models::user::LoginResponse,
            crate::models::user::SessionResponse,
            crate::models::profile::Profile,
            crate::models::profile::CompleteProfileRequest,
            crate::models::profile::OnboardingSkill,
            crate::models::profile::ProfileResponse,
            crate::models::profile::MatchProfile,
            crate::models::profile::MatchesResponse,
            crate::models::skill::Skill,
            crate::models::skill::SkillCategory,
            crate::models::skill::SkillLevel,
            crate::models::skill::SkillProgress,
            crate::models::skill::SkillList,
            crate::models::skill::AddSkillRequest,
            crate::models::skill::UpdateSkillRequest,
            crate::models::skill::SkillResponse,
            crate::models::skill::RemoveSkillResponse,
            crate::models::availability::TimeSlot,
            crate::models::availability::AddTimeSlotRequest,
            crate::models::availability::TimeSlotResponse,
            crate::models::availability::ListTimeSlotsResponse,
            crate::models::availability::RemoveTimeSlotResponse,
            crate::models::offer::OfferStatus,
            crate::models::offer::TutorOffer,
            crate::models::offer::CreateOfferRequest,
            crate::models::offer::OfferResponse,
            crate::models::offer::ListOffersResponse,
            crate::models::offer::OfferActionResponse,
        )
    ),
    tags(
        (name = "Authentication", description = "Account registration and login"),
        (name = "Profile", description = "Profile and onboarding"),
        (name = "Skills", description = "Offered and wanted skill lists"),
        (name = "Matches", description = "Mutual skill matching"),
        (name = "Availability", description = "Weekly availability slots"),
        (name = "Offers", description = "Tutor offers")
    ),
    info(
        title = "SkillBarter API",
        version = "0.1.0",
        description = "Skill exchange marketplace API",
        contact(
            name = "SkillBarter Team",
            email = "support@skillbarter.app"
        )
    )
)]
struct ApiDoc;

async fn hello_world() -> &'static str {
    "Hello from SkillBarter! 🤝"
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    // Test database connection
    match sqlx::query("SELECT 1 as health_check")
        .fetch_one(&state.db)
        .await
    {
        Ok(_) => Json(json!({
            "status": "healthy",
            "database": "connected"
        })),
        Err(e) => Json(json!({
            "status": "unhealthy",
            "database": "disconnected",
            "error": e.to_string()
        })),
    }
}

fn app_router(state: AppState) -> Router {
    // Everything past the auth gate sees the caller's user id in extensions
    let protected = Router::new()
        .route("/api/v1/auth/session", get(session))
        .route("/api/v1/profile", get(get_profile))
        .route("/api/v1/profile/onboarding", put(complete_onboarding))
        .route("/api/v1/skills", post(add_skill))
        .route(
            "/api/v1/skills/{skill_id}",
            put(update_skill).delete(delete_skill),
        )
        .route("/api/v1/matches", get(find_matches))
        .route("/api/v1/availability", get(list_slots).post(add_slot))
        .route("/api/v1/availability/{slot_id}", delete(delete_slot))
        .route("/api/v1/offers", get(list_offers).post(create_offer))
        .route("/api/v1/offers/{offer_id}/accept", post(accept_offer))
        .route("/api/v1/offers/{offer_id}/reject", post(reject_offer))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/", get(hello_world))
        .route("/api/health", get(health_check))
        // Authentication routes
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
        .merge(protected)
        // Swagger UI
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] conn_str: String,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> ShuttleAxum {
    let db = PgPoolOptions::new()
        .max_connections(5)
        .connect(&conn_str)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!()
        .run(&db)
        .await
        .expect("Failed to run migrations");

    let jwt_secret = secrets
        .get("JWT_SECRET")
        .expect("JWT_SECRET secret is not set");

    let state = AppState::new(db, jwt_secret);

    Ok(app_router(state).into())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;
    use crate::utils::jwt::generate_token;

    // The pool never connects; these tests only exercise routing and the
    // auth gate, which answer before any query runs
    fn test_router() -> Router {
        let db = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/skillbarter")
            .expect("pool options are valid");
        app_router(AppState::new(db, "test-secret".to_string()))
    }

    #[tokio::test]
    async fn root_greets_without_auth() {
        let response = test_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn protected_route_without_token_is_unauthorized() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_token_is_unauthorized() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/matches")
                    .header(header::AUTHORIZATION, "Bearer not-a-real-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_unauthorized() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/offers")
                    .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_unauthorized() {
        let token = generate_token(uuid::Uuid::new_v4(), "other-secret", 24).unwrap();

        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/auth/session")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
