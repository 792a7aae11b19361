use axum::{
    Extension, Json,
    extract::{Query, State},
};
use uuid::Uuid;

use crate::{
    errors::AppError,
    matching::{self, MatchFilter},
    models::{
        app_state::AppState,
        profile::{MatchProfile, MatchQuery, MatchesResponse, Profile, ProfileRow},
        skill::SkillCategory,
    },
};

/// Find mutual skill matches
#[utoipa::path(
    get,
    path = "/api/v1/matches",
    params(MatchQuery),
    responses(
        (status = 200, description = "Matching candidates", body = MatchesResponse),
        (status = 400, description = "Unknown category"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Matches",
    security(("bearer" = []))
)]
pub async fn find_matches(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<MatchesResponse>, AppError> {
    let me: Profile = sqlx::query_as::<_, ProfileRow>(
        r#"
        SELECT id, name, age, location, skills_offered, skills_wanted, profile_completed
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::UserNotFound)?
    .into();

    // Matching only runs for completed profiles; before onboarding the match
    // list is simply empty
    if !me.profile_completed {
        return Ok(Json(MatchesResponse {
            matches: Vec::new(),
            count: 0,
        }));
    }

    // An empty category string means "all"; anything else must name a real one
    let category = match query.category.as_deref().filter(|c| !c.is_empty()) {
        Some(raw) => Some(
            raw.parse::<SkillCategory>()
                .map_err(AppError::ValidationError)?,
        ),
        None => None,
    };

    // Fetch the roster wholesale and filter here, not in the query
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

    let filter = MatchFilter {
        query: query.q,
        category,
    };
    let narrowed = matching::filter_matches(matching::find_matches(&me, roster), &filter);

    let matches: Vec<MatchProfile> = narrowed
        .into_iter()
        .map(|candidate| {
            let offers_you_want = matching::offered_overlap(&me, &candidate);
            let wants_you_offer = matching::wanted_overlap(&me, &candidate);
            MatchProfile {
                id: candidate.id,
                name: candidate.name,
                location: candidate.location,
                skills_offered: candidate.skills_offered,
                skills_wanted: candidate.skills_wanted,
                offers_you_want,
                wants_you_offer,
            }
        })
        .collect();

    Ok(Json(MatchesResponse {
        count: matches.len(),
        matches,
    }))
}
