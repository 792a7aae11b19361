use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::skill::{Skill, SkillCategory, SkillLevel};

/// A user's skill-exchange profile. Incomplete profiles carry only their
/// identity and the completion flag; name/age/location and both skill lists
/// are populated by onboarding.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub location: Option<String>,
    #[serde(default)]
    pub skills_offered: Vec<Skill>,
    #[serde(default)]
    pub skills_wanted: Vec<Skill>,
    #[serde(default)]
    pub profile_completed: bool,
}

/// Profile columns as stored on the users table
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub location: Option<String>,
    pub skills_offered: Json<Vec<Skill>>,
    pub skills_wanted: Json<Vec<Skill>>,
    pub profile_completed: bool,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            name: row.name,
            age: row.age,
            location: row.location,
            skills_offered: row.skills_offered.0,
            skills_wanted: row.skills_wanted.0,
            profile_completed: row.profile_completed,
        }
    }
}

/// One-time onboarding payload that completes a profile
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CompleteProfileRequest {
    /// Full name
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Jane Smith")]
    pub name: String,

    /// Age in years
    #[validate(range(min = 13, max = 120, message = "Please enter a valid age (13-120)"))]
    #[schema(example = 27)]
    pub age: i32,

    /// City, Country
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Lisbon, Portugal")]
    pub location: String,

    /// The first skill you can teach; progress is recorded as Mastered
    #[validate(nested)]
    pub offered_skill: OnboardingSkill,

    /// The first skill you want to learn; progress is recorded as "Not Started"
    #[validate(nested)]
    pub wanted_skill: OnboardingSkill,
}

/// Skill entry collected during onboarding; progress is fixed by which side
/// it lands on
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OnboardingSkill {
    /// Skill name (1-100 characters)
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "JavaScript Programming")]
    pub name: String,

    /// Skill category
    pub category: SkillCategory,

    /// Defaults to Intermediate for the offered side, Beginner for the wanted
    /// side
    pub level: Option<SkillLevel>,
}

/// Profile response
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub profile: Profile,
}

/// Narrowing filters for the match list; both are no-ops when unset or empty
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MatchQuery {
    /// Case-insensitive substring matched against candidate names and skill
    /// names in either list
    pub q: Option<String>,

    /// Exact category name; retains candidates with that category in either
    /// list
    pub category: Option<String>,
}

/// A matched candidate, with the skills driving each direction of the match
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchProfile {
    pub id: Uuid,
    pub name: Option<String>,
    pub location: Option<String>,
    pub skills_offered: Vec<Skill>,
    pub skills_wanted: Vec<Skill>,
    /// Their offered skills whose names appear in your wanted list
    pub offers_you_want: Vec<Skill>,
    /// Their wanted skills whose names appear in your offered list
    pub wants_you_offer: Vec<Skill>,
}

/// Match list response
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchesResponse {
    pub matches: Vec<MatchProfile>,
    /// Total after narrowing
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_with_missing_skill_lists_deserializes_empty() {
        // Records written before the skill lists existed carry neither array;
        // they must read back as empty lists, not fail.
        let json = r#"{"id":"550e8400-e29b-41d4-a716-446655440000","name":"Old Record","age":null,"location":null}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert!(profile.skills_offered.is_empty());
        assert!(profile.skills_wanted.is_empty());
        assert!(!profile.profile_completed);
    }

    #[test]
    fn row_conversion_unwraps_jsonb_lists() {
        let row = ProfileRow {
            id: Uuid::new_v4(),
            name: Some("Jane".to_string()),
            age: Some(30),
            location: Some("Porto, Portugal".to_string()),
            skills_offered: Json(vec![]),
            skills_wanted: Json(vec![]),
            profile_completed: true,
        };
        let profile: Profile = row.clone().into();
        assert_eq!(profile.id, row.id);
        assert!(profile.profile_completed);
        assert!(profile.skills_offered.is_empty());
    }
}
