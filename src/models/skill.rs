use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Fixed set of skill categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SkillCategory {
    Technology,
    Music,
    Language,
    Art,
    Cooking,
    Fitness,
    Business,
    Science,
    Mathematics,
    Other,
}

impl FromStr for SkillCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Technology" => Ok(SkillCategory::Technology),
            "Music" => Ok(SkillCategory::Music),
            "Language" => Ok(SkillCategory::Language),
            "Art" => Ok(SkillCategory::Art),
            "Cooking" => Ok(SkillCategory::Cooking),
            "Fitness" => Ok(SkillCategory::Fitness),
            "Business" => Ok(SkillCategory::Business),
            "Science" => Ok(SkillCategory::Science),
            "Mathematics" => Ok(SkillCategory::Mathematics),
            "Other" => Ok(SkillCategory::Other),
            _ => Err(format!("Unknown skill category: {}", s)),
        }
    }
}

/// Proficiency or desired learning level; descriptive only, never part of
/// match eligibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Expert,
}

/// Learning progress; descriptive only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SkillProgress {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Mastered,
}

/// Which of the two profile skill lists an operation addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SkillList {
    Offered,
    Wanted,
}

impl SkillList {
    /// Level preselected by the skill dialog for this list
    pub fn default_level(self) -> SkillLevel {
        match self {
            SkillList::Offered => SkillLevel::Intermediate,
            SkillList::Wanted => SkillLevel::Beginner,
        }
    }

    /// Progress preselected by the skill dialog for this list
    pub fn default_progress(self) -> SkillProgress {
        match self {
            SkillList::Offered => SkillProgress::Mastered,
            SkillList::Wanted => SkillProgress::NotStarted,
        }
    }
}

/// A named capability entry in a profile's offered or wanted list. The id is
/// assigned at creation and used only for in-list edit/delete addressing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub category: SkillCategory,
    pub level: SkillLevel,
    pub progress: SkillProgress,
}

/// Add a skill to one of the profile's lists
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddSkillRequest {
    /// Target list
    #[schema(example = "offered")]
    pub list: SkillList,

    /// Skill name (1-100 characters); matched case-insensitively, verbatim
    /// otherwise
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "JavaScript Programming")]
    pub name: String,

    /// Skill category
    pub category: SkillCategory,

    /// Defaults per list when omitted: Intermediate for offered, Beginner for
    /// wanted
    pub level: Option<SkillLevel>,

    /// Defaults per list when omitted: Mastered for offered, "Not Started"
    /// for wanted
    pub progress: Option<SkillProgress>,
}

/// Replace an existing skill entry, keeping its id
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSkillRequest {
    /// List the skill lives in
    #[schema(example = "wanted")]
    pub list: SkillList,

    /// Skill name (1-100 characters)
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Spanish Language")]
    pub name: String,

    /// Skill category
    pub category: SkillCategory,

    /// Proficiency or desired learning level
    pub level: SkillLevel,

    /// Learning progress
    pub progress: SkillProgress,
}

/// Addressing for skill deletion
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteSkillQuery {
    /// List to remove the skill from
    pub list: SkillList,
}

/// Skill mutation response
#[derive(Debug, Serialize, ToSchema)]
pub struct SkillResponse {
    /// The stored skill entry
    pub skill: Skill,
    /// Success message
    pub message: String,
}

/// Skill removal response
#[derive(Debug, Serialize, ToSchema)]
pub struct RemoveSkillResponse {
    /// Success message
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_serializes_with_spaces() {
        let json = serde_json::to_string(&SkillProgress::NotStarted).unwrap();
        assert_eq!(json, "\"Not Started\"");
        let back: SkillProgress = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(back, SkillProgress::InProgress);
    }

    #[test]
    fn skill_list_uses_lowercase_names() {
        assert_eq!(
            serde_json::to_string(&SkillList::Offered).unwrap(),
            "\"offered\""
        );
        let back: SkillList = serde_json::from_str("\"wanted\"").unwrap();
        assert_eq!(back, SkillList::Wanted);
    }

    #[test]
    fn category_parses_exact_names_only() {
        assert_eq!(
            "Technology".parse::<SkillCategory>().unwrap(),
            SkillCategory::Technology
        );
        assert!("technology".parse::<SkillCategory>().is_err());
        assert!("Knitting".parse::<SkillCategory>().is_err());
    }

    #[test]
    fn dialog_defaults_follow_the_list() {
        assert_eq!(SkillList::Offered.default_level(), SkillLevel::Intermediate);
        assert_eq!(
            SkillList::Offered.default_progress(),
            SkillProgress::Mastered
        );
        assert_eq!(SkillList::Wanted.default_level(), SkillLevel::Beginner);
        assert_eq!(
            SkillList::Wanted.default_progress(),
            SkillProgress::NotStarted
        );
    }

    #[test]
    fn skill_roundtrips_through_json() {
        let skill = Skill {
            id: Uuid::new_v4(),
            name: "Guitar".to_string(),
            category: SkillCategory::Music,
            level: SkillLevel::Expert,
            progress: SkillProgress::Mastered,
        };
        let json = serde_json::to_string(&skill).unwrap();
        let back: Skill = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, skill.id);
        assert_eq!(back.name, "Guitar");
        assert_eq!(back.category, SkillCategory::Music);
    }
}
