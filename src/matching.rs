use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::models::profile::Profile;
use crate::models::skill::{Skill, SkillCategory};

/// Narrowing filters applied after matching; unset or empty values pass
/// everything
#[derive(Debug, Default, Clone)]
pub struct MatchFilter {
    pub query: Option<String>,
    pub category: Option<SkillCategory>,
}

/// True when each side offers a skill the other wants. Skill names compare
/// case-insensitively; spelling and whitespace are taken as-is.
pub fn is_mutual_match(me: &Profile, candidate: &Profile) -> bool {
    let my_offered = lowered_names(&me.skills_offered);
    let my_wanted = lowered_names(&me.skills_wanted);
    is_mutual(candidate, &my_offered, &my_wanted)
}

/// Select every candidate forming a bidirectional match with `me`.
///
/// Excludes the caller's own profile and any candidate that has not completed
/// onboarding. A caller who has not completed onboarding gets no matches.
/// Input order is preserved.
pub fn find_matches(me: &Profile, candidates: Vec<Profile>) -> Vec<Profile> {
    if !me.profile_completed {
        return Vec::new();
    }

    let my_offered = lowered_names(&me.skills_offered);
    let my_wanted = lowered_names(&me.skills_wanted);

    candidates
        .into_iter()
        .filter(|c| c.id != me.id && c.profile_completed)
        .filter(|c| is_mutual(c, &my_offered, &my_wanted))
        .collect()
}

/// Narrow a match list by free-text query and category.
///
/// The query is a case-insensitive substring matched against the candidate's
/// name and every skill name in either list. The category retains candidates
/// carrying it in either list.
pub fn filter_matches(matches: Vec<Profile>, filter: &MatchFilter) -> Vec<Profile> {
    let query = filter
        .query
        .as_deref()
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    matches
        .into_iter()
        .filter(|c| match &query {
            Some(q) => {
                c.name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(q))
                    || all_skills(c).any(|s| s.name.to_lowercase().contains(q))
            }
            None => true,
        })
        .filter(|c| match filter.category {
            Some(category) => all_skills(c).any(|s| s.category == category),
            None => true,
        })
        .collect()
}

/// The candidate's offered skills whose names appear in `me`'s wanted list
pub fn offered_overlap(me: &Profile, candidate: &Profile) -> Vec<Skill> {
    let my_wanted = lowered_names(&me.skills_wanted);
    candidate
        .skills_offered
        .iter()
        .filter(|s| my_wanted.contains(&s.name.to_lowercase()))
        .cloned()
        .collect()
}

/// The candidate's wanted skills whose names appear in `me`'s offered list
pub fn wanted_overlap(me: &Profile, candidate: &Profile) -> Vec<Skill> {
    let my_offered = lowered_names(&me.skills_offered);
    candidate
        .skills_wanted
        .iter()
        .filter(|s| my_offered.contains(&s.name.to_lowercase()))
        .cloned()
        .collect()
}

/// The most-offered skill names across the roster, excluding the caller's own
/// profile. Names count as written, ranked by count with ties broken
/// alphabetically.
pub fn popular_offered_skills(me_id: Uuid, profiles: &[Profile], limit: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for profile in profiles.iter().filter(|p| p.id != me_id) {
        for skill in &profile.skills_offered {
            *counts.entry(skill.name.as_str()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ranked
        .into_iter()
        .take(limit)
        .map(|(name, _)| name.to_string())
        .collect()
}

fn lowered_names(skills: &[Skill]) -> HashSet<String> {
    skills.iter().map(|s| s.name.to_lowercase()).collect()
}

fn is_mutual(candidate: &Profile, my_offered: &HashSet<String>, my_wanted: &HashSet<String>) -> bool {
    let offers_something_i_want = candidate
        .skills_offered
        .iter()
        .any(|s| my_wanted.contains(&s.name.to_lowercase()));
    let wants_something_i_offer = candidate
        .skills_wanted
        .iter()
        .any(|s| my_offered.contains(&s.name.to_lowercase()));

    offers_something_i_want && wants_something_i_offer
}

fn all_skills(profile: &Profile) -> impl Iterator<Item = &Skill> {
    profile
        .skills_offered
        .iter()
        .chain(profile.skills_wanted.iter())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::models::skill::{SkillLevel, SkillProgress};

    fn skill(name: &str, category: SkillCategory) -> Skill {
        Skill {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category,
            level: SkillLevel::Intermediate,
            progress: SkillProgress::InProgress,
        }
    }

    fn tech_skills(names: &[&str]) -> Vec<Skill> {
        names
            .iter()
            .map(|name| skill(name, SkillCategory::Technology))
            .collect()
    }

    fn profile(name: &str, offered: &[&str], wanted: &[&str]) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            name: Some(name.to_string()),
            age: Some(30),
            location: Some("Porto, Portugal".to_string()),
            skills_offered: tech_skills(offered),
            skills_wanted: tech_skills(wanted),
            profile_completed: true,
        }
    }

    #[test]
    fn mutual_pair_matches_in_both_directions() {
        let alice = profile("Alice", &["Python"], &["Guitar"]);
        let bob = profile("Bob", &["Guitar"], &["Python"]);

        assert!(is_mutual_match(&alice, &bob));
        assert!(is_mutual_match(&bob, &alice));

        let matches = find_matches(&alice, vec![bob.clone()]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, bob.id);

        let reverse = find_matches(&bob, vec![alice.clone()]);
        assert_eq!(reverse.len(), 1);
        assert_eq!(reverse[0].id, alice.id);
    }

    #[rstest]
    #[case::they_want_nothing_i_offer(&["Guitar"], &["Cooking"])]
    #[case::they_offer_nothing_i_want(&["Violin"], &["Python"])]
    #[case::no_overlap_at_all(&["Violin"], &["Cooking"])]
    fn one_directional_overlap_is_not_a_match(
        #[case] their_offered: &[&str],
        #[case] their_wanted: &[&str],
    ) {
        let alice = profile("Alice", &["Python"], &["Guitar"]);
        let bob = profile("Bob", their_offered, their_wanted);

        assert!(!is_mutual_match(&alice, &bob));
        assert!(find_matches(&alice, vec![bob]).is_empty());
    }

    #[rstest]
    #[case("python")]
    #[case("PYTHON")]
    #[case("PyThOn")]
    fn skill_names_compare_case_insensitively(#[case] spelling: &str) {
        let alice = profile("Alice", &["Guitar"], &["Python"]);
        let bob = profile("Bob", &[spelling], &["guitar"]);

        assert_eq!(find_matches(&alice, vec![bob]).len(), 1);
    }

    #[rstest]
    #[case("Java Script", "JavaScript")]
    #[case(" Python", "Python")]
    #[case("Photo-graphy", "Photography")]
    fn spelling_variants_do_not_match(#[case] theirs: &str, #[case] mine: &str) {
        let alice = profile("Alice", &["Guitar"], &[mine]);
        let bob = profile("Bob", &[theirs], &["Guitar"]);

        assert!(find_matches(&alice, vec![bob]).is_empty());
    }

    #[test]
    fn own_profile_is_excluded() {
        // Offering and wanting the same skill would otherwise self-match
        let alice = profile("Alice", &["Python"], &["Python"]);
        let twin = Profile {
            id: alice.id,
            ..profile("Alice", &["Python"], &["Python"])
        };
        let stranger = profile("Eve", &["Python"], &["Python"]);

        let matches = find_matches(&alice, vec![twin, stranger.clone()]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, stranger.id);
    }

    #[test]
    fn incomplete_candidates_are_excluded() {
        let alice = profile("Alice", &["Python"], &["Guitar"]);
        let mut bob = profile("Bob", &["Guitar"], &["Python"]);
        bob.profile_completed = false;

        assert!(find_matches(&alice, vec![bob]).is_empty());
    }

    #[test]
    fn incomplete_caller_gets_no_matches() {
        let mut alice = profile("Alice", &["Python"], &["Guitar"]);
        alice.profile_completed = false;
        let bob = profile("Bob", &["Guitar"], &["Python"]);

        assert!(find_matches(&alice, vec![bob]).is_empty());
    }

    #[rstest]
    #[case::nothing_wanted(&["Python"], &[])]
    #[case::nothing_offered(&[], &["Guitar"])]
    fn empty_skill_list_yields_no_matches(#[case] offered: &[&str], #[case] wanted: &[&str]) {
        let alice = profile("Alice", offered, wanted);
        let bob = profile("Bob", &["Guitar"], &["Python"]);

        assert!(find_matches(&alice, vec![bob]).is_empty());
    }

    #[test]
    fn empty_roster_yields_empty() {
        let alice = profile("Alice", &["Python"], &["Guitar"]);
        assert!(find_matches(&alice, Vec::new()).is_empty());
    }

    #[rstest]
    #[case("span", 1)]
    #[case("SPAN", 1)]
    #[case("german", 0)]
    fn text_filter_narrows_by_skill_name(#[case] query: &str, #[case] expected: usize) {
        let matches = vec![profile("Ana", &["Spanish"], &["Python"])];
        let filter = MatchFilter {
            query: Some(query.to_string()),
            category: None,
        };

        assert_eq!(filter_matches(matches, &filter).len(), expected);
    }

    #[test]
    fn text_filter_also_scans_candidate_names() {
        let matches = vec![
            profile("Germaine", &["Sculpting"], &["Python"]),
            profile("Ana", &["Spanish"], &["Python"]),
        ];
        let filter = MatchFilter {
            query: Some("germa".to_string()),
            category: None,
        };

        let narrowed = filter_matches(matches, &filter);
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].name.as_deref(), Some("Germaine"));
    }

    #[rstest]
    #[case::in_offered_list(SkillCategory::Music, 1)]
    #[case::in_wanted_list(SkillCategory::Language, 1)]
    #[case::in_neither_list(SkillCategory::Art, 0)]
    fn category_filter_scans_both_lists(#[case] category: SkillCategory, #[case] expected: usize) {
        let candidate = Profile {
            skills_offered: vec![skill("Guitar", SkillCategory::Music)],
            skills_wanted: vec![skill("Spanish", SkillCategory::Language)],
            ..profile("Ana", &[], &[])
        };
        let filter = MatchFilter {
            query: None,
            category: Some(category),
        };

        assert_eq!(filter_matches(vec![candidate], &filter).len(), expected);
    }

    #[test]
    fn blank_filters_pass_everything() {
        let matches = vec![
            profile("Ana", &["Spanish"], &["Python"]),
            profile("Bram", &["Dutch"], &["Guitar"]),
        ];

        assert_eq!(filter_matches(matches.clone(), &MatchFilter::default()).len(), 2);

        let blank_query = MatchFilter {
            query: Some(String::new()),
            category: None,
        };
        assert_eq!(filter_matches(matches, &blank_query).len(), 2);
    }

    #[test]
    fn overlap_lists_surface_the_matching_skills() {
        let alice = profile("Alice", &["Python"], &["Guitar", "Spanish"]);
        let bob = profile("Bob", &["guitar", "Spanish", "Sculpting"], &["python", "Cooking"]);

        let offers: Vec<String> = offered_overlap(&alice, &bob)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(offers, vec!["guitar", "Spanish"]);

        let wants: Vec<String> = wanted_overlap(&alice, &bob)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(wants, vec!["python"]);
    }

    #[test]
    fn popular_skills_rank_by_count_then_name() {
        let me = profile("Me", &["Zither"], &[]);
        let roster = vec![
            me.clone(),
            profile("A", &["Python", "Guitar"], &[]),
            profile("B", &["Python"], &[]),
            profile("C", &["Guitar"], &[]),
            profile("D", &["Yoga"], &[]),
        ];

        // Python and Guitar tie at 2; alphabetical order breaks the tie.
        // The caller's own Zither never appears.
        let top = popular_offered_skills(me.id, &roster, 3);
        assert_eq!(top, vec!["Guitar", "Python", "Yoga"]);

        let capped = popular_offered_skills(me.id, &roster, 2);
        assert_eq!(capped, vec!["Guitar", "Python"]);
    }

    #[test]
    fn popularity_counts_are_case_sensitive() {
        let me = profile("Me", &[], &[]);
        let roster = vec![
            profile("A", &["python"], &[]),
            profile("B", &["Python"], &[]),
            profile("C", &["Python"], &[]),
        ];

        let top = popular_offered_skills(me.id, &roster, 5);
        assert_eq!(top, vec!["Python", "python"]);
    }
}
