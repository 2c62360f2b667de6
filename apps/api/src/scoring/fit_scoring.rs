//! Fit Scoring — trait-based scorer that measures a job posting against the candidate profile.
//!
//! Default and only backend: `RuleBasedScorer` (pure-Rust, deterministic, no I/O).
//! `AppState` holds an `Arc<dyn FitScorer>`.

use serde::{Deserialize, Serialize};

use crate::models::job::{JobPosting, LocationType, MustHaveFlags, Seniority};
use crate::models::profile::Profile;
use crate::scoring::templates;
use crate::scoring::text::{guess_location_type, guess_seniority, TokenText};

const MUST_HAVE_MAX_POINTS: f64 = 60.0;
const NICE_TO_HAVE_POINTS: i32 = 5;
const NICE_TO_HAVE_CAP: i32 = 20;
const PREFERRED_LOCATION_BONUS: i32 = 10;
const DISLIKED_LOCATION_PENALTY: i32 = 20;
const DEALBREAKER_PENALTY: i32 = 30;
const CORE_STACK_THRESHOLD: f64 = 0.5;

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Everything derived from one (profile, posting) pair. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub fit_score: u32, // 0 – 100
    pub seniority: Seniority,
    pub location_type: LocationType,
    pub match_summary: String,
    pub reasons_for_score: Vec<String>,
    pub tech_stack: Vec<String>,
    pub must_have_flags: MustHaveFlags,
    pub requires_relocation: bool,
    pub suggested_resume_bullets: Vec<String>,
    pub why_me_paragraph: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The fit scorer trait. Scoring is total: every posting gets a result.
///
/// Carried in `AppState` as `Arc<dyn FitScorer>`.
pub trait FitScorer: Send + Sync {
    fn score(&self, profile: &Profile, posting: &JobPosting) -> ScoreResult;
}

/// Keyword and rule heuristics over the posting text.
///
/// Points:
/// - must-have skills: `trunc(matched / total × 60)`
/// - nice-to-have skills: 5 each, capped at 20
/// - preferred location: +10; disliked location: −20
/// - any dealbreaker phrase in the raw text: −30
///
/// The total is clamped to 0–100.
pub struct RuleBasedScorer;

impl FitScorer for RuleBasedScorer {
    fn score(&self, profile: &Profile, posting: &JobPosting) -> ScoreResult {
        score_posting(profile, posting)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core rule-based algorithm
// ────────────────────────────────────────────────────────────────────────────

pub fn score_posting(profile: &Profile, posting: &JobPosting) -> ScoreResult {
    let combined = format!("{}\n{}", posting.title, posting.description);
    let tokens = TokenText::new(&combined);

    let must = &profile.skills_must_have;
    let nice = &profile.skills_nice_to_have;

    let mut score: i32 = 0;
    let mut reasons = Vec::new();

    // 1) Must-have skills
    let must_hits = matching_phrases(must, |s| tokens.contains(s));
    let must_ratio = if must.is_empty() {
        0.0
    } else {
        must_hits.len() as f64 / must.len() as f64
    };
    score += (must_ratio * MUST_HAVE_MAX_POINTS) as i32;
    reasons.push(templates::core_stack_reason(&must_hits));

    // 2) Nice-to-have skills
    let nice_hits = matching_phrases(nice, |s| tokens.contains(s));
    score += (nice_hits.len() as i32 * NICE_TO_HAVE_POINTS).min(NICE_TO_HAVE_CAP);
    if !nice_hits.is_empty() {
        reasons.push(templates::nice_to_have_reason(&nice_hits));
    }

    // 3) Location
    let location = posting.location.to_lowercase();
    let location_match = profile
        .locations_preferred
        .iter()
        .any(|l| location.contains(&l.to_lowercase()));
    let location_disliked = profile
        .disliked_locations
        .iter()
        .any(|l| location.contains(&l.to_lowercase()));

    if location_match {
        score += PREFERRED_LOCATION_BONUS;
        reasons.push(templates::preferred_location_reason(&posting.location));
    }
    if location_disliked {
        score -= DISLIKED_LOCATION_PENALTY;
        reasons.push(templates::disliked_location_reason(&posting.location));
    }

    // 4) Dealbreakers scan the raw text, not the token text.
    let raw = combined.to_lowercase();
    let dealbreaker_hits = matching_phrases(&profile.dealbreakers, |d| {
        raw.contains(&d.to_lowercase())
    });
    if !dealbreaker_hits.is_empty() {
        score -= DEALBREAKER_PENALTY;
        reasons.push(templates::dealbreaker_reason(&dealbreaker_hits));
    }

    let fit_score = score.clamp(0, 100) as u32;

    let seniority = guess_seniority(&posting.title, &posting.description);
    let location_type = guess_location_type(&posting.location, &posting.description);

    let must_have_flags = MustHaveFlags {
        core_stack_match: must_ratio >= CORE_STACK_THRESHOLD,
        location_match,
        seniority_match: matches!(
            seniority,
            Seniority::Mid | Seniority::Senior | Seniority::Staff
        ),
    };

    let tech_stack = build_tech_stack(&must_hits, &nice_hits, must, nice);

    ScoreResult {
        fit_score,
        seniority,
        location_type,
        match_summary: templates::match_summary(fit_score),
        reasons_for_score: reasons,
        suggested_resume_bullets: templates::resume_bullets(&must_hits, must),
        why_me_paragraph: templates::why_me_paragraph(seniority, &tech_stack, &posting.company),
        tech_stack,
        must_have_flags,
        // No relocation signal is derived from keywords yet.
        requires_relocation: false,
    }
}

fn matching_phrases(phrases: &[String], mut is_match: impl FnMut(&str) -> bool) -> Vec<String> {
    phrases.iter().filter(|p| is_match(p)).cloned().collect()
}

/// Union of matched skills, duplicates collapsed case-insensitively.
/// With no matches at all, falls back to the must-have list, then the nice-to-have list.
fn build_tech_stack(
    must_hits: &[String],
    nice_hits: &[String],
    must: &[String],
    nice: &[String],
) -> Vec<String> {
    let mut stack: Vec<String> = Vec::new();
    for skill in must_hits.iter().chain(nice_hits) {
        if !stack.iter().any(|s| s.eq_ignore_ascii_case(skill)) {
            stack.push(skill.clone());
        }
    }

    if !stack.is_empty() {
        stack
    } else if !must.is_empty() {
        must.to_vec()
    } else {
        nice.to_vec()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn make_profile(must: &[&str], nice: &[&str]) -> Profile {
        Profile {
            skills_must_have: strings(must),
            skills_nice_to_have: strings(nice),
            ..Profile::default()
        }
    }

    fn make_posting(title: &str, location: &str, description: &str) -> JobPosting {
        JobPosting {
            title: title.to_string(),
            company: "Acme".to_string(),
            location: location.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_python_and_go_full_must_have_ratio() {
        let profile = make_profile(&["python", "go"], &[]);
        let posting = make_posting("Engineer", "", "We use Python and Go daily");

        let result = score_posting(&profile, &posting);
        assert_eq!(result.fit_score, 60);
        assert!(result.must_have_flags.core_stack_match);
        assert_eq!(result.tech_stack, vec!["python", "go"]);
        assert_eq!(
            result.reasons_for_score[0],
            "Matches core stack skills: python, go."
        );
    }

    #[test]
    fn test_partial_must_have_ratio_truncates() {
        let profile = make_profile(&["rust", "kafka", "postgres"], &[]);
        let posting = make_posting("Engineer", "", "Rust and Postgres");

        // 2/3 × 60 = 40
        let result = score_posting(&profile, &posting);
        assert_eq!(result.fit_score, 40);
        assert!(result.must_have_flags.core_stack_match);
    }

    #[test]
    fn test_zero_must_have_ratio_contributes_nothing() {
        let profile = make_profile(&["haskell", "erlang"], &["docker"]);
        let posting = make_posting("Engineer", "", "We deploy with Docker");

        let result = score_posting(&profile, &posting);
        assert_eq!(result.fit_score, 5);
        assert!(!result.must_have_flags.core_stack_match);
        assert!(result.reasons_for_score[0].contains("No clear match"));
    }

    #[test]
    fn test_empty_must_have_list_scores_zero_without_panicking() {
        let profile = make_profile(&[], &[]);
        let posting = make_posting("Engineer", "", "Anything at all");

        let result = score_posting(&profile, &posting);
        assert_eq!(result.fit_score, 0);
        assert!(!result.must_have_flags.core_stack_match);
        assert!(result.tech_stack.is_empty());
    }

    #[test]
    fn test_nice_to_have_capped_at_20() {
        let profile = make_profile(&[], &["aws", "gcp", "docker", "kubernetes", "terraform"]);
        let posting = make_posting(
            "Engineer",
            "",
            "AWS, GCP, Docker, Kubernetes and Terraform",
        );

        let result = score_posting(&profile, &posting);
        assert_eq!(result.fit_score, 20);
    }

    #[test]
    fn test_location_preference_and_dislike() {
        let mut profile = make_profile(&["rust"], &[]);
        profile.locations_preferred = strings(&["berlin"]);
        profile.disliked_locations = strings(&["munich"]);

        let liked = score_posting(&profile, &make_posting("Engineer", "Berlin, DE", "Rust"));
        assert_eq!(liked.fit_score, 70);
        assert!(liked.must_have_flags.location_match);

        let disliked = score_posting(&profile, &make_posting("Engineer", "Munich", "Rust"));
        assert_eq!(disliked.fit_score, 40);
        assert!(!disliked.must_have_flags.location_match);
        assert!(disliked
            .reasons_for_score
            .iter()
            .any(|r| r.contains("disliked list")));
    }

    #[test]
    fn test_dealbreaker_costs_thirty_points() {
        let mut profile = make_profile(&["rust"], &["docker"]);
        let posting = make_posting(
            "Engineer",
            "",
            "Rust and Docker. Must be on-call 24/7.",
        );
        let baseline = score_posting(&profile, &posting).fit_score;

        profile.dealbreakers = strings(&["on-call 24/7"]);
        let penalized = score_posting(&profile, &posting);

        assert_eq!(penalized.fit_score, baseline - 30);
        assert!(penalized
            .reasons_for_score
            .last()
            .unwrap()
            .contains("on-call 24/7"));
    }

    #[test]
    fn test_dealbreaker_matches_raw_text_not_tokens() {
        // "24/7" never survives tokenization, but dealbreakers scan the raw text.
        let mut profile = make_profile(&["24/7"], &[]);
        profile.dealbreakers = strings(&["24/7"]);
        let posting = make_posting("Support Engineer", "", "24/7 rotation");

        let result = score_posting(&profile, &posting);
        assert!(!result.must_have_flags.core_stack_match);
        assert!(result
            .reasons_for_score
            .iter()
            .any(|r| r.contains("dealbreakers")));
    }

    #[test]
    fn test_multiple_dealbreakers_penalize_once() {
        let mut profile = make_profile(&["rust"], &[]);
        profile.dealbreakers = strings(&["unpaid", "relocation required"]);
        let posting = make_posting("Engineer", "", "Rust. Unpaid trial, relocation required.");

        let result = score_posting(&profile, &posting);
        assert_eq!(result.fit_score, 30);
    }

    #[test]
    fn test_score_is_clamped_to_bounds() {
        let mut low = make_profile(&["rust"], &[]);
        low.disliked_locations = strings(&["london"]);
        low.dealbreakers = strings(&["crypto"]);
        let floor = score_posting(&low, &make_posting("Crypto Dev", "London", "crypto"));
        assert_eq!(floor.fit_score, 0);

        let mut high = make_profile(&["rust"], &["a", "b", "c", "d"]);
        high.locations_preferred = strings(&["remote"]);
        let ceiling = score_posting(&high, &make_posting("a b c d", "Remote", "rust"));
        assert!(ceiling.fit_score <= 100);
        assert_eq!(ceiling.fit_score, 90);
    }

    #[test]
    fn test_tech_stack_falls_back_to_must_then_nice() {
        let posting = make_posting("Engineer", "", "Nothing relevant here");

        let with_must = score_posting(&make_profile(&["rust"], &["go"]), &posting);
        assert_eq!(with_must.tech_stack, vec!["rust"]);

        let nice_only = score_posting(&make_profile(&[], &["go"]), &posting);
        assert_eq!(nice_only.tech_stack, vec!["go"]);
    }

    #[test]
    fn test_tech_stack_collapses_skills_listed_twice() {
        let profile = make_profile(&["rust"], &["Rust", "tokio"]);
        let posting = make_posting("Rust Engineer", "", "tokio runtime");

        let result = score_posting(&profile, &posting);
        assert_eq!(result.tech_stack, vec!["rust", "tokio"]);
    }

    #[test]
    fn test_seniority_flag_false_only_for_junior() {
        let profile = make_profile(&["rust"], &[]);
        let junior = score_posting(&profile, &make_posting("Junior Developer", "", "rust"));
        assert_eq!(junior.seniority, Seniority::Junior);
        assert!(!junior.must_have_flags.seniority_match);

        let staff = score_posting(&profile, &make_posting("Staff Engineer", "", "rust"));
        assert_eq!(staff.seniority, Seniority::Staff);
        assert!(staff.must_have_flags.seniority_match);
    }

    #[test]
    fn test_padded_skill_matches_whole_word_only() {
        let profile = make_profile(&[" go "], &[]).normalized();

        let cloud = score_posting(&profile, &make_posting("Engineer", "", "We use Google Cloud"));
        assert_eq!(cloud.fit_score, 0);

        let go = score_posting(&profile, &make_posting("Engineer", "", "Rust and Go daily"));
        assert_eq!(go.fit_score, 60);
    }

    #[test]
    fn test_requires_relocation_is_never_set() {
        let mut profile = make_profile(&["rust"], &[]);
        profile.locations_preferred = strings(&["berlin"]);

        let onsite = score_posting(&profile, &make_posting("Engineer", "Paris", "Onsite, rust"));
        assert_eq!(onsite.location_type, LocationType::Onsite);
        assert!(!onsite.must_have_flags.location_match);
        assert!(!onsite.requires_relocation);

        let hybrid = score_posting(&profile, &make_posting("Engineer", "Paris", "Hybrid, rust"));
        assert!(!hybrid.requires_relocation);
    }

    #[test]
    fn test_generated_text_uses_matches_and_company() {
        let profile = make_profile(&["rust", "go"], &[]);
        let result = score_posting(
            &profile,
            &make_posting("Senior Engineer", "", "Rust services"),
        );
        assert!(result.suggested_resume_bullets[0].contains("rust"));
        assert!(result.why_me_paragraph.starts_with("I am a senior engineer"));
        assert!(result.why_me_paragraph.contains("Acme"));
        assert!(result.match_summary.contains("30/100"));
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let mut profile = make_profile(&["rust", "go"], &["docker"]);
        profile.locations_preferred = strings(&["remote"]);
        let posting = make_posting("Senior Rust Engineer", "Remote", "Go and Docker");

        let scorer = RuleBasedScorer;
        assert_eq!(scorer.score(&profile, &posting), scorer.score(&profile, &posting));
    }
}
