//! Templated text produced alongside a score: reasons, summary, resume bullets
//! and the "why me" paragraph.

use crate::models::job::Seniority;

/// How many tech stack entries the "why me" paragraph names.
const WHY_ME_STACK_LIMIT: usize = 5;

pub fn core_stack_reason(must_hits: &[String]) -> String {
    if must_hits.is_empty() {
        "No clear match to core stack skills found.".to_string()
    } else {
        format!("Matches core stack skills: {}.", must_hits.join(", "))
    }
}

pub fn nice_to_have_reason(nice_hits: &[String]) -> String {
    format!("Has nice-to-have skills: {}.", nice_hits.join(", "))
}

pub fn preferred_location_reason(location: &str) -> String {
    format!("Location matches your preference: {location}.")
}

pub fn disliked_location_reason(location: &str) -> String {
    format!("Location is in your disliked list: {location}.")
}

pub fn dealbreaker_reason(hits: &[String]) -> String {
    format!("Potential dealbreakers mentioned: {}", hits.join(", "))
}

pub fn match_summary(score: u32) -> String {
    format!(
        "Rule-based match score: {score}/100. \
         Good alignment with your core stack and preferences, \
         but this is an offline heuristic, not an LLM judgment."
    )
}

/// Three resume bullets. The first names the matched core skills, falling back
/// to the full must-have list, then to a generic phrase.
pub fn resume_bullets(must_hits: &[String], must_have: &[String]) -> Vec<String> {
    let skills = if !must_hits.is_empty() {
        must_hits.join(", ")
    } else if !must_have.is_empty() {
        must_have.join(", ")
    } else {
        "your core stack".to_string()
    };

    vec![
        format!("Worked extensively with {skills} in production systems."),
        "Designed, implemented, and optimized backend services for high-traffic applications."
            .to_string(),
        "Collaborated with cross-functional teams to deliver reliable, scalable software."
            .to_string(),
    ]
}

pub fn why_me_paragraph(seniority: Seniority, tech_stack: &[String], company: &str) -> String {
    let top: Vec<&str> = tech_stack
        .iter()
        .take(WHY_ME_STACK_LIMIT)
        .map(String::as_str)
        .collect();

    format!(
        "I am a {seniority} engineer with strong experience in technologies such as {}. \
         This role at {company} closely aligns with my background and interests, \
         particularly around building robust backend services and working with modern \
         cloud and data tooling. Given my experience and your requirements, I believe I \
         can quickly contribute to the team's goals and help deliver high-quality features.",
        top.join(", ")
    )
}
