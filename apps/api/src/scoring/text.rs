//! Text helpers for the rule-based scorer: tokenization, phrase containment,
//! and keyword guesses for seniority and location type.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::job::{LocationType, Seniority};

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Keeps `+`, `#` and `.` so "c++", "c#" and "node.js" survive as single tokens.
    Regex::new(r"[a-z0-9+#.]+").expect("token pattern is valid")
});

/// Lowercases `text` and splits it into alphanumeric/symbol tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Tokenized text re-joined with single spaces. Skill phrases are matched against this.
#[derive(Debug, Clone)]
pub struct TokenText(String);

impl TokenText {
    pub fn new(text: &str) -> Self {
        TokenText(tokenize(text).join(" "))
    }

    /// Case-insensitive substring test of `phrase` against the token text.
    pub fn contains(&self, phrase: &str) -> bool {
        self.0.contains(&phrase.to_lowercase())
    }
}

/// Guesses seniority from keywords. First matching rule wins:
/// staff/principal, then senior/sr, then lead (counted as senior), then
/// intern/junior/grad. Anything else is mid.
pub fn guess_seniority(title: &str, description: &str) -> Seniority {
    let text = format!("{title} {description}").to_lowercase();
    let has = |kw: &str| text.contains(kw);

    if has("staff") || has("principal") {
        Seniority::Staff
    } else if has("senior") || has("sr ") || has("sr.") || has("lead") {
        Seniority::Senior
    } else if has("intern") || has("junior") || has("grad") {
        Seniority::Junior
    } else {
        Seniority::Mid
    }
}

/// Guesses the work arrangement from the location field and description.
pub fn guess_location_type(location: &str, description: &str) -> LocationType {
    let text = format!("{location} {description}").to_lowercase();

    if text.contains("remote") {
        LocationType::Remote
    } else if text.contains("hybrid") {
        LocationType::Hybrid
    } else if text.contains("onsite") || text.contains("on-site") {
        LocationType::Onsite
    } else {
        LocationType::Unknown
    }
}
