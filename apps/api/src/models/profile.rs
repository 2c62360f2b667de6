use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// The candidate's static preferences. Loaded once at startup and shared read-only.
///
/// Every list behaves as a set: see [`Profile::normalized`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub skills_must_have: Vec<String>,
    pub skills_nice_to_have: Vec<String>,
    pub locations_preferred: Vec<String>,
    pub disliked_locations: Vec<String>,
    pub dealbreakers: Vec<String>,
}

impl Profile {
    /// Drops blank entries and collapses case-insensitive duplicates, keeping
    /// the first spelling of each phrase. Padding is kept as written.
    pub fn normalized(self) -> Self {
        Profile {
            skills_must_have: dedupe_phrases(self.skills_must_have),
            skills_nice_to_have: dedupe_phrases(self.skills_nice_to_have),
            locations_preferred: dedupe_phrases(self.locations_preferred),
            disliked_locations: dedupe_phrases(self.disliked_locations),
            dealbreakers: dedupe_phrases(self.dealbreakers),
        }
    }
}

/// Reads and parses the profile document. A missing or malformed file is fatal at startup.
pub fn load_profile(path: &Path) -> Result<Profile> {
    let raw = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Profile file not found or unreadable at {}. Set PROFILE_PATH or create profile/profile.json.",
            path.display()
        )
    })?;

    let profile: Profile = serde_json::from_str(&raw)
        .with_context(|| format!("Profile file at {} is not valid JSON", path.display()))?;
    let profile = profile.normalized();

    info!(
        "Loaded profile from {}: {} must-have, {} nice-to-have, {} dealbreakers",
        path.display(),
        profile.skills_must_have.len(),
        profile.skills_nice_to_have.len(),
        profile.dealbreakers.len()
    );

    Ok(profile)
}

fn dedupe_phrases(phrases: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    phrases
        .into_iter()
        .filter(|p| !p.trim().is_empty() && seen.insert(p.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_profile(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let file = write_profile(r#"{"skills_must_have": ["rust"]}"#);
        let profile = load_profile(file.path()).unwrap();
        assert_eq!(profile.skills_must_have, vec!["rust"]);
        assert!(profile.skills_nice_to_have.is_empty());
        assert!(profile.locations_preferred.is_empty());
        assert!(profile.disliked_locations.is_empty());
        assert!(profile.dealbreakers.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let file = write_profile(r#"{"name": "Sam", "dealbreakers": ["unpaid"]}"#);
        let profile = load_profile(file.path()).unwrap();
        assert_eq!(profile.dealbreakers, vec!["unpaid"]);
    }

    #[test]
    fn test_duplicates_collapse_case_insensitively() {
        let profile = Profile {
            skills_must_have: vec![
                "Python".to_string(),
                "python".to_string(),
                "Go".to_string(),
                "".to_string(),
                "   ".to_string(),
            ],
            ..Profile::default()
        }
        .normalized();
        assert_eq!(profile.skills_must_have, vec!["Python", "Go"]);
    }

    #[test]
    fn test_padded_phrases_are_kept_as_written() {
        let profile = Profile {
            skills_must_have: vec![" go ".to_string(), "go".to_string()],
            ..Profile::default()
        }
        .normalized();
        assert_eq!(profile.skills_must_have, vec![" go ", "go"]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_profile(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Profile file not found"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let file = write_profile("skills: [rust]");
        let err = load_profile(file.path()).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }
}
