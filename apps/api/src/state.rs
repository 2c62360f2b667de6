use std::sync::Arc;

use crate::jobs::store::JobStore;
use crate::models::profile::Profile;
use crate::scoring::fit_scoring::FitScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Candidate profile, loaded once at startup and read-only afterwards.
    pub profile: Arc<Profile>,
    /// Pluggable fit scorer. Default: RuleBasedScorer.
    pub fit_scorer: Arc<dyn FitScorer>,
    pub store: Arc<dyn JobStore>,
}

#[cfg(test)]
pub async fn test_state() -> AppState {
    use crate::jobs::store::SqliteJobStore;
    use crate::scoring::fit_scoring::RuleBasedScorer;

    let profile = Profile {
        skills_must_have: vec!["rust".to_string(), "go".to_string()],
        skills_nice_to_have: vec!["docker".to_string()],
        locations_preferred: vec!["berlin".to_string(), "remote".to_string()],
        disliked_locations: vec!["london".to_string()],
        dealbreakers: vec!["unpaid".to_string()],
    };

    AppState {
        profile: Arc::new(profile),
        fit_scorer: Arc::new(RuleBasedScorer),
        store: Arc::new(SqliteJobStore::new(crate::db::test_pool().await)),
    }
}
