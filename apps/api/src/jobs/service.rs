//! Score-and-persist workflows behind the `/jobs` endpoints.

use tracing::info;

use crate::errors::AppError;
use crate::jobs::store::JobFilter;
use crate::models::job::{JobOut, JobPosting};
use crate::scoring::fit_scoring::ScoreResult;
use crate::state::AppState;

const EMPTY_POSTING: &str = "job posting needs a title or a description";

/// Rejects postings with nothing to score. Everything else is accepted as-is.
pub fn validate_posting(posting: &JobPosting) -> Result<(), AppError> {
    if is_empty_posting(posting) {
        return Err(AppError::Validation(EMPTY_POSTING.to_string()));
    }
    Ok(())
}

fn is_empty_posting(posting: &JobPosting) -> bool {
    posting.title.trim().is_empty() && posting.description.trim().is_empty()
}

/// Scores one posting against the loaded profile, stores it, and returns the full view.
pub async fn score_single_job(state: &AppState, posting: JobPosting) -> Result<JobOut, AppError> {
    validate_posting(&posting)?;

    let result = state.fit_scorer.score(&state.profile, &posting);
    let id = state.store.save(&posting, &result).await?;

    info!(
        "Scored job {id} '{}' at {}: {}/100 ({}, {})",
        posting.title, posting.company, result.fit_score, result.seniority, result.location_type
    );

    Ok(scored_job_out(id, posting, result))
}

/// Scores postings one after another and returns them highest score first.
/// Every posting is validated before any of them is stored.
pub async fn score_jobs_bulk(
    state: &AppState,
    postings: Vec<JobPosting>,
) -> Result<Vec<JobOut>, AppError> {
    if let Some(i) = postings.iter().position(is_empty_posting) {
        return Err(AppError::Validation(format!("jobs[{i}]: {EMPTY_POSTING}")));
    }

    let count = postings.len();
    let mut results = Vec::with_capacity(count);
    for posting in postings {
        results.push(score_single_job(state, posting).await?);
    }
    results.sort_by(|a, b| b.fit_score.cmp(&a.fit_score));

    info!("Bulk scored {count} jobs");
    Ok(results)
}

/// Stored jobs in list view: reasons and resume bullets are not included.
pub async fn list_jobs(state: &AppState, filter: &JobFilter) -> Result<Vec<JobOut>, AppError> {
    let rows = state.store.list(filter).await?;
    tracing::debug!(
        "Listed {} jobs (min_score={}, location_contains={:?})",
        rows.len(),
        filter.min_score,
        filter.location_contains
    );
    Ok(rows.into_iter().map(JobOut::summary_from_row).collect())
}

fn scored_job_out(id: i64, posting: JobPosting, result: ScoreResult) -> JobOut {
    JobOut {
        id,
        title: posting.title,
        company: posting.company,
        location: posting.location,
        description: posting.description,
        fit_score: result.fit_score,
        seniority: result.seniority,
        match_summary: result.match_summary,
        reasons_for_score: result.reasons_for_score,
        tech_stack: result.tech_stack,
        location_type: result.location_type,
        requires_relocation: result.requires_relocation,
        must_have_flags: result.must_have_flags,
        suggested_resume_bullets: result.suggested_resume_bullets,
        why_me_paragraph: result.why_me_paragraph,
    }
}
