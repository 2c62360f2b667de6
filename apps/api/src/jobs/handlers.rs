//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::service::{list_jobs, score_jobs_bulk, score_single_job};
use crate::jobs::store::JobFilter;
use crate::models::job::{JobOut, JobPosting};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Bulk payload: either a bare array of postings or `{"jobs": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum BulkScoreRequest {
    List(Vec<JobPosting>),
    Wrapped { jobs: Vec<JobPosting> },
}

impl BulkScoreRequest {
    fn into_postings(self) -> Vec<JobPosting> {
        match self {
            BulkScoreRequest::List(jobs) => jobs,
            BulkScoreRequest::Wrapped { jobs } => jobs,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListJobsQuery {
    /// Negative values are accepted and mean no floor.
    #[serde(default)]
    pub min_score: i64,
    pub location_contains: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BulkScoreResponse {
    pub jobs: Vec<JobOut>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /jobs/score
///
/// Scores one posting, stores it, and returns the full result with its id.
pub async fn handle_score_job(
    State(state): State<AppState>,
    Json(posting): Json<JobPosting>,
) -> Result<Json<JobOut>, AppError> {
    Ok(Json(score_single_job(&state, posting).await?))
}

/// POST /jobs/score-bulk
///
/// Scores and stores every posting; the response is sorted by fit score, highest first.
pub async fn handle_score_bulk(
    State(state): State<AppState>,
    Json(request): Json<BulkScoreRequest>,
) -> Result<Json<BulkScoreResponse>, AppError> {
    let jobs = score_jobs_bulk(&state, request.into_postings()).await?;
    Ok(Json(BulkScoreResponse { jobs }))
}

/// GET /jobs?min_score=&location_contains=
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<ListJobsQuery>,
) -> Result<Json<Vec<JobOut>>, AppError> {
    let filter = JobFilter {
        min_score: params.min_score,
        location_contains: params.location_contains,
    };
    Ok(Json(list_jobs(&state, &filter).await?))
}
