use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::errors::AppError;
use crate::models::job::{join_tech_stack, JobPosting, JobRow};
use crate::scoring::fit_scoring::ScoreResult;

/// Filters for listing stored jobs.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// Negative values behave like 0: no floor.
    pub min_score: i64,
    /// Case-insensitive substring of the posting location.
    pub location_contains: Option<String>,
}

/// Durable storage for scored jobs. Records are append-only.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Persists a posting with its score and returns the generated id.
    async fn save(&self, posting: &JobPosting, result: &ScoreResult) -> Result<i64, AppError>;

    /// Stored jobs matching `filter`, highest fit score first (newest first on ties).
    async fn list(&self, filter: &JobFilter) -> Result<Vec<JobRow>, AppError>;
}

pub struct SqliteJobStore {
    pool: SqlitePool,
}

impl SqliteJobStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for SqliteJobStore {
    async fn save(&self, posting: &JobPosting, result: &ScoreResult) -> Result<i64, AppError> {
        let bullets = serde_json::to_string(&result.suggested_resume_bullets)?;

        let mut tx = self.pool.begin().await?;

        let id = sqlx::query(
            r#"
            INSERT INTO jobs
                (title, company, location, description, fit_score, seniority,
                 match_summary, tech_stack, location_type, requires_relocation,
                 core_stack_match, location_match, seniority_match,
                 suggested_resume_bullets, why_me_paragraph, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&posting.title)
        .bind(&posting.company)
        .bind(&posting.location)
        .bind(&posting.description)
        .bind(i64::from(result.fit_score))
        .bind(result.seniority.as_str())
        .bind(&result.match_summary)
        .bind(join_tech_stack(&result.tech_stack))
        .bind(result.location_type.as_str())
        .bind(result.requires_relocation)
        .bind(result.must_have_flags.core_stack_match)
        .bind(result.must_have_flags.location_match)
        .bind(result.must_have_flags.seniority_match)
        .bind(bullets)
        .bind(&result.why_me_paragraph)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        tx.commit().await?;

        debug!("Stored job {id} ({} at {})", posting.title, posting.company);
        Ok(id)
    }

    async fn list(&self, filter: &JobFilter) -> Result<Vec<JobRow>, AppError> {
        let location_pattern = filter
            .location_contains
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(escape_like);

        let rows = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT * FROM jobs
            WHERE fit_score >= ?1
              AND (?2 IS NULL OR location LIKE '%' || ?2 || '%' ESCAPE '\')
            ORDER BY fit_score DESC, id DESC
            "#,
        )
        .bind(filter.min_score)
        .bind(location_pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Escapes LIKE wildcards so user input is matched literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
