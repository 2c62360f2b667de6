use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

/// Creates the SQLite connection pool and brings the schema up to date.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Connecting to SQLite at {database_url}...");

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .with_context(|| format!("Failed to connect to database: {database_url}"))?;

    run_migrations(&pool).await?;

    info!("SQLite connection pool established");
    Ok(pool)
}

/// Creates the `jobs` table and its indexes if they do not exist yet.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            company TEXT NOT NULL,
            location TEXT NOT NULL,
            description TEXT NOT NULL,
            fit_score INTEGER NOT NULL,
            seniority TEXT NOT NULL,
            match_summary TEXT NOT NULL,
            tech_stack TEXT NOT NULL,
            location_type TEXT NOT NULL,
            requires_relocation BOOLEAN NOT NULL,
            core_stack_match BOOLEAN NOT NULL,
            location_match BOOLEAN NOT NULL,
            seniority_match BOOLEAN NOT NULL,
            suggested_resume_bullets TEXT NOT NULL,
            why_me_paragraph TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create jobs table")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_jobs_fit_score ON jobs(fit_score DESC)")
        .execute(pool)
        .await
        .context("Failed to create jobs fit_score index")?;

    Ok(())
}

#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    // One connection: every `sqlite::memory:` connection is its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}
