//! Candidate Store Adapter — the read-only supplier of formations and jobs.
//!
//! The recommendation core only ever fetch-alls (with an upper bound the
//! orchestrator enforces); there is no pagination contract and no cache, so
//! every request sees a fresh snapshot.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::models::candidate::{Formation, Job};

/// Read-only access to the candidate universe.
///
/// Carried in `AppState` as `Arc<dyn CandidateStore>` so tests can substitute
/// an in-memory implementation.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn list_formations(&self, limit: i64) -> Result<Vec<Formation>>;
    async fn list_jobs(&self, limit: i64) -> Result<Vec<Job>>;
}

/// PostgreSQL-backed candidate store.
pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to PostgreSQL and wraps the pool in a store.
    pub async fn connect(database_url: &str) -> Result<Self> {
        info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        info!("PostgreSQL connection pool established");
        Ok(Self::new(pool))
    }
}

/// Intermediate row for jobs: `requirements` lives in a jsonb column.
#[derive(sqlx::FromRow)]
struct JobRow {
    id: i32,
    title: String,
    description: Option<String>,
    requirements: Option<sqlx::types::Json<Vec<String>>>,
    company: Option<String>,
    location: Option<String>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: row.id,
            title: row.title,
            description: row.description,
            requirements: row.requirements.map(|j| j.0).unwrap_or_default(),
            company: row.company,
            location: row.location,
        }
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn list_formations(&self, limit: i64) -> Result<Vec<Formation>> {
        let formations = sqlx::query_as::<_, Formation>(
            "SELECT id, title, description FROM formations ORDER BY id LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(formations)
    }

    async fn list_jobs(&self, limit: i64) -> Result<Vec<Job>> {
        let rows = sqlx::query_as::<_, JobRow>(
            "SELECT id, title, description, requirements, company, location \
             FROM jobs ORDER BY id LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Job::from).collect())
    }
}
