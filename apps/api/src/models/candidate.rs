//! Candidate records supplied by the store: formations and jobs.
//!
//! Read-only to the recommendation core. Each list is fetched fresh per
//! request and treated as an immutable snapshot for that request's lifetime.

use serde::{Deserialize, Serialize};

/// A learning resource eligible for recommendation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Formation {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
}

/// A job posting eligible for recommendation.
///
/// `requirements` is the list of required skills; job scoring matches user
/// skills against it with exact (not substring) comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub requirements: Vec<String>,
    pub company: Option<String>,
    pub location: Option<String>,
}

/// Skills and interests declared by the caller for one request.
/// Constructed per request, never persisted by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub goal: String,
    pub competences: Vec<String>,
    pub interests: Vec<String>,
}
