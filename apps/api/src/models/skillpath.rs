//! The skillpath wire types — the sole output artifact of the
//! recommendation core, serialized directly to the response body.

use serde::{Deserialize, Serialize};

/// Which pipeline actually produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    Ai,
    Keyword,
}

/// Kind of a resource attached to a step.
///
/// `Formation` and `Job` must carry an id that resolves in the candidate
/// universe (the sanitizer enforces this); `External` never carries an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Formation,
    Job,
    External,
}

/// A reference to a formation, job, or external resource inside a step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRef {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub id: Option<i32>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub score: f64,
}

/// One ordered step of the roadmap. Sequence order is the intended
/// learning order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    pub title: String,
    pub duration_weeks: u8,
    pub progress_estimate: String,
    pub resources: Vec<ResourceRef>,
    pub explanation: String,
}

/// A ranked formation or job in the top-level recommended lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedItem {
    pub id: i32,
    pub title: String,
    pub score: f64,
    pub match_reason: String,
}

/// The structured multi-step roadmap returned to the user.
/// Constructed fresh per request, never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skillpath {
    pub title: String,
    pub summary: String,
    pub steps: Vec<Step>,
    pub recommended_jobs: Vec<RecommendedItem>,
    pub recommended_formations: Vec<RecommendedItem>,
}

/// Top-level response envelope.
/// `fallback_reason` is present iff the request was AI mode and the
/// orchestrator degraded to the keyword pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub source: RecommendationSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub skillpath: Skillpath,
}
