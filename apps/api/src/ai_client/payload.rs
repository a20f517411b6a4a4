//! Typed shape of the AI-proposed skillpath.
//!
//! Every field the model might omit is optional or defaulted, so a payload
//! that follows the schema loosely still parses; it is validated at this
//! boundary instead of being shuttled downstream as loose JSON. The
//! sanitizer turns this into the real `Skillpath` by filtering resource ids
//! against the candidate universe.

use serde::{Deserialize, Serialize};

/// The raw skillpath object parsed out of the model's answer text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSkillpath {
    pub title: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub steps: Vec<AiStep>,
    #[serde(default)]
    pub recommended_jobs: Vec<AiRecommendation>,
    #[serde(default)]
    pub recommended_formations: Vec<AiRecommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiStep {
    pub id: Option<String>,
    pub title: Option<String>,
    pub duration_weeks: Option<u8>,
    pub progress_estimate: Option<String>,
    #[serde(default)]
    pub resources: Vec<AiResource>,
    pub explanation: Option<String>,
}

/// A resource reference as proposed by the model.
///
/// `kind` stays a plain string here: the model can propose types outside the
/// schema, and those must be dropped by the sanitizer, not rejected as a
/// parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiResource {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub id: Option<i32>,
    #[serde(alias = "titre")]
    pub title: Option<String>,
    pub url: Option<String>,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiRecommendation {
    pub id: Option<i32>,
    #[serde(alias = "titre")]
    pub title: Option<String>,
    pub score: Option<f64>,
    pub match_reason: Option<String>,
}
