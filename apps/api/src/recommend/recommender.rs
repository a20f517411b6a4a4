//! Recommendation Orchestrator — mode selection and the fallback edge.
//!
//! Flow (AI mode): fetch universe → build prompt → gateway → sanitize.
//! Any AI-path failure degrades transparently to the keyword pipeline over
//! the same universe, tagged with a `fallback_reason`; the AI provider being
//! down, slow, or returning garbage never becomes a caller-visible error.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::{info, warn};

use crate::ai_client::{AiError, SkillpathGenerator};
use crate::errors::AppError;
use crate::models::candidate::{Formation, Job, UserProfile};
use crate::models::skillpath::{
    RecommendationResult, RecommendationSource, ResourceKind, Skillpath,
};
use crate::recommend::assembler::assemble_skillpath;
use crate::recommend::prompts::{build_skillpath_prompt, PromptCandidate};
use crate::recommend::sanitize::sanitize_skillpath;
use crate::recommend::scoring::{score_formation, score_job};
use crate::store::CandidateStore;

/// Upper bound on the candidate universe fetched per kind.
pub const CANDIDATE_FETCH_LIMIT: i64 = 1000;
/// Default size of the recommended lists.
pub const DEFAULT_TOP_N: usize = 5;
/// Candidates of each kind offered to the prompt builder (which itself caps
/// the combined list).
const PROMPT_CANDIDATES_PER_KIND: usize = 30;

/// Caller-declared recommendation mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendMode {
    #[default]
    Keyword,
    Ai,
}

/// Body of `POST /api/recommend/submit`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub competences: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub mode: RecommendMode,
    pub top_n: Option<usize>,
}

/// Runs one recommendation request end to end.
///
/// The only hard failure is `ValidationError` for bad caller input (AI mode
/// without a goal). Everything the AI path can throw is converted into a
/// keyword fallback.
pub async fn recommend(
    store: &dyn CandidateStore,
    generator: &dyn SkillpathGenerator,
    request: RecommendRequest,
) -> Result<RecommendationResult, AppError> {
    if request.mode == RecommendMode::Ai && request.goal.trim().is_empty() {
        return Err(AppError::Validation(
            "goal is required for AI mode".to_string(),
        ));
    }

    let formations = store
        .list_formations(CANDIDATE_FETCH_LIMIT)
        .await
        .map_err(AppError::Internal)?;
    let jobs = store
        .list_jobs(CANDIDATE_FETCH_LIMIT)
        .await
        .map_err(AppError::Internal)?;

    let profile = UserProfile {
        goal: request.goal,
        competences: request.competences,
        interests: request.interests,
    };
    let top_n = request.top_n.unwrap_or(DEFAULT_TOP_N);

    match request.mode {
        RecommendMode::Keyword => {
            let skillpath = keyword_skillpath(&formations, &jobs, &profile, top_n);
            Ok(RecommendationResult {
                source: RecommendationSource::Keyword,
                fallback_reason: None,
                skillpath,
            })
        }
        RecommendMode::Ai => match ai_skillpath(generator, &profile, &formations, &jobs).await {
            Ok(skillpath) => {
                info!("AI skillpath generated with {} steps", skillpath.steps.len());
                Ok(RecommendationResult {
                    source: RecommendationSource::Ai,
                    fallback_reason: None,
                    skillpath,
                })
            }
            Err(e) => {
                warn!("AI path failed ({e}); falling back to keyword pipeline");
                let skillpath = keyword_skillpath(&formations, &jobs, &profile, top_n);
                Ok(RecommendationResult {
                    source: RecommendationSource::Keyword,
                    fallback_reason: Some(format!("AI service error: {e}")),
                    skillpath,
                })
            }
        },
    }
}

/// The deterministic pipeline: score every candidate, assemble.
/// Pure in-memory computation; an empty universe yields an empty skillpath.
fn keyword_skillpath(
    formations: &[Formation],
    jobs: &[Job],
    profile: &UserProfile,
    top_n: usize,
) -> Skillpath {
    let scored_formations = formations
        .iter()
        .map(|f| {
            let score = score_formation(f, &profile.competences, &profile.interests);
            (f.clone(), score)
        })
        .collect();

    let scored_jobs = jobs
        .iter()
        .map(|j| {
            let score = score_job(j, &profile.competences, &profile.interests);
            (j.clone(), score)
        })
        .collect();

    assemble_skillpath(scored_formations, scored_jobs, profile, top_n)
}

/// The AI pipeline: prompt → gateway → sanitize against the real universe.
async fn ai_skillpath(
    generator: &dyn SkillpathGenerator,
    profile: &UserProfile,
    formations: &[Formation],
    jobs: &[Job],
) -> Result<Skillpath, AiError> {
    let mut candidates: Vec<PromptCandidate> = formations
        .iter()
        .take(PROMPT_CANDIDATES_PER_KIND)
        .map(|f| PromptCandidate {
            id: f.id,
            kind: ResourceKind::Formation,
            title: f.title.clone(),
            description: f.description.clone().unwrap_or_default(),
            skills: vec![],
        })
        .collect();

    candidates.extend(jobs.iter().take(PROMPT_CANDIDATES_PER_KIND).map(|j| {
        PromptCandidate {
            id: j.id,
            kind: ResourceKind::Job,
            title: j.title.clone(),
            description: j.description.clone().unwrap_or_default(),
            skills: j.requirements.clone(),
        }
    }));

    let prompt = build_skillpath_prompt(profile, &candidates);
    let payload = generator.generate_skillpath(&prompt).await?;

    let valid_formation_ids: HashSet<i32> = formations.iter().map(|f| f.id).collect();
    let valid_job_ids: HashSet<i32> = jobs.iter().map(|j| j.id).collect();

    Ok(sanitize_skillpath(payload, &valid_formation_ids, &valid_job_ids))
}
