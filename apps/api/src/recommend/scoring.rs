//! Keyword Scorer — pure, deterministic relevance scoring.
//!
//! Formations: case-insensitive substring matching over title+description,
//! competences weighted 2, interests weighted 1, normalized by the maximum
//! attainable score. Jobs: case-insensitive exact membership of user skills
//! against the requirement list, normalized by the requirement count.

use crate::models::candidate::{Formation, Job};

/// Scores a formation against the user's competences and interests.
/// Returns a value in [0, 1]; 0.0 when the user supplied no terms.
pub fn score_formation(formation: &Formation, competences: &[String], interests: &[String]) -> f64 {
    let max_score = 2 * (competences.len() + interests.len());
    if max_score == 0 {
        return 0.0;
    }

    let haystack = format!(
        "{} {}",
        formation.title,
        formation.description.as_deref().unwrap_or("")
    )
    .to_lowercase();

    let mut score = 0usize;
    for comp in competences {
        if haystack.contains(&comp.to_lowercase()) {
            score += 2;
        }
    }
    for interest in interests {
        if haystack.contains(&interest.to_lowercase()) {
            score += 1;
        }
    }

    score as f64 / max_score as f64
}

/// Scores a job by exact-token overlap between the user's skills
/// (competences ∪ interests) and the job's requirements.
///
/// A job with no requirements scores 0.0 by convention: the division guard
/// must never turn "nothing to match" into a perfect score.
pub fn score_job(job: &Job, competences: &[String], interests: &[String]) -> f64 {
    if job.requirements.is_empty() {
        return 0.0;
    }

    let requirements: Vec<String> = job.requirements.iter().map(|r| r.to_lowercase()).collect();

    // Deduplicated union so a term listed as both competence and interest
    // counts once.
    let mut skills: Vec<String> = competences
        .iter()
        .chain(interests.iter())
        .map(|s| s.to_lowercase())
        .collect();
    skills.sort();
    skills.dedup();

    let matches = skills
        .iter()
        .filter(|skill| requirements.contains(skill))
        .count();

    matches as f64 / requirements.len() as f64
}
