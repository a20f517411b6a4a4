//! Skillpath Assembler — turns scored candidates into the canonical
//! skillpath structure for the keyword path.
//!
//! Sorting is stable so ties keep store order and identical inputs always
//! produce identical output.

use crate::models::candidate::{Formation, Job, UserProfile};
use crate::models::skillpath::{RecommendedItem, ResourceKind, ResourceRef, Skillpath, Step};

/// Fixed title used when the caller supplied no goal.
const DEFAULT_TITLE: &str = "Personalized learning path";
/// Goal text is clipped to this many characters for the title.
const TITLE_MAX_CHARS: usize = 50;
/// Resources bundled into a single step.
const STEP_RESOURCE_LIMIT: usize = 3;
/// Hard cap on emitted steps, independent of how many step rules fire.
const MAX_STEPS: usize = 5;

/// Assembles a skillpath from scored formations and jobs.
///
/// Candidates with score ≤ 0 are dropped before truncating each list to
/// `top_n`. Scores are rounded to 2 decimals in the output.
pub fn assemble_skillpath(
    scored_formations: Vec<(Formation, f64)>,
    scored_jobs: Vec<(Job, f64)>,
    profile: &UserProfile,
    top_n: usize,
) -> Skillpath {
    let top_formations = rank(scored_formations, top_n);
    let top_jobs = rank(scored_jobs, top_n);

    let recommended_formations = top_formations
        .iter()
        .map(|(f, score)| RecommendedItem {
            id: f.id,
            title: f.title.clone(),
            score: round2(*score),
            match_reason: match_reason(&f.title, f.description.as_deref(), &profile.competences),
        })
        .collect();

    let recommended_jobs = top_jobs
        .iter()
        .map(|(j, score)| RecommendedItem {
            id: j.id,
            title: j.title.clone(),
            score: round2(*score),
            match_reason: match_reason(&j.title, j.description.as_deref(), &profile.competences),
        })
        .collect();

    let mut steps = Vec::new();

    if !top_formations.is_empty() {
        let resources = top_formations
            .iter()
            .take(STEP_RESOURCE_LIMIT)
            .map(|(f, score)| ResourceRef {
                kind: ResourceKind::Formation,
                id: Some(f.id),
                title: Some(f.title.clone()),
                url: None,
                score: round2(*score),
            })
            .collect();
        steps.push(Step {
            id: format!("step-{}", steps.len() + 1),
            title: "Build your foundations".to_string(),
            duration_weeks: 4,
            progress_estimate: "beginner->intermediate".to_string(),
            resources,
            explanation: "Start with the formations that best match your skills".to_string(),
        });
    }

    if !top_jobs.is_empty() {
        let resources = top_jobs
            .iter()
            .take(STEP_RESOURCE_LIMIT)
            .map(|(j, score)| ResourceRef {
                kind: ResourceKind::Job,
                id: Some(j.id),
                title: Some(j.title.clone()),
                url: None,
                score: round2(*score),
            })
            .collect();
        steps.push(Step {
            id: format!("step-{}", steps.len() + 1),
            title: "Explore matching roles".to_string(),
            duration_weeks: 2,
            progress_estimate: "intermediate->job-ready".to_string(),
            resources,
            explanation: "Review the roles your current profile already fits".to_string(),
        });
    }

    steps.truncate(MAX_STEPS);

    Skillpath {
        title: make_title(&profile.goal),
        summary: format!(
            "Recommendations based on {} competences and {} interests",
            profile.competences.len(),
            profile.interests.len()
        ),
        steps,
        recommended_jobs,
        recommended_formations,
    }
}

/// Stable sort by score descending, drop non-positive scores, keep `top_n`.
fn rank<T>(mut scored: Vec<(T, f64)>, top_n: usize) -> Vec<(T, f64)> {
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.retain(|(_, score)| *score > 0.0);
    scored.truncate(top_n);
    scored
}

/// Lists the first competences literally present in the candidate's
/// title+description text, up to two.
///
/// For jobs this can legitimately be empty even with a positive score: the
/// score comes from exact requirement matching while this re-scan is a
/// substring match over different text.
fn match_reason(title: &str, description: Option<&str>, competences: &[String]) -> String {
    let haystack = format!("{} {}", title, description.unwrap_or("")).to_lowercase();

    let matched: Vec<&str> = competences
        .iter()
        .filter(|c| haystack.contains(&c.to_lowercase()))
        .take(2)
        .map(|c| c.as_str())
        .collect();

    if matched.is_empty() {
        String::new()
    } else {
        format!("Matches your skills: {}", matched.join(", "))
    }
}

fn make_title(goal: &str) -> String {
    let goal = goal.trim();
    if goal.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        goal.chars().take(TITLE_MAX_CHARS).collect()
    }
}

fn round2(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formation(id: i32, title: &str, description: Option<&str>) -> Formation {
        Formation {
            id,
            title: title.to_string(),
            description: description.map(str::to_string),
        }
    }

    fn job(id: i32, title: &str, requirements: &[&str]) -> Job {
        Job {
            id,
            title: title.to_string(),
            description: None,
            requirements: requirements.iter().map(|s| s.to_string()).collect(),
            company: None,
            location: None,
        }
    }

    fn profile(goal: &str, competences: &[&str], interests: &[&str]) -> UserProfile {
        UserProfile {
            goal: goal.to_string(),
            competences: competences.iter().map(|s| s.to_string()).collect(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_zero_score_candidates_are_dropped() {
        let formations = vec![
            (formation(1, "Python", None), 0.5),
            (formation(2, "Cobol", None), 0.0),
        ];
        let path = assemble_skillpath(formations, vec![], &profile("", &["python"], &[]), 5);

        assert_eq!(path.recommended_formations.len(), 1);
        assert_eq!(path.recommended_formations[0].id, 1);
        for step in &path.steps {
            for resource in &step.resources {
                assert!(resource.score > 0.0);
            }
        }
    }

    #[test]
    fn test_sorted_by_score_descending_with_stable_ties() {
        let formations = vec![
            (formation(1, "A", None), 0.4),
            (formation(2, "B", None), 0.9),
            (formation(3, "C", None), 0.4),
        ];
        let path = assemble_skillpath(formations, vec![], &profile("", &[], &[]), 5);

        let ids: Vec<i32> = path.recommended_formations.iter().map(|f| f.id).collect();
        // 2 wins; 1 and 3 tie and keep store order
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_truncates_to_top_n() {
        let formations = (1..=8)
            .map(|i| (formation(i, "F", None), 1.0 / i as f64))
            .collect();
        let path = assemble_skillpath(formations, vec![], &profile("", &[], &[]), 5);
        assert_eq!(path.recommended_formations.len(), 5);
    }

    #[test]
    fn test_foundation_step_bundles_top_three_formations() {
        let formations = (1..=5)
            .map(|i| (formation(i, "F", None), 1.0 - i as f64 * 0.1))
            .collect();
        let path = assemble_skillpath(formations, vec![], &profile("", &[], &[]), 5);

        assert_eq!(path.steps.len(), 1);
        assert_eq!(path.steps[0].id, "step-1");
        assert_eq!(path.steps[0].resources.len(), 3);
        assert!(path.steps[0]
            .resources
            .iter()
            .all(|r| r.kind == ResourceKind::Formation));
    }

    #[test]
    fn test_exploration_step_follows_foundation() {
        let formations = vec![(formation(1, "Python", None), 0.8)];
        let jobs = vec![(job(10, "Backend Developer", &["python"]), 0.6)];
        let path = assemble_skillpath(formations, jobs, &profile("", &[], &[]), 5);

        assert_eq!(path.steps.len(), 2);
        assert_eq!(path.steps[1].id, "step-2");
        assert_eq!(path.steps[1].resources[0].kind, ResourceKind::Job);
        assert!((1..=12).contains(&path.steps[0].duration_weeks));
        assert!((1..=12).contains(&path.steps[1].duration_weeks));
    }

    #[test]
    fn test_empty_universe_yields_empty_skillpath() {
        let path = assemble_skillpath(vec![], vec![], &profile("", &["python"], &[]), 5);
        assert!(path.steps.is_empty());
        assert!(path.recommended_jobs.is_empty());
        assert!(path.recommended_formations.is_empty());
        assert!(!path.title.is_empty());
    }

    #[test]
    fn test_title_clipped_to_fifty_chars() {
        let goal = "become a machine learning engineer specializing in computer vision systems";
        let path = assemble_skillpath(vec![], vec![], &profile(goal, &[], &[]), 5);
        assert_eq!(path.title.chars().count(), 50);
        assert!(goal.starts_with(&path.title));
    }

    #[test]
    fn test_default_title_when_goal_missing() {
        let path = assemble_skillpath(vec![], vec![], &profile("  ", &[], &[]), 5);
        assert_eq!(path.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_summary_reports_profile_counts() {
        let path = assemble_skillpath(vec![], vec![], &profile("", &["a", "b"], &["c"]), 5);
        assert!(path.summary.contains("2 competences"));
        assert!(path.summary.contains("1 interests"));
    }

    #[test]
    fn test_match_reason_lists_first_two_competences() {
        let formations = vec![(
            formation(1, "Python and SQL", Some("also docker and react")),
            0.9,
        )];
        let p = profile("", &["python", "sql", "docker"], &[]);
        let path = assemble_skillpath(formations, vec![], &p, 5);

        let reason = &path.recommended_formations[0].match_reason;
        assert!(reason.contains("python"));
        assert!(reason.contains("sql"));
        assert!(!reason.contains("docker"));
    }

    #[test]
    fn test_job_match_reason_may_be_empty_despite_positive_score() {
        // Score comes from exact requirement matching; the reason re-scan
        // looks at title+description, which never mention the skill.
        let jobs = vec![(job(1, "Platform Engineer", &["kubernetes"]), 1.0)];
        let path = assemble_skillpath(vec![], jobs, &profile("", &["kubernetes"], &[]), 5);
        // "kubernetes" is not in "Platform Engineer"
        assert_eq!(path.recommended_jobs[0].match_reason, "");
        assert!(path.recommended_jobs[0].score > 0.0);
    }

    #[test]
    fn test_scores_rounded_to_two_decimals() {
        let formations = vec![(formation(1, "F", None), 2.0 / 3.0)];
        let path = assemble_skillpath(formations, vec![], &profile("", &[], &[]), 5);
        assert_eq!(path.recommended_formations[0].score, 0.67);
    }
}
