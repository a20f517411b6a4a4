//! Response Validator/Sanitizer — allowlist filtering of the AI payload.
//!
//! Resource references proposed by the model are kept only when their id
//! resolves in the real candidate universe; external resources pass through.
//! Dropping is expected, not exceptional: no re-scoring, no re-ordering,
//! no type coercion happens here.

use std::collections::HashSet;

use crate::ai_client::payload::{AiRecommendation, AiSkillpath};
use crate::models::skillpath::{RecommendedItem, ResourceKind, ResourceRef, Skillpath, Step};

/// Title used when the model omitted one.
const FALLBACK_TITLE: &str = "AI-generated skillpath";

/// Filters the AI-proposed skillpath down to resources that exist in the
/// candidate universe and converts it into the canonical `Skillpath`.
pub fn sanitize_skillpath(
    payload: AiSkillpath,
    valid_formation_ids: &HashSet<i32>,
    valid_job_ids: &HashSet<i32>,
) -> Skillpath {
    let steps = payload
        .steps
        .into_iter()
        .enumerate()
        .map(|(idx, step)| {
            let resources = step
                .resources
                .into_iter()
                .filter_map(|r| {
                    let kind = match r.kind.as_str() {
                        "formation" if r.id.is_some_and(|id| valid_formation_ids.contains(&id)) => {
                            ResourceKind::Formation
                        }
                        "job" if r.id.is_some_and(|id| valid_job_ids.contains(&id)) => {
                            ResourceKind::Job
                        }
                        "external" => ResourceKind::External,
                        // unresolvable id or a type outside the schema
                        _ => return None,
                    };
                    Some(ResourceRef {
                        kind,
                        // external resources never carry an id
                        id: if kind == ResourceKind::External { None } else { r.id },
                        title: r.title,
                        url: r.url,
                        score: r.score.unwrap_or(0.0),
                    })
                })
                .collect();

            Step {
                id: step.id.unwrap_or_else(|| format!("step-{}", idx + 1)),
                title: step.title.unwrap_or_default(),
                duration_weeks: step.duration_weeks.unwrap_or(1),
                progress_estimate: step.progress_estimate.unwrap_or_default(),
                resources,
                explanation: step.explanation.unwrap_or_default(),
            }
        })
        .collect();

    Skillpath {
        title: payload
            .title
            .unwrap_or_else(|| FALLBACK_TITLE.to_string()),
        summary: payload.summary.unwrap_or_default(),
        steps,
        recommended_jobs: sanitize_recommendations(payload.recommended_jobs, valid_job_ids),
        recommended_formations: sanitize_recommendations(
            payload.recommended_formations,
            valid_formation_ids,
        ),
    }
}

/// Membership filter for the top-level recommended lists, keyed by id only
/// (the kind is implied by which list the item sits in).
fn sanitize_recommendations(
    items: Vec<AiRecommendation>,
    valid_ids: &HashSet<i32>,
) -> Vec<RecommendedItem> {
    items
        .into_iter()
        .filter_map(|item| {
            let id = item.id.filter(|id| valid_ids.contains(id))?;
            Some(RecommendedItem {
                id,
                title: item.title.unwrap_or_default(),
                score: item.score.unwrap_or(0.0),
                match_reason: item.match_reason.unwrap_or_default(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai_client::payload::{AiResource, AiStep};

    fn resource(kind: &str, id: Option<i32>) -> AiResource {
        AiResource {
            kind: kind.to_string(),
            id,
            title: Some("r".to_string()),
            url: None,
            score: Some(0.5),
        }
    }

    fn payload_with_resources(resources: Vec<AiResource>) -> AiSkillpath {
        AiSkillpath {
            title: Some("Path".to_string()),
            summary: Some("s".to_string()),
            steps: vec![AiStep {
                id: Some("step-1".to_string()),
                title: Some("Step".to_string()),
                duration_weeks: Some(2),
                progress_estimate: Some("beginner->intermediate".to_string()),
                resources,
                explanation: Some("e".to_string()),
            }],
            recommended_jobs: vec![],
            recommended_formations: vec![],
        }
    }

    fn ids(values: &[i32]) -> HashSet<i32> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_unknown_formation_id_is_dropped_valid_ones_remain() {
        let payload = payload_with_resources(vec![
            resource("formation", Some(1)),
            resource("formation", Some(999)),
        ]);
        let path = sanitize_skillpath(payload, &ids(&[1, 2]), &ids(&[]));

        let step = &path.steps[0];
        assert_eq!(step.resources.len(), 1);
        assert_eq!(step.resources[0].id, Some(1));
    }

    #[test]
    fn test_job_id_not_valid_as_formation() {
        // id 5 exists only among jobs; a "formation" reference to it drops
        let payload = payload_with_resources(vec![resource("formation", Some(5))]);
        let path = sanitize_skillpath(payload, &ids(&[]), &ids(&[5]));
        assert!(path.steps[0].resources.is_empty());
    }

    #[test]
    fn test_external_resources_pass_through_unconditionally() {
        let mut external = resource("external", None);
        external.url = Some("https://docs.python.org".to_string());
        let payload = payload_with_resources(vec![external]);
        let path = sanitize_skillpath(payload, &ids(&[]), &ids(&[]));

        let resources = &path.steps[0].resources;
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].kind, ResourceKind::External);
        assert_eq!(resources[0].id, None);
        assert_eq!(resources[0].url.as_deref(), Some("https://docs.python.org"));
    }

    #[test]
    fn test_external_never_keeps_an_id() {
        let payload = payload_with_resources(vec![resource("external", Some(42))]);
        let path = sanitize_skillpath(payload, &ids(&[]), &ids(&[]));
        assert_eq!(path.steps[0].resources[0].id, None);
    }

    #[test]
    fn test_unknown_resource_type_is_dropped_silently() {
        let payload = payload_with_resources(vec![resource("video", Some(1))]);
        let path = sanitize_skillpath(payload, &ids(&[1]), &ids(&[1]));
        assert!(path.steps[0].resources.is_empty());
    }

    #[test]
    fn test_resource_without_id_is_dropped() {
        let payload = payload_with_resources(vec![resource("job", None)]);
        let path = sanitize_skillpath(payload, &ids(&[]), &ids(&[1]));
        assert!(path.steps[0].resources.is_empty());
    }

    #[test]
    fn test_recommended_lists_filtered_by_membership() {
        let payload = AiSkillpath {
            title: None,
            summary: None,
            steps: vec![],
            recommended_jobs: vec![
                AiRecommendation {
                    id: Some(1),
                    title: Some("Backend Developer".to_string()),
                    score: Some(0.9),
                    match_reason: Some("fits".to_string()),
                },
                AiRecommendation {
                    id: Some(77),
                    title: Some("Ghost Job".to_string()),
                    score: Some(0.8),
                    match_reason: None,
                },
            ],
            recommended_formations: vec![AiRecommendation {
                id: None,
                title: Some("No Id".to_string()),
                score: None,
                match_reason: None,
            }],
        };
        let path = sanitize_skillpath(payload, &ids(&[3]), &ids(&[1]));

        assert_eq!(path.recommended_jobs.len(), 1);
        assert_eq!(path.recommended_jobs[0].id, 1);
        assert!(path.recommended_formations.is_empty());
    }

    #[test]
    fn test_order_is_preserved_not_rescored() {
        let payload = payload_with_resources(vec![
            resource("formation", Some(2)),
            resource("formation", Some(1)),
        ]);
        let path = sanitize_skillpath(payload, &ids(&[1, 2]), &ids(&[]));
        let kept: Vec<Option<i32>> = path.steps[0].resources.iter().map(|r| r.id).collect();
        assert_eq!(kept, vec![Some(2), Some(1)]);
    }

    #[test]
    fn test_missing_title_gets_fallback() {
        let payload = AiSkillpath {
            title: None,
            summary: None,
            steps: vec![],
            recommended_jobs: vec![],
            recommended_formations: vec![],
        };
        let path = sanitize_skillpath(payload, &ids(&[]), &ids(&[]));
        assert_eq!(path.title, FALLBACK_TITLE);
    }
}
