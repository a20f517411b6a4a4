//! Prompt construction for the skillpath generation call.
//!
//! The rendered prompt is the closed contract with the model: it names the
//! exact output schema and forbids prose outside the JSON object. The
//! sanitizer is the defense against its violation.

use serde_json::{json, Value};

use crate::models::candidate::UserProfile;
use crate::models::skillpath::ResourceKind;

/// Candidates embedded in the prompt are capped to bound token cost.
pub const MAX_PROMPT_CANDIDATES: usize = 30;
/// Each candidate description is clipped to this many characters.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// A candidate flattened to the shape the prompt embeds.
#[derive(Debug, Clone)]
pub struct PromptCandidate {
    pub id: i32,
    pub kind: ResourceKind,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
}

/// Skillpath generation prompt.
/// Replace: `{user_profile_json}`, `{candidates_json}`.
const SKILLPATH_PROMPT_TEMPLATE: &str = r#"System: You are an assistant that outputs ONLY valid JSON.

User: Given the following user inputs and candidate items, produce a single JSON object representing an AI-generated "skillpath" (a practical roadmap for the user). Do not include any extra text, commentary, or explanation — ONLY JSON.

User profile:
{user_profile_json}

Candidates:
{candidates_json}

Task:
- Produce JSON with this schema:
{
  "title": "<compact 5-8 word title>",
  "summary": "<1-2 sentence summary>",
  "steps": [
    {
      "id": "step-1",
      "title": "short title",
      "duration_weeks": 1-12,
      "progress_estimate": "text (e.g., 'beginner->intermediate')",
      "resources": [
        {"type":"formation"|"job"|"external", "id": <int or null>, "title": "<title or null>", "url": "<if external or null>", "score": 0.0-1.0}
      ],
      "explanation": "<<=20 words>"
    },
    ...
  ],
  "recommended_jobs": [{"id":int,"title":"", "score":0.0-1.0, "match_reason":"<=20 words"}],
  "recommended_formations": [{"id":int,"title":"", "score":0.0-1.0, "match_reason":"<=20 words"}]
}

Rules:
1) Return only JSON that strictly follows the schema.
2) Use IDs from Candidates when referencing formations/jobs. If you add external resources, set id=null and provide URL.
3) Use scores between 0.0 and 1.0.
4) Steps should be 3-7 items long, ordered sequentially.
5) Keep fields concise.
6) If unsure, return an empty array rather than text.

End."#;

/// Renders the generation prompt for one request.
///
/// Pure function of its inputs: identical profile and candidates always
/// produce the identical string.
pub fn build_skillpath_prompt(profile: &UserProfile, candidates: &[PromptCandidate]) -> String {
    let profile_json = json!({
        "goal": profile.goal,
        "competences": profile.competences,
        "interests": profile.interests,
    });

    let candidates_json = Value::Array(
        candidates
            .iter()
            .take(MAX_PROMPT_CANDIDATES)
            .map(|c| {
                json!({
                    "id": c.id,
                    "type": c.kind,
                    "title": c.title,
                    "description": c.description.chars().take(MAX_DESCRIPTION_CHARS).collect::<String>(),
                    "skills": c.skills,
                })
            })
            .collect(),
    );

    SKILLPATH_PROMPT_TEMPLATE
        .replace("{user_profile_json}", &profile_json.to_string())
        .replace("{candidates_json}", &candidates_json.to_string())
}
