//! AI Gateway — the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: no other module may call the provider directly.
//! One bounded-timeout attempt per request, no retry: any failure here is
//! converted by the orchestrator into a keyword fallback.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod payload;

use payload::{AiRecommendation, AiResource, AiSkillpath, AiStep};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// The four ways the AI path can fail. All of them are caught by the
/// orchestrator and turned into a keyword fallback; none reach the caller.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("GEMINI_API_KEY not configured")]
    Configuration,

    #[error("Gemini API request timeout after {0}s")]
    Timeout(u64),

    #[error("Gemini API error: {0}")]
    Upstream(String),

    #[error("failed to parse AI payload: {0}")]
    Parse(String),
}

/// Anything that can turn a prompt into a parsed skillpath payload.
///
/// Carried in `AppState` as `Arc<dyn SkillpathGenerator>` so orchestrator
/// tests can substitute canned or failing generators.
#[async_trait]
pub trait SkillpathGenerator: Send + Sync {
    async fn generate_skillpath(&self, prompt: &str) -> Result<AiSkillpath, AiError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (Gemini generateContent)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

impl GeminiResponse {
    /// Extracts the answer text from the first candidate's first part.
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The Gemini client used by the recommendation orchestrator.
#[derive(Clone)]
pub struct AiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    mock_mode: bool,
    timeout_secs: u64,
}

impl AiClient {
    pub fn new(api_key: Option<String>, model: String, mock_mode: bool, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            model,
            mock_mode,
            timeout_secs,
        }
    }
}

#[async_trait]
impl SkillpathGenerator for AiClient {
    /// Sends the prompt to Gemini and parses the skillpath payload out of
    /// the free-form answer text. Single attempt; the credential is checked
    /// before any network traffic.
    async fn generate_skillpath(&self, prompt: &str) -> Result<AiSkillpath, AiError> {
        if self.mock_mode {
            debug!("MOCK_MODE enabled: returning canned skillpath payload");
            return Ok(mock_skillpath());
        }

        let api_key = self.api_key.as_deref().ok_or(AiError::Configuration)?;

        let request_body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
        };

        let url = format!(
            "{GEMINI_API_BASE}/{}:generateContent?key={api_key}",
            self.model
        );

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout(self.timeout_secs)
                } else {
                    AiError::Upstream(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Upstream(format!("status {status}: {body}")));
        }

        let gemini: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AiError::Parse(format!("malformed provider response: {e}")))?;

        let text = gemini
            .text()
            .ok_or_else(|| AiError::Parse("provider response contained no candidates".to_string()))?;

        debug!("Gemini answered with {} chars", text.len());

        parse_skillpath_payload(text)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Payload extraction
// ────────────────────────────────────────────────────────────────────────────

/// Parses the skillpath JSON out of free-form model output.
///
/// Strict parse after fence stripping; if that fails, best-effort recovery on
/// the first `{` .. last `}` substring.
pub fn parse_skillpath_payload(text: &str) -> Result<AiSkillpath, AiError> {
    let cleaned = strip_code_fences(text);

    match serde_json::from_str::<AiSkillpath>(&cleaned) {
        Ok(payload) => Ok(payload),
        Err(strict_err) => {
            let start = cleaned.find('{');
            let end = cleaned.rfind('}');
            match (start, end) {
                (Some(s), Some(e)) if e > s => serde_json::from_str(&cleaned[s..=e])
                    .map_err(|e| AiError::Parse(e.to_string())),
                _ => Err(AiError::Parse(format!(
                    "no JSON object found in response: {strict_err}"
                ))),
            }
        }
    }
}

/// Strips a markdown code fence wrapping the answer, if present.
///
/// Removes the first line; removes the last line too only when it is itself
/// a fence marker.
fn strip_code_fences(text: &str) -> String {
    let text = text.trim();
    if !text.starts_with("```") {
        return text.to_string();
    }

    let lines: Vec<&str> = text.lines().collect();
    let closed = lines.len() > 1 && lines.last().map_or(false, |l| l.starts_with("```"));
    let body = if closed {
        &lines[1..lines.len() - 1]
    } else {
        &lines[1..]
    };
    body.join("\n")
}

// ────────────────────────────────────────────────────────────────────────────
// Offline deterministic payload
// ────────────────────────────────────────────────────────────────────────────

/// Fixed canned payload matching the real schema, for `MOCK_MODE` runs and
/// reproducible tests without network access.
fn mock_skillpath() -> AiSkillpath {
    AiSkillpath {
        title: Some("Become Backend Developer".to_string()),
        summary: Some(
            "A structured path to master backend development with Python and SQL.".to_string(),
        ),
        steps: vec![
            AiStep {
                id: Some("step-1".to_string()),
                title: Some("Learn Python basics".to_string()),
                duration_weeks: Some(2),
                progress_estimate: Some("beginner->intermediate".to_string()),
                resources: vec![
                    AiResource {
                        kind: "formation".to_string(),
                        id: Some(1),
                        title: Some("Python Fundamentals".to_string()),
                        url: None,
                        score: Some(0.9),
                    },
                    AiResource {
                        kind: "external".to_string(),
                        id: None,
                        title: Some("Python Official Docs".to_string()),
                        url: Some("https://docs.python.org".to_string()),
                        score: Some(0.8),
                    },
                ],
                explanation: Some("Master Python fundamentals before moving to frameworks".to_string()),
            },
            AiStep {
                id: Some("step-2".to_string()),
                title: Some("Build backend services".to_string()),
                duration_weeks: Some(3),
                progress_estimate: Some("intermediate->advanced".to_string()),
                resources: vec![AiResource {
                    kind: "formation".to_string(),
                    id: Some(2),
                    title: Some("Web APIs for Beginners".to_string()),
                    url: None,
                    score: Some(0.95),
                }],
                explanation: Some("Build REST APIs backed by a relational database".to_string()),
            },
        ],
        recommended_jobs: vec![AiRecommendation {
            id: Some(1),
            title: Some("Backend Developer".to_string()),
            score: Some(0.95),
            match_reason: Some("Perfect match for Python backend skills".to_string()),
        }],
        recommended_formations: vec![AiRecommendation {
            id: Some(1),
            title: Some("Python Fundamentals".to_string()),
            score: Some(0.9),
            match_reason: Some("Essential foundation for backend development".to_string()),
        }],
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
