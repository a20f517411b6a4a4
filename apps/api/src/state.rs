use std::sync::Arc;

use crate::ai_client::SkillpathGenerator;
use crate::config::Config;
use crate::store::CandidateStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. Requests share no mutable state: both collaborators are
/// read-only behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Read-only candidate universe. Production: `PgCandidateStore`.
    pub store: Arc<dyn CandidateStore>,
    /// Skillpath generator. Production: `AiClient` (Gemini); tests swap in
    /// deterministic doubles.
    pub ai: Arc<dyn SkillpathGenerator>,
    /// Kept for handlers that need runtime settings (none read it yet).
    #[allow(dead_code)]
    pub config: Config,
}
