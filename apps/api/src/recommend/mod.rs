// Recommendation core: keyword scoring, skillpath assembly, prompt
// construction, AI-output sanitization, and the orchestrator that ties them
// together. All provider calls go through ai_client — nothing here talks to
// the network directly.

pub mod assembler;
pub mod handlers;
pub mod prompts;
pub mod recommender;
pub mod sanitize;
pub mod scoring;
