// Generative reply collaborators
//
// The triage engine never depends on a generator being present or healthy.
// Anything implementing ReplyGenerator may be consulted for non-crisis
// turns; its output always passes through the selector's safety floor.

use anyhow::Result;
use async_trait::async_trait;

pub mod types;

// Generator implementations
pub mod fallback_chain;
pub mod openai;

// Generator factory
pub mod factory;

pub use factory::create_generator;
pub use fallback_chain::FallbackChain;
pub use openai::OpenAiCompatibleGenerator;
pub use types::GenerationRequest;

/// Trait for reply generators
///
/// Implementations may fail or return empty text; callers treat the result
/// as untrusted.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Produce a reply for the new utterance given the prior turns
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// Provider name (e.g., "openai", "ollama")
    fn name(&self) -> &str;

    /// Model identifier used for requests
    fn default_model(&self) -> &str;
}
