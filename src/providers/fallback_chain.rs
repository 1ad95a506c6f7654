// Fallback chain for automatic generator retry
//
// Tries generators in priority order until one returns usable text

use anyhow::Result;
use async_trait::async_trait;

use super::{GenerationRequest, ReplyGenerator};
use crate::triage::selector::is_degenerate;

/// A chain of generators to try in order
pub struct FallbackChain {
    generators: Vec<Box<dyn ReplyGenerator>>,
}

impl FallbackChain {
    /// Create a new fallback chain with generators in priority order
    pub fn new(generators: Vec<Box<dyn ReplyGenerator>>) -> Self {
        Self { generators }
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Get the primary generator (first in chain)
    pub fn primary(&self) -> Option<&dyn ReplyGenerator> {
        self.generators.first().map(|g| g.as_ref())
    }

    /// Try generating with automatic fallback.
    ///
    /// Empty or degenerate text counts as a failure so the next generator
    /// gets a chance.
    pub async fn generate_with_fallback(&self, request: &GenerationRequest) -> Result<String> {
        let mut last_error = None;

        for (idx, generator) in self.generators.iter().enumerate() {
            tracing::debug!(
                "Trying generator {} ({}/{})",
                generator.name(),
                idx + 1,
                self.generators.len()
            );

            match generator.generate(request).await {
                Ok(text) if !is_degenerate(&text) => {
                    if idx > 0 {
                        tracing::info!(
                            "Generator {} succeeded after {} failed attempts",
                            generator.name(),
                            idx
                        );
                    }
                    return Ok(text);
                }
                Ok(_) => {
                    tracing::warn!(
                        "Generator {} returned an empty reply (attempt {}/{})",
                        generator.name(),
                        idx + 1,
                        self.generators.len()
                    );
                    last_error = Some(anyhow::anyhow!(
                        "Generator {} returned an empty reply",
                        generator.name()
                    ));
                }
                Err(e) => {
                    tracing::warn!(
                        "Generator {} failed (attempt {}/{}): {}",
                        generator.name(),
                        idx + 1,
                        self.generators.len(),
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| anyhow::anyhow!("No generators available"))
            .context("All fallback generators failed"))
    }
}

#[async_trait]
impl ReplyGenerator for FallbackChain {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.generate_with_fallback(request).await
    }

    fn name(&self) -> &str {
        self.primary().map(|g| g.name()).unwrap_or("FallbackChain")
    }

    fn default_model(&self) -> &str {
        self.primary()
            .map(|g| g.default_model())
            .unwrap_or("default")
    }
}
