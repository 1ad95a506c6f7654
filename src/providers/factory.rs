// Generator factory
//
// Creates reply generators based on configuration

use anyhow::{bail, Context, Result};

use super::openai::OpenAiCompatibleGenerator;
use super::{FallbackChain, ReplyGenerator};
use crate::config::{GeneratorConfig, ProviderEntry};

/// Create the configured generator, or `None` for template-only operation.
///
/// Several providers are wrapped in a FallbackChain in declaration order.
pub fn create_generator(config: &GeneratorConfig) -> Result<Option<Box<dyn ReplyGenerator>>> {
    if !config.enabled || config.providers.is_empty() {
        tracing::info!("Reply generator disabled; using curated templates only");
        return Ok(None);
    }

    let mut generators = config
        .providers
        .iter()
        .map(|entry| {
            create_single(entry, config)
                .with_context(|| format!("Failed to configure provider '{}'", entry.provider))
        })
        .collect::<Result<Vec<_>>>()?;

    if generators.len() == 1 {
        let generator = generators.remove(0);
        tracing::info!(
            provider = generator.name(),
            model = generator.default_model(),
            "Reply generator configured"
        );
        return Ok(Some(generator));
    }

    tracing::info!(count = generators.len(), "Reply generator fallback chain configured");
    Ok(Some(Box::new(FallbackChain::new(generators))))
}

/// Create one generator from a provider entry
pub fn create_single(
    entry: &ProviderEntry,
    settings: &GeneratorConfig,
) -> Result<Box<dyn ReplyGenerator>> {
    let mut generator = match entry.provider.as_str() {
        "openai" => {
            let api_key = entry
                .api_key
                .clone()
                .filter(|k| !k.is_empty())
                .context("openai provider requires api_key")?;
            OpenAiCompatibleGenerator::new_openai(api_key, settings)?
        }
        "ollama" => OpenAiCompatibleGenerator::new_ollama(settings)?,
        "custom" => {
            let base_url = entry
                .base_url
                .clone()
                .context("custom provider requires base_url")?;
            let model = entry
                .model
                .clone()
                .context("custom provider requires model")?;
            OpenAiCompatibleGenerator::new_custom(base_url, model, settings)?
        }
        other => bail!("Unknown provider: {}", other),
    };

    if let Some(model) = &entry.model {
        generator = generator.with_model(model.clone());
    }
    if let Some(base_url) = &entry.base_url {
        generator = generator.with_base_url(base_url.clone());
    }
    if let Some(api_key) = &entry.api_key {
        generator = generator.with_api_key(api_key.clone());
    }

    Ok(Box::new(generator))
}
