// Configuration structs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Fixes template choice for reproducible sessions
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Defaults plus a single enabled OpenAI generator
    pub fn with_openai_key(api_key: String) -> Self {
        Self {
            generator: GeneratorConfig {
                enabled: true,
                providers: vec![ProviderEntry {
                    provider: "openai".to_string(),
                    api_key: Some(api_key),
                    model: None,
                    base_url: None,
                }],
                ..GeneratorConfig::default()
            },
            ..Self::default()
        }
    }
}

/// Settings for the optional generative collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub enabled: bool,

    /// Sampling temperature (default: 0.8)
    pub temperature: f32,

    /// Nucleus sampling cutoff (default: 0.92)
    pub top_p: f32,

    /// Upper bound on generated tokens (default: 150)
    pub max_tokens: u32,

    /// Request timeout in seconds (default: 60)
    pub timeout_secs: u64,

    /// Most recent transcript turns sent as context
    pub history_turns: usize,

    /// Providers in fallback order
    pub providers: Vec<ProviderEntry>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            temperature: 0.8,
            top_p: 0.92,
            max_tokens: 150,
            timeout_secs: 60,
            history_turns: 20,
            providers: vec![],
        }
    }
}

/// One `[[generator.providers]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEntry {
    /// openai | ollama | custom
    pub provider: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Configuration for the HTTP server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8787")
    pub bind_address: String,
    /// Maximum number of concurrent sessions
    pub max_sessions: usize,
    /// Idle session timeout in minutes
    pub session_timeout_minutes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8787".to_string(),
            max_sessions: 100,
            session_timeout_minutes: 30,
        }
    }
}
