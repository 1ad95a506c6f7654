// Error taxonomy and user-friendly error messages
//
// TriageError covers the typed failures of the engine and the session layer.
// The helpers below turn plumbing errors into actionable CLI messages.
// Nothing here is ever shown inside a conversation reply.

use anyhow::{Context, Result};
use std::fmt;
use thiserror::Error;

use crate::triage::Category;

#[derive(Error, Debug)]
pub enum TriageError {
    /// A lexicon pattern failed to compile; the engine must not start
    #[error("Pattern for category '{category}' failed to compile: {pattern}")]
    PatternCompile {
        category: Category,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The registration table is missing or contradicts an entry
    #[error("Category registry is incomplete: {0}")]
    IncompleteRegistry(String),

    /// The generative collaborator failed or produced degenerate output.
    /// Always recovered locally by the template path.
    #[error("Reply generator failed: {0}")]
    GeneratorFailure(String),

    /// A reset was attempted while a turn was still being processed
    #[error("Session {session_id} cannot be reset while a turn is in progress")]
    InvalidReset { session_id: String },

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Maximum session limit reached ({active}/{max})")]
    SessionLimit { active: usize, max: usize },
}

/// Wrap an error with user-friendly context
pub trait UserFriendlyError {
    /// Add user-friendly context with a suggestion
    fn user_context_with_suggestion(self, problem: &str, suggestion: &str) -> Self;
}

impl<T> UserFriendlyError for Result<T> {
    fn user_context_with_suggestion(self, problem: &str, suggestion: &str) -> Self {
        self.with_context(|| format!("{}\n\n\x1b[1;33mSuggestion:\x1b[0m {}", problem, suggestion))
    }
}

/// Format a config parse error with helpful suggestions
pub fn config_parse_error(path: &str, error: &str) -> String {
    format!(
        "Failed to parse config file {}\n\n\
        \x1b[1;33mError:\x1b[0m {}\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Check config file syntax:\n\
           \x1b[36mcat {}\x1b[0m\n\n\
        2. Common mistakes:\n\
           • Missing quotes around strings\n\
           • [[generator.providers]] entries without a provider field\n\
           • Invalid TOML syntax\n\n\
        3. Move the file aside to run in template-only mode:\n\
           \x1b[36mmv {} {}.backup\x1b[0m",
        path, error, path, path, path
    )
}

/// Format an unreachable generator error with helpful suggestions
pub fn generator_unavailable_error(provider: &str, error: &str) -> String {
    format!(
        "Reply generator '{}' could not be configured\n\n\
        \x1b[1;33mError:\x1b[0m {}\n\n\
        \x1b[1;33mPossible causes:\x1b[0m\n\
        • Unknown provider name (expected openai, ollama or custom)\n\
        • custom provider without base_url\n\
        • openai provider without api_key\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Check the [generator] section of ~/.mindcare/config.toml\n\
        2. Set generator.enabled = false to use curated replies only",
        provider, error
    )
}

/// Format a lexicon startup failure
pub fn lexicon_error(error: &TriageError) -> String {
    format!(
        "Symptom lexicon failed validation; refusing to start\n\n\
        \x1b[1;33mError:\x1b[0m {}\n\n\
        This is a build defect, not a configuration problem.",
        error
    )
}

/// Wrap a generic error with suggestions
pub fn wrap_error_with_suggestion(error: impl fmt::Display, suggestion: &str) -> String {
    format!("{}\n\n\x1b[1;33mSuggestion:\x1b[0m {}", error, suggestion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parse_error_mentions_path() {
        let msg = config_parse_error("/tmp/config.toml", "expected `=`");
        assert!(msg.contains("/tmp/config.toml"));
        assert!(msg.contains("expected `=`"));
    }

    #[test]
    fn test_generator_error_suggests_disabling() {
        let msg = generator_unavailable_error("mystery", "Unknown provider");
        assert!(msg.contains("generator.enabled = false"));
    }

    #[test]
    fn test_invalid_reset_message() {
        let err = TriageError::InvalidReset {
            session_id: "abc".to_string(),
        };
        assert!(err.to_string().contains("abc"));
        assert!(err.to_string().contains("in progress"));
    }

    #[test]
    fn test_user_context_with_suggestion() {
        let result: Result<()> = Err(anyhow::anyhow!("boom"));
        let err = result
            .user_context_with_suggestion("Could not start", "check the config")
            .unwrap_err();
        assert!(format!("{:#}", err).contains("check the config"));
    }
}
