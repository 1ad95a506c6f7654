// Response selection policy
//
// Rules, first applicable wins:
//   1. short greeting           -> greeting bank
//   2. positive words, no symptoms -> positive bank
//   3. most urgent detected category -> that category's bank
//   4. otherwise                -> general bank

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::detector::DetectedSet;
use super::session::Session;
use super::severity::RiskLevel;
use super::templates;

const GREETING_TOKENS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
];

const GREETING_MAX_WORDS: usize = 3;

const POSITIVE_WORDS: &[&str] = &[
    "good", "better", "great", "fine", "okay", "ok", "well", "happy", "improving",
];

/// Where a reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "category", rename_all = "snake_case")]
pub enum ReplySource {
    Greeting,
    Positive,
    Symptom(Category),
    General,
    /// Text produced by the generative collaborator and accepted as-is
    Generated,
    /// A category template that replaced generated text
    SafetyOverride(Category),
}

/// A chosen reply plus the crisis banner to show alongside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub reply: String,
    pub source: ReplySource,
    pub crisis_banner: Option<&'static str>,
}

/// Trimmed utterance starts with a greeting token and is at most three words
pub fn is_greeting(utterance: &str) -> bool {
    let lowered = utterance.trim().to_lowercase();
    let starts_with_token = GREETING_TOKENS.iter().any(|token| {
        lowered
            .strip_prefix(token)
            .map(|rest| rest.chars().next().map_or(true, |c| !c.is_alphanumeric()))
            .unwrap_or(false)
    });
    starts_with_token && utterance.split_whitespace().count() <= GREETING_MAX_WORDS
}

/// Utterance contains a positive-affect word
pub fn is_positive(utterance: &str) -> bool {
    utterance
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| POSITIVE_WORDS.contains(&word))
}

/// Generated text that must not reach the user
pub fn is_degenerate(text: &str) -> bool {
    !text.chars().any(char::is_alphanumeric)
}

/// Most urgent category present, in fixed severity order
pub fn most_urgent(detected: &DetectedSet) -> Option<Category> {
    Category::BY_SEVERITY
        .into_iter()
        .find(|category| detected.contains(category))
}

/// Crisis banner for the session's current level
pub fn crisis_banner(session: &Session) -> Option<&'static str> {
    (session.risk_level() == RiskLevel::Critical).then_some(templates::CRISIS_BANNER)
}

/// Uniform choice from a bank; never returns an empty reply
pub fn choose<R: Rng + ?Sized>(bank: &'static [&'static str], rng: &mut R) -> &'static str {
    bank.choose(rng)
        .copied()
        .unwrap_or(templates::LAST_RESORT_REPLY)
}

/// Pick a reply for an utterance whose symptoms have already been detected
pub fn select<R: Rng + ?Sized>(
    utterance: &str,
    detected: &DetectedSet,
    session: &Session,
    rng: &mut R,
) -> Selection {
    let (bank, source) = if is_greeting(utterance) {
        (templates::GREETING, ReplySource::Greeting)
    } else if detected.is_empty() && is_positive(utterance) {
        (templates::POSITIVE, ReplySource::Positive)
    } else if let Some(category) = most_urgent(detected) {
        (category.templates(), ReplySource::Symptom(category))
    } else {
        (templates::GENERAL, ReplySource::General)
    };

    Selection {
        reply: choose(bank, rng).to_string(),
        source,
        crisis_banner: crisis_banner(session),
    }
}

/// Apply the safety floor to generated text.
///
/// Suicidal ideation always gets its fixed template. Failed or degenerate
/// generation falls back to `select`, reporting a category template as a
/// safety override.
pub fn guard_generated<R: Rng + ?Sized>(
    generated: Option<String>,
    utterance: &str,
    detected: &DetectedSet,
    session: &Session,
    rng: &mut R,
) -> Selection {
    if detected.contains(&Category::SuicidalIdeation) {
        return Selection {
            reply: choose(Category::SuicidalIdeation.templates(), rng).to_string(),
            source: ReplySource::SafetyOverride(Category::SuicidalIdeation),
            crisis_banner: crisis_banner(session),
        };
    }

    match generated {
        Some(text) if !is_degenerate(&text) => Selection {
            reply: text.trim().to_string(),
            source: ReplySource::Generated,
            crisis_banner: crisis_banner(session),
        },
        _ => {
            let mut fallback = select(utterance, detected, session, rng);
            if let ReplySource::Symptom(category) = fallback.source {
                fallback.source = ReplySource::SafetyOverride(category);
            }
            fallback
        }
    }
}
