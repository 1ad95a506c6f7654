// Conversation session state
//
// A Session is owned by exactly one conversation and threaded explicitly
// through every engine call. Only the detector touches counts and only the
// aggregator touches score and level.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::category::Category;
use super::severity::RiskLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Assistant => "assistant",
        }
    }
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }
}

/// Cumulative per-category mention counts; only ever incremented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymptomCounts {
    counts: [u32; Category::COUNT],
}

impl SymptomCounts {
    pub fn get(&self, category: Category) -> u32 {
        self.counts[category.index()]
    }

    pub(crate) fn increment(&mut self, category: Category) {
        let slot = &mut self.counts[category.index()];
        *slot = slot.saturating_add(1);
    }

    /// Categories with a non-zero count, most urgent first
    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::BY_SEVERITY
            .into_iter()
            .map(move |c| (c, self.get(c)))
            .filter(|&(_, n)| n > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&n| n == 0)
    }

    pub fn to_map(&self) -> BTreeMap<Category, u32> {
        self.iter().collect()
    }
}

/// Lifecycle phase; reset is the only way back to Empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Empty,
    Active,
}

/// Aggregate root for one conversation
#[derive(Debug, Clone, Default)]
pub struct Session {
    transcript: Vec<Turn>,
    counts: SymptomCounts,
    score: u32,
    level: RiskLevel,
    turn_count: u32,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn counts(&self) -> &SymptomCounts {
        &self.counts
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.level
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn phase(&self) -> SessionPhase {
        if self.turn_count == 0 {
            SessionPhase::Empty
        } else {
            SessionPhase::Active
        }
    }

    /// Replace every field with its initial value in one assignment
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Read-only view for displays
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            transcript: self.transcript.clone(),
            counts: self.counts.to_map(),
            score: self.score,
            level: self.level,
            turn_count: self.turn_count,
        }
    }

    pub(crate) fn counts_mut(&mut self) -> &mut SymptomCounts {
        &mut self.counts
    }

    pub(crate) fn set_risk(&mut self, score: u32, level: RiskLevel) {
        self.score = score;
        self.level = level;
    }

    pub(crate) fn record_user(&mut self, text: &str) {
        self.transcript.push(Turn::user(text));
        self.turn_count += 1;
    }

    pub(crate) fn record_assistant(&mut self, text: &str) {
        self.transcript.push(Turn::assistant(text));
    }
}

/// Serializable copy of a session for sidebars, APIs and replay checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub transcript: Vec<Turn>,
    pub counts: BTreeMap<Category, u32>,
    pub score: u32,
    pub level: RiskLevel,
    pub turn_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new();
        assert_eq!(session.phase(), SessionPhase::Empty);
        assert!(session.counts().is_empty());
        assert_eq!(session.score(), 0);
        assert_eq!(session.risk_level(), RiskLevel::Low);
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = Session::new();
        session.record_user("I feel sad");
        session.counts_mut().increment(Category::Depression);
        session.set_risk(6, RiskLevel::Low);
        session.record_assistant("I hear you");
        assert_eq!(session.phase(), SessionPhase::Active);

        session.reset();
        assert_eq!(session.snapshot(), Session::new().snapshot());
    }

    #[test]
    fn test_counts_iterate_by_severity() {
        let mut counts = SymptomCounts::default();
        counts.increment(Category::Stress);
        counts.increment(Category::Trauma);
        counts.increment(Category::Stress);
        let seen: Vec<_> = counts.iter().collect();
        assert_eq!(seen, vec![(Category::Trauma, 1), (Category::Stress, 2)]);
    }

    #[test]
    fn test_snapshot_serializes_counts_by_name() {
        let mut session = Session::new();
        session.counts_mut().increment(Category::SelfHarm);
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["counts"]["self_harm"], 1);
        assert_eq!(json["level"], "low");
    }
}
