// Symptom detector

use std::collections::BTreeSet;

use super::category::Category;
use super::lexicon::Lexicon;
use super::session::Session;

/// Categories detected in one utterance, ordered most urgent first
pub type DetectedSet = BTreeSet<Category>;

#[derive(Debug, Clone)]
pub struct Detector {
    lexicon: Lexicon,
}

impl Detector {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Scan an utterance without touching any session.
    ///
    /// A category is present when any of its patterns matches; further
    /// matching patterns of the same category are not consulted.
    pub fn scan(&self, utterance: &str) -> DetectedSet {
        let mut detected = DetectedSet::new();
        if utterance.trim().is_empty() {
            return detected;
        }

        let lowered = utterance.to_lowercase();
        for entry in self.lexicon.entries() {
            if let Some(pattern) = entry.first_match(&lowered) {
                tracing::debug!(
                    category = %entry.category,
                    pattern = pattern.as_str(),
                    "Symptom pattern matched"
                );
                detected.insert(entry.category);
            }
        }

        detected
    }

    /// Scan an utterance and add one mention per detected category to the
    /// session's counts. Score and level are left to the aggregator.
    pub fn detect(&self, utterance: &str, session: &mut Session) -> DetectedSet {
        let detected = self.scan(utterance);
        let counts = session.counts_mut();
        for &category in &detected {
            counts.increment(category);
        }
        detected
    }
}
