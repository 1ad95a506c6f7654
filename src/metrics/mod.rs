// Metrics module
// Prometheus counters for triage activity
//
// Only categories, levels and counts are recorded; utterance text never is.

use anyhow::{Context, Result};
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

use crate::triage::{RiskLevel, TurnOutcome};

pub struct TriageMetrics {
    registry: Registry,
    turns: IntCounter,
    detections: IntCounterVec,
    risk_levels: IntCounterVec,
    generator_fallbacks: IntCounter,
    active_sessions: IntGauge,
}

impl TriageMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let turns = IntCounter::new("mindcare_turns_total", "Utterances processed")?;
        let detections = IntCounterVec::new(
            Opts::new("mindcare_detections_total", "Symptom categories detected"),
            &["category"],
        )?;
        let risk_levels = IntCounterVec::new(
            Opts::new("mindcare_risk_level_total", "Post-turn risk level"),
            &["level"],
        )?;
        let generator_fallbacks = IntCounter::new(
            "mindcare_generator_fallbacks_total",
            "Generated replies replaced by a template",
        )?;
        let active_sessions = IntGauge::new("mindcare_active_sessions", "Sessions currently held")?;

        registry.register(Box::new(turns.clone()))?;
        registry.register(Box::new(detections.clone()))?;
        registry.register(Box::new(risk_levels.clone()))?;
        registry.register(Box::new(generator_fallbacks.clone()))?;
        registry.register(Box::new(active_sessions.clone()))?;

        // Expose every level from the start so dashboards see zeros
        for level in RiskLevel::ALL {
            risk_levels.with_label_values(&[level.as_str()]);
        }

        Ok(Self {
            registry,
            turns,
            detections,
            risk_levels,
            generator_fallbacks,
            active_sessions,
        })
    }

    /// Record one processed turn
    pub fn observe_turn(&self, outcome: &TurnOutcome) {
        self.turns.inc();
        for category in &outcome.detected {
            self.detections.with_label_values(&[category.as_str()]).inc();
        }
        self.risk_levels
            .with_label_values(&[outcome.level.as_str()])
            .inc();
        if outcome.generator_fallback {
            self.generator_fallbacks.inc();
        }
    }

    pub fn set_active_sessions(&self, count: usize) {
        self.active_sessions.set(count as i64);
    }

    pub fn turns_total(&self) -> u64 {
        self.turns.get()
    }

    /// Text exposition format
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .context("Failed to encode metrics")?;
        String::from_utf8(buffer).context("Metrics output was not UTF-8")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::{Session, TriageEngine};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_observe_turn_counts() {
        let metrics = TriageMetrics::new().unwrap();
        let engine = TriageEngine::new().unwrap();
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = engine.process_turn(&mut session, "I feel hopeless", &mut rng);
        metrics.observe_turn(&outcome);
        metrics.set_active_sessions(1);

        assert_eq!(metrics.turns_total(), 1);
        let text = metrics.render().unwrap();
        assert!(text.contains("mindcare_detections_total{category=\"depression\"} 1"));
        assert!(text.contains("mindcare_risk_level_total{level=\"low\"} 1"));
        assert!(text.contains("mindcare_risk_level_total{level=\"critical\"} 0"));
        assert!(text.contains("mindcare_active_sessions 1"));
    }
}
