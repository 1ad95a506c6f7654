// Triage engine
//
// Single entry point for presentation layers: detect -> aggregate -> select,
// with an optional generative collaborator behind the safety floor.

use rand::Rng;
use serde::Serialize;

use super::aggregator;
use super::category::Category;
use super::detector::{DetectedSet, Detector};
use super::lexicon::Lexicon;
use super::selector::{self, ReplySource, Selection};
use super::session::{Session, SessionSnapshot, Speaker, Turn};
use super::severity::RiskLevel;
use crate::errors::TriageError;
use crate::providers::{GenerationRequest, ReplyGenerator};

/// Result of processing one utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnOutcome {
    pub detected: DetectedSet,
    pub score: u32,
    pub level: RiskLevel,
    pub reply: String,
    pub reply_source: ReplySource,
    pub crisis_banner: Option<&'static str>,

    /// The generator was consulted and its output was discarded
    #[serde(skip)]
    pub generator_fallback: bool,
}

impl TurnOutcome {
    fn new(detected: DetectedSet, session: &Session, selection: Selection) -> Self {
        Self {
            detected,
            score: session.score(),
            level: session.risk_level(),
            reply: selection.reply,
            reply_source: selection.source,
            crisis_banner: selection.crisis_banner,
            generator_fallback: false,
        }
    }
}

/// Stateless triage pipeline shared by every session
#[derive(Debug, Clone)]
pub struct TriageEngine {
    detector: Detector,
}

impl TriageEngine {
    /// Compile and validate the lexicon. Fails fast on any bad table entry.
    pub fn new() -> Result<Self, TriageError> {
        Ok(Self::with_lexicon(Lexicon::compile()?))
    }

    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self {
            detector: Detector::new(lexicon),
        }
    }

    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    /// Process one utterance with template replies only
    pub fn process_turn<R: Rng + ?Sized>(
        &self,
        session: &mut Session,
        utterance: &str,
        rng: &mut R,
    ) -> TurnOutcome {
        let detected = self.analyze(session, utterance);
        let selection = selector::select(utterance, &detected, session, rng);
        self.finish(session, detected, selection)
    }

    /// Process one utterance, consulting `generator` for non-crisis turns.
    ///
    /// Generator errors and degenerate output are logged and replaced by a
    /// template; they never reach the caller.
    pub async fn process_turn_with<R: Rng + Send + ?Sized>(
        &self,
        session: &mut Session,
        utterance: &str,
        generator: &dyn ReplyGenerator,
        rng: &mut R,
    ) -> TurnOutcome {
        let request = GenerationRequest::new(session.transcript().to_vec(), utterance);
        let detected = self.analyze(session, utterance);

        let mut generator_fallback = false;
        let generated = if detected.contains(&Category::SuicidalIdeation) {
            tracing::info!(
                generator = generator.name(),
                "Suicidal ideation detected; generator skipped"
            );
            None
        } else {
            match generator.generate(&request).await {
                Ok(text) if !selector::is_degenerate(&text) => Some(text),
                Ok(_) => {
                    tracing::warn!(
                        generator = generator.name(),
                        "Generator returned an empty reply; using template"
                    );
                    generator_fallback = true;
                    None
                }
                Err(e) => {
                    let failure = TriageError::GeneratorFailure(format!("{:#}", e));
                    tracing::warn!(generator = generator.name(), "{}; using template", failure);
                    generator_fallback = true;
                    None
                }
            }
        };

        let selection = selector::guard_generated(generated, utterance, &detected, session, rng);
        let mut outcome = self.finish(session, detected, selection);
        outcome.generator_fallback = generator_fallback;
        outcome
    }

    /// Discard `session` and hand back a fresh one
    pub fn reset(&self, session: Session) -> Session {
        tracing::info!(turns = session.turn_count(), "Session reset");
        drop(session);
        Session::new()
    }

    pub fn snapshot(&self, session: &Session) -> SessionSnapshot {
        session.snapshot()
    }

    /// Rebuild counts, score and level from a recorded transcript.
    ///
    /// Assistant turns are copied through; only user turns are analyzed.
    pub fn replay(&self, transcript: &[Turn]) -> SessionSnapshot {
        let mut scratch = Session::new();
        for turn in transcript {
            match turn.speaker {
                Speaker::User => {
                    self.analyze(&mut scratch, &turn.text);
                }
                Speaker::Assistant => scratch.record_assistant(&turn.text),
            }
        }
        scratch.snapshot()
    }

    /// Record the utterance, then run detector and aggregator
    fn analyze(&self, session: &mut Session, utterance: &str) -> DetectedSet {
        session.record_user(utterance);
        let detected = self.detector.detect(utterance, session);
        aggregator::recompute(session);
        detected
    }

    fn finish(&self, session: &mut Session, detected: DetectedSet, selection: Selection) -> TurnOutcome {
        session.record_assistant(&selection.reply);

        tracing::info!(
            turn = session.turn_count(),
            score = session.score(),
            level = %session.risk_level(),
            detected = detected.len(),
            "Turn processed"
        );

        TurnOutcome::new(detected, session, selection)
    }
}
