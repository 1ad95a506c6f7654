// Mental-health triage core
//
// Detects symptom categories in each utterance, keeps a capped weighted
// severity score per session, and picks a reply from curated template banks
// in severity order.

pub mod aggregator;
pub mod category;
pub mod detector;
pub mod engine;
pub mod lexicon;
pub mod selector;
pub mod session;
pub mod severity;
pub mod templates;

pub use category::{Category, CategorySpec, CATEGORY_TABLE};
pub use detector::{DetectedSet, Detector};
pub use engine::{TriageEngine, TurnOutcome};
pub use lexicon::Lexicon;
pub use selector::{ReplySource, Selection};
pub use session::{Session, SessionPhase, SessionSnapshot, Speaker, SymptomCounts, Turn};
pub use severity::RiskLevel;
