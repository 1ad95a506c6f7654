// Risk aggregator
//
// Pure function of the session's counts and the fixed weights; replaying a
// count snapshot always reproduces the same score and level.

use super::session::Session;
use super::severity::{self, RiskLevel};

/// Recompute score and level from the session's counts and store them.
pub fn recompute(session: &mut Session) -> (u32, RiskLevel) {
    let previous = session.risk_level();
    let score = severity::score_counts(session.counts());
    let level = severity::classify(score, session.counts());

    session.set_risk(score, level);

    if level > previous {
        if level == RiskLevel::Critical {
            tracing::warn!(score, from = %previous, "Session risk escalated to critical");
        } else {
            tracing::info!(score, from = %previous, to = %level, "Session risk escalated");
        }
    }

    (score, level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::Category;

    #[test]
    fn test_recompute_writes_back() {
        let mut session = Session::new();
        session.counts_mut().increment(Category::Depression);
        session.counts_mut().increment(Category::Depression);

        let (score, level) = recompute(&mut session);

        assert_eq!((score, level), (12, RiskLevel::Moderate));
        assert_eq!(session.score(), 12);
        assert_eq!(session.risk_level(), RiskLevel::Moderate);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut session = Session::new();
        session.counts_mut().increment(Category::Trauma);
        let first = recompute(&mut session);
        let second = recompute(&mut session);
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_suicidal_mention_is_critical() {
        let mut session = Session::new();
        session.counts_mut().increment(Category::SuicidalIdeation);
        let (score, level) = recompute(&mut session);
        assert_eq!(score, 10);
        assert_eq!(level, RiskLevel::Critical);
    }
}
