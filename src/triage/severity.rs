// Severity model: weighted, saturating score and discrete risk levels

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::session::SymptomCounts;

/// Mentions of one category beyond this add nothing to the score
pub const MENTION_CAP: u32 = 3;

pub const CRITICAL_THRESHOLD: u32 = 25;
pub const HIGH_THRESHOLD: u32 = 15;
pub const MODERATE_THRESHOLD: u32 = 8;

/// Session risk tier, totally ordered low < moderate < high < critical
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Moderate,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    /// Colour marker used by the status display
    pub fn marker(&self) -> &'static str {
        match self {
            RiskLevel::Low => "🟢",
            RiskLevel::Moderate => "🟡",
            RiskLevel::High => "🟠",
            RiskLevel::Critical => "🔴",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score contribution of one category: weight * min(count, cap)
pub fn contribution(category: Category, count: u32) -> u32 {
    category.weight() * count.min(MENTION_CAP)
}

/// Sum of contributions over all categories
pub fn score_counts(counts: &SymptomCounts) -> u32 {
    counts
        .iter()
        .map(|(category, count)| contribution(category, count))
        .sum()
}

/// Map a score to a risk level. First matching rule wins; any suicidal
/// ideation mention forces critical regardless of score.
pub fn classify(score: u32, counts: &SymptomCounts) -> RiskLevel {
    if score >= CRITICAL_THRESHOLD || counts.get(Category::SuicidalIdeation) > 0 {
        RiskLevel::Critical
    } else if score >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if score >= MODERATE_THRESHOLD {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(Category, u32)]) -> SymptomCounts {
        let mut counts = SymptomCounts::default();
        for &(category, n) in pairs {
            for _ in 0..n {
                counts.increment(category);
            }
        }
        counts
    }

    #[test]
    fn test_contribution_saturates() {
        assert_eq!(contribution(Category::Depression, 1), 6);
        assert_eq!(contribution(Category::Depression, 3), 18);
        assert_eq!(contribution(Category::Depression, 7), 18);
        assert_eq!(contribution(Category::Stress, 0), 0);
    }

    #[test]
    fn test_thresholds() {
        let empty = SymptomCounts::default();
        assert_eq!(classify(0, &empty), RiskLevel::Low);
        assert_eq!(classify(7, &empty), RiskLevel::Low);
        assert_eq!(classify(8, &empty), RiskLevel::Moderate);
        assert_eq!(classify(14, &empty), RiskLevel::Moderate);
        assert_eq!(classify(15, &empty), RiskLevel::High);
        assert_eq!(classify(24, &empty), RiskLevel::High);
        assert_eq!(classify(25, &empty), RiskLevel::Critical);
    }

    #[test]
    fn test_suicidal_override() {
        let c = counts(&[(Category::SuicidalIdeation, 1)]);
        assert_eq!(classify(0, &c), RiskLevel::Critical);
        assert_eq!(classify(score_counts(&c), &c), RiskLevel::Critical);
    }

    #[test]
    fn test_mixed_score() {
        // anxiety 5*2 + stress 4*3 (capped from 5) = 22 -> high
        let c = counts(&[(Category::Anxiety, 2), (Category::Stress, 5)]);
        assert_eq!(score_counts(&c), 22);
        assert_eq!(classify(22, &c), RiskLevel::High);
    }

    #[test]
    fn test_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Moderate);
        assert!(RiskLevel::High < RiskLevel::Critical);
        assert_eq!(RiskLevel::default(), RiskLevel::Low);
    }
}
