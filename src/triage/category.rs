// Symptom categories and their registration table
//
// Every per-category fact (weight, detection patterns, reply templates) is
// declared once in CATEGORY_TABLE. The lexicon, the severity model and the
// response selector all read from it, so adding a category means adding one
// enum variant and one table row.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::templates;

/// Closed set of symptom labels, declared from most to least urgent.
///
/// The derived `Ord` follows declaration order, so sorted collections of
/// categories iterate in descending severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SuicidalIdeation,
    SelfHarm,
    Trauma,
    Depression,
    Anxiety,
    Stress,
}

impl Category {
    pub const COUNT: usize = 6;

    /// All categories, most urgent first
    pub const BY_SEVERITY: [Category; Category::COUNT] = [
        Category::SuicidalIdeation,
        Category::SelfHarm,
        Category::Trauma,
        Category::Depression,
        Category::Anxiety,
        Category::Stress,
    ];

    /// Position of this category in `CATEGORY_TABLE` and in count arrays
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::SuicidalIdeation => "suicidal_ideation",
            Category::SelfHarm => "self_harm",
            Category::Trauma => "trauma",
            Category::Depression => "depression",
            Category::Anxiety => "anxiety",
            Category::Stress => "stress",
        }
    }

    /// Human-readable label for displays
    pub fn label(&self) -> &'static str {
        match self {
            Category::SuicidalIdeation => "Suicidal ideation",
            Category::SelfHarm => "Self-harm",
            Category::Trauma => "Trauma",
            Category::Depression => "Depression",
            Category::Anxiety => "Anxiety",
            Category::Stress => "Stress",
        }
    }

    /// Registration row for this category
    pub fn spec(self) -> &'static CategorySpec {
        &CATEGORY_TABLE[self.index()]
    }

    /// Severity weight (integer >= 1)
    pub fn weight(self) -> u32 {
        self.spec().weight
    }

    /// Reply templates addressing this category
    pub fn templates(self) -> &'static [&'static str] {
        self.spec().templates
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the registration table
#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    pub category: Category,
    pub weight: u32,
    /// Boundary-anchored patterns, tested in order; compiled case-insensitively
    pub patterns: &'static [&'static str],
    pub templates: &'static [&'static str],
}

/// Registration table, indexed by `Category::index()`.
///
/// `Lexicon::compile` validates this table at startup and refuses to build an
/// engine from an incomplete or inconsistent one.
pub static CATEGORY_TABLE: [CategorySpec; Category::COUNT] = [
    CategorySpec {
        category: Category::SuicidalIdeation,
        weight: 10,
        patterns: &[
            r"\b(suicide|suicidal|kill myself|end my life|want to die|want to be dead)\b",
            r"\b(better off dead|no reason to live|end it all|take my life)\b",
        ],
        templates: templates::SUICIDAL_IDEATION,
    },
    CategorySpec {
        category: Category::SelfHarm,
        weight: 9,
        patterns: &[
            r"\b(hurt myself|cut myself|harm myself|self harm|self-harm|cutting)\b",
            r"\b(burning myself|punish myself)\b",
        ],
        templates: templates::SELF_HARM,
    },
    CategorySpec {
        category: Category::Trauma,
        weight: 7,
        patterns: &[
            r"\b(flashback|nightmare|reliving|haunted|ptsd)\b",
            r"\b(abuse|trauma|attacked|violated)\b",
        ],
        templates: templates::TRAUMA,
    },
    CategorySpec {
        category: Category::Depression,
        weight: 6,
        patterns: &[
            r"\b(sad|depressed|hopeless|worthless|empty|numb|down|blue)\b",
            r"\b(no energy|tired|exhausted|fatigue|drained)\b",
            r"\b(can't sleep|insomnia|sleeping too much|sleep)\b",
            r"\b(no interest|don't care|nothing matters|meaningless)\b",
        ],
        templates: templates::DEPRESSION,
    },
    CategorySpec {
        category: Category::Anxiety,
        weight: 5,
        patterns: &[
            r"\b(anxious|worried|nervous|panic|fear|scared|afraid|terrified)\b",
            r"\b(can't breathe|heart racing|sweating|trembling|shaking)\b",
            r"\b(overthinking|can't stop thinking|racing thoughts|racing mind)\b",
            r"\b(restless|on edge|tense|wound up)\b",
        ],
        templates: templates::ANXIETY,
    },
    CategorySpec {
        category: Category::Stress,
        weight: 4,
        patterns: &[
            r"\b(overwhelmed|stressed|pressure|burden|weight)\b",
            r"\b(can't cope|too much|breaking down|breaking point)\b",
            r"\b(burnout|exhausted mentally)\b",
        ],
        templates: templates::STRESS,
    },
];
