// Compiled symptom lexicon
//
// Turns the registration table into case-insensitive regexes and validates
// it. Construction is the only fallible step of the engine.

use regex::{Regex, RegexBuilder};

use super::category::{Category, CategorySpec, CATEGORY_TABLE};
use crate::errors::TriageError;

/// Compiled patterns for one category, in table order
#[derive(Debug, Clone)]
pub struct LexiconEntry {
    pub category: Category,
    patterns: Vec<Regex>,
}

impl LexiconEntry {
    /// First pattern matching anywhere in `text`, if any
    pub fn first_match(&self, text: &str) -> Option<&Regex> {
        self.patterns.iter().find(|p| p.is_match(text))
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

/// Immutable, validated lexicon; safe to share across sessions
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
}

impl Lexicon {
    /// Compile the built-in registration table
    pub fn compile() -> Result<Self, TriageError> {
        Self::from_table(&CATEGORY_TABLE)
    }

    /// Validate and compile a registration table.
    ///
    /// Fails when a category is missing or duplicated, has no patterns or
    /// templates, has a zero weight, when suicidal ideation is not the
    /// strictly heaviest category, or when any pattern does not compile.
    ///
    /// Weights and templates are always read from `CATEGORY_TABLE`, so only
    /// the built-in table may back a lexicon handed to the engine.
    pub(crate) fn from_table(table: &[CategorySpec]) -> Result<Self, TriageError> {
        validate_table(table)?;

        let mut entries = Vec::with_capacity(table.len());
        for category in Category::BY_SEVERITY {
            let Some(spec) = table.iter().find(|s| s.category == category) else {
                continue;
            };

            let mut patterns = Vec::with_capacity(spec.patterns.len());
            for source in spec.patterns {
                let regex = RegexBuilder::new(source)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source_err| TriageError::PatternCompile {
                        category,
                        pattern: source.to_string(),
                        source: source_err,
                    })?;
                patterns.push(regex);
            }

            entries.push(LexiconEntry { category, patterns });
        }

        tracing::debug!(
            categories = entries.len(),
            patterns = entries.iter().map(|e| e.pattern_count()).sum::<usize>(),
            "Compiled symptom lexicon"
        );

        Ok(Self { entries })
    }

    /// Entries in descending severity
    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn pattern_count(&self) -> usize {
        self.entries.iter().map(|e| e.pattern_count()).sum()
    }
}

fn validate_table(table: &[CategorySpec]) -> Result<(), TriageError> {
    for category in Category::BY_SEVERITY {
        let rows: Vec<&CategorySpec> = table.iter().filter(|s| s.category == category).collect();
        let spec = match rows.as_slice() {
            [spec] => *spec,
            [] => {
                return Err(TriageError::IncompleteRegistry(format!(
                    "category '{}' has no registration",
                    category
                )))
            }
            _ => {
                return Err(TriageError::IncompleteRegistry(format!(
                    "category '{}' is registered {} times",
                    category,
                    rows.len()
                )))
            }
        };

        if spec.weight == 0 {
            return Err(TriageError::IncompleteRegistry(format!(
                "category '{}' has weight 0",
                category
            )));
        }
        if spec.patterns.is_empty() {
            return Err(TriageError::IncompleteRegistry(format!(
                "category '{}' has no detection patterns",
                category
            )));
        }
        if spec.templates.is_empty() {
            return Err(TriageError::IncompleteRegistry(format!(
                "category '{}' has no reply templates",
                category
            )));
        }
    }

    let suicidal = table
        .iter()
        .find(|s| s.category == Category::SuicidalIdeation)
        .map(|s| s.weight)
        .unwrap_or(0);
    if table
        .iter()
        .any(|s| s.category != Category::SuicidalIdeation && s.weight >= suicidal)
    {
        return Err(TriageError::IncompleteRegistry(
            "suicidal ideation must carry the strictly highest weight".to_string(),
        ));
    }

    Ok(())
}
