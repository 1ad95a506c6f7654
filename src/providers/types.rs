// Request types shared by all reply generators

use serde::Serialize;

use crate::triage::Turn;

/// What a generator gets to see: the conversation so far and the new message
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    /// Prior turns in chronological order, excluding `utterance`
    pub history: Vec<Turn>,

    /// The user's new message
    pub utterance: String,
}

impl GenerationRequest {
    pub fn new(history: Vec<Turn>, utterance: impl Into<String>) -> Self {
        Self {
            history,
            utterance: utterance.into(),
        }
    }

    /// Keep only the most recent `max_turns` history entries
    pub fn with_history_limit(mut self, max_turns: usize) -> Self {
        if self.history.len() > max_turns {
            let remove_count = self.history.len() - max_turns;
            self.history.drain(0..remove_count);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_limit_keeps_latest() {
        let history = vec![
            Turn::user("one"),
            Turn::assistant("two"),
            Turn::user("three"),
        ];
        let request = GenerationRequest::new(history, "four").with_history_limit(2);
        assert_eq!(request.history.len(), 2);
        assert_eq!(request.history[0].text, "two");
    }
}
