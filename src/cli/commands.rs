// Slash command handling

use crate::triage::{templates, Category, Session};

/// What the REPL should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    Message(String),
    /// Start a new conversation
    Reset,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Status,
    Patterns,
    Resources,
    Sos,
    Reset,
    About,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parse a slash command. Plain text returns `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if !trimmed.starts_with('/') {
            return None;
        }

        let command = match trimmed {
            "/help" | "/?" => Command::Help,
            "/status" => Command::Status,
            "/patterns" => Command::Patterns,
            "/resources" => Command::Resources,
            "/sos" | "/emergency" => Command::Sos,
            "/reset" | "/new" => Command::Reset,
            "/about" => Command::About,
            "/quit" | "/exit" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        };
        Some(command)
    }
}

pub fn handle_command(command: &Command, session: &Session) -> CommandOutput {
    match command {
        Command::Help => CommandOutput::Message(help_text()),
        Command::Status => CommandOutput::Message(status_text(session)),
        Command::Patterns => CommandOutput::Message(patterns_text(session)),
        Command::Resources => CommandOutput::Message(templates::CRISIS_RESOURCES.to_string()),
        Command::Sos => CommandOutput::Message(format!(
            "\x1b[1;31mEmergency help\x1b[0m\n{}",
            templates::SOS_MESSAGE
        )),
        Command::About => CommandOutput::Message(templates::ABOUT.to_string()),
        Command::Reset => CommandOutput::Reset,
        Command::Quit => CommandOutput::Quit,
        Command::Unknown(name) => {
            CommandOutput::Message(format!("Unknown command: {} (try /help)", name))
        }
    }
}

fn help_text() -> String {
    "Commands:\n\
     \x20 /help       Show this help message\n\
     \x20 /status     Show current risk level, score and turn count\n\
     \x20 /patterns   Show detected symptom patterns\n\
     \x20 /resources  Show crisis resources\n\
     \x20 /sos        Emergency help\n\
     \x20 /reset      Start a new conversation\n\
     \x20 /about      About MindCare\n\
     \x20 /quit       Exit"
        .to_string()
}

/// Risk level with its colour marker, score and turn count
pub fn status_text(session: &Session) -> String {
    let level = session.risk_level();
    format!(
        "Risk level: {} {}\nSeverity score: {}\nConversation turns: {}",
        level.marker(),
        level.as_str().to_uppercase(),
        session.score(),
        session.turn_count()
    )
}

/// Per-category mention counts, most urgent first
pub fn patterns_text(session: &Session) -> String {
    let counts = session.counts();
    if counts.is_empty() {
        return "No patterns detected yet.".to_string();
    }

    let mut lines = vec!["Detected patterns:".to_string()];
    lines.extend(
        Category::BY_SEVERITY
            .into_iter()
            .map(|category| (category, counts.get(category)))
            .filter(|(_, count)| *count > 0)
            .map(|(category, count)| format!("  {}: {} mention(s)", category.label(), count)),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::TriageEngine;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(Command::parse("  /quit "), Some(Command::Quit));
        assert_eq!(Command::parse("/exit"), Some(Command::Quit));
        assert_eq!(Command::parse("/sos"), Some(Command::Sos));
        assert_eq!(
            Command::parse("/bogus"),
            Some(Command::Unknown("/bogus".to_string()))
        );
        assert_eq!(Command::parse("I feel sad"), None);
    }

    #[test]
    fn test_status_and_patterns_reflect_session() {
        let engine = TriageEngine::new().unwrap();
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(patterns_text(&session), "No patterns detected yet.");

        engine.process_turn(&mut session, "I feel hopeless", &mut rng);
        engine.process_turn(&mut session, "I'm so anxious", &mut rng);

        let status = status_text(&session);
        assert!(status.contains("MODERATE"));
        assert!(status.contains("Severity score: 11"));
        assert!(status.contains("Conversation turns: 2"));

        let patterns = patterns_text(&session);
        assert!(patterns.contains("Depression: 1 mention(s)"));
        assert!(patterns.contains("Anxiety: 1 mention(s)"));
    }

    #[test]
    fn test_reset_and_quit_are_control_outputs() {
        let session = Session::new();
        assert_eq!(handle_command(&Command::Reset, &session), CommandOutput::Reset);
        assert_eq!(handle_command(&Command::Quit, &session), CommandOutput::Quit);
    }
}
