// Interactive chat loop

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::commands::{handle_command, Command, CommandOutput};
use super::input::InputHandler;
use crate::providers::ReplyGenerator;
use crate::triage::{templates, Session, SessionPhase, TriageEngine, TurnOutcome};

pub struct Repl {
    engine: TriageEngine,
    generator: Option<Box<dyn ReplyGenerator>>,
    session: Session,
    rng: StdRng,
}

impl Repl {
    pub fn new(
        engine: TriageEngine,
        generator: Option<Box<dyn ReplyGenerator>>,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            engine,
            generator,
            session: Session::new(),
            rng,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run one turn through the engine
    pub async fn respond(&mut self, utterance: &str) -> TurnOutcome {
        match &self.generator {
            Some(generator) => {
                self.engine
                    .process_turn_with(&mut self.session, utterance, generator.as_ref(), &mut self.rng)
                    .await
            }
            None => self
                .engine
                .process_turn(&mut self.session, utterance, &mut self.rng),
        }
    }

    /// Start a new conversation
    pub fn reset(&mut self) {
        let previous = std::mem::take(&mut self.session);
        self.session = self.engine.reset(previous);
    }

    /// Read lines until /quit, Ctrl+C or Ctrl+D
    pub async fn run(&mut self, input: &mut InputHandler) -> Result<()> {
        if let Some(generator) = &self.generator {
            println!("\x1b[2m(replies assisted by {})\x1b[0m", generator.name());
        }

        let mut show_welcome = self.session.phase() == SessionPhase::Empty;
        loop {
            if show_welcome {
                println!("\n\x1b[1;36mMindCare:\x1b[0m {}\n", templates::WELCOME);
                println!("\x1b[2mType /help for commands.\x1b[0m\n");
                show_welcome = false;
            }

            let line = match input.read_line("You: ")? {
                Some(line) => line,
                None => break,
            };

            if let Some(command) = Command::parse(&line) {
                match handle_command(&command, &self.session) {
                    CommandOutput::Message(text) => println!("\n{}\n", text),
                    CommandOutput::Reset => {
                        self.reset();
                        println!("\nStarted a new conversation.");
                        show_welcome = true;
                    }
                    CommandOutput::Quit => break,
                }
                continue;
            }

            if line.is_empty() {
                continue;
            }

            let outcome = self.respond(&line).await;
            render_outcome(&outcome, &self.session);
        }

        if let Err(e) = input.save_history() {
            tracing::warn!("Failed to save history: {}", e);
        }

        println!("\nTake care of yourself. Goodbye.");
        Ok(())
    }
}

fn render_outcome(outcome: &TurnOutcome, session: &Session) {
    println!("\n\x1b[1;36mMindCare:\x1b[0m {}\n", outcome.reply);

    if let Some(banner) = outcome.crisis_banner {
        println!("\x1b[1;31m{}\x1b[0m\n", banner);
    }

    println!(
        "\x1b[2m[risk {} {} | score {} | turn {}]\x1b[0m\n",
        outcome.level.marker(),
        outcome.level,
        outcome.score,
        session.turn_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::RiskLevel;

    #[tokio::test]
    async fn test_respond_and_reset() {
        let mut repl = Repl::new(TriageEngine::new().unwrap(), None, Some(11));

        let outcome = repl.respond("I want to kill myself").await;
        assert_eq!(outcome.level, RiskLevel::Critical);
        assert_eq!(repl.session().phase(), SessionPhase::Active);

        repl.reset();
        assert_eq!(repl.session().phase(), SessionPhase::Empty);
        assert_eq!(repl.session().risk_level(), RiskLevel::Low);
        assert!(repl.session().transcript().is_empty());
    }
}
