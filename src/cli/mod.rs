// CLI module
// Public interface for the interactive chat

mod commands;
mod input;
mod repl;

pub use commands::{handle_command, Command, CommandOutput};
pub use input::InputHandler;
pub use repl::Repl;
