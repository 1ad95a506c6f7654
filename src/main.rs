// MindCare - Mental health support chat with symptom triage
// Main entry point

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, IsTerminal, Read};

use mindcare::cli::{InputHandler, Repl};
use mindcare::config::{load_config, Config};
use mindcare::errors::{
    generator_unavailable_error, lexicon_error, wrap_error_with_suggestion, UserFriendlyError,
};
use mindcare::providers::{create_generator, ReplyGenerator};
use mindcare::server::TriageServer;
use mindcare::triage::{Session, TriageEngine, TurnOutcome};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "mindcare")]
#[command(about = "Mental health support chat with symptom triage", version)]
struct Args {
    /// Run mode (default: chat)
    #[command(subcommand)]
    command: Option<Command>,

    /// Seed for template choice (overrides config)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Use curated replies only, even if a generator is configured
    #[arg(long, global = true)]
    lite: bool,
}

#[derive(Parser, Debug)]
enum Command {
    /// Interactive chat
    Chat,
    /// Process a single message and print the outcome as JSON
    Query {
        /// Message text
        message: String,
    },
    /// Run HTTP daemon server
    Serve {
        /// Bind address (default from config, 127.0.0.1:8787)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Validate the symptom lexicon and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Keep the chat transcript readable; other modes log turns at INFO
    let interactive = matches!(args.command, None | Some(Command::Chat));
    init_tracing(if interactive { "warn" } else { "info" });

    let mut config = load_config()?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.lite {
        config.generator.enabled = false;
    }

    let engine = TriageEngine::new().map_err(|e| anyhow!(lexicon_error(&e)))?;

    match args.command {
        Some(Command::Check) => run_check(&engine),
        Some(Command::Query { message }) => run_query(&config, engine, &message).await,
        Some(Command::Serve { bind }) => run_serve(config, engine, bind).await,
        Some(Command::Chat) | None => {
            // Piped input mode: treat stdin as a single message
            if !io::stdin().is_terminal() {
                let mut input = String::new();
                io::stdin()
                    .read_to_string(&mut input)
                    .context("Failed to read stdin")?;
                if input.trim().is_empty() {
                    return Ok(());
                }
                return run_query(&config, engine, input.trim()).await;
            }
            run_chat(&config, engine).await
        }
    }
}

fn build_generator(config: &Config) -> Result<Option<Box<dyn ReplyGenerator>>> {
    create_generator(&config.generator).map_err(|e| {
        let providers = config
            .generator
            .providers
            .iter()
            .map(|p| p.provider.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        anyhow!(generator_unavailable_error(&providers, &format!("{:#}", e)))
    })
}

fn run_check(engine: &TriageEngine) -> Result<()> {
    let lexicon = engine.detector().lexicon();
    for entry in lexicon.entries() {
        println!(
            "{:<18} weight {:>2}  {} pattern(s)",
            entry.category.label(),
            entry.category.weight(),
            entry.pattern_count()
        );
    }
    println!(
        "\nLexicon OK: {} categories, {} patterns",
        lexicon.entries().len(),
        lexicon.pattern_count()
    );
    Ok(())
}

async fn run_query(config: &Config, engine: TriageEngine, message: &str) -> Result<()> {
    let generator = build_generator(config)?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new();

    let outcome: TurnOutcome = match &generator {
        Some(generator) => {
            engine
                .process_turn_with(&mut session, message, generator.as_ref(), &mut rng)
                .await
        }
        None => engine.process_turn(&mut session, message, &mut rng),
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&outcome).context("Failed to serialize outcome")?
    );
    Ok(())
}

async fn run_chat(config: &Config, engine: TriageEngine) -> Result<()> {
    let generator = build_generator(config)?;
    let mut input = InputHandler::new().user_context_with_suggestion(
        "Could not start interactive input",
        "pipe a message on stdin or use `mindcare query \"...\"`",
    )?;

    let mut repl = Repl::new(engine, generator, config.seed);
    repl.run(&mut input).await
}

/// Run HTTP daemon server
async fn run_serve(mut config: Config, engine: TriageEngine, bind: Option<String>) -> Result<()> {
    if let Some(bind) = bind {
        config.server.bind_address = bind;
    }

    let generator = build_generator(&config)?;
    let server = TriageServer::new(&config, engine, generator)?;

    server.serve().await.map_err(|e| {
        anyhow!(wrap_error_with_suggestion(
            format!("{:#}", e),
            "pass --bind with a free address, e.g. --bind 127.0.0.1:8788"
        ))
    })
}

/// Initialize tracing to stderr
///
/// `default_level` applies unless RUST_LOG is set.
/// MINDCARE_DEBUG=1 forces DEBUG.
fn init_tracing(default_level: &str) {
    let show_debug = std::env::var("MINDCARE_DEBUG")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false);

    let env_filter = if show_debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Bridge log crate → tracing (for dependencies using log crate)
    tracing_log::LogTracer::init().ok();
}
