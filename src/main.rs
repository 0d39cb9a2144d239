//! Main entry point for Sampark Chat CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sampark_chat::cli::commands::{self, Commands};
use sampark_chat::{ChatConfig, SupportEngine};

/// Sampark Chat - multilingual customer-support assistant
#[derive(Parser, Debug)]
#[command(name = "sampark-chat", version, about, long_about = None)]
struct Args {
    /// API key for Gemini (optional, defaults to GEMINI_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("sampark_chat={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Fail fast before any network call
    let config = ChatConfig::load(args.api_key)?;
    let engine = SupportEngine::from_config(&config)?;

    match args.command.unwrap_or(Commands::Demo) {
        Commands::Demo => commands::handle_demo(&engine).await?,
        Commands::Ask { prompt, lang } => commands::handle_ask(&engine, prompt, lang).await?,
    }

    Ok(())
}
