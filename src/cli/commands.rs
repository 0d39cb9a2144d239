//! CLI command definitions and handlers

use clap::Subcommand;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};
use tracing::info;

use crate::core::engine::SupportEngine;
use crate::core::models::{LanguageCode, Reply, ReplyOutcome};

/// Commands for Sampark Chat
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the three built-in example queries (English, Hindi, Spanish)
    Demo,

    /// Ask a single question
    Ask {
        /// The user's question, in any language
        prompt: String,

        /// Language code for the reply (default: en)
        #[arg(short, long, default_value = "en")]
        lang: LanguageCode,
    },
}

/// Built-in demo queries: (title, prompt, language code)
pub const DEMO_QUERIES: &[(&str, &str, &str)] = &[
    (
        "English Query",
        "What is the process for applying for a new identity card?",
        "en",
    ),
    (
        "Hindi Query and Response ('hi')",
        "मैं अपनी बेटी के लिए जन्म प्रमाण पत्र कैसे प्राप्त कर सकता हूं?",
        "hi",
    ),
    (
        "Spanish Query and Response ('es')",
        "Necesito saber el horario de la oficina de impuestos.",
        "es",
    ),
];

/// Transcript lines for one exchange
pub fn transcript(prompt: &str, reply: &Reply) -> Vec<String> {
    let mut lines = vec![format!(
        "[USER PROMPT in {}]: {}",
        reply.language.label(),
        prompt
    )];

    match &reply.english {
        Some(english) => {
            lines.push(format!("[AI RESPONSE (English)]: {english}"));
            if !reply.language.is_english() {
                lines.push(format!(
                    "[AI RESPONSE ({})]: {}",
                    reply.language.label(),
                    reply.text
                ));
            }
        }
        None => lines.push(reply.text.clone()),
    }

    lines
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

async fn run_exchange(engine: &SupportEngine, prompt: &str, language: &LanguageCode) -> Reply {
    let pb = spinner(format!("Asking Sampark-AI ({})...", language.label()));
    let reply = engine.respond(prompt, language).await;
    pb.finish_and_clear();

    println!();
    for line in transcript(prompt, &reply) {
        println!("{line}");
    }

    reply
}

/// Handle demo command
pub async fn handle_demo(engine: &SupportEngine) -> anyhow::Result<()> {
    let start_time = Instant::now();
    let mut failed = 0;

    for (i, (title, prompt, code)) in DEMO_QUERIES.iter().enumerate() {
        if i > 0 {
            println!("\n{}\n", "=".repeat(50));
        }
        println!("--- Example {}: {} ---", i + 1, title);

        let language = LanguageCode::parse(code)?;
        let reply = run_exchange(engine, prompt, &language).await;
        if reply.outcome == ReplyOutcome::ModelError {
            failed += 1;
        }
    }

    info!(
        "Demo completed: {} queries, {} model failures in {:?}",
        DEMO_QUERIES.len(),
        failed,
        start_time.elapsed()
    );

    Ok(())
}

/// Handle ask command
pub async fn handle_ask(
    engine: &SupportEngine,
    prompt: String,
    lang: LanguageCode,
) -> anyhow::Result<()> {
    let reply = run_exchange(engine, &prompt, &lang).await;

    if reply.outcome == ReplyOutcome::ModelError {
        anyhow::bail!("model call failed");
    }

    Ok(())
}
