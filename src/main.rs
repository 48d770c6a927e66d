//! Spice CLI - audience-tailored summaries over Telegram
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use colored::Colorize;
use spice::agent::{self, GeminiGenerator};
use spice::guard::{is_text_too_long, word_count};
use spice::prompt::build_prompt;
use spice::scraper::{self, WebExtractor};
use spice::telegram::TelegramClient;
use spice::{Bot, Config, Pipeline, SummaryResult};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "spice")]
#[command(author, version, about = "Telegram bot for audience-tailored summaries", long_about = None)]
struct Cli {
    /// Path to spice.toml (defaults to ./spice.toml or ~/.config/spice/spice.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Telegram bot
    Run,
    /// Summarise a URL or text once and print the result
    Summarise {
        /// URL or text to summarise
        input: String,
        /// Reader to tailor the summary for
        #[arg(short, long, default_value = "general")]
        audience: String,
        /// Show raw extracted text instead of summary
        #[arg(long)]
        raw: bool,
        /// Show the prompt that would be sent, without calling the model
        #[arg(long)]
        prompt: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    spice::setup_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load()?,
    };

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_bot(config).await,
        Commands::Summarise {
            input,
            audience,
            raw,
            prompt,
            json,
        } => summarise_once(&config, &input, &audience, raw, prompt, json).await,
    }
}

async fn run_bot(config: Config) -> anyhow::Result<()> {
    let token = config.telegram_token()?;
    let transport = TelegramClient::new(
        &config.telegram.api_url,
        token,
        Duration::from_secs(config.telegram.poll_timeout_secs),
    )?;

    let pipeline = Pipeline::new(
        Arc::new(WebExtractor::new()?),
        Arc::new(GeminiGenerator::from_config(&config)?),
        config.limits.clone(),
    );

    info!(model = %config.agent.model, max_words = config.limits.max_words, "starting bot");
    Bot::new(Arc::new(transport), pipeline).run().await?;
    Ok(())
}

async fn summarise_once(
    config: &Config,
    input: &str,
    audience: &str,
    raw: bool,
    prompt: bool,
    json: bool,
) -> anyhow::Result<()> {
    let extractor = WebExtractor::new()?;
    let text = scraper::acquire(input, &extractor).await?;

    if raw {
        println!("{}", text);
        println!("\n--- Extracted {} words ---", word_count(&text));
        return Ok(());
    }

    if is_text_too_long(&text, config.limits.max_words) {
        bail!(
            "text is too long: {} words (limit {})",
            word_count(&text),
            config.limits.max_words
        );
    }

    if prompt {
        println!("{}", build_prompt(&text, audience, config.limits.prompt_chars));
        return Ok(());
    }

    let generator = GeminiGenerator::from_config(config)?;
    let result = agent::summarize(&generator, &text, audience, config.limits.prompt_chars).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(audience, &result);
    }

    Ok(())
}

fn print_summary(audience: &str, result: &SummaryResult) {
    println!(
        "{}\n",
        format!("=== Spice Summary for {} ===", spice::render::title_case(audience)).bold()
    );

    println!("{}", "💡 Summary:".cyan());
    println!("  {}\n", result.summary);

    println!("{} {}\n", "🎭 Mood:".cyan(), result.sentiment);

    println!("{}", "📌 Key Points:".cyan());
    for point in &result.key_points {
        println!("  • {}", point);
    }

    if result.is_unavailable() {
        eprintln!("\n{}", "The model could not be reached; showing fallback result.".yellow());
    }
}
