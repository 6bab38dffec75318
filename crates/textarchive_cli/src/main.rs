//! Command-line front end for the classification engine.
//!
//! # Responsibility
//! - Act as the composition root: load config, start logging, build the
//!   engine once and pass it to the selected command.
//! - Print results as JSON on stdout; diagnostics go to the log sink.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use std::io::Read;
use std::path::PathBuf;
use textarchive_core::{
    core_version, default_log_level, init_logging, Category, ClassificationEngine,
    ClassificationResult, EngineConfig, LogSink,
};

#[derive(Parser)]
#[command(name = "textarchive", version, about = "Classify text into schedule entries or memos")]
struct Cli {
    /// TOML engine config; environment overrides apply on top.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rotating log files (stderr when omitted).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify text (argument or stdin) with remote inference and fallback.
    Classify {
        text: Option<String>,
        /// Skip the remote classifier.
        #[arg(long)]
        offline: bool,
        /// Reference date for relative words, `YYYY-MM-DD`.
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Extract fields for a category chosen by hand.
    Manual {
        text: Option<String>,
        #[arg(long = "as", value_enum)]
        category: CategoryArg,
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Print the core library version.
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Schedule,
    Memo,
}

impl From<CategoryArg> for Category {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Schedule => Category::Event,
            CategoryArg::Memo => Category::Note,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let sink = match &cli.log_dir {
        Some(dir) => LogSink::directory(dir).map_err(anyhow::Error::msg)?,
        None => LogSink::Stderr,
    };
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, sink).map_err(anyhow::Error::msg)?;

    let config = load_config(cli.config.as_ref())?;
    debug!(
        "event=cli_start module=cli status=ok config_file={} llm_enabled={}",
        cli.config.is_some(),
        config.llm_enabled
    );

    match cli.command {
        Command::Classify {
            text,
            offline,
            today,
        } => {
            let config = if offline {
                EngineConfig {
                    llm_enabled: false,
                    ..config
                }
            } else {
                config
            };
            let engine = ClassificationEngine::new(&config)?;
            let text = resolve_text(text)?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            print_result(&engine.classify(&text, today).await)
        }
        Command::Manual {
            text,
            category,
            today,
        } => {
            let engine = ClassificationEngine::new(&config)?;
            let text = resolve_text(text)?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            print_result(&engine.classify_as(&text, category.into(), today))
        }
        Command::Version => {
            println!("textarchive_core version={}", core_version());
            Ok(())
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    let base = match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config `{}`", path.display()))?,
        None => EngineConfig::default(),
    };
    base.with_env_overrides()
        .context("invalid environment override")
}

fn resolve_text(text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read text from stdin")?;
    Ok(buffer)
}

fn print_result(result: &ClassificationResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}
