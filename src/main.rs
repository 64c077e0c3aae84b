use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use llm_translate::cli::commands::{chat, list, translate};
use llm_translate::cli::{Args, Command};
use llm_translate::config::SettingsManager;

const DEFAULT_LOG_LEVEL: &str = "warn";

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.level.as_deref());

    let manager = SettingsManager::from_override(args.settings.as_deref())?;

    match args.command {
        Some(Command::Languages) => list::run_languages(&manager)?,
        Some(Command::Llms) => list::run_llms(&manager)?,
        Some(Command::Chat { session }) => chat::run_chat(&manager, session).await?,
        None => {
            let options = translate::TranslateOptions {
                file: args.file,
                session: args.session,
            };
            translate::run_translate(&manager, options).await?;
        }
    }

    Ok(())
}

/// Logs go to stderr so translations on stdout stay pipeable.
fn init_tracing(level: Option<&str>) {
    let filter = level.map_or_else(
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        |level| EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
    );

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
