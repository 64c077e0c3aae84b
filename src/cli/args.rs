use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "llm-translate")]
#[command(about = "Interactive, streaming translation powered by LLMs")]
#[command(version)]
pub struct Args {
    /// File to translate (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub session: SessionArgs,

    /// Settings file (defaults to ~/.config/llm-translate/settings.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Log level filter for diagnostics on stderr (e.g. debug, info, warn)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options that pick the LLM and languages of a session.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Source language (defaults to auto detection)
    #[arg(short = 'f', long = "from", value_name = "LANG")]
    pub from: Option<String>,

    /// Target language (defaults to the first configured language)
    #[arg(short = 't', long = "to", value_name = "LANG")]
    pub to: Option<String>,

    /// LLM title from the settings file (defaults to the first one)
    #[arg(short = 'l', long = "llm", value_name = "TITLE")]
    pub llm: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List configured languages
    Languages,
    /// List configured LLMs
    Llms,
    /// Interactive chat mode for translation
    Chat {
        #[command(flatten)]
        session: SessionArgs,
    },
}
