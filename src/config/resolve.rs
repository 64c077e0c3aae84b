use anyhow::{Result, anyhow};

use super::{LlmOption, Settings};
use crate::translation::AUTO;

/// Overrides taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Source language tag; `auto` when absent.
    pub from: Option<String>,
    /// Target language tag; the first configured language when absent.
    pub to: Option<String>,
    /// LLM title; the first configured LLM when absent.
    pub llm: Option<String>,
}

/// Everything needed to start a session.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub llm: LlmOption,
    pub source_lang: String,
    pub target_lang: String,
}

/// Merges CLI options with settings and validates the result.
///
/// # Errors
///
/// Returns an error if the LLM title is unknown, the source or target
/// language is not configured, or the target is `auto`.
pub fn resolve_config(options: &ResolveOptions, settings: &Settings) -> Result<ResolvedSession> {
    let llm = match &options.llm {
        Some(title) => settings.find_llm(title).ok_or_else(|| {
            anyhow!(
                "LLM '{title}' not found\n\n\
                 Available LLMs:\n  \
                 - {}\n\n\
                 Run 'llm-translate llms' to see the configured LLMs",
                settings.llm_titles().join("\n  - ")
            )
        })?,
        None => settings
            .default_llm()
            .ok_or_else(|| anyhow!("No LLMs configured"))?,
    };

    let candidates = settings.candidate_languages();

    let source_lang = options.from.clone().unwrap_or_else(|| AUTO.to_string());
    candidates.validate_source(&source_lang)?;

    let target_lang = match &options.to {
        Some(to) => to.clone(),
        None => candidates
            .first()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("No target languages configured"))?,
    };
    candidates.validate_target(&target_lang)?;

    Ok(ResolvedSession {
        llm: llm.clone(),
        source_lang,
        target_lang,
    })
}
