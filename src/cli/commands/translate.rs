use anyhow::{Result, bail};
use std::io;
use std::path::PathBuf;
use tracing::warn;

use crate::cli::SessionArgs;
use crate::config::{ResolveOptions, SettingsManager, resolve_config};
use crate::input::InputReader;
use crate::session::TranslatorSession;
use crate::translation::AUTO;
use crate::ui::{Spinner, print_translation};

pub struct TranslateOptions {
    pub file: Option<PathBuf>,
    pub session: SessionArgs,
}

/// Translates a file or stdin once and streams the result to stdout.
pub async fn run_translate(manager: &SettingsManager, options: TranslateOptions) -> Result<()> {
    let settings = manager.load()?;
    let resolve = ResolveOptions {
        from: options.session.from,
        to: options.session.to,
        llm: options.session.llm,
    };
    let resolved = resolve_config(&resolve, &settings)?;

    let source_text = InputReader::read(options.file.as_deref())?;
    if source_text.trim().is_empty() {
        bail!("Input is empty");
    }

    let session = TranslatorSession::new(settings.candidate_languages());
    session.initialize(&resolved.llm.config_json).await?;

    let result = translate_once(
        &session,
        &source_text,
        &resolved.source_lang,
        &resolved.target_lang,
    )
    .await;

    session.cleanup().await;
    result
}

async fn translate_once(
    session: &TranslatorSession,
    text: &str,
    source_lang: &str,
    target_lang: &str,
) -> Result<()> {
    let spinner = Spinner::new("Translating...");

    let source_lang = if source_lang == AUTO {
        spinner.set_message("Detecting language...");
        let detected = session.detect(text).await?;
        if detected == AUTO {
            warn!("Could not detect the source language");
        }
        spinner.set_message("Translating...");
        detected
    } else {
        source_lang.to_string()
    };

    let stream = session.translate(text, &source_lang, target_lang);
    print_translation(stream, &mut io::stdout(), Some(spinner)).await?;
    Ok(())
}
