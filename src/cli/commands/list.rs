//! Listing of the LLMs and languages in the settings file.

use anyhow::Result;

use crate::config::{LanguageOption, Settings, SettingsManager};
use crate::ui::Style;

pub fn run_languages(manager: &SettingsManager) -> Result<()> {
    let settings = manager.load()?;
    print_languages(&settings.languages);
    Ok(())
}

pub fn run_llms(manager: &SettingsManager) -> Result<()> {
    let settings = manager.load()?;
    print_llms(&settings);
    Ok(())
}

/// Prints the configured languages to stdout.
pub fn print_languages(languages: &[LanguageOption]) {
    println!("{}", Style::header("Configured languages"));
    for language in languages {
        println!(
            "  {} {}",
            Style::code(format!("{:24}", language.tag)),
            Style::secondary(&language.title)
        );
    }
}

/// Prints configured LLMs to stdout; the first one is the default.
pub fn print_llms(settings: &Settings) {
    println!("{}", Style::header("Configured LLMs"));
    for (index, llm) in settings.llms.iter().enumerate() {
        let marker = if index == 0 {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        };
        println!(
            "  {} {}{marker}",
            Style::value(format!("{:24}", llm.title)),
            Style::secondary(&llm.model)
        );
    }
}
