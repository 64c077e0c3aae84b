//! Chat mode UI components.

use crate::translation::AUTO;
use crate::ui::Style;

use super::session::SessionConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header() {
    println!(
        "{} {} - Interactive Translation Mode",
        Style::header("llm-translate"),
        Style::version(format!("v{VERSION}"))
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_config(config: &SessionConfig) {
    let source = if config.source_lang == AUTO {
        format!("{} {}", Style::value(AUTO), Style::hint("(detect)"))
    } else {
        Style::value(&config.source_lang)
    };

    println!("{}", Style::header("Configuration"));
    println!(
        "  {}     {} {}",
        Style::label("llm"),
        Style::value(&config.llm_title),
        Style::secondary(format!("({})", config.model))
    );
    println!("  {}    {source}", Style::label("from"));
    println!(
        "  {}      {}",
        Style::label("to"),
        Style::value(&config.target_lang)
    );
    println!();
}

pub fn print_help() {
    const COMMANDS: &[(&str, &str)] = &[
        ("/llm [title]", "Switch LLM"),
        ("/from [lang]", "Set the source language (auto to detect)"),
        ("/to [lang]", "Set the target language"),
        ("/config", "Show current configuration"),
        ("/help", "Show this help"),
        ("/quit", "Exit chat mode"),
    ];

    println!("{}", Style::header("Available commands"));
    for (command, description) in COMMANDS {
        println!(
            "  {}  {}",
            Style::command(format!("{command:<12}")),
            Style::secondary(description)
        );
    }
    println!();
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}
