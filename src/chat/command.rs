use inquire::autocompletion::{Autocomplete, Replacement};

// Available slash commands: (command, description)
const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/llm", "Switch LLM (pick from a list when no title is given)"),
    ("/from", "Set the source language (auto to detect)"),
    ("/to", "Set the target language"),
    ("/config", "Show current configuration"),
    ("/help", "Show available commands"),
    ("/quit", "Exit chat mode"),
];

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') || input.contains(char::is_whitespace) {
            return Ok(vec![]);
        }

        let suggestions: Vec<String> = SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect();

        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        let replacement =
            highlighted_suggestion.map(|s| s.split_whitespace().next().unwrap_or("").to_string());
        Ok(replacement)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    /// Switch to the LLM with this title, or prompt for one.
    Llm(Option<String>),
    From(Option<String>),
    To(Option<String>),
    Config,
    Help,
    Quit,
    Unknown(String),
}

/// One line typed at the chat prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Line {
    Text(String),
    Command(SlashCommand),
    Empty,
}

pub fn parse_line(line: &str) -> Line {
    let line = line.trim();

    if line.is_empty() {
        return Line::Empty;
    }

    line.strip_prefix('/')
        .map_or_else(|| Line::Text(line.to_string()), parse_slash_command)
}

fn parse_slash_command(cmd: &str) -> Line {
    let (name, rest) = cmd
        .split_once(char::is_whitespace)
        .map_or((cmd, ""), |(name, rest)| (name, rest.trim()));
    // Titles may contain spaces, so the argument is the rest of the line.
    let argument = (!rest.is_empty()).then(|| rest.to_string());

    let command = match name {
        "llm" => SlashCommand::Llm(argument),
        "from" => SlashCommand::From(argument),
        "to" => SlashCommand::To(argument),
        "config" => SlashCommand::Config,
        "help" => SlashCommand::Help,
        "quit" | "exit" | "q" => SlashCommand::Quit,
        _ => SlashCommand::Unknown(cmd.to_string()),
    };
    Line::Command(command)
}
