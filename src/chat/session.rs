use anyhow::Result;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use inquire::{Select, Text};
use std::io;

use super::command::{Line, SlashCommand, SlashCommandCompleter, parse_line};
use super::ui;
use crate::config::{LanguageOption, ResolvedSession, Settings};
use crate::session::TranslatorSession;
use crate::translation::AUTO;
use crate::ui::{Spinner, Style, handle_prompt_cancellation, print_translation};

/// What the chat session currently translates with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub llm_title: String,
    pub model: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl SessionConfig {
    pub fn from_resolved(resolved: &ResolvedSession) -> Self {
        Self {
            llm_title: resolved.llm.title.clone(),
            model: resolved.llm.model.clone(),
            source_lang: resolved.source_lang.clone(),
            target_lang: resolved.target_lang.clone(),
        }
    }
}

/// An interactive chat session for translation.
pub struct ChatSession {
    settings: Settings,
    config: SessionConfig,
    default_client_json: String,
    session: TranslatorSession,
}

impl ChatSession {
    pub fn new(settings: Settings, resolved: &ResolvedSession) -> Self {
        let session = TranslatorSession::new(settings.candidate_languages());
        Self {
            config: SessionConfig::from_resolved(resolved),
            default_client_json: resolved.llm.config_json.clone(),
            settings,
            session,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.session.initialize(&self.default_client_json).await?;
        let result = self.repl().await;
        self.session.cleanup().await;
        result
    }

    async fn repl(&mut self) -> Result<()> {
        ui::print_header();

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);

        // Non-highlighted suggestions: gray
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        // Highlighted suggestion: purple
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let line = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Type text to translate, /help for commands, Ctrl+C to quit")
                .prompt();

            match line {
                Ok(line) => match parse_line(&line) {
                    Line::Empty => {}
                    Line::Command(cmd) => {
                        if !self.handle_command(cmd)? {
                            break;
                        }
                    }
                    Line::Text(text) => {
                        if let Err(e) = self.translate_and_print(&text).await {
                            ui::print_error(&format!("{e:#}"));
                        }
                    }
                },
                Err(
                    inquire::InquireError::OperationCanceled
                    | inquire::InquireError::OperationInterrupted,
                ) => {
                    println!(); // Clear line before goodbye message
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    /// Returns `false` when the session should end.
    fn handle_command(&mut self, cmd: SlashCommand) -> Result<bool> {
        match cmd {
            SlashCommand::Llm(title) => self.set_llm(title)?,
            SlashCommand::From(lang) => self.set_source(lang)?,
            SlashCommand::To(lang) => self.set_target(lang)?,
            SlashCommand::Config => {
                if let Some(model) = self.session.current_model() {
                    self.config.model = model;
                }
                ui::print_config(&self.config);
            }
            SlashCommand::Help => ui::print_help(),
            SlashCommand::Quit => return Ok(false),
            SlashCommand::Unknown(cmd) => {
                ui::print_error(&format!("Unknown command: /{cmd}"));
            }
        }
        Ok(true)
    }

    fn set_llm(&mut self, title: Option<String>) -> Result<()> {
        let title = match title {
            Some(title) => title,
            None => {
                let titles = self.settings.llm_titles();
                let Some(title) = handle_prompt_cancellation(|| {
                    Ok(Select::new("LLM:", titles).prompt()?.to_string())
                })?
                else {
                    return Ok(());
                };
                title
            }
        };

        let Some(llm) = self.settings.find_llm(&title) else {
            ui::print_error(&format!(
                "LLM '{title}' not found. Available: {}",
                self.settings.llm_titles().join(", ")
            ));
            return Ok(());
        };

        match self.session.switch_client(&llm.config_json) {
            Ok(()) => {
                self.config.llm_title = llm.title.clone();
                self.config.model = llm.model.clone();
                println!(
                    "{} LLM set to {}\n",
                    Style::success("✓"),
                    Style::value(&llm.title)
                );
            }
            Err(e) => ui::print_error(&e.to_string()),
        }
        Ok(())
    }

    fn set_source(&mut self, lang: Option<String>) -> Result<()> {
        let Some(lang) = self.pick_language(lang, "Source language:", true)? else {
            return Ok(());
        };

        match self.session.languages().validate_source(&lang) {
            Ok(()) => {
                println!(
                    "{} Source language set to {}\n",
                    Style::success("✓"),
                    Style::value(&lang)
                );
                self.config.source_lang = lang;
            }
            Err(e) => ui::print_error(&e.to_string()),
        }
        Ok(())
    }

    fn set_target(&mut self, lang: Option<String>) -> Result<()> {
        let Some(lang) = self.pick_language(lang, "Target language:", false)? else {
            return Ok(());
        };

        match self.session.languages().validate_target(&lang) {
            Ok(()) => {
                println!(
                    "{} Target language set to {}\n",
                    Style::success("✓"),
                    Style::value(&lang)
                );
                self.config.target_lang = lang;
            }
            Err(e) => ui::print_error(&e.to_string()),
        }
        Ok(())
    }

    /// Returns `lang` if given, otherwise lets the user pick one.
    fn pick_language(
        &self,
        lang: Option<String>,
        message: &str,
        allow_auto: bool,
    ) -> Result<Option<String>> {
        if lang.is_some() {
            return Ok(lang);
        }

        let options: Vec<LanguageChoice<'_>> = self
            .settings
            .languages
            .iter()
            .filter(|option| allow_auto || option.tag != AUTO)
            .map(LanguageChoice)
            .collect();

        handle_prompt_cancellation(|| {
            let choice = Select::new(message, options).prompt()?;
            Ok(choice.0.tag.clone())
        })
    }

    async fn translate_and_print(&self, text: &str) -> Result<()> {
        let spinner = Spinner::new("Translating...");

        let mut source_lang = self.config.source_lang.clone();
        if source_lang == AUTO {
            spinner.set_message("Detecting language...");
            source_lang = self.session.detect(text).await?;
            if source_lang != AUTO {
                spinner.suspend(|| println!("{}", Style::secondary(format!("[{source_lang}]"))));
            }
            spinner.set_message("Translating...");
        }

        let stream = self
            .session
            .translate(text, &source_lang, &self.config.target_lang);
        print_translation(stream, &mut io::stdout(), Some(spinner)).await?;
        Ok(())
    }
}

struct LanguageChoice<'a>(&'a LanguageOption);

impl std::fmt::Display for LanguageChoice<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.title == self.0.tag {
            write!(f, "{}", self.0.title)
        } else {
            write!(f, "{} ({})", self.0.title, self.0.tag)
        }
    }
}
