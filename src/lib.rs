//! # llm-translate - Interactive LLM Translation
//!
//! `llm-translate` translates text with any OpenAI-compatible chat endpoint.
//! Each session runs two agents on an in-process runtime: one detects the
//! source language, the other streams the translation.
//!
//! ## Features
//!
//! - **Streaming translations**: each update carries the full translation so far
//! - **Language detection**: restricted to the languages you configure
//! - **LLM switching**: change models mid-session without restarting
//! - **Interactive mode**: chat-style translation with `llm-translate chat`
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate a file into the first configured language
//! llm-translate ./notes.md
//!
//! # Translate from stdin with an explicit target and LLM
//! cat report.md | llm-translate --to Japanese --llm "GPT-4o mini"
//!
//! # Interactive chat mode
//! llm-translate chat
//! ```
//!
//! ## Configuration
//!
//! Settings are read from `~/.config/llm-translate/settings.toml`:
//!
//! ```toml
//! [[llms]]
//! title = "GPT-4o mini"
//! model = "gpt-4o-mini"
//! api_key = "${OPENAI_API_KEY}"
//!
//! [[llms]]
//! title = "Local"
//! model = "llama3.2"
//! api_base = "http://localhost:11434/v1"
//!
//! [[languages]]
//! title = "English"
//! language = "English"
//!
//! [[languages]]
//! title = "日本語"
//! language = "Japanese"
//! ```

/// Interactive chat mode for translation sessions.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Settings file loading and CLI option resolution.
pub mod config;

/// Input reading from files and stdin.
pub mod input;

/// XDG-style path utilities.
pub mod paths;

/// Session orchestration: runtime, agents, detection and translation.
pub mod session;

/// OpenAI-compatible client, prompts and language handling.
pub mod translation;

/// Terminal UI components (spinner, colors, streaming output).
pub mod ui;
