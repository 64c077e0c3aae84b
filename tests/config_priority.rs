#![allow(clippy::unwrap_used)]
//! Config priority contract tests.
//!
//! CLI options take priority over settings defaults:
//! 1. CLI arguments
//! 2. First configured LLM / first configured language
//! 3. `auto` for the source language

use llm_translate::config::{ResolveOptions, Settings, resolve_config};

fn make_settings() -> Settings {
    Settings::from_toml(
        r#"
[[llms]]
title = "Primary"
model = "gpt-4o-mini"

[[llms]]
title = "Local"
model = "llama3.2"
api_base = "http://localhost:11434/v1"

[[languages]]
title = "English"
language = "English"

[[languages]]
title = "Japanese"
language = "Japanese"
"#,
    )
    .unwrap()
}

#[test]
fn test_defaults_come_from_settings() {
    let resolved = resolve_config(&ResolveOptions::default(), &make_settings()).unwrap();

    assert_eq!(resolved.llm.title, "Primary");
    assert_eq!(resolved.source_lang, "auto");
    assert_eq!(resolved.target_lang, "English");
}

#[test]
fn test_cli_llm_overrides_default() {
    let options = ResolveOptions {
        llm: Some("Local".to_string()),
        ..Default::default()
    };

    let resolved = resolve_config(&options, &make_settings()).unwrap();

    assert_eq!(resolved.llm.model, "llama3.2");
}

#[test]
fn test_cli_languages_override_defaults() {
    let options = ResolveOptions {
        from: Some("English".to_string()),
        to: Some("Japanese".to_string()),
        llm: None,
    };

    let resolved = resolve_config(&options, &make_settings()).unwrap();

    assert_eq!(resolved.source_lang, "English");
    assert_eq!(resolved.target_lang, "Japanese");
}

#[test]
fn test_unknown_llm_lists_available() {
    let options = ResolveOptions {
        llm: Some("Missing".to_string()),
        ..Default::default()
    };

    let err = resolve_config(&options, &make_settings()).unwrap_err();

    assert!(err.to_string().contains("LLM 'Missing' not found"));
    assert!(err.to_string().contains("Primary"));
    assert!(err.to_string().contains("Local"));
}

#[test]
fn test_auto_target_is_rejected() {
    let options = ResolveOptions {
        to: Some("auto".to_string()),
        ..Default::default()
    };

    let err = resolve_config(&options, &make_settings()).unwrap_err();

    assert!(err.to_string().contains("cannot be used as a target language"));
}

#[test]
fn test_unknown_languages_are_rejected() {
    let to = ResolveOptions {
        to: Some("Klingon".to_string()),
        ..Default::default()
    };
    let from = ResolveOptions {
        from: Some("Klingon".to_string()),
        ..Default::default()
    };

    let settings = make_settings();
    assert!(
        resolve_config(&to, &settings)
            .unwrap_err()
            .to_string()
            .contains("Invalid language")
    );
    assert!(
        resolve_config(&from, &settings)
            .unwrap_err()
            .to_string()
            .contains("Invalid language")
    );
}
