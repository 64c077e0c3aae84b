use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::translation::{AUTO, CandidateLanguages};

/// Title of the pseudo-language that asks for detection.
pub const AUTO_DETECT_TITLE: &str = "Auto Detect";

/// Raw layout of `settings.toml`.
///
/// ```toml
/// [[llms]]
/// title = "GPT-4o mini"
/// model = "gpt-4o-mini"
/// api_key = "${OPENAI_API_KEY}"
///
/// [[languages]]
/// title = "Japanese"
/// language = "Japanese"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub llms: Vec<toml::Table>,
    #[serde(default)]
    pub languages: Vec<LanguageEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageEntry {
    pub title: String,
    pub language: String,
}

/// A selectable LLM: display title plus the client configuration as JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmOption {
    pub title: String,
    pub model: String,
    pub config_json: String,
}

/// A selectable language: display title plus the tag sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageOption {
    pub title: String,
    pub tag: String,
}

/// Validated settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub llms: Vec<LlmOption>,
    /// Starts with the "Auto Detect" entry.
    pub languages: Vec<LanguageOption>,
}

impl Settings {
    /// Parses and validates the contents of a settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed, an LLM entry has no model,
    /// or either the `llms` or `languages` list is empty.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: SettingsFile =
            toml::from_str(contents).context("Failed to parse settings file")?;
        Self::from_file(file)
    }

    pub fn from_file(file: SettingsFile) -> Result<Self> {
        if file.llms.is_empty() {
            bail!("No LLMs configured\n\nAdd at least one [[llms]] entry to the settings file");
        }
        if file.languages.is_empty() {
            bail!(
                "No languages configured\n\n\
                 Add at least one [[languages]] entry to the settings file"
            );
        }

        let llms = file
            .llms
            .into_iter()
            .enumerate()
            .map(|(index, table)| {
                llm_option(table).with_context(|| format!("Invalid LLM #{}", index + 1))
            })
            .collect::<Result<Vec<_>>>()?;

        let languages = std::iter::once(LanguageOption {
            title: AUTO_DETECT_TITLE.to_string(),
            tag: AUTO.to_string(),
        })
        .chain(file.languages.into_iter().map(|entry| LanguageOption {
            title: entry.title,
            tag: entry.language,
        }))
        .collect();

        Ok(Self { llms, languages })
    }

    /// Languages a detector may answer with and a user may pick as target.
    pub fn candidate_languages(&self) -> CandidateLanguages {
        CandidateLanguages::new(self.languages.iter().map(|l| l.tag.as_str()))
    }

    pub fn find_llm(&self, title: &str) -> Option<&LlmOption> {
        self.llms.iter().find(|llm| llm.title == title)
    }

    pub fn default_llm(&self) -> Option<&LlmOption> {
        self.llms.first()
    }

    pub fn llm_titles(&self) -> Vec<&str> {
        self.llms.iter().map(|llm| llm.title.as_str()).collect()
    }
}

fn llm_option(mut table: toml::Table) -> Result<LlmOption> {
    let title = match table.remove("title") {
        Some(toml::Value::String(title)) => Some(title),
        Some(_) => bail!("'title' must be a string"),
        None => None,
    };

    if let Some(toml::Value::String(api_key)) = table.get_mut("api_key") {
        *api_key = substitute_env(api_key);
    }

    let model = match table.get("model") {
        Some(toml::Value::String(model)) if !model.trim().is_empty() => model.clone(),
        _ => bail!("'model' is required"),
    };

    let config_json = serde_json::to_string(&table).context("Failed to convert LLM settings")?;

    Ok(LlmOption {
        title: title.unwrap_or_else(|| model.clone()),
        model,
        config_json,
    })
}

/// Expands a value of the form `${VAR}` to the variable's value.
///
/// Unset variables expand to an empty string. Other values are returned as-is.
pub fn substitute_env(value: &str) -> String {
    match value
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
    {
        Some(var) => std::env::var(var).unwrap_or_default(),
        None => value.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::ClientConfig;
    use serial_test::serial;

    const SAMPLE: &str = r#"
[[llms]]
title = "GPT-4o mini"
model = "gpt-4o-mini"
temperature = 0.2

[[llms]]
model = "llama3.2"
api_base = "http://localhost:11434/v1"

[[languages]]
title = "English"
language = "English"

[[languages]]
title = "日本語"
language = "Japanese"
"#;

    #[test]
    fn test_parse_llms_and_languages() {
        let settings = Settings::from_toml(SAMPLE).unwrap();

        assert_eq!(settings.llm_titles(), vec!["GPT-4o mini", "llama3.2"]);
        assert_eq!(settings.default_llm().unwrap().model, "gpt-4o-mini");

        let config = ClientConfig::from_json(&settings.llms[1].config_json).unwrap();
        assert_eq!(config.api_base.as_deref(), Some("http://localhost:11434/v1"));
        assert!(!settings.llms[0].config_json.contains("title"));
        assert!(settings.llms[0].config_json.contains("temperature"));
    }

    #[test]
    fn test_languages_start_with_auto_detect() {
        let settings = Settings::from_toml(SAMPLE).unwrap();

        assert_eq!(settings.languages[0].title, AUTO_DETECT_TITLE);
        assert_eq!(settings.languages[0].tag, AUTO);
        assert_eq!(settings.languages[2].title, "日本語");
        assert_eq!(settings.languages[2].tag, "Japanese");

        let candidates = settings.candidate_languages();
        assert_eq!(candidates.iter().collect::<Vec<_>>(), vec!["English", "Japanese"]);
    }

    #[test]
    fn test_find_llm_by_title() {
        let settings = Settings::from_toml(SAMPLE).unwrap();

        assert_eq!(settings.find_llm("llama3.2").unwrap().model, "llama3.2");
        assert!(settings.find_llm("missing").is_none());
    }

    #[test]
    fn test_missing_llms_is_error() {
        let err = Settings::from_toml("[[languages]]\ntitle = \"A\"\nlanguage = \"A\"\n")
            .unwrap_err();
        assert!(err.to_string().contains("No LLMs configured"));
    }

    #[test]
    fn test_missing_languages_is_error() {
        let err = Settings::from_toml("[[llms]]\nmodel = \"m\"\n").unwrap_err();
        assert!(err.to_string().contains("No languages configured"));
    }

    #[test]
    fn test_llm_without_model_is_error() {
        let err = Settings::from_toml(
            "[[llms]]\ntitle = \"x\"\n[[languages]]\ntitle = \"A\"\nlanguage = \"A\"\n",
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("'model' is required"));
    }

    #[test]
    #[serial]
    fn test_api_key_env_substitution() {
        unsafe { std::env::set_var("LLM_TRANSLATE_TEST_KEY", "sk-test") };

        let settings = Settings::from_toml(
            "[[llms]]\nmodel = \"m\"\napi_key = \"${LLM_TRANSLATE_TEST_KEY}\"\n\
             [[languages]]\ntitle = \"A\"\nlanguage = \"A\"\n",
        )
        .unwrap();
        let config = ClientConfig::from_json(&settings.llms[0].config_json).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));

        unsafe { std::env::remove_var("LLM_TRANSLATE_TEST_KEY") };
    }

    #[test]
    #[serial]
    fn test_substitute_env() {
        unsafe { std::env::remove_var("LLM_TRANSLATE_UNSET_KEY") };

        assert_eq!(substitute_env("${LLM_TRANSLATE_UNSET_KEY}"), "");
        assert_eq!(substitute_env("sk-literal"), "sk-literal");
        assert_eq!(substitute_env("${unterminated"), "${unterminated");
    }
}
