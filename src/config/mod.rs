mod manager;
mod resolve;
mod settings;

pub use manager::{SETTINGS_FILE_NAME, SettingsManager};
pub use resolve::{ResolveOptions, ResolvedSession, resolve_config};
pub use settings::{
    AUTO_DETECT_TITLE, LanguageEntry, LanguageOption, LlmOption, Settings, SettingsFile,
    substitute_env,
};
