use std::fmt::Write;

use super::language::{AUTO, CandidateLanguages};
use crate::session::Input;

pub fn build_detection_prompt(languages: &CandidateLanguages) -> String {
    let mut prompt = String::from(
        "You are a language detector who is dedicated to detect the language of the given text.\n\n\
         Your output must be one of the following languages (and nothing else):\n",
    );
    for lang in languages.iter() {
        let _ = writeln!(prompt, "- {lang}");
    }
    prompt
}

pub fn build_translation_prompt(source_lang: &str, target_lang: &str) -> String {
    if source_lang == AUTO {
        format!(
            "You are a professional translator who is dedicated to translate the given text to {target_lang}."
        )
    } else {
        format!(
            "You are a professional translator who is dedicated to translate the given text from {source_lang} to {target_lang}."
        )
    }
}

pub fn render_translation_prompt(input: &Input) -> String {
    build_translation_prompt(&input.source_lang, &input.target_lang)
}
