//! Language-aware helpers for LLM prompts
//!
//! The output language comes from the request's resolved locale, not from
//! any process-wide setting, so concurrent requests can ask for different
//! languages.

use crate::utils::Locale;

/// Build a small prompt section that *hard constrains* the answer language.
///
/// Short and strongly worded so the model does not mix languages in
/// either field.
pub fn build_language_prompt_section(locale: Locale) -> String {
    let name = locale.english_name();
    format!(
        "\n\n## Language Requirement\n\
Write both `satire` and `type` **strictly in {name}**. \
Do not mix in any other language, and do not add translations or romanization.\n"
    )
}
