//! Satire Scenario
//!
//! Prompt construction for a one-line satirical take on a word, and
//! decoding of the model's two-field reply.

use serde::Deserialize;

use super::language::build_language_prompt_section;
use crate::models::{LengthMode, RequestParameters, SatireResult, StyleMode};
use crate::services::fallback::{SatireCategory, default_category_label};

const MAX_WORD_CHARS: usize = 200;

// ============================================================================
// System Prompt
// ============================================================================

const SYSTEM_PREAMBLE: &str = "You are a concise satirical copywriter. \
You turn a single word into one sharp line of satire or irony. \
Aim at systems and habits, never at protected groups.";

const OUTPUT_FORMAT_SECTION: &str = r#"

## Output Format
Return ONLY a JSON object with exactly these two string fields:
{"satire":"...","type":"..."}
No prose before or after it, no code fences, no extra fields.
"#;

// ============================================================================
// Prompt Pair
// ============================================================================

/// System and user instruction for one completion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

fn length_rule(length: LengthMode) -> &'static str {
    match length {
        LengthMode::Short => "between 15 and 30 characters, a single short line",
        LengthMode::Long => "between 40 and 80 characters, still a single line",
    }
}

fn style_rule(style: StyleMode) -> &'static str {
    match style {
        StyleMode::Printer => {
            "declarative and assertive. End on a firm statement. \
Never use ellipses (\"…\" or \"...\"), question marks, or hedging words \
such as \"maybe\", \"perhaps\", \"probably\" or \"might\"."
        },
        StyleMode::Smile => {
            "a quiet, murmured aside, as if said under the breath with a wry smile. \
Trailing ellipses and half-finished thoughts are allowed."
        },
    }
}

/// Strip control characters and cap the length of user input embedded
/// in the prompt.
fn sanitize_for_prompt(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_WORD_CHARS)
        .collect::<String>()
        .replace("```", "")
}

/// Build the system and user instructions for a resolved request.
pub fn build_prompts(params: &RequestParameters) -> PromptPair {
    let system = format!(
        "{SYSTEM_PREAMBLE}{}{OUTPUT_FORMAT_SECTION}",
        build_language_prompt_section(params.locale)
    );

    let examples = [
        SatireCategory::Society,
        SatireCategory::Work,
        SatireCategory::Love,
        SatireCategory::Tech,
    ]
    .iter()
    .map(|c| c.label(params.locale))
    .collect::<Vec<_>>()
    .join(" / ");

    let user = format!(
        "Write one line of satire or irony about the word below.\n\
\n\
- `satire`: {length}.\n\
- Tone: {style}\n\
- `type`: a short category name that fits the context, for example {examples}.\n\
\n\
Word: {word}",
        length = length_rule(params.length),
        style = style_rule(params.style),
        word = sanitize_for_prompt(&params.word),
    );

    PromptPair { system, user }
}

// ============================================================================
// Response
// ============================================================================

#[derive(Debug, Deserialize)]
struct ModelReply {
    #[serde(default)]
    satire: Option<String>,
    #[serde(default, rename = "type")]
    category: Option<String>,
}

/// Remove a surrounding markdown code fence, if the model added one.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string ("json") on the opening line
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or_default();
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Decode the model's reply.
///
/// Returns `None` when the payload is not a JSON object of the expected
/// shape or when `satire` is blank; the caller then falls back to the
/// local templates. A missing or blank `type` gets the locale's default
/// category label.
pub fn parse_reply(content: &str, params: &RequestParameters) -> Option<SatireResult> {
    let reply: ModelReply = match serde_json::from_str(strip_code_fence(content)) {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!("Discarding undecodable model reply: {}", e);
            return None;
        },
    };

    let satire = reply.satire.as_deref().map(str::trim).unwrap_or_default();
    if satire.is_empty() {
        tracing::warn!("Model reply has an empty satire field");
        return None;
    }

    let category = reply
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_category_label(params.locale));

    Some(SatireResult { satire: satire.to_string(), category })
}
