//! Request Normalizer
//!
//! Turns the loosely-shaped request body into `RequestParameters`.
//!
//! Every parameter is resolved by walking an ordered list of resolvers;
//! the first one that returns `Some` wins, otherwise a computed default
//! applies. Older callers still encode length and style as annotations
//! inside `word` (`"上司 (short)"`, `"AI [printer]"`), so the word-level
//! resolvers sit behind the explicit body fields.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::models::{LengthMode, RequestParameters, StyleMode};
use crate::utils::{ApiError, ApiResult, Locale, normalize_locale};

pub const WORD_REQUIRED: &str = "word is required";

/// Length annotation ending the word, optionally followed by separators
static LENGTH_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[(（]\s*(short|long|短文?|長文?|长文?)\s*[)）][\s:：/|\-_,、]*$").unwrap()
});

/// Bracketed style tag anywhere in the word, with the spaces around it
static STYLE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*[\[(（【]\s*(printer|smile)\s*[\])）】]\s*").unwrap()
});

/// Bare style keyword not glued to other ASCII letters
static STYLE_KEYWORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:^|[^a-z])(printer|smile)(?:[^a-z]|$)").unwrap());

/// Bare style keyword ending the word, optionally followed by separators
static TRAILING_STYLE_KEYWORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:^|[^a-z])(printer|smile)[\s:：/|\-_,、]*$").unwrap());

/// Separators left dangling once a trailing marker is cut
const MARKER_SEPARATORS: &[char] = &[':', '：', '/', '|', '-', '_', ',', '、'];

const STYLE_FIELDS: &[&str] = &["style", "screen", "mode"];
const LOCALE_FIELDS: &[&str] = &["lang", "language", "locale"];

// ============================================================================
// Raw request view
// ============================================================================

/// Request body plus the coerced, trimmed `word` and its markers
#[derive(Debug)]
pub struct RawRequest<'a> {
    body: &'a Value,
    word: String,
    stripped: StrippedWord,
}

impl<'a> RawRequest<'a> {
    pub fn new(body: &'a Value) -> Self {
        let word = coerce_word(body.get("word"));
        let stripped = strip_markers(&word);
        Self { body, word, stripped }
    }

    /// Trimmed word as sent, annotations included
    pub fn word(&self) -> &str {
        &self.word
    }

    fn field_str(&self, key: &str) -> Option<&str> {
        self.body.get(key).and_then(Value::as_str)
    }
}

/// `word` as a string: strings as-is, non-zero numbers and `true`
/// by their JSON text, everything else empty.
fn coerce_word(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => String::new(),
    }
}

// ============================================================================
// Resolvers
// ============================================================================

type Resolver<T> = fn(&RawRequest<'_>) -> Option<T>;

const LENGTH_RESOLVERS: &[Resolver<LengthMode>] = &[explicit_length, tagged_length];
const STYLE_RESOLVERS: &[Resolver<StyleMode>] = &[explicit_style, tagged_style];
const LOCALE_RESOLVERS: &[Resolver<Locale>] = &[explicit_locale];

fn first_resolved<T>(raw: &RawRequest<'_>, resolvers: &[Resolver<T>]) -> Option<T> {
    resolvers.iter().find_map(|resolve| resolve(raw))
}

fn explicit_length(raw: &RawRequest<'_>) -> Option<LengthMode> {
    raw.field_str("length").and_then(LengthMode::parse)
}

fn tagged_length(raw: &RawRequest<'_>) -> Option<LengthMode> {
    raw.stripped.length
}

fn explicit_style(raw: &RawRequest<'_>) -> Option<StyleMode> {
    STYLE_FIELDS.iter().find_map(|key| raw.field_str(key).and_then(StyleMode::parse))
}

fn tagged_style(raw: &RawRequest<'_>) -> Option<StyleMode> {
    let caps = STYLE_TAG_REGEX
        .captures(raw.word())
        .or_else(|| STYLE_KEYWORD_REGEX.captures(raw.word()))?;
    StyleMode::parse(caps.get(1)?.as_str())
}

/// The first non-empty locale field decides; a value that is not a
/// supported tag (or not a string at all) collapses to the default.
fn explicit_locale(raw: &RawRequest<'_>) -> Option<Locale> {
    LOCALE_FIELDS.iter().find_map(|key| match raw.body.get(*key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(normalize_locale(s)),
        Some(_) => Some(Locale::default()),
    })
}

// ============================================================================
// Word cleanup
// ============================================================================

/// Word with annotations removed, plus the length tag that was cut
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedWord {
    pub word: String,
    /// Outermost trailing length tag, if any
    pub length: Option<LengthMode>,
}

fn parse_length_tag(tag: &str) -> LengthMode {
    let tag = tag.to_lowercase();
    if tag == "short" || tag.starts_with('短') { LengthMode::Short } else { LengthMode::Long }
}

/// Drop bracketed style tags; a single space survives only when the tag
/// sat between two spaces.
fn strip_style_tags(word: &str) -> String {
    STYLE_TAG_REGEX
        .replace_all(word, |caps: &Captures<'_>| {
            let tag = &caps[0];
            if tag.starts_with(char::is_whitespace) && tag.ends_with(char::is_whitespace) {
                " "
            } else {
                ""
            }
        })
        .trim()
        .to_string()
}

/// Byte offset where a trailing marker starts, and the length it encodes.
fn trailing_marker(word: &str) -> Option<(usize, Option<LengthMode>)> {
    if let Some(caps) = LENGTH_TAG_REGEX.captures(word) {
        let start = caps.get(0)?.start();
        return Some((start, caps.get(1).map(|tag| parse_length_tag(tag.as_str()))));
    }
    let caps = TRAILING_STYLE_KEYWORD_REGEX.captures(word)?;
    Some((caps.get(1)?.start(), None))
}

/// Remove UI annotations so the model only sees the semantic input.
///
/// Only text belonging to a matched marker is touched: bracketed style
/// tags anywhere, then trailing length tags and bare style keywords
/// together with the separators next to them. Falls back to the trimmed
/// raw word when nothing else is left.
pub fn strip_markers(raw_word: &str) -> StrippedWord {
    let mut word = strip_style_tags(raw_word);
    let mut length = None;

    while let Some((cut, tag)) = trailing_marker(&word) {
        length = length.or(tag);
        word.truncate(cut);
        let keep = word
            .trim_end_matches(|c: char| c.is_whitespace() || MARKER_SEPARATORS.contains(&c))
            .len();
        word.truncate(keep);
        if word.is_empty() {
            break;
        }
    }

    let word = if word.is_empty() { raw_word.trim().to_string() } else { word };
    StrippedWord { word, length }
}

// ============================================================================
// Entry point
// ============================================================================

/// Resolve a request body into parameters.
///
/// Precedence per parameter:
/// - length: `body.length` → trailing length tag in `word` → `long`
/// - style: `body.style` / `screen` / `mode` → style tag or keyword in `word`
///   → legacy mapping from length (`short→printer`, `long→smile`)
/// - locale: `body.lang` / `language` / `locale` → default locale
pub fn normalize(body: &Value) -> ApiResult<RequestParameters> {
    let raw = RawRequest::new(body);
    if raw.word().is_empty() {
        return Err(ApiError::validation_error(WORD_REQUIRED));
    }

    let length = first_resolved(&raw, LENGTH_RESOLVERS).unwrap_or_default();
    let style = first_resolved(&raw, STYLE_RESOLVERS)
        .unwrap_or_else(|| StyleMode::legacy_default(length));
    let locale = first_resolved(&raw, LOCALE_RESOLVERS).unwrap_or_default();

    Ok(RequestParameters { word: raw.stripped.word, length, style, locale })
}
