//! Internationalization utilities for the backend
//!
//! This module owns the allow-list of output locales and the
//! normalization of caller-supplied language tags into that list.

use std::fmt;

use rust_i18n::t;

/// Supported locales
pub const SUPPORTED_LOCALES: &[&str] = &["ja", "en", "zh-CN", "zh-TW", "ko"];
pub const DEFAULT_LOCALE: &str = "ja";

/// Output language of a generated line and its category labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    Ja,
    En,
    ZhCn,
    ZhTw,
    Ko,
}

impl Locale {
    /// Catalog code, also the file name under `locales/`.
    pub fn code(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
            Self::ZhCn => "zh-CN",
            Self::ZhTw => "zh-TW",
            Self::Ko => "ko",
        }
    }

    /// Language name as written into English prompt text.
    pub fn english_name(self) -> &'static str {
        match self {
            Self::Ja => "Japanese",
            Self::En => "English",
            Self::ZhCn => "Simplified Chinese",
            Self::ZhTw => "Traditional Chinese",
            Self::Ko => "Korean",
        }
    }

    /// Parse a language tag against the allow-list.
    ///
    /// Accepts: "ja", "ja-JP", "en_US", "zh", "zh-Hant", "zh_TW", "ko-KR", etc.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_lowercase().replace('_', "-");
        if tag.is_empty() {
            return None;
        }

        // Chinese variants are resolved on the full tag, not the primary subtag
        match tag.as_str() {
            "zh-tw" | "zh-hk" | "zh-mo" | "zh-hant" => return Some(Self::ZhTw),
            "zh" | "zh-cn" | "zh-sg" | "zh-hans" | "cn" => return Some(Self::ZhCn),
            _ => {},
        }
        if tag.starts_with("zh-hant") {
            return Some(Self::ZhTw);
        }
        if tag.starts_with("zh-hans") {
            return Some(Self::ZhCn);
        }

        let primary = tag.split(['-', ',', ';']).next().unwrap_or_default();
        match primary {
            "ja" => Some(Self::Ja),
            "en" => Some(Self::En),
            "ko" => Some(Self::Ko),
            "zh" => Some(Self::ZhCn),
            _ => None,
        }
    }

    /// Fixed fallback line for an empty word, from the locale catalog.
    pub fn blank_line(self) -> String {
        t!("fallback.blank", locale = self.code()).into_owned()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Normalize a locale string to a supported locale.
/// Unknown tags collapse to the default locale.
pub fn normalize_locale(locale: &str) -> Locale {
    Locale::parse(locale).unwrap_or_default()
}
