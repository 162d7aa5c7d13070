use serde::{Deserialize, Serialize};

use crate::utils::Locale;

/// Target output length range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthMode {
    Short,
    #[default]
    Long,
}

impl LengthMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "short" => Some(Self::Short),
            "long" => Some(Self::Long),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Long => "long",
        }
    }
}

/// Tone/register of the generated line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleMode {
    /// Declarative, assertive
    Printer,
    /// Murmured, elliptical
    Smile,
}

impl StyleMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "printer" => Some(Self::Printer),
            "smile" => Some(Self::Smile),
            _ => None,
        }
    }

    /// Older clients only sent a length; the screen they rendered on
    /// implied the style.
    pub fn legacy_default(length: LengthMode) -> Self {
        match length {
            LengthMode::Short => Self::Printer,
            LengthMode::Long => Self::Smile,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Printer => "printer",
            Self::Smile => "smile",
        }
    }
}

/// Fully resolved request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Word with annotation markers removed
    pub word: String,
    pub length: LengthMode,
    pub style: StyleMode,
    pub locale: Locale,
}

/// Two-field result, also the shape the model is asked to return
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatireResult {
    pub satire: String,
    #[serde(rename = "type")]
    pub category: String,
}

/// Endpoint response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatireResponse {
    pub satire: String,
    #[serde(rename = "type")]
    pub category: String,
    /// Advisory detail when the result came from the fallback path
    /// because the upstream call failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SatireResponse {
    pub fn new(result: SatireResult, error: Option<String>) -> Self {
        Self { satire: result.satire, category: result.category, error }
    }
}
