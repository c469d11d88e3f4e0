//! The fixed three-class sentiment alphabet and label normalization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(rename = "POS")]
    Pos,
    #[serde(rename = "NEU")]
    Neu,
    #[serde(rename = "NEG")]
    Neg,
}

impl Sentiment {
    /// Alphabet in confusion-matrix order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Pos, Sentiment::Neu, Sentiment::Neg];

    /// Row/column position in the confusion matrix.
    pub fn index(self) -> usize {
        match self {
            Self::Pos => 0,
            Self::Neu => 1,
            Self::Neg => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pos => "POS",
            Self::Neu => "NEU",
            Self::Neg => "NEG",
        }
    }

    /// Human description shown to annotators.
    pub fn description(self) -> &'static str {
        match self {
            Self::Pos => "positivo",
            Self::Neu => "neutral",
            Self::Neg => "negativo",
        }
    }

    /// Normalize then parse. `None` for anything outside the alphabet,
    /// including the empty string.
    pub fn parse_label(raw: &str) -> Option<Self> {
        match normalize_label(raw).as_str() {
            "POS" => Some(Self::Pos),
            "NEU" => Some(Self::Neu),
            "NEG" => Some(Self::Neg),
            _ => None,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s).ok_or_else(|| format!("unknown sentiment label '{s}'"))
    }
}

/// Trim surrounding whitespace and upper-case.
pub fn normalize_label(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// True when a raw manual label carries no annotation.
pub fn is_blank(raw: Option<&str>) -> bool {
    raw.map_or(true, |s| s.trim().is_empty())
}
