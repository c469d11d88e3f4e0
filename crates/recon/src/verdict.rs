use serde::{Deserialize, Serialize};

/// Qualitative reading of an accuracy score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Acceptable,
    Marginal,
    Low,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Acceptable => write!(f, "acceptable"),
            Self::Marginal => write!(f, "marginal"),
            Self::Low => write!(f, "low"),
        }
    }
}

impl Verdict {
    /// Label used in the Spanish report.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Acceptable => "ACEPTABLE",
            Self::Marginal => "MARGINAL",
            Self::Low => "BAJO",
        }
    }
}

/// Lower bounds (inclusive) for `acceptable` and `marginal`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerdictThresholds {
    pub acceptable: f64,
    pub marginal: f64,
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        Self {
            acceptable: 0.75,
            marginal: 0.60,
        }
    }
}

impl VerdictThresholds {
    pub fn classify(&self, accuracy: f64) -> Verdict {
        if accuracy >= self.acceptable {
            Verdict::Acceptable
        } else if accuracy >= self.marginal {
            Verdict::Marginal
        } else {
            Verdict::Low
        }
    }

    /// Range text for a verdict, e.g. `60-75%`.
    pub fn range_label(&self, verdict: Verdict) -> String {
        let pct = |v: f64| (v * 100.0).round() as i64;
        match verdict {
            Verdict::Acceptable => format!("≥{}%", pct(self.acceptable)),
            Verdict::Marginal => format!("{}-{}%", pct(self.marginal), pct(self.acceptable)),
            Verdict::Low => format!("<{}%", pct(self.marginal)),
        }
    }
}
