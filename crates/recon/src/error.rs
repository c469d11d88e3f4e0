use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Nothing left to sample or score after filtering.
    InsufficientData(String),
    /// Requested sample size is zero.
    InvalidSampleSize(usize),
    /// A label outside POS/NEU/NEG after normalization.
    UnknownLabel {
        record_id: String,
        column: &'static str,
        value: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientData(msg) => write!(f, "insufficient data: {msg}"),
            Self::InvalidSampleSize(n) => {
                write!(f, "sample size must be a positive integer, got {n}")
            }
            Self::UnknownLabel { record_id, column, value } => write!(
                f,
                "record '{record_id}': column '{column}' has unknown label '{value}' (expected POS, NEU or NEG)"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}
