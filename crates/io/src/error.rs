use std::fmt;
use std::path::PathBuf;

use sentival_recon::ValidationError;

#[derive(Debug)]
pub enum IoError {
    /// A required input file does not exist.
    MissingInput(PathBuf),
    /// Input file exists but could not be read.
    Read { path: PathBuf, message: String },
    /// Header row lacks a required column.
    MissingColumn { path: PathBuf, column: String },
    /// Malformed CSV record.
    Csv { path: PathBuf, message: String },
    /// Unknown encoding label.
    Encoding(String),
    /// Heatmap drawing failed.
    Render(String),
    /// Output could not be written.
    Write { path: PathBuf, message: String },
    /// Engine rejected the data (empty corpus, unknown label, ...).
    Validation(ValidationError),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput(path) => write!(f, "input file not found: {}", path.display()),
            Self::Read { path, message } => write!(f, "cannot read {}: {message}", path.display()),
            Self::MissingColumn { path, column } => {
                write!(f, "{}: missing column '{column}'", path.display())
            }
            Self::Csv { path, message } => write!(f, "{}: {message}", path.display()),
            Self::Encoding(msg) => write!(f, "encoding error: {msg}"),
            Self::Render(msg) => write!(f, "cannot render heatmap: {msg}"),
            Self::Write { path, message } => {
                write!(f, "cannot write {}: {message}", path.display())
            }
            Self::Validation(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for IoError {}

impl From<ValidationError> for IoError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
