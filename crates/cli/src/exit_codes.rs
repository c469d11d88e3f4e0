//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: pipelines branch on them.
//!
//! | Code | Name                   | Trigger                                          |
//! |------|------------------------|--------------------------------------------------|
//! | 0    | `EXIT_SUCCESS`         | Command completed                                |
//! | 1    | `EXIT_ERROR`           | Unspecified failure                              |
//! | 2    | `EXIT_USAGE`           | Bad arguments (clap also exits 2)                |
//! | 3    | `EXIT_MISSING_INPUT`   | Corpus or annotated file not found               |
//! | 4    | `EXIT_INSUFFICIENT`    | Empty corpus, nothing annotated                  |
//! | 5    | `EXIT_MALFORMED`       | CSV parse error, missing column, unknown label   |
//! | 6    | `EXIT_CONFIG`          | Config file unreadable or invalid, bad encoding  |
//! | 7    | `EXIT_WRITE`           | An output could not be written                   |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Map the error to it in `CliError`'s `From` impls

use sentival_config::ConfigError;
use sentival_io::IoError;
use sentival_recon::ValidationError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, conflicting options.
pub const EXIT_USAGE: u8 = 2;

/// A required input file does not exist.
pub const EXIT_MISSING_INPUT: u8 = 3;

/// Nothing to sample or score (empty corpus, no annotated rows).
pub const EXIT_INSUFFICIENT: u8 = 4;

/// Input exists but is malformed (CSV error, missing column, unknown label).
pub const EXIT_MALFORMED: u8 = 5;

/// Configuration could not be loaded or is inconsistent.
pub const EXIT_CONFIG: u8 = 6;

/// An output file or directory could not be written.
pub const EXIT_WRITE: u8 = 7;

/// Exit code for an engine error.
pub fn validation_exit_code(err: &ValidationError) -> u8 {
    match err {
        ValidationError::InsufficientData(_) => EXIT_INSUFFICIENT,
        ValidationError::InvalidSampleSize(_) => EXIT_USAGE,
        ValidationError::UnknownLabel { .. } => EXIT_MALFORMED,
    }
}

/// Exit code for an I/O error.
pub fn io_exit_code(err: &IoError) -> u8 {
    match err {
        IoError::MissingInput(_) => EXIT_MISSING_INPUT,
        IoError::Read { .. } => EXIT_ERROR,
        IoError::MissingColumn { .. } | IoError::Csv { .. } => EXIT_MALFORMED,
        IoError::Encoding(_) => EXIT_CONFIG,
        IoError::Render(_) | IoError::Write { .. } => EXIT_WRITE,
        IoError::Validation(e) => validation_exit_code(e),
    }
}

/// Exit code for a configuration error.
pub fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::Read { .. } | ConfigError::Parse(_) | ConfigError::Validation(_) => EXIT_CONFIG,
        ConfigError::Io(_) => EXIT_WRITE,
    }
}
