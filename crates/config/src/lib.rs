// Configuration loading

pub mod settings;

pub use settings::{ConfigError, IoSettings, PathSettings, SamplingSettings, ValidationConfig};
