// sentival - manual validation of an automated sentiment classifier
// Draws a stratified sample for human annotation, then scores the
// classifier against the annotated labels.

mod evaluate;
mod exit_codes;
mod sample;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::LevelFilter;

use sentival_config::{ConfigError, ValidationConfig};
use sentival_io::IoError;
use sentival_recon::ValidationError;

use exit_codes::{
    config_exit_code, io_exit_code, validation_exit_code, EXIT_CONFIG, EXIT_SUCCESS,
};

#[derive(Parser)]
#[command(name = "sentival")]
#[command(about = "Manual validation of an automated sentiment classifier")]
#[command(version)]
#[command(after_help = "\
Examples:
  sentival                      draw 100 posts (config default) for annotation
  sentival --muestra 150        draw 150 posts
  sentival --muestra 60 --seed 7
  sentival --evaluar            score the annotated sample
  sentival --evaluar --json     print the evaluation as JSON
  sentival --init               create data folders and sentival.toml
  sentival --show-config")]
struct Cli {
    /// Number of posts to draw for annotation [default: sampling.size]
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    muestra: Option<u64>,

    /// Score the annotated sample instead of drawing a new one
    #[arg(long, conflicts_with_all = ["muestra", "seed"])]
    evaluar: bool,

    /// Sampling seed [default: sampling.seed]
    #[arg(long)]
    seed: Option<u64>,

    /// Config file (otherwise <root>/sentival.toml, then the user config)
    #[arg(long, short = 'c', value_name = "FILE", env = "SENTIVAL_CONFIG")]
    config: Option<PathBuf>,

    /// Project root; relative paths in the config resolve against it
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Print the resolved configuration and exit
    #[arg(long, conflicts_with_all = ["evaluar", "init"])]
    show_config: bool,

    /// Create the data folders and a default sentival.toml, then exit
    #[arg(long, conflicts_with = "evaluar")]
    init: bool,

    /// Print the result as JSON on stdout
    #[arg(long)]
    json: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format_timestamp(None).parse_default_env();
    // Only fails if a logger is already installed
    let _ = builder.try_init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = load_config(cli)?;

    if cli.init {
        return cmd_init(&config);
    }
    if cli.show_config {
        print!("{}", config.summary());
        return Ok(());
    }

    if cli.evaluar {
        evaluate::cmd_evaluate(&config, cli.json)
    } else {
        let size = cli.muestra.map(|n| n as usize).unwrap_or(config.sampling.size);
        let seed = cli.seed.unwrap_or(config.sampling.seed);
        sample::cmd_sample(&config, size, seed, cli.json)
    }
}

fn load_config(cli: &Cli) -> Result<ValidationConfig, CliError> {
    let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("."));

    let (config, source) = match &cli.config {
        Some(path) => {
            if !path.is_file() {
                return Err(CliError::new(
                    EXIT_CONFIG,
                    format!("config file not found: {}", path.display()),
                ));
            }
            (ValidationConfig::load(path)?, Some(path.clone()))
        }
        None => ValidationConfig::discover(&root)?,
    };

    match &source {
        Some(path) => log::info!("config: {}", path.display()),
        None => log::info!("config: built-in defaults"),
    }

    Ok(match &cli.root {
        Some(root) => config.with_root(root.clone()),
        None => config,
    })
}

// ============================================================================
// init
// ============================================================================

fn cmd_init(config: &ValidationConfig) -> Result<(), CliError> {
    for dir in config.create_layout()? {
        println!("✓ {}", dir.display());
    }
    match ValidationConfig::write_default_file(&config.paths.root)? {
        Some(path) => println!("✓ Configuración creada: {}", path.display()),
        None => eprintln!("note: {} already exists, left unchanged", sentival_config::settings::PROJECT_CONFIG_FILE),
    }
    Ok(())
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<IoError> for CliError {
    fn from(e: IoError) -> Self {
        Self::new(io_exit_code(&e), e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(config_exit_code(&e), e.to_string())
    }
}

impl From<ValidationError> for CliError {
    fn from(e: ValidationError) -> Self {
        Self::new(validation_exit_code(&e), e.to_string())
    }
}
