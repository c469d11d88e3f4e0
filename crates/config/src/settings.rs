// Validation settings
// Loaded from sentival.toml in the project root, or ~/.config/sentival/config.toml

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use sentival_recon::VerdictThresholds;

/// File name looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "sentival.toml";

#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    Read { path: PathBuf, message: String },
    /// TOML parse / deserialization error.
    Parse(String),
    /// Values parsed but are inconsistent.
    Validation(String),
    /// Directory bootstrap or default-file write failed.
    Io(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => {
                write!(f, "cannot read config {}: {message}", path.display())
            }
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Validation(msg) => write!(f, "config validation error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Project layout. Relative paths resolve against `root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub root: PathBuf,
    /// Feature table with `id_publicacion`, `id_participante`, `sentimiento`.
    pub features: PathBuf,
    /// Text table with `id_publicacion`, `texto_publicacion`.
    pub texts: PathBuf,
    pub results: PathBuf,

    // Output names inside `results`
    pub sample_file: String,
    pub annotated_file: String,
    pub errors_file: String,
    pub report_file: String,
    pub heatmap_file: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            features: PathBuf::from("data/features/caracteristicas_completas.csv"),
            texts: PathBuf::from("data/processed/publicaciones_texto.csv"),
            results: PathBuf::from("data/results"),
            sample_file: "muestra_validacion_manual.csv".into(),
            annotated_file: "muestra_validacion_manual_etiquetada.csv".into(),
            errors_file: "errores_sentimiento.csv".into(),
            report_file: "validacion_sentimiento_reporte.txt".into(),
            heatmap_file: "confusion_matrix_sentimiento.svg".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoSettings {
    /// Encoding label for every CSV read and written (`utf-8-sig` = UTF-8 with BOM).
    pub encoding: String,
    pub delimiter: char,
}

impl Default for IoSettings {
    fn default() -> Self {
        Self {
            encoding: "utf-8-sig".into(),
            delimiter: ',',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingSettings {
    pub size: usize,
    pub seed: u64,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self { size: 100, seed: 42 }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub paths: PathSettings,
    pub io: IoSettings,
    pub sampling: SamplingSettings,
    pub thresholds: VerdictThresholds,
}

impl ValidationConfig {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: ValidationConfig =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&contents)
    }

    /// Locate a config for `root`: `<root>/sentival.toml`, then the user config
    /// file, then defaults. Returns the file used, if any. `paths.root` is
    /// always set to `root` when the file does not name one.
    pub fn discover(root: &Path) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let candidates = [Some(root.join(PROJECT_CONFIG_FILE)), Self::user_config_path()];

        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                let mut config = Self::load(&path)?;
                if config.paths.root == PathSettings::default().root {
                    config.paths.root = root.to_path_buf();
                }
                return Ok((config, Some(path)));
            }
        }

        Ok((Self::default().with_root(root), None))
    }

    /// `~/.config/sentival/config.toml` (platform equivalent).
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("sentival").join("config.toml"))
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.paths.root = root.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        for (name, v) in [("acceptable", t.acceptable), ("marginal", t.marginal)] {
            if !(0.0..=1.0).contains(&v) {
                return Err(ConfigError::Validation(format!(
                    "thresholds.{name} must be within [0, 1], got {v}"
                )));
            }
        }
        if t.marginal > t.acceptable {
            return Err(ConfigError::Validation(format!(
                "thresholds.marginal ({}) must not exceed thresholds.acceptable ({})",
                t.marginal, t.acceptable
            )));
        }

        if self.sampling.size == 0 {
            return Err(ConfigError::Validation("sampling.size must be positive".into()));
        }

        if self.io.encoding.trim().is_empty() {
            return Err(ConfigError::Validation("io.encoding must not be empty".into()));
        }
        if !self.io.delimiter.is_ascii() {
            return Err(ConfigError::Validation(format!(
                "io.delimiter must be a single ASCII character, got '{}'",
                self.io.delimiter
            )));
        }

        let names = [
            ("sample_file", &self.paths.sample_file),
            ("annotated_file", &self.paths.annotated_file),
            ("errors_file", &self.paths.errors_file),
            ("report_file", &self.paths.report_file),
            ("heatmap_file", &self.paths.heatmap_file),
        ];
        for (key, name) in names {
            if name.trim().is_empty() {
                return Err(ConfigError::Validation(format!("paths.{key} must not be empty")));
            }
        }
        if self.paths.sample_file == self.paths.annotated_file {
            return Err(ConfigError::Validation(
                "paths.annotated_file must differ from paths.sample_file".into(),
            ));
        }

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Resolved paths
    // -----------------------------------------------------------------------

    fn resolve(&self, p: &Path) -> PathBuf {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.paths.root.join(p)
        }
    }

    pub fn features_path(&self) -> PathBuf {
        self.resolve(&self.paths.features)
    }

    pub fn texts_path(&self) -> PathBuf {
        self.resolve(&self.paths.texts)
    }

    pub fn results_dir(&self) -> PathBuf {
        self.resolve(&self.paths.results)
    }

    pub fn sample_path(&self) -> PathBuf {
        self.results_dir().join(&self.paths.sample_file)
    }

    pub fn annotated_path(&self) -> PathBuf {
        self.results_dir().join(&self.paths.annotated_file)
    }

    pub fn errors_path(&self) -> PathBuf {
        self.results_dir().join(&self.paths.errors_file)
    }

    pub fn report_path(&self) -> PathBuf {
        self.results_dir().join(&self.paths.report_file)
    }

    pub fn heatmap_path(&self) -> PathBuf {
        self.results_dir().join(&self.paths.heatmap_file)
    }

    /// Create the results directory if missing.
    pub fn ensure_dirs(&self) -> Result<(), ConfigError> {
        let dir = self.results_dir();
        fs::create_dir_all(&dir)
            .map_err(|e| ConfigError::Io(format!("cannot create {}: {e}", dir.display())))
    }

    /// Create the project data layout (input and results folders).
    pub fn create_layout(&self) -> Result<Vec<PathBuf>, ConfigError> {
        let mut dirs: Vec<PathBuf> = [self.features_path(), self.texts_path()]
            .iter()
            .filter_map(|p| p.parent().map(Path::to_path_buf))
            .collect();
        dirs.push(self.results_dir());
        dirs.dedup();

        for dir in &dirs {
            fs::create_dir_all(dir)
                .map_err(|e| ConfigError::Io(format!("cannot create {}: {e}", dir.display())))?;
        }
        Ok(dirs)
    }

    /// Write a commented default config to `<root>/sentival.toml` unless one exists.
    /// Returns the path when a file was created.
    pub fn write_default_file(root: &Path) -> Result<Option<PathBuf>, ConfigError> {
        let path = root.join(PROJECT_CONFIG_FILE);
        if path.exists() {
            return Ok(None);
        }
        fs::write(&path, DEFAULT_CONFIG)
            .map_err(|e| ConfigError::Io(format!("cannot write {}: {e}", path.display())))?;
        Ok(Some(path))
    }

    /// Configuration summary for the console.
    pub fn summary(&self) -> String {
        let rule = "=".repeat(60);
        let mut out = String::new();
        out.push_str(&format!("{rule}\nCONFIGURACIÓN ACTUAL\n{rule}\n"));
        out.push_str(&format!("Raíz del proyecto: {}\n", self.paths.root.display()));
        out.push_str(&format!("Características: {}\n", self.features_path().display()));
        out.push_str(&format!("Textos: {}\n", self.texts_path().display()));
        out.push_str(&format!("Resultados: {}\n", self.results_dir().display()));
        out.push_str(&format!(
            "Encoding: {} (delimitador '{}')\n",
            self.io.encoding, self.io.delimiter
        ));
        out.push_str(&format!(
            "Muestra: {} publicaciones (semilla {})\n",
            self.sampling.size, self.sampling.seed
        ));
        out.push_str(&format!(
            "Umbrales: aceptable ≥{:.0}%, marginal ≥{:.0}%\n",
            self.thresholds.acceptable * 100.0,
            self.thresholds.marginal * 100.0
        ));
        out.push_str(&rule);
        out.push('\n');
        out
    }
}

const DEFAULT_CONFIG: &str = r#"# sentival configuration
# Relative paths resolve against paths.root (defaults to the project directory).

[paths]
features = "data/features/caracteristicas_completas.csv"
texts = "data/processed/publicaciones_texto.csv"
results = "data/results"
sample_file = "muestra_validacion_manual.csv"
annotated_file = "muestra_validacion_manual_etiquetada.csv"
errors_file = "errores_sentimiento.csv"
report_file = "validacion_sentimiento_reporte.txt"
heatmap_file = "confusion_matrix_sentimiento.svg"

[io]
# Any WHATWG label (utf-8, windows-1252, ...); "utf-8-sig" writes a BOM
encoding = "utf-8-sig"
delimiter = ","

[sampling]
size = 100
seed = 42

[thresholds]
acceptable = 0.75
marginal = 0.60
"#;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_project_layout() {
        let config = ValidationConfig::default().with_root("/proj");
        assert_eq!(
            config.features_path(),
            PathBuf::from("/proj/data/features/caracteristicas_completas.csv")
        );
        assert_eq!(
            config.sample_path(),
            PathBuf::from("/proj/data/results/muestra_validacion_manual.csv")
        );
        assert_eq!(config.io.encoding, "utf-8-sig");
        assert_eq!(config.sampling.size, 100);
        assert_eq!(config.sampling.seed, 42);
        assert_eq!(config.thresholds, VerdictThresholds::default());
    }

    #[test]
    fn default_file_parses_to_defaults() {
        let config = ValidationConfig::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, ValidationConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let config = ValidationConfig::from_toml(
            r#"
[sampling]
seed = 7

[thresholds]
acceptable = 0.8
"#,
        )
        .unwrap();
        assert_eq!(config.sampling.seed, 7);
        assert_eq!(config.sampling.size, 100);
        assert_eq!(config.thresholds.acceptable, 0.8);
        assert_eq!(config.thresholds.marginal, 0.60);
        assert_eq!(config.paths, PathSettings::default());
    }

    #[test]
    fn absolute_paths_are_kept() {
        let config = ValidationConfig::from_toml(
            r#"
[paths]
results = "/tmp/out"
"#,
        )
        .unwrap()
        .with_root("/proj");
        assert_eq!(config.results_dir(), PathBuf::from("/tmp/out"));
        assert_eq!(config.report_path(), PathBuf::from("/tmp/out/validacion_sentimiento_reporte.txt"));
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let err = ValidationConfig::from_toml(
            r#"
[thresholds]
acceptable = 0.5
marginal = 0.6
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let err = ValidationConfig::from_toml("[thresholds]\nacceptable = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn rejects_zero_sample_size() {
        let err = ValidationConfig::from_toml("[sampling]\nsize = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn rejects_annotated_file_equal_to_sample_file() {
        let err = ValidationConfig::from_toml(
            "[paths]\nannotated_file = \"muestra_validacion_manual.csv\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn parse_error_is_reported() {
        let err = ValidationConfig::from_toml("[sampling\nsize = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn discover_prefers_project_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE), "[sampling]\nsize = 12\n").unwrap();

        let (config, used) = ValidationConfig::discover(dir.path()).unwrap();
        assert_eq!(used, Some(dir.path().join(PROJECT_CONFIG_FILE)));
        assert_eq!(config.sampling.size, 12);
        assert_eq!(config.paths.root, dir.path());
    }

    #[test]
    fn write_default_file_does_not_clobber() {
        let dir = tempfile::tempdir().unwrap();
        let created = ValidationConfig::write_default_file(dir.path()).unwrap();
        assert_eq!(created, Some(dir.path().join(PROJECT_CONFIG_FILE)));

        fs::write(dir.path().join(PROJECT_CONFIG_FILE), "[sampling]\nsize = 5\n").unwrap();
        assert_eq!(ValidationConfig::write_default_file(dir.path()).unwrap(), None);
        let kept = fs::read_to_string(dir.path().join(PROJECT_CONFIG_FILE)).unwrap();
        assert!(kept.contains("size = 5"));
    }

    #[test]
    fn create_layout_makes_input_and_result_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let config = ValidationConfig::default().with_root(dir.path());
        config.create_layout().unwrap();

        assert!(dir.path().join("data/features").is_dir());
        assert!(dir.path().join("data/processed").is_dir());
        assert!(dir.path().join("data/results").is_dir());
    }

    #[test]
    fn summary_mentions_key_settings() {
        let summary = ValidationConfig::default().summary();
        assert!(summary.contains("CONFIGURACIÓN ACTUAL"));
        assert!(summary.contains("utf-8-sig"));
        assert!(summary.contains("semilla 42"));
        assert!(summary.contains("aceptable ≥75%"));
    }
}
