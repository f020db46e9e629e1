use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_FIXTURES_DIR: &str = "Tests/fixtures";
pub const DEFAULT_RESULTS_DIR: &str = "Tests/results";
pub const DEFAULT_FIXTURE: &str = "mixed.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub fixtures_dir: PathBuf,
    pub results_dir: PathBuf,
    /// Run every phone through `RemoveWhitespace` before validation.
    pub strip_whitespace: bool,
    /// Fixture used by `validate` when no input is given.
    pub default_fixture: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fixtures_dir: PathBuf::from(DEFAULT_FIXTURES_DIR),
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            strip_whitespace: false,
            default_fixture: DEFAULT_FIXTURE.to_owned(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid default_fixture value: {0:?}")]
    InvalidDefaultFixture(String),
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    fixtures_dir: Option<PathBuf>,
    results_dir: Option<PathBuf>,
    strip_whitespace: Option<bool>,
    default_fixture: Option<String>,
}

/// Loads the configuration, falling back to defaults when no path is given.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    match config_path {
        None => Ok(AppConfig::default()),
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            load_at_path(&path)
        }
    }
}

pub fn load_at_path(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&contents, path)
}

fn parse(contents: &str, path: &Path) -> Result<AppConfig> {
    let parsed: ConfigFile = toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut config = AppConfig::default();
    if let Some(dir) = parsed.fixtures_dir {
        config.fixtures_dir = dir;
    }
    if let Some(dir) = parsed.results_dir {
        config.results_dir = dir;
    }
    if let Some(strip) = parsed.strip_whitespace {
        config.strip_whitespace = strip;
    }
    if let Some(fixture) = parsed.default_fixture {
        validate_fixture_name(&fixture)?;
        config.default_fixture = fixture;
    }
    Ok(config)
}

// Fixture names are resolved inside `fixtures_dir`; they are names, not paths.
fn validate_fixture_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.contains(['/', '\\']) || trimmed == ".." {
        return Err(ConfigError::InvalidDefaultFixture(name.to_owned()));
    }
    Ok(())
}
