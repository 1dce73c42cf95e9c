use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tidybook_core::{AnalysisOptions, SimilarityThreshold};

const APP_DIR: &str = "tidybook";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_CHURCHSUITE_BASE_URL: &str = "https://api.churchsuite.com/v1";
pub const DEFAULT_CHURCHSUITE_APPLICATION: &str = "integration";
pub const DEFAULT_PER_PAGE: u32 = 50;
pub const MAX_PER_PAGE: u32 = 100;
pub const DEFAULT_CSV_PATH: &str = "address_book-analysis.csv";

pub const ENV_API_KEY: &str = "TIDYBOOK_CHURCHSUITE_API_KEY";
pub const ENV_ACCOUNT: &str = "TIDYBOOK_CHURCHSUITE_ACCOUNT";

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub analysis: AnalysisOptions,
    pub churchsuite: ChurchSuiteConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChurchSuiteConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub account: Option<String>,
    pub application: String,
    pub per_page: u32,
}

impl Default for ChurchSuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CHURCHSUITE_BASE_URL.to_string(),
            api_key: None,
            account: None,
            application: DEFAULT_CHURCHSUITE_APPLICATION.to_string(),
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub csv_path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid analysis.similarity_threshold value: {0}")]
    InvalidSimilarityThreshold(f64),
    #[error("invalid analysis.large_input_warning value: {0}")]
    InvalidLargeInputWarning(usize),
    #[error("invalid churchsuite.per_page value: {0}")]
    InvalidPerPage(u32),
    #[error("invalid churchsuite.{field} value")]
    InvalidChurchSuiteField { field: &'static str },
    #[error("invalid export.csv_path value")]
    InvalidCsvPath,
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
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
    analysis: Option<AnalysisFile>,
    churchsuite: Option<ChurchSuiteFile>,
    export: Option<ExportFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AnalysisFile {
    similarity_threshold: Option<f64>,
    large_input_warning: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChurchSuiteFile {
    base_url: Option<String>,
    api_key: Option<String>,
    account: Option<String>,
    application: Option<String>,
    per_page: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExportFile {
    csv_path: Option<PathBuf>,
}

/// Credentials taken from the environment; they win over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct EnvOverrides {
    api_key: Option<String>,
    account: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            api_key: non_empty_env(ENV_API_KEY),
            account: non_empty_env(ENV_ACCOUNT),
        }
    }

    fn apply(self, config: &mut AppConfig) {
        if let Some(api_key) = self.api_key {
            config.churchsuite.api_key = Some(api_key);
        }
        if let Some(account) = self.account {
            config.churchsuite.account = Some(account);
        }
    }
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let mut config = load_file(config_path)?;
    EnvOverrides::from_env().apply(&mut config);
    Ok(config)
}

fn load_file(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(analysis) = parsed.analysis {
        if let Some(threshold) = analysis.similarity_threshold {
            config.analysis.similarity_threshold = SimilarityThreshold::new(threshold)
                .map_err(|_| ConfigError::InvalidSimilarityThreshold(threshold))?;
        }
        if let Some(limit) = analysis.large_input_warning {
            if limit == 0 {
                return Err(ConfigError::InvalidLargeInputWarning(limit));
            }
            config.analysis.large_input_warning = limit;
        }
    }

    if let Some(churchsuite) = parsed.churchsuite {
        let target = &mut config.churchsuite;
        if let Some(base_url) = churchsuite.base_url {
            target.base_url = required_text("base_url", base_url)?
                .trim_end_matches('/')
                .to_string();
        }
        if let Some(api_key) = churchsuite.api_key {
            target.api_key = Some(required_text("api_key", api_key)?);
        }
        if let Some(account) = churchsuite.account {
            target.account = Some(required_text("account", account)?);
        }
        if let Some(application) = churchsuite.application {
            target.application = required_text("application", application)?;
        }
        if let Some(per_page) = churchsuite.per_page {
            if per_page == 0 || per_page > MAX_PER_PAGE {
                return Err(ConfigError::InvalidPerPage(per_page));
            }
            target.per_page = per_page;
        }
    }

    if let Some(export) = parsed.export {
        if let Some(csv_path) = export.csv_path {
            if csv_path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidCsvPath);
            }
            config.export.csv_path = csv_path;
        }
    }

    Ok(config)
}

fn required_text(field: &'static str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidChurchSuiteField { field });
    }
    Ok(trimmed.to_string())
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
