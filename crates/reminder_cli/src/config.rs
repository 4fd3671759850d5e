use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use reminder_core::ListOrder;
use serde::{Deserialize, Serialize};

const CONFIG_DIR_NAME: &str = "cook-reminder";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_DB_FILE_NAME: &str = "cook_reminder.sqlite3";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub default_order: ListOrder,
}

impl CliConfig {
    fn with_base_dir(dir: &Path) -> Self {
        Self {
            db_path: dir.join(DEFAULT_DB_FILE_NAME),
            log_level: reminder_core::default_log_level().to_string(),
            log_dir: None,
            default_order: ListOrder::Ascending,
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self::with_base_dir(Path::new(""))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    Serialize(toml::ser::Error),
    NoHome,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "config io {}: {source}", path.display()),
            Self::Parse { path, source } => write!(f, "parse config {}: {source}", path.display()),
            Self::Serialize(err) => write!(f, "serialize config: {err}"),
            Self::NoHome => write!(f, "cannot resolve HOME for the default config location"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::NoHome => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CliConfig,
    pub file: PathBuf,
    pub created: bool,
}

/// Loads `explicit` or the default config file, writing defaults when missing.
pub fn load_or_create(explicit: Option<&Path>) -> Result<ConfigLoad, ConfigError> {
    let file = match explicit {
        Some(path) => absolute_path(path)?,
        None => default_config_dir()?.join(CONFIG_FILE_NAME),
    };
    let base_dir = file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    if file.exists() {
        let contents = fs::read_to_string(&file).map_err(|source| ConfigError::Io {
            path: file.clone(),
            source,
        })?;
        let config = parse_config(&contents, &base_dir).map_err(|source| ConfigError::Parse {
            path: file.clone(),
            source,
        })?;
        return Ok(ConfigLoad {
            config,
            file,
            created: false,
        });
    }

    fs::create_dir_all(&base_dir).map_err(|source| ConfigError::Io {
        path: base_dir.clone(),
        source,
    })?;
    let config = CliConfig::with_base_dir(&base_dir);
    let contents = toml::to_string_pretty(&config).map_err(ConfigError::Serialize)?;
    fs::write(&file, contents).map_err(|source| ConfigError::Io {
        path: file.clone(),
        source,
    })?;

    Ok(ConfigLoad {
        config,
        file,
        created: true,
    })
}

/// Parses config text; relative paths resolve against `base_dir`.
fn parse_config(contents: &str, base_dir: &Path) -> Result<CliConfig, toml::de::Error> {
    let mut config: CliConfig = toml::from_str(contents)?;
    if config.db_path.is_relative() {
        config.db_path = base_dir.join(&config.db_path);
    }
    if let Some(log_dir) = config.log_dir.as_mut() {
        if log_dir.is_relative() {
            *log_dir = base_dir.join(&*log_dir);
        }
    }
    Ok(config)
}

fn absolute_path(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(cwd.join(path))
}

fn default_config_dir() -> Result<PathBuf, ConfigError> {
    let home = std::env::var_os("HOME").ok_or(ConfigError::NoHome)?;
    Ok(PathBuf::from(home).join(".config").join(CONFIG_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::{load_or_create, parse_config, CliConfig};
    use reminder_core::ListOrder;
    use std::path::Path;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("config.toml");

        let loaded = load_or_create(Some(&file)).unwrap();
        assert!(loaded.created);
        assert!(file.exists());
        assert_eq!(loaded.config.db_path, dir.path().join("nested").join("cook_reminder.sqlite3"));

        let reloaded = load_or_create(Some(&file)).unwrap();
        assert!(!reloaded.created);
        assert_eq!(reloaded.config, loaded.config);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config = parse_config("default_order = \"descending\"\n", Path::new("/data")).unwrap();
        assert_eq!(config.default_order, ListOrder::Descending);
        assert_eq!(config.log_dir, None);
        assert_eq!(config.log_level, CliConfig::default().log_level);
    }

    #[test]
    fn relative_db_path_resolves_against_config_dir() {
        let config = parse_config("db_path = \"cooks.db\"\n", Path::new("/data")).unwrap();
        assert_eq!(config.db_path, Path::new("/data/cooks.db"));
    }

    #[test]
    fn relative_log_dir_resolves_against_config_dir() {
        let config = parse_config("log_dir = \"logs\"\n", Path::new("/data")).unwrap();
        assert_eq!(config.log_dir.as_deref(), Some(Path::new("/data/logs")));

        let config = parse_config("log_dir = \"/var/log/cooks\"\n", Path::new("/data")).unwrap();
        assert_eq!(config.log_dir.as_deref(), Some(Path::new("/var/log/cooks")));
    }

    #[test]
    fn short_order_names_match_the_cli_flag() {
        let config = parse_config("default_order = \"asc\"\n", Path::new("/data")).unwrap();
        assert_eq!(config.default_order, ListOrder::Ascending);
        let config = parse_config("default_order = \"desc\"\n", Path::new("/data")).unwrap();
        assert_eq!(config.default_order, ListOrder::Descending);
    }

    #[test]
    fn unknown_order_is_a_parse_error() {
        assert!(parse_config("default_order = \"sideways\"\n", Path::new("/data")).is_err());
    }
}
