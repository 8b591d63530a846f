use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const APP_NAME: &str = "wordhunt";
const CONFIG_FILE: &str = "config.json";

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV: &str = "WORDHUNT_CONFIG";

/// Default name of the index file created inside the indexed directory.
pub const DEFAULT_INDEX_FILE_NAME: &str = "index.dat";

/// Persistent defaults, read from the user's config directory.
///
/// Every field has a default so partial files are fine. Command-line flags
/// override whatever is set here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub case_sensitive: bool,

    /// Split words at camel-case boundaries when scanning names and content
    #[serde(default = "default_case_word_split")]
    pub case_word_split: bool,

    /// Report matching directories, not only files
    #[serde(default)]
    pub include_dirs: bool,

    /// Print bare paths instead of "Found: <path>"
    #[serde(default)]
    pub brief: bool,

    #[serde(default = "default_index_file_name")]
    pub index_file_name: String,
}

fn default_case_word_split() -> bool {
    true
}

fn default_index_file_name() -> String {
    DEFAULT_INDEX_FILE_NAME.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            case_word_split: default_case_word_split(),
            include_dirs: false,
            brief: false,
            index_file_name: default_index_file_name(),
        }
    }
}

impl AppConfig {
    /// Load config from the config directory, or return default if not found
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| SearchError::io(path, e))?;
        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| SearchError::Config(format!("{}: {}", path.display(), e)))?;

        if config.index_file_name.trim().is_empty() {
            return Err(SearchError::Config(format!(
                "{}: index_file_name must not be empty",
                path.display()
            )));
        }

        Ok(config)
    }
}

/// Get the path to the config file (`$WORDHUNT_CONFIG` wins over the default location)
pub fn get_config_path() -> Option<PathBuf> {
    if let Some(custom) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(custom));
    }
    dirs::config_dir().map(|base| base.join(APP_NAME).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert!(!config.case_sensitive);
        assert!(config.case_word_split);
        assert!(!config.include_dirs);
        assert!(!config.brief);
        assert_eq!(config.index_file_name, "index.dat");
    }

    #[test]
    fn test_app_config_partial_json() {
        // Should use defaults for missing fields
        let json = r#"{"case_sensitive": true}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert!(config.case_sensitive);
        assert!(config.case_word_split);
        assert_eq!(config.index_file_name, "index.dat");
    }

    #[test]
    fn test_app_config_empty_json() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"brief": true, "index_file_name": "words.idx"}"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert!(config.brief);
        assert_eq!(config.index_file_name, "words.idx");
    }

    #[test]
    fn test_load_from_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(AppConfig::load_from(&path), Err(SearchError::Config(_))));

        fs::write(&path, r#"{"index_file_name": " "}"#).unwrap();
        assert!(matches!(AppConfig::load_from(&path), Err(SearchError::Config(_))));
    }
}
